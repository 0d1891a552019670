//! Sample catalog used by `cinedb seed`.

use chrono::NaiveDate;
use cinedb_core::{Actor, Gender, Genre, Movie};
use std::time::Duration;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn minutes(value: u64) -> Duration {
    Duration::from_secs(value * 60)
}

pub fn sample_movies() -> Vec<Movie> {
    let de_niro = Actor::new("Robert", "De Niro", date(1943, 8, 17), Gender::Male);

    vec![
        Movie::new("Joker", minutes(122), date(2019, 10, 4))
            .cast(
                "Arthur Fleck",
                Actor::new("Joaquin", "Phoenix", date(1974, 10, 28), Gender::Male),
            )
            .cast("Murray Franklin", de_niro.clone())
            .genre(Genre::new("crime"))
            .genre(Genre::new("drama")),
        Movie::new("Life Is Beautiful", minutes(116), date(1997, 12, 20))
            .cast(
                "Guido Orefice",
                Actor::new("Roberto", "Benigni", date(1952, 10, 27), Gender::Male),
            )
            .cast(
                "Uncle Eliseo",
                Actor::new("Giustino", "Durano", date(1923, 9, 5), Gender::Male)
                    .with_deathdate(Some(date(2002, 10, 18))),
            )
            .genre(Genre::new("comedy"))
            .genre(Genre::new("drama")),
        Movie::new("Pride & Prejudice", minutes(129), date(2005, 9, 16))
            .cast(
                "Elizabeth Bennet",
                Actor::new("Keira", "Knightley", date(1985, 4, 26), Gender::Female),
            )
            .genre(Genre::new("romance"))
            .genre(Genre::new("drama")),
        Movie::new("The King of Comedy", minutes(109), date(1982, 12, 18))
            .cast("Rupert Pupkin", de_niro)
            .genre(Genre::new("comedy"))
            .genre(Genre::new("crime")),
    ]
}
