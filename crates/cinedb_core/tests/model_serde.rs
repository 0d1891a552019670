use chrono::NaiveDate;
use cinedb_core::{Actor, Gender, Genre, Movie};
use std::time::Duration;

#[test]
fn gender_serializes_as_variant_name() {
    assert_eq!(serde_json::to_string(&Gender::Female).unwrap(), "\"Female\"");
    let parsed: Gender = serde_json::from_str("\"Other\"").unwrap();
    assert_eq!(parsed, Gender::Other);
}

#[test]
fn movie_json_embeds_actors_by_role() {
    let movie = Movie::new(
        "Pride & Prejudice",
        Duration::from_secs(129 * 60),
        NaiveDate::from_ymd_opt(2005, 9, 16).unwrap(),
    )
    .cast(
        "Elizabeth Bennet",
        Actor::new(
            "Keira",
            "Knightley",
            NaiveDate::from_ymd_opt(1985, 4, 26).unwrap(),
            Gender::Female,
        )
        .with_id(Some(5)),
    )
    .genre(Genre::new("romance").with_id(Some(3)));

    let value = serde_json::to_value(&movie).unwrap();
    assert_eq!(value["actors"]["Elizabeth Bennet"]["surname"], "Knightley");
    assert_eq!(value["actors"]["Elizabeth Bennet"]["birthdate"], "1985-04-26");
    assert_eq!(value["genres"][0]["id"], 3);

    let back: Movie = serde_json::from_value(value).unwrap();
    assert_eq!(back, movie);
}
