//! Movie aggregate as seen by callers.
//!
//! # Invariants
//! - `actors` is keyed by role name; one actor may fill several roles.
//! - `genres` keeps caller order (significance).
//! - Duration is persisted with whole-second precision.

use super::actor::Actor;
use super::genre::Genre;
use super::ModelValidationError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Store-assigned movie identity.
pub type MovieId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: Option<MovieId>,
    pub title: String,
    pub duration: Duration,
    pub release_date: NaiveDate,
    /// Role name -> actor playing it.
    pub actors: BTreeMap<String, Actor>,
    pub genres: Vec<Genre>,
}

impl Movie {
    /// Creates an unpersisted movie without cast or genres.
    pub fn new(title: impl Into<String>, duration: Duration, release_date: NaiveDate) -> Self {
        Self {
            id: None,
            title: title.into(),
            duration,
            release_date,
            actors: BTreeMap::new(),
            genres: Vec::new(),
        }
    }

    /// Adds or replaces the actor for `role`.
    pub fn cast(mut self, role: impl Into<String>, actor: Actor) -> Self {
        self.actors.insert(role.into(), actor);
        self
    }

    pub fn genre(mut self, genre: Genre) -> Self {
        self.genres.push(genre);
        self
    }

    /// Checks movie-level fields and every embedded entity.
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        if self.title.trim().is_empty() {
            return Err(ModelValidationError::BlankMovieTitle);
        }
        for (role, actor) in &self.actors {
            if role.trim().is_empty() {
                return Err(ModelValidationError::BlankRole);
            }
            actor.validate()?;
        }
        for genre in &self.genres {
            genre.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Movie;
    use crate::model::actor::{Actor, Gender};
    use crate::model::genre::Genre;
    use crate::model::ModelValidationError;
    use chrono::NaiveDate;
    use std::time::Duration;

    fn joker() -> Movie {
        Movie::new(
            "Joker",
            Duration::from_secs(122 * 60),
            NaiveDate::from_ymd_opt(2019, 10, 4).unwrap(),
        )
    }

    #[test]
    fn cast_replaces_actor_for_same_role() {
        let first = Actor::new("A", "One", NaiveDate::from_ymd_opt(1970, 1, 1).unwrap(), Gender::Male);
        let second = Actor::new("B", "Two", NaiveDate::from_ymd_opt(1980, 1, 1).unwrap(), Gender::Female);
        let movie = joker().cast("Lead", first).cast("Lead", second.clone());
        assert_eq!(movie.actors.len(), 1);
        assert_eq!(movie.actors["Lead"], second);
    }

    #[test]
    fn validate_checks_embedded_entities() {
        assert_eq!(joker().validate(), Ok(()));

        let mut untitled = joker();
        untitled.title = " ".to_string();
        assert_eq!(untitled.validate(), Err(ModelValidationError::BlankMovieTitle));

        let blank_genre = joker().genre(Genre::new(""));
        assert_eq!(blank_genre.validate(), Err(ModelValidationError::BlankGenreName));

        let actor = Actor::new("A", "One", NaiveDate::from_ymd_opt(1970, 1, 1).unwrap(), Gender::Male);
        let blank_role = joker().cast("", actor);
        assert_eq!(blank_role.validate(), Err(ModelValidationError::BlankRole));
    }
}
