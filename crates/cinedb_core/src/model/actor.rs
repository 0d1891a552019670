//! Actor domain model.
//!
//! # Invariants
//! - `id` is assigned by the store on first persistence and never reused.
//! - Equivalence for deduplication ignores `id`; see [`Actor::equal_ignoring_id`].

use super::ModelValidationError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Store-assigned actor identity.
pub type ActorId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// Stable storage text, identical to the variant name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Male" => Some(Self::Male),
            "Female" => Some(Self::Female),
            "Other" => Some(Self::Other),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// `None` until persisted.
    pub id: Option<ActorId>,
    pub name: String,
    pub surname: String,
    pub birthdate: NaiveDate,
    pub deathdate: Option<NaiveDate>,
    pub gender: Gender,
}

impl Actor {
    /// Creates a not-yet-persisted, living actor.
    pub fn new(
        name: impl Into<String>,
        surname: impl Into<String>,
        birthdate: NaiveDate,
        gender: Gender,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            surname: surname.into(),
            birthdate,
            deathdate: None,
            gender,
        }
    }

    pub fn with_id(mut self, id: Option<ActorId>) -> Self {
        self.id = id;
        self
    }

    pub fn with_deathdate(mut self, deathdate: Option<NaiveDate>) -> Self {
        self.deathdate = deathdate;
        self
    }

    /// Derived `"name surname"`; never stored.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }

    /// Structural equality over every field except `id`.
    ///
    /// Movie writes coalesce roles onto one persisted actor with this check,
    /// so it must stay independent of the derived `PartialEq`.
    pub fn equal_ignoring_id(&self, other: &Actor) -> bool {
        self.name == other.name
            && self.surname == other.surname
            && self.birthdate == other.birthdate
            && self.deathdate == other.deathdate
            && self.gender == other.gender
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        if self.name.trim().is_empty() {
            return Err(ModelValidationError::BlankActorName);
        }
        if self.surname.trim().is_empty() {
            return Err(ModelValidationError::BlankActorSurname);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Actor, Gender};
    use crate::model::ModelValidationError;
    use chrono::NaiveDate;

    fn phoenix() -> Actor {
        Actor::new(
            "Joaquin",
            "Phoenix",
            NaiveDate::from_ymd_opt(1974, 10, 28).unwrap(),
            Gender::Male,
        )
    }

    #[test]
    fn full_name_joins_name_and_surname() {
        assert_eq!(phoenix().full_name(), "Joaquin Phoenix");
    }

    #[test]
    fn equal_ignoring_id_skips_identity_only() {
        let unsaved = phoenix();
        let saved = phoenix().with_id(Some(7));
        assert!(unsaved.equal_ignoring_id(&saved));
        assert_ne!(unsaved, saved);

        let dead = phoenix().with_deathdate(NaiveDate::from_ymd_opt(2100, 1, 1));
        assert!(!unsaved.equal_ignoring_id(&dead));

        let mut other_gender = phoenix();
        other_gender.gender = Gender::Other;
        assert!(!unsaved.equal_ignoring_id(&other_gender));
    }

    #[test]
    fn gender_storage_text_roundtrips() {
        for gender in [Gender::Male, Gender::Female, Gender::Other] {
            assert_eq!(Gender::parse(gender.as_str()), Some(gender));
        }
        assert_eq!(Gender::parse("male"), None);
    }

    #[test]
    fn validate_rejects_blank_names() {
        let mut actor = phoenix();
        actor.name = "  ".to_string();
        assert_eq!(actor.validate(), Err(ModelValidationError::BlankActorName));

        let mut actor = phoenix();
        actor.surname = String::new();
        assert_eq!(
            actor.validate(),
            Err(ModelValidationError::BlankActorSurname)
        );
    }
}
