//! Genre domain model. Names are unique at the store boundary.

use super::ModelValidationError;
use serde::{Deserialize, Serialize};

/// Store-assigned genre identity.
pub type GenreId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: Option<GenreId>,
    pub name: String,
}

impl Genre {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }

    pub fn with_id(mut self, id: Option<GenreId>) -> Self {
        self.id = id;
        self
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        if self.name.trim().is_empty() {
            return Err(ModelValidationError::BlankGenreName);
        }
        Ok(())
    }
}
