//! Domain model for the movie catalog.
//!
//! # Responsibility
//! - Define the embedded-object shapes callers work with.
//! - Own field-level validation shared by every write path.
//!
//! # Invariants
//! - Identity fields are `None` until the store assigns them.
//! - Movies embed full `Actor`/`Genre` values, never foreign keys.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod actor;
pub mod genre;
pub mod movie;

/// Field-level validation failures raised before persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelValidationError {
    BlankActorName,
    BlankActorSurname,
    BlankGenreName,
    BlankMovieTitle,
    BlankRole,
}

impl Display for ModelValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankActorName => write!(f, "actor name cannot be blank"),
            Self::BlankActorSurname => write!(f, "actor surname cannot be blank"),
            Self::BlankGenreName => write!(f, "genre name cannot be blank"),
            Self::BlankMovieTitle => write!(f, "movie title cannot be blank"),
            Self::BlankRole => write!(f, "role name cannot be blank"),
        }
    }
}

impl Error for ModelValidationError {}
