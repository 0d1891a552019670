//! Storage-access layer over the normalized catalog tables.
//!
//! # Responsibility
//! - Provide flat-record CRUD and equality lookups per table family.
//! - Define the storage-only reference records and the codec producing them.
//! - Keep SQL details out of the store/mapper orchestration in `service`.
//!
//! # Invariants
//! - Write paths validate records before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Single-row lookups report absence as `Ok(None)`, never as an error.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::ModelValidationError;
use chrono::NaiveDate;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod actor_repo;
pub mod genre_repo;
pub mod movie_repo;
pub mod reference;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub type RepoResult<T> = Result<T, RepoError>;

/// Error for catalog persistence, lookup and aggregate translation.
#[derive(Debug)]
pub enum RepoError {
    Validation(ModelValidationError),
    Db(DbError),
    /// Update targeted a row that does not exist.
    NotFound { entity: &'static str, id: i64 },
    /// A stored reference points at a row that no longer exists.
    DataIntegrity { entity: &'static str, id: i64 },
    /// An entity without identity was handed to the reference codec.
    Unpersisted { entity: &'static str },
    /// Connection schema is not at the version this binary expects.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::DataIntegrity { entity, id } => {
                write!(f, "dangling {entity} reference: {id}")
            }
            Self::Unpersisted { entity } => {
                write!(f, "{entity} has no identity; persist it before referencing")
            }
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "catalog repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted catalog data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ModelValidationError> for RepoError {
    fn from(value: ModelValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Rejects connections that were not opened through `db::open_*`.
pub(crate) fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }
    Ok(())
}

pub(crate) fn date_to_db(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub(crate) fn parse_date(value: &str, column: &str) -> RepoResult<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| RepoError::InvalidData(format!("invalid date `{value}` in {column}")))
}
