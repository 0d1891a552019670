//! Genre store with find-or-create semantics keyed by name.
//!
//! # Invariants
//! - `create` never inserts a second row for an existing name.
//! - `create_all` is element-wise and not atomic as a whole.
//! - A reference that does not resolve is a `DataIntegrity` error.

use crate::model::genre::{Genre, GenreId};
use crate::repo::genre_repo::GenreRepository;
use crate::repo::reference::GenreReference;
use crate::repo::{RepoError, RepoResult};
use log::{debug, error};

/// Use-case service wrapper for genre rows.
pub struct GenreService<R: GenreRepository> {
    repo: R,
}

impl<R: GenreRepository> GenreService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn find_by_id(&self, id: GenreId) -> RepoResult<Option<Genre>> {
        self.repo.find_by_id(id)
    }

    pub fn find_by_name(&self, name: &str) -> RepoResult<Option<Genre>> {
        self.repo.find_by_name(name)
    }

    pub fn find_all(&self) -> RepoResult<Vec<Genre>> {
        self.repo.find_all()
    }

    /// Returns the stored genre named like `genre`, inserting it first when
    /// no such genre exists.
    ///
    /// # Contract
    /// - The identity carried by `genre` is ignored in both branches.
    /// - Repeated calls with one name return the same identity.
    pub fn create(&self, genre: &Genre) -> RepoResult<Genre> {
        if let Some(existing) = self.repo.find_by_name(&genre.name)? {
            debug!(
                "event=genre_create module=service status=ok outcome=existing id={}",
                existing.id.unwrap_or_default()
            );
            return Ok(existing);
        }

        let created = self.repo.save(&genre.clone().with_id(None))?;
        debug!(
            "event=genre_create module=service status=ok outcome=inserted id={}",
            created.id.unwrap_or_default()
        );
        Ok(created)
    }

    /// Applies [`GenreService::create`] to each genre in order.
    pub fn create_all(&self, genres: &[Genre]) -> RepoResult<Vec<Genre>> {
        genres.iter().map(|genre| self.create(genre)).collect()
    }

    /// Resolves references to genres, keeping reference order.
    ///
    /// # Errors
    /// - `RepoError::DataIntegrity` on the first reference without a row.
    pub fn find_all_by_reference(&self, references: &[GenreReference]) -> RepoResult<Vec<Genre>> {
        references
            .iter()
            .map(|reference| -> RepoResult<Genre> {
                self.repo.find_by_id(reference.genre_id)?.ok_or_else(|| {
                    error!(
                        "event=reference_resolve module=service status=error entity=genre id={} error_code=dangling_reference",
                        reference.genre_id
                    );
                    RepoError::DataIntegrity {
                        entity: "genre",
                        id: reference.genre_id,
                    }
                })
            })
            .collect()
    }
}
