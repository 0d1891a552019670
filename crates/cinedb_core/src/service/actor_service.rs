//! Actor store.
//!
//! # Responsibility
//! - Own actor identity: create, look up and update actor rows.
//! - Resolve a movie's role-keyed actor references.
//!
//! # Invariants
//! - `create`/`create_all` always insert new rows; the store never
//!   deduplicates. Role coalescing belongs to the movie mapper.
//! - A reference that does not resolve is a `DataIntegrity` error.

use crate::model::actor::{Actor, ActorId, Gender};
use crate::repo::actor_repo::ActorRepository;
use crate::repo::reference::ActorReference;
use crate::repo::{RepoError, RepoResult};
use chrono::NaiveDate;
use log::{debug, error};
use std::collections::BTreeMap;

/// Use-case service wrapper for actor rows.
pub struct ActorService<R: ActorRepository> {
    repo: R,
}

impl<R: ActorRepository> ActorService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Persists `actor` as a new row and returns it with its assigned id.
    ///
    /// Any identity already present on `actor` is ignored.
    pub fn create(&self, actor: &Actor) -> RepoResult<Actor> {
        self.repo.save(&actor.clone().with_id(None))
    }

    /// Persists every actor in one repository batch, preserving order.
    ///
    /// Equal actors are stored as separate rows.
    pub fn create_all(&self, actors: &[Actor]) -> RepoResult<Vec<Actor>> {
        let fresh: Vec<Actor> = actors
            .iter()
            .map(|actor| actor.clone().with_id(None))
            .collect();
        let saved = self.repo.save_all(&fresh)?;
        debug!(
            "event=actor_create_all module=service status=ok count={}",
            saved.len()
        );
        Ok(saved)
    }

    pub fn find_all(&self) -> RepoResult<Vec<Actor>> {
        self.repo.find_all()
    }

    pub fn find_by_id(&self, id: ActorId) -> RepoResult<Option<Actor>> {
        self.repo.find_by_id(id)
    }

    pub fn find_by_fullname(&self, fullname: &str) -> RepoResult<Option<Actor>> {
        self.repo.find_by_fullname(fullname)
    }

    pub fn find_all_by_gender(&self, gender: Gender) -> RepoResult<Vec<Actor>> {
        self.repo.find_all_by_gender(gender)
    }

    /// Sets the death date of an existing actor.
    ///
    /// Returns the updated actor, or `None` when no row has `id`.
    pub fn update_deathdate(
        &self,
        id: ActorId,
        deathdate: Option<NaiveDate>,
    ) -> RepoResult<Option<Actor>> {
        if self.repo.update_deathdate(id, deathdate)? {
            self.repo.find_by_id(id)
        } else {
            Ok(None)
        }
    }

    /// Resolves every role's reference to its actor.
    ///
    /// # Errors
    /// - `RepoError::DataIntegrity` on the first reference without a row.
    pub fn find_all_by_reference(
        &self,
        references: &BTreeMap<String, ActorReference>,
    ) -> RepoResult<BTreeMap<String, Actor>> {
        references
            .iter()
            .map(|(role, reference)| -> RepoResult<(String, Actor)> {
                let actor = self.repo.find_by_id(reference.actor_id)?.ok_or_else(|| {
                    error!(
                        "event=reference_resolve module=service status=error entity=actor id={} error_code=dangling_reference",
                        reference.actor_id
                    );
                    RepoError::DataIntegrity {
                        entity: "actor",
                        id: reference.actor_id,
                    }
                })?;
                Ok((role.clone(), actor))
            })
            .collect()
    }
}
