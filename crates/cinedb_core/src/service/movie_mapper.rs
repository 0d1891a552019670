//! Translation between stored movie records and hydrated movies.
//!
//! # Responsibility
//! - Hydrate: resolve a record's references into embedded actors/genres.
//! - Prepare: persist a movie's genres and actors so it can be flattened.
//!
//! # Invariants
//! - Hydration is read-only.
//! - Genres are deduplicated before persistence (find-or-create by name).
//! - Actors are all persisted first, then roles whose actors are equal
//!   ignoring id collapse onto the first matching saved row. Coalescing is
//!   scoped to one movie; actors stored by earlier movies are not reused.

use crate::model::actor::Actor;
use crate::model::movie::Movie;
use crate::repo::actor_repo::ActorRepository;
use crate::repo::genre_repo::GenreRepository;
use crate::repo::reference::MovieRecord;
use crate::repo::RepoResult;
use crate::service::actor_service::ActorService;
use crate::service::genre_service::GenreService;
use std::collections::BTreeMap;

/// Borrowing view over the actor and genre stores used by movie writes/reads.
pub struct MovieMapper<'a, A: ActorRepository, G: GenreRepository> {
    actors: &'a ActorService<A>,
    genres: &'a GenreService<G>,
}

impl<'a, A: ActorRepository, G: GenreRepository> MovieMapper<'a, A, G> {
    pub fn new(actors: &'a ActorService<A>, genres: &'a GenreService<G>) -> Self {
        Self { actors, genres }
    }

    /// Builds the domain movie for a stored record.
    ///
    /// # Errors
    /// - `RepoError::DataIntegrity` when any reference is dangling.
    pub fn hydrate(&self, record: MovieRecord) -> RepoResult<Movie> {
        let actors = self.actors.find_all_by_reference(&record.actors)?;
        let genres = self.genres.find_all_by_reference(&record.genres)?;

        Ok(Movie {
            id: record.id,
            title: record.title,
            duration: record.duration,
            release_date: record.release_date,
            actors,
            genres,
        })
    }

    /// Persists the movie's associations and points them at stored rows.
    ///
    /// The movie row itself is not written here.
    pub fn prepare(&self, mut movie: Movie) -> RepoResult<Movie> {
        movie.genres = self.genres.create_all(&movie.genres)?;

        let cast: Vec<Actor> = movie.actors.values().cloned().collect();
        let saved = self.actors.create_all(&cast)?;
        movie.actors = coalesce_roles(movie.actors, &saved);

        Ok(movie)
    }
}

/// Maps each role to the first saved actor equal to its own, ignoring id.
///
/// Roles without a match keep their original value.
fn coalesce_roles(
    actors: BTreeMap<String, Actor>,
    saved: &[Actor],
) -> BTreeMap<String, Actor> {
    actors
        .into_iter()
        .map(|(role, actor)| {
            let resolved = saved
                .iter()
                .find(|candidate| candidate.equal_ignoring_id(&actor))
                .cloned()
                .unwrap_or(actor);
            (role, resolved)
        })
        .collect()
}
