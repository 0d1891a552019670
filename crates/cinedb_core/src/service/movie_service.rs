//! Movie store.
//!
//! # Responsibility
//! - Expose the read/write API over hydrated movies.
//! - Run the mapper against the record repository and actor/genre stores.
//!
//! # Invariants
//! - Every returned movie is hydrated from storage, so ids are assigned
//!   throughout.
//! - `create` is only atomic when the caller wraps it in one transaction
//!   (see `Catalog::create_movie`).

use crate::model::actor::{Actor, ActorId};
use crate::model::genre::Genre;
use crate::model::movie::{Movie, MovieId};
use crate::repo::actor_repo::ActorRepository;
use crate::repo::genre_repo::GenreRepository;
use crate::repo::movie_repo::MovieRepository;
use crate::repo::reference::{flatten, MovieRecord};
use crate::repo::RepoResult;
use crate::service::actor_service::ActorService;
use crate::service::genre_service::GenreService;
use crate::service::movie_mapper::MovieMapper;
use log::info;
use std::time::Instant;

/// Movie facade over the record repository and the actor/genre stores.
pub struct MovieService<M: MovieRepository, A: ActorRepository, G: GenreRepository> {
    movies: M,
    actors: ActorService<A>,
    genres: GenreService<G>,
}

impl<M, A, G> MovieService<M, A, G>
where
    M: MovieRepository,
    A: ActorRepository,
    G: GenreRepository,
{
    pub fn new(movies: M, actors: ActorService<A>, genres: GenreService<G>) -> Self {
        Self {
            movies,
            actors,
            genres,
        }
    }

    /// Actor store shared with the mapper.
    pub fn actors(&self) -> &ActorService<A> {
        &self.actors
    }

    /// Genre store shared with the mapper.
    pub fn genres(&self) -> &GenreService<G> {
        &self.genres
    }

    fn mapper(&self) -> MovieMapper<'_, A, G> {
        MovieMapper::new(&self.actors, &self.genres)
    }

    fn hydrate_all(&self, records: Vec<MovieRecord>) -> RepoResult<Vec<Movie>> {
        let mapper = self.mapper();
        records
            .into_iter()
            .map(|record| mapper.hydrate(record))
            .collect()
    }

    pub fn find_all(&self) -> RepoResult<Vec<Movie>> {
        self.hydrate_all(self.movies.find_all()?)
    }

    pub fn find_by_id(&self, id: MovieId) -> RepoResult<Option<Movie>> {
        self.movies
            .find_by_id(id)?
            .map(|record| self.mapper().hydrate(record))
            .transpose()
    }

    /// Movies listing `genre`; an unsaved genre matches nothing.
    pub fn find_all_by_genre(&self, genre: &Genre) -> RepoResult<Vec<Movie>> {
        match genre.id {
            Some(genre_id) => self.hydrate_all(self.movies.find_all_by_genre_id(genre_id)?),
            None => Ok(Vec::new()),
        }
    }

    /// Movies casting `actor` in any role; an unsaved actor matches nothing.
    pub fn find_all_by_actor(&self, actor: &Actor) -> RepoResult<Vec<Movie>> {
        match actor.id {
            Some(actor_id) => self.find_all_by_actor_id(actor_id),
            None => Ok(Vec::new()),
        }
    }

    pub fn find_all_by_actor_id(&self, actor_id: ActorId) -> RepoResult<Vec<Movie>> {
        self.hydrate_all(self.movies.find_all_by_actor_id(actor_id)?)
    }

    /// Persists a movie with its cast and genres and returns it as stored.
    ///
    /// # Contract
    /// - Genres are find-or-created by name.
    /// - Every cast actor is inserted; equal actors within this movie share
    ///   one row.
    /// - The returned movie is re-read from storage.
    pub fn create(&self, movie: Movie) -> RepoResult<Movie> {
        let started_at = Instant::now();
        movie.validate()?;

        let mapper = self.mapper();
        let prepared = mapper.prepare(movie)?;
        let record = flatten(&prepared)?;
        let saved = self.movies.save(&record)?;
        let created = mapper.hydrate(saved)?;

        info!(
            "event=movie_create module=service status=ok movie_id={} roles={} genres={} duration_ms={}",
            created.id.unwrap_or_default(),
            created.actors.len(),
            created.genres.len(),
            started_at.elapsed().as_millis()
        );
        Ok(created)
    }
}
