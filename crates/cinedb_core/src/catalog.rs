//! SQLite wiring of the catalog stores over one connection.
//!
//! # Responsibility
//! - Build the SQLite repositories and stores from a migrated connection.
//! - Give movie creation a single transactional boundary.
//!
//! # Invariants
//! - `create_movie` either commits the movie with all its new actor/genre
//!   rows or leaves storage untouched.

use crate::model::movie::Movie;
use crate::repo::actor_repo::SqliteActorRepository;
use crate::repo::genre_repo::SqliteGenreRepository;
use crate::repo::movie_repo::SqliteMovieRepository;
use crate::repo::RepoResult;
use crate::service::actor_service::ActorService;
use crate::service::genre_service::GenreService;
use crate::service::movie_service::MovieService;
use log::warn;
use rusqlite::Connection;

pub type SqliteActorService<'conn> = ActorService<SqliteActorRepository<'conn>>;
pub type SqliteGenreService<'conn> = GenreService<SqliteGenreRepository<'conn>>;
pub type SqliteMovieService<'conn> = MovieService<
    SqliteMovieRepository<'conn>,
    SqliteActorRepository<'conn>,
    SqliteGenreRepository<'conn>,
>;

/// All catalog stores bound to one SQLite connection.
pub struct Catalog<'conn> {
    conn: &'conn Connection,
    movies: SqliteMovieService<'conn>,
}

impl<'conn> Catalog<'conn> {
    /// Wires the stores; fails when `conn` was not migrated.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let actors = ActorService::new(SqliteActorRepository::try_new(conn)?);
        let genres = GenreService::new(SqliteGenreRepository::try_new(conn)?);
        let movies = MovieService::new(SqliteMovieRepository::try_new(conn)?, actors, genres);
        Ok(Self { conn, movies })
    }

    pub fn actors(&self) -> &SqliteActorService<'conn> {
        self.movies.actors()
    }

    pub fn genres(&self) -> &SqliteGenreService<'conn> {
        self.movies.genres()
    }

    pub fn movies(&self) -> &SqliteMovieService<'conn> {
        &self.movies
    }

    /// Runs [`MovieService::create`] inside one transaction.
    ///
    /// Must not be called while the connection already has an open
    /// transaction.
    pub fn create_movie(&self, movie: Movie) -> RepoResult<Movie> {
        let tx = self.conn.unchecked_transaction()?;
        match self.movies.create(movie) {
            Ok(created) => {
                tx.commit()?;
                Ok(created)
            }
            Err(err) => {
                warn!(
                    "event=movie_create module=catalog status=rolled_back error={}",
                    err
                );
                Err(err)
            }
        }
    }
}
