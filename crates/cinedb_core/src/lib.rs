//! Core catalog logic for cinedb.
//! Movies embed their actors and genres; storage keeps them normalized and
//! this crate translates between the two shapes.

pub mod catalog;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use catalog::{Catalog, SqliteActorService, SqliteGenreService, SqliteMovieService};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::actor::{Actor, ActorId, Gender};
pub use model::genre::{Genre, GenreId};
pub use model::movie::{Movie, MovieId};
pub use model::ModelValidationError;
pub use repo::actor_repo::{ActorRepository, SqliteActorRepository};
pub use repo::genre_repo::{GenreRepository, SqliteGenreRepository};
pub use repo::movie_repo::{MovieRepository, SqliteMovieRepository};
pub use repo::reference::{ActorReference, GenreReference, MovieRecord};
pub use repo::{RepoError, RepoResult};
pub use service::actor_service::ActorService;
pub use service::genre_service::GenreService;
pub use service::movie_mapper::MovieMapper;
pub use service::movie_service::MovieService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
