//! Catalog stores and the movie aggregate mapper.
//!
//! # Responsibility
//! - Own actor/genre identity policies (plain insert vs find-or-create).
//! - Translate between stored movie records and hydrated movies.
//! - Keep callers decoupled from SQL and reference records.

pub mod actor_service;
pub mod genre_service;
pub mod movie_mapper;
pub mod movie_service;
