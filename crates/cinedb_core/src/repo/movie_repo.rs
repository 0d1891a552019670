//! Movie record repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist normalized `MovieRecord`s across `movies`, `movie_actors` and
//!   `movie_genres`.
//! - Answer the genre/actor equality-join queries.
//!
//! # Invariants
//! - Child rows are replaced wholesale on every save.
//! - Genre references are read back in significance order.
//! - Referenced actor/genre rows must exist; foreign keys reject the save
//!   otherwise.

use crate::model::actor::ActorId;
use crate::model::genre::GenreId;
use crate::model::movie::MovieId;
use crate::model::ModelValidationError;
use crate::repo::reference::{ActorReference, GenreReference, MovieRecord};
use crate::repo::{date_to_db, ensure_connection_ready, parse_date, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};
use std::collections::BTreeMap;
use std::time::Duration;

const MOVIE_SELECT_SQL: &str = "SELECT
    m.id,
    m.title,
    m.duration_seconds,
    m.release_date
FROM movies m";

/// Repository interface for stored movie records.
pub trait MovieRepository {
    /// Inserts or updates a record and returns it as stored.
    fn save(&self, record: &MovieRecord) -> RepoResult<MovieRecord>;
    fn find_by_id(&self, id: MovieId) -> RepoResult<Option<MovieRecord>>;
    fn find_all(&self) -> RepoResult<Vec<MovieRecord>>;
    fn find_all_by_genre_id(&self, genre_id: GenreId) -> RepoResult<Vec<MovieRecord>>;
    fn find_all_by_actor_id(&self, actor_id: ActorId) -> RepoResult<Vec<MovieRecord>>;
    fn exists_by_id(&self, id: MovieId) -> RepoResult<bool>;
    /// Deletes the movie and its reference rows.
    fn delete_by_id(&self, id: MovieId) -> RepoResult<bool>;
}

/// SQLite-backed movie record repository.
pub struct SqliteMovieRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteMovieRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }

    fn query_records(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> RepoResult<Vec<MovieRecord>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(self.parse_movie_row(row)?);
        }
        Ok(records)
    }

    fn parse_movie_row(&self, row: &Row<'_>) -> RepoResult<MovieRecord> {
        let id: MovieId = row.get("id")?;
        let duration_seconds: i64 = row.get("duration_seconds")?;
        let duration = u64::try_from(duration_seconds).map_err(|_| {
            RepoError::InvalidData(format!(
                "invalid duration `{duration_seconds}` in movies.duration_seconds"
            ))
        })?;
        let release_date: String = row.get("release_date")?;

        Ok(MovieRecord {
            id: Some(id),
            title: row.get("title")?,
            duration: Duration::from_secs(duration),
            release_date: parse_date(&release_date, "movies.release_date")?,
            actors: load_actor_references(self.conn, id)?,
            genres: load_genre_references(self.conn, id)?,
        })
    }
}

impl MovieRepository for SqliteMovieRepository<'_> {
    fn save(&self, record: &MovieRecord) -> RepoResult<MovieRecord> {
        if record.title.trim().is_empty() {
            return Err(ModelValidationError::BlankMovieTitle.into());
        }
        if record.actors.keys().any(|role| role.trim().is_empty()) {
            return Err(ModelValidationError::BlankRole.into());
        }
        let duration_seconds = i64::try_from(record.duration.as_secs()).map_err(|_| {
            RepoError::InvalidData(format!(
                "duration of {}s does not fit movies.duration_seconds",
                record.duration.as_secs()
            ))
        })?;
        let release_date = date_to_db(record.release_date);

        let id = match record.id {
            None => {
                self.conn.execute(
                    "INSERT INTO movies (title, duration_seconds, release_date)
                     VALUES (?1, ?2, ?3);",
                    params![record.title.as_str(), duration_seconds, release_date],
                )?;
                self.conn.last_insert_rowid()
            }
            Some(id) => {
                let changed = self.conn.execute(
                    "UPDATE movies
                     SET
                        title = ?1,
                        duration_seconds = ?2,
                        release_date = ?3
                     WHERE id = ?4;",
                    params![record.title.as_str(), duration_seconds, release_date, id],
                )?;
                if changed == 0 {
                    return Err(RepoError::NotFound { entity: "movie", id });
                }
                id
            }
        };

        replace_references(self.conn, id, record)?;

        Ok(MovieRecord {
            id: Some(id),
            duration: Duration::from_secs(record.duration.as_secs()),
            ..record.clone()
        })
    }

    fn find_by_id(&self, id: MovieId) -> RepoResult<Option<MovieRecord>> {
        let records = self.query_records(&format!("{MOVIE_SELECT_SQL} WHERE m.id = ?1;"), [id])?;
        Ok(records.into_iter().next())
    }

    fn find_all(&self) -> RepoResult<Vec<MovieRecord>> {
        self.query_records(&format!("{MOVIE_SELECT_SQL} ORDER BY m.id ASC;"), params![])
    }

    fn find_all_by_genre_id(&self, genre_id: GenreId) -> RepoResult<Vec<MovieRecord>> {
        self.query_records(
            &format!(
                "{MOVIE_SELECT_SQL}
                 WHERE EXISTS (
                    SELECT 1
                    FROM movie_genres mg
                    WHERE mg.movie_id = m.id
                      AND mg.genre_id = ?1
                 )
                 ORDER BY m.id ASC;"
            ),
            [genre_id],
        )
    }

    fn find_all_by_actor_id(&self, actor_id: ActorId) -> RepoResult<Vec<MovieRecord>> {
        self.query_records(
            &format!(
                "{MOVIE_SELECT_SQL}
                 WHERE EXISTS (
                    SELECT 1
                    FROM movie_actors ma
                    WHERE ma.movie_id = m.id
                      AND ma.actor_id = ?1
                 )
                 ORDER BY m.id ASC;"
            ),
            [actor_id],
        )
    }

    fn exists_by_id(&self, id: MovieId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM movies WHERE id = ?1);",
            [id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn delete_by_id(&self, id: MovieId) -> RepoResult<bool> {
        let changed = self.conn.execute("DELETE FROM movies WHERE id = ?1;", [id])?;
        Ok(changed > 0)
    }
}

fn replace_references(conn: &Connection, movie_id: MovieId, record: &MovieRecord) -> RepoResult<()> {
    conn.execute("DELETE FROM movie_actors WHERE movie_id = ?1;", [movie_id])?;
    conn.execute("DELETE FROM movie_genres WHERE movie_id = ?1;", [movie_id])?;

    let mut insert_actor = conn.prepare_cached(
        "INSERT INTO movie_actors (movie_id, role, actor_id) VALUES (?1, ?2, ?3);",
    )?;
    for (role, reference) in &record.actors {
        insert_actor.execute(params![movie_id, role.as_str(), reference.actor_id])?;
    }

    let mut insert_genre = conn.prepare_cached(
        "INSERT INTO movie_genres (movie_id, significance, genre_id) VALUES (?1, ?2, ?3);",
    )?;
    for (significance, reference) in record.genres.iter().enumerate() {
        let significance = i64::try_from(significance)
            .map_err(|_| RepoError::InvalidData("too many genres for one movie".to_string()))?;
        insert_genre.execute(params![movie_id, significance, reference.genre_id])?;
    }

    Ok(())
}

fn load_actor_references(
    conn: &Connection,
    movie_id: MovieId,
) -> RepoResult<BTreeMap<String, ActorReference>> {
    let mut stmt = conn.prepare_cached(
        "SELECT role, actor_id FROM movie_actors WHERE movie_id = ?1 ORDER BY role ASC;",
    )?;
    let references = stmt
        .query_map([movie_id], |row| {
            Ok((
                row.get::<_, String>("role")?,
                ActorReference {
                    actor_id: row.get("actor_id")?,
                },
            ))
        })?
        .collect::<Result<BTreeMap<_, _>, _>>()?;
    Ok(references)
}

fn load_genre_references(conn: &Connection, movie_id: MovieId) -> RepoResult<Vec<GenreReference>> {
    let mut stmt = conn.prepare_cached(
        "SELECT genre_id FROM movie_genres WHERE movie_id = ?1 ORDER BY significance ASC;",
    )?;
    let references = stmt
        .query_map([movie_id], |row| {
            Ok(GenreReference {
                genre_id: row.get("genre_id")?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(references)
}
