//! Genre repository contracts and SQLite implementation.
//!
//! # Invariants
//! - `genres.name` is `UNIQUE`; a duplicate insert fails with `RepoError::Db`
//!   and is never translated here.

use crate::model::genre::{Genre, GenreId};
use crate::repo::{ensure_connection_ready, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

/// Repository interface for genre rows.
pub trait GenreRepository {
    /// Inserts when `id` is `None`, updates otherwise.
    fn save(&self, genre: &Genre) -> RepoResult<Genre>;
    fn find_by_id(&self, id: GenreId) -> RepoResult<Option<Genre>>;
    fn find_by_name(&self, name: &str) -> RepoResult<Option<Genre>>;
    fn find_all(&self) -> RepoResult<Vec<Genre>>;
    fn exists_by_id(&self, id: GenreId) -> RepoResult<bool>;
    fn delete_by_id(&self, id: GenreId) -> RepoResult<bool>;
}

/// SQLite-backed genre repository.
pub struct SqliteGenreRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteGenreRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl GenreRepository for SqliteGenreRepository<'_> {
    fn save(&self, genre: &Genre) -> RepoResult<Genre> {
        genre.validate()?;

        let id = match genre.id {
            None => {
                self.conn.execute(
                    "INSERT INTO genres (name) VALUES (?1);",
                    [genre.name.as_str()],
                )?;
                self.conn.last_insert_rowid()
            }
            Some(id) => {
                let changed = self.conn.execute(
                    "UPDATE genres SET name = ?1 WHERE id = ?2;",
                    params![genre.name.as_str(), id],
                )?;
                if changed == 0 {
                    return Err(RepoError::NotFound { entity: "genre", id });
                }
                id
            }
        };

        Ok(genre.clone().with_id(Some(id)))
    }

    fn find_by_id(&self, id: GenreId) -> RepoResult<Option<Genre>> {
        let genre = self
            .conn
            .prepare_cached("SELECT id, name FROM genres WHERE id = ?1;")?
            .query_row([id], parse_genre_row)
            .optional()?;
        Ok(genre)
    }

    fn find_by_name(&self, name: &str) -> RepoResult<Option<Genre>> {
        let genre = self
            .conn
            .query_row(
                "SELECT id, name FROM genres WHERE name = ?1;",
                [name],
                parse_genre_row,
            )
            .optional()?;
        Ok(genre)
    }

    fn find_all(&self) -> RepoResult<Vec<Genre>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM genres ORDER BY id ASC;")?;
        let genres = stmt
            .query_map([], parse_genre_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(genres)
    }

    fn exists_by_id(&self, id: GenreId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM genres WHERE id = ?1);",
            [id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn delete_by_id(&self, id: GenreId) -> RepoResult<bool> {
        let changed = self.conn.execute("DELETE FROM genres WHERE id = ?1;", [id])?;
        Ok(changed > 0)
    }
}

fn parse_genre_row(row: &Row<'_>) -> rusqlite::Result<Genre> {
    Ok(Genre {
        id: Some(row.get("id")?),
        name: row.get("name")?,
    })
}
