//! Actor repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide flat CRUD and equality lookups over the `actors` table.
//!
//! # Invariants
//! - `save` inserts when `id` is `None` and updates otherwise; there is no
//!   uniqueness check on any actor field.
//! - List results are ordered by `id ASC`.

use crate::model::actor::{Actor, ActorId, Gender};
use crate::repo::{date_to_db, ensure_connection_ready, parse_date, RepoError, RepoResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};

const ACTOR_SELECT_SQL: &str = "SELECT
    id,
    name,
    surname,
    birthdate,
    deathdate,
    gender
FROM actors";

/// Repository interface for actor rows.
pub trait ActorRepository {
    /// Inserts or updates one actor and returns it with its identity.
    fn save(&self, actor: &Actor) -> RepoResult<Actor>;
    /// Saves every actor in input order.
    fn save_all(&self, actors: &[Actor]) -> RepoResult<Vec<Actor>>;
    fn find_by_id(&self, id: ActorId) -> RepoResult<Option<Actor>>;
    fn find_all(&self) -> RepoResult<Vec<Actor>>;
    /// Exact match on `"name surname"`; the lowest id wins on ties.
    fn find_by_fullname(&self, fullname: &str) -> RepoResult<Option<Actor>>;
    fn find_all_by_gender(&self, gender: Gender) -> RepoResult<Vec<Actor>>;
    /// Returns whether a row was changed.
    fn update_deathdate(&self, id: ActorId, deathdate: Option<NaiveDate>) -> RepoResult<bool>;
    fn exists_by_id(&self, id: ActorId) -> RepoResult<bool>;
    /// Fails with a storage error while any movie still references the actor.
    fn delete_by_id(&self, id: ActorId) -> RepoResult<bool>;
}

/// SQLite-backed actor repository.
pub struct SqliteActorRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteActorRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ActorRepository for SqliteActorRepository<'_> {
    fn save(&self, actor: &Actor) -> RepoResult<Actor> {
        actor.validate()?;

        let id = match actor.id {
            None => {
                self.conn.execute(
                    "INSERT INTO actors (name, surname, birthdate, deathdate, gender)
                     VALUES (?1, ?2, ?3, ?4, ?5);",
                    params![
                        actor.name.as_str(),
                        actor.surname.as_str(),
                        date_to_db(actor.birthdate),
                        actor.deathdate.map(date_to_db),
                        actor.gender.as_str(),
                    ],
                )?;
                self.conn.last_insert_rowid()
            }
            Some(id) => {
                let changed = self.conn.execute(
                    "UPDATE actors
                     SET
                        name = ?1,
                        surname = ?2,
                        birthdate = ?3,
                        deathdate = ?4,
                        gender = ?5
                     WHERE id = ?6;",
                    params![
                        actor.name.as_str(),
                        actor.surname.as_str(),
                        date_to_db(actor.birthdate),
                        actor.deathdate.map(date_to_db),
                        actor.gender.as_str(),
                        id,
                    ],
                )?;
                if changed == 0 {
                    return Err(RepoError::NotFound { entity: "actor", id });
                }
                id
            }
        };

        Ok(actor.clone().with_id(Some(id)))
    }

    fn save_all(&self, actors: &[Actor]) -> RepoResult<Vec<Actor>> {
        actors.iter().map(|actor| self.save(actor)).collect()
    }

    fn find_by_id(&self, id: ActorId) -> RepoResult<Option<Actor>> {
        let mut stmt = self
            .conn
            .prepare_cached(&format!("{ACTOR_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_actor_row(row)?));
        }
        Ok(None)
    }

    fn find_all(&self) -> RepoResult<Vec<Actor>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ACTOR_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        collect_actors(&mut rows)
    }

    fn find_by_fullname(&self, fullname: &str) -> RepoResult<Option<Actor>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ACTOR_SELECT_SQL}
             WHERE name || ' ' || surname = ?1
             ORDER BY id ASC
             LIMIT 1;"
        ))?;
        let mut rows = stmt.query([fullname])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_actor_row(row)?));
        }
        Ok(None)
    }

    fn find_all_by_gender(&self, gender: Gender) -> RepoResult<Vec<Actor>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ACTOR_SELECT_SQL} WHERE gender = ?1 ORDER BY id ASC;"
        ))?;
        let mut rows = stmt.query([gender.as_str()])?;
        collect_actors(&mut rows)
    }

    fn update_deathdate(&self, id: ActorId, deathdate: Option<NaiveDate>) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "UPDATE actors SET deathdate = ?1 WHERE id = ?2;",
            params![deathdate.map(date_to_db), id],
        )?;
        Ok(changed > 0)
    }

    fn exists_by_id(&self, id: ActorId) -> RepoResult<bool> {
        let found = self
            .conn
            .query_row("SELECT 1 FROM actors WHERE id = ?1;", [id], |row| {
                row.get::<_, i64>(0)
            })
            .optional()?;
        Ok(found.is_some())
    }

    fn delete_by_id(&self, id: ActorId) -> RepoResult<bool> {
        let changed = self.conn.execute("DELETE FROM actors WHERE id = ?1;", [id])?;
        Ok(changed > 0)
    }
}

fn collect_actors(rows: &mut rusqlite::Rows<'_>) -> RepoResult<Vec<Actor>> {
    let mut actors = Vec::new();
    while let Some(row) = rows.next()? {
        actors.push(parse_actor_row(row)?);
    }
    Ok(actors)
}

fn parse_actor_row(row: &Row<'_>) -> RepoResult<Actor> {
    let gender_text: String = row.get("gender")?;
    let gender = Gender::parse(&gender_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid gender `{gender_text}` in actors.gender"))
    })?;

    let birthdate_text: String = row.get("birthdate")?;
    let deathdate = match row.get::<_, Option<String>>("deathdate")? {
        Some(value) => Some(parse_date(&value, "actors.deathdate")?),
        None => None,
    };

    Ok(Actor {
        id: Some(row.get("id")?),
        name: row.get("name")?,
        surname: row.get("surname")?,
        birthdate: parse_date(&birthdate_text, "actors.birthdate")?,
        deathdate,
        gender,
    })
}
