//! Storage-only reference records and the codec that produces them.
//!
//! A stored movie is the domain `Movie` with its embedded actors and genres
//! replaced by foreign-key references. Flattening happens here; hydration
//! needs the stores and lives in `service::movie_mapper`.
//!
//! # Invariants
//! - Codec functions are pure and never touch storage.
//! - Role keys and genre order survive conversion unchanged.

use crate::model::actor::{Actor, ActorId};
use crate::model::genre::{Genre, GenreId};
use crate::model::movie::{Movie, MovieId};
use crate::repo::{RepoError, RepoResult};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::time::Duration;

/// Row of `movie_actors`, minus the owning movie and role key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActorReference {
    pub actor_id: ActorId,
}

/// Row of `movie_genres`, minus the owning movie and significance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenreReference {
    pub genre_id: GenreId,
}

/// Normalized movie as stored: scalar fields plus references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieRecord {
    pub id: Option<MovieId>,
    pub title: String,
    pub duration: Duration,
    pub release_date: NaiveDate,
    pub actors: BTreeMap<String, ActorReference>,
    pub genres: Vec<GenreReference>,
}

pub fn actor_reference(actor: &Actor) -> RepoResult<ActorReference> {
    actor
        .id
        .map(|actor_id| ActorReference { actor_id })
        .ok_or(RepoError::Unpersisted { entity: "actor" })
}

pub fn actor_references(
    actors: &BTreeMap<String, Actor>,
) -> RepoResult<BTreeMap<String, ActorReference>> {
    actors
        .iter()
        .map(|(role, actor)| actor_reference(actor).map(|reference| (role.clone(), reference)))
        .collect()
}

pub fn genre_reference(genre: &Genre) -> RepoResult<GenreReference> {
    genre
        .id
        .map(|genre_id| GenreReference { genre_id })
        .ok_or(RepoError::Unpersisted { entity: "genre" })
}

pub fn genre_references(genres: &[Genre]) -> RepoResult<Vec<GenreReference>> {
    genres.iter().map(genre_reference).collect()
}

/// Reduces a movie whose actors and genres are already persisted to its
/// storage record.
pub fn flatten(movie: &Movie) -> RepoResult<MovieRecord> {
    Ok(MovieRecord {
        id: movie.id,
        title: movie.title.clone(),
        duration: movie.duration,
        release_date: movie.release_date,
        actors: actor_references(&movie.actors)?,
        genres: genre_references(&movie.genres)?,
    })
}

#[cfg(test)]
mod tests {
    use super::{actor_references, flatten, genre_references, ActorReference, GenreReference};
    use crate::model::actor::{Actor, Gender};
    use crate::model::genre::Genre;
    use crate::model::movie::Movie;
    use crate::repo::RepoError;
    use chrono::NaiveDate;
    use std::collections::BTreeMap;
    use std::time::Duration;

    fn actor(name: &str, id: Option<i64>) -> Actor {
        Actor::new(
            name,
            "Test",
            NaiveDate::from_ymd_opt(1970, 1, 1).unwrap(),
            Gender::Other,
        )
        .with_id(id)
    }

    #[test]
    fn actor_references_keep_role_keys() {
        let mut actors = BTreeMap::new();
        actors.insert("Lead".to_string(), actor("a", Some(3)));
        actors.insert("Villain".to_string(), actor("b", Some(9)));
        actors.insert("Double".to_string(), actor("a", Some(3)));

        let references = actor_references(&actors).unwrap();
        assert_eq!(references.len(), 3);
        assert_eq!(references["Lead"], ActorReference { actor_id: 3 });
        assert_eq!(references["Villain"], ActorReference { actor_id: 9 });
        assert_eq!(references["Double"], ActorReference { actor_id: 3 });
    }

    #[test]
    fn genre_references_keep_order() {
        let genres = vec![
            Genre::new("drama").with_id(Some(2)),
            Genre::new("crime").with_id(Some(1)),
            Genre::new("thriller").with_id(Some(5)),
        ];
        let references = genre_references(&genres).unwrap();
        let ids: Vec<_> = references.iter().map(|r| r.genre_id).collect();
        assert_eq!(ids, vec![2, 1, 5]);
    }

    #[test]
    fn flatten_rejects_unpersisted_entities() {
        let movie = Movie::new(
            "Draft",
            Duration::from_secs(60),
            NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
        )
        .cast("Lead", actor("a", None));
        let err = flatten(&movie).unwrap_err();
        assert!(matches!(err, RepoError::Unpersisted { entity: "actor" }));

        let movie = Movie::new(
            "Draft",
            Duration::from_secs(60),
            NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
        )
        .genre(Genre::new("drama"));
        let err = flatten(&movie).unwrap_err();
        assert!(matches!(err, RepoError::Unpersisted { entity: "genre" }));
    }

    #[test]
    fn flatten_copies_scalar_fields() {
        let movie = Movie::new(
            "Life Is Beautiful",
            Duration::from_secs(116 * 60),
            NaiveDate::from_ymd_opt(1997, 12, 20).unwrap(),
        )
        .cast("Guido", actor("Roberto", Some(3)))
        .genre(Genre::new("comedy").with_id(Some(4)));

        let record = flatten(&movie).unwrap();
        assert_eq!(record.id, None);
        assert_eq!(record.title, "Life Is Beautiful");
        assert_eq!(record.duration, movie.duration);
        assert_eq!(record.release_date, movie.release_date);
        assert_eq!(record.genres, vec![GenreReference { genre_id: 4 }]);
    }
}
