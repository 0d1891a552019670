use cinedb_core::db::open_db_in_memory;
use cinedb_core::{
    Genre, GenreReference, GenreRepository, GenreService, RepoError, SqliteGenreRepository,
};
use rusqlite::Connection;

fn genre_rows(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM genres;", [], |row| row.get(0))
        .unwrap()
}

#[test]
fn create_is_idempotent_by_name() {
    let conn = open_db_in_memory().unwrap();
    let service = GenreService::new(SqliteGenreRepository::try_new(&conn).unwrap());

    let first = service.create(&Genre::new("drama")).unwrap();
    let second = service.create(&Genre::new("drama")).unwrap();

    assert!(first.id.is_some());
    assert_eq!(first, second);
    assert_eq!(genre_rows(&conn), 1);
}

#[test]
fn create_returns_existing_genre_ignoring_supplied_identity() {
    let conn = open_db_in_memory().unwrap();
    let service = GenreService::new(SqliteGenreRepository::try_new(&conn).unwrap());
    let existing = service.create(&Genre::new("crime")).unwrap();

    let returned = service
        .create(&Genre::new("crime").with_id(Some(999)))
        .unwrap();
    assert_eq!(returned, existing);

    let fresh = service
        .create(&Genre::new("comedy").with_id(Some(999)))
        .unwrap();
    assert_ne!(fresh.id, Some(999));
    assert_eq!(genre_rows(&conn), 2);
}

#[test]
fn create_all_preserves_order_and_reuses_existing_rows() {
    let conn = open_db_in_memory().unwrap();
    let service = GenreService::new(SqliteGenreRepository::try_new(&conn).unwrap());
    let drama = service.create(&Genre::new("drama")).unwrap();

    let created = service
        .create_all(&[Genre::new("crime"), Genre::new("drama"), Genre::new("crime")])
        .unwrap();

    let names: Vec<_> = created.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["crime", "drama", "crime"]);
    assert_eq!(created[1], drama);
    assert_eq!(created[0], created[2]);
    assert_eq!(genre_rows(&conn), 2);
}

#[test]
fn lookups_report_absence_without_error() {
    let conn = open_db_in_memory().unwrap();
    let service = GenreService::new(SqliteGenreRepository::try_new(&conn).unwrap());

    assert_eq!(service.find_by_id(i64::MAX).unwrap(), None);
    assert_eq!(service.find_by_name("western").unwrap(), None);
}

#[test]
fn find_all_by_reference_keeps_reference_order() {
    let conn = open_db_in_memory().unwrap();
    let service = GenreService::new(SqliteGenreRepository::try_new(&conn).unwrap());
    let crime = service.create(&Genre::new("crime")).unwrap();
    let drama = service.create(&Genre::new("drama")).unwrap();

    let references = vec![
        GenreReference {
            genre_id: drama.id.unwrap(),
        },
        GenreReference {
            genre_id: crime.id.unwrap(),
        },
    ];
    let resolved = service.find_all_by_reference(&references).unwrap();
    assert_eq!(resolved, vec![drama, crime]);
}

#[test]
fn find_all_by_reference_fails_on_dangling_reference() {
    let conn = open_db_in_memory().unwrap();
    let service = GenreService::new(SqliteGenreRepository::try_new(&conn).unwrap());
    let crime = service.create(&Genre::new("crime")).unwrap();

    let references = vec![
        GenreReference {
            genre_id: crime.id.unwrap(),
        },
        GenreReference { genre_id: 404 },
    ];
    let err = service.find_all_by_reference(&references).unwrap_err();
    assert!(matches!(
        err,
        RepoError::DataIntegrity {
            entity: "genre",
            id: 404
        }
    ));
}

#[test]
fn duplicate_insert_past_find_or_create_surfaces_storage_error() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteGenreRepository::try_new(&conn).unwrap();
    repo.save(&Genre::new("horror")).unwrap();

    let err = repo.save(&Genre::new("horror")).unwrap_err();
    assert!(matches!(err, RepoError::Db(_)));
}

#[test]
fn repository_rejects_blank_name() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteGenreRepository::try_new(&conn).unwrap();

    assert!(matches!(
        repo.save(&Genre::new("  ")),
        Err(RepoError::Validation(_))
    ));
    assert!(repo.find_all().unwrap().is_empty());
}
