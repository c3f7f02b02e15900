//! Book Repository Tests
//!
//! Storage-level behaviour behind the HTTP routes, exercised on a file database.

use bookshelf::{
    BookChanges, BookListQuery, BookRepository, Database, NewBook, SqliteBookRepository,
    StoreError,
};
use tempfile::TempDir;

fn setup() -> (TempDir, Database) {
    let tmp = TempDir::new().unwrap();
    let db = Database::at_path(tmp.path().join("books.db"));
    db.init_schema().unwrap();
    (tmp, db)
}

#[test]
fn test_rows_survive_across_sessions() {
    let (_tmp, db) = setup();

    let created = {
        let conn = db.open_session().unwrap();
        SqliteBookRepository::new(&conn)
            .create_book(&NewBook::new("Persisted", Some("desc".to_string())))
            .unwrap()
    };

    let conn = db.open_session().unwrap();
    let loaded = SqliteBookRepository::new(&conn)
        .get_book(created.id)
        .unwrap()
        .unwrap();
    assert_eq!(loaded, created);
}

#[test]
fn test_duplicate_create_keeps_one_row() {
    let (_tmp, db) = setup();
    let conn = db.open_session().unwrap();
    let repo = SqliteBookRepository::new(&conn);

    repo.create_book(&NewBook::new("Same", None)).unwrap();
    let err = repo.create_book(&NewBook::new("Same", None)).unwrap_err();

    assert!(matches!(err, StoreError::DuplicateTitle(t) if t == "Same"));
    assert_eq!(repo.count_books().unwrap(), 1);
}

#[test]
fn test_list_is_ordered_and_stable() {
    let (_tmp, db) = setup();
    let conn = db.open_session().unwrap();
    let repo = SqliteBookRepository::new(&conn);

    for title in ["Charlie", "alpha", "Bravo"] {
        repo.create_book(&NewBook::new(title, None)).unwrap();
    }

    let first = repo.list_books(&BookListQuery::default()).unwrap();
    let second = repo.list_books(&BookListQuery::default()).unwrap();
    assert_eq!(first, second);

    let ids: Vec<_> = first.iter().map(|b| b.id).collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted);
}

#[test]
fn test_list_limit_is_capped() {
    let (_tmp, db) = setup();
    let conn = db.open_session().unwrap();
    let repo = SqliteBookRepository::new(&conn);

    for i in 0..105 {
        repo.create_book(&NewBook::new(format!("Book {i}"), None))
            .unwrap();
    }

    let query = BookListQuery {
        limit: 500,
        ..Default::default()
    };
    assert_eq!(repo.list_books(&query).unwrap().len(), 100);
}

#[test]
fn test_update_and_delete_missing_rows() {
    let (_tmp, db) = setup();
    let conn = db.open_session().unwrap();
    let repo = SqliteBookRepository::new(&conn);

    assert!(repo.get_book(41).unwrap().is_none());
    assert!(matches!(
        repo.update_book(41, &BookChanges::title("x")),
        Err(StoreError::NotFound(41))
    ));
    assert!(matches!(repo.delete_book(41), Err(StoreError::NotFound(41))));
}

#[test]
fn test_partial_updates() {
    let (_tmp, db) = setup();
    let conn = db.open_session().unwrap();
    let repo = SqliteBookRepository::new(&conn);

    let book = repo
        .create_book(&NewBook::new("Title", Some("Desc".to_string())))
        .unwrap();

    let updated = repo
        .update_book(book.id, &BookChanges::description("New desc"))
        .unwrap();
    assert_eq!(updated.title, "Title");
    assert_eq!(updated.description.as_deref(), Some("New desc"));
    assert_eq!(updated.created_at, book.created_at);

    let updated = repo
        .update_book(book.id, &BookChanges::title("New title"))
        .unwrap();
    assert_eq!(updated.title, "New title");
    assert_eq!(updated.description.as_deref(), Some("New desc"));
}
