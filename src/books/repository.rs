//! Book repository contract and its SQLite implementation.
//!
//! # Invariants
//! - Duplicate titles are checked before the write and again by the unique index;
//!   either path reports [`StoreError::DuplicateTitle`].
//! - Update and delete check for the row first and report [`StoreError::NotFound`].
//! - Listing is ordered by id ascending.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::info;

use crate::db::{is_unique_violation, StoreError, StoreResult, CASEFOLD_FN};

use super::model::{Book, BookChanges, BookId, BookListQuery, NewBook};

const BOOK_SELECT_SQL: &str = "SELECT id, title, description, created_at FROM books";

/// Persistence operations on books
pub trait BookRepository {
    fn create_book(&self, book: &NewBook) -> StoreResult<Book>;
    fn get_book(&self, id: BookId) -> StoreResult<Option<Book>>;
    fn find_by_title(&self, title: &str) -> StoreResult<Option<Book>>;
    fn list_books(&self, query: &BookListQuery) -> StoreResult<Vec<Book>>;
    fn update_book(&self, id: BookId, changes: &BookChanges) -> StoreResult<Book>;
    fn delete_book(&self, id: BookId) -> StoreResult<()>;
    fn count_books(&self) -> StoreResult<u64>;
}

/// SQLite-backed book repository over a borrowed connection (or transaction).
pub struct SqliteBookRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBookRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn require_book(&self, id: BookId) -> StoreResult<Book> {
        self.get_book(id)?.ok_or(StoreError::NotFound(id))
    }
}

impl BookRepository for SqliteBookRepository<'_> {
    fn create_book(&self, book: &NewBook) -> StoreResult<Book> {
        if self.find_by_title(&book.title)?.is_some() {
            return Err(StoreError::DuplicateTitle(book.title.clone()));
        }

        let created_at = Utc::now();
        self.conn
            .execute(
                "INSERT INTO books (title, description, created_at) VALUES (?1, ?2, ?3)",
                params![book.title, book.description, created_at],
            )
            .map_err(|err| map_write_error(err, &book.title))?;

        let id = self.conn.last_insert_rowid();
        info!(event = "book_created", book_id = id, "book created");

        self.require_book(id)
    }

    fn get_book(&self, id: BookId) -> StoreResult<Option<Book>> {
        let mut stmt = self
            .conn
            .prepare_cached(&format!("{BOOK_SELECT_SQL} WHERE id = ?1"))?;
        let book = stmt.query_row(params![id], parse_book_row).optional()?;
        Ok(book)
    }

    fn find_by_title(&self, title: &str) -> StoreResult<Option<Book>> {
        let mut stmt = self
            .conn
            .prepare_cached(&format!("{BOOK_SELECT_SQL} WHERE title = ?1"))?;
        let book = stmt.query_row(params![title], parse_book_row).optional()?;
        Ok(book)
    }

    fn list_books(&self, query: &BookListQuery) -> StoreResult<Vec<Book>> {
        let limit = query.limit.min(BookListQuery::MAX_LIMIT);

        let books = match query.title_contains.as_deref() {
            Some(needle) => {
                let mut stmt = self.conn.prepare_cached(&format!(
                    "{BOOK_SELECT_SQL}
                     WHERE {CASEFOLD_FN}(title) LIKE ?1 ESCAPE '\\'
                     ORDER BY id ASC
                     LIMIT ?2 OFFSET ?3"
                ))?;
                let pattern = format!("%{}%", escape_like(&needle.to_lowercase()));
                let rows = stmt.query_map(params![pattern, limit, query.skip], parse_book_row)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
            None => {
                let mut stmt = self.conn.prepare_cached(&format!(
                    "{BOOK_SELECT_SQL} ORDER BY id ASC LIMIT ?1 OFFSET ?2"
                ))?;
                let rows = stmt.query_map(params![limit, query.skip], parse_book_row)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
        };

        Ok(books)
    }

    fn update_book(&self, id: BookId, changes: &BookChanges) -> StoreResult<Book> {
        let current = self.require_book(id)?;

        if let Some(title) = changes.title.as_deref() {
            if title != current.title && self.find_by_title(title)?.is_some() {
                return Err(StoreError::DuplicateTitle(title.to_string()));
            }
        }

        if changes.is_empty() {
            return Ok(current);
        }

        let title = changes.title.as_deref().unwrap_or(&current.title);
        let description = changes
            .description
            .as_deref()
            .or(current.description.as_deref());

        self.conn
            .execute(
                "UPDATE books SET title = ?1, description = ?2 WHERE id = ?3",
                params![title, description, id],
            )
            .map_err(|err| map_write_error(err, title))?;

        info!(event = "book_updated", book_id = id, "book updated");
        self.require_book(id)
    }

    fn delete_book(&self, id: BookId) -> StoreResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM books WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }

        info!(event = "book_deleted", book_id = id, "book deleted");
        Ok(())
    }

    fn count_books(&self) -> StoreResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM books", [], |row| row.get(0))?;
        u64::try_from(count).map_err(|_| StoreError::InvalidData(format!("negative count {count}")))
    }
}

fn parse_book_row(row: &Row<'_>) -> rusqlite::Result<Book> {
    Ok(Book {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        created_at: row.get::<_, DateTime<Utc>>(3)?,
    })
}

fn map_write_error(err: rusqlite::Error, title: &str) -> StoreError {
    if is_unique_violation(&err) {
        StoreError::DuplicateTitle(title.to_string())
    } else {
        err.into()
    }
}

/// Escape LIKE wildcards so the needle matches literally.
fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
