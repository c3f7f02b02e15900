//! # Database Module
//!
//! SQLite storage for the book table.
//!
//! # Invariants
//! - One connection per unit of work; it is dropped (and closed) when the work returns.
//! - Title uniqueness is enforced by a unique index, not by application locking.

mod open;

pub use open::{Database, BOOKS_SCHEMA_SQL};

use rusqlite::functions::FunctionFlags;
use thiserror::Error;

use crate::books::BookId;

/// Result type for storage operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database URL could not be turned into a file path
    #[error("Invalid database URL: {0}")]
    InvalidUrl(String),

    /// The database could not be opened
    #[error("Database unavailable: {0}")]
    Unavailable(String),

    /// No row with this id
    #[error("Book {0} not found")]
    NotFound(BookId),

    /// Title already used by another row
    #[error("Book with title '{0}' already exists")]
    DuplicateTitle(String),

    /// Persisted row could not be decoded
    #[error("Invalid persisted data: {0}")]
    InvalidData(String),

    /// Blocking worker failed before returning
    #[error("Storage task failed: {0}")]
    TaskFailed(String),

    /// Any other SQLite failure
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// SQL function folding text to lowercase with full Unicode rules.
///
/// SQLite's own `lower()` and `LIKE` only fold ASCII letters.
pub const CASEFOLD_FN: &str = "casefold";

/// Register the scalar functions book queries rely on. Must run on every connection.
pub fn register_functions(conn: &rusqlite::Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        CASEFOLD_FN,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let text: Option<String> = ctx.get(0)?;
            Ok(text.map(|t| t.to_lowercase()))
        },
    )
}

/// Returns true when `err` is a violation of a UNIQUE constraint.
pub fn is_unique_violation(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(code, _) => {
            code.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
        }
        _ => false,
    }
}
