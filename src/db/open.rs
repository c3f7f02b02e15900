//! Connection bootstrap for the SQLite book store.
//!
//! A [`Database`] only remembers where the file lives. Every request opens its own
//! connection through [`Database::with_session`] and the connection is closed when the
//! closure returns, whichever way it returns.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use rusqlite::Connection;
use tracing::{error, info};

use super::{register_functions, StoreError, StoreResult};

/// Table and index definitions, applied with `IF NOT EXISTS` on startup.
pub const BOOKS_SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS books (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title VARCHAR(200) NOT NULL,
    description TEXT,
    created_at TEXT NOT NULL
);
CREATE UNIQUE INDEX IF NOT EXISTS ix_books_title ON books (title);
";

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Handle to the on-disk book database
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    /// Build a handle from a `DATABASE_URL` value.
    ///
    /// Accepts a plain path, `sqlite://path` or `sqlite:path`. In-memory databases are
    /// refused: each request gets a fresh connection and would see an empty store.
    pub fn from_url(url: &str) -> StoreResult<Self> {
        let trimmed = url.trim();
        let path = if let Some(rest) = trimmed.strip_prefix("sqlite://") {
            rest
        } else if let Some(rest) = trimmed.strip_prefix("sqlite:") {
            rest
        } else if let Some((scheme, _)) = trimmed.split_once("://") {
            return Err(StoreError::InvalidUrl(format!(
                "unsupported scheme '{}', expected a sqlite path",
                scheme
            )));
        } else {
            trimmed
        };

        if path.is_empty() {
            return Err(StoreError::InvalidUrl("empty database path".to_string()));
        }
        if path == ":memory:" || path.contains("mode=memory") {
            return Err(StoreError::InvalidUrl(
                "in-memory databases cannot be shared between requests".to_string(),
            ));
        }

        Ok(Self::at_path(path))
    }

    /// Build a handle for a file path
    pub fn at_path(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Location of the database file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open one connection with the book SQL functions registered.
    /// The caller owns it; dropping it closes it.
    pub fn open_session(&self) -> StoreResult<Connection> {
        let started_at = Instant::now();

        let conn = Connection::open(&self.path).map_err(|err| {
            error!(
                event = "db_open",
                status = "error",
                path = %self.path.display(),
                duration_ms = started_at.elapsed().as_millis() as u64,
                error = %err,
                "failed to open database"
            );
            StoreError::Unavailable(err.to_string())
        })?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        register_functions(&conn)?;

        Ok(conn)
    }

    /// Create the `books` table and its title index if they do not exist yet.
    pub fn init_schema(&self) -> StoreResult<()> {
        let started_at = Instant::now();
        let conn = self.open_session()?;

        match conn.execute_batch(BOOKS_SCHEMA_SQL) {
            Ok(()) => {
                info!(
                    event = "db_schema",
                    status = "ok",
                    path = %self.path.display(),
                    duration_ms = started_at.elapsed().as_millis() as u64,
                    "book table ready"
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    event = "db_schema",
                    status = "error",
                    path = %self.path.display(),
                    error = %err,
                    "failed to create book table"
                );
                Err(err.into())
            }
        }
    }

    /// Run `work` on a fresh connection on the blocking pool.
    ///
    /// The connection lives exactly as long as `work`; it is released on success,
    /// on error and if `work` panics.
    pub async fn with_session<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&mut Connection) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<StoreError> + Send + 'static,
    {
        let db = self.clone();
        tokio::task::spawn_blocking(move || -> Result<T, E> {
            let mut conn = db.open_session()?;
            work(&mut conn)
        })
        .await
        .map_err(|err| E::from(StoreError::TaskFailed(err.to_string())))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_url_forms() {
        assert_eq!(
            Database::from_url("sqlite://data/books.db").unwrap().path(),
            Path::new("data/books.db")
        );
        assert_eq!(
            Database::from_url("sqlite:books.db").unwrap().path(),
            Path::new("books.db")
        );
        assert_eq!(
            Database::from_url("  ./books.db ").unwrap().path(),
            Path::new("./books.db")
        );
    }

    #[test]
    fn test_rejected_urls() {
        assert!(matches!(
            Database::from_url("postgresql://user:pw@localhost/bookdb"),
            Err(StoreError::InvalidUrl(_))
        ));
        assert!(matches!(
            Database::from_url(":memory:"),
            Err(StoreError::InvalidUrl(_))
        ));
        assert!(matches!(
            Database::from_url("sqlite://"),
            Err(StoreError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_init_schema_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let db = Database::at_path(tmp.path().join("books.db"));

        db.init_schema().unwrap();
        db.init_schema().unwrap();

        let conn = db.open_session().unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM books", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_open_fails_for_missing_directory() {
        let tmp = TempDir::new().unwrap();
        let db = Database::at_path(tmp.path().join("no/such/dir/books.db"));
        assert!(matches!(db.open_session(), Err(StoreError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_with_session_propagates_closure_error() {
        let tmp = TempDir::new().unwrap();
        let db = Database::at_path(tmp.path().join("books.db"));
        db.init_schema().unwrap();

        let result: StoreResult<()> = db
            .with_session(|_conn| Err(StoreError::NotFound(42)))
            .await;
        assert!(matches!(result, Err(StoreError::NotFound(42))));

        let count: StoreResult<i64> = db
            .with_session(|conn| -> StoreResult<i64> {
                Ok(conn.query_row("SELECT COUNT(*) FROM books", [], |row| row.get(0))?)
            })
            .await;
        assert_eq!(count.unwrap(), 0);
    }
}
