//! Create-then-rename as one atomic unit.

use rusqlite::Connection;
use tracing::warn;

use crate::db::StoreResult;

use super::model::{Book, BookChanges, NewBook};
use super::repository::{BookRepository, SqliteBookRepository};

/// Insert `title`/`description`, then rename the new row to `new_title`, in a single
/// transaction.
///
/// Both writes commit together or not at all: if either step fails the transaction is
/// dropped uncommitted, which rolls it back, and the error is returned. Titles are not
/// length-checked here; callers pass values already validated by the request schemas.
pub fn create_and_update_in_transaction(
    conn: &mut Connection,
    title: &str,
    description: Option<&str>,
    new_title: &str,
) -> StoreResult<Book> {
    let tx = conn.transaction()?;

    let result = {
        let repo = SqliteBookRepository::new(&tx);
        repo.create_book(&NewBook::new(title, description.map(str::to_string)))
            .and_then(|created| repo.update_book(created.id, &BookChanges::title(new_title)))
    };

    match result {
        Ok(book) => {
            tx.commit()?;
            Ok(book)
        }
        Err(err) => {
            warn!(
                event = "book_transaction",
                status = "rolled_back",
                error = %err,
                "create-then-update rolled back"
            );
            tx.rollback()?;
            Err(err)
        }
    }
}
