//! # Books
//!
//! The single `Book` entity: its model, request validation, SQLite repository,
//! and the create-then-update transaction helper.

pub mod model;
pub mod repository;
pub mod schema;
pub mod transaction;

pub use model::{Book, BookChanges, BookId, BookListQuery, NewBook, MAX_TITLE_CHARS};
pub use repository::{BookRepository, SqliteBookRepository};
pub use schema::{
    CreateBookRequest, FieldError, ListBooksParams, UpdateBookRequest, ValidationErrors,
};
pub use transaction::create_and_update_in_transaction;
