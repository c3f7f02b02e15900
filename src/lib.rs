//! bookshelf - book records over HTTP, guarded by a shared API key
//!
//! Request flow: access guard → per-request SQLite connection → handler → JSON response.

pub mod auth;
pub mod books;
pub mod cli;
pub mod config;
pub mod db;
pub mod http_server;

pub use auth::{ApiKeyGuard, AuthError};
pub use books::{
    create_and_update_in_transaction, Book, BookChanges, BookId, BookListQuery, BookRepository,
    NewBook, SqliteBookRepository,
};
pub use config::AppConfig;
pub use db::{Database, StoreError, StoreResult};
pub use http_server::{ApiError, HttpServer, HttpServerConfig};
