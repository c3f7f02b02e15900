//! # HTTP Server Module
//!
//! Axum server for the book API.
//!
//! # Endpoints
//!
//! - `/` and `/health` - Welcome message and health check (no key required)
//! - `/books/*` - Book CRUD, listing and count (requires `X-API-Key`)

pub mod book_routes;
pub mod config;
pub mod errors;
pub mod observability_routes;
pub mod server;

pub use book_routes::{book_routes, BookState, CountResponse};
pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use server::HttpServer;
