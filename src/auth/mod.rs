//! # Auth Module
//!
//! Shared-secret access control for the book endpoints.

pub mod api_key;
pub mod errors;

pub use api_key::{constant_time_str_eq, ApiKeyGuard, API_KEY_HEADER, DEFAULT_API_KEY};
pub use errors::{AuthError, AuthResult};
