//! # Auth Errors
//!
//! Error types for the access guard.

use thiserror::Error;

/// Result type for auth operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Access guard failures.
///
/// Both variants render the same message so a caller cannot tell a missing
/// header from a wrong one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No `X-API-Key` header, or one that is not valid UTF-8
    #[error("Invalid or missing API key")]
    MissingApiKey,

    /// Header present but not equal to the configured secret
    #[error("Invalid or missing API key")]
    InvalidApiKey,
}

impl AuthError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            AuthError::MissingApiKey => 401,
            AuthError::InvalidApiKey => 401,
        }
    }
}
