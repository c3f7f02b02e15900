//! # Shared API Key Guard
//!
//! A single static secret shared by every client. There is no identity, no session
//! and no expiry; a request either presents the configured value or is rejected.
//!
//! ## Invariants
//! - The comparison is constant-time in the key contents.
//! - An empty configured key never matches, so a misconfigured server rejects everything.

use subtle::ConstantTimeEq;
use tracing::warn;

use super::errors::{AuthError, AuthResult};

/// Header carrying the shared secret
pub const API_KEY_HEADER: &str = "x-api-key";

/// Secret used when nothing is configured
pub const DEFAULT_API_KEY: &str = "secret-key";

/// Checks presented keys against the configured secret
#[derive(Clone)]
pub struct ApiKeyGuard {
    expected: String,
}

impl ApiKeyGuard {
    pub fn new(expected: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
        }
    }

    /// Verify the header value of one request
    pub fn verify(&self, presented: Option<&str>) -> AuthResult<()> {
        let Some(presented) = presented else {
            warn!(event = "api_key_rejected", reason = "missing", "request without API key");
            return Err(AuthError::MissingApiKey);
        };

        if self.expected.is_empty() || !constant_time_str_eq(presented, &self.expected) {
            warn!(event = "api_key_rejected", reason = "mismatch", "request with wrong API key");
            return Err(AuthError::InvalidApiKey);
        }

        Ok(())
    }
}

impl Default for ApiKeyGuard {
    fn default() -> Self {
        Self::new(DEFAULT_API_KEY)
    }
}

impl std::fmt::Debug for ApiKeyGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyGuard")
            .field("expected", &"<redacted>")
            .finish()
    }
}

/// Constant-time comparison of two strings
pub fn constant_time_str_eq(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}
