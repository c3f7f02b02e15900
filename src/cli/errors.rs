//! CLI-specific error types
//!
//! Anything that reaches the CLI boundary ends the process with exit code 1.

use std::fmt;

use crate::db::StoreError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration value error
    ConfigError,
    /// Database could not be prepared
    Store,
    /// Boot failed
    BootFailed,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "BOOKSHELF_CLI_CONFIG_ERROR",
            Self::Store => "BOOKSHELF_CLI_STORE_ERROR",
            Self::BootFailed => "BOOKSHELF_CLI_BOOT_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Boot failed
    pub fn boot_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::BootFailed, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<StoreError> for CliError {
    fn from(e: StoreError) -> Self {
        let code = match e {
            StoreError::InvalidUrl(_) => CliErrorCode::ConfigError,
            _ => CliErrorCode::Store,
        };
        Self::new(code, e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code() {
        let err = CliError::boot_failed("port in use");
        assert_eq!(err.to_string(), "BOOKSHELF_CLI_BOOT_FAILED: port in use");
    }

    #[test]
    fn test_invalid_url_is_config_error() {
        let err = CliError::from(StoreError::InvalidUrl("bad".to_string()));
        assert_eq!(err.code(), &CliErrorCode::ConfigError);

        let err = CliError::from(StoreError::Unavailable("locked".to_string()));
        assert_eq!(err.code(), &CliErrorCode::Store);
    }
}
