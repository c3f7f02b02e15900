//! Application configuration.
//!
//! Values come from CLI flags with environment fallbacks (`DATABASE_URL`, `API_KEY`,
//! `BOOKSHELF_HOST`, `BOOKSHELF_PORT`, `BOOKSHELF_CORS_ORIGINS`); anything unset takes
//! the local-development default below.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::auth::{ApiKeyGuard, DEFAULT_API_KEY};
use crate::db::{Database, StoreResult};
use crate::http_server::HttpServerConfig;

/// Database used when `DATABASE_URL` is not set
pub const DEFAULT_DATABASE_URL: &str = "sqlite://bookshelf.db";

/// Everything the service needs to start
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub http: HttpServerConfig,

    #[serde(default = "default_database_url")]
    pub database_url: String,

    #[serde(default = "default_api_key")]
    pub api_key: String,
}

fn default_database_url() -> String {
    DEFAULT_DATABASE_URL.to_string()
}

fn default_api_key() -> String {
    DEFAULT_API_KEY.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            http: HttpServerConfig::default(),
            database_url: default_database_url(),
            api_key: default_api_key(),
        }
    }
}

impl AppConfig {
    /// Database handle for the configured URL
    pub fn database(&self) -> StoreResult<Database> {
        Database::from_url(&self.database_url)
    }

    /// Access guard for the configured secret
    pub fn guard(&self) -> ApiKeyGuard {
        ApiKeyGuard::new(self.api_key.clone())
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("http", &self.http)
            .field("database_url", &self.database_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api_key, "secret-key");
        assert_eq!(config.database_url, "sqlite://bookshelf.db");
        assert_eq!(
            config.database().unwrap().path(),
            std::path::Path::new("bookshelf.db")
        );
    }

    #[test]
    fn test_empty_json_is_default() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = AppConfig {
            api_key: "hunter2".to_string(),
            ..Default::default()
        };
        assert!(!format!("{:?}", config).contains("hunter2"));
    }
}
