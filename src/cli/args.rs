//! CLI argument definitions using clap
//!
//! Commands:
//! - bookshelf serve [--host] [--port] [--database-url] [--api-key]
//! - bookshelf init-db [--database-url]

use clap::{Args, Parser, Subcommand};

use crate::auth::DEFAULT_API_KEY;
use crate::config::{AppConfig, DEFAULT_DATABASE_URL};
use crate::http_server::HttpServerConfig;

/// bookshelf - book records over HTTP
#[derive(Parser, Debug)]
#[command(name = "bookshelf")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the schema if needed and serve the HTTP API
    Serve(ServeArgs),

    /// Create the schema if needed and exit
    InitDb {
        #[command(flatten)]
        database: DatabaseArgs,
    },
}

#[derive(Args, Debug, Clone)]
pub struct DatabaseArgs {
    /// SQLite database path or sqlite:// URL
    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    pub database_url: String,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Host to bind to
    #[arg(long, env = "BOOKSHELF_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind to
    #[arg(long, env = "BOOKSHELF_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Allowed CORS origins (comma separated). Empty allows any.
    #[arg(long = "cors-origin", env = "BOOKSHELF_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Vec<String>,

    #[command(flatten)]
    pub database: DatabaseArgs,

    /// Shared secret expected in the X-API-Key header
    #[arg(long, env = "API_KEY", default_value = DEFAULT_API_KEY, hide_env_values = true)]
    pub api_key: String,
}

impl ServeArgs {
    /// Resolve into the application configuration
    pub fn into_config(self) -> AppConfig {
        AppConfig {
            http: HttpServerConfig {
                host: self.host,
                port: self.port,
                cors_origins: self.cors_origins,
            },
            database_url: self.database.database_url,
            api_key: self.api_key,
        }
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
