//! CLI module for bookshelf
//!
//! Provides command-line interface for:
//! - serve: Prepare the database and run the HTTP API
//! - init-db: Prepare the database and exit

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command, DatabaseArgs, ServeArgs};
pub use commands::{init_db, init_logging, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
