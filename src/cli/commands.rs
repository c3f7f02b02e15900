//! CLI command implementations

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::db::Database;
use crate::http_server::HttpServer;

use super::args::{Cli, Command, DatabaseArgs};
use super::errors::{CliError, CliResult};

/// Parse arguments, install logging and run the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    init_logging();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve(args) => serve(args.into_config()),
        Command::InitDb { database } => init_db(&database),
    }
}

/// Install the global `tracing` subscriber. `RUST_LOG` overrides the `info` default.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A subscriber may already be installed (tests, embedding); keep that one.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Create the book table and exit
pub fn init_db(args: &DatabaseArgs) -> CliResult<()> {
    let db = Database::from_url(&args.database_url)?;
    db.init_schema()?;
    info!(event = "init_db", path = %db.path().display(), "schema ready");
    Ok(())
}

/// Serve the HTTP API until the process is stopped.
///
/// A failure to create the table is logged and does not stop the server; the same
/// store error is then reported on each request.
pub fn serve(config: AppConfig) -> CliResult<()> {
    let db = config.database()?;
    if let Err(err) = db.init_schema() {
        error!(event = "startup_schema", error = %err, "continuing without schema bootstrap");
    }

    let server = HttpServer::new(config.http.clone(), db, config.guard());

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })?;

    Ok(())
}
