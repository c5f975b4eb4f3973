//! CLI command implementations
//!
//! `init` prepares a config file and the database; `start` boots the
//! logger, the store and the HTTP server, in that order.

use std::path::Path;

use tracing::info;

use crate::config::Config;
use crate::http_server::HttpServer;
use crate::observability::Logger;
use crate::records::Store;

use super::args::Command;
use super::errors::{CliError, CliResult};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config } => init(&config),
        Command::Start { config } => start(&config),
    }
}

/// Write a default config if none exists, then create the database schema.
///
/// Safe to run repeatedly: an existing config and existing tables are kept.
pub fn init(config_path: &Path) -> CliResult<()> {
    let config = if config_path.exists() {
        Config::load(config_path)?
    } else {
        let config = Config::default();
        config.save(config_path)?;
        println!("Wrote default config to {}", config_path.display());
        config
    };

    Store::open(config.database_path())?;
    println!(
        "Database initialized at {}",
        config.database_path().display()
    );
    Ok(())
}

/// Boot and serve until interrupted
pub fn start(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;
    Logger::init(&config.log)?;

    let store = Store::open(config.database_path())?;
    info!(
        event = "STORE_OPENED",
        path = %config.database_path().display()
    );

    let server = HttpServer::with_store(config.http.clone(), store);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}
