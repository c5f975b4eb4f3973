//! CLI module for Registrar
//!
//! Provides command-line interface for:
//! - init: Write a default config and create the database schema
//! - start: Boot the store and serve HTTP

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{init, run, run_command, start};
pub use errors::{CliError, CliErrorCode, CliResult};
