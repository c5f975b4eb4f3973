//! CLI argument definitions using clap
//!
//! Commands:
//! - registrar init --config <path>
//! - registrar start --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Registrar - course, student and enrollment records over HTTP
#[derive(Parser, Debug)]
#[command(name = "registrar")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a default config (if missing) and create the database schema
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./registrar.json")]
        config: PathBuf,
    },

    /// Start the HTTP server
    Start {
        /// Path to configuration file
        #[arg(long, default_value = "./registrar.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
