//! Structured logger setup
//!
//! - One log line = one event
//! - JSON by default, `pretty` for local development
//! - Events carry an uppercase `event` field (`COURSE_CREATED`, ...)
//! - `RUST_LOG` overrides the configured level

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use super::ObservabilityError;

/// Output format of log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Filter directive (default: "info")
    #[serde(default = "default_level")]
    pub level: String,

    /// Output format (default: json)
    #[serde(default = "default_format")]
    pub format: LogFormat,
}

fn default_level() -> String {
    "info".to_string()
}

fn default_format() -> LogFormat {
    LogFormat::Json
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
        }
    }
}

impl LogConfig {
    /// Build the level filter, preferring `RUST_LOG` when it is set
    pub fn filter(&self) -> Result<EnvFilter, ObservabilityError> {
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return Ok(filter);
        }
        EnvFilter::try_new(&self.level)
            .map_err(|e| ObservabilityError::InvalidLevel(format!("'{}': {}", self.level, e)))
    }
}

/// Process-wide log sink
pub struct Logger;

impl Logger {
    /// Install the global subscriber. Fails if one is already installed.
    pub fn init(config: &LogConfig) -> Result<(), ObservabilityError> {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(config.filter()?)
            .with_target(false);

        let installed = match config.format {
            LogFormat::Json => builder.json().flatten_event(true).try_init(),
            LogFormat::Pretty => builder.pretty().try_init(),
        };

        installed.map_err(|e| ObservabilityError::AlreadyInitialized(e.to_string()))
    }
}
