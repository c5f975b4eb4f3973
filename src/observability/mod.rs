//! Observability subsystem
//!
//! Structured logging on top of `tracing`. Request/response spans come from
//! `tower_http::trace::TraceLayer` in the HTTP server; domain events are
//! emitted by the records components themselves.

mod logger;

pub use logger::{LogConfig, LogFormat, Logger};

use thiserror::Error;

/// Observability error
#[derive(Debug, Error)]
pub enum ObservabilityError {
    /// Level directive could not be parsed
    #[error("Invalid log level {0}")]
    InvalidLevel(String),

    /// A global subscriber was already installed
    #[error("Logger already initialized: {0}")]
    AlreadyInitialized(String),
}
