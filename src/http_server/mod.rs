//! # Registrar HTTP Server Module
//!
//! Axum router exposing the records core as JSON over HTTP.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/api/course/*` - Course directory
//! - `/api/student/*` - Student directory
//! - `/api/student/:student_id/course/*` - Enrollment ledger

pub mod config;
pub mod course_routes;
pub mod enrollment_routes;
pub mod errors;
pub mod observability_routes;
pub mod request;
pub mod server;
pub mod student_routes;

use serde::Serialize;

pub use config::HttpServerConfig;
pub use errors::ErrorResponse;
pub use server::HttpServer;

/// Plain acknowledgement body
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
