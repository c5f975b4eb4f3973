//! # HTTP Error Mapping
//!
//! Turns [`RecordsError`] into the JSON error envelope:
//! `{"error_code": "...", "message": "..."}`, with `error_code` omitted when
//! the error carries no structured code.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::{debug, error};

use crate::records::{ErrorKind, RecordsError};

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<&'static str>,
    pub message: String,
}

/// HTTP status for a records error
pub fn status_code(err: &RecordsError) -> StatusCode {
    match err {
        RecordsError::Rejected(code) => match code.kind() {
            ErrorKind::MissingField => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
        },
        RecordsError::InvalidBody(_) => StatusCode::BAD_REQUEST,
        RecordsError::EnrollmentNotFound | RecordsError::RouteNotFound => StatusCode::NOT_FOUND,
        RecordsError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        RecordsError::Store(_) | RecordsError::StorePoisoned => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<&RecordsError> for ErrorResponse {
    fn from(err: &RecordsError) -> Self {
        // Store details stay in the log.
        let message = if err.is_internal() {
            "Internal server error".to_string()
        } else {
            err.to_string()
        };

        Self {
            error_code: err.code().map(|c| c.code()),
            message,
        }
    }
}

impl IntoResponse for RecordsError {
    fn into_response(self) -> Response {
        let status = status_code(&self);

        if self.is_internal() {
            error!(event = "REQUEST_FAILED", error = %self);
        } else {
            debug!(
                event = "REQUEST_REJECTED",
                status = status.as_u16(),
                error_code = self.code().map(|c| c.code()),
                message = %self,
            );
        }

        (status, Json(ErrorResponse::from(&self))).into_response()
    }
}
