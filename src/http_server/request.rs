//! Request extraction helpers
//!
//! Handlers take `Result<Path<_>, PathRejection>` / `Result<Json<_>, JsonRejection>`
//! so that malformed input still produces the JSON error envelope.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::Path;
use axum::Json;
use serde::Deserialize;

use crate::records::{RecordsError, RecordsResult};

/// Record id taken from the path. Only non-negative integers match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "u64")]
pub struct RecordId(pub i64);

impl TryFrom<u64> for RecordId {
    type Error = std::num::TryFromIntError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        i64::try_from(value).map(RecordId)
    }
}

/// Unwrap path parameters. An id that does not parse means the route does not exist.
pub fn path_params<T>(path: Result<Path<T>, PathRejection>) -> RecordsResult<T> {
    path.map(|Path(value)| value)
        .map_err(|_| RecordsError::RouteNotFound)
}

/// Unwrap a JSON body, reporting why it could not be read
pub fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> RecordsResult<T> {
    body.map(|Json(value)| value)
        .map_err(|rejection| RecordsError::InvalidBody(rejection.body_text()))
}

/// Handler for a known path hit with an unsupported verb
pub async fn method_not_allowed() -> RecordsError {
    RecordsError::MethodNotAllowed
}
