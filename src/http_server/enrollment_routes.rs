//! Enrollment HTTP Routes
//!
//! Enrollments hang off the student they belong to:
//!
//! - `GET    /student/:student_id/course` - list the student's enrollments
//! - `POST   /student/:student_id/course` - enroll (`{"course_id": n}` in the body)
//! - `DELETE /student/:student_id/course/:course_id` - drop an enrollment

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use serde::Serialize;

use crate::records::{EnrollmentLedger, EnrollmentView, NewEnrollment, RecordsError};

use super::request::{json_body, method_not_allowed, path_params, RecordId};
use super::MessageResponse;

#[derive(Debug, Serialize)]
pub struct EnrollmentCreatedResponse {
    pub message: String,
    pub enrollment_id: i64,
}

#[derive(Debug, Serialize)]
pub struct EnrollmentsListResponse {
    pub enrollments: Vec<EnrollmentView>,
}

/// Create enrollment routes
pub fn enrollment_routes(ledger: Arc<EnrollmentLedger>) -> Router {
    Router::new()
        .route(
            "/student/:student_id/course",
            get(list_enrollments_handler)
                .post(create_enrollment_handler)
                .fallback(method_not_allowed),
        )
        .route(
            "/student/:student_id/course/:course_id",
            delete(delete_enrollment_handler).fallback(method_not_allowed),
        )
        .with_state(ledger)
}

async fn list_enrollments_handler(
    State(ledger): State<Arc<EnrollmentLedger>>,
    student_id: Result<Path<RecordId>, PathRejection>,
) -> Result<Json<EnrollmentsListResponse>, RecordsError> {
    let RecordId(student_id) = path_params(student_id)?;
    let enrollments = ledger.list_by_student(student_id)?;
    Ok(Json(EnrollmentsListResponse { enrollments }))
}

async fn create_enrollment_handler(
    State(ledger): State<Arc<EnrollmentLedger>>,
    student_id: Result<Path<RecordId>, PathRejection>,
    body: Result<Json<NewEnrollment>, JsonRejection>,
) -> Result<(StatusCode, Json<EnrollmentCreatedResponse>), RecordsError> {
    let RecordId(student_id) = path_params(student_id)?;
    let enrollment_id = ledger.create(student_id, json_body(body)?)?;

    Ok((
        StatusCode::CREATED,
        Json(EnrollmentCreatedResponse {
            message: "Enrollment created".to_string(),
            enrollment_id,
        }),
    ))
}

async fn delete_enrollment_handler(
    State(ledger): State<Arc<EnrollmentLedger>>,
    ids: Result<Path<(RecordId, RecordId)>, PathRejection>,
) -> Result<Json<MessageResponse>, RecordsError> {
    let (RecordId(student_id), RecordId(course_id)) = path_params(ids)?;
    ledger.delete(student_id, course_id)?;
    Ok(Json(MessageResponse::new("Enrollment deleted")))
}
