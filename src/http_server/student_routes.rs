//! Student HTTP Routes
//!
//! - `POST   /student`
//! - `GET    /student/:student_id`
//! - `PUT    /student/:student_id`
//! - `DELETE /student/:student_id`

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use crate::records::{NewStudent, RecordsError, Student, StudentDirectory, StudentUpdate};

use super::request::{json_body, method_not_allowed, path_params, RecordId};
use super::MessageResponse;

#[derive(Debug, Serialize)]
pub struct StudentCreatedResponse {
    pub message: String,
    pub student_id: i64,
}

/// Create student routes
pub fn student_routes(students: Arc<StudentDirectory>) -> Router {
    Router::new()
        .route("/student", post(create_student_handler).fallback(method_not_allowed))
        .route(
            "/student/:student_id",
            get(get_student_handler)
                .put(update_student_handler)
                .delete(delete_student_handler)
                .fallback(method_not_allowed),
        )
        .with_state(students)
}

async fn get_student_handler(
    State(students): State<Arc<StudentDirectory>>,
    student_id: Result<Path<RecordId>, PathRejection>,
) -> Result<Json<Student>, RecordsError> {
    let RecordId(student_id) = path_params(student_id)?;
    Ok(Json(students.get(student_id)?))
}

async fn create_student_handler(
    State(students): State<Arc<StudentDirectory>>,
    body: Result<Json<NewStudent>, JsonRejection>,
) -> Result<(StatusCode, Json<StudentCreatedResponse>), RecordsError> {
    let student_id = students.create(json_body(body)?)?;

    Ok((
        StatusCode::CREATED,
        Json(StudentCreatedResponse {
            message: "Student created".to_string(),
            student_id,
        }),
    ))
}

async fn update_student_handler(
    State(students): State<Arc<StudentDirectory>>,
    student_id: Result<Path<RecordId>, PathRejection>,
    body: Result<Json<StudentUpdate>, JsonRejection>,
) -> Result<Json<MessageResponse>, RecordsError> {
    let RecordId(student_id) = path_params(student_id)?;
    students.update(student_id, json_body(body)?)?;
    Ok(Json(MessageResponse::new("Student updated")))
}

async fn delete_student_handler(
    State(students): State<Arc<StudentDirectory>>,
    student_id: Result<Path<RecordId>, PathRejection>,
) -> Result<Json<MessageResponse>, RecordsError> {
    let RecordId(student_id) = path_params(student_id)?;
    students.delete(student_id)?;
    Ok(Json(MessageResponse::new("Student deleted")))
}
