//! Course HTTP Routes
//!
//! - `POST   /course`
//! - `GET    /course/:course_id`
//! - `PUT    /course/:course_id`
//! - `DELETE /course/:course_id`

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

use crate::records::{Course, CourseDirectory, CourseUpdate, NewCourse, RecordsError};

use super::request::{json_body, method_not_allowed, path_params, RecordId};
use super::MessageResponse;

#[derive(Debug, Serialize)]
pub struct CourseCreatedResponse {
    pub message: String,
    pub course_id: i64,
}

/// Create course routes
pub fn course_routes(courses: Arc<CourseDirectory>) -> Router {
    Router::new()
        .route("/course", post(create_course_handler).fallback(method_not_allowed))
        .route(
            "/course/:course_id",
            get(get_course_handler)
                .put(update_course_handler)
                .delete(delete_course_handler)
                .fallback(method_not_allowed),
        )
        .with_state(courses)
}

async fn get_course_handler(
    State(courses): State<Arc<CourseDirectory>>,
    course_id: Result<Path<RecordId>, PathRejection>,
) -> Result<Json<Course>, RecordsError> {
    let RecordId(course_id) = path_params(course_id)?;
    Ok(Json(courses.get(course_id)?))
}

async fn create_course_handler(
    State(courses): State<Arc<CourseDirectory>>,
    body: Result<Json<NewCourse>, JsonRejection>,
) -> Result<(StatusCode, Json<CourseCreatedResponse>), RecordsError> {
    let course_id = courses.create(json_body(body)?)?;

    Ok((
        StatusCode::CREATED,
        Json(CourseCreatedResponse {
            message: "Course created".to_string(),
            course_id,
        }),
    ))
}

async fn update_course_handler(
    State(courses): State<Arc<CourseDirectory>>,
    course_id: Result<Path<RecordId>, PathRejection>,
    body: Result<Json<CourseUpdate>, JsonRejection>,
) -> Result<Json<MessageResponse>, RecordsError> {
    let RecordId(course_id) = path_params(course_id)?;
    courses.update(course_id, json_body(body)?)?;
    Ok(Json(MessageResponse::new("Course updated")))
}

async fn delete_course_handler(
    State(courses): State<Arc<CourseDirectory>>,
    course_id: Result<Path<RecordId>, PathRejection>,
) -> Result<Json<MessageResponse>, RecordsError> {
    let RecordId(course_id) = path_params(course_id)?;
    courses.delete(course_id)?;
    Ok(Json(MessageResponse::new("Course deleted")))
}
