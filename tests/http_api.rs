//! HTTP API Tests
//!
//! Drives the full router in-process:
//! - Status codes and the error envelope for every rejection kind
//! - Create-then-get returns what was supplied
//! - Referent checks on enrollment run student first
//! - Failed deletes leave the store untouched

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use registrar::http_server::{HttpServer, HttpServerConfig};
use registrar::records::Store;

// =============================================================================
// Helper Functions
// =============================================================================

fn app() -> Router {
    HttpServer::with_store(HttpServerConfig::default(), Store::open_in_memory().unwrap()).router()
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn create_course(app: &Router, name: &str, code: &str) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/api/course",
        Some(json!({"course_name": name, "course_code": code})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["course_id"].as_i64().unwrap()
}

async fn create_student(app: &Router, roll: &str, first: &str) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/api/student",
        Some(json!({"roll_number": roll, "first_name": first})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["student_id"].as_i64().unwrap()
}

fn assert_error(body: &Value, code: &str) {
    assert_eq!(body["error_code"], code, "body: {}", body);
    assert!(body["message"].is_string());
}

// =============================================================================
// End-to-End Scenario
// =============================================================================

#[tokio::test]
async fn test_enrollment_lifecycle_scenario() {
    let app = app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/course",
        Some(json!({"course_name": "Algorithms", "course_code": "CS301"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"message": "Course created", "course_id": 1}));

    let (status, body) = send(
        &app,
        "POST",
        "/api/student",
        Some(json!({"roll_number": "S100", "first_name": "Ann"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["student_id"], 1);

    let (status, body) = send(
        &app,
        "POST",
        "/api/student/1/course",
        Some(json!({"course_id": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Enrollment created");
    assert_eq!(body["enrollment_id"], 1);

    let (status, body) = send(&app, "GET", "/api/student/1/course", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"enrollments": [{
            "enrollment_id": 1,
            "course_id": 1,
            "course_name": "Algorithms",
            "course_code": "CS301"
        }]})
    );

    let (status, body) = send(
        &app,
        "POST",
        "/api/student/1/course",
        Some(json!({"course_id": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_error(&body, "ENROLLMENT409");

    let (status, body) = send(&app, "DELETE", "/api/student/1/course/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Enrollment deleted"}));

    let (status, body) = send(&app, "GET", "/api/student/1/course", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(&body, "ENROLLMENT404");
}

// =============================================================================
// Course Tests
// =============================================================================

#[tokio::test]
async fn test_course_create_then_get_round_trip() {
    let app = app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/course",
        Some(json!({
            "course_name": "Databases",
            "course_code": "CS340",
            "course_description": "Relational model"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["course_id"].as_i64().unwrap();

    let (status, body) = send(&app, "GET", &format!("/api/course/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "course_id": id,
            "course_name": "Databases",
            "course_code": "CS340",
            "course_description": "Relational model"
        })
    );
}

#[tokio::test]
async fn test_course_description_defaults_to_empty() {
    let app = app();
    let id = create_course(&app, "Algorithms", "CS301").await;

    let (_, body) = send(&app, "GET", &format!("/api/course/{}", id), None).await;
    assert_eq!(body["course_description"], "");
}

#[tokio::test]
async fn test_course_missing_fields() {
    let app = app();

    let (status, body) = send(&app, "POST", "/api/course", Some(json!({"course_code": "X"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "COURSE001");

    let (status, body) = send(&app, "POST", "/api/course", Some(json!({"course_name": "X"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "COURSE002");
}

#[tokio::test]
async fn test_course_code_conflict_regardless_of_other_fields() {
    let app = app();
    create_course(&app, "Algorithms", "CS301").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/course",
        Some(json!({
            "course_name": "Totally different",
            "course_code": "CS301",
            "course_description": "other"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_error(&body, "COURSE409");
}

#[tokio::test]
async fn test_course_partial_update() {
    let app = app();
    let id = create_course(&app, "Algorithms", "CS301").await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/course/{}", id),
        Some(json!({"course_description": "Sorting and searching"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Course updated"}));

    let (_, body) = send(&app, "GET", &format!("/api/course/{}", id), None).await;
    assert_eq!(body["course_name"], "Algorithms");
    assert_eq!(body["course_code"], "CS301");
    assert_eq!(body["course_description"], "Sorting and searching");
}

#[tokio::test]
async fn test_course_update_to_taken_code() {
    let app = app();
    create_course(&app, "Algorithms", "CS301").await;
    let id = create_course(&app, "Databases", "CS340").await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/course/{}", id),
        Some(json!({"course_code": "CS301"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_error(&body, "COURSE409");
}

#[tokio::test]
async fn test_course_update_with_blank_code() {
    let app = app();
    let id = create_course(&app, "Algorithms", "CS301").await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/course/{}", id),
        Some(json!({"course_code": "  "})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "COURSE002");

    let (_, body) = send(&app, "GET", &format!("/api/course/{}", id), None).await;
    assert_eq!(body["course_code"], "CS301");
}

#[tokio::test]
async fn test_course_not_found_paths() {
    let app = app();

    for (method, body) in [("GET", None), ("PUT", Some(json!({}))), ("DELETE", None)] {
        let (status, body) = send(&app, method, "/api/course/99", body).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", method);
        assert_error(&body, "COURSE404");
    }
}

#[tokio::test]
async fn test_course_delete_is_permanent() {
    let app = app();
    let id = create_course(&app, "Algorithms", "CS301").await;

    let (status, body) = send(&app, "DELETE", &format!("/api/course/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Course deleted"}));

    let (status, _) = send(&app, "GET", &format!("/api/course/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Student Tests
// =============================================================================

#[tokio::test]
async fn test_student_create_then_get() {
    let app = app();
    let id = create_student(&app, "S100", "Ann").await;

    let (status, body) = send(&app, "GET", &format!("/api/student/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "student_id": id,
            "roll_number": "S100",
            "first_name": "Ann",
            "last_name": ""
        })
    );
}

#[tokio::test]
async fn test_student_validation_and_conflict() {
    let app = app();

    let (status, body) = send(&app, "POST", "/api/student", Some(json!({"first_name": "Ann"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "STUDENT001");

    let (status, body) = send(&app, "POST", "/api/student", Some(json!({"roll_number": "S1"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "STUDENT002");

    create_student(&app, "S1", "Ann").await;
    let (status, body) = send(
        &app,
        "POST",
        "/api/student",
        Some(json!({"roll_number": "S1", "first_name": "Bob"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_error(&body, "STUDENT409");
}

#[tokio::test]
async fn test_student_update_and_delete() {
    let app = app();
    let id = create_student(&app, "S1", "Ann").await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/student/{}", id),
        Some(json!({"last_name": "Lee"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Student updated"}));

    let (_, body) = send(&app, "GET", &format!("/api/student/{}", id), None).await;
    assert_eq!(body["first_name"], "Ann");
    assert_eq!(body["last_name"], "Lee");

    let (status, body) = send(&app, "DELETE", &format!("/api/student/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Student deleted"}));

    let (status, body) = send(&app, "DELETE", &format!("/api/student/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(&body, "STUDENT404");
}

// =============================================================================
// Enrollment Tests
// =============================================================================

#[tokio::test]
async fn test_enrollment_missing_student_reported_first() {
    let app = app();

    // Neither the student nor the course exists
    let (status, body) = send(
        &app,
        "POST",
        "/api/student/7/course",
        Some(json!({"course_id": 9})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(&body, "ENROLLMENT002");
}

#[tokio::test]
async fn test_enrollment_missing_course() {
    let app = app();
    let student = create_student(&app, "S1", "Ann").await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/student/{}/course", student),
        Some(json!({"course_id": 9})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(&body, "ENROLLMENT001");

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/student/{}/course", student),
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(&body, "ENROLLMENT001");
}

#[tokio::test]
async fn test_list_for_unknown_student() {
    let app = app();
    let (status, body) = send(&app, "GET", "/api/student/3/course", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(&body, "ENROLLMENT002");
}

#[tokio::test]
async fn test_delete_missing_enrollment_has_no_code() {
    let app = app();
    let student = create_student(&app, "S1", "Ann").await;
    let course = create_course(&app, "Algorithms", "CS301").await;

    let (status, body) = send(
        &app,
        "DELETE",
        &format!("/api/student/{}/course/{}", student, course),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"message": "Enrollment not found"}));
}

#[tokio::test]
async fn test_failed_deletes_leave_records_in_place() {
    let app = app();
    let student = create_student(&app, "S1", "Ann").await;
    let course = create_course(&app, "Algorithms", "CS301").await;
    send(
        &app,
        "POST",
        &format!("/api/student/{}/course", student),
        Some(json!({"course_id": course})),
    )
    .await;

    send(&app, "DELETE", "/api/course/404", None).await;
    send(&app, "DELETE", "/api/student/404", None).await;
    send(&app, "DELETE", &format!("/api/student/{}/course/404", student), None).await;

    let (status, body) = send(&app, "GET", &format!("/api/student/{}/course", student), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["enrollments"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_course_delete_cascades_to_enrollments() {
    let app = app();
    let student = create_student(&app, "S1", "Ann").await;
    let course = create_course(&app, "Algorithms", "CS301").await;
    send(
        &app,
        "POST",
        &format!("/api/student/{}/course", student),
        Some(json!({"course_id": course})),
    )
    .await;

    send(&app, "DELETE", &format!("/api/course/{}", course), None).await;

    let (status, body) = send(&app, "GET", &format!("/api/student/{}/course", student), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(&body, "ENROLLMENT404");
}

// =============================================================================
// Request Shape Tests
// =============================================================================

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let app = app();
    let request = Request::builder()
        .method("POST")
        .uri("/api/course")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body.get("error_code").is_none());
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Invalid request body"));
}

#[tokio::test]
async fn test_wrongly_typed_field_is_bad_request() {
    let app = app();
    let (status, _) = send(
        &app,
        "POST",
        "/api/course",
        Some(json!({"course_name": 5, "course_code": "X"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_non_integer_id_is_not_found() {
    let app = app();
    let (status, body) = send(&app, "GET", "/api/course/abc", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"message": "Resource not found"}));
}

#[tokio::test]
async fn test_negative_id_is_not_found() {
    let app = app();

    for (method, uri) in [
        ("GET", "/api/course/-1"),
        ("PUT", "/api/student/-1"),
        ("DELETE", "/api/student/1/course/-1"),
    ] {
        let (status, body) = send(&app, method, uri, Some(json!({}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{} {}", method, uri);
        assert_eq!(body, json!({"message": "Resource not found"}));
    }
}

#[tokio::test]
async fn test_wrong_method_gets_envelope() {
    let app = app();

    for (method, uri) in [
        ("POST", "/api/course/1"),
        ("GET", "/api/course"),
        ("PUT", "/api/student/1/course"),
        ("GET", "/api/student/1/course/1"),
    ] {
        let (status, body) = send(&app, method, uri, None).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{} {}", method, uri);
        assert_eq!(body, json!({"message": "Method not allowed"}));
    }
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = app();
    let (status, body) = send(&app, "GET", "/api/teachers", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Resource not found");
}

#[tokio::test]
async fn test_health() {
    let app = app();
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"status": "ok", "version": env!("CARGO_PKG_VERSION")})
    );
}
