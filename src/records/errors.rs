//! # Records Errors
//!
//! Error taxonomy shared by the course directory, the student directory and
//! the enrollment ledger.
//!
//! Every rejection a caller can trigger carries a stable string code
//! (`COURSE404`, `ENROLLMENT409`, ...) and falls into one of three kinds.

use std::fmt;

use thiserror::Error;

/// Result type for records operations
pub type RecordsResult<T> = Result<T, RecordsError>;

/// Broad class of a rejected request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Required input absent (400)
    MissingField,
    /// Referenced entity absent (404)
    NotFound,
    /// Uniqueness violation (409)
    Conflict,
}

/// Structured rejection codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordsErrorCode {
    CourseNameRequired,
    CourseCodeRequired,
    CourseNotFound,
    CourseExists,
    RollNumberRequired,
    FirstNameRequired,
    StudentNotFound,
    StudentExists,
    /// Enrollment references a course that does not exist
    EnrollmentCourseMissing,
    /// Enrollment references a student that does not exist
    EnrollmentStudentMissing,
    /// Student exists but has no enrollments
    NoEnrollments,
    EnrollmentExists,
}

impl RecordsErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            Self::CourseNameRequired => "COURSE001",
            Self::CourseCodeRequired => "COURSE002",
            Self::CourseNotFound => "COURSE404",
            Self::CourseExists => "COURSE409",
            Self::RollNumberRequired => "STUDENT001",
            Self::FirstNameRequired => "STUDENT002",
            Self::StudentNotFound => "STUDENT404",
            Self::StudentExists => "STUDENT409",
            Self::EnrollmentCourseMissing => "ENROLLMENT001",
            Self::EnrollmentStudentMissing => "ENROLLMENT002",
            Self::NoEnrollments => "ENROLLMENT404",
            Self::EnrollmentExists => "ENROLLMENT409",
        }
    }

    /// Returns the caller-facing message
    pub fn message(&self) -> &'static str {
        match self {
            Self::CourseNameRequired => "Course Name is required",
            Self::CourseCodeRequired => "Course Code is required",
            Self::CourseNotFound => "Course not found",
            Self::CourseExists => "Course already exists",
            Self::RollNumberRequired => "Roll Number required",
            Self::FirstNameRequired => "First Name is required",
            Self::StudentNotFound => "Student not found",
            Self::StudentExists => "Student already exists",
            Self::EnrollmentCourseMissing => "Course does not exist",
            Self::EnrollmentStudentMissing => "Student does not exist",
            Self::NoEnrollments => "No enrollments found for this student",
            Self::EnrollmentExists => "Enrollment already exists",
        }
    }

    /// Returns the kind of rejection
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::CourseNameRequired
            | Self::CourseCodeRequired
            | Self::RollNumberRequired
            | Self::FirstNameRequired => ErrorKind::MissingField,

            Self::CourseNotFound
            | Self::StudentNotFound
            | Self::EnrollmentCourseMissing
            | Self::EnrollmentStudentMissing
            | Self::NoEnrollments => ErrorKind::NotFound,

            Self::CourseExists | Self::StudentExists | Self::EnrollmentExists => {
                ErrorKind::Conflict
            }
        }
    }
}

impl fmt::Display for RecordsErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Records errors
#[derive(Debug, Error)]
pub enum RecordsError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Request rejected with a structured code
    #[error("{}", .0.message())]
    Rejected(RecordsErrorCode),

    /// No enrollment for the (student, course) pair. Carries no code.
    #[error("Enrollment not found")]
    EnrollmentNotFound,

    /// Request body is not valid JSON or has wrongly-typed fields
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Path did not resolve to a resource
    #[error("Resource not found")]
    RouteNotFound,

    /// Path exists but does not accept this verb
    #[error("Method not allowed")]
    MethodNotAllowed,

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Failure inside the relational store
    #[error("Store error: {0}")]
    Store(#[from] rusqlite::Error),

    /// Store connection lock was poisoned by a panicking writer
    #[error("Store lock poisoned")]
    StorePoisoned,
}

impl RecordsError {
    /// Structured code, if this error carries one
    pub fn code(&self) -> Option<RecordsErrorCode> {
        match self {
            RecordsError::Rejected(code) => Some(*code),
            _ => None,
        }
    }

    /// True for failures the caller did not cause
    pub fn is_internal(&self) -> bool {
        matches!(self, RecordsError::Store(_) | RecordsError::StorePoisoned)
    }
}

impl From<RecordsErrorCode> for RecordsError {
    fn from(code: RecordsErrorCode) -> Self {
        RecordsError::Rejected(code)
    }
}

/// True when `err` is a UNIQUE constraint violation raised by the store
pub(crate) fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

/// Map a UNIQUE violation on write to `conflict`, pass everything else through
pub(crate) fn map_unique(err: rusqlite::Error, conflict: RecordsErrorCode) -> RecordsError {
    if is_unique_violation(&err) {
        RecordsError::Rejected(conflict)
    } else {
        RecordsError::Store(err)
    }
}
