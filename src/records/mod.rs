//! # Records
//!
//! Data and validation core of the service: courses, students, and the
//! enrollments linking them.
//!
//! - [`CourseDirectory`] owns course rows and the unique course code.
//! - [`StudentDirectory`] owns student rows and the unique roll number.
//! - [`EnrollmentLedger`] owns the student/course link rows and checks both
//!   referents before writing.
//!
//! Each component is built from an explicit [`Store`] handle.

pub mod course;
pub mod enrollment;
pub mod errors;
pub mod store;
pub mod student;

pub use course::{Course, CourseDirectory, CourseUpdate, NewCourse};
pub use enrollment::{EnrollmentLedger, EnrollmentView, NewEnrollment};
pub use errors::{ErrorKind, RecordsError, RecordsErrorCode, RecordsResult};
pub use store::Store;
pub use student::{NewStudent, Student, StudentDirectory, StudentUpdate};

/// Accept a required text field only if it is present and not blank
pub(crate) fn required(value: Option<String>, missing: RecordsErrorCode) -> RecordsResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(RecordsError::Rejected(missing)),
    }
}

/// Like [`required`], but an absent value is fine (partial updates)
pub(crate) fn non_blank(
    value: Option<String>,
    missing: RecordsErrorCode,
) -> RecordsResult<Option<String>> {
    match value {
        Some(v) if v.trim().is_empty() => Err(RecordsError::Rejected(missing)),
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_rejects_absent_and_blank() {
        let code = RecordsErrorCode::CourseNameRequired;
        assert!(required(None, code).is_err());
        assert!(required(Some("  ".to_string()), code).is_err());
        assert_eq!(required(Some("Algebra".to_string()), code).unwrap(), "Algebra");
    }

    #[test]
    fn test_non_blank_allows_absent() {
        let code = RecordsErrorCode::FirstNameRequired;
        assert_eq!(non_blank(None, code).unwrap(), None);
        assert!(non_blank(Some(String::new()), code).is_err());
    }
}
