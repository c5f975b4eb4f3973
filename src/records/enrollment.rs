//! # Enrollment Ledger
//!
//! Link rows between students and courses. At most one enrollment exists per
//! (student, course) pair, and both referents must exist when it is written.
//!
//! Referent checks run in a fixed order: the student first
//! (`ENROLLMENT002`), then the course (`ENROLLMENT001`). A request naming
//! neither a real student nor a real course therefore reports the student.

use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::errors::{map_unique, RecordsError, RecordsErrorCode, RecordsResult};
use super::store::Store;
use super::{course, student};

/// Enroll payload. A missing `course_id` is treated as an unknown course.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewEnrollment {
    pub course_id: Option<i64>,
}

/// One enrollment joined with its course
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrollmentView {
    pub enrollment_id: i64,
    pub course_id: i64,
    pub course_name: String,
    pub course_code: String,
}

/// Owner of enrollment records
#[derive(Clone)]
pub struct EnrollmentLedger {
    store: Store,
}

impl EnrollmentLedger {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Enroll a student in a course and return the new enrollment id
    pub fn create(&self, student_id: i64, input: NewEnrollment) -> RecordsResult<i64> {
        let (enrollment_id, course_id) = self.store.transaction(|tx| {
            if !student::exists(tx, student_id)? {
                return Err(RecordsErrorCode::EnrollmentStudentMissing.into());
            }

            let course_id = match input.course_id {
                Some(id) if course::exists(tx, id)? => id,
                _ => return Err(RecordsErrorCode::EnrollmentCourseMissing.into()),
            };

            if pair_exists(tx, student_id, course_id)? {
                return Err(RecordsErrorCode::EnrollmentExists.into());
            }

            tx.execute(
                "INSERT INTO enrollment (student_id, course_id) VALUES (?1, ?2)",
                params![student_id, course_id],
            )
            .map_err(|e| map_unique(e, RecordsErrorCode::EnrollmentExists))?;

            Ok((tx.last_insert_rowid(), course_id))
        })?;

        info!(event = "ENROLLMENT_CREATED", enrollment_id, student_id, course_id);
        Ok(enrollment_id)
    }

    /// All enrollments of a student, oldest first, with course details
    pub fn list_by_student(&self, student_id: i64) -> RecordsResult<Vec<EnrollmentView>> {
        self.store.transaction(|tx| {
            if !student::exists(tx, student_id)? {
                return Err(RecordsErrorCode::EnrollmentStudentMissing.into());
            }

            let mut stmt = tx.prepare(
                "SELECT e.enrollment_id, c.course_id, c.course_name, c.course_code
                 FROM enrollment e
                 JOIN course c ON c.course_id = e.course_id
                 WHERE e.student_id = ?1
                 ORDER BY e.enrollment_id",
            )?;

            let enrollments = stmt
                .query_map(params![student_id], |row| {
                    Ok(EnrollmentView {
                        enrollment_id: row.get(0)?,
                        course_id: row.get(1)?,
                        course_name: row.get(2)?,
                        course_code: row.get(3)?,
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            if enrollments.is_empty() {
                return Err(RecordsErrorCode::NoEnrollments.into());
            }
            Ok(enrollments)
        })
    }

    /// Remove the enrollment for a (student, course) pair
    pub fn delete(&self, student_id: i64, course_id: i64) -> RecordsResult<()> {
        self.store.transaction(|tx| {
            let deleted = tx.execute(
                "DELETE FROM enrollment WHERE student_id = ?1 AND course_id = ?2",
                params![student_id, course_id],
            )?;

            if deleted == 0 {
                return Err(RecordsError::EnrollmentNotFound);
            }
            Ok(())
        })?;

        info!(event = "ENROLLMENT_DELETED", student_id, course_id);
        Ok(())
    }
}

fn pair_exists(conn: &Connection, student_id: i64, course_id: i64) -> rusqlite::Result<bool> {
    conn.query_row(
        "SELECT 1 FROM enrollment WHERE student_id = ?1 AND course_id = ?2",
        params![student_id, course_id],
        |_| Ok(()),
    )
    .optional()
    .map(|row| row.is_some())
}
