//! # Course Directory
//!
//! CRUD over course rows. Course codes are unique across all courses, on
//! create and on update.

use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::errors::{map_unique, RecordsError, RecordsErrorCode, RecordsResult};
use super::store::Store;
use super::{non_blank, required};

/// A stored course
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Course {
    pub course_id: i64,
    pub course_name: String,
    pub course_code: String,
    pub course_description: Option<String>,
}

/// Create payload. Presence of required fields is checked by the directory.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewCourse {
    pub course_name: Option<String>,
    pub course_code: Option<String>,
    pub course_description: Option<String>,
}

/// Partial update payload. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CourseUpdate {
    pub course_name: Option<String>,
    pub course_code: Option<String>,
    pub course_description: Option<String>,
}

/// Owner of course records
#[derive(Clone)]
pub struct CourseDirectory {
    store: Store,
}

impl CourseDirectory {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Fetch one course
    pub fn get(&self, course_id: i64) -> RecordsResult<Course> {
        self.store.transaction(|tx| {
            find(tx, course_id)?.ok_or(RecordsError::Rejected(RecordsErrorCode::CourseNotFound))
        })
    }

    /// Create a course and return its new id
    pub fn create(&self, input: NewCourse) -> RecordsResult<i64> {
        let name = required(input.course_name, RecordsErrorCode::CourseNameRequired)?;
        let code = required(input.course_code, RecordsErrorCode::CourseCodeRequired)?;
        let description = input.course_description.unwrap_or_default();

        let course_id = self.store.transaction(|tx| {
            if code_taken(tx, &code, None)? {
                return Err(RecordsErrorCode::CourseExists.into());
            }

            tx.execute(
                "INSERT INTO course (course_name, course_code, course_description)
                 VALUES (?1, ?2, ?3)",
                params![name, code, description],
            )
            .map_err(|e| map_unique(e, RecordsErrorCode::CourseExists))?;

            Ok(tx.last_insert_rowid())
        })?;

        info!(event = "COURSE_CREATED", course_id, course_code = %code);
        Ok(course_id)
    }

    /// Overwrite the supplied fields of an existing course
    pub fn update(&self, course_id: i64, update: CourseUpdate) -> RecordsResult<()> {
        self.store.transaction(|tx| {
            let current =
                find(tx, course_id)?.ok_or(RecordsError::from(RecordsErrorCode::CourseNotFound))?;

            let name = non_blank(update.course_name, RecordsErrorCode::CourseNameRequired)?;
            let code = non_blank(update.course_code, RecordsErrorCode::CourseCodeRequired)?;

            if let Some(code) = &code {
                if code_taken(tx, code, Some(course_id))? {
                    return Err(RecordsErrorCode::CourseExists.into());
                }
            }

            tx.execute(
                "UPDATE course
                 SET course_name = ?1, course_code = ?2, course_description = ?3
                 WHERE course_id = ?4",
                params![
                    name.unwrap_or(current.course_name),
                    code.unwrap_or(current.course_code),
                    update.course_description.or(current.course_description),
                    course_id,
                ],
            )
            .map_err(|e| map_unique(e, RecordsErrorCode::CourseExists))?;

            Ok(())
        })?;

        info!(event = "COURSE_UPDATED", course_id);
        Ok(())
    }

    /// Delete a course. Its enrollments are removed with it.
    pub fn delete(&self, course_id: i64) -> RecordsResult<()> {
        let enrollments_removed = self.store.transaction(|tx| {
            let linked: i64 = tx.query_row(
                "SELECT COUNT(*) FROM enrollment WHERE course_id = ?1",
                params![course_id],
                |row| row.get(0),
            )?;

            let deleted = tx.execute("DELETE FROM course WHERE course_id = ?1", params![course_id])?;
            if deleted == 0 {
                return Err(RecordsErrorCode::CourseNotFound.into());
            }
            Ok(linked)
        })?;

        info!(event = "COURSE_DELETED", course_id, enrollments_removed);
        Ok(())
    }
}

/// Look up a course row by id
pub(crate) fn find(conn: &Connection, course_id: i64) -> rusqlite::Result<Option<Course>> {
    conn.query_row(
        "SELECT course_id, course_name, course_code, course_description
         FROM course WHERE course_id = ?1",
        params![course_id],
        |row| {
            Ok(Course {
                course_id: row.get(0)?,
                course_name: row.get(1)?,
                course_code: row.get(2)?,
                course_description: row.get(3)?,
            })
        },
    )
    .optional()
}

pub(crate) fn exists(conn: &Connection, course_id: i64) -> rusqlite::Result<bool> {
    conn.query_row(
        "SELECT 1 FROM course WHERE course_id = ?1",
        params![course_id],
        |_| Ok(()),
    )
    .optional()
    .map(|row| row.is_some())
}

/// True if another course (other than `except`) already uses `code`
fn code_taken(conn: &Connection, code: &str, except: Option<i64>) -> rusqlite::Result<bool> {
    conn.query_row(
        "SELECT 1 FROM course WHERE course_code = ?1 AND course_id IS NOT ?2",
        params![code, except],
        |_| Ok(()),
    )
    .optional()
    .map(|row| row.is_some())
}
