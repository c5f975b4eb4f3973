//! # Student Directory
//!
//! CRUD over student rows, keyed by a unique roll number.

use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::errors::{map_unique, RecordsError, RecordsErrorCode, RecordsResult};
use super::store::Store;
use super::{non_blank, required};

/// A stored student
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Student {
    pub student_id: i64,
    pub roll_number: String,
    pub first_name: String,
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewStudent {
    pub roll_number: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentUpdate {
    pub roll_number: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Owner of student records
#[derive(Clone)]
pub struct StudentDirectory {
    store: Store,
}

impl StudentDirectory {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn get(&self, student_id: i64) -> RecordsResult<Student> {
        self.store.transaction(|tx| {
            find(tx, student_id)?.ok_or(RecordsError::Rejected(RecordsErrorCode::StudentNotFound))
        })
    }

    /// Register a student and return the new id
    pub fn create(&self, input: NewStudent) -> RecordsResult<i64> {
        let roll_number = required(input.roll_number, RecordsErrorCode::RollNumberRequired)?;
        let first_name = required(input.first_name, RecordsErrorCode::FirstNameRequired)?;
        let last_name = input.last_name.unwrap_or_default();

        let student_id = self.store.transaction(|tx| {
            if roll_number_taken(tx, &roll_number, None)? {
                return Err(RecordsErrorCode::StudentExists.into());
            }

            tx.execute(
                "INSERT INTO student (roll_number, first_name, last_name) VALUES (?1, ?2, ?3)",
                params![roll_number, first_name, last_name],
            )
            .map_err(|e| map_unique(e, RecordsErrorCode::StudentExists))?;

            Ok(tx.last_insert_rowid())
        })?;

        info!(event = "STUDENT_CREATED", student_id, roll_number = %roll_number);
        Ok(student_id)
    }

    pub fn update(&self, student_id: i64, update: StudentUpdate) -> RecordsResult<()> {
        self.store.transaction(|tx| {
            let current = find(tx, student_id)?
                .ok_or(RecordsError::from(RecordsErrorCode::StudentNotFound))?;

            let roll_number = non_blank(update.roll_number, RecordsErrorCode::RollNumberRequired)?;
            let first_name = non_blank(update.first_name, RecordsErrorCode::FirstNameRequired)?;

            if let Some(roll_number) = &roll_number {
                if roll_number_taken(tx, roll_number, Some(student_id))? {
                    return Err(RecordsErrorCode::StudentExists.into());
                }
            }

            tx.execute(
                "UPDATE student SET roll_number = ?1, first_name = ?2, last_name = ?3
                 WHERE student_id = ?4",
                params![
                    roll_number.unwrap_or(current.roll_number),
                    first_name.unwrap_or(current.first_name),
                    update.last_name.or(current.last_name),
                    student_id,
                ],
            )
            .map_err(|e| map_unique(e, RecordsErrorCode::StudentExists))?;

            Ok(())
        })?;

        info!(event = "STUDENT_UPDATED", student_id);
        Ok(())
    }

    /// Delete a student together with their enrollments
    pub fn delete(&self, student_id: i64) -> RecordsResult<()> {
        let enrollments_removed = self.store.transaction(|tx| {
            let linked: i64 = tx.query_row(
                "SELECT COUNT(*) FROM enrollment WHERE student_id = ?1",
                params![student_id],
                |row| row.get(0),
            )?;

            if tx.execute("DELETE FROM student WHERE student_id = ?1", params![student_id])? == 0 {
                return Err(RecordsErrorCode::StudentNotFound.into());
            }
            Ok(linked)
        })?;

        info!(event = "STUDENT_DELETED", student_id, enrollments_removed);
        Ok(())
    }
}

pub(crate) fn find(conn: &Connection, student_id: i64) -> rusqlite::Result<Option<Student>> {
    conn.query_row(
        "SELECT student_id, roll_number, first_name, last_name
         FROM student WHERE student_id = ?1",
        params![student_id],
        |row| {
            Ok(Student {
                student_id: row.get(0)?,
                roll_number: row.get(1)?,
                first_name: row.get(2)?,
                last_name: row.get(3)?,
            })
        },
    )
    .optional()
}

pub(crate) fn exists(conn: &Connection, student_id: i64) -> rusqlite::Result<bool> {
    Ok(find(conn, student_id)?.is_some())
}

fn roll_number_taken(
    conn: &Connection,
    roll_number: &str,
    except: Option<i64>,
) -> rusqlite::Result<bool> {
    conn.query_row(
        "SELECT 1 FROM student WHERE roll_number = ?1 AND student_id IS NOT ?2",
        params![roll_number, except],
        |_| Ok(()),
    )
    .optional()
    .map(|row| row.is_some())
}
