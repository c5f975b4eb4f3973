//! # Relational Store
//!
//! Shared SQLite handle injected into every directory and the ledger.
//!
//! All access goes through [`Store::transaction`], which holds the single
//! connection for the duration of the closure and wraps it in an
//! `IMMEDIATE` transaction. Existence checks and the write that follows them
//! therefore see the same snapshot and cannot interleave with another request.

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rusqlite::{Connection, Transaction, TransactionBehavior};

use super::errors::{RecordsError, RecordsResult};

/// Busy timeout for the store connection
const BUSY_TIMEOUT_SECS: u64 = 5;

/// Table definitions, created at startup when missing
const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS course (
    course_id INTEGER PRIMARY KEY AUTOINCREMENT,
    course_name TEXT NOT NULL,
    course_code TEXT NOT NULL UNIQUE,
    course_description TEXT
);

CREATE TABLE IF NOT EXISTS student (
    student_id INTEGER PRIMARY KEY AUTOINCREMENT,
    roll_number TEXT NOT NULL UNIQUE,
    first_name TEXT NOT NULL,
    last_name TEXT
);

CREATE TABLE IF NOT EXISTS enrollment (
    enrollment_id INTEGER PRIMARY KEY AUTOINCREMENT,
    student_id INTEGER NOT NULL REFERENCES student(student_id) ON DELETE CASCADE,
    course_id INTEGER NOT NULL REFERENCES course(course_id) ON DELETE CASCADE,
    UNIQUE (student_id, course_id)
);

CREATE INDEX IF NOT EXISTS idx_enrollment_course ON enrollment(course_id);
";

/// Handle to the relational store
#[derive(Clone)]
pub struct Store {
    conn: Arc<Mutex<Connection>>,
}

impl Store {
    /// Open (or create) a database file and ensure the schema exists
    pub fn open(path: impl AsRef<Path>) -> RecordsResult<Self> {
        let conn = Connection::open(path.as_ref())?;
        conn.query_row("PRAGMA journal_mode=WAL;", [], |_| Ok(()))?;
        Self::from_connection(conn)
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> RecordsResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> RecordsResult<Self> {
        conn.busy_timeout(Duration::from_secs(BUSY_TIMEOUT_SECS))?;
        conn.execute("PRAGMA foreign_keys=ON;", [])?;
        conn.execute_batch(SCHEMA)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run `f` inside a single transaction.
    ///
    /// Commits when `f` returns `Ok`, rolls back otherwise.
    pub fn transaction<F, R>(&self, f: F) -> RecordsResult<R>
    where
        F: FnOnce(&Transaction<'_>) -> RecordsResult<R>,
    {
        let mut conn = self.conn.lock().map_err(|_| RecordsError::StorePoisoned)?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        // Dropping an uncommitted transaction rolls it back.
        let value = f(&tx)?;
        tx.commit()?;
        Ok(value)
    }
}
