//! Database layer for the patient registry.

mod patients;
mod schema;

pub use schema::*;

use std::path::Path;

use rusqlite::Connection;
use thiserror::Error;
use tracing::debug;

/// Database errors.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("a record with national ID {0} already exists")]
    Duplicate(String),
}

pub type DbResult<T> = Result<T, DbError>;

/// Database connection wrapper. Opened once at startup and closed when
/// dropped at shutdown; every mutation is a single autocommitted statement.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open database at path, creating file and schema if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        debug!(path = %path.as_ref().display(), "opening patient database");
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Create in-memory database (for testing).
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Initialize schema.
    fn initialize(&self) -> DbResult<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Get raw connection (for advanced queries).
    pub fn conn(&self) -> &Connection {
        &self.conn
    }
}
