//! Test utilities for database setup.
//!
//! Provides helpers that reuse authoritative schema initialization,
//! eliminating schema duplication in test code.

use rusqlite::Connection;
use std::path::Path;
use tempfile::TempDir;

/// In-memory connection with the full schema, for unit tests that only
/// need SQL.
pub fn test_conn() -> Connection {
    let conn = Connection::open_in_memory().expect("open in-memory database");
    crate::db::schema::run_migrations(&conn).expect("run migrations");
    conn
}

/// Test environment with a file-backed database in a temporary directory,
/// ensuring automatic cleanup when dropped.
pub struct TestEnv {
    /// Temporary directory (kept alive for database file persistence)
    pub temp: TempDir,
    /// Connection with the full schema (all migrations)
    pub conn: Connection,
}

impl TestEnv {
    /// Create a test environment with the database initialized through
    /// `crate::db::schema::run_migrations()`.
    pub fn new() -> rusqlite::Result<Self> {
        let temp =
            TempDir::new().map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let db_path = temp.path().join("satzbau.db");
        let conn = Connection::open(&db_path)?;
        crate::db::schema::run_migrations(&conn)?;

        Ok(Self { temp, conn })
    }

    /// Get the temporary directory path for creating test files.
    pub fn path(&self) -> &Path {
        self.temp.path()
    }
}
