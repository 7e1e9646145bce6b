//! Durable completion record.
//!
//! A single string-keyed slot holding the last completion timestamp as an
//! RFC 3339 string. Written once per completion (superseding any prior
//! value, never cleared), read once at application start. Concurrent
//! writers are deliberately uncoordinated: last writer wins.

use std::path::Path;

use rusqlite::{params, Connection};

use super::data_dir;
use crate::error::StorageError;

/// Fixed key identifying the last-completed timestamp.
pub const LAST_COMPLETED_KEY: &str = "dailyhold_last_completed";

/// Key-value port for the persisted completion record.
///
/// Injected into the session controller so daily gating is testable
/// without a real storage backend. Both operations may fail; callers
/// treat a failed read as "no record" and a failed write as "skipped".
pub trait CompletionStore {
    fn read_last_completed(&self) -> Result<Option<String>, StorageError>;
    fn write_last_completed(&self, value: &str) -> Result<(), StorageError>;
}

/// SQLite database at `~/.config/dailyhold/dailyhold.db`.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database, creating file and schema if needed.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StorageError> {
        let path = data_dir()?.join("dailyhold.db");
        Self::open_at(&path)
    }

    /// Open a database at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// In-memory database for tests.
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::QueryFailed(e.to_string()))?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), StorageError> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS kv (
                    key TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                );",
            )
            .map_err(|e| StorageError::MigrationFailed(e.to_string()))
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Set a value in the kv store, superseding any prior value.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }
}

impl CompletionStore for Database {
    fn read_last_completed(&self) -> Result<Option<String>, StorageError> {
        self.kv_get(LAST_COMPLETED_KEY)
    }

    fn write_last_completed(&self, value: &str) -> Result<(), StorageError> {
        self.kv_set(LAST_COMPLETED_KEY, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kv_store_roundtrip() {
        let db = Database::open_memory().unwrap();
        assert!(db.kv_get("test").unwrap().is_none());
        db.kv_set("test", "hello").unwrap();
        assert_eq!(db.kv_get("test").unwrap().unwrap(), "hello");
    }

    #[test]
    fn completion_record_is_superseded_not_appended() {
        let db = Database::open_memory().unwrap();
        assert!(db.read_last_completed().unwrap().is_none());
        db.write_last_completed("2026-03-14T09:26:53+00:00").unwrap();
        db.write_last_completed("2026-03-15T10:00:00+00:00").unwrap();
        assert_eq!(
            db.read_last_completed().unwrap().unwrap(),
            "2026-03-15T10:00:00+00:00"
        );
        let count: i64 = db
            .conn
            .query_row("SELECT COUNT(*) FROM kv", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dailyhold.db");
        {
            let db = Database::open_at(&path).unwrap();
            db.write_last_completed("2026-03-14T09:26:53+00:00").unwrap();
        }
        let db = Database::open_at(&path).unwrap();
        assert_eq!(
            db.read_last_completed().unwrap().unwrap(),
            "2026-03-14T09:26:53+00:00"
        );
    }
}
