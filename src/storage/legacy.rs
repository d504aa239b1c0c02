//! Legacy key/value store: the previous-generation storage engine.
//!
//! Early versions of the app kept everything under a single key in a small
//! synchronous SQLite key/value table. The store survives only so the
//! migration bridge in [`crate::storage::store`] can drain it; nothing
//! writes here after migration.

use rusqlite::{params, Connection, OptionalExtension};
use std::path::PathBuf;
use thiserror::Error;

/// The one key the app ever stored workouts under.
pub const LEGACY_WORKOUTS_KEY: &str = "replog_workouts";

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS kv (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
";

/// Synchronous key/value store over a single SQLite table.
pub struct LegacyStore {
    conn: Connection,
}

impl LegacyStore {
    /// Open or create the legacy database at the given path.
    pub fn open(path: &PathBuf) -> Result<Self, LegacyStoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| LegacyStoreError::Io(e.to_string()))?;
        }

        let conn = Connection::open(path)
            .map_err(|e| LegacyStoreError::ConnectionFailed(e.to_string()))?;

        let store = Self { conn };
        store.initialize()?;

        Ok(store)
    }

    /// Open an in-memory legacy store (for testing).
    pub fn open_in_memory() -> Result<Self, LegacyStoreError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| LegacyStoreError::ConnectionFailed(e.to_string()))?;

        let store = Self { conn };
        store.initialize()?;

        Ok(store)
    }

    fn initialize(&self) -> Result<(), LegacyStoreError> {
        self.conn
            .execute_batch(SCHEMA)
            .map_err(|e| LegacyStoreError::QueryFailed(e.to_string()))
    }

    /// Read the raw payload stored under a key.
    pub fn get(&self, key: &str) -> Result<Option<String>, LegacyStoreError> {
        self.conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()
            .map_err(|e| LegacyStoreError::QueryFailed(e.to_string()))
    }

    /// Write a raw payload under a key, replacing any previous value.
    pub fn set(&self, key: &str, value: &str) -> Result<(), LegacyStoreError> {
        self.conn
            .execute(
                "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
                params![key, value],
            )
            .map_err(|e| LegacyStoreError::QueryFailed(e.to_string()))?;

        Ok(())
    }

    /// Remove a key. Removing an absent key is not an error.
    pub fn remove(&self, key: &str) -> Result<(), LegacyStoreError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])
            .map_err(|e| LegacyStoreError::QueryFailed(e.to_string()))?;

        Ok(())
    }
}

/// Legacy store errors.
#[derive(Debug, Error)]
pub enum LegacyStoreError {
    #[error("Failed to open legacy store: {0}")]
    ConnectionFailed(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_returns_none_for_missing_key() {
        let store = LegacyStore::open_in_memory().unwrap();
        assert!(store.get(LEGACY_WORKOUTS_KEY).unwrap().is_none());
    }

    #[test]
    fn set_then_get_round_trips() {
        let store = LegacyStore::open_in_memory().unwrap();
        store.set(LEGACY_WORKOUTS_KEY, "[]").unwrap();
        assert_eq!(
            store.get(LEGACY_WORKOUTS_KEY).unwrap().as_deref(),
            Some("[]")
        );
    }

    #[test]
    fn set_replaces_previous_value() {
        let store = LegacyStore::open_in_memory().unwrap();
        store.set("k", "one").unwrap();
        store.set("k", "two").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("two"));
    }

    #[test]
    fn remove_clears_the_slot_and_is_idempotent() {
        let store = LegacyStore::open_in_memory().unwrap();
        store.set("k", "v").unwrap();
        store.remove("k").unwrap();
        assert!(store.get("k").unwrap().is_none());
        store.remove("k").unwrap();
    }
}
