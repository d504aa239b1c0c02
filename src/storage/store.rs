//! Primary workout store: one logical record holding the full collection.
//!
//! The store is a session object constructed once at process start and
//! passed by reference to every consumer; `&mut self` on the write paths
//! keeps the process to a single logical writer. The collection persists
//! as a single JSON document `{ "id": "workouts", "workouts": [...] }`
//! under the app data directory.
//!
//! The first `load` of a session also runs the legacy-store bridge: a
//! one-time drain of the pre-migration key/value slot into the primary
//! record. The bridge's done-flag lives on the session, never a global.

use crate::storage::backup::BackupWriter;
use crate::storage::legacy::{LegacyStore, LegacyStoreError, LEGACY_WORKOUTS_KEY};
use crate::workouts::Workout;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Primary record file name under the data directory.
const RECORD_FILE: &str = "replog-db.json";

/// Fixed identifier of the one logical record.
const DATA_RECORD_KEY: &str = "workouts";

/// On-disk shape of the primary record.
#[derive(Serialize, Deserialize)]
struct StoredRecord {
    id: String,
    workouts: Vec<Workout>,
}

/// Store session for the workout collection.
pub struct WorkoutStore {
    record_path: PathBuf,
    legacy: LegacyStore,
    backup: BackupWriter,
    migrated: bool,
}

impl WorkoutStore {
    /// Create a store session from its parts.
    pub fn new(record_path: PathBuf, legacy: LegacyStore, backup: BackupWriter) -> Self {
        Self {
            record_path,
            legacy,
            backup,
            migrated: false,
        }
    }

    /// Open a store session rooted at the given data directory, with the
    /// primary record and legacy database in their conventional places.
    pub fn open(data_dir: &Path, backup: BackupWriter) -> Result<Self, StoreError> {
        let legacy = LegacyStore::open(&data_dir.join("legacy.db"))?;
        Ok(Self::new(data_dir.join(RECORD_FILE), legacy, backup))
    }

    /// The backup writer attached to this session.
    pub fn backup(&self) -> &BackupWriter {
        &self.backup
    }

    /// Load the full collection.
    ///
    /// Fails soft: a missing record yields an empty collection, and any
    /// read or decode error is logged and also yields an empty collection.
    /// The first call in the session triggers the legacy bridge; if the
    /// bridge fails it is retried on the next call.
    pub async fn load(&mut self) -> Vec<Workout> {
        if !self.migrated {
            match self.run_legacy_bridge().await {
                Ok(()) => self.migrated = true,
                Err(e) => {
                    tracing::warn!("Legacy migration failed, will retry on next load: {}", e);
                }
            }
        }

        match self.read_record().await {
            Ok(workouts) => workouts,
            Err(e) => {
                tracing::warn!("Failed to load workout collection: {}", e);
                Vec::new()
            }
        }
    }

    /// Persist the full collection, then hand the same snapshot to the
    /// backup writer. The backup is fire-and-forget: its failure can never
    /// fail the save.
    pub async fn save(&mut self, workouts: &[Workout]) -> Result<(), StoreError> {
        self.write_record(workouts).await?;
        self.backup.submit(workouts.to_vec());
        Ok(())
    }

    /// Restore-only write path: persists without triggering a backup, so
    /// seeding from a backup snapshot cannot start a restore→backup loop.
    pub async fn seed(&mut self, workouts: Vec<Workout>) -> Result<(), StoreError> {
        self.write_record(&workouts).await
    }

    /// Drain the legacy slot into the primary record, at most once.
    ///
    /// Primary data wins: when the record is already non-empty the legacy
    /// payload is discarded. The slot is cleared in either case, and only
    /// after the outcome is durable, so a crash mid-bridge is retried
    /// safely on the next load.
    async fn run_legacy_bridge(&mut self) -> Result<(), StoreError> {
        let raw = match self.legacy.get(LEGACY_WORKOUTS_KEY)? {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => return Ok(()),
        };

        let payload: Vec<Workout> =
            serde_json::from_str(&raw).map_err(|e| StoreError::Deserialize(e.to_string()))?;
        if payload.is_empty() {
            return Ok(());
        }

        let current = self.read_record().await?;
        if current.is_empty() {
            self.write_record(&payload).await?;
            tracing::info!("Migrated {} workouts from the legacy store", payload.len());
        } else {
            tracing::info!("Primary store already populated, discarding legacy payload");
        }

        self.legacy.remove(LEGACY_WORKOUTS_KEY)?;
        Ok(())
    }

    async fn read_record(&self) -> Result<Vec<Workout>, StoreError> {
        let raw = match tokio::fs::read(&self.record_path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::Io(e.to_string())),
        };

        let record: StoredRecord =
            serde_json::from_slice(&raw).map_err(|e| StoreError::Deserialize(e.to_string()))?;

        Ok(record.workouts)
    }

    async fn write_record(&self, workouts: &[Workout]) -> Result<(), StoreError> {
        if let Some(parent) = self.record_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::Io(e.to_string()))?;
        }

        let record = StoredRecord {
            id: DATA_RECORD_KEY.to_string(),
            workouts: workouts.to_vec(),
        };
        let data = serde_json::to_vec(&record).map_err(|e| StoreError::Serialize(e.to_string()))?;

        tokio::fs::write(&self.record_path, data)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?;

        Ok(())
    }
}

/// Primary store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialize error: {0}")]
    Serialize(String),

    #[error("Deserialize error: {0}")]
    Deserialize(String),

    #[error(transparent)]
    Legacy(#[from] LegacyStoreError),
}
