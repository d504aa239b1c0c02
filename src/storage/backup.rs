//! Best-effort durable backup of the workout collection.
//!
//! The backup file lives outside the primary store's engine, under the
//! platform documents directory, and exists purely for disaster recovery
//! (reinstall, primary-record corruption). It is never read on the normal
//! hot path.
//!
//! Writes go through a single-consumer queue: one worker task owns the
//! file, so at most one write is in flight and writes land in submit
//! order. A failed write is logged and swallowed without disturbing the
//! queue. Because each write replaces the whole snapshot asynchronously,
//! `restore` immediately after `submit` may observe the previous snapshot;
//! the queue guarantees ordering, not read-your-writes.

use crate::storage::snapshot::parse_snapshot;
use crate::workouts::Workout;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

/// Backup file location relative to the documents directory.
const BACKUP_RELATIVE_PATH: &str = "RepLog/replog-backup.json";

enum BackupJob {
    Write(Vec<Workout>),
    Flush(oneshot::Sender<()>),
}

/// Queued writer for the durable backup snapshot.
///
/// Constructed with `None` when the platform offers no durable documents
/// location; every operation is then a silent no-op returning nothing.
pub struct BackupWriter {
    tx: Option<mpsc::UnboundedSender<BackupJob>>,
    path: Option<PathBuf>,
}

impl BackupWriter {
    /// Create a backup writer rooted at the given documents directory,
    /// spawning its worker task. Must be called within a tokio runtime.
    pub fn new(documents_dir: Option<PathBuf>) -> Self {
        let Some(root) = documents_dir else {
            tracing::debug!("No durable documents location, backups disabled");
            return Self::disabled();
        };

        let path = root.join(BACKUP_RELATIVE_PATH);
        let (tx, mut rx) = mpsc::unbounded_channel();

        let worker_path = path.clone();
        tokio::spawn(async move {
            while let Some(job) = rx.recv().await {
                match job {
                    BackupJob::Write(snapshot) => {
                        if let Err(e) = write_snapshot(&worker_path, &snapshot).await {
                            tracing::warn!("Backup write failed: {}", e);
                        }
                    }
                    BackupJob::Flush(ack) => {
                        let _ = ack.send(());
                    }
                }
            }
        });

        Self {
            tx: Some(tx),
            path: Some(path),
        }
    }

    /// Create a writer with the backup capability absent.
    pub fn disabled() -> Self {
        Self {
            tx: None,
            path: None,
        }
    }

    /// Whether the backup capability is available.
    pub fn is_enabled(&self) -> bool {
        self.tx.is_some()
    }

    /// Enqueue a whole-snapshot write. Fire-and-forget: failures surface
    /// only in the log, and submission order is write order.
    pub fn submit(&self, snapshot: Vec<Workout>) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(BackupJob::Write(snapshot));
        }
    }

    /// Wait until every previously enqueued write has been applied.
    pub async fn flush(&self) {
        if let Some(tx) = &self.tx {
            let (ack, done) = oneshot::channel();
            if tx.send(BackupJob::Flush(ack)).is_ok() {
                let _ = done.await;
            }
        }
    }

    /// Read the backup snapshot back, validating it on the way in.
    ///
    /// Returns `None` when the capability is absent, the file is missing,
    /// the content fails to decode, or validation rejects it.
    pub async fn restore(&self) -> Option<Vec<Workout>> {
        let path = self.path.as_ref()?;

        let raw = tokio::fs::read(path).await.ok()?;
        let value: serde_json::Value = serde_json::from_slice(&raw).ok()?;

        match parse_snapshot(value) {
            Ok(workouts) => Some(workouts),
            Err(e) => {
                tracing::warn!("Backup snapshot rejected: {}", e);
                None
            }
        }
    }

    /// Probe for the backup file without reading it, returning its locator.
    pub async fn exists(&self) -> Option<PathBuf> {
        let path = self.path.as_ref()?;
        tokio::fs::metadata(path).await.ok()?;
        Some(path.clone())
    }
}

async fn write_snapshot(path: &Path, snapshot: &[Workout]) -> Result<(), BackupError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| BackupError::Io(e.to_string()))?;
    }

    let data = serde_json::to_vec(snapshot).map_err(|e| BackupError::Serialize(e.to_string()))?;

    tokio::fs::write(path, data)
        .await
        .map_err(|e| BackupError::Io(e.to_string()))?;

    Ok(())
}

/// Backup write errors. Never propagated past the worker; logged there.
#[derive(Debug, Error)]
pub enum BackupError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialize error: {0}")]
    Serialize(String),
}
