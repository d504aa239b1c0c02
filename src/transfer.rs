//! Full-collection export and merge-import.
//!
//! Export produces a shareable, pretty-printed JSON array of workouts with
//! the current date in the filename. Import is strictly additive: incoming
//! workouts whose id already exists are dropped, surviving ones are
//! appended in their original order.

use crate::storage::snapshot::parse_snapshot;
use crate::storage::store::{StoreError, WorkoutStore};
use crate::workouts::Workout;
use chrono::{Local, NaiveDate};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Outcome of a merge-import.
#[derive(Debug, PartialEq, Eq)]
pub enum ImportOutcome {
    /// Workouts were appended to the collection.
    Imported { count: usize },
    /// Every incoming workout id already existed; nothing changed.
    AllDuplicates,
    /// The file did not parse or failed snapshot validation.
    InvalidFile,
}

/// Write the full collection to a dated export file under `dir`.
///
/// Returns `None` when the collection is empty (nothing to export),
/// otherwise the path of the written file, ready for sharing.
pub fn prepare_export(
    workouts: &[Workout],
    dir: &Path,
) -> Result<Option<PathBuf>, TransferError> {
    if workouts.is_empty() {
        return Ok(None);
    }

    let path = dir.join(export_file_name(Local::now().date_naive()));
    let content =
        serde_json::to_string_pretty(workouts).map_err(|e| TransferError::Serialize(e.to_string()))?;

    std::fs::create_dir_all(dir).map_err(|e| TransferError::Io(e.to_string()))?;
    std::fs::write(&path, content).map_err(|e| TransferError::Io(e.to_string()))?;

    tracing::info!("Exported {} workouts to {}", workouts.len(), path.display());
    Ok(Some(path))
}

/// Merge the contents of an export file into the collection.
pub async fn import_workouts(
    store: &mut WorkoutStore,
    contents: &str,
) -> Result<ImportOutcome, TransferError> {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(contents) else {
        return Ok(ImportOutcome::InvalidFile);
    };

    let incoming = match parse_snapshot(value) {
        Ok(workouts) => workouts,
        Err(e) => {
            tracing::warn!("Import file rejected: {}", e);
            return Ok(ImportOutcome::InvalidFile);
        }
    };

    let mut workouts = store.load().await;
    let existing: HashSet<&str> = workouts.iter().map(|w| w.id.as_str()).collect();

    let fresh: Vec<Workout> = incoming
        .into_iter()
        .filter(|w| !existing.contains(w.id.as_str()))
        .collect();

    if fresh.is_empty() {
        return Ok(ImportOutcome::AllDuplicates);
    }

    let count = fresh.len();
    workouts.extend(fresh);
    store.save(&workouts).await?;

    tracing::info!("Imported {} new workouts", count);
    Ok(ImportOutcome::Imported { count })
}

fn export_file_name(date: NaiveDate) -> String {
    format!("replog-backup-{}.json", date.format("%Y-%m-%d"))
}

/// Export/import errors.
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialize error: {0}")]
    Serialize(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}
