//! Startup restore: re-seed an empty primary store from the backup file.
//!
//! Runs once at application startup, before any data-dependent command.
//! Live data always wins: a populated primary store is never overwritten
//! by a backup. No failure here may block startup, so every error is
//! logged and swallowed.

use crate::storage::store::WorkoutStore;

/// Seed the primary store from the backup snapshot when, and only when,
/// the primary store is empty.
pub async fn seed_from_backup(store: &mut WorkoutStore) {
    if !store.load().await.is_empty() {
        return;
    }

    let Some(snapshot) = store.backup().restore().await else {
        return;
    };
    if snapshot.is_empty() {
        return;
    }

    let count = snapshot.len();
    match store.seed(snapshot).await {
        Ok(()) => tracing::info!("Restored {} workouts from backup", count),
        Err(e) => tracing::warn!("Failed to seed primary store from backup: {}", e),
    }
}
