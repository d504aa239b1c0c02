//! Storage module: primary store, legacy bridge, backup and configuration.

pub mod backup;
pub mod config;
pub mod legacy;
pub mod restore;
pub mod snapshot;
pub mod store;

pub use backup::BackupWriter;
pub use config::{AppConfig, BackupSettings, Theme, UserPreferences, WeightUnit};
pub use legacy::{LegacyStore, LegacyStoreError, LEGACY_WORKOUTS_KEY};
pub use restore::seed_from_backup;
pub use snapshot::{parse_snapshot, SnapshotError};
pub use store::{StoreError, WorkoutStore};
