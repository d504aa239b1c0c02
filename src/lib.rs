//! RepLog - Personal Workout Tracker
//!
//! A local-first workout tracker: workouts, muscle groups, exercises and
//! logged sets persist entirely on the device as one collection. The
//! storage layer provides a single-record primary store, a one-time
//! migration bridge from the legacy key/value store, a queued best-effort
//! backup writer with startup restore, and full-collection export/import.

pub mod services;
pub mod storage;
pub mod transfer;
pub mod workouts;

// Re-export commonly used types
pub use storage::backup::BackupWriter;
pub use storage::config::AppConfig;
pub use storage::store::WorkoutStore;
pub use transfer::ImportOutcome;
pub use workouts::types::{Exercise, Log, MuscleGroup, Workout};
