//! Snapshot validation for serialized workout collections.
//!
//! A snapshot is the bare-array JSON form of the full collection, as
//! written to the backup file and to export files. Validation is
//! intentionally shallow: each top-level workout must carry a string `id`,
//! `title` and `date` and an array-valued `muscleGroup`. Nested entities
//! are only constrained by the typed decode that follows, which fills in
//! defaults for missing fields but rejects mistyped ones.

use crate::workouts::Workout;
use serde_json::Value;
use thiserror::Error;

/// Parse a decoded JSON value into a workout collection.
pub fn parse_snapshot(value: Value) -> Result<Vec<Workout>, SnapshotError> {
    let items = value.as_array().ok_or(SnapshotError::NotAnArray)?;

    for (index, item) in items.iter().enumerate() {
        let entry = item.as_object().ok_or(SnapshotError::NotAnObject { index })?;

        for field in ["id", "title", "date"] {
            if !entry.get(field).is_some_and(Value::is_string) {
                return Err(SnapshotError::MissingField { index, field });
            }
        }

        if !entry.get("muscleGroup").is_some_and(Value::is_array) {
            return Err(SnapshotError::MissingMuscleGroups { index });
        }
    }

    serde_json::from_value(value).map_err(|e| SnapshotError::Decode(e.to_string()))
}

/// Reasons a snapshot is rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("snapshot is not an array")]
    NotAnArray,

    #[error("workout at index {index} is not an object")]
    NotAnObject { index: usize },

    #[error("workout at index {index} is missing a string `{field}` field")]
    MissingField { index: usize, field: &'static str },

    #[error("workout at index {index} is missing an array `muscleGroup` field")]
    MissingMuscleGroups { index: usize },

    #[error("snapshot failed to decode: {0}")]
    Decode(String),
}
