//! Workout, muscle group, exercise and set-log types.
//!
//! The structs here are the wire format: the primary record, the legacy
//! slot, the backup file and export files all serialize these with
//! camelCase field names. Every struct decodes with defaults for missing
//! fields so snapshots written by older app versions still load.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Mint a fresh opaque identifier. Identifiers are never reused.
pub fn mint_id() -> String {
    Uuid::new_v4().to_string()
}

/// A root workout aggregate: the unit of top-level collection membership.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Workout {
    /// Opaque unique identifier
    pub id: String,
    /// Display title
    pub title: String,
    /// Display date, kept verbatim as entered
    pub date: String,
    /// Owning-user reference
    pub user_id: String,
    /// Ordered muscle groups; array order is display order
    pub muscle_group: Vec<MuscleGroup>,
}

impl Workout {
    /// Create a new workout with a minted id and no muscle groups.
    pub fn new(
        title: impl Into<String>,
        date: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            id: mint_id(),
            title: title.into(),
            date: date.into(),
            user_id: user_id.into(),
            muscle_group: Vec::new(),
        }
    }
}

/// A muscle group within a workout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MuscleGroup {
    /// Opaque unique identifier
    pub id: String,
    /// Back-reference to the owning workout
    pub workout_id: String,
    /// Display title
    pub title: String,
    /// Display date, kept verbatim as entered
    pub date: String,
    /// Ordered exercises; array order is display order
    pub exercises: Vec<Exercise>,
}

/// An exercise within a muscle group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Exercise {
    /// Opaque unique identifier
    pub id: String,
    /// Back-reference to the owning muscle group
    pub muscle_group_id: String,
    /// Display title
    pub title: String,
    /// Ordered set logs; array order is display order
    pub log: Vec<Log>,
}

/// One logged set: repetitions and the heaviest weight moved.
///
/// `date` is optional only because records written before timestamps were
/// introduced have none; the exercise-lookup path backfills and persists a
/// timestamp the first time such a record is read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Log {
    /// Opaque unique identifier
    pub id: String,
    /// Number of repetitions (positive)
    pub number_reps: u32,
    /// Max weight for the set (non-negative)
    pub max_weight: f64,
    /// When the set was logged
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
}

/// Input model for creating a muscle group, optionally with initial exercises.
#[derive(Debug, Clone)]
pub struct CreateMuscleGroup {
    /// Target workout
    pub workout_id: String,
    /// Muscle group title
    pub title: String,
    /// Display date
    pub date: String,
    /// Initial exercises to create alongside the group
    pub exercises: Vec<CreateExercise>,
}

/// Input model for an exercise created together with its muscle group.
#[derive(Debug, Clone)]
pub struct CreateExercise {
    /// Exercise title
    pub title: String,
}

/// Input model for logging a set against an exercise.
#[derive(Debug, Clone)]
pub struct AddLog {
    /// Target exercise
    pub exercise_id: String,
    /// Number of repetitions
    pub number_reps: u32,
    /// Max weight for the set
    pub max_weight: f64,
    /// When the set was performed
    pub date: DateTime<Utc>,
}

/// Input model for updating an existing set log.
#[derive(Debug, Clone)]
pub struct UpdateLog {
    /// Exercise the log belongs to
    pub exercise_id: String,
    /// Log to update
    pub log_id: String,
    /// New repetition count
    pub number_reps: u32,
    /// New max weight
    pub max_weight: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workout_serializes_with_camel_case_wire_names() {
        let mut workout = Workout::new("Leg Day", "2026-01-01", "user-1");
        workout.muscle_group.push(MuscleGroup {
            id: mint_id(),
            workout_id: workout.id.clone(),
            title: "Quads".to_string(),
            date: "2026-01-01".to_string(),
            exercises: vec![],
        });

        let json = serde_json::to_value(&workout).unwrap();
        assert!(json.get("userId").is_some());
        assert!(json.get("muscleGroup").is_some());
        assert_eq!(json["muscleGroup"][0]["workoutId"], json["id"]);
    }

    #[test]
    fn log_without_date_round_trips_as_none() {
        let raw = r#"{"id":"l1","numberReps":5,"maxWeight":40}"#;
        let log: Log = serde_json::from_str(raw).unwrap();
        assert_eq!(log.number_reps, 5);
        assert!(log.date.is_none());

        // A dateless log must not serialize a null date field.
        let json = serde_json::to_value(&log).unwrap();
        assert!(json.get("date").is_none());
    }

    #[test]
    fn sparse_legacy_workout_decodes_with_defaults() {
        let raw = r#"[{"id":"w1","title":"Leg Day","date":"2026-01-01","muscleGroup":[]}]"#;
        let workouts: Vec<Workout> = serde_json::from_str(raw).unwrap();
        assert_eq!(workouts[0].title, "Leg Day");
        assert_eq!(workouts[0].user_id, "");
    }

    #[test]
    fn minted_ids_are_unique() {
        assert_ne!(mint_id(), mint_id());
    }
}
