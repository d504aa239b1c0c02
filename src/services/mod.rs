//! Whole-collection CRUD services.
//!
//! Every operation is a read-modify-write over the full collection: load,
//! locate the target by id, mutate, save. The services trust their callers
//! to keep back-references consistent; the only integrity they check is
//! what their own lookups need.

pub mod exercise;
pub mod log;
pub mod muscle_group;
pub mod workout;

use crate::storage::store::StoreError;
use crate::workouts::{Exercise, Workout};
use thiserror::Error;

/// Service-level errors.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("workout not found")]
    WorkoutNotFound,

    #[error("muscle group not found")]
    MuscleGroupNotFound,

    #[error("exercise not found")]
    ExerciseNotFound,

    #[error("log not found")]
    LogNotFound,

    #[error("position out of range")]
    PositionOutOfRange,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Locate an exercise anywhere in the collection.
pub(crate) fn find_exercise_mut<'a>(
    workouts: &'a mut [Workout],
    exercise_id: &str,
) -> Option<&'a mut Exercise> {
    workouts
        .iter_mut()
        .flat_map(|w| w.muscle_group.iter_mut())
        .flat_map(|mg| mg.exercises.iter_mut())
        .find(|ex| ex.id == exercise_id)
}
