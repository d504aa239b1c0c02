//! Set-log operations within an exercise.

use crate::services::{find_exercise_mut, ServiceError};
use crate::storage::store::WorkoutStore;
use crate::workouts::types::mint_id;
use crate::workouts::{AddLog, Log, UpdateLog};

/// Log a set against an exercise, returning the minted log id.
pub async fn add_log(store: &mut WorkoutStore, model: AddLog) -> Result<String, ServiceError> {
    let mut workouts = store.load().await;

    let exercise = find_exercise_mut(&mut workouts, &model.exercise_id)
        .ok_or(ServiceError::ExerciseNotFound)?;

    let id = mint_id();
    exercise.log.push(Log {
        id: id.clone(),
        number_reps: model.number_reps,
        max_weight: model.max_weight,
        date: Some(model.date),
    });

    store.save(&workouts).await?;
    Ok(id)
}

/// Update a set's repetitions and weight. The timestamp is left untouched.
pub async fn update_log(store: &mut WorkoutStore, model: UpdateLog) -> Result<(), ServiceError> {
    let mut workouts = store.load().await;

    let exercise = find_exercise_mut(&mut workouts, &model.exercise_id)
        .ok_or(ServiceError::ExerciseNotFound)?;
    let log = exercise
        .log
        .iter_mut()
        .find(|l| l.id == model.log_id)
        .ok_or(ServiceError::LogNotFound)?;
    log.number_reps = model.number_reps;
    log.max_weight = model.max_weight;

    store.save(&workouts).await?;
    Ok(())
}

/// Remove a single set log from an exercise.
pub async fn delete_log(
    store: &mut WorkoutStore,
    exercise_id: &str,
    log_id: &str,
) -> Result<(), ServiceError> {
    let mut workouts = store.load().await;

    let exercise =
        find_exercise_mut(&mut workouts, exercise_id).ok_or(ServiceError::ExerciseNotFound)?;
    exercise.log.retain(|l| l.id != log_id);

    store.save(&workouts).await?;
    Ok(())
}

/// Remove every set log from an exercise.
pub async fn clear_all_logs(
    store: &mut WorkoutStore,
    exercise_id: &str,
) -> Result<(), ServiceError> {
    let mut workouts = store.load().await;

    let exercise =
        find_exercise_mut(&mut workouts, exercise_id).ok_or(ServiceError::ExerciseNotFound)?;
    exercise.log.clear();

    store.save(&workouts).await?;
    Ok(())
}
