//! Workout-level operations.

use crate::services::ServiceError;
use crate::storage::store::WorkoutStore;
use crate::workouts::Workout;

/// List all workouts in display order.
pub async fn list_workouts(store: &mut WorkoutStore) -> Vec<Workout> {
    store.load().await
}

/// Look up a single workout.
pub async fn get_workout_by_id(store: &mut WorkoutStore, workout_id: &str) -> Option<Workout> {
    store
        .load()
        .await
        .into_iter()
        .find(|w| w.id == workout_id)
}

/// Append a new workout to the collection.
pub async fn add_workout(
    store: &mut WorkoutStore,
    title: &str,
    date: &str,
    user_id: &str,
) -> Result<Workout, ServiceError> {
    let mut workouts = store.load().await;
    let workout = Workout::new(title.trim(), date, user_id);
    workouts.push(workout.clone());
    store.save(&workouts).await?;

    tracing::debug!("Added workout {}", workout.id);
    Ok(workout)
}

/// Update a workout's title and date.
pub async fn update_workout(
    store: &mut WorkoutStore,
    workout_id: &str,
    title: &str,
    date: &str,
) -> Result<Workout, ServiceError> {
    let mut workouts = store.load().await;

    let workout = workouts
        .iter_mut()
        .find(|w| w.id == workout_id)
        .ok_or(ServiceError::WorkoutNotFound)?;
    workout.title = title.trim().to_string();
    workout.date = date.to_string();
    let updated = workout.clone();

    store.save(&workouts).await?;
    Ok(updated)
}

/// Remove a workout from the collection.
pub async fn delete_workout(store: &mut WorkoutStore, workout_id: &str) -> Result<(), ServiceError> {
    let mut workouts = store.load().await;

    let before = workouts.len();
    workouts.retain(|w| w.id != workout_id);
    if workouts.len() == before {
        return Err(ServiceError::WorkoutNotFound);
    }

    store.save(&workouts).await?;
    Ok(())
}

/// Move a workout to a new position. Reordering is a full-array rewrite.
pub async fn reorder_workouts(
    store: &mut WorkoutStore,
    previous_index: usize,
    current_index: usize,
) -> Result<(), ServiceError> {
    let mut workouts = store.load().await;

    if previous_index >= workouts.len() || current_index >= workouts.len() {
        return Err(ServiceError::PositionOutOfRange);
    }

    let moved = workouts.remove(previous_index);
    workouts.insert(current_index, moved);

    store.save(&workouts).await?;
    Ok(())
}

/// Replace the collection with an empty one.
pub async fn clear_all_workouts(store: &mut WorkoutStore) -> Result<(), ServiceError> {
    store.save(&[]).await?;
    tracing::info!("Cleared all workouts");
    Ok(())
}
