//! Muscle-group operations within a workout.

use crate::services::ServiceError;
use crate::storage::store::WorkoutStore;
use crate::workouts::types::mint_id;
use crate::workouts::{CreateMuscleGroup, Exercise, MuscleGroup};

fn build_muscle_group(model: &CreateMuscleGroup) -> MuscleGroup {
    let muscle_group_id = mint_id();
    MuscleGroup {
        id: muscle_group_id.clone(),
        workout_id: model.workout_id.clone(),
        title: model.title.trim().to_string(),
        date: model.date.clone(),
        exercises: model
            .exercises
            .iter()
            .map(|item| Exercise {
                id: mint_id(),
                muscle_group_id: muscle_group_id.clone(),
                title: item.title.trim().to_string(),
                log: Vec::new(),
            })
            .collect(),
    }
}

/// Add one muscle group, with any initial exercises, to its workout.
pub async fn add_muscle_group(
    store: &mut WorkoutStore,
    model: CreateMuscleGroup,
) -> Result<MuscleGroup, ServiceError> {
    let mut workouts = store.load().await;

    let workout = workouts
        .iter_mut()
        .find(|w| w.id == model.workout_id)
        .ok_or(ServiceError::WorkoutNotFound)?;

    let group = build_muscle_group(&model);
    workout.muscle_group.push(group.clone());

    store.save(&workouts).await?;
    Ok(group)
}

/// Add a batch of muscle groups to one workout in a single save.
pub async fn add_muscle_groups(
    store: &mut WorkoutStore,
    models: Vec<CreateMuscleGroup>,
) -> Result<Vec<MuscleGroup>, ServiceError> {
    if models.is_empty() {
        return Ok(Vec::new());
    }

    let mut workouts = store.load().await;
    let workout_id = models[0].workout_id.clone();

    let workout = workouts
        .iter_mut()
        .find(|w| w.id == workout_id)
        .ok_or(ServiceError::WorkoutNotFound)?;

    let groups: Vec<MuscleGroup> = models.iter().map(build_muscle_group).collect();
    workout.muscle_group.extend(groups.clone());

    store.save(&workouts).await?;
    Ok(groups)
}

/// List the muscle groups of a workout in display order.
pub async fn get_muscle_groups_by_workout_id(
    store: &mut WorkoutStore,
    workout_id: &str,
) -> Vec<MuscleGroup> {
    store
        .load()
        .await
        .into_iter()
        .find(|w| w.id == workout_id)
        .map(|w| w.muscle_group)
        .unwrap_or_default()
}

/// Look up a muscle group anywhere in the collection.
pub async fn get_muscle_group_by_id(
    store: &mut WorkoutStore,
    muscle_group_id: &str,
) -> Option<MuscleGroup> {
    store
        .load()
        .await
        .into_iter()
        .flat_map(|w| w.muscle_group)
        .find(|mg| mg.id == muscle_group_id)
}

/// Update a muscle group's title and date.
pub async fn update_muscle_group(
    store: &mut WorkoutStore,
    muscle_group_id: &str,
    title: &str,
    date: &str,
) -> Result<MuscleGroup, ServiceError> {
    let mut workouts = store.load().await;

    let group = workouts
        .iter_mut()
        .flat_map(|w| w.muscle_group.iter_mut())
        .find(|mg| mg.id == muscle_group_id)
        .ok_or(ServiceError::MuscleGroupNotFound)?;
    group.title = title.trim().to_string();
    group.date = date.to_string();
    let updated = group.clone();

    store.save(&workouts).await?;
    Ok(updated)
}

/// Remove a muscle group from its workout.
pub async fn delete_muscle_group(
    store: &mut WorkoutStore,
    muscle_group_id: &str,
) -> Result<(), ServiceError> {
    let mut workouts = store.load().await;

    let workout = workouts
        .iter_mut()
        .find(|w| w.muscle_group.iter().any(|mg| mg.id == muscle_group_id))
        .ok_or(ServiceError::MuscleGroupNotFound)?;
    workout.muscle_group.retain(|mg| mg.id != muscle_group_id);

    store.save(&workouts).await?;
    Ok(())
}

/// Move a muscle group to a new position within its workout.
pub async fn reorder_muscle_groups(
    store: &mut WorkoutStore,
    workout_id: &str,
    previous_index: usize,
    current_index: usize,
) -> Result<(), ServiceError> {
    let mut workouts = store.load().await;

    let workout = workouts
        .iter_mut()
        .find(|w| w.id == workout_id)
        .ok_or(ServiceError::WorkoutNotFound)?;

    if previous_index >= workout.muscle_group.len() || current_index >= workout.muscle_group.len() {
        return Err(ServiceError::PositionOutOfRange);
    }

    let moved = workout.muscle_group.remove(previous_index);
    workout.muscle_group.insert(current_index, moved);

    store.save(&workouts).await?;
    Ok(())
}

/// Remove every muscle group from a workout.
pub async fn clear_all_muscle_groups(
    store: &mut WorkoutStore,
    workout_id: &str,
) -> Result<(), ServiceError> {
    let mut workouts = store.load().await;

    let workout = workouts
        .iter_mut()
        .find(|w| w.id == workout_id)
        .ok_or(ServiceError::WorkoutNotFound)?;
    workout.muscle_group.clear();

    store.save(&workouts).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::workout::add_workout;
    use crate::storage::backup::BackupWriter;
    use crate::storage::legacy::LegacyStore;
    use crate::workouts::CreateExercise;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> WorkoutStore {
        WorkoutStore::new(
            dir.path().join("replog-db.json"),
            LegacyStore::open_in_memory().unwrap(),
            BackupWriter::disabled(),
        )
    }

    fn group_for(workout_id: &str, title: &str, exercises: &[&str]) -> CreateMuscleGroup {
        CreateMuscleGroup {
            workout_id: workout_id.to_string(),
            title: title.to_string(),
            date: "2026-01-01".to_string(),
            exercises: exercises
                .iter()
                .map(|t| CreateExercise {
                    title: t.to_string(),
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn add_creates_the_group_with_back_references() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let workout = add_workout(&mut store, "Legs", "2026-01-01", "u1")
            .await
            .unwrap();

        let group = add_muscle_group(&mut store, group_for(&workout.id, "Quads", &["Squat"]))
            .await
            .unwrap();
        assert_eq!(group.workout_id, workout.id);
        assert_eq!(group.exercises.len(), 1);
        assert_eq!(group.exercises[0].muscle_group_id, group.id);

        let groups = get_muscle_groups_by_workout_id(&mut store, &workout.id).await;
        assert_eq!(groups, vec![group]);
    }

    #[tokio::test]
    async fn batch_add_lands_in_order_with_a_single_save() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let workout = add_workout(&mut store, "Full Body", "2026-01-01", "u1")
            .await
            .unwrap();

        let groups = add_muscle_groups(
            &mut store,
            vec![
                group_for(&workout.id, "Chest", &[]),
                group_for(&workout.id, "Back", &[]),
            ],
        )
        .await
        .unwrap();
        assert_eq!(groups.len(), 2);

        let titles: Vec<String> = get_muscle_groups_by_workout_id(&mut store, &workout.id)
            .await
            .into_iter()
            .map(|mg| mg.title)
            .collect();
        assert_eq!(titles, ["Chest", "Back"]);
    }

    #[tokio::test]
    async fn add_to_a_missing_workout_fails() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let result = add_muscle_group(&mut store, group_for("nope", "Quads", &[])).await;
        assert!(matches!(result, Err(ServiceError::WorkoutNotFound)));
    }

    #[tokio::test]
    async fn reorder_delete_and_clear() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let workout = add_workout(&mut store, "Legs", "2026-01-01", "u1")
            .await
            .unwrap();
        for title in ["a", "b", "c"] {
            add_muscle_group(&mut store, group_for(&workout.id, title, &[]))
                .await
                .unwrap();
        }

        reorder_muscle_groups(&mut store, &workout.id, 2, 0)
            .await
            .unwrap();
        let groups = get_muscle_groups_by_workout_id(&mut store, &workout.id).await;
        let titles: Vec<&str> = groups.iter().map(|mg| mg.title.as_str()).collect();
        assert_eq!(titles, ["c", "a", "b"]);

        delete_muscle_group(&mut store, &groups[0].id).await.unwrap();
        assert_eq!(
            get_muscle_groups_by_workout_id(&mut store, &workout.id)
                .await
                .len(),
            2
        );

        clear_all_muscle_groups(&mut store, &workout.id)
            .await
            .unwrap();
        assert!(get_muscle_groups_by_workout_id(&mut store, &workout.id)
            .await
            .is_empty());
    }
}
