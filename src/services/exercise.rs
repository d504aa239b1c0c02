//! Exercise operations within a muscle group.

use crate::services::{find_exercise_mut, ServiceError};
use crate::storage::store::WorkoutStore;
use crate::workouts::types::mint_id;
use crate::workouts::Exercise;
use chrono::Utc;

/// List the exercises of a muscle group in display order.
pub async fn get_exercises_by_muscle_group_id(
    store: &mut WorkoutStore,
    muscle_group_id: &str,
) -> Vec<Exercise> {
    store
        .load()
        .await
        .into_iter()
        .flat_map(|w| w.muscle_group)
        .find(|mg| mg.id == muscle_group_id)
        .map(|mg| mg.exercises)
        .unwrap_or_default()
}

/// Look up an exercise anywhere in the collection.
///
/// This is the upgrade-on-read path for legacy set logs: any log without a
/// timestamp gets one now, and the backfill is persisted before the
/// exercise is returned, so a second read sees the same timestamp.
pub async fn get_exercise_by_id(
    store: &mut WorkoutStore,
    exercise_id: &str,
) -> Result<Option<Exercise>, ServiceError> {
    let mut workouts = store.load().await;

    let mut found = None;
    let mut needs_save = false;
    if let Some(exercise) = find_exercise_mut(&mut workouts, exercise_id) {
        for log in &mut exercise.log {
            if log.date.is_none() {
                log.date = Some(Utc::now());
                needs_save = true;
            }
        }
        found = Some(exercise.clone());
    }

    if needs_save {
        store.save(&workouts).await?;
    }

    Ok(found)
}

/// Add an exercise to a muscle group.
pub async fn add_exercise(
    store: &mut WorkoutStore,
    muscle_group_id: &str,
    title: &str,
) -> Result<Exercise, ServiceError> {
    let mut workouts = store.load().await;

    let group = workouts
        .iter_mut()
        .flat_map(|w| w.muscle_group.iter_mut())
        .find(|mg| mg.id == muscle_group_id)
        .ok_or(ServiceError::MuscleGroupNotFound)?;

    let exercise = Exercise {
        id: mint_id(),
        muscle_group_id: muscle_group_id.to_string(),
        title: title.trim().to_string(),
        log: Vec::new(),
    };
    group.exercises.push(exercise.clone());

    store.save(&workouts).await?;
    Ok(exercise)
}

/// Rename an exercise.
pub async fn update_exercise(
    store: &mut WorkoutStore,
    exercise_id: &str,
    title: &str,
) -> Result<Exercise, ServiceError> {
    let mut workouts = store.load().await;

    let exercise =
        find_exercise_mut(&mut workouts, exercise_id).ok_or(ServiceError::ExerciseNotFound)?;
    exercise.title = title.trim().to_string();
    let updated = exercise.clone();

    store.save(&workouts).await?;
    Ok(updated)
}

/// Remove an exercise from its muscle group.
pub async fn delete_exercise(
    store: &mut WorkoutStore,
    exercise_id: &str,
) -> Result<(), ServiceError> {
    let mut workouts = store.load().await;

    let group = workouts
        .iter_mut()
        .flat_map(|w| w.muscle_group.iter_mut())
        .find(|mg| mg.exercises.iter().any(|ex| ex.id == exercise_id))
        .ok_or(ServiceError::ExerciseNotFound)?;
    group.exercises.retain(|ex| ex.id != exercise_id);

    store.save(&workouts).await?;
    Ok(())
}

/// Remove every exercise from a muscle group.
pub async fn clear_all_exercises(
    store: &mut WorkoutStore,
    muscle_group_id: &str,
) -> Result<(), ServiceError> {
    let mut workouts = store.load().await;

    let group = workouts
        .iter_mut()
        .flat_map(|w| w.muscle_group.iter_mut())
        .find(|mg| mg.id == muscle_group_id)
        .ok_or(ServiceError::MuscleGroupNotFound)?;
    group.exercises.clear();

    store.save(&workouts).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::muscle_group::add_muscle_group;
    use crate::services::workout::add_workout;
    use crate::storage::backup::BackupWriter;
    use crate::storage::legacy::LegacyStore;
    use crate::workouts::{CreateMuscleGroup, Log, Workout};
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> WorkoutStore {
        WorkoutStore::new(
            dir.path().join("replog-db.json"),
            LegacyStore::open_in_memory().unwrap(),
            BackupWriter::disabled(),
        )
    }

    async fn seeded_muscle_group(store: &mut WorkoutStore) -> String {
        let workout = add_workout(store, "Legs", "2026-01-01", "u1").await.unwrap();
        add_muscle_group(
            store,
            CreateMuscleGroup {
                workout_id: workout.id,
                title: "Quads".to_string(),
                date: "2026-01-01".to_string(),
                exercises: vec![],
            },
        )
        .await
        .unwrap()
        .id
    }

    #[tokio::test]
    async fn add_rename_delete_cycle() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let group_id = seeded_muscle_group(&mut store).await;

        let exercise = add_exercise(&mut store, &group_id, " Squat ").await.unwrap();
        assert_eq!(exercise.title, "Squat");
        assert_eq!(exercise.muscle_group_id, group_id);

        let renamed = update_exercise(&mut store, &exercise.id, "Front Squat")
            .await
            .unwrap();
        assert_eq!(renamed.title, "Front Squat");

        delete_exercise(&mut store, &exercise.id).await.unwrap();
        assert!(get_exercises_by_muscle_group_id(&mut store, &group_id)
            .await
            .is_empty());
    }

    #[tokio::test]
    async fn lookup_of_a_missing_exercise_is_none() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        assert!(get_exercise_by_id(&mut store, "nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn dateless_log_is_backfilled_and_the_backfill_persists() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);

        // Seed a collection containing a legacy log with no timestamp.
        let mut workout = Workout::new("Legs", "2026-01-01", "u1");
        let mut group = crate::workouts::MuscleGroup {
            id: "m1".to_string(),
            workout_id: workout.id.clone(),
            title: "Quads".to_string(),
            date: "2026-01-01".to_string(),
            exercises: vec![],
        };
        group.exercises.push(Exercise {
            id: "e1".to_string(),
            muscle_group_id: "m1".to_string(),
            title: "Squat".to_string(),
            log: vec![Log {
                id: "l1".to_string(),
                number_reps: 5,
                max_weight: 40.0,
                date: None,
            }],
        });
        workout.muscle_group.push(group);
        store.save(&[workout]).await.unwrap();

        let first = get_exercise_by_id(&mut store, "e1").await.unwrap().unwrap();
        let backfilled = first.log[0].date.expect("date was backfilled");

        // A second read returns the persisted timestamp, not a new one.
        let second = get_exercise_by_id(&mut store, "e1").await.unwrap().unwrap();
        assert_eq!(second.log[0].date, Some(backfilled));
    }

    #[tokio::test]
    async fn clear_all_empties_only_the_target_group() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let group_id = seeded_muscle_group(&mut store).await;
        add_exercise(&mut store, &group_id, "Squat").await.unwrap();
        add_exercise(&mut store, &group_id, "Lunge").await.unwrap();

        clear_all_exercises(&mut store, &group_id).await.unwrap();
        assert!(get_exercises_by_muscle_group_id(&mut store, &group_id)
            .await
            .is_empty());
    }
}
