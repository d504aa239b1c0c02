//! Workout domain model.

pub mod types;

pub use types::{
    AddLog, CreateExercise, CreateMuscleGroup, Exercise, Log, MuscleGroup, UpdateLog, Workout,
};
