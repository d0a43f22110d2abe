// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Exercise catalog handlers.
//!
//! Catalog entries are referenced by workout prescriptions and snapshotted into
//! exercise logs. Editing an entry never touches existing snapshots; deleting
//! one is refused while any prescription references it.

use std::collections::HashMap;

use chrono::Utc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::error::{CoreError, Result};
use crate::models::{Exercise, ExerciseUpdate, ExerciseUsage, ExerciseWithWorkouts, NewExercise};
use crate::state::HandlerState;
use crate::validation::{Validate, validate_id};

/// Catalog entries inserted by [`seed_default_exercises`]: (name, muscle, description).
pub const DEFAULT_EXERCISES: [(&str, &str, &str); 10] = [
    (
        "Bench Press",
        "Chest",
        "Lie on a flat bench and press the barbell up from chest level.",
    ),
    (
        "Squat",
        "Legs",
        "Lower the hips with the barbell on the upper back, then stand back up.",
    ),
    (
        "Deadlift",
        "Back",
        "Lift the barbell from the floor to hip level keeping the back straight.",
    ),
    (
        "Shoulder Press",
        "Shoulders",
        "Press the weights overhead from shoulder height.",
    ),
    (
        "Pull-up",
        "Back",
        "Hang from a bar and pull the body up until the chin clears it.",
    ),
    (
        "Bicep Curl",
        "Arms",
        "Curl the weights toward the shoulders keeping the elbows fixed.",
    ),
    (
        "Tricep Extension",
        "Arms",
        "Extend the arms overhead to straighten the elbows against resistance.",
    ),
    (
        "Leg Press",
        "Legs",
        "Push the platform away with the feet while seated in the machine.",
    ),
    (
        "Lat Pulldown",
        "Back",
        "Pull the cable bar down to the upper chest while seated.",
    ),
    (
        "Calf Raise",
        "Legs",
        "Rise onto the toes under load, then lower the heels slowly.",
    ),
];

async fn load_exercise(state: &HandlerState, exercise_id: &str) -> Result<Exercise> {
    validate_id("id", exercise_id)?;
    state
        .persistence
        .get_exercise(exercise_id)
        .await?
        .ok_or_else(|| CoreError::ExerciseNotFound {
            exercise_id: exercise_id.to_string(),
        })
}

/// Create a catalog exercise.
#[instrument(skip(state, request), fields(name = %request.name))]
pub async fn handle_create_exercise(
    state: &HandlerState,
    request: NewExercise,
) -> Result<Exercise> {
    request.validate()?;

    let now = Utc::now();
    let exercise = Exercise {
        id: Uuid::new_v4().to_string(),
        name: request.name.trim().to_string(),
        muscle: request.muscle,
        description: request.description,
        created_at: now,
        updated_at: now,
    };

    state.persistence.insert_exercise(&exercise).await?;

    info!(exercise_id = %exercise.id, "Exercise created");
    Ok(exercise)
}

/// List the catalog ordered by name.
#[instrument(skip(state))]
pub async fn handle_list_exercises(state: &HandlerState) -> Result<Vec<Exercise>> {
    let exercises = state.persistence.list_exercises().await?;
    debug!(count = exercises.len(), "Listed exercises");
    Ok(exercises)
}

/// Get one catalog exercise.
#[instrument(skip(state))]
pub async fn handle_get_exercise(state: &HandlerState, exercise_id: &str) -> Result<Exercise> {
    load_exercise(state, exercise_id).await
}

/// Get an exercise together with every prescription that references it.
#[instrument(skip(state))]
pub async fn handle_get_exercise_with_workouts(
    state: &HandlerState,
    exercise_id: &str,
) -> Result<ExerciseWithWorkouts> {
    let exercise = load_exercise(state, exercise_id).await?;

    let prescriptions = state
        .persistence
        .list_prescriptions_for_exercise(exercise_id)
        .await?;

    let mut workout_ids: Vec<String> = prescriptions
        .iter()
        .map(|we| we.workout_id.clone())
        .collect();
    workout_ids.sort();
    workout_ids.dedup();

    let workouts: HashMap<String, _> = state
        .persistence
        .get_workouts_by_ids(&workout_ids)
        .await?
        .into_iter()
        .map(|w| (w.id.clone(), w))
        .collect();

    let workouts = prescriptions
        .into_iter()
        .filter_map(|prescription| {
            workouts
                .get(&prescription.workout_id)
                .cloned()
                .map(|workout| ExerciseUsage {
                    prescription,
                    workout,
                })
        })
        .collect();

    Ok(ExerciseWithWorkouts { exercise, workouts })
}

/// Apply a partial update to a catalog exercise.
///
/// Exercise logs keep the snapshot taken when they were created.
#[instrument(skip(state, request))]
pub async fn handle_update_exercise(
    state: &HandlerState,
    exercise_id: &str,
    request: ExerciseUpdate,
) -> Result<Exercise> {
    request.validate()?;
    let mut exercise = load_exercise(state, exercise_id).await?;

    if let Some(name) = request.name {
        exercise.name = name.trim().to_string();
    }
    if let Some(muscle) = request.muscle {
        exercise.muscle = Some(muscle);
    }
    if let Some(description) = request.description {
        exercise.description = Some(description);
    }
    exercise.updated_at = Utc::now();

    if !state.persistence.update_exercise(&exercise).await? {
        return Err(CoreError::ExerciseNotFound {
            exercise_id: exercise_id.to_string(),
        });
    }

    info!("Exercise updated");
    Ok(exercise)
}

/// Delete a catalog exercise that no workout prescribes.
#[instrument(skip(state))]
pub async fn handle_delete_exercise(state: &HandlerState, exercise_id: &str) -> Result<()> {
    load_exercise(state, exercise_id).await?;

    let references = state
        .persistence
        .count_exercise_references(exercise_id)
        .await?;
    if references > 0 {
        return Err(CoreError::ExerciseInUse {
            exercise_id: exercise_id.to_string(),
            references,
        });
    }

    if !state.persistence.delete_exercise(exercise_id).await? {
        return Err(CoreError::ExerciseNotFound {
            exercise_id: exercise_id.to_string(),
        });
    }

    info!("Exercise deleted");
    Ok(())
}

/// Insert [`DEFAULT_EXERCISES`] if the catalog is empty.
///
/// Returns the number of exercises inserted.
#[instrument(skip(state))]
pub async fn seed_default_exercises(state: &HandlerState) -> Result<usize> {
    let existing = state.persistence.count_exercises().await?;
    if existing > 0 {
        debug!(existing, "Catalog not empty, skipping seed");
        return Ok(0);
    }

    for (name, muscle, description) in DEFAULT_EXERCISES {
        let now = Utc::now();
        let exercise = Exercise {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            muscle: Some(muscle.to_string()),
            description: Some(description.to_string()),
            created_at: now,
            updated_at: now,
        };
        state.persistence.insert_exercise(&exercise).await?;
    }

    info!(count = DEFAULT_EXERCISES.len(), "Seeded default exercises");
    Ok(DEFAULT_EXERCISES.len())
}
