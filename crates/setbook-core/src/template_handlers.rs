// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Workout template handlers.
//!
//! A template is a named workout plus its ordered exercise prescriptions.
//! Prescriptions are always returned joined with their catalog exercise.

use std::collections::HashMap;

use chrono::Utc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::error::{CoreError, Result};
use crate::models::{
    Exercise, NewWorkout, NewWorkoutExercise, Workout, WorkoutExercise, WorkoutExerciseDetail,
    WorkoutExerciseUpdate, WorkoutUpdate, WorkoutWithExercises,
};
use crate::state::HandlerState;
use crate::validation::{Validate, validate_id};

pub(crate) async fn load_workout(state: &HandlerState, workout_id: &str) -> Result<Workout> {
    validate_id("id", workout_id)?;
    state
        .persistence
        .get_workout(workout_id)
        .await?
        .ok_or_else(|| CoreError::WorkoutNotFound {
            workout_id: workout_id.to_string(),
        })
}

async fn load_workout_exercise(
    state: &HandlerState,
    workout_id: &str,
    workout_exercise_id: &str,
) -> Result<WorkoutExercise> {
    validate_id("workoutExerciseId", workout_exercise_id)?;
    state
        .persistence
        .get_workout_exercise(workout_id, workout_exercise_id)
        .await?
        .ok_or_else(|| CoreError::WorkoutExerciseNotFound {
            workout_id: workout_id.to_string(),
            workout_exercise_id: workout_exercise_id.to_string(),
        })
}

/// Fetch the catalog entries for `exercise_ids` in one query, failing on the
/// first ID that does not exist.
pub(crate) async fn resolve_exercises(
    state: &HandlerState,
    mut ids: Vec<String>,
) -> Result<HashMap<String, Exercise>> {
    ids.sort();
    ids.dedup();

    let found: HashMap<String, Exercise> = state
        .persistence
        .get_exercises_by_ids(&ids)
        .await?
        .into_iter()
        .map(|e| (e.id.clone(), e))
        .collect();

    if let Some(missing) = ids.into_iter().find(|id| !found.contains_key(id)) {
        return Err(CoreError::ExerciseNotFound {
            exercise_id: missing,
        });
    }

    Ok(found)
}

/// Join workouts with their prescriptions and catalog exercises using one
/// query per table.
async fn with_exercises(
    state: &HandlerState,
    workouts: Vec<Workout>,
) -> Result<Vec<WorkoutWithExercises>> {
    let workout_ids: Vec<String> = workouts.iter().map(|w| w.id.clone()).collect();
    let prescriptions = state
        .persistence
        .list_workout_exercises(&workout_ids)
        .await?;

    let mut exercise_ids: Vec<String> = prescriptions
        .iter()
        .map(|we| we.exercise_id.clone())
        .collect();
    exercise_ids.sort();
    exercise_ids.dedup();
    let exercises: HashMap<String, Exercise> = state
        .persistence
        .get_exercises_by_ids(&exercise_ids)
        .await?
        .into_iter()
        .map(|e| (e.id.clone(), e))
        .collect();

    let mut by_workout: HashMap<String, Vec<WorkoutExerciseDetail>> = HashMap::new();
    for prescription in prescriptions {
        if let Some(exercise) = exercises.get(&prescription.exercise_id) {
            by_workout
                .entry(prescription.workout_id.clone())
                .or_default()
                .push(WorkoutExerciseDetail {
                    exercise: exercise.clone(),
                    prescription,
                });
        }
    }

    Ok(workouts
        .into_iter()
        .map(|workout| {
            let exercises = by_workout.remove(&workout.id).unwrap_or_default();
            WorkoutWithExercises { workout, exercises }
        })
        .collect())
}

async fn with_exercises_one(state: &HandlerState, workout: Workout) -> Result<WorkoutWithExercises> {
    let workout_id = workout.id.clone();
    with_exercises(state, vec![workout])
        .await?
        .pop()
        .ok_or(CoreError::WorkoutNotFound { workout_id })
}

fn new_prescription(workout_id: &str, input: NewWorkoutExercise) -> WorkoutExercise {
    let now = Utc::now();
    WorkoutExercise {
        id: Uuid::new_v4().to_string(),
        workout_id: workout_id.to_string(),
        exercise_id: input.exercise_id,
        order: input.order,
        series: input.series,
        reps: input.reps,
        weight: input.weight,
        rest: input.rest,
        created_at: now,
        updated_at: now,
    }
}

/// Create an empty workout template.
#[instrument(skip(state, request), fields(name = %request.name))]
pub async fn handle_create_workout(
    state: &HandlerState,
    request: NewWorkout,
) -> Result<WorkoutWithExercises> {
    request.validate()?;

    let now = Utc::now();
    let workout = Workout {
        id: Uuid::new_v4().to_string(),
        name: request.name.trim().to_string(),
        description: request.description,
        created_at: now,
        updated_at: now,
    };
    state.persistence.insert_workout(&workout).await?;

    info!(workout_id = %workout.id, "Workout created");
    Ok(WorkoutWithExercises {
        workout,
        exercises: Vec::new(),
    })
}

/// List workouts, newest first, each with its prescriptions.
#[instrument(skip(state))]
pub async fn handle_list_workouts(state: &HandlerState) -> Result<Vec<WorkoutWithExercises>> {
    let workouts = state.persistence.list_workouts().await?;
    debug!(count = workouts.len(), "Listed workouts");
    with_exercises(state, workouts).await
}

/// Get a workout with its prescriptions ordered by order index.
#[instrument(skip(state))]
pub async fn handle_get_workout(
    state: &HandlerState,
    workout_id: &str,
) -> Result<WorkoutWithExercises> {
    let workout = load_workout(state, workout_id).await?;
    with_exercises_one(state, workout).await
}

/// Apply a partial update to a workout's name and description.
#[instrument(skip(state, request))]
pub async fn handle_update_workout(
    state: &HandlerState,
    workout_id: &str,
    request: WorkoutUpdate,
) -> Result<WorkoutWithExercises> {
    request.validate()?;
    let mut workout = load_workout(state, workout_id).await?;

    if let Some(name) = request.name {
        workout.name = name.trim().to_string();
    }
    if let Some(description) = request.description {
        workout.description = Some(description);
    }
    workout.updated_at = Utc::now();

    if !state.persistence.update_workout(&workout).await? {
        return Err(CoreError::WorkoutNotFound {
            workout_id: workout_id.to_string(),
        });
    }

    info!("Workout updated");
    with_exercises_one(state, workout).await
}

/// Delete a workout and its prescriptions. Sessions started from it are kept.
#[instrument(skip(state))]
pub async fn handle_delete_workout(state: &HandlerState, workout_id: &str) -> Result<()> {
    validate_id("id", workout_id)?;

    if !state.persistence.delete_workout(workout_id).await? {
        return Err(CoreError::WorkoutNotFound {
            workout_id: workout_id.to_string(),
        });
    }

    info!("Workout deleted");
    Ok(())
}

/// Add one exercise prescription to a workout.
#[instrument(skip(state, request), fields(exercise_id = %request.exercise_id))]
pub async fn handle_add_exercise_to_workout(
    state: &HandlerState,
    workout_id: &str,
    request: NewWorkoutExercise,
) -> Result<WorkoutExerciseDetail> {
    request.validate()?;
    load_workout(state, workout_id).await?;

    let mut exercises = resolve_exercises(state, vec![request.exercise_id.clone()]).await?;
    let prescription = new_prescription(workout_id, request);
    state
        .persistence
        .insert_workout_exercise(&prescription)
        .await?;

    info!(workout_exercise_id = %prescription.id, "Exercise added to workout");
    let exercise = exercises.remove(&prescription.exercise_id).ok_or_else(|| {
        CoreError::ExerciseNotFound {
            exercise_id: prescription.exercise_id.clone(),
        }
    })?;
    Ok(WorkoutExerciseDetail {
        prescription,
        exercise,
    })
}

/// Apply a partial update to one prescription of a workout.
#[instrument(skip(state, request))]
pub async fn handle_update_workout_exercise(
    state: &HandlerState,
    workout_id: &str,
    workout_exercise_id: &str,
    request: WorkoutExerciseUpdate,
) -> Result<WorkoutExerciseDetail> {
    request.validate()?;
    load_workout(state, workout_id).await?;
    let mut prescription = load_workout_exercise(state, workout_id, workout_exercise_id).await?;

    if let Some(order) = request.order {
        prescription.order = order;
    }
    if let Some(series) = request.series {
        prescription.series = series;
    }
    if let Some(reps) = request.reps {
        prescription.reps = reps;
    }
    if let Some(weight) = request.weight {
        prescription.weight = weight;
    }
    if let Some(rest) = request.rest {
        prescription.rest = rest;
    }
    prescription.updated_at = Utc::now();

    if !state
        .persistence
        .update_workout_exercise(&prescription)
        .await?
    {
        return Err(CoreError::WorkoutExerciseNotFound {
            workout_id: workout_id.to_string(),
            workout_exercise_id: workout_exercise_id.to_string(),
        });
    }

    let exercise = state
        .persistence
        .get_exercise(&prescription.exercise_id)
        .await?
        .ok_or_else(|| CoreError::ExerciseNotFound {
            exercise_id: prescription.exercise_id.clone(),
        })?;

    info!("Workout exercise updated");
    Ok(WorkoutExerciseDetail {
        prescription,
        exercise,
    })
}

/// Remove one prescription from a workout.
#[instrument(skip(state))]
pub async fn handle_remove_workout_exercise(
    state: &HandlerState,
    workout_id: &str,
    workout_exercise_id: &str,
) -> Result<()> {
    load_workout(state, workout_id).await?;
    validate_id("workoutExerciseId", workout_exercise_id)?;

    if !state
        .persistence
        .delete_workout_exercise(workout_id, workout_exercise_id)
        .await?
    {
        return Err(CoreError::WorkoutExerciseNotFound {
            workout_id: workout_id.to_string(),
            workout_exercise_id: workout_exercise_id.to_string(),
        });
    }

    info!("Workout exercise removed");
    Ok(())
}

/// Replace every prescription of a workout atomically.
#[instrument(skip(state, request), fields(lines = request.len()))]
pub async fn handle_replace_workout_exercises(
    state: &HandlerState,
    workout_id: &str,
    request: Vec<NewWorkoutExercise>,
) -> Result<WorkoutWithExercises> {
    request.validate()?;
    let workout = load_workout(state, workout_id).await?;

    let exercise_ids = request.iter().map(|line| line.exercise_id.clone()).collect();
    resolve_exercises(state, exercise_ids).await?;

    let prescriptions: Vec<WorkoutExercise> = request
        .into_iter()
        .map(|line| new_prescription(workout_id, line))
        .collect();
    state
        .persistence
        .replace_workout_exercises(workout_id, &prescriptions)
        .await?;

    info!(count = prescriptions.len(), "Workout exercises replaced");
    with_exercises_one(state, workout).await
}
