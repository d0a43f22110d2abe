// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Common test infrastructure for setbook-core integration tests.
//!
//! Builds handler state over an in-memory SQLite database and provides
//! shortcuts for creating catalog and template fixtures.

#![allow(dead_code)]

use std::sync::Arc;

use sqlx::sqlite::SqlitePoolOptions;

use setbook_core::catalog_handlers::handle_create_exercise;
use setbook_core::migrations;
use setbook_core::models::{
    Exercise, ExercisePrescription, NewExercise, NewWorkout, NewWorkoutExercise, SetInput,
    StartSessionRequest, WorkoutExerciseDetail, WorkoutWithExercises,
};
use setbook_core::persistence::SqlitePersistence;
use setbook_core::state::HandlerState;
use setbook_core::template_handlers::{handle_add_exercise_to_workout, handle_create_workout};

/// Handler state over a fresh, migrated in-memory SQLite database.
pub async fn sqlite_state() -> HandlerState {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory SQLite pool");

    migrations::run_sqlite(&pool)
        .await
        .expect("Failed to run migrations");

    HandlerState::new(Arc::new(SqlitePersistence::new(pool)))
}

pub async fn create_exercise(state: &HandlerState, name: &str, muscle: &str) -> Exercise {
    handle_create_exercise(
        state,
        NewExercise {
            name: name.to_string(),
            muscle: Some(muscle.to_string()),
            description: Some(format!("{} description", name)),
        },
    )
    .await
    .expect("Failed to create exercise")
}

pub async fn create_workout(state: &HandlerState, name: &str) -> WorkoutWithExercises {
    handle_create_workout(
        state,
        NewWorkout {
            name: name.to_string(),
            description: None,
        },
    )
    .await
    .expect("Failed to create workout")
}

pub async fn prescribe(
    state: &HandlerState,
    workout_id: &str,
    exercise_id: &str,
    order: i32,
    rest: i32,
) -> WorkoutExerciseDetail {
    handle_add_exercise_to_workout(
        state,
        workout_id,
        NewWorkoutExercise {
            exercise_id: exercise_id.to_string(),
            order,
            series: 3,
            reps: 10,
            weight: 40.0,
            rest,
        },
    )
    .await
    .expect("Failed to add exercise to workout")
}

pub fn set(weight: f64, reps: i32) -> SetInput {
    SetInput {
        weight,
        reps,
        completed: false,
        timestamp: None,
    }
}

/// A start-request line for a prescription with the given sets.
pub fn line(prescription: &WorkoutExerciseDetail, sets: Vec<SetInput>) -> ExercisePrescription {
    ExercisePrescription {
        workout_exercise_id: prescription.prescription.id.clone(),
        exercise_id: prescription.prescription.exercise_id.clone(),
        series: sets,
        rest: None,
        notes: None,
    }
}

pub fn start_request(lines: Vec<ExercisePrescription>) -> StartSessionRequest {
    StartSessionRequest {
        notes: None,
        workout_id: None,
        exercises: lines,
    }
}
