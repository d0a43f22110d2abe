// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! OpenAPI document for the HTTP API, served at `/documentation/openapi.json`.

use axum::Json;
use utoipa::OpenApi;

use setbook_core::models::{
    AddExerciseLogRequest, CompleteSessionRequest, Exercise, ExercisePrescription,
    ExerciseSessionLog, ExerciseSet, ExerciseSnapshot, ExerciseUpdate, ExerciseUsage,
    ExerciseWithWorkouts, NewExercise, NewWorkout, NewWorkoutExercise, SessionStatus,
    SessionWithLogs, SetInput, StartSessionRequest, Workout, WorkoutExercise,
    WorkoutExerciseDetail, WorkoutExerciseUpdate, WorkoutSession, WorkoutUpdate,
    WorkoutWithExercises,
};
use setbook_core::state::HealthCheckResponse;

use crate::error::{ErrorBody, FieldError};
use crate::routes;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Setbook API",
        description = "Exercise catalog, workout templates and workout logs"
    ),
    paths(
        routes::health,
        routes::exercises::create,
        routes::exercises::list,
        routes::exercises::get_one,
        routes::exercises::with_workouts,
        routes::exercises::update,
        routes::exercises::remove,
        routes::workouts::create,
        routes::workouts::list,
        routes::workouts::get_one,
        routes::workouts::update,
        routes::workouts::remove,
        routes::workouts::add_exercise,
        routes::workouts::replace_exercises,
        routes::workouts::update_exercise,
        routes::workouts::remove_exercise,
        routes::sessions::start,
        routes::sessions::in_progress,
        routes::sessions::get_one,
        routes::sessions::complete,
        routes::sessions::cancel,
        routes::sessions::list_exercise_logs,
        routes::sessions::add_exercise_log,
        routes::sessions::complete_exercise_log,
        routes::sessions::list,
    ),
    components(schemas(
        Exercise,
        NewExercise,
        ExerciseUpdate,
        ExerciseUsage,
        ExerciseWithWorkouts,
        Workout,
        WorkoutExercise,
        WorkoutExerciseDetail,
        WorkoutWithExercises,
        NewWorkout,
        WorkoutUpdate,
        NewWorkoutExercise,
        WorkoutExerciseUpdate,
        SessionStatus,
        WorkoutSession,
        ExerciseSet,
        ExerciseSnapshot,
        ExerciseSessionLog,
        SessionWithLogs,
        SetInput,
        ExercisePrescription,
        StartSessionRequest,
        CompleteSessionRequest,
        AddExerciseLogRequest,
        HealthCheckResponse,
        ErrorBody,
        FieldError,
    )),
    tags(
        (name = "health", description = "Service health"),
        (name = "exercises", description = "Exercise catalog"),
        (name = "workouts", description = "Workout templates and their prescribed exercises"),
        (name = "workout-logs", description = "Workout sessions and their exercise logs")
    )
)]
pub struct ApiDoc;

/// `GET /documentation/openapi.json`
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
