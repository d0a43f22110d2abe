// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! `/workouts` template routes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, patch, post};
use axum::{Json, Router};

use setbook_core::HandlerState;
use setbook_core::models::{
    NewWorkout, NewWorkoutExercise, WorkoutExerciseDetail, WorkoutExerciseUpdate, WorkoutUpdate,
    WorkoutWithExercises,
};
use setbook_core::template_handlers::{
    handle_add_exercise_to_workout, handle_create_workout, handle_delete_workout,
    handle_get_workout, handle_list_workouts, handle_remove_workout_exercise,
    handle_replace_workout_exercises, handle_update_workout, handle_update_workout_exercise,
};

use crate::error::{ApiError, ErrorBody};
use crate::extract::{ApiJson, ApiPath};

pub fn routes() -> Router<HandlerState> {
    Router::new()
        .route("/workouts", get(list).post(create))
        .route("/workouts/{id}", get(get_one).patch(update).delete(remove))
        .route(
            "/workouts/{id}/exercises",
            post(add_exercise).put(replace_exercises),
        )
        .route(
            "/workouts/{id}/exercises/{workout_exercise_id}",
            patch(update_exercise).delete(remove_exercise),
        )
}

#[utoipa::path(
    post,
    path = "/workouts",
    operation_id = "create_workout",
    tag = "workouts",
    request_body = NewWorkout,
    responses(
        (status = 201, description = "Workout created", body = WorkoutWithExercises),
        (status = 400, description = "Invalid request", body = ErrorBody)
    )
)]
pub(crate) async fn create(
    State(state): State<HandlerState>,
    ApiJson(body): ApiJson<NewWorkout>,
) -> Result<(StatusCode, Json<WorkoutWithExercises>), ApiError> {
    let workout = handle_create_workout(&state, body).await?;
    Ok((StatusCode::CREATED, Json(workout)))
}

#[utoipa::path(
    get,
    path = "/workouts",
    operation_id = "list_workouts",
    tag = "workouts",
    responses((status = 200, description = "All workouts with their exercises", body = Vec<WorkoutWithExercises>))
)]
pub(crate) async fn list(
    State(state): State<HandlerState>,
) -> Result<Json<Vec<WorkoutWithExercises>>, ApiError> {
    Ok(Json(handle_list_workouts(&state).await?))
}

#[utoipa::path(
    get,
    path = "/workouts/{id}",
    operation_id = "get_workout",
    tag = "workouts",
    params(("id" = String, Path, description = "Workout ID")),
    responses(
        (status = 200, description = "Workout found", body = WorkoutWithExercises),
        (status = 404, description = "Workout not found", body = ErrorBody)
    )
)]
pub(crate) async fn get_one(
    State(state): State<HandlerState>,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<WorkoutWithExercises>, ApiError> {
    Ok(Json(handle_get_workout(&state, &id).await?))
}

#[utoipa::path(
    patch,
    path = "/workouts/{id}",
    operation_id = "update_workout",
    tag = "workouts",
    params(("id" = String, Path, description = "Workout ID")),
    request_body = WorkoutUpdate,
    responses(
        (status = 200, description = "Workout updated", body = WorkoutWithExercises),
        (status = 400, description = "Invalid request", body = ErrorBody),
        (status = 404, description = "Workout not found", body = ErrorBody)
    )
)]
pub(crate) async fn update(
    State(state): State<HandlerState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(body): ApiJson<WorkoutUpdate>,
) -> Result<Json<WorkoutWithExercises>, ApiError> {
    Ok(Json(handle_update_workout(&state, &id, body).await?))
}

#[utoipa::path(
    delete,
    path = "/workouts/{id}",
    operation_id = "delete_workout",
    tag = "workouts",
    params(("id" = String, Path, description = "Workout ID")),
    responses(
        (status = 204, description = "Workout and its logs deleted"),
        (status = 404, description = "Workout not found", body = ErrorBody)
    )
)]
pub(crate) async fn remove(
    State(state): State<HandlerState>,
    ApiPath(id): ApiPath<String>,
) -> Result<StatusCode, ApiError> {
    handle_delete_workout(&state, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/workouts/{id}/exercises",
    operation_id = "add_workout_exercise",
    tag = "workouts",
    params(("id" = String, Path, description = "Workout ID")),
    request_body = NewWorkoutExercise,
    responses(
        (status = 201, description = "Exercise prescribed", body = WorkoutExerciseDetail),
        (status = 400, description = "Invalid request", body = ErrorBody),
        (status = 404, description = "Workout or exercise not found", body = ErrorBody)
    )
)]
pub(crate) async fn add_exercise(
    State(state): State<HandlerState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(body): ApiJson<NewWorkoutExercise>,
) -> Result<(StatusCode, Json<WorkoutExerciseDetail>), ApiError> {
    let detail = handle_add_exercise_to_workout(&state, &id, body).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

#[utoipa::path(
    put,
    path = "/workouts/{id}/exercises",
    operation_id = "replace_workout_exercises",
    tag = "workouts",
    params(("id" = String, Path, description = "Workout ID")),
    request_body = Vec<NewWorkoutExercise>,
    responses(
        (status = 200, description = "Prescriptions replaced", body = WorkoutWithExercises),
        (status = 400, description = "Invalid request", body = ErrorBody),
        (status = 404, description = "Workout or exercise not found", body = ErrorBody)
    )
)]
pub(crate) async fn replace_exercises(
    State(state): State<HandlerState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(body): ApiJson<Vec<NewWorkoutExercise>>,
) -> Result<Json<WorkoutWithExercises>, ApiError> {
    Ok(Json(handle_replace_workout_exercises(&state, &id, body).await?))
}

#[utoipa::path(
    patch,
    path = "/workouts/{id}/exercises/{workout_exercise_id}",
    operation_id = "update_workout_exercise",
    tag = "workouts",
    params(
        ("id" = String, Path, description = "Workout ID"),
        ("workout_exercise_id" = String, Path, description = "Workout exercise ID")
    ),
    request_body = WorkoutExerciseUpdate,
    responses(
        (status = 200, description = "Prescription updated", body = WorkoutExerciseDetail),
        (status = 400, description = "Invalid request", body = ErrorBody),
        (status = 404, description = "Workout exercise not found", body = ErrorBody)
    )
)]
pub(crate) async fn update_exercise(
    State(state): State<HandlerState>,
    ApiPath((id, workout_exercise_id)): ApiPath<(String, String)>,
    ApiJson(body): ApiJson<WorkoutExerciseUpdate>,
) -> Result<Json<WorkoutExerciseDetail>, ApiError> {
    let detail = handle_update_workout_exercise(&state, &id, &workout_exercise_id, body).await?;
    Ok(Json(detail))
}

#[utoipa::path(
    delete,
    path = "/workouts/{id}/exercises/{workout_exercise_id}",
    operation_id = "delete_workout_exercise",
    tag = "workouts",
    params(
        ("id" = String, Path, description = "Workout ID"),
        ("workout_exercise_id" = String, Path, description = "Workout exercise ID")
    ),
    responses(
        (status = 204, description = "Prescription removed"),
        (status = 404, description = "Workout exercise not found", body = ErrorBody)
    )
)]
pub(crate) async fn remove_exercise(
    State(state): State<HandlerState>,
    ApiPath((id, workout_exercise_id)): ApiPath<(String, String)>,
) -> Result<StatusCode, ApiError> {
    handle_remove_workout_exercise(&state, &id, &workout_exercise_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
