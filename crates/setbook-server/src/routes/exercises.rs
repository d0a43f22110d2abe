// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! `/exercises` routes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use setbook_core::HandlerState;
use setbook_core::catalog_handlers::{
    handle_create_exercise, handle_delete_exercise, handle_get_exercise,
    handle_get_exercise_with_workouts, handle_list_exercises, handle_update_exercise,
};
use setbook_core::models::{Exercise, ExerciseUpdate, ExerciseWithWorkouts, NewExercise};

use crate::error::{ApiError, ErrorBody};
use crate::extract::{ApiJson, ApiPath};

pub fn routes() -> Router<HandlerState> {
    Router::new()
        .route("/exercises", get(list).post(create))
        .route("/exercises/{id}", get(get_one).patch(update).delete(remove))
        .route("/exercises/{id}/workouts", get(with_workouts))
}

#[utoipa::path(
    post,
    path = "/exercises",
    operation_id = "create_exercise",
    tag = "exercises",
    request_body = NewExercise,
    responses(
        (status = 201, description = "Exercise created", body = Exercise),
        (status = 400, description = "Invalid request", body = ErrorBody)
    )
)]
pub(crate) async fn create(
    State(state): State<HandlerState>,
    ApiJson(body): ApiJson<NewExercise>,
) -> Result<(StatusCode, Json<Exercise>), ApiError> {
    let exercise = handle_create_exercise(&state, body).await?;
    Ok((StatusCode::CREATED, Json(exercise)))
}

#[utoipa::path(
    get,
    path = "/exercises",
    operation_id = "list_exercises",
    tag = "exercises",
    responses((status = 200, description = "All exercises, by name", body = Vec<Exercise>))
)]
pub(crate) async fn list(State(state): State<HandlerState>) -> Result<Json<Vec<Exercise>>, ApiError> {
    Ok(Json(handle_list_exercises(&state).await?))
}

#[utoipa::path(
    get,
    path = "/exercises/{id}",
    operation_id = "get_exercise",
    tag = "exercises",
    params(("id" = String, Path, description = "Exercise ID")),
    responses(
        (status = 200, description = "Exercise found", body = Exercise),
        (status = 404, description = "Exercise not found", body = ErrorBody)
    )
)]
pub(crate) async fn get_one(
    State(state): State<HandlerState>,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<Exercise>, ApiError> {
    Ok(Json(handle_get_exercise(&state, &id).await?))
}

#[utoipa::path(
    get,
    path = "/exercises/{id}/workouts",
    operation_id = "get_exercise_with_workouts",
    tag = "exercises",
    params(("id" = String, Path, description = "Exercise ID")),
    responses(
        (status = 200, description = "Exercise with referencing prescriptions", body = ExerciseWithWorkouts),
        (status = 404, description = "Exercise not found", body = ErrorBody)
    )
)]
pub(crate) async fn with_workouts(
    State(state): State<HandlerState>,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<ExerciseWithWorkouts>, ApiError> {
    Ok(Json(handle_get_exercise_with_workouts(&state, &id).await?))
}

#[utoipa::path(
    patch,
    path = "/exercises/{id}",
    operation_id = "update_exercise",
    tag = "exercises",
    params(("id" = String, Path, description = "Exercise ID")),
    request_body = ExerciseUpdate,
    responses(
        (status = 200, description = "Exercise updated", body = Exercise),
        (status = 400, description = "Invalid request", body = ErrorBody),
        (status = 404, description = "Exercise not found", body = ErrorBody)
    )
)]
pub(crate) async fn update(
    State(state): State<HandlerState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(body): ApiJson<ExerciseUpdate>,
) -> Result<Json<Exercise>, ApiError> {
    Ok(Json(handle_update_exercise(&state, &id, body).await?))
}

#[utoipa::path(
    delete,
    path = "/exercises/{id}",
    operation_id = "delete_exercise",
    tag = "exercises",
    params(("id" = String, Path, description = "Exercise ID")),
    responses(
        (status = 204, description = "Exercise deleted"),
        (status = 404, description = "Exercise not found", body = ErrorBody),
        (status = 409, description = "Exercise is still prescribed by a workout", body = ErrorBody)
    )
)]
pub(crate) async fn remove(
    State(state): State<HandlerState>,
    ApiPath(id): ApiPath<String>,
) -> Result<StatusCode, ApiError> {
    handle_delete_exercise(&state, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
