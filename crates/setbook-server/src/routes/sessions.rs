// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Workout session (workout log) routes.
//!
//! Sessions are addressed under their workout, `/workouts/{id}/logs/{logId}`,
//! and listed across workouts under `/logs`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, patch, post};
use axum::{Json, Router};

use setbook_core::HandlerState;
use setbook_core::models::{
    AddExerciseLogRequest, CompleteSessionRequest, ExerciseSessionLog, ListSessionsFilter,
    SessionWithLogs, StartSessionRequest, WorkoutSession,
};
use setbook_core::session_handlers::{
    handle_add_exercise_log, handle_cancel_session, handle_complete_exercise_log,
    handle_complete_session, handle_get_active_session, handle_get_session,
    handle_list_exercise_logs, handle_list_sessions, handle_start_session,
};

use crate::error::{ApiError, ErrorBody};
use crate::extract::{ApiJson, ApiPath, ApiQuery, OptionalJson};

pub fn routes() -> Router<HandlerState> {
    Router::new()
        .route("/workouts/{id}/start", post(start))
        .route("/workouts/{id}/in-progress-workout", get(in_progress))
        .route("/workouts/{id}/logs/{log_id}", get(get_one))
        .route("/workouts/{id}/logs/{log_id}/complete", patch(complete))
        .route("/workouts/{id}/logs/{log_id}/cancel", patch(cancel))
        .route(
            "/workouts/{id}/logs/{log_id}/exercises",
            get(list_exercise_logs).post(add_exercise_log),
        )
        .route(
            "/workouts/{id}/logs/{log_id}/exercises/{exercise_log_id}/complete",
            patch(complete_exercise_log),
        )
        .route("/logs", get(list))
}

/// 201 with the new session, or 200 with the session already in progress.
#[utoipa::path(
    post,
    path = "/workouts/{id}/start",
    operation_id = "start_workout_log",
    tag = "workout-logs",
    params(("id" = String, Path, description = "Workout ID")),
    request_body(content = Option<StartSessionRequest>, description = "Optional notes and exercises to log"),
    responses(
        (status = 201, description = "Workout log started", body = SessionWithLogs),
        (status = 200, description = "Workout log already in progress", body = SessionWithLogs),
        (status = 400, description = "Invalid request", body = ErrorBody),
        (status = 404, description = "Workout or exercise not found", body = ErrorBody)
    )
)]
pub(crate) async fn start(
    State(state): State<HandlerState>,
    ApiPath(id): ApiPath<String>,
    OptionalJson(body): OptionalJson<StartSessionRequest>,
) -> Result<(StatusCode, Json<SessionWithLogs>), ApiError> {
    let response = handle_start_session(&state, &id, body).await?;
    let status = if response.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(response.session)))
}

#[utoipa::path(
    get,
    path = "/workouts/{id}/in-progress-workout",
    operation_id = "get_in_progress_workout_log",
    tag = "workout-logs",
    params(("id" = String, Path, description = "Workout ID")),
    responses(
        (status = 200, description = "Workout log in progress", body = SessionWithLogs),
        (status = 404, description = "No workout log in progress", body = ErrorBody)
    )
)]
pub(crate) async fn in_progress(
    State(state): State<HandlerState>,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<SessionWithLogs>, ApiError> {
    handle_get_active_session(&state, &id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::no_active_session(&id))
}

#[utoipa::path(
    get,
    path = "/workouts/{id}/logs/{log_id}",
    operation_id = "get_workout_log",
    tag = "workout-logs",
    params(
        ("id" = String, Path, description = "Workout ID"),
        ("log_id" = String, Path, description = "Workout log (session) ID")
    ),
    responses(
        (status = 200, description = "Workout log found", body = SessionWithLogs),
        (status = 404, description = "Workout log not found", body = ErrorBody)
    )
)]
pub(crate) async fn get_one(
    State(state): State<HandlerState>,
    ApiPath((id, log_id)): ApiPath<(String, String)>,
) -> Result<Json<SessionWithLogs>, ApiError> {
    Ok(Json(handle_get_session(&state, Some(&id), &log_id).await?))
}

#[utoipa::path(
    patch,
    path = "/workouts/{id}/logs/{log_id}/complete",
    operation_id = "complete_workout_log",
    tag = "workout-logs",
    params(
        ("id" = String, Path, description = "Workout ID"),
        ("log_id" = String, Path, description = "Workout log (session) ID")
    ),
    request_body(content = Option<CompleteSessionRequest>, description = "Optional closing notes"),
    responses(
        (status = 200, description = "Workout log completed", body = SessionWithLogs),
        (status = 404, description = "Workout log not found", body = ErrorBody),
        (status = 409, description = "Workout log is no longer in progress", body = ErrorBody)
    )
)]
pub(crate) async fn complete(
    State(state): State<HandlerState>,
    ApiPath((id, log_id)): ApiPath<(String, String)>,
    OptionalJson(body): OptionalJson<CompleteSessionRequest>,
) -> Result<Json<SessionWithLogs>, ApiError> {
    let session = handle_complete_session(&state, Some(&id), &log_id, body).await?;
    Ok(Json(session))
}

#[utoipa::path(
    patch,
    path = "/workouts/{id}/logs/{log_id}/cancel",
    operation_id = "cancel_workout_log",
    tag = "workout-logs",
    params(
        ("id" = String, Path, description = "Workout ID"),
        ("log_id" = String, Path, description = "Workout log (session) ID")
    ),
    responses(
        (status = 200, description = "Workout log canceled", body = SessionWithLogs),
        (status = 404, description = "Workout log not found", body = ErrorBody),
        (status = 409, description = "Workout log is no longer in progress", body = ErrorBody)
    )
)]
pub(crate) async fn cancel(
    State(state): State<HandlerState>,
    ApiPath((id, log_id)): ApiPath<(String, String)>,
) -> Result<Json<SessionWithLogs>, ApiError> {
    Ok(Json(handle_cancel_session(&state, Some(&id), &log_id).await?))
}

#[utoipa::path(
    get,
    path = "/workouts/{id}/logs/{log_id}/exercises",
    operation_id = "list_exercise_logs",
    tag = "workout-logs",
    params(
        ("id" = String, Path, description = "Workout ID"),
        ("log_id" = String, Path, description = "Workout log (session) ID")
    ),
    responses(
        (status = 200, description = "Exercise logs in creation order", body = Vec<ExerciseSessionLog>),
        (status = 404, description = "Workout log not found", body = ErrorBody)
    )
)]
pub(crate) async fn list_exercise_logs(
    State(state): State<HandlerState>,
    ApiPath((id, log_id)): ApiPath<(String, String)>,
) -> Result<Json<Vec<ExerciseSessionLog>>, ApiError> {
    let logs = handle_list_exercise_logs(&state, Some(&id), &log_id).await?;
    Ok(Json(logs))
}

#[utoipa::path(
    post,
    path = "/workouts/{id}/logs/{log_id}/exercises",
    operation_id = "add_exercise_log",
    tag = "workout-logs",
    params(
        ("id" = String, Path, description = "Workout ID"),
        ("log_id" = String, Path, description = "Workout log (session) ID")
    ),
    request_body = AddExerciseLogRequest,
    responses(
        (status = 201, description = "Exercise log appended", body = ExerciseSessionLog),
        (status = 400, description = "Invalid request", body = ErrorBody),
        (status = 404, description = "Workout log or exercise not found", body = ErrorBody),
        (status = 409, description = "Workout log is no longer in progress", body = ErrorBody)
    )
)]
pub(crate) async fn add_exercise_log(
    State(state): State<HandlerState>,
    ApiPath((id, log_id)): ApiPath<(String, String)>,
    ApiJson(body): ApiJson<AddExerciseLogRequest>,
) -> Result<(StatusCode, Json<ExerciseSessionLog>), ApiError> {
    let log = handle_add_exercise_log(&state, Some(&id), &log_id, body).await?;
    Ok((StatusCode::CREATED, Json(log)))
}

#[utoipa::path(
    patch,
    path = "/workouts/{id}/logs/{log_id}/exercises/{exercise_log_id}/complete",
    operation_id = "complete_exercise_log",
    tag = "workout-logs",
    params(
        ("id" = String, Path, description = "Workout ID"),
        ("log_id" = String, Path, description = "Workout log (session) ID"),
        ("exercise_log_id" = String, Path, description = "Exercise log ID")
    ),
    responses(
        (status = 200, description = "Exercise log completed", body = ExerciseSessionLog),
        (status = 404, description = "Exercise log not found", body = ErrorBody)
    )
)]
pub(crate) async fn complete_exercise_log(
    State(state): State<HandlerState>,
    ApiPath((id, log_id, exercise_log_id)): ApiPath<(String, String, String)>,
) -> Result<Json<ExerciseSessionLog>, ApiError> {
    let log = handle_complete_exercise_log(&state, Some(&id), &log_id, &exercise_log_id).await?;
    Ok(Json(log))
}

#[utoipa::path(
    get,
    path = "/logs",
    operation_id = "list_workout_logs",
    tag = "workout-logs",
    params(ListSessionsFilter),
    responses(
        (status = 200, description = "Workout logs, most recent first", body = Vec<WorkoutSession>),
        (status = 400, description = "Invalid pagination", body = ErrorBody)
    )
)]
pub(crate) async fn list(
    State(state): State<HandlerState>,
    ApiQuery(filter): ApiQuery<ListSessionsFilter>,
) -> Result<Json<Vec<WorkoutSession>>, ApiError> {
    Ok(Json(handle_list_sessions(&state, filter).await?))
}
