// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Route tables, one module per resource.

pub mod exercises;
pub mod sessions;
pub mod workouts;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use setbook_core::HandlerState;
use setbook_core::state::{HealthCheckResponse, handle_health_check};

/// `GET /health`: 200 when the database answers, 503 otherwise.
#[utoipa::path(
    get,
    path = "/health",
    operation_id = "health",
    tag = "health",
    responses(
        (status = 200, description = "Database reachable", body = HealthCheckResponse),
        (status = 503, description = "Database unreachable", body = HealthCheckResponse)
    )
)]
pub async fn health(State(state): State<HandlerState>) -> (StatusCode, Json<HealthCheckResponse>) {
    let response = handle_health_check(&state).await;
    let status = if response.healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(response))
}
