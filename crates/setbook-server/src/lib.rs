// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Setbook Server - HTTP API for exercises, workouts and workout logs
//!
//! Thin axum layer over [`setbook_core`]: every route extracts its input,
//! calls one core handler and maps [`setbook_core::CoreError`] to a JSON
//! error body through [`error::ApiError`].

pub mod error;
pub mod extract;
pub mod openapi;
pub mod routes;

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use setbook_core::HandlerState;

/// Build the application router over the given handler state.
pub fn router(state: HandlerState) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/documentation/openapi.json", get(openapi::openapi_json))
        .merge(routes::exercises::routes())
        .merge(routes::workouts::routes())
        .merge(routes::sessions::routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
