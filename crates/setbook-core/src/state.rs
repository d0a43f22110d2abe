// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Shared handler state and health check.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, instrument};

use crate::persistence::Persistence;

/// Shared state for all handlers.
///
/// Holds the persistence backend and server metadata for health checks.
#[derive(Clone)]
pub struct HandlerState {
    /// Storage backend.
    pub persistence: Arc<dyn Persistence>,
    /// When the server started (for uptime calculation).
    pub start_time: Instant,
    /// Server version string.
    pub version: String,
}

impl HandlerState {
    /// Create handler state over the given persistence backend.
    pub fn new(persistence: Arc<dyn Persistence>) -> Self {
        Self {
            persistence,
            start_time: Instant::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Server uptime in milliseconds.
    pub fn uptime_ms(&self) -> i64 {
        self.start_time.elapsed().as_millis() as i64
    }
}

/// Health check result.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckResponse {
    /// Whether the database answered.
    pub healthy: bool,
    /// Server version.
    pub version: String,
    /// Uptime in milliseconds.
    pub uptime_ms: i64,
}

/// Report database connectivity, version and uptime.
#[instrument(skip(state))]
pub async fn handle_health_check(state: &HandlerState) -> HealthCheckResponse {
    debug!("Health check requested");

    let healthy = state
        .persistence
        .health_check_db()
        .await
        .unwrap_or(false);

    HealthCheckResponse {
        healthy,
        version: state.version.clone(),
        uptime_ms: state.uptime_ms(),
    }
}
