// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Setbook Core - exercise catalog, workout templates and workout sessions
//!
//! This crate holds everything behind the HTTP surface: the domain model,
//! request validation, the error taxonomy, configuration, persistence
//! (PostgreSQL and SQLite) and the handlers implementing each operation.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                     setbook-server                        │
//! │              (axum routes, JSON error mapping)            │
//! └───────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────┬──────────────────┬─────────────────────┐
//! │ catalog_handlers │ template_handlers│  session_handlers   │
//! │   (exercises)    │    (workouts)    │ (workout lifecycle) │
//! └──────────────────┴──────────────────┴─────────────────────┘
//!                              │
//!                              ▼
//! ┌───────────────────────────────────────────────────────────┐
//! │           Persistence (PostgreSQL | SQLite)               │
//! │  exercises, workouts, workout_exercises   (relational)    │
//! │  workout_sessions, exercise_session_logs  (document-like) │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! # Session lifecycle
//!
//! | Operation | Description |
//! |-----------|-------------|
//! | `start` | Create an `IN_PROGRESS` session with snapshotted exercise logs, or return the active one |
//! | `add exercise log` | Append a log to an `IN_PROGRESS` session |
//! | `complete exercise log` | Mark one log completed |
//! | `complete` / `cancel` | Move the session to `COMPLETED` / `CANCELED` exactly once |
//! | `list` | Sessions by start time, newest first, paginated |
//!
//! A workout has at most one `IN_PROGRESS` session at any time. Storage
//! enforces this with a unique partial index and a conditional insert, so
//! two concurrent starts yield one session.
//!
//! # Configuration
//!
//! See [`config::Config::from_env`].

#![deny(missing_docs)]

/// Exercise catalog handlers.
pub mod catalog_handlers;

/// Configuration loading from environment variables.
pub mod config;

/// Error types.
pub mod error;

/// Embedded database migrations.
pub mod migrations;

/// Domain model and request types.
pub mod models;

/// Persistence trait and backends.
pub mod persistence;

/// Workout session lifecycle handlers.
pub mod session_handlers;

/// Shared handler state and health check.
pub mod state;

/// Workout template handlers.
pub mod template_handlers;

/// Request validation.
pub mod validation;

pub use error::{CoreError, ErrorKind, Result};
pub use persistence::{Persistence, PostgresPersistence, SqlitePersistence};
pub use state::HandlerState;
