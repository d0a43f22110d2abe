// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Error types for setbook-core.
//!
//! Provides a unified error type whose variants are matched explicitly at the
//! HTTP boundary. Every variant carries a stable machine-readable code, an
//! [`ErrorKind`] and the HTTP status code it maps to.

use thiserror::Error;

/// Result type using CoreError
pub type Result<T> = std::result::Result<T, CoreError>;

/// Broad category of a [`CoreError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A referenced entity does not exist.
    NotFound,
    /// The request was malformed or out of range.
    Validation,
    /// The request conflicts with a domain rule (e.g. logging against a finished session).
    Conflict,
    /// Unexpected failure (storage, serialization).
    Internal,
}

/// Core errors that can occur during request processing.
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum CoreError {
    /// Exercise was not found in the catalog.
    #[error("Exercise '{exercise_id}' not found")]
    ExerciseNotFound {
        /// The exercise ID that was not found.
        exercise_id: String,
    },

    /// Workout template was not found.
    #[error("Workout '{workout_id}' not found")]
    WorkoutNotFound {
        /// The workout ID that was not found.
        workout_id: String,
    },

    /// Exercise prescription was not found under the given workout.
    #[error("Workout exercise '{workout_exercise_id}' not found in workout '{workout_id}'")]
    WorkoutExerciseNotFound {
        /// The workout the prescription was looked up in.
        workout_id: String,
        /// The prescription ID that was not found.
        workout_exercise_id: String,
    },

    /// Workout session (workout log) was not found.
    #[error("Workout log '{session_id}' not found")]
    SessionNotFound {
        /// The session ID that was not found.
        session_id: String,
    },

    /// Exercise log was not found under the given session.
    #[error("Exercise log '{exercise_log_id}' not found in workout log '{session_id}'")]
    ExerciseLogNotFound {
        /// The session the exercise log was looked up in.
        session_id: String,
        /// The exercise log ID that was not found.
        exercise_log_id: String,
    },

    /// Session is in an invalid state for the requested operation.
    #[error("Workout log '{session_id}' is in invalid state: expected '{expected}', got '{actual}'")]
    InvalidSessionState {
        /// The session ID.
        session_id: String,
        /// The expected status.
        expected: String,
        /// The actual status.
        actual: String,
    },

    /// Exercise cannot be deleted while workout templates reference it.
    #[error("Cannot delete exercise '{exercise_id}': referenced by {references} workout exercise(s)")]
    ExerciseInUse {
        /// The exercise ID.
        exercise_id: String,
        /// Number of prescriptions referencing it.
        references: i64,
    },

    /// Input validation failed.
    #[error("Validation error for '{field}': {message}")]
    ValidationError {
        /// The field that failed validation.
        field: String,
        /// The validation error message.
        message: String,
    },

    /// Database operation failed.
    #[error("Database error during '{operation}': {details}")]
    DatabaseError {
        /// The operation that failed.
        operation: String,
        /// Error details.
        details: String,
    },
}

impl CoreError {
    /// Shorthand for a [`CoreError::ValidationError`].
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Get the error code string for this error type.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ExerciseNotFound { .. } => "EXERCISE_NOT_FOUND",
            Self::WorkoutNotFound { .. } => "WORKOUT_NOT_FOUND",
            Self::WorkoutExerciseNotFound { .. } => "WORKOUT_EXERCISE_NOT_FOUND",
            Self::SessionNotFound { .. } => "WORKOUT_LOG_NOT_FOUND",
            Self::ExerciseLogNotFound { .. } => "EXERCISE_LOG_NOT_FOUND",
            Self::InvalidSessionState { .. } => "INVALID_WORKOUT_LOG_STATE",
            Self::ExerciseInUse { .. } => "EXERCISE_IN_USE",
            Self::ValidationError { .. } => "VALIDATION_ERROR",
            Self::DatabaseError { .. } => "DATABASE_ERROR",
        }
    }

    /// Get the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ExerciseNotFound { .. }
            | Self::WorkoutNotFound { .. }
            | Self::WorkoutExerciseNotFound { .. }
            | Self::SessionNotFound { .. }
            | Self::ExerciseLogNotFound { .. } => ErrorKind::NotFound,
            Self::InvalidSessionState { .. } | Self::ExerciseInUse { .. } => ErrorKind::Conflict,
            Self::ValidationError { .. } => ErrorKind::Validation,
            Self::DatabaseError { .. } => ErrorKind::Internal,
        }
    }

    /// HTTP status code this error is reported with.
    pub fn status_code(&self) -> u16 {
        match self.kind() {
            ErrorKind::NotFound => 404,
            ErrorKind::Validation => 400,
            ErrorKind::Conflict => 409,
            ErrorKind::Internal => 500,
        }
    }

    /// Whether this is a "not found" condition.
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

impl From<sqlx::Error> for CoreError {
    fn from(err: sqlx::Error) -> Self {
        CoreError::DatabaseError {
            operation: "query".to_string(),
            details: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::DatabaseError {
            operation: "json".to_string(),
            details: err.to_string(),
        }
    }
}
