// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! HTTP error mapping.
//!
//! Every failure leaving the server is rendered as
//! `{ "statusCode", "error", "code", "message", "validationErrors"? }`.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::{error, warn};
use utoipa::ToSchema;

use setbook_core::{CoreError, ErrorKind};

/// Error returned by route handlers.
#[derive(Debug)]
pub enum ApiError {
    /// Failure reported by a core handler.
    Core(CoreError),
    /// Request could not be decoded (body, query or path).
    BadRequest {
        /// Where the request was malformed (`body`, `query`, `path`).
        source: &'static str,
        /// Decoder message.
        message: String,
    },
    /// Resource lookup that has no dedicated core error.
    NotFound {
        /// Machine-readable code.
        code: &'static str,
        /// Human-readable message.
        message: String,
    },
}

impl ApiError {
    /// No session is in progress for the workout.
    pub fn no_active_session(workout_id: &str) -> Self {
        Self::NotFound {
            code: "WORKOUT_LOG_NOT_FOUND",
            message: format!("No workout log in progress for workout '{}'", workout_id),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        Self::Core(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest {
            source: "body",
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest {
            source: "query",
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest {
            source: "path",
            message: rejection.body_text(),
        }
    }
}

/// JSON body of every error response.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ErrorBody {
    /// HTTP status code.
    status_code: u16,
    /// HTTP reason phrase.
    error: &'static str,
    /// Machine-readable error code, e.g. `WORKOUT_NOT_FOUND`.
    code: &'static str,
    message: String,
    /// Present on validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    validation_errors: Option<Vec<FieldError>>,
}

/// A rejected input field.
#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct FieldError {
    field: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, validation_errors) = match self {
            Self::Core(err) => {
                let status = StatusCode::from_u16(err.status_code())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                let code = err.error_code();
                match err.kind() {
                    ErrorKind::Internal => {
                        error!(code, error = %err, "Request failed");
                        (status, code, "Internal server error".to_string(), None)
                    }
                    ErrorKind::Validation => {
                        let message = err.to_string();
                        let fields = match err {
                            CoreError::ValidationError { field, message } => {
                                Some(vec![FieldError { field, message }])
                            }
                            _ => None,
                        };
                        (status, code, message, fields)
                    }
                    _ => (status, code, err.to_string(), None),
                }
            }
            Self::BadRequest { source, message } => {
                warn!(source, %message, "Malformed request");
                (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    message.clone(),
                    Some(vec![FieldError {
                        field: source.to_string(),
                        message,
                    }]),
                )
            }
            Self::NotFound { code, message } => (StatusCode::NOT_FOUND, code, message, None),
        };

        let body = ErrorBody {
            status_code: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Error"),
            code,
            message,
            validation_errors,
        };
        (status, Json(body)).into_response()
    }
}
