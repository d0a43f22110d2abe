// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Domain model and request types.
//!
//! Output types serialize to camelCase JSON. Request types are deserialized
//! from request bodies and checked with [`crate::validation::Validate`] before
//! any handler touches storage.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Rest period applied when neither the request nor the template prescribes one.
pub const DEFAULT_REST_SECONDS: i32 = 60;

/// Default prescription values when adding an exercise to a workout.
pub const DEFAULT_SERIES: i32 = 3;
/// Default repetitions per series.
pub const DEFAULT_REPS: i32 = 12;

// ============================================================================
// Exercise catalog
// ============================================================================

/// Exercise definition from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Muscle group.
    pub muscle: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
    /// When the exercise was created.
    pub created_at: DateTime<Utc>,
    /// When the exercise was last edited.
    pub updated_at: DateTime<Utc>,
}

/// Request to create a catalog exercise.
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct NewExercise {
    /// Display name (at least 3 characters).
    pub name: String,
    /// Muscle group.
    #[serde(default)]
    pub muscle: Option<String>,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Partial update of a catalog exercise.
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ExerciseUpdate {
    /// New display name.
    #[serde(default)]
    pub name: Option<String>,
    /// New muscle group.
    #[serde(default)]
    pub muscle: Option<String>,
    /// New description.
    #[serde(default)]
    pub description: Option<String>,
}

/// A prescription referencing an exercise, together with its workout.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ExerciseUsage {
    /// The prescription.
    #[serde(flatten)]
    pub prescription: WorkoutExercise,
    /// The workout owning the prescription.
    pub workout: Workout,
}

/// Exercise with every workout prescription that references it.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ExerciseWithWorkouts {
    /// The exercise.
    #[serde(flatten)]
    pub exercise: Exercise,
    /// Prescriptions referencing the exercise.
    pub workouts: Vec<ExerciseUsage>,
}

// ============================================================================
// Workout templates
// ============================================================================

/// Workout template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// When the workout was created.
    pub created_at: DateTime<Utc>,
    /// When the workout was last edited.
    pub updated_at: DateTime<Utc>,
}

/// Exercise prescription within a workout template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct WorkoutExercise {
    /// Unique identifier.
    pub id: String,
    /// Owning workout.
    pub workout_id: String,
    /// Prescribed exercise.
    pub exercise_id: String,
    /// Advisory sort key; neither unique nor contiguous.
    #[sqlx(rename = "order_index")]
    pub order: i32,
    /// Number of series.
    pub series: i32,
    /// Repetitions per series.
    pub reps: i32,
    /// Prescribed weight.
    pub weight: f64,
    /// Rest between series, in seconds.
    #[sqlx(rename = "rest_seconds")]
    pub rest: i32,
    /// When the prescription was created.
    pub created_at: DateTime<Utc>,
    /// When the prescription was last edited.
    pub updated_at: DateTime<Utc>,
}

/// Prescription together with the catalog exercise it references.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct WorkoutExerciseDetail {
    /// The prescription.
    #[serde(flatten)]
    pub prescription: WorkoutExercise,
    /// The referenced exercise.
    pub exercise: Exercise,
}

/// Workout with its ordered prescriptions.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct WorkoutWithExercises {
    /// The workout.
    #[serde(flatten)]
    pub workout: Workout,
    /// Prescriptions, ordered by order index.
    pub exercises: Vec<WorkoutExerciseDetail>,
}

/// Request to create a workout template.
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct NewWorkout {
    /// Display name (at least 3 characters).
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Partial update of a workout template.
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct WorkoutUpdate {
    /// New display name.
    #[serde(default)]
    pub name: Option<String>,
    /// New description.
    #[serde(default)]
    pub description: Option<String>,
}

fn default_series() -> i32 {
    DEFAULT_SERIES
}

fn default_reps() -> i32 {
    DEFAULT_REPS
}

fn default_rest() -> i32 {
    DEFAULT_REST_SECONDS
}

/// Request to add an exercise prescription to a workout.
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct NewWorkoutExercise {
    /// Catalog exercise to prescribe.
    pub exercise_id: String,
    /// Sort key (positive).
    pub order: i32,
    /// Number of series.
    #[serde(default = "default_series")]
    pub series: i32,
    /// Repetitions per series.
    #[serde(default = "default_reps")]
    pub reps: i32,
    /// Prescribed weight.
    #[serde(default)]
    pub weight: f64,
    /// Rest between series, in seconds.
    #[serde(default = "default_rest")]
    pub rest: i32,
}

/// Partial update of an exercise prescription.
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct WorkoutExerciseUpdate {
    /// New sort key.
    #[serde(default)]
    pub order: Option<i32>,
    /// New number of series.
    #[serde(default)]
    pub series: Option<i32>,
    /// New repetitions per series.
    #[serde(default)]
    pub reps: Option<i32>,
    /// New weight.
    #[serde(default)]
    pub weight: Option<f64>,
    /// New rest, in seconds.
    #[serde(default)]
    pub rest: Option<i32>,
}

// ============================================================================
// Workout sessions
// ============================================================================

/// Lifecycle state of a workout session.
///
/// Sessions are created `IN_PROGRESS` and move exactly once to `COMPLETED`
/// or `CANCELED`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    /// Session is being performed.
    InProgress,
    /// Session was finished.
    Completed,
    /// Session was abandoned.
    Canceled,
}

impl SessionStatus {
    /// Storage/wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::Canceled => "CANCELED",
        }
    }

    /// Whether the session can no longer change state.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown session status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown session status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for SessionStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IN_PROGRESS" => Ok(Self::InProgress),
            "COMPLETED" => Ok(Self::Completed),
            "CANCELED" => Ok(Self::Canceled),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// One concrete occurrence of performing a workout template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSession {
    /// Unique identifier.
    pub id: String,
    /// Workout template the session was started from.
    pub workout_id: String,
    /// When the session started.
    pub start_time: DateTime<Utc>,
    /// When the session was completed or canceled.
    pub end_time: Option<DateTime<Utc>>,
    /// Lifecycle state.
    pub status: SessionStatus,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Record creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

/// One performed set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ExerciseSet {
    /// Weight lifted (non-negative).
    pub weight: f64,
    /// Repetitions performed (positive).
    pub reps: i32,
    /// Whether the set was finished.
    pub completed: bool,
    /// When the set was recorded.
    pub timestamp: DateTime<Utc>,
}

/// Catalog fields copied into an exercise log when it is created.
///
/// Later catalog edits do not change the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ExerciseSnapshot {
    /// Exercise name at snapshot time.
    pub name: String,
    /// Muscle group at snapshot time.
    pub muscle: Option<String>,
    /// Description at snapshot time.
    pub description: Option<String>,
    /// Catalog creation time of the exercise.
    pub created_at: DateTime<Utc>,
    /// Catalog edit time of the exercise at snapshot time.
    pub updated_at: DateTime<Utc>,
}

impl From<&Exercise> for ExerciseSnapshot {
    fn from(exercise: &Exercise) -> Self {
        Self {
            name: exercise.name.clone(),
            muscle: exercise.muscle.clone(),
            description: exercise.description.clone(),
            created_at: exercise.created_at,
            updated_at: exercise.updated_at,
        }
    }
}

/// Snapshot plus performance record for one exercise within a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ExerciseSessionLog {
    /// Unique identifier.
    pub id: String,
    /// Owning session.
    pub workout_session_id: String,
    /// Catalog exercise the snapshot was taken from.
    pub exercise_id: String,
    /// Template prescription this log performs.
    pub workout_exercise_id: String,
    /// Catalog snapshot.
    pub exercise: ExerciseSnapshot,
    /// Performed sets, in order.
    #[serde(rename = "series")]
    pub sets: Vec<ExerciseSet>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Whether the exercise was finished.
    pub completed: bool,
    /// When the exercise was marked finished.
    pub completed_at: Option<DateTime<Utc>>,
    /// Rest between sets, in seconds.
    pub rest: i32,
    /// Record creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

/// Session together with its exercise logs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SessionWithLogs {
    /// The session.
    #[serde(flatten)]
    pub session: WorkoutSession,
    /// Exercise logs in creation order.
    pub exercise_logs: Vec<ExerciseSessionLog>,
}

fn default_completed() -> bool {
    true
}

/// A set as supplied by the client.
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SetInput {
    /// Weight lifted (non-negative).
    pub weight: f64,
    /// Repetitions performed (positive).
    pub reps: i32,
    /// Whether the set was finished (default: true).
    #[serde(default = "default_completed")]
    pub completed: bool,
    /// When the set was performed; defaults to the time of the request.
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl SetInput {
    /// Convert into a stored set, stamping it with `now` when no timestamp was given.
    pub fn into_set(self, now: DateTime<Utc>) -> ExerciseSet {
        ExerciseSet {
            weight: self.weight,
            reps: self.reps,
            completed: self.completed,
            timestamp: self.timestamp.unwrap_or(now),
        }
    }
}

/// One prescription line supplied when starting a session.
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ExercisePrescription {
    /// Template prescription (workout exercise) ID.
    #[serde(rename = "id")]
    pub workout_exercise_id: String,
    /// Catalog exercise ID.
    pub exercise_id: String,
    /// Sets to record verbatim.
    #[serde(default, alias = "sets")]
    pub series: Vec<SetInput>,
    /// Explicit rest override, in seconds.
    #[serde(default)]
    pub rest: Option<i32>,
    /// Free-form notes.
    #[serde(default)]
    pub notes: Option<String>,
}

/// Request to start (or resume) a session for a workout.
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct StartSessionRequest {
    /// Session notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// Workout ID echoed in the body; must match the target workout when present.
    #[serde(default)]
    pub workout_id: Option<String>,
    /// Prescription lines to snapshot into exercise logs.
    #[serde(default)]
    pub exercises: Vec<ExercisePrescription>,
}

/// Result of starting a session.
#[derive(Debug, Clone)]
pub struct StartSessionResponse {
    /// The new or already active session.
    pub session: SessionWithLogs,
    /// `true` if a new session was created, `false` if an active one was resumed.
    pub created: bool,
}

/// Request to complete a session.
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CompleteSessionRequest {
    /// Replaces the session notes when non-empty.
    #[serde(default)]
    pub notes: Option<String>,
}

/// Request to append an exercise log to an active session.
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct AddExerciseLogRequest {
    /// Catalog exercise ID.
    pub exercise_id: String,
    /// Template prescription ID.
    pub workout_exercise_id: String,
    /// Sets performed.
    #[serde(default, alias = "sets")]
    pub series: Vec<SetInput>,
    /// Free-form notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// Explicit rest override, in seconds.
    #[serde(default)]
    pub rest: Option<i32>,
}

/// Default page size for session listings.
pub const DEFAULT_PAGE_LIMIT: i64 = 20;
/// Largest accepted page size.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Filter and pagination for listing sessions.
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(
    feature = "utoipa",
    derive(utoipa::IntoParams),
    into_params(parameter_in = Query)
)]
#[serde(rename_all = "camelCase")]
pub struct ListSessionsFilter {
    /// Restrict to one workout.
    #[serde(default)]
    pub workout_id: Option<String>,
    /// Page size (default 20).
    #[serde(default)]
    pub limit: Option<i64>,
    /// 1-based page number (default 1).
    #[serde(default)]
    pub page: Option<i64>,
}

impl ListSessionsFilter {
    /// Effective page size.
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_PAGE_LIMIT)
    }

    /// Effective 1-based page number.
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1)
    }

    /// Row offset: `(page - 1) * limit`, or `None` if it does not fit in an `i64`.
    pub fn checked_offset(&self) -> Option<i64> {
        self.page().checked_sub(1)?.checked_mul(self.limit())
    }

    /// Row offset: `(page - 1) * limit`, saturating at `i64::MAX`.
    pub fn offset(&self) -> i64 {
        self.checked_offset().unwrap_or(i64::MAX)
    }
}
