// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Persistence interfaces and backends for setbook-core.
//!
//! This module defines the persistence abstraction and backend implementations.
//! Catalog and template data live in relational tables; sessions and their
//! exercise logs are stored document-style (sets as a JSON array, the exercise
//! snapshot copied into the log row).

pub mod postgres;
pub mod sqlite;

pub use self::postgres::PostgresPersistence;
pub use self::sqlite::SqlitePersistence;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;

use crate::error::CoreError;
use crate::models::{
    Exercise, ExerciseSessionLog, ExerciseSet, ExerciseSnapshot, SessionStatus, Workout,
    WorkoutExercise, WorkoutSession,
};

/// Workout session row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SessionRecord {
    /// Unique identifier.
    pub id: String,
    /// Workout template reference (not a foreign key).
    pub workout_id: String,
    /// When the session started.
    pub start_time: DateTime<Utc>,
    /// When the session ended.
    pub end_time: Option<DateTime<Utc>>,
    /// Status (IN_PROGRESS, COMPLETED, CANCELED).
    pub status: String,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Row creation time.
    pub created_at: DateTime<Utc>,
    /// Row modification time.
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<SessionRecord> for WorkoutSession {
    type Error = CoreError;

    fn try_from(record: SessionRecord) -> Result<Self, Self::Error> {
        let status = record
            .status
            .parse::<SessionStatus>()
            .map_err(|e| CoreError::DatabaseError {
                operation: "decode_session".to_string(),
                details: e.to_string(),
            })?;

        Ok(WorkoutSession {
            id: record.id,
            workout_id: record.workout_id,
            start_time: record.start_time,
            end_time: record.end_time,
            status,
            notes: record.notes,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}

/// Exercise session log row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ExerciseLogRecord {
    /// Unique identifier.
    pub id: String,
    /// Owning session.
    pub workout_session_id: String,
    /// Catalog exercise reference.
    pub exercise_id: String,
    /// Template prescription reference.
    pub workout_exercise_id: String,
    /// Snapshot: exercise name.
    pub exercise_name: String,
    /// Snapshot: muscle group.
    pub exercise_muscle: Option<String>,
    /// Snapshot: description.
    pub exercise_description: Option<String>,
    /// Snapshot: catalog creation time.
    pub exercise_created_at: DateTime<Utc>,
    /// Snapshot: catalog edit time.
    pub exercise_updated_at: DateTime<Utc>,
    /// Performed sets as a JSON array.
    pub sets: Json<Vec<ExerciseSet>>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Whether the exercise was finished.
    pub completed: bool,
    /// When the exercise was finished.
    pub completed_at: Option<DateTime<Utc>>,
    /// Rest between sets, in seconds.
    pub rest_seconds: i32,
    /// Row creation time.
    pub created_at: DateTime<Utc>,
    /// Row modification time.
    pub updated_at: DateTime<Utc>,
}

impl From<ExerciseLogRecord> for ExerciseSessionLog {
    fn from(record: ExerciseLogRecord) -> Self {
        ExerciseSessionLog {
            id: record.id,
            workout_session_id: record.workout_session_id,
            exercise_id: record.exercise_id,
            workout_exercise_id: record.workout_exercise_id,
            exercise: ExerciseSnapshot {
                name: record.exercise_name,
                muscle: record.exercise_muscle,
                description: record.exercise_description,
                created_at: record.exercise_created_at,
                updated_at: record.exercise_updated_at,
            },
            sets: record.sets.0,
            notes: record.notes,
            completed: record.completed,
            completed_at: record.completed_at,
            rest: record.rest_seconds,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

pub(crate) fn sessions_from_records(
    records: Vec<SessionRecord>,
) -> Result<Vec<WorkoutSession>, CoreError> {
    records.into_iter().map(WorkoutSession::try_from).collect()
}

/// Persistence interface used by the handlers.
#[allow(missing_docs)]
#[async_trait]
pub trait Persistence: Send + Sync {
    // ========================================================================
    // Exercise catalog
    // ========================================================================

    async fn insert_exercise(&self, exercise: &Exercise) -> Result<(), CoreError>;

    async fn get_exercise(&self, exercise_id: &str) -> Result<Option<Exercise>, CoreError>;

    /// Fetch every exercise whose ID is in `exercise_ids` with a single query.
    ///
    /// Missing IDs are simply absent from the result.
    async fn get_exercises_by_ids(
        &self,
        exercise_ids: &[String],
    ) -> Result<Vec<Exercise>, CoreError>;

    /// List exercises ordered by name.
    async fn list_exercises(&self) -> Result<Vec<Exercise>, CoreError>;

    async fn count_exercises(&self) -> Result<i64, CoreError>;

    /// Overwrite name, muscle, description and updated_at. Returns false if no row matched.
    async fn update_exercise(&self, exercise: &Exercise) -> Result<bool, CoreError>;

    /// Returns false if no row matched.
    async fn delete_exercise(&self, exercise_id: &str) -> Result<bool, CoreError>;

    /// Number of workout prescriptions referencing an exercise.
    async fn count_exercise_references(&self, exercise_id: &str) -> Result<i64, CoreError>;

    /// Prescriptions referencing an exercise, across all workouts.
    async fn list_prescriptions_for_exercise(
        &self,
        exercise_id: &str,
    ) -> Result<Vec<WorkoutExercise>, CoreError>;

    // ========================================================================
    // Workout templates
    // ========================================================================

    async fn insert_workout(&self, workout: &Workout) -> Result<(), CoreError>;

    async fn get_workout(&self, workout_id: &str) -> Result<Option<Workout>, CoreError>;

    async fn get_workouts_by_ids(&self, workout_ids: &[String])
    -> Result<Vec<Workout>, CoreError>;

    /// List workouts, newest first.
    async fn list_workouts(&self) -> Result<Vec<Workout>, CoreError>;

    /// Overwrite name, description and updated_at. Returns false if no row matched.
    async fn update_workout(&self, workout: &Workout) -> Result<bool, CoreError>;

    /// Delete a workout and its prescriptions in one transaction.
    ///
    /// Returns false if the workout did not exist.
    async fn delete_workout(&self, workout_id: &str) -> Result<bool, CoreError>;

    async fn insert_workout_exercise(
        &self,
        workout_exercise: &WorkoutExercise,
    ) -> Result<(), CoreError>;

    /// Look up a prescription scoped to its workout.
    async fn get_workout_exercise(
        &self,
        workout_id: &str,
        workout_exercise_id: &str,
    ) -> Result<Option<WorkoutExercise>, CoreError>;

    /// Prescriptions of the given workouts, ordered by order index then creation time.
    async fn list_workout_exercises(
        &self,
        workout_ids: &[String],
    ) -> Result<Vec<WorkoutExercise>, CoreError>;

    /// Returns false if no row matched.
    async fn update_workout_exercise(
        &self,
        workout_exercise: &WorkoutExercise,
    ) -> Result<bool, CoreError>;

    /// Returns false if no row matched.
    async fn delete_workout_exercise(
        &self,
        workout_id: &str,
        workout_exercise_id: &str,
    ) -> Result<bool, CoreError>;

    /// Replace all prescriptions of a workout in one transaction.
    async fn replace_workout_exercises(
        &self,
        workout_id: &str,
        workout_exercises: &[WorkoutExercise],
    ) -> Result<(), CoreError>;

    // ========================================================================
    // Workout sessions
    // ========================================================================

    /// Insert an IN_PROGRESS session and its exercise logs atomically, unless
    /// the workout already has an IN_PROGRESS session.
    ///
    /// Returns false (and writes nothing) when an active session exists. The
    /// check and the insert are a single conditional write backed by a unique
    /// partial index, so concurrent starts cannot both succeed.
    async fn insert_session_if_none_active(
        &self,
        session: &WorkoutSession,
        exercise_logs: &[ExerciseSessionLog],
    ) -> Result<bool, CoreError>;

    async fn get_session(&self, session_id: &str) -> Result<Option<WorkoutSession>, CoreError>;

    /// The IN_PROGRESS session of a workout, if any.
    async fn get_active_session(
        &self,
        workout_id: &str,
    ) -> Result<Option<WorkoutSession>, CoreError>;

    /// Move an IN_PROGRESS session to a terminal status.
    ///
    /// `notes` replaces the existing notes when present. Returns false when
    /// the session does not exist or is no longer IN_PROGRESS.
    async fn finish_session(
        &self,
        session_id: &str,
        status: SessionStatus,
        end_time: DateTime<Utc>,
        notes: Option<&str>,
    ) -> Result<bool, CoreError>;

    /// Sessions ordered by start time descending.
    async fn list_sessions(
        &self,
        workout_id: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<WorkoutSession>, CoreError>;

    /// Insert an exercise log only if its session is IN_PROGRESS.
    ///
    /// Returns false (and writes nothing) otherwise.
    async fn insert_exercise_log_if_active(
        &self,
        exercise_log: &ExerciseSessionLog,
    ) -> Result<bool, CoreError>;

    async fn get_exercise_log(
        &self,
        session_id: &str,
        exercise_log_id: &str,
    ) -> Result<Option<ExerciseSessionLog>, CoreError>;

    /// Exercise logs of a session in creation order.
    async fn list_exercise_logs(
        &self,
        session_id: &str,
    ) -> Result<Vec<ExerciseSessionLog>, CoreError>;

    /// Mark an exercise log completed. An existing completed_at is kept.
    ///
    /// Returns false if no log matched under that session.
    async fn complete_exercise_log(
        &self,
        session_id: &str,
        exercise_log_id: &str,
        completed_at: DateTime<Utc>,
    ) -> Result<bool, CoreError>;

    async fn health_check_db(&self) -> Result<bool, CoreError>;
}
