// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! SQLite-backed persistence implementation.

use std::path::Path;

use chrono::{DateTime, Utc};
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqlitePoolOptions};
use sqlx::types::Json;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::error::CoreError;
use crate::migrations;
use crate::models::{
    Exercise, ExerciseSessionLog, SessionStatus, Workout, WorkoutExercise, WorkoutSession,
};

use super::{ExerciseLogRecord, Persistence, SessionRecord, sessions_from_records};

const EXERCISE_LOG_INSERT: &str = r#"
    INSERT INTO exercise_session_logs (
        id, workout_session_id, exercise_id, workout_exercise_id,
        exercise_name, exercise_muscle, exercise_description,
        exercise_created_at, exercise_updated_at,
        sets, notes, completed, completed_at, rest_seconds, created_at, updated_at
    )
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)
"#;

const EXERCISE_LOG_INSERT_IF_ACTIVE: &str = r#"
    INSERT INTO exercise_session_logs (
        id, workout_session_id, exercise_id, workout_exercise_id,
        exercise_name, exercise_muscle, exercise_description,
        exercise_created_at, exercise_updated_at,
        sets, notes, completed, completed_at, rest_seconds, created_at, updated_at
    )
    SELECT ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16
    WHERE EXISTS (
        SELECT 1 FROM workout_sessions WHERE id = ?2 AND status = 'IN_PROGRESS'
    )
"#;

/// Bind the sixteen exercise log columns in insert order.
fn bind_exercise_log<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    log: &'q ExerciseSessionLog,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    query
        .bind(&log.id)
        .bind(&log.workout_session_id)
        .bind(&log.exercise_id)
        .bind(&log.workout_exercise_id)
        .bind(&log.exercise.name)
        .bind(&log.exercise.muscle)
        .bind(&log.exercise.description)
        .bind(log.exercise.created_at)
        .bind(log.exercise.updated_at)
        .bind(Json(&log.sets))
        .bind(&log.notes)
        .bind(log.completed)
        .bind(log.completed_at)
        .bind(log.rest)
        .bind(log.created_at)
        .bind(log.updated_at)
}

/// Append ` IN (?, ?, ...)` with one bind per ID.
fn push_id_list(builder: &mut QueryBuilder<'_, Sqlite>, ids: &[String]) {
    builder.push(" IN (");
    let mut separated = builder.separated(", ");
    for id in ids {
        separated.push_bind(id.clone());
    }
    builder.push(")");
}

/// SQLite-backed persistence provider.
#[derive(Clone)]
pub struct SqlitePersistence {
    pool: SqlitePool,
}

impl SqlitePersistence {
    /// Create a new SQLite persistence provider from an existing pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create and initialize a SQLite persistence from a file path.
    ///
    /// Creates missing parent directories and the database file, then runs
    /// all migrations.
    ///
    /// ```ignore
    /// let persistence = SqlitePersistence::from_path(".data/setbook.db").await?;
    /// ```
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| CoreError::DatabaseError {
                operation: "create_dir".to_string(),
                details: format!("Failed to create directory {:?}: {}", parent, e),
            })?;
        }

        let url = format!("sqlite:{}?mode=rwc", path.to_string_lossy());

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&url)
            .await
            .map_err(|e| CoreError::DatabaseError {
                operation: "connect".to_string(),
                details: format!("Failed to connect to SQLite at {:?}: {}", path, e),
            })?;

        migrations::run_sqlite(&pool)
            .await
            .map_err(|e| CoreError::DatabaseError {
                operation: "migrate".to_string(),
                details: format!("Failed to run migrations: {}", e),
            })?;

        Ok(Self { pool })
    }
}

#[async_trait::async_trait]
impl Persistence for SqlitePersistence {
    async fn insert_exercise(&self, exercise: &Exercise) -> Result<(), CoreError> {
        sqlx::query(
            r#"
            INSERT INTO exercises (id, name, muscle, description, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&exercise.id)
        .bind(&exercise.name)
        .bind(&exercise.muscle)
        .bind(&exercise.description)
        .bind(exercise.created_at)
        .bind(exercise.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_exercise(&self, exercise_id: &str) -> Result<Option<Exercise>, CoreError> {
        let exercise = sqlx::query_as::<_, Exercise>(
            r#"
            SELECT id, name, muscle, description, created_at, updated_at
            FROM exercises
            WHERE id = ?
            "#,
        )
        .bind(exercise_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(exercise)
    }

    async fn get_exercises_by_ids(
        &self,
        exercise_ids: &[String],
    ) -> Result<Vec<Exercise>, CoreError> {
        if exercise_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder = QueryBuilder::<Sqlite>::new(
            "SELECT id, name, muscle, description, created_at, updated_at FROM exercises WHERE id",
        );
        push_id_list(&mut builder, exercise_ids);

        let exercises = builder
            .build_query_as::<Exercise>()
            .fetch_all(&self.pool)
            .await?;

        Ok(exercises)
    }

    async fn list_exercises(&self) -> Result<Vec<Exercise>, CoreError> {
        let exercises = sqlx::query_as::<_, Exercise>(
            r#"
            SELECT id, name, muscle, description, created_at, updated_at
            FROM exercises
            ORDER BY name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(exercises)
    }

    async fn count_exercises(&self) -> Result<i64, CoreError> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM exercises")
            .fetch_one(&self.pool)
            .await?;

        Ok(row.0)
    }

    async fn update_exercise(&self, exercise: &Exercise) -> Result<bool, CoreError> {
        let result = sqlx::query(
            r#"
            UPDATE exercises
            SET name = ?1, muscle = ?2, description = ?3, updated_at = ?4
            WHERE id = ?5
            "#,
        )
        .bind(&exercise.name)
        .bind(&exercise.muscle)
        .bind(&exercise.description)
        .bind(exercise.updated_at)
        .bind(&exercise.id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_exercise(&self, exercise_id: &str) -> Result<bool, CoreError> {
        let result = sqlx::query("DELETE FROM exercises WHERE id = ?")
            .bind(exercise_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_exercise_references(&self, exercise_id: &str) -> Result<i64, CoreError> {
        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM workout_exercises WHERE exercise_id = ?")
                .bind(exercise_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(row.0)
    }

    async fn list_prescriptions_for_exercise(
        &self,
        exercise_id: &str,
    ) -> Result<Vec<WorkoutExercise>, CoreError> {
        let records = sqlx::query_as::<_, WorkoutExercise>(
            r#"
            SELECT id, workout_id, exercise_id, order_index, series, reps, weight,
                   rest_seconds, created_at, updated_at
            FROM workout_exercises
            WHERE exercise_id = ?
            ORDER BY created_at ASC, rowid ASC
            "#,
        )
        .bind(exercise_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    async fn insert_workout(&self, workout: &Workout) -> Result<(), CoreError> {
        sqlx::query(
            r#"
            INSERT INTO workouts (id, name, description, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&workout.id)
        .bind(&workout.name)
        .bind(&workout.description)
        .bind(workout.created_at)
        .bind(workout.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_workout(&self, workout_id: &str) -> Result<Option<Workout>, CoreError> {
        let workout = sqlx::query_as::<_, Workout>(
            r#"
            SELECT id, name, description, created_at, updated_at
            FROM workouts
            WHERE id = ?
            "#,
        )
        .bind(workout_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(workout)
    }

    async fn get_workouts_by_ids(
        &self,
        workout_ids: &[String],
    ) -> Result<Vec<Workout>, CoreError> {
        if workout_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder = QueryBuilder::<Sqlite>::new(
            "SELECT id, name, description, created_at, updated_at FROM workouts WHERE id",
        );
        push_id_list(&mut builder, workout_ids);

        let workouts = builder
            .build_query_as::<Workout>()
            .fetch_all(&self.pool)
            .await?;

        Ok(workouts)
    }

    async fn list_workouts(&self) -> Result<Vec<Workout>, CoreError> {
        let workouts = sqlx::query_as::<_, Workout>(
            r#"
            SELECT id, name, description, created_at, updated_at
            FROM workouts
            ORDER BY created_at DESC, rowid DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(workouts)
    }

    async fn update_workout(&self, workout: &Workout) -> Result<bool, CoreError> {
        let result = sqlx::query(
            r#"
            UPDATE workouts
            SET name = ?1, description = ?2, updated_at = ?3
            WHERE id = ?4
            "#,
        )
        .bind(&workout.name)
        .bind(&workout.description)
        .bind(workout.updated_at)
        .bind(&workout.id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_workout(&self, workout_id: &str) -> Result<bool, CoreError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM workout_exercises WHERE workout_id = ?")
            .bind(workout_id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM workouts WHERE id = ?")
            .bind(workout_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        tx.commit().await?;
        Ok(true)
    }

    async fn insert_workout_exercise(
        &self,
        workout_exercise: &WorkoutExercise,
    ) -> Result<(), CoreError> {
        sqlx::query(
            r#"
            INSERT INTO workout_exercises (
                id, workout_id, exercise_id, order_index, series, reps, weight,
                rest_seconds, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&workout_exercise.id)
        .bind(&workout_exercise.workout_id)
        .bind(&workout_exercise.exercise_id)
        .bind(workout_exercise.order)
        .bind(workout_exercise.series)
        .bind(workout_exercise.reps)
        .bind(workout_exercise.weight)
        .bind(workout_exercise.rest)
        .bind(workout_exercise.created_at)
        .bind(workout_exercise.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_workout_exercise(
        &self,
        workout_id: &str,
        workout_exercise_id: &str,
    ) -> Result<Option<WorkoutExercise>, CoreError> {
        let record = sqlx::query_as::<_, WorkoutExercise>(
            r#"
            SELECT id, workout_id, exercise_id, order_index, series, reps, weight,
                   rest_seconds, created_at, updated_at
            FROM workout_exercises
            WHERE id = ?1 AND workout_id = ?2
            "#,
        )
        .bind(workout_exercise_id)
        .bind(workout_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn list_workout_exercises(
        &self,
        workout_ids: &[String],
    ) -> Result<Vec<WorkoutExercise>, CoreError> {
        if workout_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder = QueryBuilder::<Sqlite>::new(
            r#"SELECT id, workout_id, exercise_id, order_index, series, reps, weight,
                      rest_seconds, created_at, updated_at
               FROM workout_exercises WHERE workout_id"#,
        );
        push_id_list(&mut builder, workout_ids);
        builder.push(" ORDER BY order_index ASC, created_at ASC, rowid ASC");

        let records = builder
            .build_query_as::<WorkoutExercise>()
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }

    async fn update_workout_exercise(
        &self,
        workout_exercise: &WorkoutExercise,
    ) -> Result<bool, CoreError> {
        let result = sqlx::query(
            r#"
            UPDATE workout_exercises
            SET order_index = ?1, series = ?2, reps = ?3, weight = ?4,
                rest_seconds = ?5, updated_at = ?6
            WHERE id = ?7 AND workout_id = ?8
            "#,
        )
        .bind(workout_exercise.order)
        .bind(workout_exercise.series)
        .bind(workout_exercise.reps)
        .bind(workout_exercise.weight)
        .bind(workout_exercise.rest)
        .bind(workout_exercise.updated_at)
        .bind(&workout_exercise.id)
        .bind(&workout_exercise.workout_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_workout_exercise(
        &self,
        workout_id: &str,
        workout_exercise_id: &str,
    ) -> Result<bool, CoreError> {
        let result = sqlx::query("DELETE FROM workout_exercises WHERE id = ?1 AND workout_id = ?2")
            .bind(workout_exercise_id)
            .bind(workout_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn replace_workout_exercises(
        &self,
        workout_id: &str,
        workout_exercises: &[WorkoutExercise],
    ) -> Result<(), CoreError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM workout_exercises WHERE workout_id = ?")
            .bind(workout_id)
            .execute(&mut *tx)
            .await?;

        for we in workout_exercises {
            sqlx::query(
                r#"
                INSERT INTO workout_exercises (
                    id, workout_id, exercise_id, order_index, series, reps, weight,
                    rest_seconds, created_at, updated_at
                )
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&we.id)
            .bind(workout_id)
            .bind(&we.exercise_id)
            .bind(we.order)
            .bind(we.series)
            .bind(we.reps)
            .bind(we.weight)
            .bind(we.rest)
            .bind(we.created_at)
            .bind(we.updated_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn insert_session_if_none_active(
        &self,
        session: &WorkoutSession,
        exercise_logs: &[ExerciseSessionLog],
    ) -> Result<bool, CoreError> {
        let mut tx = self.pool.begin().await?;

        // uq_workout_sessions_active turns a second IN_PROGRESS row into a no-op
        let result = sqlx::query(
            r#"
            INSERT INTO workout_sessions (
                id, workout_id, start_time, end_time, status, notes, created_at, updated_at
            )
            VALUES (?1, ?2, ?3, NULL, 'IN_PROGRESS', ?4, ?5, ?6)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(&session.id)
        .bind(&session.workout_id)
        .bind(session.start_time)
        .bind(&session.notes)
        .bind(session.created_at)
        .bind(session.updated_at)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        for log in exercise_logs {
            bind_exercise_log(sqlx::query(EXERCISE_LOG_INSERT), log)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(true)
    }

    async fn get_session(&self, session_id: &str) -> Result<Option<WorkoutSession>, CoreError> {
        let record = sqlx::query_as::<_, SessionRecord>(
            r#"
            SELECT id, workout_id, start_time, end_time, status, notes, created_at, updated_at
            FROM workout_sessions
            WHERE id = ?
            "#,
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?;

        record.map(WorkoutSession::try_from).transpose()
    }

    async fn get_active_session(
        &self,
        workout_id: &str,
    ) -> Result<Option<WorkoutSession>, CoreError> {
        let record = sqlx::query_as::<_, SessionRecord>(
            r#"
            SELECT id, workout_id, start_time, end_time, status, notes, created_at, updated_at
            FROM workout_sessions
            WHERE workout_id = ? AND status = 'IN_PROGRESS'
            "#,
        )
        .bind(workout_id)
        .fetch_optional(&self.pool)
        .await?;

        record.map(WorkoutSession::try_from).transpose()
    }

    async fn finish_session(
        &self,
        session_id: &str,
        status: SessionStatus,
        end_time: DateTime<Utc>,
        notes: Option<&str>,
    ) -> Result<bool, CoreError> {
        let result = sqlx::query(
            r#"
            UPDATE workout_sessions
            SET status = ?1,
                end_time = ?2,
                updated_at = ?2,
                notes = COALESCE(?3, notes)
            WHERE id = ?4
              AND status = 'IN_PROGRESS'
            "#,
        )
        .bind(status.as_str())
        .bind(end_time)
        .bind(notes)
        .bind(session_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_sessions(
        &self,
        workout_id: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<WorkoutSession>, CoreError> {
        let records = sqlx::query_as::<_, SessionRecord>(
            r#"
            SELECT id, workout_id, start_time, end_time, status, notes, created_at, updated_at
            FROM workout_sessions
            WHERE (?1 IS NULL OR workout_id = ?1)
            ORDER BY start_time DESC, rowid DESC
            LIMIT ?2 OFFSET ?3
            "#,
        )
        .bind(workout_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        sessions_from_records(records)
    }

    async fn insert_exercise_log_if_active(
        &self,
        exercise_log: &ExerciseSessionLog,
    ) -> Result<bool, CoreError> {
        let result = bind_exercise_log(sqlx::query(EXERCISE_LOG_INSERT_IF_ACTIVE), exercise_log)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn get_exercise_log(
        &self,
        session_id: &str,
        exercise_log_id: &str,
    ) -> Result<Option<ExerciseSessionLog>, CoreError> {
        let record = sqlx::query_as::<_, ExerciseLogRecord>(
            r#"
            SELECT id, workout_session_id, exercise_id, workout_exercise_id,
                   exercise_name, exercise_muscle, exercise_description,
                   exercise_created_at, exercise_updated_at,
                   sets, notes, completed, completed_at, rest_seconds, created_at, updated_at
            FROM exercise_session_logs
            WHERE id = ?1 AND workout_session_id = ?2
            "#,
        )
        .bind(exercise_log_id)
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.map(ExerciseSessionLog::from))
    }

    async fn list_exercise_logs(
        &self,
        session_id: &str,
    ) -> Result<Vec<ExerciseSessionLog>, CoreError> {
        let records = sqlx::query_as::<_, ExerciseLogRecord>(
            r#"
            SELECT id, workout_session_id, exercise_id, workout_exercise_id,
                   exercise_name, exercise_muscle, exercise_description,
                   exercise_created_at, exercise_updated_at,
                   sets, notes, completed, completed_at, rest_seconds, created_at, updated_at
            FROM exercise_session_logs
            WHERE workout_session_id = ?
            ORDER BY created_at ASC, rowid ASC
            "#,
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records.into_iter().map(ExerciseSessionLog::from).collect())
    }

    async fn complete_exercise_log(
        &self,
        session_id: &str,
        exercise_log_id: &str,
        completed_at: DateTime<Utc>,
    ) -> Result<bool, CoreError> {
        let result = sqlx::query(
            r#"
            UPDATE exercise_session_logs
            SET completed = 1,
                completed_at = COALESCE(completed_at, ?1),
                updated_at = ?1
            WHERE id = ?2 AND workout_session_id = ?3
            "#,
        )
        .bind(completed_at)
        .bind(exercise_log_id)
        .bind(session_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn health_check_db(&self) -> Result<bool, CoreError> {
        let result: Result<(i64,), _> = sqlx::query_as("SELECT 1").fetch_one(&self.pool).await;
        Ok(result.is_ok())
    }
}
