// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! PostgreSQL persistence operations for setbook-core.
//!
//! Provides storage access functions for the exercise catalog, workout
//! templates, sessions and exercise logs. [`PostgresPersistence`] delegates
//! to these functions.

use chrono::{DateTime, Utc};
use sqlx::postgres::PgArguments;
use sqlx::query::Query;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres};

use crate::error::CoreError;
use crate::models::{
    Exercise, ExerciseSessionLog, SessionStatus, Workout, WorkoutExercise, WorkoutSession,
};

use super::{ExerciseLogRecord, Persistence, SessionRecord, sessions_from_records};

/// PostgreSQL-backed persistence implementation.
#[derive(Clone)]
pub struct PostgresPersistence {
    pool: PgPool,
}

impl PostgresPersistence {
    /// Create a new Postgres-backed persistence implementation.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const WORKOUT_EXERCISE_COLUMNS: &str = "id, workout_id, exercise_id, order_index, series, reps, weight, rest_seconds, created_at, updated_at";

const EXERCISE_LOG_INSERT: &str = r#"
    INSERT INTO exercise_session_logs (
        id, workout_session_id, exercise_id, workout_exercise_id,
        exercise_name, exercise_muscle, exercise_description,
        exercise_created_at, exercise_updated_at,
        sets, notes, completed, completed_at, rest_seconds, created_at, updated_at
    )
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
"#;

const EXERCISE_LOG_INSERT_IF_ACTIVE: &str = r#"
    INSERT INTO exercise_session_logs (
        id, workout_session_id, exercise_id, workout_exercise_id,
        exercise_name, exercise_muscle, exercise_description,
        exercise_created_at, exercise_updated_at,
        sets, notes, completed, completed_at, rest_seconds, created_at, updated_at
    )
    SELECT $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16
    WHERE EXISTS (
        SELECT 1 FROM workout_sessions WHERE id = $2 AND status = 'IN_PROGRESS'
    )
"#;

fn bind_exercise_log<'q>(
    query: Query<'q, Postgres, PgArguments>,
    log: &'q ExerciseSessionLog,
) -> Query<'q, Postgres, PgArguments> {
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

// ============================================================================
// Exercise Operations
// ============================================================================

/// Insert a catalog exercise.
pub async fn insert_exercise(pool: &PgPool, exercise: &Exercise) -> Result<(), CoreError> {
    sqlx::query(
        r#"
        INSERT INTO exercises (id, name, muscle, description, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(&exercise.id)
    .bind(&exercise.name)
    .bind(&exercise.muscle)
    .bind(&exercise.description)
    .bind(exercise.created_at)
    .bind(exercise.updated_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Get an exercise by ID.
pub async fn get_exercise(pool: &PgPool, exercise_id: &str) -> Result<Option<Exercise>, CoreError> {
    let exercise = sqlx::query_as::<_, Exercise>(
        r#"
        SELECT id, name, muscle, description, created_at, updated_at
        FROM exercises
        WHERE id = $1
        "#,
    )
    .bind(exercise_id)
    .fetch_optional(pool)
    .await?;

    Ok(exercise)
}

/// Get all exercises whose ID is in `exercise_ids`, in one round trip.
pub async fn get_exercises_by_ids(
    pool: &PgPool,
    exercise_ids: &[String],
) -> Result<Vec<Exercise>, CoreError> {
    if exercise_ids.is_empty() {
        return Ok(Vec::new());
    }

    let exercises = sqlx::query_as::<_, Exercise>(
        r#"
        SELECT id, name, muscle, description, created_at, updated_at
        FROM exercises
        WHERE id = ANY($1)
        "#,
    )
    .bind(exercise_ids)
    .fetch_all(pool)
    .await?;

    Ok(exercises)
}

/// List all exercises ordered by name.
pub async fn list_exercises(pool: &PgPool) -> Result<Vec<Exercise>, CoreError> {
    let exercises = sqlx::query_as::<_, Exercise>(
        r#"
        SELECT id, name, muscle, description, created_at, updated_at
        FROM exercises
        ORDER BY name ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(exercises)
}

/// Count catalog exercises.
pub async fn count_exercises(pool: &PgPool) -> Result<i64, CoreError> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM exercises")
        .fetch_one(pool)
        .await?;

    Ok(row.0)
}

/// Overwrite the editable fields of an exercise.
pub async fn update_exercise(pool: &PgPool, exercise: &Exercise) -> Result<bool, CoreError> {
    let result = sqlx::query(
        r#"
        UPDATE exercises
        SET name = $1, muscle = $2, description = $3, updated_at = $4
        WHERE id = $5
        "#,
    )
    .bind(&exercise.name)
    .bind(&exercise.muscle)
    .bind(&exercise.description)
    .bind(exercise.updated_at)
    .bind(&exercise.id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete an exercise.
pub async fn delete_exercise(pool: &PgPool, exercise_id: &str) -> Result<bool, CoreError> {
    let result = sqlx::query("DELETE FROM exercises WHERE id = $1")
        .bind(exercise_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Count prescriptions referencing an exercise.
pub async fn count_exercise_references(pool: &PgPool, exercise_id: &str) -> Result<i64, CoreError> {
    let row: (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM workout_exercises WHERE exercise_id = $1")
            .bind(exercise_id)
            .fetch_one(pool)
            .await?;

    Ok(row.0)
}

/// List prescriptions referencing an exercise.
pub async fn list_prescriptions_for_exercise(
    pool: &PgPool,
    exercise_id: &str,
) -> Result<Vec<WorkoutExercise>, CoreError> {
    let sql = format!(
        "SELECT {} FROM workout_exercises WHERE exercise_id = $1 ORDER BY created_at ASC, seq ASC",
        WORKOUT_EXERCISE_COLUMNS
    );
    let records = sqlx::query_as::<_, WorkoutExercise>(&sql)
        .bind(exercise_id)
        .fetch_all(pool)
        .await?;

    Ok(records)
}

// ============================================================================
// Workout Operations
// ============================================================================

/// Insert a workout template.
pub async fn insert_workout(pool: &PgPool, workout: &Workout) -> Result<(), CoreError> {
    sqlx::query(
        r#"
        INSERT INTO workouts (id, name, description, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(&workout.id)
    .bind(&workout.name)
    .bind(&workout.description)
    .bind(workout.created_at)
    .bind(workout.updated_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Get a workout template by ID.
pub async fn get_workout(pool: &PgPool, workout_id: &str) -> Result<Option<Workout>, CoreError> {
    let workout = sqlx::query_as::<_, Workout>(
        r#"
        SELECT id, name, description, created_at, updated_at
        FROM workouts
        WHERE id = $1
        "#,
    )
    .bind(workout_id)
    .fetch_optional(pool)
    .await?;

    Ok(workout)
}

/// Get all workouts whose ID is in `workout_ids`.
pub async fn get_workouts_by_ids(
    pool: &PgPool,
    workout_ids: &[String],
) -> Result<Vec<Workout>, CoreError> {
    if workout_ids.is_empty() {
        return Ok(Vec::new());
    }

    let workouts = sqlx::query_as::<_, Workout>(
        r#"
        SELECT id, name, description, created_at, updated_at
        FROM workouts
        WHERE id = ANY($1)
        "#,
    )
    .bind(workout_ids)
    .fetch_all(pool)
    .await?;

    Ok(workouts)
}

/// List workout templates, newest first.
pub async fn list_workouts(pool: &PgPool) -> Result<Vec<Workout>, CoreError> {
    let workouts = sqlx::query_as::<_, Workout>(
        r#"
        SELECT id, name, description, created_at, updated_at
        FROM workouts
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(workouts)
}

/// Overwrite the editable fields of a workout.
pub async fn update_workout(pool: &PgPool, workout: &Workout) -> Result<bool, CoreError> {
    let result = sqlx::query(
        r#"
        UPDATE workouts
        SET name = $1, description = $2, updated_at = $3
        WHERE id = $4
        "#,
    )
    .bind(&workout.name)
    .bind(&workout.description)
    .bind(workout.updated_at)
    .bind(&workout.id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete a workout and its prescriptions atomically.
pub async fn delete_workout(pool: &PgPool, workout_id: &str) -> Result<bool, CoreError> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM workout_exercises WHERE workout_id = $1")
        .bind(workout_id)
        .execute(&mut *tx)
        .await?;

    let result = sqlx::query("DELETE FROM workouts WHERE id = $1")
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

// ============================================================================
// Workout Exercise Operations
// ============================================================================

/// Insert a prescription.
pub async fn insert_workout_exercise<'e, E>(
    executor: E,
    workout_exercise: &WorkoutExercise,
) -> Result<(), CoreError>
where
    E: sqlx::PgExecutor<'e>,
{
    sqlx::query(
        r#"
        INSERT INTO workout_exercises (
            id, workout_id, exercise_id, order_index, series, reps, weight,
            rest_seconds, created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
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
    .execute(executor)
    .await?;

    Ok(())
}

/// Get a prescription scoped to its workout.
pub async fn get_workout_exercise(
    pool: &PgPool,
    workout_id: &str,
    workout_exercise_id: &str,
) -> Result<Option<WorkoutExercise>, CoreError> {
    let sql = format!(
        "SELECT {} FROM workout_exercises WHERE id = $1 AND workout_id = $2",
        WORKOUT_EXERCISE_COLUMNS
    );
    let record = sqlx::query_as::<_, WorkoutExercise>(&sql)
        .bind(workout_exercise_id)
        .bind(workout_id)
        .fetch_optional(pool)
        .await?;

    Ok(record)
}

/// List the prescriptions of several workouts in display order.
pub async fn list_workout_exercises(
    pool: &PgPool,
    workout_ids: &[String],
) -> Result<Vec<WorkoutExercise>, CoreError> {
    if workout_ids.is_empty() {
        return Ok(Vec::new());
    }

    let sql = format!(
        "SELECT {} FROM workout_exercises WHERE workout_id = ANY($1) \
         ORDER BY order_index ASC, created_at ASC, seq ASC",
        WORKOUT_EXERCISE_COLUMNS
    );
    let records = sqlx::query_as::<_, WorkoutExercise>(&sql)
        .bind(workout_ids)
        .fetch_all(pool)
        .await?;

    Ok(records)
}

/// Overwrite the prescription fields.
pub async fn update_workout_exercise(
    pool: &PgPool,
    workout_exercise: &WorkoutExercise,
) -> Result<bool, CoreError> {
    let result = sqlx::query(
        r#"
        UPDATE workout_exercises
        SET order_index = $1, series = $2, reps = $3, weight = $4,
            rest_seconds = $5, updated_at = $6
        WHERE id = $7 AND workout_id = $8
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
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete a prescription scoped to its workout.
pub async fn delete_workout_exercise(
    pool: &PgPool,
    workout_id: &str,
    workout_exercise_id: &str,
) -> Result<bool, CoreError> {
    let result = sqlx::query("DELETE FROM workout_exercises WHERE id = $1 AND workout_id = $2")
        .bind(workout_exercise_id)
        .bind(workout_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Replace every prescription of a workout in one transaction.
pub async fn replace_workout_exercises(
    pool: &PgPool,
    workout_id: &str,
    workout_exercises: &[WorkoutExercise],
) -> Result<(), CoreError> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM workout_exercises WHERE workout_id = $1")
        .bind(workout_id)
        .execute(&mut *tx)
        .await?;

    for workout_exercise in workout_exercises {
        insert_workout_exercise(&mut *tx, workout_exercise).await?;
    }

    tx.commit().await?;
    Ok(())
}

// ============================================================================
// Session Operations
// ============================================================================

/// Insert a session with its exercise logs unless the workout already has an
/// IN_PROGRESS session.
pub async fn insert_session_if_none_active(
    pool: &PgPool,
    session: &WorkoutSession,
    exercise_logs: &[ExerciseSessionLog],
) -> Result<bool, CoreError> {
    let mut tx = pool.begin().await?;

    // uq_workout_sessions_active turns a second IN_PROGRESS row into a no-op
    let result = sqlx::query(
        r#"
        INSERT INTO workout_sessions (
            id, workout_id, start_time, end_time, status, notes, created_at, updated_at
        )
        VALUES ($1, $2, $3, NULL, 'IN_PROGRESS', $4, $5, $6)
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

/// Get a session by ID.
pub async fn get_session(
    pool: &PgPool,
    session_id: &str,
) -> Result<Option<WorkoutSession>, CoreError> {
    let record = sqlx::query_as::<_, SessionRecord>(
        r#"
        SELECT id, workout_id, start_time, end_time, status, notes, created_at, updated_at
        FROM workout_sessions
        WHERE id = $1
        "#,
    )
    .bind(session_id)
    .fetch_optional(pool)
    .await?;

    record.map(WorkoutSession::try_from).transpose()
}

/// Get the IN_PROGRESS session of a workout.
pub async fn get_active_session(
    pool: &PgPool,
    workout_id: &str,
) -> Result<Option<WorkoutSession>, CoreError> {
    let record = sqlx::query_as::<_, SessionRecord>(
        r#"
        SELECT id, workout_id, start_time, end_time, status, notes, created_at, updated_at
        FROM workout_sessions
        WHERE workout_id = $1 AND status = 'IN_PROGRESS'
        "#,
    )
    .bind(workout_id)
    .fetch_optional(pool)
    .await?;

    record.map(WorkoutSession::try_from).transpose()
}

/// Move an IN_PROGRESS session to a terminal status. Returns false if the
/// session was not IN_PROGRESS.
pub async fn finish_session(
    pool: &PgPool,
    session_id: &str,
    status: SessionStatus,
    end_time: DateTime<Utc>,
    notes: Option<&str>,
) -> Result<bool, CoreError> {
    let result = sqlx::query(
        r#"
        UPDATE workout_sessions
        SET status = $1,
            end_time = $2,
            updated_at = $2,
            notes = COALESCE($3, notes)
        WHERE id = $4
          AND status = 'IN_PROGRESS'
        "#,
    )
    .bind(status.as_str())
    .bind(end_time)
    .bind(notes)
    .bind(session_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// List sessions, newest start first.
pub async fn list_sessions(
    pool: &PgPool,
    workout_id: Option<&str>,
    limit: i64,
    offset: i64,
) -> Result<Vec<WorkoutSession>, CoreError> {
    let records = sqlx::query_as::<_, SessionRecord>(
        r#"
        SELECT id, workout_id, start_time, end_time, status, notes, created_at, updated_at
        FROM workout_sessions
        WHERE ($1::TEXT IS NULL OR workout_id = $1)
        ORDER BY start_time DESC, id DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(workout_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    sessions_from_records(records)
}

// ============================================================================
// Exercise Log Operations
// ============================================================================

/// Insert an exercise log if its session is IN_PROGRESS.
pub async fn insert_exercise_log_if_active(
    pool: &PgPool,
    exercise_log: &ExerciseSessionLog,
) -> Result<bool, CoreError> {
    let result = bind_exercise_log(sqlx::query(EXERCISE_LOG_INSERT_IF_ACTIVE), exercise_log)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Get an exercise log scoped to its session.
pub async fn get_exercise_log(
    pool: &PgPool,
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
        WHERE id = $1 AND workout_session_id = $2
        "#,
    )
    .bind(exercise_log_id)
    .bind(session_id)
    .fetch_optional(pool)
    .await?;

    Ok(record.map(ExerciseSessionLog::from))
}

/// List the exercise logs of a session in creation order.
pub async fn list_exercise_logs(
    pool: &PgPool,
    session_id: &str,
) -> Result<Vec<ExerciseSessionLog>, CoreError> {
    let records = sqlx::query_as::<_, ExerciseLogRecord>(
        r#"
        SELECT id, workout_session_id, exercise_id, workout_exercise_id,
               exercise_name, exercise_muscle, exercise_description,
               exercise_created_at, exercise_updated_at,
               sets, notes, completed, completed_at, rest_seconds, created_at, updated_at
        FROM exercise_session_logs
        WHERE workout_session_id = $1
        ORDER BY created_at ASC, seq ASC
        "#,
    )
    .bind(session_id)
    .fetch_all(pool)
    .await?;

    Ok(records.into_iter().map(ExerciseSessionLog::from).collect())
}

/// Mark an exercise log completed, keeping an earlier completion time.
pub async fn complete_exercise_log(
    pool: &PgPool,
    session_id: &str,
    exercise_log_id: &str,
    completed_at: DateTime<Utc>,
) -> Result<bool, CoreError> {
    let result = sqlx::query(
        r#"
        UPDATE exercise_session_logs
        SET completed = TRUE,
            completed_at = COALESCE(completed_at, $1),
            updated_at = $1
        WHERE id = $2 AND workout_session_id = $3
        "#,
    )
    .bind(completed_at)
    .bind(exercise_log_id)
    .bind(session_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Check database connectivity.
pub async fn health_check_db(pool: &PgPool) -> Result<bool, CoreError> {
    let result: Result<(i32,), _> = sqlx::query_as("SELECT 1").fetch_one(pool).await;
    Ok(result.is_ok())
}

#[async_trait::async_trait]
impl Persistence for PostgresPersistence {
    async fn insert_exercise(&self, exercise: &Exercise) -> Result<(), CoreError> {
        insert_exercise(&self.pool, exercise).await
    }

    async fn get_exercise(&self, exercise_id: &str) -> Result<Option<Exercise>, CoreError> {
        get_exercise(&self.pool, exercise_id).await
    }

    async fn get_exercises_by_ids(
        &self,
        exercise_ids: &[String],
    ) -> Result<Vec<Exercise>, CoreError> {
        get_exercises_by_ids(&self.pool, exercise_ids).await
    }

    async fn list_exercises(&self) -> Result<Vec<Exercise>, CoreError> {
        list_exercises(&self.pool).await
    }

    async fn count_exercises(&self) -> Result<i64, CoreError> {
        count_exercises(&self.pool).await
    }

    async fn update_exercise(&self, exercise: &Exercise) -> Result<bool, CoreError> {
        update_exercise(&self.pool, exercise).await
    }

    async fn delete_exercise(&self, exercise_id: &str) -> Result<bool, CoreError> {
        delete_exercise(&self.pool, exercise_id).await
    }

    async fn count_exercise_references(&self, exercise_id: &str) -> Result<i64, CoreError> {
        count_exercise_references(&self.pool, exercise_id).await
    }

    async fn list_prescriptions_for_exercise(
        &self,
        exercise_id: &str,
    ) -> Result<Vec<WorkoutExercise>, CoreError> {
        list_prescriptions_for_exercise(&self.pool, exercise_id).await
    }

    async fn insert_workout(&self, workout: &Workout) -> Result<(), CoreError> {
        insert_workout(&self.pool, workout).await
    }

    async fn get_workout(&self, workout_id: &str) -> Result<Option<Workout>, CoreError> {
        get_workout(&self.pool, workout_id).await
    }

    async fn get_workouts_by_ids(
        &self,
        workout_ids: &[String],
    ) -> Result<Vec<Workout>, CoreError> {
        get_workouts_by_ids(&self.pool, workout_ids).await
    }

    async fn list_workouts(&self) -> Result<Vec<Workout>, CoreError> {
        list_workouts(&self.pool).await
    }

    async fn update_workout(&self, workout: &Workout) -> Result<bool, CoreError> {
        update_workout(&self.pool, workout).await
    }

    async fn delete_workout(&self, workout_id: &str) -> Result<bool, CoreError> {
        delete_workout(&self.pool, workout_id).await
    }

    async fn insert_workout_exercise(
        &self,
        workout_exercise: &WorkoutExercise,
    ) -> Result<(), CoreError> {
        insert_workout_exercise(&self.pool, workout_exercise).await
    }

    async fn get_workout_exercise(
        &self,
        workout_id: &str,
        workout_exercise_id: &str,
    ) -> Result<Option<WorkoutExercise>, CoreError> {
        get_workout_exercise(&self.pool, workout_id, workout_exercise_id).await
    }

    async fn list_workout_exercises(
        &self,
        workout_ids: &[String],
    ) -> Result<Vec<WorkoutExercise>, CoreError> {
        list_workout_exercises(&self.pool, workout_ids).await
    }

    async fn update_workout_exercise(
        &self,
        workout_exercise: &WorkoutExercise,
    ) -> Result<bool, CoreError> {
        update_workout_exercise(&self.pool, workout_exercise).await
    }

    async fn delete_workout_exercise(
        &self,
        workout_id: &str,
        workout_exercise_id: &str,
    ) -> Result<bool, CoreError> {
        delete_workout_exercise(&self.pool, workout_id, workout_exercise_id).await
    }

    async fn replace_workout_exercises(
        &self,
        workout_id: &str,
        workout_exercises: &[WorkoutExercise],
    ) -> Result<(), CoreError> {
        replace_workout_exercises(&self.pool, workout_id, workout_exercises).await
    }

    async fn insert_session_if_none_active(
        &self,
        session: &WorkoutSession,
        exercise_logs: &[ExerciseSessionLog],
    ) -> Result<bool, CoreError> {
        insert_session_if_none_active(&self.pool, session, exercise_logs).await
    }

    async fn get_session(&self, session_id: &str) -> Result<Option<WorkoutSession>, CoreError> {
        get_session(&self.pool, session_id).await
    }

    async fn get_active_session(
        &self,
        workout_id: &str,
    ) -> Result<Option<WorkoutSession>, CoreError> {
        get_active_session(&self.pool, workout_id).await
    }

    async fn finish_session(
        &self,
        session_id: &str,
        status: SessionStatus,
        end_time: DateTime<Utc>,
        notes: Option<&str>,
    ) -> Result<bool, CoreError> {
        finish_session(&self.pool, session_id, status, end_time, notes).await
    }

    async fn list_sessions(
        &self,
        workout_id: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<WorkoutSession>, CoreError> {
        list_sessions(&self.pool, workout_id, limit, offset).await
    }

    async fn insert_exercise_log_if_active(
        &self,
        exercise_log: &ExerciseSessionLog,
    ) -> Result<bool, CoreError> {
        insert_exercise_log_if_active(&self.pool, exercise_log).await
    }

    async fn get_exercise_log(
        &self,
        session_id: &str,
        exercise_log_id: &str,
    ) -> Result<Option<ExerciseSessionLog>, CoreError> {
        get_exercise_log(&self.pool, session_id, exercise_log_id).await
    }

    async fn list_exercise_logs(
        &self,
        session_id: &str,
    ) -> Result<Vec<ExerciseSessionLog>, CoreError> {
        list_exercise_logs(&self.pool, session_id).await
    }

    async fn complete_exercise_log(
        &self,
        session_id: &str,
        exercise_log_id: &str,
        completed_at: DateTime<Utc>,
    ) -> Result<bool, CoreError> {
        complete_exercise_log(&self.pool, session_id, exercise_log_id, completed_at).await
    }

    async fn health_check_db(&self) -> Result<bool, CoreError> {
        health_check_db(&self.pool).await
    }
}
