// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Workout session lifecycle handlers.
//!
//! A session (workout log) is started from a workout template, collects
//! exercise logs while `IN_PROGRESS`, and moves exactly once to `COMPLETED`
//! or `CANCELED`.
//!
//! # Invariants
//!
//! - At most one `IN_PROGRESS` session exists per workout. Starting a workout
//!   that already has one returns the active session unchanged. The storage
//!   layer enforces this with a conditional insert, so concurrent starts
//!   resolve to a single session.
//! - Exercise logs carry a snapshot of the catalog exercise taken when the
//!   log was created. Later catalog edits do not change it.
//! - Exercise logs are only appended to an `IN_PROGRESS` session. They can be
//!   marked completed in any session status.
//!
//! Handlers that take a `workout_id` alongside a session ID report a session
//! belonging to another workout as not found.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::error::{CoreError, Result};
use crate::models::{
    AddExerciseLogRequest, CompleteSessionRequest, DEFAULT_REST_SECONDS, Exercise,
    ExerciseSessionLog, ExerciseSnapshot, ListSessionsFilter, SessionStatus, SessionWithLogs,
    SetInput, StartSessionRequest, StartSessionResponse, WorkoutSession,
};
use crate::state::HandlerState;
use crate::template_handlers::{load_workout, resolve_exercises};
use crate::validation::{Validate, validate_id};

/// Attempts at creating a session when a concurrent start wins and then
/// finishes before its session can be read back.
const START_ATTEMPTS: usize = 3;

// ============================================================================
// Helpers
// ============================================================================

/// Load a session, checking that it belongs to `workout_id` when one is given.
async fn load_session(
    state: &HandlerState,
    workout_id: Option<&str>,
    session_id: &str,
) -> Result<WorkoutSession> {
    if let Some(workout_id) = workout_id {
        validate_id("id", workout_id)?;
    }
    validate_id("logId", session_id)?;

    let not_found = || CoreError::SessionNotFound {
        session_id: session_id.to_string(),
    };

    let session = state
        .persistence
        .get_session(session_id)
        .await?
        .ok_or_else(not_found)?;

    match workout_id {
        Some(workout_id) if session.workout_id != workout_id => {
            debug!(
                owner = %session.workout_id,
                "Session belongs to another workout"
            );
            Err(not_found())
        }
        _ => Ok(session),
    }
}

fn require_in_progress(session: &WorkoutSession) -> Result<()> {
    if session.status != SessionStatus::InProgress {
        return Err(invalid_state(session));
    }
    Ok(())
}

fn invalid_state(session: &WorkoutSession) -> CoreError {
    CoreError::InvalidSessionState {
        session_id: session.id.clone(),
        expected: SessionStatus::InProgress.to_string(),
        actual: session.status.to_string(),
    }
}

async fn with_logs(state: &HandlerState, session: WorkoutSession) -> Result<SessionWithLogs> {
    let exercise_logs = state.persistence.list_exercise_logs(&session.id).await?;
    Ok(SessionWithLogs {
        session,
        exercise_logs,
    })
}

fn new_exercise_log(
    session_id: &str,
    exercise: &Exercise,
    workout_exercise_id: String,
    sets: Vec<SetInput>,
    notes: Option<String>,
    rest: i32,
    now: DateTime<Utc>,
) -> ExerciseSessionLog {
    ExerciseSessionLog {
        id: Uuid::new_v4().to_string(),
        workout_session_id: session_id.to_string(),
        exercise_id: exercise.id.clone(),
        workout_exercise_id,
        exercise: ExerciseSnapshot::from(exercise),
        sets: sets.into_iter().map(|set| set.into_set(now)).collect(),
        notes,
        completed: false,
        completed_at: None,
        rest,
        created_at: now,
        updated_at: now,
    }
}

/// Terminal transition shared by complete and cancel.
async fn finish(
    state: &HandlerState,
    workout_id: Option<&str>,
    session_id: &str,
    status: SessionStatus,
    notes: Option<&str>,
) -> Result<SessionWithLogs> {
    let session = load_session(state, workout_id, session_id).await?;
    require_in_progress(&session)?;

    let finished = state
        .persistence
        .finish_session(session_id, status, Utc::now(), notes)
        .await?;

    let current = state
        .persistence
        .get_session(session_id)
        .await?
        .ok_or_else(|| CoreError::SessionNotFound {
            session_id: session_id.to_string(),
        })?;

    if !finished {
        // Another request finished the session between the read and the update
        warn!(actual = %current.status, "Session finished concurrently");
        return Err(invalid_state(&current));
    }

    info!(status = %status, "Session finished");
    with_logs(state, current).await
}

// ============================================================================
// Start / resume
// ============================================================================

/// Start a session for a workout, or return the one already in progress.
///
/// Each prescription line becomes an exercise log holding a snapshot of its
/// catalog exercise and the supplied sets. All referenced exercises are
/// resolved with a single lookup; if any is missing nothing is written.
///
/// Rest per log is the line's explicit value, else the template
/// prescription's, else [`DEFAULT_REST_SECONDS`].
#[instrument(skip(state, request), fields(lines = request.exercises.len()))]
pub async fn handle_start_session(
    state: &HandlerState,
    workout_id: &str,
    request: StartSessionRequest,
) -> Result<StartSessionResponse> {
    validate_id("id", workout_id)?;
    request.validate()?;
    if let Some(body_workout_id) = &request.workout_id
        && body_workout_id != workout_id
    {
        return Err(CoreError::validation(
            "workoutId",
            "must match the workout in the path",
        ));
    }

    load_workout(state, workout_id).await?;

    if let Some(active) = state.persistence.get_active_session(workout_id).await? {
        info!(session_id = %active.id, "Workout already in progress, resuming");
        return Ok(StartSessionResponse {
            session: with_logs(state, active).await?,
            created: false,
        });
    }

    let exercise_ids = request
        .exercises
        .iter()
        .map(|line| line.exercise_id.clone())
        .collect();
    let exercises = resolve_exercises(state, exercise_ids).await?;

    let prescribed_rest: HashMap<String, i32> = state
        .persistence
        .list_workout_exercises(&[workout_id.to_string()])
        .await?
        .into_iter()
        .map(|we| (we.id, we.rest))
        .collect();

    for attempt in 1..=START_ATTEMPTS {
        let now = Utc::now();
        let session = WorkoutSession {
            id: Uuid::new_v4().to_string(),
            workout_id: workout_id.to_string(),
            start_time: now,
            end_time: None,
            status: SessionStatus::InProgress,
            notes: request.notes.clone(),
            created_at: now,
            updated_at: now,
        };

        let mut exercise_logs = Vec::with_capacity(request.exercises.len());
        for line in &request.exercises {
            let exercise =
                exercises
                    .get(&line.exercise_id)
                    .ok_or_else(|| CoreError::ExerciseNotFound {
                        exercise_id: line.exercise_id.clone(),
                    })?;
            let rest = line
                .rest
                .or_else(|| prescribed_rest.get(&line.workout_exercise_id).copied())
                .unwrap_or(DEFAULT_REST_SECONDS);
            exercise_logs.push(new_exercise_log(
                &session.id,
                exercise,
                line.workout_exercise_id.clone(),
                line.series.clone(),
                line.notes.clone(),
                rest,
                now,
            ));
        }

        if state
            .persistence
            .insert_session_if_none_active(&session, &exercise_logs)
            .await?
        {
            info!(
                session_id = %session.id,
                exercise_logs = exercise_logs.len(),
                "Session started"
            );
            return Ok(StartSessionResponse {
                session: SessionWithLogs {
                    session,
                    exercise_logs,
                },
                created: true,
            });
        }

        if let Some(active) = state.persistence.get_active_session(workout_id).await? {
            info!(session_id = %active.id, "Concurrent start won, resuming its session");
            return Ok(StartSessionResponse {
                session: with_logs(state, active).await?,
                created: false,
            });
        }

        debug!(attempt, "Active session vanished before it could be read, retrying");
    }

    Err(CoreError::DatabaseError {
        operation: "start_session".to_string(),
        details: format!(
            "could not start or resume a session for workout '{}' after {} attempts",
            workout_id, START_ATTEMPTS
        ),
    })
}

/// The in-progress session of a workout with its exercise logs, if any.
#[instrument(skip(state))]
pub async fn handle_get_active_session(
    state: &HandlerState,
    workout_id: &str,
) -> Result<Option<SessionWithLogs>> {
    validate_id("id", workout_id)?;

    match state.persistence.get_active_session(workout_id).await? {
        Some(session) => Ok(Some(with_logs(state, session).await?)),
        None => {
            debug!("No session in progress");
            Ok(None)
        }
    }
}

// ============================================================================
// Complete / cancel
// ============================================================================

/// Complete an in-progress session, replacing its notes when non-empty notes
/// are given.
#[instrument(skip(state, request))]
pub async fn handle_complete_session(
    state: &HandlerState,
    workout_id: Option<&str>,
    session_id: &str,
    request: CompleteSessionRequest,
) -> Result<SessionWithLogs> {
    request.validate()?;
    let notes = request.notes.as_deref().filter(|notes| !notes.is_empty());
    finish(state, workout_id, session_id, SessionStatus::Completed, notes).await
}

/// Cancel an in-progress session.
#[instrument(skip(state))]
pub async fn handle_cancel_session(
    state: &HandlerState,
    workout_id: Option<&str>,
    session_id: &str,
) -> Result<SessionWithLogs> {
    finish(state, workout_id, session_id, SessionStatus::Canceled, None).await
}

// ============================================================================
// Exercise logs
// ============================================================================

/// Append an exercise log to an in-progress session.
#[instrument(skip(state, request), fields(exercise_id = %request.exercise_id))]
pub async fn handle_add_exercise_log(
    state: &HandlerState,
    workout_id: Option<&str>,
    session_id: &str,
    request: AddExerciseLogRequest,
) -> Result<ExerciseSessionLog> {
    request.validate()?;
    let session = load_session(state, workout_id, session_id).await?;
    require_in_progress(&session)?;

    let exercise = state
        .persistence
        .get_exercise(&request.exercise_id)
        .await?
        .ok_or_else(|| CoreError::ExerciseNotFound {
            exercise_id: request.exercise_id.clone(),
        })?;

    let rest = match request.rest {
        Some(rest) => rest,
        None => state
            .persistence
            .get_workout_exercise(&session.workout_id, &request.workout_exercise_id)
            .await?
            .map(|we| we.rest)
            .unwrap_or(DEFAULT_REST_SECONDS),
    };

    let exercise_log = new_exercise_log(
        session_id,
        &exercise,
        request.workout_exercise_id,
        request.series,
        request.notes,
        rest,
        Utc::now(),
    );

    if !state
        .persistence
        .insert_exercise_log_if_active(&exercise_log)
        .await?
    {
        let current = load_session(state, None, session_id).await?;
        warn!(actual = %current.status, "Session finished before the log was written");
        return Err(invalid_state(&current));
    }

    info!(exercise_log_id = %exercise_log.id, sets = exercise_log.sets.len(), "Exercise logged");
    Ok(exercise_log)
}

/// Mark an exercise log completed.
///
/// Allowed in any session status, so exercises can still be ticked off after
/// the session was finished. Completing an already completed log keeps its
/// original completion time.
#[instrument(skip(state))]
pub async fn handle_complete_exercise_log(
    state: &HandlerState,
    workout_id: Option<&str>,
    session_id: &str,
    exercise_log_id: &str,
) -> Result<ExerciseSessionLog> {
    validate_id("exerciseLogId", exercise_log_id)?;
    load_session(state, workout_id, session_id).await?;

    let not_found = || CoreError::ExerciseLogNotFound {
        session_id: session_id.to_string(),
        exercise_log_id: exercise_log_id.to_string(),
    };

    if !state
        .persistence
        .complete_exercise_log(session_id, exercise_log_id, Utc::now())
        .await?
    {
        return Err(not_found());
    }

    let exercise_log = state
        .persistence
        .get_exercise_log(session_id, exercise_log_id)
        .await?
        .ok_or_else(not_found)?;

    info!("Exercise log completed");
    Ok(exercise_log)
}

/// Exercise logs of a session in creation order.
#[instrument(skip(state))]
pub async fn handle_list_exercise_logs(
    state: &HandlerState,
    workout_id: Option<&str>,
    session_id: &str,
) -> Result<Vec<ExerciseSessionLog>> {
    let session = load_session(state, workout_id, session_id).await?;
    state.persistence.list_exercise_logs(&session.id).await
}

// ============================================================================
// Queries
// ============================================================================

/// A session with its exercise logs.
#[instrument(skip(state))]
pub async fn handle_get_session(
    state: &HandlerState,
    workout_id: Option<&str>,
    session_id: &str,
) -> Result<SessionWithLogs> {
    let session = load_session(state, workout_id, session_id).await?;
    with_logs(state, session).await
}

/// Sessions ordered by start time descending, optionally for one workout.
#[instrument(skip(state, filter), fields(workout_id = ?filter.workout_id))]
pub async fn handle_list_sessions(
    state: &HandlerState,
    filter: ListSessionsFilter,
) -> Result<Vec<WorkoutSession>> {
    filter.validate()?;

    let sessions = state
        .persistence
        .list_sessions(filter.workout_id.as_deref(), filter.limit(), filter.offset())
        .await?;

    debug!(
        count = sessions.len(),
        limit = filter.limit(),
        page = filter.page(),
        "Listed sessions"
    );
    Ok(sessions)
}
