// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Workout session lifecycle tests against in-memory SQLite.

mod common;

use common::{create_exercise, create_workout, line, prescribe, set, sqlite_state, start_request};
use setbook_core::catalog_handlers::handle_update_exercise;
use setbook_core::error::CoreError;
use setbook_core::models::{
    AddExerciseLogRequest, CompleteSessionRequest, ExerciseUpdate, ListSessionsFilter,
    SessionStatus, StartSessionRequest,
};
use setbook_core::session_handlers::{
    handle_add_exercise_log, handle_cancel_session, handle_complete_exercise_log,
    handle_complete_session, handle_get_active_session, handle_get_session,
    handle_list_exercise_logs, handle_list_sessions, handle_start_session,
};
use uuid::Uuid;

#[tokio::test]
async fn test_start_creates_session_with_snapshotted_logs() {
    let state = sqlite_state().await;
    let squat = create_exercise(&state, "Squat", "Legs").await;
    let press = create_exercise(&state, "Leg Press", "Legs").await;
    let workout = create_workout(&state, "Leg Day").await;
    let p1 = prescribe(&state, &workout.workout.id, &squat.id, 1, 90).await;
    let p2 = prescribe(&state, &workout.workout.id, &press.id, 2, 45).await;

    let response = handle_start_session(
        &state,
        &workout.workout.id,
        start_request(vec![
            line(&p1, vec![set(50.0, 10)]),
            line(&p2, vec![set(100.0, 12), set(110.0, 10)]),
        ]),
    )
    .await
    .expect("Start should succeed");

    assert!(response.created);
    let session = &response.session;
    assert_eq!(session.session.status, SessionStatus::InProgress);
    assert_eq!(session.session.workout_id, workout.workout.id);
    assert!(session.session.end_time.is_none());
    assert_eq!(session.exercise_logs.len(), 2);

    let first = &session.exercise_logs[0];
    assert_eq!(first.exercise.name, "Squat");
    assert_eq!(first.exercise.muscle.as_deref(), Some("Legs"));
    assert_eq!(first.workout_exercise_id, p1.prescription.id);
    assert_eq!(first.sets.len(), 1);
    assert_eq!(first.sets[0].weight, 50.0);
    assert_eq!(first.sets[0].reps, 10);
    assert!(!first.sets[0].completed);
    assert!(!first.completed);

    // Rest inherited from the template prescription
    assert_eq!(first.rest, 90);
    assert_eq!(session.exercise_logs[1].rest, 45);
    assert_eq!(session.exercise_logs[1].sets.len(), 2);

    // Stored state matches the response
    let stored = handle_get_session(&state, Some(&workout.workout.id), &session.session.id)
        .await
        .unwrap();
    assert_eq!(stored.exercise_logs, session.exercise_logs);
}

#[tokio::test]
async fn test_start_twice_returns_same_session() {
    let state = sqlite_state().await;
    let squat = create_exercise(&state, "Squat", "Legs").await;
    let workout = create_workout(&state, "Leg Day").await;
    let p1 = prescribe(&state, &workout.workout.id, &squat.id, 1, 60).await;

    let first = handle_start_session(
        &state,
        &workout.workout.id,
        start_request(vec![line(&p1, vec![set(50.0, 10)])]),
    )
    .await
    .unwrap();
    let second = handle_start_session(
        &state,
        &workout.workout.id,
        start_request(vec![line(&p1, vec![set(60.0, 8)]), line(&p1, vec![])]),
    )
    .await
    .unwrap();

    assert!(first.created);
    assert!(!second.created);
    assert_eq!(first.session.session.id, second.session.session.id);
    // Returned unchanged: the second request's lines are ignored
    assert_eq!(second.session.exercise_logs.len(), 1);
    assert_eq!(second.session.exercise_logs[0].sets[0].weight, 50.0);

    let all = handle_list_sessions(
        &state,
        ListSessionsFilter {
            workout_id: Some(workout.workout.id.clone()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn test_concurrent_starts_create_one_session() {
    let state = sqlite_state().await;
    let squat = create_exercise(&state, "Squat", "Legs").await;
    let workout = create_workout(&state, "Leg Day").await;
    let p1 = prescribe(&state, &workout.workout.id, &squat.id, 1, 60).await;

    let starts = (0..8).map(|_| {
        handle_start_session(
            &state,
            &workout.workout.id,
            start_request(vec![line(&p1, vec![set(50.0, 10)])]),
        )
    });
    let results = futures::future::join_all(starts).await;

    let responses: Vec<_> = results
        .into_iter()
        .map(|r| r.expect("Every start should succeed"))
        .collect();
    assert_eq!(responses.iter().filter(|r| r.created).count(), 1);

    let session_id = &responses[0].session.session.id;
    assert!(
        responses
            .iter()
            .all(|r| &r.session.session.id == session_id)
    );

    let all = handle_list_sessions(&state, ListSessionsFilter::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].status, SessionStatus::InProgress);
}

#[tokio::test]
async fn test_complete_then_start_creates_new_session() {
    let state = sqlite_state().await;
    let workout = create_workout(&state, "Push Day").await;
    let workout_id = workout.workout.id.as_str();

    let first = handle_start_session(&state, workout_id, StartSessionRequest::default())
        .await
        .unwrap();
    let completed = handle_complete_session(
        &state,
        Some(workout_id),
        &first.session.session.id,
        CompleteSessionRequest {
            notes: Some("felt strong".to_string()),
        },
    )
    .await
    .unwrap();
    assert_eq!(completed.session.status, SessionStatus::Completed);
    assert_eq!(completed.session.notes.as_deref(), Some("felt strong"));
    assert!(completed.session.end_time.is_some());

    let second = handle_start_session(&state, workout_id, StartSessionRequest::default())
        .await
        .unwrap();
    assert!(second.created);
    assert_ne!(second.session.session.id, first.session.session.id);
}

#[tokio::test]
async fn test_sessions_transition_exactly_once() {
    let state = sqlite_state().await;
    let workout = create_workout(&state, "Pull Day").await;
    let workout_id = workout.workout.id.as_str();

    let started = handle_start_session(&state, workout_id, StartSessionRequest::default())
        .await
        .unwrap();
    let session_id = started.session.session.id.clone();

    let canceled = handle_cancel_session(&state, Some(workout_id), &session_id)
        .await
        .unwrap();
    assert_eq!(canceled.session.status, SessionStatus::Canceled);

    let err = handle_complete_session(
        &state,
        Some(workout_id),
        &session_id,
        CompleteSessionRequest::default(),
    )
    .await
    .unwrap_err();
    assert!(matches!(
        err,
        CoreError::InvalidSessionState { ref actual, .. } if actual == "CANCELED"
    ));

    let err = handle_cancel_session(&state, Some(workout_id), &session_id)
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "INVALID_WORKOUT_LOG_STATE");
}

#[tokio::test]
async fn test_add_exercise_log_to_finished_session_fails() {
    let state = sqlite_state().await;
    let squat = create_exercise(&state, "Squat", "Legs").await;
    let workout = create_workout(&state, "Leg Day").await;
    let p1 = prescribe(&state, &workout.workout.id, &squat.id, 1, 60).await;
    let workout_id = workout.workout.id.as_str();

    for cancel in [false, true] {
        let started = handle_start_session(&state, workout_id, StartSessionRequest::default())
            .await
            .unwrap();
        let session_id = started.session.session.id.clone();

        if cancel {
            handle_cancel_session(&state, Some(workout_id), &session_id)
                .await
                .unwrap();
        } else {
            handle_complete_session(
                &state,
                Some(workout_id),
                &session_id,
                CompleteSessionRequest::default(),
            )
            .await
            .unwrap();
        }

        let err = handle_add_exercise_log(
            &state,
            Some(workout_id),
            &session_id,
            AddExerciseLogRequest {
                exercise_id: squat.id.clone(),
                workout_exercise_id: p1.prescription.id.clone(),
                series: vec![set(60.0, 5)],
                notes: None,
                rest: None,
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.status_code(), 409);

        let logs = handle_list_exercise_logs(&state, Some(workout_id), &session_id)
            .await
            .unwrap();
        assert!(logs.is_empty(), "Nothing should be appended");
    }
}

#[tokio::test]
async fn test_add_exercise_log_resolves_rest() {
    let state = sqlite_state().await;
    let squat = create_exercise(&state, "Squat", "Legs").await;
    let workout = create_workout(&state, "Leg Day").await;
    let p1 = prescribe(&state, &workout.workout.id, &squat.id, 1, 75).await;
    let workout_id = workout.workout.id.as_str();

    let started = handle_start_session(&state, workout_id, StartSessionRequest::default())
        .await
        .unwrap();
    let session_id = started.session.session.id.as_str();

    let request = |workout_exercise_id: String, rest: Option<i32>| AddExerciseLogRequest {
        exercise_id: squat.id.clone(),
        workout_exercise_id,
        series: vec![set(80.0, 6)],
        notes: Some("heavy".to_string()),
        rest,
    };

    let explicit = handle_add_exercise_log(
        &state,
        Some(workout_id),
        session_id,
        request(p1.prescription.id.clone(), Some(30)),
    )
    .await
    .unwrap();
    assert_eq!(explicit.rest, 30);

    let prescribed = handle_add_exercise_log(
        &state,
        Some(workout_id),
        session_id,
        request(p1.prescription.id.clone(), None),
    )
    .await
    .unwrap();
    assert_eq!(prescribed.rest, 75);

    let fallback = handle_add_exercise_log(
        &state,
        Some(workout_id),
        session_id,
        request(Uuid::new_v4().to_string(), None),
    )
    .await
    .unwrap();
    assert_eq!(fallback.rest, 60);
    assert_eq!(fallback.notes.as_deref(), Some("heavy"));

    let logs = handle_list_exercise_logs(&state, Some(workout_id), session_id)
        .await
        .unwrap();
    let ids: Vec<&str> = logs.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, vec![explicit.id.as_str(), prescribed.id.as_str(), fallback.id.as_str()]);
}

#[tokio::test]
async fn test_snapshot_survives_catalog_edit() {
    let state = sqlite_state().await;
    let squat = create_exercise(&state, "Squat", "Legs").await;
    let workout = create_workout(&state, "Leg Day").await;
    let p1 = prescribe(&state, &workout.workout.id, &squat.id, 1, 60).await;

    let started = handle_start_session(
        &state,
        &workout.workout.id,
        start_request(vec![line(&p1, vec![set(50.0, 10)])]),
    )
    .await
    .unwrap();

    handle_update_exercise(
        &state,
        &squat.id,
        ExerciseUpdate {
            name: Some("Back Squat".to_string()),
            muscle: Some("Glutes".to_string()),
            description: Some("edited".to_string()),
        },
    )
    .await
    .unwrap();

    let stored = handle_get_session(&state, None, &started.session.session.id)
        .await
        .unwrap();
    let snapshot = &stored.exercise_logs[0].exercise;
    assert_eq!(snapshot.name, "Squat");
    assert_eq!(snapshot.muscle.as_deref(), Some("Legs"));
    assert_eq!(snapshot.description.as_deref(), Some("Squat description"));
    assert_eq!(snapshot.updated_at, squat.updated_at);
}

#[tokio::test]
async fn test_start_with_missing_exercise_writes_nothing() {
    let state = sqlite_state().await;
    let squat = create_exercise(&state, "Squat", "Legs").await;
    let workout = create_workout(&state, "Leg Day").await;
    let p1 = prescribe(&state, &workout.workout.id, &squat.id, 1, 60).await;

    let mut bogus = line(&p1, vec![set(10.0, 10)]);
    let missing_id = Uuid::new_v4().to_string();
    bogus.exercise_id = missing_id.clone();

    let err = handle_start_session(
        &state,
        &workout.workout.id,
        start_request(vec![line(&p1, vec![]), bogus]),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, CoreError::ExerciseNotFound { ref exercise_id } if *exercise_id == missing_id));

    assert!(
        handle_get_active_session(&state, &workout.workout.id)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_start_unknown_workout_is_not_found() {
    let state = sqlite_state().await;

    let err = handle_start_session(
        &state,
        &Uuid::new_v4().to_string(),
        StartSessionRequest::default(),
    )
    .await
    .unwrap_err();
    assert_eq!(err.error_code(), "WORKOUT_NOT_FOUND");

    let err = handle_start_session(&state, "not-a-uuid", StartSessionRequest::default())
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 400);
}

#[tokio::test]
async fn test_start_rejects_mismatched_body_workout_id() {
    let state = sqlite_state().await;
    let workout = create_workout(&state, "Leg Day").await;

    let request = StartSessionRequest {
        workout_id: Some(Uuid::new_v4().to_string()),
        ..Default::default()
    };
    let err = handle_start_session(&state, &workout.workout.id, request)
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::ValidationError { ref field, .. } if field == "workoutId"));
}

#[tokio::test]
async fn test_get_active_session() {
    let state = sqlite_state().await;
    let workout = create_workout(&state, "Leg Day").await;
    let workout_id = workout.workout.id.as_str();

    assert!(
        handle_get_active_session(&state, workout_id)
            .await
            .unwrap()
            .is_none()
    );

    let started = handle_start_session(&state, workout_id, StartSessionRequest::default())
        .await
        .unwrap();
    let active = handle_get_active_session(&state, workout_id)
        .await
        .unwrap()
        .expect("Session should be active");
    assert_eq!(active.session.id, started.session.session.id);

    handle_complete_session(
        &state,
        Some(workout_id),
        &active.session.id,
        CompleteSessionRequest::default(),
    )
    .await
    .unwrap();
    assert!(
        handle_get_active_session(&state, workout_id)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_session_ownership_is_checked() {
    let state = sqlite_state().await;
    let legs = create_workout(&state, "Leg Day").await;
    let arms = create_workout(&state, "Arm Day").await;

    let started = handle_start_session(&state, &legs.workout.id, StartSessionRequest::default())
        .await
        .unwrap();
    let session_id = started.session.session.id.as_str();

    let err = handle_complete_session(
        &state,
        Some(&arms.workout.id),
        session_id,
        CompleteSessionRequest::default(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, CoreError::SessionNotFound { .. }));

    // Still in progress
    let session = handle_get_session(&state, None, session_id).await.unwrap();
    assert_eq!(session.session.status, SessionStatus::InProgress);
}

#[tokio::test]
async fn test_complete_exercise_log() {
    let state = sqlite_state().await;
    let squat = create_exercise(&state, "Squat", "Legs").await;
    let workout = create_workout(&state, "Leg Day").await;
    let p1 = prescribe(&state, &workout.workout.id, &squat.id, 1, 60).await;
    let workout_id = workout.workout.id.as_str();

    let started = handle_start_session(
        &state,
        workout_id,
        start_request(vec![line(&p1, vec![set(50.0, 10)])]),
    )
    .await
    .unwrap();
    let session_id = started.session.session.id.as_str();
    let log_id = started.session.exercise_logs[0].id.as_str();

    let completed = handle_complete_exercise_log(&state, Some(workout_id), session_id, log_id)
        .await
        .unwrap();
    assert!(completed.completed);
    let first_completed_at = completed.completed_at.expect("completedAt should be set");

    let again = handle_complete_exercise_log(&state, Some(workout_id), session_id, log_id)
        .await
        .unwrap();
    assert_eq!(again.completed_at, Some(first_completed_at));

    let err = handle_complete_exercise_log(
        &state,
        Some(workout_id),
        session_id,
        &Uuid::new_v4().to_string(),
    )
    .await
    .unwrap_err();
    assert_eq!(err.error_code(), "EXERCISE_LOG_NOT_FOUND");

    let err = handle_complete_exercise_log(
        &state,
        Some(&Uuid::new_v4().to_string()),
        session_id,
        log_id,
    )
    .await
    .unwrap_err();
    assert_eq!(err.error_code(), "WORKOUT_LOG_NOT_FOUND");
}

#[tokio::test]
async fn test_complete_exercise_log_after_session_finished() {
    let state = sqlite_state().await;
    let squat = create_exercise(&state, "Squat", "Legs").await;
    let press = create_exercise(&state, "Leg Press", "Legs").await;
    let workout = create_workout(&state, "Leg Day").await;
    let p1 = prescribe(&state, &workout.workout.id, &squat.id, 1, 60).await;
    let p2 = prescribe(&state, &workout.workout.id, &press.id, 2, 60).await;
    let workout_id = workout.workout.id.as_str();

    let started = handle_start_session(
        &state,
        workout_id,
        start_request(vec![
            line(&p1, vec![set(50.0, 10)]),
            line(&p2, vec![set(100.0, 8)]),
        ]),
    )
    .await
    .unwrap();
    let session_id = started.session.session.id.as_str();
    let log_id = started.session.exercise_logs[0].id.as_str();

    let first = handle_complete_exercise_log(&state, Some(workout_id), session_id, log_id)
        .await
        .unwrap();
    let first_completed_at = first.completed_at.expect("completedAt should be set");

    handle_complete_session(
        &state,
        Some(workout_id),
        session_id,
        CompleteSessionRequest::default(),
    )
    .await
    .unwrap();

    // Re-completing after the session ended keeps the original timestamp
    let again = handle_complete_exercise_log(&state, Some(workout_id), session_id, log_id)
        .await
        .expect("Logs can be completed after the session ends");
    assert!(again.completed);
    assert_eq!(again.completed_at, Some(first_completed_at));

    // A log left open during the session can still be ticked off
    let late_id = started.session.exercise_logs[1].id.as_str();
    let late = handle_complete_exercise_log(&state, Some(workout_id), session_id, late_id)
        .await
        .unwrap();
    assert!(late.completed);
    assert!(late.completed_at.is_some());

    let stored = handle_get_session(&state, Some(workout_id), session_id)
        .await
        .unwrap();
    assert_eq!(stored.session.status, SessionStatus::Completed);
    assert!(stored.exercise_logs.iter().all(|log| log.completed));
}

#[tokio::test]
async fn test_complete_session_ignores_empty_notes() {
    let state = sqlite_state().await;
    let workout = create_workout(&state, "Leg Day").await;
    let workout_id = workout.workout.id.as_str();

    let started = handle_start_session(
        &state,
        workout_id,
        StartSessionRequest {
            notes: Some("warm up first".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let completed = handle_complete_session(
        &state,
        Some(workout_id),
        &started.session.session.id,
        CompleteSessionRequest {
            notes: Some(String::new()),
        },
    )
    .await
    .unwrap();
    assert_eq!(completed.session.status, SessionStatus::Completed);
    assert_eq!(completed.session.notes.as_deref(), Some("warm up first"));

    let other = handle_start_session(&state, workout_id, StartSessionRequest::default())
        .await
        .unwrap();
    let replaced = handle_complete_session(
        &state,
        Some(workout_id),
        &other.session.session.id,
        CompleteSessionRequest {
            notes: Some("felt strong".to_string()),
        },
    )
    .await
    .unwrap();
    assert_eq!(replaced.session.notes.as_deref(), Some("felt strong"));
}

#[tokio::test]
async fn test_complete_unknown_session_is_not_found() {
    let state = sqlite_state().await;

    let err = handle_complete_session(
        &state,
        None,
        &Uuid::new_v4().to_string(),
        CompleteSessionRequest::default(),
    )
    .await
    .unwrap_err();
    assert_eq!(err.error_code(), "WORKOUT_LOG_NOT_FOUND");
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_list_sessions_pagination() {
    let state = sqlite_state().await;
    let workout = create_workout(&state, "Leg Day").await;
    let other = create_workout(&state, "Arm Day").await;
    let workout_id = workout.workout.id.as_str();

    let mut started = Vec::new();
    for _ in 0..5 {
        let s = handle_start_session(&state, workout_id, StartSessionRequest::default())
            .await
            .unwrap();
        handle_complete_session(
            &state,
            Some(workout_id),
            &s.session.session.id,
            CompleteSessionRequest::default(),
        )
        .await
        .unwrap();
        started.push(s.session.session.id);
    }
    handle_start_session(&state, &other.workout.id, StartSessionRequest::default())
        .await
        .unwrap();

    // Most recent first: started[4], started[3], started[2], ...
    let page = handle_list_sessions(
        &state,
        ListSessionsFilter {
            workout_id: Some(workout_id.to_string()),
            limit: Some(2),
            page: Some(2),
        },
    )
    .await
    .unwrap();
    let ids: Vec<&str> = page.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec![started[2].as_str(), started[1].as_str()]);

    let everything = handle_list_sessions(&state, ListSessionsFilter::default())
        .await
        .unwrap();
    assert_eq!(everything.len(), 6);
    assert!(
        everything
            .windows(2)
            .all(|pair| pair[0].start_time >= pair[1].start_time)
    );

    let err = handle_list_sessions(
        &state,
        ListSessionsFilter {
            limit: Some(0),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.status_code(), 400);

    let err = handle_list_sessions(
        &state,
        ListSessionsFilter {
            workout_id: None,
            limit: Some(100),
            page: Some(i64::MAX),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, CoreError::ValidationError { ref field, .. } if field == "page"));
}
