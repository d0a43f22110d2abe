// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! HTTP API tests driving the router against in-memory SQLite.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use setbook_core::migrations;
use setbook_core::{HandlerState, SqlitePersistence};

async fn app() -> Router {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory SQLite pool");
    migrations::run_sqlite(&pool)
        .await
        .expect("Failed to run migrations");

    setbook_server::router(HandlerState::new(Arc::new(SqlitePersistence::new(pool))))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

/// Create an exercise and a workout prescribing it; returns (workout, prescription).
async fn leg_day(app: &Router) -> (Value, Value) {
    let (status, squat) = send(
        app,
        Method::POST,
        "/exercises",
        Some(json!({"name": "Squat", "muscle": "Legs"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, workout) = send(app, Method::POST, "/workouts", Some(json!({"name": "Leg Day"}))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, prescription) = send(
        app,
        Method::POST,
        &format!("/workouts/{}/exercises", workout["id"].as_str().unwrap()),
        Some(json!({"exerciseId": squat["id"], "order": 1, "rest": 90})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(prescription["exercise"]["name"], "Squat");
    assert_eq!(prescription["series"], 3);
    assert_eq!(prescription["reps"], 12);

    (workout, prescription)
}

#[tokio::test]
async fn test_health() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["healthy"], true);
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_openapi_document() {
    let app = app().await;
    let (status, doc) = send(&app, Method::GET, "/documentation/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["openapi"].as_str().unwrap().starts_with("3."));
    assert_eq!(doc["info"]["title"], "Setbook API");
    assert!(doc["paths"]["/workouts/{id}/start"]["post"].is_object());
    assert!(doc["paths"]["/logs"]["get"]["parameters"].is_array());
    assert!(doc["components"]["schemas"]["SessionWithLogs"].is_object());
}

#[tokio::test]
async fn test_workout_session_flow() {
    let app = app().await;
    let (workout, prescription) = leg_day(&app).await;
    let workout_id = workout["id"].as_str().unwrap();

    let start_body = json!({
        "workoutId": workout_id,
        "exercises": [{
            "id": prescription["id"],
            "exerciseId": prescription["exerciseId"],
            "series": [{"weight": 50, "reps": 10, "completed": false}]
        }]
    });

    let (status, session) = send(
        &app,
        Method::POST,
        &format!("/workouts/{}/start", workout_id),
        Some(start_body.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(session["status"], "IN_PROGRESS");
    assert_eq!(session["exerciseLogs"][0]["series"][0]["weight"], 50.0);
    assert_eq!(session["exerciseLogs"][0]["series"][0]["reps"], 10);
    assert_eq!(session["exerciseLogs"][0]["rest"], 90);
    assert_eq!(session["exerciseLogs"][0]["exercise"]["name"], "Squat");
    let session_id = session["id"].as_str().unwrap();

    // Starting again resumes the same session
    let (status, resumed) = send(
        &app,
        Method::POST,
        &format!("/workouts/{}/start", workout_id),
        Some(start_body),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resumed["id"], session["id"]);

    let (status, active) = send(
        &app,
        Method::GET,
        &format!("/workouts/{}/in-progress-workout", workout_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(active["id"], session["id"]);

    let (status, log) = send(
        &app,
        Method::POST,
        &format!("/workouts/{}/logs/{}/exercises", workout_id, session_id),
        Some(json!({
            "exerciseId": prescription["exerciseId"],
            "workoutExerciseId": prescription["id"],
            "series": [{"weight": 60, "reps": 8}]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(log["rest"], 90);
    assert_eq!(log["series"][0]["completed"], true);
    let log_id = log["id"].as_str().unwrap();

    let (status, completed_log) = send(
        &app,
        Method::PATCH,
        &format!(
            "/workouts/{}/logs/{}/exercises/{}/complete",
            workout_id, session_id, log_id
        ),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(completed_log["completed"], true);
    assert!(completed_log["completedAt"].is_string());

    let (status, logs) = send(
        &app,
        Method::GET,
        &format!("/workouts/{}/logs/{}/exercises", workout_id, session_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(logs.as_array().unwrap().len(), 2);

    let (status, finished) = send(
        &app,
        Method::PATCH,
        &format!("/workouts/{}/logs/{}/complete", workout_id, session_id),
        Some(json!({"notes": "good session"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(finished["status"], "COMPLETED");
    assert_eq!(finished["notes"], "good session");
    assert!(finished["endTime"].is_string());

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/workouts/{}/in-progress-workout", workout_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "WORKOUT_LOG_NOT_FOUND");

    // Exercise logs left open can still be completed
    let (status, late_log) = send(
        &app,
        Method::PATCH,
        &format!(
            "/workouts/{}/logs/{}/exercises/{}/complete",
            workout_id,
            session_id,
            session["exerciseLogs"][0]["id"].as_str().unwrap()
        ),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(late_log["completed"], true);

    // No more logs on a completed session
    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/workouts/{}/logs/{}/exercises", workout_id, session_id),
        Some(json!({
            "exerciseId": prescription["exerciseId"],
            "workoutExerciseId": prescription["id"],
            "series": []
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["statusCode"], 409);
    assert_eq!(body["code"], "INVALID_WORKOUT_LOG_STATE");

    let (status, sessions) = send(
        &app,
        Method::GET,
        &format!("/logs?workoutId={}&limit=10&page=1", workout_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(sessions.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_complete_without_body_and_cancel() {
    let app = app().await;
    let (workout, _) = leg_day(&app).await;
    let workout_id = workout["id"].as_str().unwrap();

    let (status, session) = send(
        &app,
        Method::POST,
        &format!("/workouts/{}/start", workout_id),
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let session_id = session["id"].as_str().unwrap();

    let (status, canceled) = send(
        &app,
        Method::PATCH,
        &format!("/workouts/{}/logs/{}/cancel", workout_id, session_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(canceled["status"], "CANCELED");

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/workouts/{}/logs/{}/complete", workout_id, session_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "INVALID_WORKOUT_LOG_STATE");
}

#[tokio::test]
async fn test_exercise_crud() {
    let app = app().await;

    let (status, body) = send(&app, Method::POST, "/exercises", Some(json!({"name": "ab"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["validationErrors"][0]["field"], "name");

    let (status, created) = send(
        &app,
        Method::POST,
        "/exercises",
        Some(json!({"name": "Deadlift", "muscle": "Back"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().unwrap();

    let (status, updated) = send(
        &app,
        Method::PATCH,
        &format!("/exercises/{}", id),
        Some(json!({"description": "Hinge"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Deadlift");
    assert_eq!(updated["description"], "Hinge");

    let (status, usage) = send(&app, Method::GET, &format!("/exercises/{}/workouts", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(usage["workouts"].as_array().unwrap().len(), 0);

    let (status, body) = send(&app, Method::DELETE, &format!("/exercises/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, body) = send(&app, Method::GET, &format!("/exercises/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not Found");
}

#[tokio::test]
async fn test_exercise_in_use_conflict() {
    let app = app().await;
    let (_, prescription) = leg_day(&app).await;

    let (status, body) = send(
        &app,
        Method::DELETE,
        &format!("/exercises/{}", prescription["exerciseId"].as_str().unwrap()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "EXERCISE_IN_USE");
}

#[tokio::test]
async fn test_replace_and_delete_workout() {
    let app = app().await;
    let (workout, prescription) = leg_day(&app).await;
    let workout_id = workout["id"].as_str().unwrap();

    let (status, replaced) = send(
        &app,
        Method::PUT,
        &format!("/workouts/{}/exercises", workout_id),
        Some(json!([
            {"exerciseId": prescription["exerciseId"], "order": 2, "series": 5, "reps": 5, "weight": 100},
            {"exerciseId": prescription["exerciseId"], "order": 1}
        ])),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let exercises = replaced["exercises"].as_array().unwrap();
    assert_eq!(exercises.len(), 2);
    assert_eq!(exercises[0]["order"], 1);
    assert_eq!(exercises[1]["weight"], 100.0);

    let (status, _) = send(&app, Method::DELETE, &format!("/workouts/{}", workout_id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, Method::GET, &format!("/workouts/{}", workout_id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "WORKOUT_NOT_FOUND");
}

#[tokio::test]
async fn test_malformed_requests() {
    let app = app().await;

    let (status, body) = send(&app, Method::GET, "/workouts/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["validationErrors"][0]["field"], "id");

    let (status, body) = send(&app, Method::GET, "/logs?limit=500", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["validationErrors"][0]["field"], "limit");

    let (status, body) = send(&app, Method::GET, "/logs?page=9223372036854775807", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["validationErrors"][0]["field"], "page");

    let (status, body) = send(&app, Method::GET, "/logs?limit=abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, body) = send(
        &app,
        Method::POST,
        "/workouts",
        Some(json!({"description": "missing name"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["validationErrors"][0]["field"], "body");
}
