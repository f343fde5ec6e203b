mod common;

use axum::http::{Method, StatusCode};
use chrono::{DateTime, Utc};

use common::app::spawn_test_app;
use common::http::{request, response_json};

#[tokio::test]
async fn it_defaults_every_class_to_not_started() {
    let app = spawn_test_app().await;

    let resp = request(&app.app, Method::GET, "/api/progress", None).await;
    let (status, _, body) = response_json(resp).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["progress"].as_array().unwrap().len(), 0);
    let map = body["map"].as_object().unwrap();
    assert_eq!(map.len(), 24);
    assert_eq!(map["1"], "not_started");
    assert_eq!(map["24"], "not_started");
}

#[tokio::test]
async fn it_persists_and_round_trips_progress() {
    let app = spawn_test_app().await;

    let put = request(
        &app.app,
        Method::PUT,
        "/api/progress/3",
        Some(serde_json::json!({ "status": "completed" })),
    )
    .await;
    let (status, _, body) = response_json(put).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["classId"], 3);
    assert_eq!(body["status"], "completed");
    assert!(body["updatedAt"].is_string());

    let get = request(&app.app, Method::GET, "/api/progress", None).await;
    let (_, _, body) = response_json(get).await;
    assert_eq!(body["map"]["3"], "completed");
    assert_eq!(body["progress"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn it_repeated_put_is_idempotent_with_monotonic_timestamp() {
    let app = spawn_test_app().await;

    let mut last_updated_at: Option<DateTime<Utc>> = None;
    for _ in 0..3 {
        let put = request(
            &app.app,
            Method::PUT,
            "/api/progress/5",
            Some(serde_json::json!({ "status": "completed" })),
        )
        .await;
        let (status, _, body) = response_json(put).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "completed");

        let updated_at: DateTime<Utc> = body["updatedAt"]
            .as_str()
            .unwrap()
            .parse()
            .expect("RFC 3339 timestamp");
        if let Some(previous) = last_updated_at {
            assert!(updated_at >= previous, "updatedAt went backwards");
        }
        last_updated_at = Some(updated_at);
    }

    let get = request(&app.app, Method::GET, "/api/progress", None).await;
    let (_, _, body) = response_json(get).await;
    assert_eq!(body["map"]["5"], "completed");
}

#[tokio::test]
async fn it_last_write_wins_on_status_change() {
    let app = spawn_test_app().await;

    for status in ["in_progress", "completed", "not_started"] {
        request(
            &app.app,
            Method::PUT,
            "/api/progress/9",
            Some(serde_json::json!({ "status": status })),
        )
        .await;
    }

    let get = request(&app.app, Method::GET, "/api/progress", None).await;
    let (_, _, body) = response_json(get).await;
    assert_eq!(body["map"]["9"], "not_started");
}

#[tokio::test]
async fn it_rejects_invalid_status() {
    let app = spawn_test_app().await;

    let put = request(
        &app.app,
        Method::PUT,
        "/api/progress/3",
        Some(serde_json::json!({ "status": "done" })),
    )
    .await;
    let (status, _, body) = response_json(put).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "status must be one of not_started|in_progress|completed."
    );

    let missing = request(
        &app.app,
        Method::PUT,
        "/api/progress/3",
        Some(serde_json::json!({})),
    )
    .await;
    let (status, _, _) = response_json(missing).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn it_rejects_invalid_class_id() {
    let app = spawn_test_app().await;

    for bad in ["0", "25", "seven"] {
        let put = request(
            &app.app,
            Method::PUT,
            &format!("/api/progress/{bad}"),
            Some(serde_json::json!({ "status": "completed" })),
        )
        .await;
        let (status, _, body) = response_json(put).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "classId={bad}");
        assert_eq!(body["error"], "classId must be an integer between 1 and 24.");
    }
}
