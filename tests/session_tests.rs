//! Session API tests
//!
//! Drive a visitor's dashboard through the session endpoints

use aipowermeter::config::Settings;
use aipowermeter::handlers::{build_router, AppState};
use aipowermeter::services::AnimationClient;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

fn create_test_app() -> Router {
    build_router(AppState::new(Settings::default(), AnimationClient::disabled()))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create_session(app: &Router) -> String {
    let (status, body) = send(app, "POST", "/api/sessions", None).await;
    assert_eq!(status, StatusCode::CREATED);
    body["sessionId"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_new_session_starts_at_zero() {
    let app = create_test_app();
    let id = create_session(&app).await;

    let (status, body) = send(&app, "GET", &format!("/api/sessions/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"]["usage"]["energyKWh"], 0.0);
    assert_eq!(body["state"]["usageComputed"], false);
    assert_eq!(body["state"]["trainingComputed"], false);
    assert_eq!(body["state"]["pledged"], false);

    let (status, offset) = send(&app, "GET", &format!("/api/sessions/{}/offset", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(offset["treesPerYear"], 0.0);
    assert!(offset.get("components").is_none());
}

#[tokio::test]
async fn test_offset_uses_only_recorded_training() {
    let app = create_test_app();
    let id = create_session(&app).await;

    let (status, result) = send(
        &app,
        "POST",
        &format!("/api/sessions/{}/training", id),
        Some(json!({"modelCount": 44})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["co2Kg"], 22.0);

    let (_, offset) = send(&app, "GET", &format!("/api/sessions/{}/offset", id), None).await;
    assert_eq!(offset["treesPerYear"], 1.0);
    assert_eq!(offset["components"], json!(["training"]));
}

#[tokio::test]
async fn test_offset_sums_usage_and_training() {
    let app = create_test_app();
    let id = create_session(&app).await;

    send(&app, "POST", &format!("/api/sessions/{}/usage", id), Some(json!({"promptCount": 2000}))).await;
    send(&app, "POST", &format!("/api/sessions/{}/training", id), Some(json!({"modelCount": 42}))).await;

    let (_, offset) = send(&app, "GET", &format!("/api/sessions/{}/offset", id), None).await;
    assert!((offset["totalCo2Kg"].as_f64().unwrap() - 22.0).abs() < 1e-9);
    assert!((offset["treesPerYear"].as_f64().unwrap() - 1.0).abs() < 1e-9);
    assert_eq!(offset["components"], json!(["usage", "training"]));
}

#[tokio::test]
async fn test_rejected_input_keeps_previous_result() {
    let app = create_test_app();
    let id = create_session(&app).await;

    send(&app, "POST", &format!("/api/sessions/{}/usage", id), Some(json!({"promptCount": 10}))).await;
    let (status, error) = send(
        &app,
        "POST",
        &format!("/api/sessions/{}/usage", id),
        Some(json!({"promptCount": -1})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"]["type"], "invalid_argument");

    let (_, body) = send(&app, "GET", &format!("/api/sessions/{}", id), None).await;
    assert!((body["state"]["usage"]["co2Kg"].as_f64().unwrap() - 0.005).abs() < 1e-12);
}

#[tokio::test]
async fn test_savings_pledge_and_reset() {
    let app = create_test_app();
    let id = create_session(&app).await;

    let (status, savings) = send(
        &app,
        "POST",
        &format!("/api/sessions/{}/savings", id),
        Some(json!({"reducedPrompts": 100})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!((savings["energyKWh"].as_f64().unwrap() - 0.2).abs() < 1e-12);

    let (status, pledge) = send(&app, "POST", &format!("/api/sessions/{}/pledge", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(pledge["pledged"], true);

    let (status, body) = send(&app, "POST", &format!("/api/sessions/{}/reset", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"]["pledged"], false);
    assert_eq!(body["state"]["savings"]["energyKWh"], 0.0);
}

#[tokio::test]
async fn test_unknown_and_invalid_session_ids() {
    let app = create_test_app();

    let missing = uuid::Uuid::new_v4();
    let (status, error) = send(&app, "GET", &format!("/api/sessions/{}", missing), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["error"]["type"], "not_found_error");

    let (status, _) = send(&app, "GET", "/api/sessions/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_session() {
    let app = create_test_app();
    let id = create_session(&app).await;

    let (status, _) = send(&app, "DELETE", &format!("/api/sessions/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "DELETE", &format!("/api/sessions/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
