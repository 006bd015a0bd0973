//! HTTP control surface tests

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use tokio::sync::mpsc;
use tower::ServiceExt;

use look_away::{
    api::create_router,
    services::{AutostartRegistrar, OverlayHandle, OverlayPresenter},
    settings::{ReminderSettings, SettingsStore, DEFAULT_MESSAGE},
    state::AppState,
    tasks::{spawn_reminder_scheduler, SchedulerMsg},
};

#[derive(Default)]
struct NullPresenter;

impl OverlayPresenter for NullPresenter {
    fn open(
        &self,
        _message: &str,
        _overlay_id: u64,
        _events: mpsc::Sender<SchedulerMsg>,
    ) -> OverlayHandle {
        OverlayHandle::noop()
    }
}

#[derive(Default)]
struct NullAutostart;

impl AutostartRegistrar for NullAutostart {
    fn is_enabled(&self) -> bool {
        false
    }

    fn enable(&self) -> anyhow::Result<()> {
        Ok(())
    }

    fn disable(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

fn test_app() -> (Router, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let handles = spawn_reminder_scheduler(
        SettingsStore::new(dir.path().join("settings.json")),
        ReminderSettings::default(),
        Arc::new(NullPresenter::default()),
        Arc::new(NullAutostart),
    );
    let state = Arc::new(AppState::new(
        handles.command_tx,
        handles.snapshot_rx,
        20977,
        "127.0.0.1".to_string(),
    ));
    (create_router(state), dir)
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn post_empty(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_reports_ok() {
    let (app, _dir) = test_app();

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn pause_and_start_toggle_the_cycle() {
    let (app, _dir) = test_app();

    let response = app.clone().oneshot(post_empty("/pause")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["scheduler"]["status"], "paused");

    let response = app.oneshot(post_empty("/start")).await.unwrap();
    let json = body_json(response).await;
    assert_eq!(json["scheduler"]["status"], "running");
}

#[tokio::test]
async fn invalid_interval_is_rejected_without_mutation() {
    let (app, _dir) = test_app();

    let response = app
        .clone()
        .oneshot(post_json("/interval", r#"{"minutes": 0}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // A non-numeric value never parses, so nothing is mutated either.
    let response = app
        .clone()
        .oneshot(post_json("/interval", r#"{"minutes": "soon"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = app.oneshot(get("/status")).await.unwrap();
    let json = body_json(response).await;
    assert_eq!(json["scheduler"]["settings"]["interval_minutes"], 20);
}

#[tokio::test]
async fn interval_presets_track_the_selection() {
    let (app, _dir) = test_app();

    let response = app
        .clone()
        .oneshot(post_json("/interval", r#"{"minutes": 25}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.clone().oneshot(get("/intervals")).await.unwrap();
    let json = body_json(response).await;
    let selected: Vec<&serde_json::Value> = json["presets"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|p| p["selected"] == true)
        .collect();
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0]["minutes"], 25);
    assert_eq!(json["custom_selected"], false);

    // A custom interval deselects every preset.
    let response = app
        .clone()
        .oneshot(post_json(
            "/interval",
            r#"{"minutes": 7, "label": "Custom (7 min)"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/intervals")).await.unwrap();
    let json = body_json(response).await;
    assert!(json["presets"]
        .as_array()
        .unwrap()
        .iter()
        .all(|p| p["selected"] == false));
    assert_eq!(json["custom_selected"], true);
}

#[tokio::test]
async fn blank_message_falls_back_to_default() {
    let (app, _dir) = test_app();

    let response = app
        .clone()
        .oneshot(post_json("/message", r#"{"message": "   "}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["scheduler"]["settings"]["message"], DEFAULT_MESSAGE);

    let response = app
        .oneshot(post_json("/message", r#"{"message": "Blink now"}"#))
        .await
        .unwrap();
    let json = body_json(response).await;
    assert_eq!(json["scheduler"]["settings"]["message"], "Blink now");
}

#[tokio::test(start_paused = true)]
async fn status_reports_remaining_time_as_of_now() {
    let (app, _dir) = test_app();

    // Ten minutes into the default 20-minute wait, the status must report
    // the time actually left, not the value at arming.
    tokio::time::sleep(std::time::Duration::from_secs(600)).await;

    let response = app.oneshot(get("/status")).await.unwrap();
    let json = body_json(response).await;
    assert_eq!(json["scheduler"]["next_fire_in_seconds"], 600);
}

#[tokio::test]
async fn developer_link_is_exposed() {
    let (app, _dir) = test_app();

    let response = app.oneshot(get("/developer")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["url"].as_str().unwrap().starts_with("https://"));
}

#[tokio::test]
async fn test_reminder_opens_an_overlay() {
    let (app, _dir) = test_app();

    let response = app.clone().oneshot(post_empty("/test")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["scheduler"]["overlay_remaining_seconds"], 20);
}
