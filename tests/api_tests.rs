//! Integration tests driving the timer through the HTTP router

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use pomodoro_server::{
    create_router,
    services::{Notification, Notifier},
    state::{AppState, Theme, TimerConfig},
    tasks::ticker_task,
};

#[derive(Debug, Default)]
struct CountingNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl CountingNotifier {
    fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

impl Notifier for CountingNotifier {
    fn notify(&self, notification: &Notification) -> Result<(), String> {
        self.sent.lock().unwrap().push(notification.clone());
        Ok(())
    }
}

struct TestApp {
    router: Router,
    state: Arc<AppState>,
    notifier: Arc<CountingNotifier>,
}

impl TestApp {
    fn new(config: TimerConfig) -> Self {
        let notifier = Arc::new(CountingNotifier::default());
        let state = Arc::new(AppState::new(
            20554,
            "127.0.0.1".to_string(),
            config,
            Theme::default(),
            notifier.clone(),
            true,
        ));
        Self {
            router: create_router(Arc::clone(&state)),
            state,
            notifier,
        }
    }

    fn with_ticker(config: TimerConfig) -> Self {
        let app = Self::new(config);
        tokio::spawn(ticker_task(Arc::clone(&app.state)));
        app
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    async fn post(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::post(uri).body(Body::empty()).unwrap()).await
    }

    async fn post_json(&self, uri: &str, json: Value) -> (StatusCode, Value) {
        self.send(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
        )
        .await
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }
}

#[tokio::test]
async fn health_reports_ok() {
    let app = TestApp::new(TimerConfig::default());
    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn status_starts_idle_with_default_mode() {
    let app = TestApp::new(TimerConfig::default());
    let (status, body) = app.get("/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["status"], "idle");
    assert_eq!(body["timer"]["display"], "25:00");
    assert_eq!(body["timer"]["mode"], "25/5");
    assert_eq!(body["sessions"], 0);
    assert_eq!(body["theme"], "rose");
}

#[tokio::test]
async fn start_records_history_and_repeat_start_is_ignored() {
    let app = TestApp::new(TimerConfig::default());

    let (status, body) = app.post("/start").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "running");

    let (_, body) = app.post("/start").await;
    assert_eq!(body["status"], "ignored");

    let (_, history) = app.get("/history").await;
    assert_eq!(history["count"], 1);
    assert_eq!(history["sessions"][0]["mode"], "25/5");
    assert_eq!(history["sessions"][0]["work_minutes"], 25);

    let (_, status) = app.get("/status").await;
    assert_eq!(status["last_action"], "start");
}

#[tokio::test]
async fn adjust_round_trip_and_floor() {
    let app = TestApp::new(TimerConfig::from_minutes(1, 5));

    let (_, body) = app.post("/work/increase").await;
    assert_eq!(body["timer"]["work_seconds"], 120);
    assert_eq!(body["timer"]["remaining_seconds"], 120);

    let (_, body) = app.post("/work/decrease").await;
    assert_eq!(body["timer"]["work_seconds"], 60);

    let (_, body) = app.post("/work/decrease").await;
    assert_eq!(body["status"], "ignored");
    assert_eq!(body["timer"]["work_seconds"], 60);
}

#[tokio::test]
async fn preset_selection() {
    let app = TestApp::new(TimerConfig::default());

    let (status, body) = app.post_json("/preset", serde_json::json!({ "preset": "35/10" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["work_seconds"], 2100);
    assert_eq!(body["timer"]["break_seconds"], 600);
    assert_eq!(body["timer"]["display"], "35:00");

    let (status, _) = app.post_json("/preset", serde_json::json!({ "preset": "90/30" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn theme_selection_is_bounds_checked() {
    let app = TestApp::new(TimerConfig::default());

    let (status, body) = app.post("/theme/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["selected"], 1);

    let (status, _) = app.post("/theme/3").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = app.get("/themes").await;
    assert_eq!(body["selected"], 1);
    assert_eq!(body["themes"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn choices_are_ignored_until_expired() {
    let app = TestApp::new(TimerConfig::default());
    for uri in ["/choose/work", "/choose/break", "/dismiss", "/stop"] {
        let (status, body) = app.post(uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ignored", "{} should be ignored", uri);
    }
}

#[tokio::test(start_paused = true)]
async fn full_work_block_expires_and_notifies_once() {
    let app = TestApp::with_ticker(TimerConfig::from_minutes(25, 5));
    tokio::task::yield_now().await;

    app.post("/start").await;
    tokio::time::sleep(Duration::from_millis(1_500_500)).await;

    let (_, body) = app.get("/status").await;
    assert_eq!(body["timer"]["status"], "expired");
    assert_eq!(body["timer"]["remaining_seconds"], 0);
    assert_eq!(app.notifier.count(), 1);

    let (_, body) = app.post("/choose/break").await;
    assert_eq!(body["timer"]["phase"], "break");
    assert_eq!(body["timer"]["remaining_seconds"], 300);

    tokio::time::sleep(Duration::from_millis(300_250)).await;
    assert_eq!(app.notifier.count(), 2);

    let (_, history) = app.get("/history").await;
    assert_eq!(history["count"], 1);
}

#[tokio::test(start_paused = true)]
async fn reset_stops_the_countdown() {
    let app = TestApp::with_ticker(TimerConfig::default());
    tokio::task::yield_now().await;

    app.post("/start").await;
    tokio::time::sleep(Duration::from_millis(3_500)).await;
    let (_, body) = app.post("/reset").await;
    assert_eq!(body["status"], "idle");
    assert_eq!(body["timer"]["remaining_seconds"], 1500);

    tokio::time::sleep(Duration::from_secs(5)).await;
    let (_, body) = app.get("/status").await;
    assert_eq!(body["timer"]["remaining_seconds"], 1500);
    assert_eq!(body["timer"]["running"], false);
}

#[tokio::test]
async fn action_messages_use_the_event_names() {
    let app = TestApp::new(TimerConfig::default());

    let (_, body) = app.post("/choose/break").await;
    assert_eq!(body["message"], "choose-break has no effect while idle");
    let (_, status) = app.get("/status").await;
    assert_eq!(status["last_action"], "choose-break");

    let (_, body) = app.post("/work/increase").await;
    assert_eq!(body["message"], "adjust-work applied");
    let (_, status) = app.get("/status").await;
    assert_eq!(status["last_action"], "adjust-work");
}
