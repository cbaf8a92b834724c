//! HTTP API integration tests.
//!
//! Requests go straight through the router with `tower::ServiceExt::oneshot`;
//! no socket is bound.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::json;
use tower::ServiceExt;

use mailflow::api::{router, INVALID_PAYLOAD, QUEUED};
use mailflow::{Config, Envelope, FlowLimits, FlowRuntime, TransportFn};

struct Harness {
    runtime: Arc<FlowRuntime>,
    sends: Arc<AtomicUsize>,
}

impl Harness {
    fn new() -> Self {
        Self::with_config(Config::default())
    }

    fn with_config(cfg: Config) -> Self {
        let sends = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&sends);
        let runtime = FlowRuntime::builder(cfg)
            .with_transport(TransportFn::arc("count", move |_env: Envelope| {
                let counter = Arc::clone(&counter);
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    true
                }
            }))
            .build();
        Self { runtime, sends }
    }

    fn app(&self) -> Router {
        router(Arc::clone(&self.runtime))
    }

    fn sends(&self) -> usize {
        self.sends.load(Ordering::SeqCst)
    }
}

async fn post_raw(app: Router, body: impl Into<Body>) -> (StatusCode, String) {
    let request = Request::builder()
        .method("POST")
        .uri("/trigger-emails")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), 64 * 1024).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn post(app: Router, payload: serde_json::Value) -> (StatusCode, String) {
    post_raw(app, payload.to_string()).await
}

fn socks_payload() -> serde_json::Value {
    json!({
        "eventNameTrigger": "socksPurchased",
        "userEmail": "test@example.com",
        "emails": [
            { "subject": "Payment received", "emailBody": "Thank you!", "timeDelay": 0 },
            { "subject": "Socks dispatched!", "emailBody": "Get ready!", "timeDelay": 2 }
        ]
    })
}

#[tokio::test(start_paused = true)]
async fn valid_request_is_queued_and_delivered() {
    let h = Harness::new();

    let (status, body) = post(h.app(), socks_payload()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, QUEUED);

    h.runtime.shutdown().await.unwrap();
    assert_eq!(h.sends(), 2);
}

#[tokio::test(start_paused = true)]
async fn acknowledgment_precedes_any_delivery() {
    let h = Harness::new();
    let payload = json!({
        "eventNameTrigger": "t",
        "userEmail": "a@b.com",
        "emails": [{ "subject": "S1", "emailBody": "B1", "timeDelay": 60 }]
    });

    let (status, _) = post(h.app(), payload).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(h.sends(), 0);
    assert_eq!(h.runtime.active_flows(), 1);

    tokio::time::sleep(Duration::from_secs(61)).await;
    assert_eq!(h.sends(), 1);
}

#[tokio::test]
async fn empty_emails_array_is_accepted() {
    let h = Harness::new();
    let payload = json!({ "eventNameTrigger": "t", "userEmail": "a@b.com", "emails": [] });

    let (status, body) = post(h.app(), payload).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, QUEUED);

    h.runtime.shutdown().await.unwrap();
    assert_eq!(h.sends(), 0);
}

#[tokio::test]
async fn missing_emails_is_rejected() {
    let h = Harness::new();
    let payload = json!({ "eventNameTrigger": "t", "userEmail": "a@b.com" });

    let (status, body) = post(h.app(), payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, INVALID_PAYLOAD);
    assert_eq!(h.runtime.active_flows(), 0);
}

#[tokio::test]
async fn empty_object_is_rejected() {
    let h = Harness::new();
    let (status, body) = post(h.app(), json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, INVALID_PAYLOAD);
}

#[tokio::test]
async fn missing_trigger_is_rejected() {
    let h = Harness::new();
    let payload = json!({
        "userEmail": "a@b.com",
        "emails": [{ "subject": "S1", "emailBody": "B1", "timeDelay": 0 }]
    });

    let (status, _) = post(h.app(), payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(h.runtime.active_flows(), 0);
}

#[tokio::test]
async fn empty_recipient_is_rejected() {
    let h = Harness::new();
    let payload = json!({ "eventNameTrigger": "t", "userEmail": "", "emails": [] });

    let (status, _) = post(h.app(), payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let h = Harness::new();
    let (status, body) = post_raw(h.app(), "{ not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, INVALID_PAYLOAD);
}

#[tokio::test]
async fn negative_delay_is_rejected() {
    let h = Harness::new();
    let payload = json!({
        "eventNameTrigger": "t",
        "userEmail": "a@b.com",
        "emails": [{ "subject": "S1", "emailBody": "B1", "timeDelay": -1 }]
    });

    let (status, _) = post(h.app(), payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn limits_from_config_are_enforced() {
    let h = Harness::with_config(Config {
        limits: FlowLimits {
            max_delay: Duration::from_secs(10),
            max_messages: 1,
        },
        ..Config::default()
    });

    let too_long = json!({
        "eventNameTrigger": "t",
        "userEmail": "a@b.com",
        "emails": [{ "subject": "S1", "emailBody": "B1", "timeDelay": 11 }]
    });
    let (status, _) = post(h.app(), too_long).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let too_many = socks_payload();
    let (status, _) = post(h.app(), too_many).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(h.runtime.active_flows(), 0);
}

#[tokio::test]
async fn requests_after_shutdown_get_503() {
    let h = Harness::new();
    h.runtime.shutdown().await.unwrap();

    let (status, body) = post(h.app(), socks_payload()).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body, "Service shutting down");
    assert_eq!(h.sends(), 0);
}

#[tokio::test]
async fn health_endpoint_responds_ok() {
    let h = Harness::new();
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = h.app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), 1024).await.unwrap();
    assert_eq!(&bytes[..], b"ok");
}
