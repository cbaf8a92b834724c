//! Router, handlers and server entry point.

use std::future::Future;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;

use crate::core::FlowRuntime;
use crate::policies::FlowLimits;

use super::error::ApiError;
use super::request::FlowRequest;

/// Body of a successful `POST /trigger-emails`.
pub const QUEUED: &str = "Emails queued successfully";

/// Body of a rejected `POST /trigger-emails`.
pub const INVALID_PAYLOAD: &str = "Invalid request payload";

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    runtime: Arc<FlowRuntime>,
    limits: FlowLimits,
}

impl AppState {
    /// Creates state using the runtime's configured limits.
    pub fn new(runtime: Arc<FlowRuntime>) -> Self {
        let limits = runtime.config().limits;
        Self { runtime, limits }
    }
}

/// Builds the HTTP router.
pub fn router(runtime: Arc<FlowRuntime>) -> Router {
    Router::new()
        .route("/trigger-emails", post(trigger_emails))
        .route("/health", get(health))
        .with_state(AppState::new(runtime))
}

/// Serves the router on `listener` until `shutdown` resolves.
///
/// In-flight HTTP requests finish first; running flows are not touched
/// (drain them with [`FlowRuntime::shutdown`]).
pub async fn serve<F>(
    listener: TcpListener,
    runtime: Arc<FlowRuntime>,
    shutdown: F,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(runtime))
        .with_graceful_shutdown(shutdown)
        .await
}

/// Accepts a flow and acknowledges before any message is dispatched.
async fn trigger_emails(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<&'static str, ApiError> {
    let flow = FlowRequest::from_json(&body)?.into_flow(&state.limits)?;
    let (trigger, messages, total_delay) =
        (flow.trigger().to_owned(), flow.len(), flow.total_delay());

    let handle = state.runtime.submit(flow)?;
    tracing::debug!(
        flow = %handle.id(),
        trigger = %trigger,
        messages,
        total_delay = ?total_delay,
        "flow accepted"
    );
    Ok(QUEUED)
}

async fn health() -> &'static str {
    "ok"
}
