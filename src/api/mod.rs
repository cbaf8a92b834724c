//! HTTP front end.
//!
//! Accepts flow requests over HTTP, validates them, and hands them to the
//! [`FlowRuntime`](crate::FlowRuntime). The caller is acknowledged as soon as
//! the flow is accepted; dispatch happens in the background.
//!
//! ## Routes
//! - `POST /trigger-emails` → `200 Emails queued successfully` | `400 Invalid request payload`
//!   | `503 Service shutting down`
//! - `GET /health` → `200 ok`

mod error;
mod request;
mod routes;

pub use error::ApiError;
pub use request::{EmailRequest, FlowRequest};
pub use routes::{router, serve, AppState, INVALID_PAYLOAD, QUEUED};
