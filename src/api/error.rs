//! API error type and HTTP response mapping.
//!
//! Bodies are plain text; clients only ever see the fixed messages below.
//! The precise rejection reason goes to the logs.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::error::{FlowError, RuntimeError};

use super::routes::INVALID_PAYLOAD;

/// HTTP API error.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: &'static str,
}

impl ApiError {
    /// Returns an error response for an invalid flow request.
    #[must_use]
    pub fn invalid_payload() -> Self {
        Self::new(StatusCode::BAD_REQUEST, INVALID_PAYLOAD)
    }

    /// Returns an error response while the runtime is draining.
    #[must_use]
    pub fn shutting_down() -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, "Service shutting down")
    }

    /// Returns an error response for unexpected failures.
    #[must_use]
    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }

    fn new(status: StatusCode, message: &'static str) -> Self {
        Self { status, message }
    }

    /// HTTP status of this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Body text of this error.
    #[must_use]
    pub fn message(&self) -> &'static str {
        self.message
    }
}

impl From<FlowError> for ApiError {
    fn from(err: FlowError) -> Self {
        tracing::debug!(label = err.as_label(), error = %err, "flow request rejected");
        Self::invalid_payload()
    }
}

impl From<RuntimeError> for ApiError {
    fn from(err: RuntimeError) -> Self {
        match err {
            RuntimeError::Closed => Self::shutting_down(),
            other => {
                tracing::error!(label = other.as_label(), error = %other, "flow submit failed");
                Self::internal()
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, self.message).into_response()
    }
}
