//! Error types used by the mailflow runtime and its front end.
//!
//! This module defines three error enums:
//!
//! - [`FlowError`]: a flow request rejected before it reaches the dispatcher.
//! - [`RuntimeError`]: errors raised by the flow runtime itself.
//! - [`ConfigError`]: an environment value that could not be parsed.
//!
//! All of them provide `as_label` for logs/metrics. A failed delivery is
//! **not** an error: it is recorded as [`MessageOutcome::Failed`](crate::MessageOutcome)
//! and reported through the event bus.

use std::time::Duration;
use thiserror::Error;

/// # Errors produced while turning a request into a [`Flow`](crate::Flow).
///
/// The dispatcher never observes these; a rejected request never becomes a flow.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlowError {
    /// A required top-level field is absent, null, or empty.
    #[error("missing required field `{field}`")]
    MissingField {
        /// Wire name of the field.
        field: &'static str,
    },

    /// A message delay is negative or not a finite number of seconds.
    #[error("message {index}: invalid delay {value}s")]
    InvalidDelay {
        /// Position of the message in the request.
        index: usize,
        /// Raw value received, in seconds.
        value: f64,
    },

    /// A message delay exceeds the configured maximum.
    #[error("message {index}: delay {delay:?} exceeds maximum {max:?}")]
    DelayTooLong {
        /// Position of the message in the request.
        index: usize,
        /// Requested delay.
        delay: Duration,
        /// Configured limit.
        max: Duration,
    },

    /// The flow holds more messages than allowed.
    #[error("flow has {count} messages; maximum is {max}")]
    TooManyMessages {
        /// Number of messages received.
        count: usize,
        /// Configured limit.
        max: usize,
    },

    /// Body is not JSON of the expected shape.
    #[error("malformed request: {reason}")]
    Malformed {
        /// Decoder message.
        reason: String,
    },
}

impl FlowError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use mailflow::FlowError;
    ///
    /// let err = FlowError::MissingField { field: "emails" };
    /// assert_eq!(err.as_label(), "flow_missing_field");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            FlowError::MissingField { .. } => "flow_missing_field",
            FlowError::InvalidDelay { .. } => "flow_invalid_delay",
            FlowError::DelayTooLong { .. } => "flow_delay_too_long",
            FlowError::TooManyMessages { .. } => "flow_too_many_messages",
            FlowError::Malformed { .. } => "flow_malformed",
        }
    }
}

/// # Errors produced by the flow runtime.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// The runtime no longer accepts flows (shutdown in progress).
    #[error("runtime is closed; no new flows accepted")]
    Closed,

    /// Shutdown grace period was exceeded; some flows were still dispatching.
    #[error("shutdown timeout {grace:?} exceeded; stuck: {stuck:?}")]
    GraceExceeded {
        /// The configured grace duration.
        grace: Duration,
        /// Flows that had not completed in time.
        stuck: Vec<String>,
    },
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use mailflow::RuntimeError;
    /// use std::time::Duration;
    ///
    /// let err = RuntimeError::GraceExceeded { grace: Duration::from_secs(5), stuck: vec![] };
    /// assert_eq!(err.as_label(), "runtime_grace_exceeded");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::Closed => "runtime_closed",
            RuntimeError::GraceExceeded { .. } => "runtime_grace_exceeded",
        }
    }
}

/// # Errors produced while reading configuration.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable is set but cannot be parsed.
    #[error("invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        /// Environment variable name.
        key: &'static str,
        /// Raw value.
        value: String,
        /// Parser message.
        reason: String,
    },
}

impl ConfigError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            ConfigError::InvalidValue { .. } => "config_invalid_value",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flow_error_messages_name_the_message_index() {
        let err = FlowError::InvalidDelay {
            index: 2,
            value: -1.0,
        };
        assert_eq!(err.to_string(), "message 2: invalid delay -1s");
        assert_eq!(err.as_label(), "flow_invalid_delay");
    }

    #[test]
    fn runtime_error_labels_are_stable() {
        assert_eq!(RuntimeError::Closed.as_label(), "runtime_closed");
        let err = RuntimeError::GraceExceeded {
            grace: Duration::from_secs(1),
            stuck: vec!["flow-7".into()],
        };
        assert!(err.to_string().contains("flow-7"));
    }
}
