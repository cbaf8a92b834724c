//! # A single message within a flow.

use std::time::Duration;

/// One unit of a flow: what to send and how long to wait before sending it.
///
/// Immutable once built. `delay == Duration::ZERO` means "send without a timed wait"
/// (the dispatcher still yields once before dispatch).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    subject: String,
    body: String,
    delay: Duration,
}

impl Message {
    /// Creates a message.
    pub fn new(subject: impl Into<String>, body: impl Into<String>, delay: Duration) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
            delay,
        }
    }

    /// Creates a message with zero delay.
    pub fn immediate(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(subject, body, Duration::ZERO)
    }

    /// Returns the subject line.
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Returns the message body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the wait applied before this message is dispatched.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}
