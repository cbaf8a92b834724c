//! # Admission limits for incoming flows.
//!
//! [`FlowLimits`] bounds how long a single accepted flow can keep a task alive:
//! a maximum per-message delay and a maximum number of messages. Limits are
//! checked by the front end **before** a [`Flow`](crate::Flow) is built; the
//! dispatcher itself honors whatever delays it is given.
//!
//! ## Sentinel values
//! - `max_delay = 0s` → unlimited
//! - `max_messages = 0` → unlimited
//!
//! Requests over a limit are rejected, never clamped.

use std::time::Duration;

use crate::error::FlowError;

/// Per-flow admission bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlowLimits {
    /// Largest accepted per-message delay (`0s` = unlimited).
    pub max_delay: Duration,
    /// Largest accepted number of messages (`0` = unlimited).
    pub max_messages: usize,
}

impl FlowLimits {
    /// No bounds at all.
    pub const UNLIMITED: FlowLimits = FlowLimits {
        max_delay: Duration::ZERO,
        max_messages: 0,
    };

    /// Returns the delay bound as an `Option` (`None` = unlimited).
    #[inline]
    pub fn delay_limit(&self) -> Option<Duration> {
        if self.max_delay == Duration::ZERO {
            None
        } else {
            Some(self.max_delay)
        }
    }

    /// Returns the message-count bound as an `Option` (`None` = unlimited).
    #[inline]
    pub fn message_limit(&self) -> Option<usize> {
        if self.max_messages == 0 {
            None
        } else {
            Some(self.max_messages)
        }
    }

    /// Checks the number of messages.
    pub fn check_count(&self, count: usize) -> Result<(), FlowError> {
        match self.message_limit() {
            Some(max) if count > max => Err(FlowError::TooManyMessages { count, max }),
            _ => Ok(()),
        }
    }

    /// Checks one message delay.
    pub fn check_delay(&self, index: usize, delay: Duration) -> Result<(), FlowError> {
        match self.delay_limit() {
            Some(max) if delay > max => Err(FlowError::DelayTooLong { index, delay, max }),
            _ => Ok(()),
        }
    }
}

impl Default for FlowLimits {
    /// Default limits:
    ///
    /// - `max_delay = 7 days`
    /// - `max_messages = 100`
    fn default() -> Self {
        Self {
            max_delay: Duration::from_secs(7 * 24 * 60 * 60),
            max_messages: 100,
        }
    }
}
