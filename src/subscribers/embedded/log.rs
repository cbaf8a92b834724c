//! # LogWriter: events as tracing records
//!
//! A subscriber that maps each [`Event`] to a `tracing` record with structured
//! fields: a flow's lifecycle at `info`/`debug`, runtime trouble at `warn`.
//!
//! Delivery failures are already logged at `error` where they happen
//! (`core::runner`), so `MessageFailed` only adds a `debug` line here.
//!
//! ## Example output (pretty format, abridged)
//! ```text
//! INFO flow started flow="flow-1" trigger="socksPurchased" messages=2
//! DEBUG message scheduled flow="flow-1" index=0 delay_ms=0
//! INFO message delivered flow="flow-1" index=0 subject="Payment received"
//! DEBUG message failed flow="flow-1" index=1 reason="simulated reported failure"
//! INFO flow completed flow="flow-1" delivered=1 failed=1
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        let flow = e.flow.as_deref().unwrap_or("-");
        let trigger = e.trigger.as_deref().unwrap_or("-");
        match e.kind {
            EventKind::FlowStarted => {
                tracing::info!(flow, trigger, messages = ?e.count, "flow started");
            }
            EventKind::MessageScheduled => {
                tracing::debug!(flow, trigger, index = ?e.index, delay_ms = ?e.delay_ms, "message scheduled");
            }
            EventKind::MessageDelivered => {
                tracing::info!(flow, trigger, index = ?e.index, subject = ?e.subject, "message delivered");
            }
            EventKind::MessageFailed => {
                tracing::debug!(flow, trigger, index = ?e.index, reason = ?e.reason, "message failed");
            }
            EventKind::FlowCompleted => {
                tracing::info!(flow, trigger, delivered = ?e.count, failed = ?e.failed, "flow completed");
            }
            EventKind::ShutdownRequested => {
                tracing::info!("shutdown requested; draining in-flight flows");
            }
            EventKind::AllStoppedWithin => {
                tracing::info!("all flows completed within grace");
            }
            EventKind::GraceExceeded => {
                tracing::warn!(stuck = ?e.reason, "grace exceeded");
            }
            EventKind::SubscriberOverflow => {
                tracing::warn!(subscriber = flow, reason = ?e.reason, "subscriber dropped event");
            }
            EventKind::SubscriberPanicked => {
                tracing::error!(subscriber = flow, info = ?e.reason, "subscriber panicked");
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
