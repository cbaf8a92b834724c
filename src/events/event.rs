//! # Runtime events emitted by the flow runtime and dispatchers.
//!
//! The [`EventKind`] enum classifies event types across three categories:
//! - **Flow events**: a flow's walk through its messages (started, scheduled, delivered, failed, completed)
//! - **Shutdown events**: runtime drain (requested, stopped within grace, grace exceeded)
//! - **Subscriber events**: fan-out health (overflow, panic)
//!
//! The [`Event`] struct carries optional metadata such as the flow id, trigger,
//! message index, subject, delay and reason.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//! Within one flow, events are published in dispatch order.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use mailflow::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::MessageScheduled)
//!     .with_flow("flow-1")
//!     .with_index(0)
//!     .with_delay(Duration::from_secs(5));
//!
//! assert_eq!(ev.kind, EventKind::MessageScheduled);
//! assert_eq!(ev.flow.as_deref(), Some("flow-1"));
//! assert_eq!(ev.delay_ms, Some(5_000));
//! ```

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(1);

/// Classification of runtime events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Subscriber events ===
    /// Subscriber panicked during event processing.
    ///
    /// Sets:
    /// - `flow`: subscriber name
    /// - `reason`: panic info
    SubscriberPanicked,

    /// Subscriber dropped an event (queue full or worker closed).
    ///
    /// Sets:
    /// - `flow`: subscriber name
    /// - `reason`: "full" or "closed"
    SubscriberOverflow,

    // === Shutdown events ===
    /// Shutdown requested; the runtime stopped accepting flows.
    ShutdownRequested,

    /// All in-flight flows completed within the grace period.
    AllStoppedWithin,

    /// Grace period exceeded; some flows were still dispatching.
    ///
    /// Sets:
    /// - `reason`: comma-separated stuck flow ids
    GraceExceeded,

    // === Flow events ===
    /// Flow accepted and its dispatcher started.
    ///
    /// Sets:
    /// - `flow`, `trigger`
    /// - `count`: number of messages
    FlowStarted,

    /// Waiting out the delay of the next message.
    ///
    /// Sets:
    /// - `flow`, `trigger`
    /// - `index`: message position (0-based)
    /// - `delay_ms`: wait before dispatch
    MessageScheduled,

    /// Transport reported success.
    ///
    /// Sets:
    /// - `flow`, `trigger`, `index`, `subject`
    MessageDelivered,

    /// Transport reported failure or panicked. The flow continues.
    ///
    /// Sets:
    /// - `flow`, `trigger`, `index`, `subject`
    /// - `reason`: "transport reported failure" or panic info
    MessageFailed,

    /// Every message has been attempted. Terminal for the flow.
    ///
    /// Sets:
    /// - `flow`, `trigger`
    /// - `count`: delivered messages
    /// - `failed`: failed messages
    FlowCompleted,
}

/// Runtime event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Flow id (or subscriber name for subscriber events).
    pub flow: Option<Arc<str>>,
    /// Trigger label of the flow.
    pub trigger: Option<Arc<str>>,
    /// Message position within the flow (0-based).
    pub index: Option<u32>,
    /// Message subject.
    pub subject: Option<Arc<str>>,
    /// Delay before dispatch in milliseconds (compact).
    pub delay_ms: Option<u64>,
    /// Message count (started) or delivered count (completed).
    pub count: Option<u32>,
    /// Failed message count (completed).
    pub failed: Option<u32>,
    /// Human-readable reason (failures, overflow details, etc.).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            flow: None,
            trigger: None,
            index: None,
            subject: None,
            delay_ms: None,
            count: None,
            failed: None,
            reason: None,
        }
    }

    /// Attaches a flow id.
    #[inline]
    pub fn with_flow(mut self, flow: impl Into<Arc<str>>) -> Self {
        self.flow = Some(flow.into());
        self
    }

    /// Attaches a trigger label.
    #[inline]
    pub fn with_trigger(mut self, trigger: impl Into<Arc<str>>) -> Self {
        self.trigger = Some(trigger.into());
        self
    }

    /// Attaches a message index (saturates at `u32::MAX`).
    #[inline]
    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(u32::try_from(index).unwrap_or(u32::MAX));
        self
    }

    /// Attaches a message subject.
    #[inline]
    pub fn with_subject(mut self, subject: impl Into<Arc<str>>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Attaches a delay (stored as milliseconds).
    #[inline]
    pub fn with_delay(mut self, d: Duration) -> Self {
        let ms = d.as_millis().min(u128::from(u64::MAX)) as u64;
        self.delay_ms = Some(ms);
        self
    }

    /// Attaches a count (saturates at `u32::MAX`).
    #[inline]
    pub fn with_count(mut self, n: usize) -> Self {
        self.count = Some(u32::try_from(n).unwrap_or(u32::MAX));
        self
    }

    /// Attaches a failed count (saturates at `u32::MAX`).
    #[inline]
    pub fn with_failed(mut self, n: usize) -> Self {
        self.failed = Some(u32::try_from(n).unwrap_or(u32::MAX));
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Creates a subscriber overflow event.
    #[inline]
    pub fn subscriber_overflow(subscriber: &'static str, reason: &'static str) -> Self {
        Event::new(EventKind::SubscriberOverflow)
            .with_flow(subscriber)
            .with_reason(format!("subscriber={subscriber} reason={reason}"))
    }

    /// Creates a subscriber panic event.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        Event::new(EventKind::SubscriberPanicked)
            .with_flow(subscriber)
            .with_reason(info)
    }

    #[inline]
    pub fn is_subscriber_overflow(&self) -> bool {
        matches!(self.kind, EventKind::SubscriberOverflow)
    }

    #[inline]
    pub fn is_subscriber_panic(&self) -> bool {
        matches!(self.kind, EventKind::SubscriberPanicked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_numbers_increase() {
        let a = Event::new(EventKind::FlowStarted);
        let b = Event::new(EventKind::FlowStarted);
        assert!(b.seq > a.seq);
    }

    #[test]
    fn huge_delay_saturates() {
        let ev = Event::new(EventKind::MessageScheduled).with_delay(Duration::MAX);
        assert_eq!(ev.delay_ms, Some(u64::MAX));
    }

    #[test]
    fn subscriber_helpers_tag_the_kind() {
        let ev = Event::subscriber_overflow("log", "full");
        assert!(ev.is_subscriber_overflow());
        assert_eq!(ev.reason.as_deref(), Some("subscriber=log reason=full"));
        assert!(Event::subscriber_panicked("log", "boom".into()).is_subscriber_panic());
    }
}
