//! # FlowDispatcher: single-flow sequential dispatch.
//!
//! Walks one [`Flow`]'s messages in order. For every message it waits out the
//! message's delay, hands it to the [`Transport`](crate::Transport), records
//! the outcome, and moves on.
//!
//! ## Event flow
//! ```text
//! FlowStarted
//!   → MessageScheduled(0) → [wait delay] → MessageDelivered(0) | MessageFailed(0)
//!   → MessageScheduled(1) → [wait delay] → ...
//! FlowCompleted
//! ```
//!
//! ## Architecture
//! ```text
//! Flow ──► FlowRuntime::submit() ──► FlowDispatcher::run()
//!
//! for index in cursor..len {
//!   ├─► publish MessageScheduled
//!   ├─► wait(delay)        (yield_now if zero, sleep otherwise)
//!   ├─► dispatch_once() ─────► transport.send()
//!   │       ▼
//!   │   Delivered/Failed ──► record in FlowReport
//!   └─► next message (no retry, no extra delay)
//! }
//! publish FlowCompleted
//! ```
//!
//! ## Rules
//! - Messages run **sequentially** in original order (never two at once)
//! - Each delay is waited **exactly**: no jitter, no accumulation
//! - A failed or panicking send never stops the walk
//! - The message sequence is immutable; progress is a cursor, not a queue

use std::sync::Arc;
use std::time::Duration;

use tokio::time;

use crate::{
    core::runner::dispatch_once,
    events::{Bus, Event, EventKind},
    flow::{Flow, FlowReport},
    transport::TransportRef,
};

/// Delivers one flow's messages in order, honoring each message's delay.
///
/// ### Responsibilities
/// - **Ordering**: one message at a time, in sequence order
/// - **Timing**: waits out each delay before dispatch
/// - **Isolation**: per-message failures are recorded, never propagated
/// - **Event publishing**: reports the flow's lifecycle to the bus
pub struct FlowDispatcher {
    flow: Flow,
    transport: TransportRef,
    bus: Bus,
    cursor: usize,
    label: Arc<str>,
}

impl FlowDispatcher {
    /// Creates a dispatcher positioned at the first message.
    pub fn new(flow: Flow, transport: TransportRef, bus: Bus) -> Self {
        let label = Arc::from(flow.id().to_string());
        Self {
            flow,
            transport,
            bus,
            cursor: 0,
            label,
        }
    }

    /// Repositions the walk at `index` (past-the-end completes immediately).
    #[must_use]
    pub fn starting_at(mut self, index: usize) -> Self {
        self.cursor = index;
        self
    }

    /// The flow being dispatched.
    pub fn flow(&self) -> &Flow {
        &self.flow
    }

    /// Index of the next message to dispatch.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Runs the walk to completion and returns the per-message outcomes.
    ///
    /// ### Suspension points
    /// - waiting out a message's delay
    /// - awaiting the transport call
    ///
    /// ### Exit conditions
    /// The walk ends only once every message from the cursor on has been
    /// attempted. There is no early exit on failure and no cancellation.
    pub async fn run(mut self) -> FlowReport {
        let remaining = self.flow.len().saturating_sub(self.cursor);
        let mut report = FlowReport::new(self.flow.id(), remaining);

        self.bus
            .publish(self.event(EventKind::FlowStarted).with_count(self.flow.len()));

        while let Some(message) = self.flow.message(self.cursor) {
            let index = self.cursor;
            self.bus.publish(
                self.event(EventKind::MessageScheduled)
                    .with_index(index)
                    .with_delay(message.delay()),
            );

            wait(message.delay()).await;

            let outcome =
                dispatch_once(self.transport.as_ref(), &self.flow, index, message, &self.bus).await;
            report.record(outcome);
            self.cursor += 1;
        }

        self.bus.publish(
            self.event(EventKind::FlowCompleted)
                .with_count(report.delivered())
                .with_failed(report.failed()),
        );
        report
    }

    fn event(&self, kind: EventKind) -> Event {
        Event::new(kind)
            .with_flow(Arc::clone(&self.label))
            .with_trigger(self.flow.trigger())
    }
}

/// Suspends for `delay`; a zero delay still yields once to the scheduler.
async fn wait(delay: Duration) {
    if delay.is_zero() {
        tokio::task::yield_now().await;
    } else {
        time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::{Message, MessageOutcome};
    use crate::transport::{Envelope, TransportFn};
    use std::sync::Mutex;

    fn recording_transport(log: Arc<Mutex<Vec<String>>>) -> TransportRef {
        TransportFn::arc("recorder", move |env: Envelope| {
            let log = Arc::clone(&log);
            async move {
                log.lock().unwrap().push(env.subject);
                true
            }
        })
    }

    fn three_messages() -> Flow {
        Flow::new(
            "t",
            "a@b.com",
            vec![
                Message::immediate("S1", "B1"),
                Message::immediate("S2", "B2"),
                Message::immediate("S3", "B3"),
            ],
        )
    }

    #[tokio::test]
    async fn starting_at_skips_earlier_messages() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let dispatcher =
            FlowDispatcher::new(three_messages(), recording_transport(log.clone()), Bus::new(8))
                .starting_at(1);
        assert_eq!(dispatcher.cursor(), 1);

        let report = dispatcher.run().await;

        assert_eq!(report.attempted(), 2);
        assert_eq!(log.lock().unwrap().as_slice(), &["S2", "S3"]);
    }

    #[tokio::test]
    async fn cursor_past_the_end_completes_without_sends() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let report =
            FlowDispatcher::new(three_messages(), recording_transport(log.clone()), Bus::new(8))
                .starting_at(10)
                .run()
                .await;

        assert_eq!(report.attempted(), 0);
        assert!(log.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn publishes_lifecycle_in_dispatch_order() {
        let bus = Bus::new(32);
        let mut rx = bus.subscribe();
        let flow = Flow::new("signup", "a@b.com", vec![Message::immediate("S1", "B1")]);
        let transport: TransportRef = TransportFn::arc("nope", |_env: Envelope| async { false });

        let report = FlowDispatcher::new(flow, transport, bus).run().await;
        assert_eq!(report.outcomes(), &[MessageOutcome::Failed]);

        let mut kinds = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            assert_eq!(ev.trigger.as_deref(), Some("signup"));
            kinds.push(ev.kind);
        }
        assert_eq!(
            kinds,
            vec![
                EventKind::FlowStarted,
                EventKind::MessageScheduled,
                EventKind::MessageFailed,
                EventKind::FlowCompleted,
            ]
        );
    }
}
