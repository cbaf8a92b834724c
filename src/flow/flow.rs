//! # Flow: one accepted request.
//!
//! A [`Flow`] bundles a trigger label, a recipient and an ordered sequence of
//! [`Message`]s. The sequence is stored as `Arc<[Message]>` and is never
//! mutated; the dispatcher walks it with an index instead of popping a queue.
//!
//! ## Rules
//! - Every `Flow::new` call yields a fresh [`FlowId`] (flows are never merged or deduplicated).
//! - `trigger` is an opaque label, used only in events and logs.
//! - `recipient` is not validated for format.
//! - An empty message sequence is valid.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;

use super::Message;

/// Global counter for flow identifiers.
static FLOW_SEQ: AtomicU64 = AtomicU64::new(1);

/// Process-unique, monotonically assigned flow identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FlowId(u64);

impl FlowId {
    fn next() -> Self {
        Self(FLOW_SEQ.fetch_add(1, AtomicOrdering::Relaxed))
    }

    /// Raw numeric value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for FlowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "flow-{}", self.0)
    }
}

/// A recipient plus an ordered sequence of messages to dispatch.
///
/// ## Example
/// ```rust
/// use std::time::Duration;
/// use mailflow::{Flow, Message};
///
/// let flow = Flow::new(
///     "socksPurchased",
///     "test@example.com",
///     vec![
///         Message::immediate("Payment received", "Thank you!"),
///         Message::new("Socks dispatched!", "Get ready!", Duration::from_secs(60)),
///     ],
/// );
/// assert_eq!(flow.len(), 2);
/// assert_eq!(flow.total_delay(), Duration::from_secs(60));
/// ```
#[derive(Debug, Clone)]
pub struct Flow {
    id: FlowId,
    trigger: Arc<str>,
    recipient: Arc<str>,
    messages: Arc<[Message]>,
}

impl Flow {
    /// Creates a new flow with a fresh identifier.
    pub fn new(
        trigger: impl Into<Arc<str>>,
        recipient: impl Into<Arc<str>>,
        messages: impl Into<Arc<[Message]>>,
    ) -> Self {
        Self {
            id: FlowId::next(),
            trigger: trigger.into(),
            recipient: recipient.into(),
            messages: messages.into(),
        }
    }

    /// Returns the flow identifier.
    pub fn id(&self) -> FlowId {
        self.id
    }

    /// Returns the trigger label.
    pub fn trigger(&self) -> &str {
        &self.trigger
    }

    /// Returns the recipient address.
    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    /// Returns the messages in dispatch order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Returns the message at `index`, if any.
    pub fn message(&self, index: usize) -> Option<&Message> {
        self.messages.get(index)
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// True if the flow has no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Sum of all message delays (lower bound for the flow's wall time).
    pub fn total_delay(&self) -> std::time::Duration {
        self.messages.iter().map(Message::delay).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn each_flow_gets_a_distinct_id() {
        let a = Flow::new("t", "a@b.com", Vec::<Message>::new());
        let b = Flow::new("t", "a@b.com", Vec::<Message>::new());
        assert_ne!(a.id(), b.id());
        assert!(b.id() > a.id());
    }

    #[test]
    fn flow_id_display() {
        let flow = Flow::new("t", "a@b.com", Vec::<Message>::new());
        assert_eq!(flow.id().to_string(), format!("flow-{}", flow.id().get()));
    }

    #[test]
    fn clones_share_the_sequence() {
        let flow = Flow::new(
            "t",
            "a@b.com",
            vec![Message::new("S1", "B1", Duration::from_secs(3))],
        );
        let copy = flow.clone();
        assert_eq!(copy.id(), flow.id());
        assert!(std::ptr::eq(copy.messages(), flow.messages()));
        assert_eq!(copy.message(0).map(Message::subject), Some("S1"));
        assert!(copy.message(1).is_none());
    }
}
