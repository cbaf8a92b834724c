//! # Per-message outcomes of one flow walk.

use super::FlowId;

/// Result of dispatching one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageOutcome {
    /// Transport reported success.
    Delivered,
    /// Transport reported failure (or panicked). Final; never retried.
    Failed,
}

impl MessageOutcome {
    /// Maps the transport's boolean result.
    pub fn from_delivered(delivered: bool) -> Self {
        if delivered {
            MessageOutcome::Delivered
        } else {
            MessageOutcome::Failed
        }
    }

    /// True for [`MessageOutcome::Delivered`].
    pub fn is_delivered(self) -> bool {
        matches!(self, MessageOutcome::Delivered)
    }
}

/// Outcomes recorded while walking a flow, in dispatch order.
///
/// A flow has no terminal success/failure status; the report only says what
/// happened to each attempted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowReport {
    flow: FlowId,
    outcomes: Vec<MessageOutcome>,
}

impl FlowReport {
    pub(crate) fn new(flow: FlowId, capacity: usize) -> Self {
        Self {
            flow,
            outcomes: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn record(&mut self, outcome: MessageOutcome) {
        self.outcomes.push(outcome);
    }

    /// Flow this report belongs to.
    pub fn flow(&self) -> FlowId {
        self.flow
    }

    /// Outcomes in dispatch order.
    pub fn outcomes(&self) -> &[MessageOutcome] {
        &self.outcomes
    }

    /// Number of messages handed to the transport.
    pub fn attempted(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of delivered messages.
    pub fn delivered(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_delivered()).count()
    }

    /// Number of failed messages.
    pub fn failed(&self) -> usize {
        self.attempted() - self.delivered()
    }
}
