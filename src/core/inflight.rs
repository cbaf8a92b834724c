//! # In-flight flow tracker.
//!
//! Records every flow from the moment [`FlowRuntime::submit`](crate::FlowRuntime::submit)
//! accepts it until its task ends. Membership is maintained by the flow task
//! itself through an [`InFlightGuard`], never by bus events, so a lagging
//! event receiver cannot leave a finished flow behind.
//!
//! ```text
//! submit(flow) ──► tracker.enter(id) ──► guard moved into the flow task
//!                                              │
//!                        task ends (normally, by panic, or dropped)
//!                                              ▼
//!                                   Drop for InFlightGuard ──► remove(id)
//! ```
//!
//! Used to name stuck flows when shutdown exceeds its grace period.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, PoisonError};

use crate::flow::FlowId;

/// Thread-safe set of accepted, not yet finished flows.
#[derive(Default)]
pub struct InFlightTracker {
    flows: Mutex<BTreeSet<FlowId>>,
}

impl InFlightTracker {
    /// Creates a new empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `id` as in flight until the returned guard is dropped.
    pub fn enter(self: &Arc<Self>, id: FlowId) -> InFlightGuard {
        self.lock().insert(id);
        InFlightGuard {
            tracker: Arc::clone(self),
            id,
        }
    }

    /// Returns the in-flight flow ids, oldest first.
    pub fn snapshot(&self) -> Vec<String> {
        self.lock().iter().map(FlowId::to_string).collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeSet<FlowId>> {
        self.flows.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Removes its flow from the tracker when dropped.
pub struct InFlightGuard {
    tracker: Arc<InFlightTracker>,
    id: FlowId,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.tracker.lock().remove(&self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::{Flow, Message};

    fn fresh_id() -> FlowId {
        Flow::new("t", "a@b.com", Vec::<Message>::new()).id()
    }

    #[test]
    fn guard_scopes_membership() {
        let tracker = Arc::new(InFlightTracker::new());
        let (a, b) = (fresh_id(), fresh_id());

        let guard_a = tracker.enter(a);
        let guard_b = tracker.enter(b);
        assert_eq!(tracker.snapshot(), vec![a.to_string(), b.to_string()]);

        drop(guard_a);
        assert_eq!(tracker.snapshot(), vec![b.to_string()]);
        drop(guard_b);
        assert!(tracker.snapshot().is_empty());
    }

    #[tokio::test]
    async fn guard_is_released_when_the_task_panics() {
        let tracker = Arc::new(InFlightTracker::new());
        let guard = tracker.enter(fresh_id());

        let res = tokio::spawn(async move {
            let _guard = guard;
            panic!("dispatcher bug");
        })
        .await;

        assert!(res.is_err());
        assert!(tracker.snapshot().is_empty());
    }
}
