//! # Flow event subscribers.
//!
//! A [`Subscribe`] implementation watches flows go by: a per-trigger delivery
//! audit, a failure counter feeding an alert, a sink that mirrors
//! `MessageDelivered` into a CRM. Each one gets its own worker and bounded
//! queue inside the [`SubscriberSet`](crate::SubscriberSet), so a slow audit
//! writer never delays a send.
//!
//! Subscribers see telemetry, not a ledger: under a burst the bus may skip
//! events and a full queue drops them (`SubscriberOverflow`). Anything that
//! must not miss a failure reads the `error` log written by the dispatcher or
//! the [`FlowReport`](crate::FlowReport) returned by `FlowHandle::join`.
//!
//! ## Example
//! ```rust
//! use std::collections::HashMap;
//! use std::sync::Mutex;
//!
//! use async_trait::async_trait;
//! use mailflow::{Event, EventKind, Subscribe};
//!
//! /// Delivered / failed counts per trigger.
//! #[derive(Default)]
//! struct DeliveryAudit {
//!     by_trigger: Mutex<HashMap<String, (u32, u32)>>,
//! }
//!
//! #[async_trait]
//! impl Subscribe for DeliveryAudit {
//!     async fn on_event(&self, ev: &Event) {
//!         let Some(trigger) = ev.trigger.as_deref() else { return };
//!         let mut map = self.by_trigger.lock().unwrap();
//!         let entry = map.entry(trigger.to_string()).or_default();
//!         match ev.kind {
//!             EventKind::MessageDelivered => entry.0 += 1,
//!             EventKind::MessageFailed => entry.1 += 1,
//!             _ => {}
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str {
//!         "delivery-audit"
//!     }
//! }
//! ```

use async_trait::async_trait;

use crate::events::Event;

/// Observer of flow lifecycle events.
#[async_trait]
pub trait Subscribe: Send + Sync + 'static {
    /// Handles one event. Runs on this subscriber's worker task.
    async fn on_event(&self, event: &Event);

    /// Name used in overflow and panic reports.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Queue length before events are dropped for this subscriber.
    fn queue_capacity(&self) -> usize {
        1024
    }
}
