//! # Fan-out of flow events to subscribers.
//!
//! [`SubscriberSet`] gives every [`Subscribe`] its own bounded queue and worker
//! task. The runtime's listener calls [`SubscriberSet::emit`] for each bus
//! event; a dispatcher never waits on a subscriber.
//!
//! ```text
//! emit(MessageFailed)
//!     ├──► [queue] ──► LogWriter worker
//!     └──► [queue] ──► DeliveryAudit worker ──► panic → SubscriberPanicked on the bus
//! ```
//!
//! - Each subscriber sees events in emit order; subscribers are not ordered
//!   relative to each other.
//! - A full queue drops the event for that subscriber only and publishes
//!   `SubscriberOverflow`.
//! - A panicking `on_event` is caught (`AssertUnwindSafe`); state the
//!   subscriber guards with a `Mutex` may be left poisoned.

use std::sync::{Arc, PoisonError, RwLock};

use futures::FutureExt;
use tokio::{sync::mpsc, task::JoinHandle};

use crate::events::{Bus, Event, EventKind};
use crate::subscribers::Subscribe;

/// Per-subscriber channel metadata.
struct SubscriberChannel {
    name: &'static str,
    sender: mpsc::Sender<Arc<Event>>,
}

/// Fan-out coordinator for multiple event subscribers.
pub struct SubscriberSet {
    channels: RwLock<Vec<SubscriberChannel>>,
    workers: std::sync::Mutex<Vec<JoinHandle<()>>>,
    bus: Bus,
}

impl SubscriberSet {
    /// Creates a new set and spawns one worker task per subscriber.
    ///
    /// Must be called inside a tokio runtime. Minimum queue capacity is 1.
    #[must_use]
    pub fn new(subs: Vec<Arc<dyn Subscribe>>, bus: Bus) -> Self {
        let mut channels = Vec::with_capacity(subs.len());
        let mut workers = Vec::with_capacity(subs.len());

        for sub in subs {
            let cap = sub.queue_capacity().max(1);
            let name = sub.name();
            let (tx, mut rx) = mpsc::channel::<Arc<Event>>(cap);
            let s = Arc::clone(&sub);
            let bus_for_worker = bus.clone();

            let handle = tokio::spawn(async move {
                while let Some(ev) = rx.recv().await {
                    let fut = s.on_event(ev.as_ref());

                    if let Err(panic_err) = std::panic::AssertUnwindSafe(fut).catch_unwind().await {
                        let info = panic_message(&*panic_err);
                        bus_for_worker.publish(Event::subscriber_panicked(s.name(), info));
                    }
                }
            });
            channels.push(SubscriberChannel { name, sender: tx });
            workers.push(handle);
        }
        Self {
            channels: RwLock::new(channels),
            workers: std::sync::Mutex::new(workers),
            bus,
        }
    }

    /// Queues `event` for every subscriber without waiting.
    ///
    /// The event is cloned once and shared. A full or closed queue drops the
    /// event for that subscriber and publishes `SubscriberOverflow`, unless the
    /// event is itself an overflow report.
    pub fn emit(&self, event: &Event) {
        let event = Arc::new(event.clone());
        let is_overflow_evt = matches!(event.kind, EventKind::SubscriberOverflow);
        let channels = self.channels.read().unwrap_or_else(PoisonError::into_inner);

        for channel in channels.iter() {
            let reason = match channel.sender.try_send(Arc::clone(&event)) {
                Ok(()) => continue,
                Err(mpsc::error::TrySendError::Full(_)) => "full",
                Err(mpsc::error::TrySendError::Closed(_)) => "closed",
            };
            if !is_overflow_evt {
                self.bus
                    .publish(Event::subscriber_overflow(channel.name, reason));
            }
        }
    }

    /// Gracefully shuts down all subscriber workers.
    ///
    /// 1. Drops all channel senders (workers drain their queue and see it closed)
    /// 2. Awaits all worker tasks to finish
    ///
    /// Later `emit` calls are no-ops.
    pub async fn shutdown(&self) {
        let channels = std::mem::take(
            &mut *self.channels.write().unwrap_or_else(PoisonError::into_inner),
        );
        drop(channels);

        let workers = std::mem::take(
            &mut *self.workers.lock().unwrap_or_else(PoisonError::into_inner),
        );
        for h in workers {
            let _ = h.await;
        }
    }
}

/// Extracts a printable message from a panic payload.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct Recorder {
        seen: Mutex<Vec<EventKind>>,
    }

    #[async_trait]
    impl Subscribe for Recorder {
        async fn on_event(&self, event: &Event) {
            self.seen.lock().unwrap().push(event.kind);
        }
        fn name(&self) -> &'static str {
            "recorder"
        }
    }

    struct Panicker;

    #[async_trait]
    impl Subscribe for Panicker {
        async fn on_event(&self, _event: &Event) {
            panic!("subscriber exploded");
        }
        fn name(&self) -> &'static str {
            "panicker"
        }
    }

    #[tokio::test]
    async fn delivers_in_order_and_drains_on_shutdown() {
        let bus = Bus::new(16);
        let rec = Arc::new(Recorder {
            seen: Mutex::new(Vec::new()),
        });
        let set = SubscriberSet::new(vec![rec.clone() as Arc<dyn Subscribe>], bus);

        set.emit(&Event::new(EventKind::FlowStarted));
        set.emit(&Event::new(EventKind::FlowCompleted));
        set.shutdown().await;
        set.emit(&Event::new(EventKind::ShutdownRequested));

        assert_eq!(
            rec.seen.lock().unwrap().as_slice(),
            &[EventKind::FlowStarted, EventKind::FlowCompleted]
        );
    }

    #[tokio::test]
    async fn panicking_subscriber_is_reported_on_the_bus() {
        let bus = Bus::new(16);
        let mut rx = bus.subscribe();
        let set = SubscriberSet::new(vec![Arc::new(Panicker) as Arc<dyn Subscribe>], bus);

        set.emit(&Event::new(EventKind::FlowStarted));
        let ev = rx.recv().await.unwrap();
        assert_eq!(ev.kind, EventKind::SubscriberPanicked);
        assert_eq!(ev.reason.as_deref(), Some("subscriber exploded"));
        set.shutdown().await;
    }
}
