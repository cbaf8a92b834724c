//! # FlowRuntime: accepts flows, fans out events, drains on shutdown.
//!
//! The [`FlowRuntime`] owns the event bus, a [`SubscriberSet`], the
//! in-flight tracker and the shared [`Transport`](crate::Transport). Every
//! submitted flow gets its own [`FlowDispatcher`] task; flows never wait on
//! one another.
//!
//! ## High-level architecture
//! ```text
//! submit(Flow) ──► FlowDispatcher::new(flow, transport, bus)
//!                        └──► tracker.spawn(dispatcher.run())   (one task per flow)
//!                        └──► FlowHandle returned immediately
//!
//! In-flight tracking (at the source, not from events):
//!   submit() ──► InFlightTracker::enter(id) ──► guard lives inside the flow task
//!
//! Event flow (telemetry only, may lag under bursts):
//!   FlowDispatcher ── publish(Event) ──► Bus ──► subscriber_listener ──► SubscriberSet::emit
//!
//! Shutdown path:
//!   shutdown()
//!     └─► closed = true (submit now returns RuntimeError::Closed)
//!     └─► Bus.publish(ShutdownRequested)
//!     └─► wait for all flow tasks up to cfg.grace:
//!            ├─ all done   → Bus.publish(AllStoppedWithin)
//!            └─ timed out  → Bus.publish(GraceExceeded) + InFlightTracker.snapshot()
//!     └─► stop listener (drains buffered events), shut down subscriber workers
//! ```
//!
//! Flows are never cancelled by the runtime: a flow that outlives the grace
//! period is reported as stuck, and ends when the process does.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use crate::{
    config::Config,
    error::RuntimeError,
    events::{Bus, Event, EventKind},
    flow::Flow,
    subscribers::{Subscribe, SubscriberSet},
    transport::TransportRef,
};

use super::{
    builder::FlowRuntimeBuilder, dispatcher::FlowDispatcher, handle::FlowHandle,
    inflight::InFlightTracker,
};

/// Coordinates flow dispatchers, event delivery and graceful shutdown.
pub struct FlowRuntime {
    cfg: Config,
    bus: Bus,
    transport: TransportRef,
    subs: Arc<SubscriberSet>,
    in_flight: Arc<InFlightTracker>,
    flows: TaskTracker,
    closed: AtomicBool,
    listener_stop: CancellationToken,
    listener: Mutex<Option<JoinHandle<()>>>,
}

impl FlowRuntime {
    /// Returns a builder for the runtime.
    pub fn builder(cfg: Config) -> FlowRuntimeBuilder {
        FlowRuntimeBuilder::new(cfg)
    }

    pub(super) fn new_internal(
        cfg: Config,
        transport: TransportRef,
        subscribers: Vec<Arc<dyn Subscribe>>,
    ) -> Arc<Self> {
        let bus = Bus::new(cfg.bus_capacity_clamped());
        let subs = Arc::new(SubscriberSet::new(subscribers, bus.clone()));

        let runtime = Arc::new(Self {
            cfg,
            bus,
            transport,
            subs,
            in_flight: Arc::new(InFlightTracker::new()),
            flows: TaskTracker::new(),
            closed: AtomicBool::new(false),
            listener_stop: CancellationToken::new(),
            listener: Mutex::new(None),
        });

        let handle = runtime.subscriber_listener();
        *runtime
            .listener
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(handle);
        runtime
    }

    /// Accepts a flow and starts dispatching it in the background.
    ///
    /// Returns immediately; the caller gets no per-message outcome. The
    /// returned [`FlowHandle`] may be dropped (fire-and-forget) or joined.
    pub fn submit(&self, flow: Flow) -> Result<FlowHandle, RuntimeError> {
        if self.is_closed() {
            return Err(RuntimeError::Closed);
        }

        let id = flow.id();
        let dispatcher = FlowDispatcher::new(flow, Arc::clone(&self.transport), self.bus.clone());
        let guard = self.in_flight.enter(id);
        let join = self.flows.spawn(async move {
            let _guard = guard;
            dispatcher.run().await
        });
        Ok(FlowHandle::new(id, join))
    }

    /// Event bus shared with all dispatchers.
    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    /// Runtime configuration.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Number of flow tasks that have not finished yet.
    pub fn active_flows(&self) -> usize {
        self.flows.len()
    }

    /// Ids of accepted flows whose task has not finished, oldest first.
    pub fn in_flight(&self) -> Vec<String> {
        self.in_flight.snapshot()
    }

    /// True once [`shutdown`](Self::shutdown) has been called.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Stops accepting flows and waits for in-flight flows within the grace period.
    ///
    /// Publishes [`EventKind::AllStoppedWithin`] on success, or
    /// [`EventKind::GraceExceeded`] on timeout and returns
    /// [`RuntimeError::GraceExceeded`] with the list of stuck flows.
    /// Subscriber workers are drained and stopped in both cases.
    pub async fn shutdown(&self) -> Result<(), RuntimeError> {
        self.closed.store(true, Ordering::Release);
        self.bus.publish(Event::new(EventKind::ShutdownRequested));
        self.flows.close();

        let grace = self.cfg.grace;
        let res = match tokio::time::timeout(grace, self.flows.wait()).await {
            Ok(()) => {
                self.bus.publish(Event::new(EventKind::AllStoppedWithin));
                Ok(())
            }
            Err(_elapsed) => {
                let stuck = self.in_flight.snapshot();
                self.bus.publish(
                    Event::new(EventKind::GraceExceeded).with_reason(stuck.join(",")),
                );
                Err(RuntimeError::GraceExceeded { grace, stuck })
            }
        };

        self.stop_listener().await;
        res
    }

    /// Subscribes to the bus and forwards events to the subscriber set.
    ///
    /// On stop, events already buffered on the bus are still forwarded.
    fn subscriber_listener(&self) -> JoinHandle<()> {
        let mut rx = self.bus.subscribe();
        let set = Arc::clone(&self.subs);
        let stop = self.listener_stop.clone();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    biased;
                    msg = rx.recv() => match msg {
                        Ok(ev) => set.emit(&ev),
                        Err(RecvError::Lagged(skipped)) => {
                            tracing::warn!(skipped, "event listener lagged; events dropped");
                        }
                        Err(RecvError::Closed) => break,
                    },
                    _ = stop.cancelled() => {
                        loop {
                            match rx.try_recv() {
                                Ok(ev) => set.emit(&ev),
                                Err(TryRecvError::Lagged(_)) => continue,
                                Err(_) => break,
                            }
                        }
                        break;
                    }
                }
            }
        })
    }

    async fn stop_listener(&self) {
        self.listener_stop.cancel();
        let handle = self
            .listener
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            let _ = handle.await;
        }
        self.subs.shutdown().await;
    }
}
