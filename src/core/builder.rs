use std::sync::Arc;

use crate::{
    config::Config,
    subscribers::Subscribe,
    transport::{SimulatedTransport, TransportRef},
};

use super::runtime::FlowRuntime;

/// Builder for constructing a [`FlowRuntime`].
pub struct FlowRuntimeBuilder {
    cfg: Config,
    subscribers: Vec<Arc<dyn Subscribe>>,
    transport: Option<TransportRef>,
}

impl FlowRuntimeBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            subscribers: Vec::new(),
            transport: None,
        }
    }

    /// Sets event subscribers for observability.
    ///
    /// Subscribers receive runtime events (flow lifecycle, delivery failures, etc.)
    /// through dedicated workers with bounded queues.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Sets the transport shared by every flow.
    ///
    /// Defaults to a [`SimulatedTransport`] built from
    /// `transport_latency` / `transport_success_rate` in the config.
    pub fn with_transport(mut self, transport: TransportRef) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Builds and returns the runtime.
    ///
    /// Must be called inside a tokio runtime: it spawns the event listener and
    /// the subscriber workers.
    pub fn build(self) -> Arc<FlowRuntime> {
        let transport = self.transport.unwrap_or_else(|| {
            Arc::new(SimulatedTransport::new(
                self.cfg.transport_latency,
                self.cfg.transport_success_rate,
            ))
        });
        FlowRuntime::new_internal(self.cfg, transport, self.subscribers)
    }
}
