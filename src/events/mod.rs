//! Runtime events: types and broadcast bus.
//!
//! This module groups the event **data model** and the **bus** used to
//! publish/subscribe to events emitted by the runtime and flow dispatchers.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: `FlowRuntime`, `FlowDispatcher`, `runner::dispatch_once`.
//! - **Consumers**: `FlowRuntime::subscriber_listener()` (fans out to `SubscriberSet`).
//!
//! The bus is telemetry: under a burst a lagging receiver skips events. Failure
//! logging and in-flight tracking never depend on it.

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
