//! # Message transport abstractions.
//!
//! This module provides the delivery capability the dispatcher depends on:
//! - [`Transport`] - trait for a single async `send` returning delivered/failed
//! - [`TransportRef`] - shared reference to a transport (`Arc<dyn Transport>`)
//! - [`TransportFn`] - closure-backed transport (tests, embedding)
//! - [`SimulatedTransport`] - fixed latency plus random failure rate
//!
//! Failure is data: `send` returns `false`, it does not raise.

mod simulated;
mod transport;
mod transport_fn;

pub use simulated::SimulatedTransport;
pub use transport::{Transport, TransportRef};
pub use transport_fn::{Envelope, TransportFn};
