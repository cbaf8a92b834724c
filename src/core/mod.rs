//! Runtime core: flow dispatch and lifecycle.
//!
//! The public API from this module is [`FlowRuntime`] (accepts flows, drains on
//! shutdown), its builder, the per-flow [`FlowDispatcher`] and the [`FlowHandle`]
//! returned on submit.
//!
//! Internal modules:
//! - [`runner`]: dispatches one message and publishes its outcome;
//! - [`dispatcher`]: walks one flow with delays, in order;
//! - [`runtime`]: spawns dispatchers, fans out events, drains on shutdown;
//! - [`inflight`]: tracks started-but-unfinished flows;
//! - [`shutdown`]: cross-platform shutdown signal handling.

mod builder;
mod dispatcher;
mod handle;
mod inflight;
mod runner;
mod runtime;
mod shutdown;

pub use builder::FlowRuntimeBuilder;
pub use dispatcher::FlowDispatcher;
pub use handle::FlowHandle;
pub use runtime::FlowRuntime;
pub use shutdown::wait_for_shutdown_signal;
