//! Admission policies.
//!
//! ## Contents
//! - [`FlowLimits`] bounds on per-message delay and messages per flow
//!
//! ## Quick wiring
//! ```text
//! Config { limits: FlowLimits, .. }
//!      └─► api::FlowRequest::into_flow(&limits) rejects oversize requests
//!          before a Flow ever reaches the runtime
//! ```

mod limits;

pub use limits::FlowLimits;
