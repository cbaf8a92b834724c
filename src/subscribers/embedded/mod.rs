//! # Built-in subscribers
//!
//! - [`LogWriter`]: turns runtime events into `tracing` records.

#[cfg(feature = "logging")]
mod log;

#[cfg(feature = "logging")]
pub use log::LogWriter;
