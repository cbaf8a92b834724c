//! # Flow data model.
//!
//! This module provides the types the dispatcher walks:
//! - [`Message`] - one (subject, body, delay) unit
//! - [`Flow`] - a recipient plus an ordered, immutable sequence of messages
//! - [`FlowId`] - process-unique identifier assigned at construction
//! - [`MessageOutcome`] / [`FlowReport`] - per-message results of one walk

mod flow;
mod message;
mod report;

pub use flow::{Flow, FlowId};
pub use message::Message;
pub use report::{FlowReport, MessageOutcome};
