//! # Handle to a flow's background task.
//!
//! [`FlowRuntime::submit`](crate::FlowRuntime::submit) spawns the dispatcher and
//! returns a [`FlowHandle`]. Dropping the handle detaches the task; the flow
//! keeps running to completion either way. Awaiting [`FlowHandle::join`] is
//! optional and meant for tests and embedding code.

use tokio::task::{JoinError, JoinHandle};

use crate::flow::{FlowId, FlowReport};

/// Explicit handle to one running flow.
#[derive(Debug)]
pub struct FlowHandle {
    id: FlowId,
    join: JoinHandle<FlowReport>,
}

impl FlowHandle {
    pub(crate) fn new(id: FlowId, join: JoinHandle<FlowReport>) -> Self {
        Self { id, join }
    }

    /// Identifier of the submitted flow.
    pub fn id(&self) -> FlowId {
        self.id
    }

    /// True once every message has been attempted.
    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Waits for the flow to finish and returns its per-message outcomes.
    ///
    /// Returns `Err` only if the dispatcher task itself panicked or the
    /// tokio runtime is shutting down.
    pub async fn join(self) -> Result<FlowReport, JoinError> {
        self.join.await
    }
}
