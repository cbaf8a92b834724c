//! # mailflow
//!
//! **mailflow** delivers ordered, delayed message flows.
//!
//! A flow is a trigger label, a recipient, and an ordered list of messages,
//! each with its own delay. The runtime walks every flow in its own task:
//! wait out the delay, send, record the outcome, move on. A failed send is
//! reported and never stops the rest of the flow.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   POST /trigger-emails ──► FlowRequest::into_flow(limits) ──► Flow
//!                                                               │
//!                                                               ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  FlowRuntime                                                      │
//! │  - Bus (broadcast events)                                         │
//! │  - InFlightTracker (accepted, unfinished flows; guard per task)   │
//! │  - SubscriberSet (fans out to user subscribers)                   │
//! │  - TaskTracker (one task per flow, drained on shutdown)           │
//! └──────┬──────────────────┬──────────────────┬──────────────────────┘
//!        ▼                  ▼                  ▼
//!   ┌─────────────┐   ┌─────────────┐   ┌─────────────┐
//!   │FlowDispatch.│   │FlowDispatch.│   │FlowDispatch.│     shared
//!   │ (flow #1)   │   │ (flow #2)   │   │ (flow #3)   │ ──► Transport
//!   └┬────────────┘   └┬────────────┘   └┬────────────┘    (no locking)
//!    │ FlowStarted     │ MessageFailed   │ FlowCompleted
//!    ▼                 ▼                 ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │                        Bus (broadcast channel)                    │
//! └─────────────────────────────────┬─────────────────────────────────┘
//!                                   ▼
//!                      subscriber_listener ──► SubscriberSet ──► LogWriter, ...
//! ```
//!
//! ### Lifecycle of one flow
//! ```text
//! publish FlowStarted
//! for each message, in order {
//!   ├─► publish MessageScheduled{ index, delay }
//!   ├─► wait(delay)                 (zero delay still yields once)
//!   ├─► transport.send(recipient, subject, body)
//!   │       ├─ true  ──► publish MessageDelivered
//!   │       └─ false ──► tracing::error! + publish MessageFailed   (no retry, continue)
//!   └─► next
//! }
//! publish FlowCompleted{ delivered, failed }
//! ```
//!
//! ## Features
//! | Area              | Description                                              | Key types / traits                         |
//! |-------------------|----------------------------------------------------------|--------------------------------------------|
//! | **Flows**         | Immutable ordered messages with delays                   | [`Flow`], [`Message`], [`FlowReport`]      |
//! | **Dispatch**      | Sequential, delay-honoring, failure-isolating walk       | [`FlowDispatcher`], [`FlowRuntime`]        |
//! | **Transport**     | Pluggable single-message delivery                        | [`Transport`], [`TransportFn`]             |
//! | **Subscriber API**| Hook into flow lifecycle events                          | [`Subscribe`], [`Event`]                   |
//! | **Admission**     | Bounds on delay and messages per flow                    | [`FlowLimits`]                             |
//! | **HTTP**          | Trigger endpoint with immediate acknowledgment           | [`api::router`]                            |
//! | **Errors**        | Typed errors for requests, runtime and config            | [`FlowError`], [`RuntimeError`]            |
//!
//! ## Optional features
//! - `logging` (default): exports the built-in [`LogWriter`] subscriber for
//!   lifecycle records. Delivery failures are logged either way.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use mailflow::{Config, Envelope, Flow, FlowRuntime, Message, TransportFn};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let runtime = FlowRuntime::builder(Config::default())
//!         .with_transport(TransportFn::arc("stdout", |env: Envelope| async move {
//!             println!("to={} subject={}", env.recipient, env.subject);
//!             true
//!         }))
//!         .build();
//!
//!     let flow = Flow::new(
//!         "socksPurchased",
//!         "test@example.com",
//!         vec![
//!             Message::immediate("Payment received", "Thank you!"),
//!             Message::new("Socks dispatched!", "Get ready!", Duration::from_millis(10)),
//!         ],
//!     );
//!
//!     let report = runtime.submit(flow)?.join().await?;
//!     assert_eq!(report.delivered(), 2);
//!
//!     runtime.shutdown().await?;
//!     Ok(())
//! }
//! ```
pub mod api;
mod config;
mod core;
mod error;
mod events;
mod flow;
pub mod observability;
mod policies;
mod subscribers;
mod transport;

// ---- Public re-exports ----

pub use config::Config;
pub use core::{
    wait_for_shutdown_signal, FlowDispatcher, FlowHandle, FlowRuntime, FlowRuntimeBuilder,
};
pub use error::{ConfigError, FlowError, RuntimeError};
pub use events::{Bus, Event, EventKind};
pub use flow::{Flow, FlowId, FlowReport, Message, MessageOutcome};
pub use policies::FlowLimits;
pub use subscribers::{Subscribe, SubscriberSet};
pub use transport::{Envelope, SimulatedTransport, Transport, TransportFn, TransportRef};

// Built-in logger subscriber.
// Disable with: `--no-default-features`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
