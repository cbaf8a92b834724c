//! # Dispatch a single message.
//!
//! Invokes the [`Transport`] for one message of a flow and publishes the
//! per-message outcome to the [`Bus`].
//!
//! ## Outcomes
//!
//! ```text
//! Delivered:
//!   transport.send() → true  → publish MessageDelivered
//!
//! Failed:
//!   transport.send() → false → tracing::error!("error sending email") → publish MessageFailed
//!
//! Panicked:
//!   transport.send() → panic → caught → same as Failed, reason carries the panic message
//! ```
//!
//! ## Rules
//! - Every failure is logged here, synchronously; the bus event is extra telemetry
//!   that a lagging receiver may skip
//! - Always publishes **exactly one** outcome event per call
//! - Never retries; the returned outcome is final for this message
//! - A panicking transport is contained here and never unwinds into the dispatcher

use std::panic::AssertUnwindSafe;

use futures::FutureExt;

use crate::{
    events::{Bus, Event, EventKind},
    flow::{Flow, Message, MessageOutcome},
    subscribers::panic_message,
    transport::Transport,
};

/// Sends `message` (the `index`-th of `flow`) through `transport`, logs a failure
/// and publishes the outcome to `bus`.
pub async fn dispatch_once<T: Transport + ?Sized>(
    transport: &T,
    flow: &Flow,
    index: usize,
    message: &Message,
    bus: &Bus,
) -> MessageOutcome {
    let send = transport.send(flow.recipient(), message.subject(), message.body());
    let result = AssertUnwindSafe(send).catch_unwind().await;

    let outcome = MessageOutcome::from_delivered(matches!(result, Ok(true)));
    let reason = match result {
        Ok(true) => None,
        Ok(false) => Some(format!("{} reported failure", transport.name())),
        Err(panic) => Some(format!(
            "{} panicked: {}",
            transport.name(),
            panic_message(&*panic)
        )),
    };

    let mut ev = Event::new(if outcome.is_delivered() {
        EventKind::MessageDelivered
    } else {
        EventKind::MessageFailed
    })
    .with_flow(flow.id().to_string())
    .with_trigger(flow.trigger())
    .with_index(index)
    .with_subject(message.subject());

    if let Some(reason) = reason {
        tracing::error!(
            flow = %flow.id(),
            trigger = flow.trigger(),
            recipient = flow.recipient(),
            index,
            subject = message.subject(),
            reason = %reason,
            "error sending email"
        );
        ev = ev.with_reason(reason);
    }
    bus.publish(ev);
    outcome
}
