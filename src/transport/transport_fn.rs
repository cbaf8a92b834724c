//! # Function-backed transport (`TransportFn`)
//!
//! [`TransportFn`] wraps a closure `F: Fn(Envelope) -> Fut`, producing a fresh
//! future per send. The closure receives owned copies of the message fields,
//! so the future does not borrow from the dispatcher.
//!
//! ## Concurrency semantics
//! - Each [`Transport::send`] call creates a **new** future.
//! - No hidden mutation between calls; shared state (counters, recorders) goes
//!   into an explicit `Arc<...>` captured by the closure.
//!
//! ## Example
//! ```rust
//! use mailflow::{Envelope, TransportFn, TransportRef};
//!
//! let t: TransportRef = TransportFn::arc("always-ok", |_env: Envelope| async move { true });
//! assert_eq!(t.name(), "always-ok");
//! ```

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use super::Transport;

/// Owned copy of one message handed to a [`TransportFn`] closure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

/// Function-backed transport implementation.
#[derive(Debug)]
pub struct TransportFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> TransportFn<F> {
    /// Creates a new function-backed transport.
    ///
    /// Prefer [`TransportFn::arc`] when you immediately need a [`TransportRef`](crate::TransportRef).
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }

    /// Creates the transport and returns it as a shared handle.
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

#[async_trait]
impl<F, Fut> Transport for TransportFn<F>
where
    F: Fn(Envelope) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = bool> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn send(&self, recipient: &str, subject: &str, body: &str) -> bool {
        let fut = (self.f)(Envelope {
            recipient: recipient.to_owned(),
            subject: subject.to_owned(),
            body: body.to_owned(),
        });
        fut.await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[tokio::test]
    async fn closure_receives_owned_fields() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let t = TransportFn::new("recorder", move |env: Envelope| {
            let sink = Arc::clone(&sink);
            async move {
                sink.lock().unwrap().push(env);
                false
            }
        });

        assert!(!t.send("a@b.com", "S1", "B1").await);
        let seen = seen.lock().unwrap();
        assert_eq!(
            seen.as_slice(),
            &[Envelope {
                recipient: "a@b.com".into(),
                subject: "S1".into(),
                body: "B1".into(),
            }]
        );
    }
}
