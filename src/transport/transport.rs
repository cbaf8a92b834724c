//! # Transport capability.
//!
//! A [`Transport`] attempts to deliver one message and reports `true`
//! (delivered) or `false` (failed). It is shared by every running flow
//! through [`TransportRef`] and is called without any locking, so
//! implementations must be safe to invoke concurrently.

use std::sync::Arc;

use async_trait::async_trait;

/// Shared handle to a transport.
pub type TransportRef = Arc<dyn Transport>;

/// # Asynchronous single-message delivery.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use mailflow::Transport;
///
/// struct Blackhole;
///
/// #[async_trait]
/// impl Transport for Blackhole {
///     fn name(&self) -> &str { "blackhole" }
///
///     async fn send(&self, _recipient: &str, _subject: &str, _body: &str) -> bool {
///         true
///     }
/// }
/// ```
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Returns a stable, human-readable transport name.
    fn name(&self) -> &str;

    /// Attempts one delivery.
    ///
    /// Both outcomes are normal results; implementations should not panic on
    /// delivery failure. A panic is still contained by the dispatcher and
    /// counted as a failure.
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> bool;
}
