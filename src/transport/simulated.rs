//! # Simulated transport.
//!
//! [`SimulatedTransport`] stands in for a real mail provider: every send takes a
//! fixed latency and then succeeds with probability `success_rate`.
//!
//! Defaults: `latency = 1s`, `success_rate = 0.95` (about one send in twenty fails).

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;

use super::Transport;

/// Transport with fixed latency and random failures.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedTransport {
    latency: Duration,
    success_rate: f64,
}

impl SimulatedTransport {
    /// Creates a simulated transport.
    ///
    /// `success_rate` is clamped to `[0.0, 1.0]`; NaN is treated as `0.0`.
    pub fn new(latency: Duration, success_rate: f64) -> Self {
        let success_rate = if success_rate.is_nan() {
            0.0
        } else {
            success_rate.clamp(0.0, 1.0)
        };
        Self {
            latency,
            success_rate,
        }
    }

    /// Configured latency.
    pub fn latency(&self) -> Duration {
        self.latency
    }

    /// Configured success probability.
    pub fn success_rate(&self) -> f64 {
        self.success_rate
    }

    fn roll(&self) -> bool {
        rand::thread_rng().gen::<f64>() < self.success_rate
    }
}

impl Default for SimulatedTransport {
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 0.95)
    }
}

#[async_trait]
impl Transport for SimulatedTransport {
    fn name(&self) -> &str {
        "simulated"
    }

    async fn send(&self, _recipient: &str, _subject: &str, _body: &str) -> bool {
        // Draw before the await: `ThreadRng` is not `Send`.
        let delivered = self.roll();
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_rate_is_clamped() {
        assert_eq!(SimulatedTransport::new(Duration::ZERO, 1.7).success_rate(), 1.0);
        assert_eq!(SimulatedTransport::new(Duration::ZERO, -0.2).success_rate(), 0.0);
        assert_eq!(SimulatedTransport::new(Duration::ZERO, f64::NAN).success_rate(), 0.0);
    }

    #[tokio::test]
    async fn extreme_rates_are_deterministic() {
        let always = SimulatedTransport::new(Duration::ZERO, 1.0);
        let never = SimulatedTransport::new(Duration::ZERO, 0.0);
        for _ in 0..50 {
            assert!(always.send("a@b.com", "s", "b").await);
            assert!(!never.send("a@b.com", "s", "b").await);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn send_takes_the_configured_latency() {
        let t = SimulatedTransport::new(Duration::from_secs(1), 1.0);
        let started = tokio::time::Instant::now();
        assert!(t.send("a@b.com", "s", "b").await);
        assert!(started.elapsed() >= Duration::from_secs(1));
    }
}
