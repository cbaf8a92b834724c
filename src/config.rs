//! # Global runtime configuration.
//!
//! Provides [`Config`] centralized settings for the flow runtime, the HTTP
//! front end and the simulated transport used by the binary.
//!
//! Config is used in three ways:
//! 1. **Runtime creation**: `FlowRuntime::builder(config)`
//! 2. **Admission**: `config.limits` is checked by the HTTP handler
//! 3. **Binary wiring**: port, log format, simulated transport knobs
//!
//! ## Environment
//! [`Config::from_env`] reads `MAILFLOW_*` variables; unset variables keep their
//! defaults, malformed ones are rejected with [`ConfigError`].
//!
//! ## Sentinel values
//! - `limits.max_delay = 0s` → unlimited
//! - `limits.max_messages = 0` → unlimited

use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;
use crate::observability::LogFormat;
use crate::policies::FlowLimits;

/// Global configuration.
///
/// ## Field semantics
/// - `http_port`: Port the binary binds on `0.0.0.0`
/// - `grace`: Maximum wait for in-flight flows on shutdown (`0s` = no wait)
/// - `bus_capacity`: Event bus ring buffer size (min 1; clamped by Bus)
/// - `limits`: Admission bounds for incoming flows
/// - `transport_latency` / `transport_success_rate`: simulated transport knobs
/// - `log_format`: pretty (development) or JSON (production) logs
#[derive(Clone, Debug)]
pub struct Config {
    /// Port for the HTTP listener.
    pub http_port: u16,

    /// Maximum time to wait for in-flight flows after shutdown is requested.
    ///
    /// Flows are never cancelled; when the grace runs out the runtime reports
    /// the stuck flows with `RuntimeError::GraceExceeded`.
    pub grace: Duration,

    /// Capacity of the event bus broadcast channel ring buffer.
    pub bus_capacity: usize,

    /// Admission bounds applied before a flow is accepted.
    pub limits: FlowLimits,

    /// Fixed latency of each simulated send.
    pub transport_latency: Duration,

    /// Probability that a simulated send succeeds.
    pub transport_success_rate: f64,

    /// Log output format.
    pub log_format: LogFormat,
}

impl Config {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &'static str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(port) = parse::<u16>(&get, "MAILFLOW_HTTP_PORT")? {
            config.http_port = port;
        }
        if let Some(secs) = parse::<u64>(&get, "MAILFLOW_GRACE_SECS")? {
            config.grace = Duration::from_secs(secs);
        }
        if let Some(cap) = parse::<usize>(&get, "MAILFLOW_BUS_CAPACITY")? {
            config.bus_capacity = cap;
        }
        if let Some(secs) = parse::<u64>(&get, "MAILFLOW_MAX_DELAY_SECS")? {
            config.limits.max_delay = Duration::from_secs(secs);
        }
        if let Some(max) = parse::<usize>(&get, "MAILFLOW_MAX_MESSAGES")? {
            config.limits.max_messages = max;
        }
        if let Some(ms) = parse::<u64>(&get, "MAILFLOW_TRANSPORT_LATENCY_MS")? {
            config.transport_latency = Duration::from_millis(ms);
        }
        if let Some(rate) = parse::<f64>(&get, "MAILFLOW_TRANSPORT_SUCCESS_RATE")? {
            if !(0.0..=1.0).contains(&rate) {
                return Err(ConfigError::InvalidValue {
                    key: "MAILFLOW_TRANSPORT_SUCCESS_RATE",
                    value: rate.to_string(),
                    reason: "expected a probability in [0, 1]".to_string(),
                });
            }
            config.transport_success_rate = rate;
        }
        if let Some(format) = parse::<LogFormat>(&get, "MAILFLOW_LOG_FORMAT")? {
            config.log_format = format;
        }

        Ok(config)
    }

    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

fn parse<T>(
    get: &impl Fn(&'static str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some(raw) = get(key) else {
        return Ok(None);
    };
    raw.trim()
        .parse::<T>()
        .map(Some)
        .map_err(|e| ConfigError::InvalidValue {
            key,
            value: raw.clone(),
            reason: e.to_string(),
        })
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `http_port = 3000`
    /// - `grace = 60s`
    /// - `bus_capacity = 1024`
    /// - `limits = FlowLimits::default()` (7 days, 100 messages)
    /// - `transport_latency = 1s`, `transport_success_rate = 0.95`
    /// - `log_format = Pretty`
    fn default() -> Self {
        Self {
            http_port: 3000,
            grace: Duration::from_secs(60),
            bus_capacity: 1024,
            limits: FlowLimits::default(),
            transport_latency: Duration::from_secs(1),
            transport_success_rate: 0.95,
            log_format: LogFormat::default(),
        }
    }
}
