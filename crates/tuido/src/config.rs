#![forbid(unsafe_code)]

//! Application configuration.
//!
//! Delay magnitudes are tunable, not load-bearing: the defaults mirror the
//! interactive feel (half-second creation latency), while tests inject a
//! manual clock and never wait on them in real time.

use std::env;
use std::time::Duration;

/// Tunable knobs, overridable via `TUIDO_*` environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppConfig {
    /// Simulated latency between a submit and the task appearing.
    pub create_latency: Duration,
    /// Runtime tick interval (drives pending-creation checks).
    pub tick_interval: Duration,
    /// How far a harness settle advances the test clock.
    pub settle: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            create_latency: Duration::from_millis(500),
            tick_interval: Duration::from_millis(100),
            settle: Duration::from_millis(600),
        }
    }
}

impl AppConfig {
    /// Defaults with `TUIDO_CREATE_LATENCY_MS`, `TUIDO_TICK_MS`, and
    /// `TUIDO_SETTLE_MS` applied when set and parseable.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(ms) = read_ms("TUIDO_CREATE_LATENCY_MS") {
            config.create_latency = ms;
        }
        if let Some(ms) = read_ms("TUIDO_TICK_MS") {
            config.tick_interval = ms;
        }
        if let Some(ms) = read_ms("TUIDO_SETTLE_MS") {
            config.settle = ms;
        }
        config
    }

    /// Set the creation latency (builder).
    #[must_use]
    pub fn with_create_latency(mut self, latency: Duration) -> Self {
        self.create_latency = latency;
        self
    }

    /// Set the settle advance (builder).
    #[must_use]
    pub fn with_settle(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }
}

fn read_ms(var: &str) -> Option<Duration> {
    env::var(var)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .map(Duration::from_millis)
}
