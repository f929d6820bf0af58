#![forbid(unsafe_code)]

//! Injectable clock abstraction.
//!
//! All timing in tuido (creation latency, settle waits) reads the current
//! time through [`Clock`] rather than the wall clock directly. The running
//! program injects [`SystemClock`]; the test harness injects a [`TestClock`]
//! it advances by hand, so no test ever sleeps.

use std::sync::Mutex;
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};

/// A source of the current time.
pub trait Clock: Send + Sync {
    /// The current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A manually advanced clock for deterministic tests.
///
/// Starts at a fixed epoch so captured timestamps are reproducible.
#[derive(Debug)]
pub struct TestClock {
    now: Mutex<DateTime<Utc>>,
}

impl Default for TestClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TestClock {
    /// Create a clock fixed at 2024-01-01T00:00:00Z.
    #[must_use]
    pub fn new() -> Self {
        let epoch = Utc
            .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .single()
            .expect("fixed epoch is valid");
        Self {
            now: Mutex::new(epoch),
        }
    }

    /// Create a clock starting at a specific instant.
    #[must_use]
    pub fn starting_at(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Advance the clock by a duration.
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().expect("clock lock poisoned");
        *now += chrono::TimeDelta::from_std(by).expect("duration fits");
    }
}

impl Clock for TestClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock lock poisoned")
    }
}
