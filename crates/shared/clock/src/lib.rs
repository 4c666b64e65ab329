//! Tickerhub Clock
//!
//! Wall-clock port used to stamp snapshot generation times and health
//! responses. Cache freshness does not use this clock; it runs on the
//! runtime's monotonic instant.
//!
//! - [`SystemClock`]: real UTC time for production
//! - [`FixedClock`]: settable time for deterministic tests

mod fixed;

pub use fixed::FixedClock;

use chrono::Utc;
use tickerhub_core::Timestamp;

/// Port for time abstraction
pub trait Clock: Send + Sync {
    /// Get the current time according to this clock
    fn now(&self) -> Timestamp;

    /// Get the clock's name/identifier for debugging
    fn name(&self) -> &str {
        "Clock"
    }
}

/// Wall clock in UTC
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now()
    }

    fn name(&self) -> &str {
        "SystemClock"
    }
}
