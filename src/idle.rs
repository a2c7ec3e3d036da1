//! Inactivity tracking for the sleep timeout.

use crate::config::IDLE_TIMEOUT_MS;
use crate::time::{TimeInstant, millis_since};

/// Remembers when the player last did something.
#[derive(Debug, Clone)]
pub struct IdleTracker<I: TimeInstant> {
    last_activity: I,
    timeout_ms: u64,
}

impl<I: TimeInstant> IdleTracker<I> {
    /// Creates a tracker with activity recorded at `now`.
    pub fn new(now: I) -> Self {
        Self::with_timeout(now, IDLE_TIMEOUT_MS)
    }

    /// Creates a tracker with a custom timeout.
    pub fn with_timeout(now: I, timeout_ms: u64) -> Self {
        Self {
            last_activity: now,
            timeout_ms,
        }
    }

    /// Records activity at `now`.
    pub fn record(&mut self, now: I) {
        self.last_activity = now;
    }

    /// Milliseconds since the last activity.
    pub fn since(&self, now: I) -> u64 {
        millis_since(now, self.last_activity)
    }

    /// Returns true once the timeout has elapsed and the device is still awake.
    pub fn should_sleep(&self, now: I, asleep: bool) -> bool {
        !asleep && self.since(now) >= self.timeout_ms
    }
}
