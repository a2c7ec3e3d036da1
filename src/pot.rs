//! Potentiometer noise filter.
//!
//! A reading is reported once it has stayed within the noise threshold for
//! the quiet period. Each stabilization episode is reported exactly once.

use crate::config::{POT_NOISE_THRESHOLD, POT_STABLE_MS};
use crate::time::{TimeInstant, millis_since};

/// Filters raw analog readings into edge-triggered stable values.
#[derive(Debug, Clone)]
pub struct PotDebouncer<I: TimeInstant> {
    last_raw: Option<u16>,
    changed_at: Option<I>,
    reported: bool,
    noise_threshold: u16,
    stable_ms: u64,
}

impl<I: TimeInstant> PotDebouncer<I> {
    /// Creates a debouncer with the default threshold and quiet period.
    pub fn new() -> Self {
        Self::with_timing(POT_NOISE_THRESHOLD, POT_STABLE_MS)
    }

    /// Creates a debouncer with a custom noise threshold and quiet period.
    pub fn with_timing(noise_threshold: u16, stable_ms: u64) -> Self {
        Self {
            last_raw: None,
            changed_at: None,
            reported: false,
            noise_threshold,
            stable_ms,
        }
    }

    /// Feeds one raw reading.
    ///
    /// Returns `Some(value)` on the first call where the reading has been quiet
    /// for the full period, and `None` otherwise.
    pub fn update(&mut self, raw: u16, now: I) -> Option<u16> {
        let moved = match self.last_raw {
            Some(last) => raw.abs_diff(last) > self.noise_threshold,
            None => true,
        };

        if moved {
            self.last_raw = Some(raw);
            self.changed_at = Some(now);
            self.reported = false;
            return None;
        }

        if self.reported {
            return None;
        }

        let changed_at = self.changed_at?;
        if millis_since(now, changed_at) >= self.stable_ms {
            self.reported = true;
            return self.last_raw;
        }

        None
    }

    /// Treats the current position as already reported.
    ///
    /// The next value is reported only after the pot moves past the noise
    /// threshold and settles again.
    pub fn reset(&mut self) {
        self.reported = true;
    }

    /// The reading the current episode is anchored on.
    pub fn last_raw(&self) -> Option<u16> {
        self.last_raw
    }

    /// Returns true while a movement is waiting to settle.
    pub fn is_settling(&self) -> bool {
        self.last_raw.is_some() && !self.reported
    }
}

impl<I: TimeInstant> Default for PotDebouncer<I> {
    fn default() -> Self {
        Self::new()
    }
}
