//! Time abstraction traits for platform-agnostic timing, plus the
//! [`Deadline`] timer shared by every timed component.

/// Trait for abstracting time sources.
pub trait TimeSource<I: TimeInstant> {
    /// Returns the current time instant.
    fn now(&self) -> I;
}

/// Trait abstraction for duration types.
pub trait TimeDuration: Copy {
    /// Converts duration to milliseconds.
    fn as_millis(&self) -> u64;
}

/// Trait abstraction for instant types.
///
/// Only elapsed time is ever asked for, so a clock that wraps only needs a
/// `duration_since` that wraps with it.
pub trait TimeInstant: Copy {
    /// Duration type for this instant.
    type Duration: TimeDuration;

    /// Calculates duration since an earlier instant.
    fn duration_since(&self, earlier: Self) -> Self::Duration;
}

/// Milliseconds elapsed between `earlier` and `now`.
#[inline]
pub(crate) fn millis_since<I: TimeInstant>(now: I, earlier: I) -> u64 {
    now.duration_since(earlier).as_millis()
}

/// A one-shot timer: either disarmed, or armed with a start instant and a length.
///
/// Expiry is computed from the elapsed time since `start` rather than from an
/// absolute end instant, so clocks that wrap are handled the same way
/// [`TimeInstant::duration_since`] handles them.
#[derive(Debug, Clone, Copy)]
pub struct Deadline<I: TimeInstant> {
    armed: Option<(I, u64)>,
}

impl<I: TimeInstant> Deadline<I> {
    /// Creates a disarmed deadline.
    pub const fn disarmed() -> Self {
        Self { armed: None }
    }

    /// Creates a deadline armed at `now` for `millis`.
    pub fn after(now: I, millis: u64) -> Self {
        Self {
            armed: Some((now, millis)),
        }
    }

    /// Arms (or re-arms) the deadline. Any previous arming is superseded.
    pub fn arm(&mut self, now: I, millis: u64) {
        self.armed = Some((now, millis));
    }

    /// Disarms the deadline.
    pub fn disarm(&mut self) {
        self.armed = None;
    }

    /// Returns true if the deadline is armed.
    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Returns true if the deadline is armed and its length has elapsed.
    pub fn expired(&self, now: I) -> bool {
        match self.armed {
            Some((start, length)) => millis_since(now, start) >= length,
            None => false,
        }
    }

    /// Returns true exactly once when the deadline expires, disarming it.
    pub fn fire(&mut self, now: I) -> bool {
        if self.expired(now) {
            self.armed = None;
            true
        } else {
            false
        }
    }

    /// Milliseconds left before expiry, `None` when disarmed.
    pub fn remaining(&self, now: I) -> Option<u64> {
        self.armed
            .map(|(start, length)| length.saturating_sub(millis_since(now, start)))
    }

    /// The instant the deadline was armed at.
    pub fn started_at(&self) -> Option<I> {
        self.armed.map(|(start, _)| start)
    }
}

impl<I: TimeInstant> Default for Deadline<I> {
    fn default() -> Self {
        Self::disarmed()
    }
}
