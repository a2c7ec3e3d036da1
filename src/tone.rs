//! Non-blocking single tone playback.

use crate::hal::Buzzer;
use crate::time::{Deadline, TimeInstant};

/// Plays one tone at a time for a fixed duration.
///
/// Starting a tone while another is playing replaces it. A frequency of `0`
/// is a rest: the buzzer stays silent for the duration.
#[derive(Debug, Clone)]
pub struct TonePlayer<I: TimeInstant> {
    active_frequency: Option<u32>,
    ends: Deadline<I>,
}

impl<I: TimeInstant> TonePlayer<I> {
    /// Creates a silent player.
    pub fn new() -> Self {
        Self {
            active_frequency: None,
            ends: Deadline::disarmed(),
        }
    }

    /// Starts a tone lasting `duration_ms`.
    pub fn start<B: Buzzer>(&mut self, frequency_hz: u32, duration_ms: u64, now: I, buzzer: &mut B) {
        if frequency_hz == 0 {
            buzzer.stop();
            self.active_frequency = None;
        } else {
            buzzer.start(frequency_hz);
            self.active_frequency = Some(frequency_hz);
        }
        self.ends.arm(now, duration_ms);
    }

    /// Stops the tone once its duration has elapsed.
    ///
    /// Returns true on the tick the tone (or rest) ends.
    pub fn tick<B: Buzzer>(&mut self, now: I, buzzer: &mut B) -> bool {
        if !self.ends.fire(now) {
            return false;
        }

        if self.active_frequency.take().is_some() {
            buzzer.stop();
        }
        true
    }

    /// Silences the buzzer immediately.
    pub fn stop<B: Buzzer>(&mut self, buzzer: &mut B) {
        if self.active_frequency.take().is_some() {
            buzzer.stop();
        }
        self.ends.disarm();
    }

    /// Returns true while a tone or rest is in progress.
    pub fn is_playing(&self) -> bool {
        self.ends.is_armed()
    }

    /// The frequency currently sounding, if any.
    pub fn active_frequency(&self) -> Option<u32> {
        self.active_frequency
    }
}

impl<I: TimeInstant> Default for TonePlayer<I> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::tests::At;

    #[derive(Default)]
    struct RecordingBuzzer {
        frequency: Option<u32>,
        stops: u32,
    }

    impl Buzzer for RecordingBuzzer {
        fn start(&mut self, frequency_hz: u32) {
            self.frequency = Some(frequency_hz);
        }

        fn stop(&mut self) {
            self.frequency = None;
            self.stops += 1;
        }
    }

    #[test]
    fn tone_stops_when_duration_elapses() {
        let mut buzzer = RecordingBuzzer::default();
        let mut tone = TonePlayer::new();

        tone.start(440, 100, At(0), &mut buzzer);
        assert_eq!(buzzer.frequency, Some(440));
        assert!(!tone.tick(At(99), &mut buzzer));
        assert_eq!(buzzer.frequency, Some(440));
        assert!(tone.tick(At(100), &mut buzzer));
        assert_eq!(buzzer.frequency, None);
        assert!(!tone.is_playing());
        assert!(!tone.tick(At(200), &mut buzzer));
        assert_eq!(buzzer.stops, 1);
    }

    #[test]
    fn new_tone_overwrites_active_one() {
        let mut buzzer = RecordingBuzzer::default();
        let mut tone = TonePlayer::new();

        tone.start(440, 100, At(0), &mut buzzer);
        tone.start(880, 100, At(50), &mut buzzer);
        assert_eq!(buzzer.frequency, Some(880));
        assert!(!tone.tick(At(100), &mut buzzer));
        assert!(tone.tick(At(150), &mut buzzer));
        assert_eq!(buzzer.frequency, None);
    }

    #[test]
    fn rest_is_silent_but_timed() {
        let mut buzzer = RecordingBuzzer::default();
        let mut tone = TonePlayer::new();

        tone.start(0, 50, At(0), &mut buzzer);
        assert_eq!(buzzer.frequency, None);
        assert!(tone.is_playing());
        assert!(tone.tick(At(50), &mut buzzer));
    }

    #[test]
    fn stop_silences_immediately() {
        let mut buzzer = RecordingBuzzer::default();
        let mut tone = TonePlayer::new();

        tone.start(440, 1_000, At(0), &mut buzzer);
        tone.stop(&mut buzzer);
        assert_eq!(buzzer.frequency, None);
        assert!(!tone.is_playing());
        assert_eq!(tone.active_frequency(), None);
    }
}
