//! Closeness scoring: readings are classified into one of six bands, each
//! with a fixed LED pattern and feedback tone.

use crate::hal::Led;

/// Multiples of the win window bounding bands 5 down to 1. Anything further
/// away is band 0.
const BAND_MULTIPLIERS: [u32; 5] = [1, 2, 4, 8, 15];

/// Feedback tone per non-winning band: (frequency Hz, duration ms).
/// Lower bands sound lower and longer.
const BAND_TONES: [(u32, u64); 5] = [(196, 500), (262, 400), (330, 300), (523, 200), (784, 150)];

/// Closeness of a reading to the round target, from 0 (far) to 5 (win).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Band(u8);

impl Band {
    /// The winning band.
    pub const WIN: Band = Band(5);

    /// Classifies a reading against the target.
    ///
    /// Thresholds are checked in increasing order and the first match wins,
    /// so a difference of exactly `k * win_window` falls in the closer band.
    pub fn classify(reading: u16, target: u16, win_window: u16) -> Self {
        let diff = u32::from(reading.abs_diff(target));
        let window = u32::from(win_window);

        BAND_MULTIPLIERS
            .iter()
            .position(|&multiplier| diff <= window * multiplier)
            .map(|idx| Band(5 - idx as u8))
            .unwrap_or(Band(0))
    }

    /// Creates a band from its number, clamped into `0..=5`.
    pub fn new(value: u8) -> Self {
        Band(value.min(5))
    }

    /// The band number.
    pub fn value(self) -> u8 {
        self.0
    }

    /// Returns true for the winning band.
    pub fn is_win(self) -> bool {
        self == Band::WIN
    }

    /// LEDs lit for this band: a growing prefix of the reds for bands 0-2,
    /// a growing prefix of the greens for bands 3-5.
    pub fn lit_leds(self) -> &'static [Led] {
        match self.0 {
            0..=2 => &Led::REDS[..usize::from(self.0) + 1],
            n => &Led::GREENS[..usize::from(n) - 2],
        }
    }

    /// Feedback tone for this band, `None` for the win (the melody plays instead).
    pub fn tone(self) -> Option<(u32, u64)> {
        BAND_TONES.get(usize::from(self.0)).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TARGET: u16 = 500;
    const WINDOW: u16 = 10;

    fn band_at(diff: u16) -> u8 {
        Band::classify(TARGET + diff, TARGET, WINDOW).value()
    }

    #[test]
    fn boundaries_fall_in_the_closer_band() {
        assert_eq!(band_at(0), 5);
        assert_eq!(band_at(10), 5);
        assert_eq!(band_at(11), 4);
        assert_eq!(band_at(20), 4);
        assert_eq!(band_at(21), 3);
        assert_eq!(band_at(40), 3);
        assert_eq!(band_at(41), 2);
        assert_eq!(band_at(80), 2);
        assert_eq!(band_at(81), 1);
        assert_eq!(band_at(150), 1);
        assert_eq!(band_at(151), 0);
    }

    #[test]
    fn classification_is_symmetric_around_target() {
        for diff in [0u16, 10, 11, 40, 41, 150, 151, 400] {
            assert_eq!(
                Band::classify(TARGET - diff, TARGET, WINDOW),
                Band::classify(TARGET + diff, TARGET, WINDOW)
            );
        }
    }

    #[test]
    fn led_patterns_grow_with_band() {
        assert_eq!(Band::new(0).lit_leds(), &[Led::Red1]);
        assert_eq!(Band::new(1).lit_leds(), &[Led::Red1, Led::Red2]);
        assert_eq!(Band::new(2).lit_leds(), &Led::REDS);
        assert_eq!(Band::new(3).lit_leds(), &[Led::Green1]);
        assert_eq!(Band::new(4).lit_leds(), &[Led::Green1, Led::Green2]);
        assert_eq!(Band::WIN.lit_leds(), &Led::GREENS);
    }

    #[test]
    fn tones_rise_and_shorten_toward_the_target() {
        let tones: [(u32, u64); 5] = core::array::from_fn(|b| Band::new(b as u8).tone().unwrap());
        for pair in tones.windows(2) {
            assert!(pair[0].0 < pair[1].0);
            assert!(pair[0].1 > pair[1].1);
        }
        assert_eq!(Band::WIN.tone(), None);
    }
}
