//! Timing parameters, thresholds and the runtime [`Config`].
//!
//! All constants live here so they can be tuned in one place. [`Config`]
//! carries the same values at runtime and defaults to them.

use crate::level::LevelTable;
use crate::melody::Melody;

// Potentiometer

/// Largest change between readings still treated as noise.
pub const POT_NOISE_THRESHOLD: u16 = 3;

/// Quiet period before a reading is declared stable (ms).
pub const POT_STABLE_MS: u64 = 500;

/// Highest value the analog input returns.
pub const POT_MAX: u16 = 1023;

/// Round targets are drawn from `TARGET_MIN..=TARGET_MAX`, away from the
/// physical ends of the pot travel.
pub const TARGET_MIN: u16 = 50;
pub const TARGET_MAX: u16 = 973;

// Button

/// A pin level must hold longer than this to be confirmed (ms).
pub const BUTTON_DEBOUNCE_MS: u64 = 20;

/// Minimum hold for a long-press (ms).
pub const LONG_PRESS_MS: u64 = 800;

/// Silence after the last click that closes the click window (ms).
pub const CLICK_WINDOW_MS: u64 = 700;

/// Click counts are clamped to this many levels.
pub const MAX_LEVEL: u8 = 5;

/// Quiet time required before a long-press on the welcome screen resets
/// progression (ms).
pub const RESET_GUARD_MS: u64 = 6_000;

// Game flow

/// Length of the win animation (ms).
pub const WIN_WINDOW_MS: u64 = 5_000;

/// How long a loss message stays up before returning to the welcome screen (ms).
pub const NOTICE_MS: u64 = 2_000;

/// Inactivity before the device goes to sleep (ms).
pub const IDLE_TIMEOUT_MS: u64 = 36_000;

// Sound and light

/// Win animation LED blink half-period (ms).
pub const BLINK_INTERVAL_MS: u64 = 120;

/// Tone played on a loss.
pub const LOSE_TONE_HZ: u32 = 147;
pub const LOSE_TONE_MS: u64 = 700;

/// Short confirmation blip for clicks and level entry.
pub const CLICK_TONE_HZ: u32 = 1_047;
pub const CLICK_TONE_MS: u64 = 40;

/// Runtime configuration of a [`Device`](crate::Device).
#[derive(Debug, Clone)]
pub struct Config {
    pub pot_noise_threshold: u16,
    pub pot_stable_ms: u64,
    pub button_debounce_ms: u64,
    pub long_press_ms: u64,
    pub click_window_ms: u64,
    pub reset_guard_ms: u64,
    pub win_window_ms: u64,
    pub notice_ms: u64,
    pub idle_timeout_ms: u64,
    pub blink_interval_ms: u64,
    pub levels: LevelTable,
    pub melody: Melody,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pot_noise_threshold: POT_NOISE_THRESHOLD,
            pot_stable_ms: POT_STABLE_MS,
            button_debounce_ms: BUTTON_DEBOUNCE_MS,
            long_press_ms: LONG_PRESS_MS,
            click_window_ms: CLICK_WINDOW_MS,
            reset_guard_ms: RESET_GUARD_MS,
            win_window_ms: WIN_WINDOW_MS,
            notice_ms: NOTICE_MS,
            idle_timeout_ms: IDLE_TIMEOUT_MS,
            blink_interval_ms: BLINK_INTERVAL_MS,
            levels: LevelTable::default(),
            melody: Melody::fanfare(),
        }
    }
}
