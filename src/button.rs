//! Button debouncing and gesture classification.
//!
//! Raw pin levels are debounced into confirmed press/release edges, which are
//! then classified into click bursts and long-presses. Click bursts resolve
//! on a timer, so [`ButtonGestures::update`] must be called every tick even
//! when the pin is idle.

use crate::config::{BUTTON_DEBOUNCE_MS, CLICK_WINDOW_MS, LONG_PRESS_MS, MAX_LEVEL};
use crate::game::ScreenKind;
use crate::time::{TimeInstant, millis_since};

/// Gesture events produced by the button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    /// Pressed while the device was asleep. Not treated as a gesture.
    WakeRequested,

    /// A click was added to the open burst; carries the running count.
    ClickFeedback(u8),

    /// A click burst closed; carries the count clamped to a level number.
    LevelChosen(u8),

    /// Released after being held for at least the long-press threshold.
    LongPress,

    /// Pressed on a screen where clicks carry no meaning.
    Pressed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Press,
    Release,
}

/// Debouncer and gesture classifier for the single active-low button.
#[derive(Debug, Clone)]
pub struct ButtonGestures<I: TimeInstant> {
    raw_low: bool,
    raw_since: Option<I>,
    pressed: bool,
    pressed_at: Option<I>,
    click_count: u8,
    window_opened_at: Option<I>,
    debounce_ms: u64,
    long_press_ms: u64,
    click_window_ms: u64,
}

impl<I: TimeInstant> ButtonGestures<I> {
    /// Creates a classifier with the default timings.
    pub fn new() -> Self {
        Self::with_timing(BUTTON_DEBOUNCE_MS, LONG_PRESS_MS, CLICK_WINDOW_MS)
    }

    /// Creates a classifier with custom debounce, long-press and click window timings.
    pub fn with_timing(debounce_ms: u64, long_press_ms: u64, click_window_ms: u64) -> Self {
        Self {
            raw_low: false,
            raw_since: None,
            pressed: false,
            pressed_at: None,
            click_count: 0,
            window_opened_at: None,
            debounce_ms,
            long_press_ms,
            click_window_ms,
        }
    }

    /// Feeds the current pin level and returns at most one gesture event.
    ///
    /// `screen` decides what a press means: a wake request while asleep, a
    /// counted click on the welcome and level-select screens, a plain press
    /// elsewhere.
    pub fn update(&mut self, pin_low: bool, now: I, screen: ScreenKind) -> Option<ButtonEvent> {
        let event = match self.debounce(pin_low, now) {
            Some(Edge::Press) => self.on_press(now, screen),
            Some(Edge::Release) => self.on_release(now),
            None => None,
        };

        event.or_else(|| self.poll_click_window(now))
    }

    /// Drops any open click burst without resolving it.
    pub fn cancel_clicks(&mut self) {
        self.click_count = 0;
        self.window_opened_at = None;
    }

    /// Clicks in the open burst, `0` when none is open.
    pub fn click_count(&self) -> u8 {
        self.click_count
    }

    /// Returns true while the button is confirmed held.
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    fn debounce(&mut self, pin_low: bool, now: I) -> Option<Edge> {
        if pin_low != self.raw_low {
            self.raw_low = pin_low;
            self.raw_since = Some(now);
            return None;
        }

        if pin_low == self.pressed {
            return None;
        }

        let since = self.raw_since?;
        if millis_since(now, since) <= self.debounce_ms {
            return None;
        }

        self.pressed = pin_low;
        Some(if pin_low { Edge::Press } else { Edge::Release })
    }

    fn on_press(&mut self, now: I, screen: ScreenKind) -> Option<ButtonEvent> {
        match screen {
            ScreenKind::Asleep => {
                // The wake press is not a gesture; its release is ignored too.
                self.pressed_at = None;
                self.cancel_clicks();
                Some(ButtonEvent::WakeRequested)
            }
            ScreenKind::Welcome | ScreenKind::LevelSelect => {
                self.pressed_at = Some(now);
                self.click_count = self.click_count.saturating_add(1);
                self.window_opened_at = Some(now);
                Some(ButtonEvent::ClickFeedback(self.click_count))
            }
            _ => {
                self.pressed_at = Some(now);
                Some(ButtonEvent::Pressed)
            }
        }
    }

    fn on_release(&mut self, now: I) -> Option<ButtonEvent> {
        let pressed_at = self.pressed_at.take()?;
        if millis_since(now, pressed_at) >= self.long_press_ms {
            self.cancel_clicks();
            return Some(ButtonEvent::LongPress);
        }
        None
    }

    fn poll_click_window(&mut self, now: I) -> Option<ButtonEvent> {
        if self.click_count == 0 || self.pressed {
            return None;
        }

        let opened_at = self.window_opened_at?;
        if millis_since(now, opened_at) <= self.click_window_ms {
            return None;
        }

        let level = self.click_count.clamp(1, MAX_LEVEL);
        self.cancel_clicks();
        Some(ButtonEvent::LevelChosen(level))
    }
}

impl<I: TimeInstant> Default for ButtonGestures<I> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::tests::At;

    /// Holds `level` from `from` until `to`, ticking every millisecond, and
    /// collects every event produced.
    fn drive(
        button: &mut ButtonGestures<At>,
        level: bool,
        from: u64,
        to: u64,
        screen: ScreenKind,
        events: &mut heapless::Vec<(u64, ButtonEvent), 16>,
    ) {
        for t in from..to {
            if let Some(event) = button.update(level, At(t), screen) {
                events.push((t, event)).unwrap();
            }
        }
    }

    #[test]
    fn press_is_confirmed_after_settle_window() {
        let mut button = ButtonGestures::new();
        assert_eq!(button.update(true, At(0), ScreenKind::InGame), None);
        assert_eq!(button.update(true, At(20), ScreenKind::InGame), None);
        assert_eq!(
            button.update(true, At(21), ScreenKind::InGame),
            Some(ButtonEvent::Pressed)
        );
        assert!(button.is_pressed());
    }

    #[test]
    fn bounce_shorter_than_settle_window_is_ignored() {
        let mut button = ButtonGestures::new();
        let mut events = heapless::Vec::new();
        drive(&mut button, true, 0, 10, ScreenKind::InGame, &mut events);
        drive(&mut button, false, 10, 15, ScreenKind::InGame, &mut events);
        drive(&mut button, true, 15, 30, ScreenKind::InGame, &mut events);
        drive(&mut button, false, 30, 100, ScreenKind::InGame, &mut events);
        assert!(events.is_empty());
    }

    #[test]
    fn press_while_asleep_requests_wake_and_release_is_silent() {
        let mut button = ButtonGestures::new();
        let mut events = heapless::Vec::new();
        drive(&mut button, true, 0, 2_000, ScreenKind::Asleep, &mut events);
        drive(&mut button, false, 2_000, 3_000, ScreenKind::Welcome, &mut events);
        assert_eq!(events.as_slice(), &[(21, ButtonEvent::WakeRequested)]);
        assert_eq!(button.click_count(), 0);
    }

    #[test]
    fn held_button_keeps_click_window_open() {
        let mut button = ButtonGestures::new();
        let mut events = heapless::Vec::new();
        drive(&mut button, true, 0, 750, ScreenKind::LevelSelect, &mut events);
        assert_eq!(events.as_slice(), &[(21, ButtonEvent::ClickFeedback(1))]);
        assert_eq!(button.click_count(), 1);
    }

    #[test]
    fn long_press_supersedes_open_clicks() {
        let mut button = ButtonGestures::new();
        let mut events = heapless::Vec::new();
        drive(&mut button, true, 0, 1_000, ScreenKind::LevelSelect, &mut events);
        drive(&mut button, false, 1_000, 3_000, ScreenKind::LevelSelect, &mut events);
        assert_eq!(
            events.as_slice(),
            &[(21, ButtonEvent::ClickFeedback(1)), (1_021, ButtonEvent::LongPress)]
        );
    }

    #[test]
    fn cancel_clicks_drops_the_burst() {
        let mut button = ButtonGestures::new();
        let mut events = heapless::Vec::new();
        drive(&mut button, true, 0, 50, ScreenKind::Welcome, &mut events);
        drive(&mut button, false, 50, 100, ScreenKind::Welcome, &mut events);
        button.cancel_clicks();
        drive(&mut button, false, 100, 2_000, ScreenKind::Welcome, &mut events);
        assert_eq!(events.as_slice(), &[(21, ButtonEvent::ClickFeedback(1))]);
    }
}
