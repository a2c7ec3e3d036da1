//! Shared test infrastructure for dial-seeker integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use dial_seeker::{
    AnalogInput, ButtonInput, Buzzer, Device, Led, LedBank, Line, TextDisplay, TimeDuration,
    TimeInstant, TimeSource,
};
use rand::SeedableRng;
use rand::rngs::SmallRng;

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    fn as_millis(&self) -> u64 {
        self.0
    }
}

/// Mock instant type for testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0.saturating_sub(earlier.0))
    }
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: core::cell::Cell<TestInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: core::cell::Cell::new(TestInstant(0)),
        }
    }

    /// Advance time by the given number of milliseconds
    pub fn advance(&self, millis: u64) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + millis));
    }

    pub fn set_time(&self, time: TestInstant) {
        self.current_time.set(time);
    }

    pub fn millis(&self) -> u64 {
        self.current_time.get().0
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        self.current_time.get()
    }
}

// ============================================================================
// Mock Board
// ============================================================================

/// Mock board: inputs are set by the test, outputs are recorded
pub struct MockBoard {
    pub pot: u16,
    pub button_low: bool,
    pub leds: [bool; 6],
    pub tone: Option<u32>,
    pub tone_history: heapless::Vec<u32, 64>,
    pub display_on: bool,
    pub redraws: u32,
    pub lines: [Line; 2],
    cursor_row: usize,
}

impl MockBoard {
    pub fn new() -> Self {
        Self {
            pot: 0,
            button_low: false,
            leds: [false; 6],
            tone: None,
            tone_history: heapless::Vec::new(),
            display_on: false,
            redraws: 0,
            lines: [Line::new(), Line::new()],
            cursor_row: 0,
        }
    }

    pub fn led(&self, led: Led) -> bool {
        self.leds[led.index()]
    }

    pub fn lit(&self) -> usize {
        self.leds.iter().filter(|on| **on).count()
    }

    pub fn line(&self, row: usize) -> &str {
        self.lines[row].as_str()
    }
}

impl AnalogInput for MockBoard {
    fn read(&mut self) -> u16 {
        self.pot
    }
}

impl ButtonInput for MockBoard {
    fn is_low(&mut self) -> bool {
        self.button_low
    }
}

impl LedBank for MockBoard {
    fn set(&mut self, led: Led, on: bool) {
        self.leds[led.index()] = on;
    }
}

impl Buzzer for MockBoard {
    fn start(&mut self, frequency_hz: u32) {
        self.tone = Some(frequency_hz);
        let _ = self.tone_history.push(frequency_hz);
    }

    fn stop(&mut self) {
        self.tone = None;
    }
}

impl TextDisplay for MockBoard {
    fn clear(&mut self) {
        self.redraws += 1;
        self.lines = [Line::new(), Line::new()];
        self.cursor_row = 0;
    }

    fn set_cursor(&mut self, _col: u8, row: u8) {
        self.cursor_row = usize::from(row.min(1));
    }

    fn print(&mut self, text: &str) {
        let _ = self.lines[self.cursor_row].push_str(text);
    }

    fn display_on(&mut self) {
        self.display_on = true;
    }

    fn display_off(&mut self) {
        self.display_on = false;
    }
}

// ============================================================================
// Test Harness
// ============================================================================

pub type TestDevice<'t> = Device<'t, TestInstant, MockTimeSource, MockBoard, SmallRng>;

pub fn device(clock: &MockTimeSource) -> TestDevice<'_> {
    Device::new(MockBoard::new(), clock, SmallRng::seed_from_u64(0x5eed))
}

/// Advance the clock one millisecond at a time, ticking after each step
pub fn run_for(device: &mut TestDevice<'_>, clock: &MockTimeSource, millis: u64) {
    for _ in 0..millis {
        clock.advance(1);
        device.tick();
    }
}

/// Hold the button for `hold_ms`, then release and let the release settle
pub fn press(device: &mut TestDevice<'_>, clock: &MockTimeSource, hold_ms: u64) {
    device.board_mut().button_low = true;
    run_for(device, clock, hold_ms);
    device.board_mut().button_low = false;
    run_for(device, clock, 30);
}

/// Click `count` times, each a short press, then wait for the click window to close
pub fn click_level(device: &mut TestDevice<'_>, clock: &MockTimeSource, count: u8) {
    for _ in 0..count {
        press(device, clock, 60);
    }
    run_for(device, clock, 800);
}

/// Move the pot to `value` and hold it until it is accepted
///
/// The pot briefly passes through a distant position first, so the reading
/// opens a new stabilization episode even if the pot already sat near `value`.
pub fn dial(device: &mut TestDevice<'_>, clock: &MockTimeSource, value: u16) {
    device.board_mut().pot = if value > 511 { value - 100 } else { value + 100 };
    run_for(device, clock, 50);
    device.board_mut().pot = value;
    run_for(device, clock, 510);
}

/// A pot value more than 500 units from `target`, a miss on every default level
pub fn far_from(target: u16) -> u16 {
    if target > 511 { 0 } else { 1023 }
}

/// Select and start `level`, which must be unlocked
pub fn start_level(device: &mut TestDevice<'_>, clock: &MockTimeSource, level: u8) -> u16 {
    click_level(device, clock, level);
    press(device, clock, 900);
    device
        .game()
        .session()
        .expect("level should have started")
        .round_target()
}

/// Start `level`, hit the target and wait for the win animation to finish
pub fn win_level(device: &mut TestDevice<'_>, clock: &MockTimeSource, level: u8) {
    let target = start_level(device, clock, level);
    dial(device, clock, target);
    run_for(device, clock, 5_100);
}
