//! The top-level tick loop.
//!
//! [`Device`] owns the board, every input filter, the sound players and the
//! game state machine, and advances all of them once per [`Device::tick`].
//! Components are polled in a fixed order (button, pot, tone, melody, idle,
//! game timers) so an event produced early in a tick is visible to
//! everything polled after it in the same tick.

use crate::button::{ButtonEvent, ButtonGestures};
use crate::config::{CLICK_TONE_HZ, CLICK_TONE_MS, Config, LOSE_TONE_HZ, LOSE_TONE_MS};
use crate::display::DisplayCache;
use crate::game::{Game, Reaction, Screen, ScreenKind};
use crate::hal::{Board, Buzzer};
use crate::idle::IdleTracker;
use crate::melody::MelodyPlayer;
use crate::pot::PotDebouncer;
use crate::score::Band;
use crate::time::{TimeInstant, TimeSource};
use crate::tone::TonePlayer;
use crate::ui;
use rand::RngCore;

/// Length of the error buzz played when a locked level is long-pressed.
const LOCKED_TONE_MS: u64 = 200;

/// The guessing game device.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `T` - Time source implementation type
/// * `B` - Board implementation type
/// * `R` - Random number generator used to pick round targets
pub struct Device<'t, I: TimeInstant, T: TimeSource<I>, B: Board, R: RngCore> {
    board: B,
    time_source: &'t T,
    rng: R,
    config: Config,
    button: ButtonGestures<I>,
    pot: PotDebouncer<I>,
    tone: TonePlayer<I>,
    melody: MelodyPlayer<I>,
    idle: IdleTracker<I>,
    game: Game<I>,
    display: DisplayCache,
}

impl<'t, I, T, B, R> Device<'t, I, T, B, R>
where
    I: TimeInstant,
    T: TimeSource<I>,
    B: Board,
    R: RngCore,
{
    /// Creates a device with the default configuration, showing the welcome screen.
    pub fn new(board: B, time_source: &'t T, rng: R) -> Self {
        Self::with_config(board, time_source, rng, Config::default())
    }

    /// Creates a device with a custom configuration.
    pub fn with_config(mut board: B, time_source: &'t T, rng: R, config: Config) -> Self {
        let now = time_source.now();

        board.all_off();
        Buzzer::stop(&mut board);
        board.display_on();

        let mut device = Self {
            board,
            time_source,
            rng,
            button: ButtonGestures::with_timing(
                config.button_debounce_ms,
                config.long_press_ms,
                config.click_window_ms,
            ),
            pot: PotDebouncer::with_timing(config.pot_noise_threshold, config.pot_stable_ms),
            tone: TonePlayer::new(),
            melody: MelodyPlayer::with_blink_interval(
                config.melody.clone(),
                config.blink_interval_ms,
            ),
            idle: IdleTracker::with_timeout(now, config.idle_timeout_ms),
            game: Game::new(&config),
            display: DisplayCache::new(),
            config,
        };
        device.render(now);
        device
    }

    /// Advances every component once.
    ///
    /// Never blocks; call it as often as the main loop allows.
    pub fn tick(&mut self) {
        let now = self.time_source.now();

        let pin_low = self.board.is_low();
        if let Some(event) = self.button.update(pin_low, now, self.game.kind()) {
            self.on_button(event, now);
        }

        let raw = self.board.read();
        if let Some(value) = self.pot.update(raw, now) {
            self.idle.record(now);
            if let Some(reaction) = self.game.accept_reading(value, now) {
                self.apply(reaction, now);
            }
        }

        self.tone.tick(now, &mut self.board);

        let looping = self.game.win_window_open(now);
        self.melody.tick(now, looping, &mut self.tone, &mut self.board);

        if self.idle.should_sleep(now, self.game.kind() == ScreenKind::Asleep) {
            self.sleep();
        }

        if let Some(reaction) = self.game.poll(now) {
            self.apply(reaction, now);
        }

        self.render(now);
    }

    /// The active screen.
    pub fn screen(&self) -> &Screen<I> {
        self.game.screen()
    }

    /// The game state machine.
    pub fn game(&self) -> &Game<I> {
        &self.game
    }

    /// The configuration the device was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The board.
    pub fn board(&self) -> &B {
        &self.board
    }

    /// Mutable access to the board, e.g. to inject readings in a simulator.
    pub fn board_mut(&mut self) -> &mut B {
        &mut self.board
    }

    /// Milliseconds since the last recorded activity.
    pub fn idle_for(&self) -> u64 {
        self.idle.since(self.time_source.now())
    }

    /// Returns true while the win melody plays.
    pub fn is_celebrating(&self) -> bool {
        self.melody.is_playing()
    }

    fn on_button(&mut self, event: ButtonEvent, now: I) {
        debug!("button {}", event);
        match event {
            ButtonEvent::WakeRequested => {
                self.idle.record(now);
                self.game.wake();
                self.board.display_on();
                self.display.invalidate();
            }
            ButtonEvent::ClickFeedback(_) => {
                self.idle.record(now);
                self.tone
                    .start(CLICK_TONE_HZ, CLICK_TONE_MS, now, &mut self.board);
            }
            ButtonEvent::Pressed => {
                self.idle.record(now);
            }
            ButtonEvent::LevelChosen(level) => {
                if let Some(reaction) = self.game.choose_level(level) {
                    self.apply(reaction, now);
                }
            }
            ButtonEvent::LongPress => {
                let since = self.idle.since(now);
                if let Some(reaction) = self.game.long_press(now, since, &mut self.rng) {
                    self.apply(reaction, now);
                }
            }
        }
    }

    fn apply(&mut self, reaction: Reaction, now: I) {
        debug!("reaction {}", reaction);
        match reaction {
            Reaction::LevelSelected { .. } => {}
            Reaction::LevelLocked { .. } => {
                self.tone
                    .start(LOSE_TONE_HZ, LOCKED_TONE_MS, now, &mut self.board);
            }
            Reaction::LevelStarted { .. } => {
                self.pot.reset();
                self.board.all_off();
                self.idle.record(now);
                self.tone
                    .start(CLICK_TONE_HZ, CLICK_TONE_MS, now, &mut self.board);
            }
            Reaction::ProgressReset => {
                self.tone
                    .start(CLICK_TONE_HZ, CLICK_TONE_MS, now, &mut self.board);
            }
            Reaction::Scored { band, .. } => {
                self.show_band(band);
                if let Some((frequency_hz, duration_ms)) = band.tone() {
                    self.tone.start(frequency_hz, duration_ms, now, &mut self.board);
                }
            }
            Reaction::Won { .. } => {
                // The all-LED blink stands in for the band 5 pattern.
                self.idle.record(now);
                self.melody.start(now, &mut self.tone, &mut self.board);
            }
            Reaction::Lost { band, .. } => {
                match band {
                    Some(band) => self.show_band(band),
                    None => self.board.all_off(),
                }
                self.tone
                    .start(LOSE_TONE_HZ, LOSE_TONE_MS, now, &mut self.board);
            }
            Reaction::ReturnedToWelcome { .. } => {
                self.melody.stop(&mut self.tone, &mut self.board);
                self.tone.stop(&mut self.board);
                self.board.all_off();
            }
        }
    }

    fn show_band(&mut self, band: Band) {
        self.board.all_off();
        for &led in band.lit_leds() {
            self.board.set(led, true);
        }
    }

    fn sleep(&mut self) {
        self.melody.stop(&mut self.tone, &mut self.board);
        self.tone.stop(&mut self.board);
        self.board.all_off();
        self.button.cancel_clicks();
        self.game.sleep();

        self.board.clear();
        self.board.display_off();
        self.display.invalidate();
    }

    fn render(&mut self, now: I) {
        if self.game.kind() == ScreenKind::Asleep {
            return;
        }

        let (top, bottom) = ui::compose(&self.game, self.button.click_count(), now);
        self.display.render(&top, &bottom, &mut self.board);
    }
}
