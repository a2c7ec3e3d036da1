//! The level and game state machine.
//!
//! [`Game`] owns the active [`Screen`], the level table and the player's
//! progression. It never touches hardware: every transition returns a
//! [`Reaction`] describing what happened, and the [`Device`](crate::Device)
//! turns reactions into light, sound and text.

use crate::config::{Config, MAX_LEVEL, TARGET_MAX, TARGET_MIN};
use crate::level::{LevelTable, Tries};
use crate::score::Band;
use crate::time::{Deadline, TimeInstant};
use rand::{Rng, RngCore};

/// Payload-free view of [`Screen`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScreenKind {
    Welcome,
    LevelSelect,
    InGame,
    WinAnimation,
    Notice,
    Asleep,
}

/// Why a round was lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LossReason {
    /// The level timer ran out.
    TimeUp,
    /// The last allowed reading missed.
    OutOfTries,
}

/// One round on one level. Dropped when the round ends or the device sleeps.
#[derive(Debug, Clone)]
pub struct GameSession<I: TimeInstant> {
    level: u8,
    round_target: u16,
    started_at: I,
    tries_left: Tries,
    timer: Deadline<I>,
    last_band: Option<Band>,
}

impl<I: TimeInstant> GameSession<I> {
    /// The level being played.
    pub fn level(&self) -> u8 {
        self.level
    }

    /// The hidden value the player is looking for.
    pub fn round_target(&self) -> u16 {
        self.round_target
    }

    /// When the round started.
    pub fn started_at(&self) -> I {
        self.started_at
    }

    /// Remaining try budget.
    pub fn tries_left(&self) -> Tries {
        self.tries_left
    }

    /// Milliseconds left on the level timer, `None` for untimed levels.
    pub fn time_left(&self, now: I) -> Option<u64> {
        self.timer.remaining(now)
    }

    /// Band of the most recent accepted reading.
    pub fn last_band(&self) -> Option<Band> {
        self.last_band
    }
}

/// The active screen. Exactly one is active at a time.
#[derive(Debug, Clone)]
pub enum Screen<I: TimeInstant> {
    /// Title screen; clicks pick a level.
    Welcome,

    /// A level has been picked; a long-press starts it if unlocked.
    LevelSelect { level: u8 },

    /// A round is in progress.
    InGame(GameSession<I>),

    /// The round was won; the melody plays until the window closes.
    WinAnimation { level: u8, window: Deadline<I> },

    /// The round was lost; the message stays up until the pause ends.
    Notice {
        reason: LossReason,
        level: u8,
        target: u16,
        pause: Deadline<I>,
    },

    /// Display blanked after inactivity.
    Asleep,
}

impl<I: TimeInstant> Screen<I> {
    /// The kind of this screen.
    pub fn kind(&self) -> ScreenKind {
        match self {
            Screen::Welcome => ScreenKind::Welcome,
            Screen::LevelSelect { .. } => ScreenKind::LevelSelect,
            Screen::InGame(_) => ScreenKind::InGame,
            Screen::WinAnimation { .. } => ScreenKind::WinAnimation,
            Screen::Notice { .. } => ScreenKind::Notice,
            Screen::Asleep => ScreenKind::Asleep,
        }
    }
}

/// Highest level the player may start. Lives until power-off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Progression {
    unlocked_level: u8,
}

impl Progression {
    /// Only level 1 unlocked.
    pub const fn new() -> Self {
        Self { unlocked_level: 1 }
    }

    /// The unlock frontier.
    pub fn unlocked_level(&self) -> u8 {
        self.unlocked_level
    }

    /// Returns true if `level` may be started.
    pub fn is_unlocked(&self, level: u8) -> bool {
        level <= self.unlocked_level
    }

    /// Records a win on `level`. Only a win at the frontier unlocks the next
    /// level. Returns the newly unlocked level, if any.
    pub fn record_win(&mut self, level: u8) -> Option<u8> {
        if level == self.unlocked_level && self.unlocked_level < MAX_LEVEL {
            self.unlocked_level += 1;
            Some(self.unlocked_level)
        } else {
            None
        }
    }

    /// Locks everything but level 1 again.
    pub fn reset(&mut self) {
        self.unlocked_level = 1;
    }
}

impl Default for Progression {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of a state machine transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reaction {
    /// A click burst picked a level.
    LevelSelected { level: u8, locked: bool },

    /// A long-press tried to start a locked level.
    LevelLocked { level: u8 },

    /// A new round started.
    LevelStarted { level: u8 },

    /// Progression was reset from the welcome screen.
    ProgressReset,

    /// A reading missed the target.
    Scored { band: Band, tries_left: Tries },

    /// A reading hit the target.
    Won { level: u8 },

    /// The round was lost. `band` is set when the losing reading was scored.
    Lost { reason: LossReason, band: Option<Band> },

    /// Back on the welcome screen; carries a newly unlocked level after a win.
    ReturnedToWelcome { unlocked: Option<u8> },
}

/// The game state machine.
#[derive(Debug, Clone)]
pub struct Game<I: TimeInstant> {
    screen: Screen<I>,
    levels: LevelTable,
    progression: Progression,
    win_window_ms: u64,
    notice_ms: u64,
    reset_guard_ms: u64,
}

impl<I: TimeInstant> Game<I> {
    /// Creates a game on the welcome screen.
    pub fn new(config: &Config) -> Self {
        Self {
            screen: Screen::Welcome,
            levels: config.levels.clone(),
            progression: Progression::new(),
            win_window_ms: config.win_window_ms,
            notice_ms: config.notice_ms,
            reset_guard_ms: config.reset_guard_ms,
        }
    }

    /// The active screen.
    pub fn screen(&self) -> &Screen<I> {
        &self.screen
    }

    /// The kind of the active screen.
    pub fn kind(&self) -> ScreenKind {
        self.screen.kind()
    }

    /// The running round, if any.
    pub fn session(&self) -> Option<&GameSession<I>> {
        match &self.screen {
            Screen::InGame(session) => Some(session),
            _ => None,
        }
    }

    /// Player progression.
    pub fn progression(&self) -> Progression {
        self.progression
    }

    /// The level table.
    pub fn levels(&self) -> &LevelTable {
        &self.levels
    }

    /// Returns true while the win animation window is open.
    pub fn win_window_open(&self, now: I) -> bool {
        match &self.screen {
            Screen::WinAnimation { window, .. } => !window.expired(now),
            _ => false,
        }
    }

    /// Handles a resolved click burst. Only meaningful on the welcome and
    /// level-select screens.
    pub fn choose_level(&mut self, level: u8) -> Option<Reaction> {
        if !matches!(self.screen, Screen::Welcome | Screen::LevelSelect { .. }) {
            return None;
        }

        let level = LevelTable::clamp(level);
        self.screen = Screen::LevelSelect { level };
        info!("level {} selected", level);
        Some(Reaction::LevelSelected {
            level,
            locked: !self.progression.is_unlocked(level),
        })
    }

    /// Handles a long-press.
    ///
    /// On level select this starts the chosen level if it is unlocked. On the
    /// welcome screen it resets progression, but only when at least the reset
    /// guard has passed since the last activity.
    pub fn long_press<R: RngCore>(
        &mut self,
        now: I,
        since_activity_ms: u64,
        rng: &mut R,
    ) -> Option<Reaction> {
        match self.screen {
            Screen::LevelSelect { level } if self.progression.is_unlocked(level) => {
                Some(self.start_level(level, now, rng))
            }
            Screen::LevelSelect { level } => Some(Reaction::LevelLocked { level }),
            Screen::Welcome if since_activity_ms >= self.reset_guard_ms => {
                self.progression.reset();
                info!("progression reset");
                Some(Reaction::ProgressReset)
            }
            _ => None,
        }
    }

    /// Starts a round on `level` (clamped into `1..=5`) with a fresh target.
    pub fn start_level<R: RngCore>(&mut self, level: u8, now: I, rng: &mut R) -> Reaction {
        let level = LevelTable::clamp(level);
        let config = self.levels.get(level);

        let mut timer = Deadline::disarmed();
        if config.is_timed() {
            timer.arm(now, config.timer_ms);
        }

        let session = GameSession {
            level,
            round_target: rng.gen_range(TARGET_MIN..=TARGET_MAX),
            started_at: now,
            tries_left: config.initial_tries(),
            timer,
            last_band: None,
        };
        debug!("level {} target {}", level, session.round_target);
        self.screen = Screen::InGame(session);

        Reaction::LevelStarted { level }
    }

    /// Scores a stable pot reading against the round target.
    ///
    /// Ignored outside a round.
    pub fn accept_reading(&mut self, reading: u16, now: I) -> Option<Reaction> {
        let Screen::InGame(session) = &mut self.screen else {
            return None;
        };

        let win_window = self.levels.get(session.level).win_window;
        let band = Band::classify(reading, session.round_target, win_window);
        session.last_band = Some(band);
        debug!("reading {} scored band {}", reading, band.value());

        if band.is_win() {
            let level = session.level;
            self.screen = Screen::WinAnimation {
                level,
                window: Deadline::after(now, self.win_window_ms),
            };
            info!("level {} won", level);
            return Some(Reaction::Won { level });
        }

        if session.tries_left.consume() {
            self.enter_notice(LossReason::OutOfTries, now);
            return Some(Reaction::Lost {
                reason: LossReason::OutOfTries,
                band: Some(band),
            });
        }

        Some(Reaction::Scored {
            band,
            tries_left: session.tries_left,
        })
    }

    /// Advances the time-driven transitions: the level timer, the loss
    /// notice and the win window.
    pub fn poll(&mut self, now: I) -> Option<Reaction> {
        let fired = match &mut self.screen {
            Screen::InGame(session) => session.timer.fire(now),
            Screen::Notice { pause, .. } => pause.fire(now),
            Screen::WinAnimation { window, .. } => window.fire(now),
            _ => false,
        };
        if !fired {
            return None;
        }

        match self.screen {
            Screen::InGame(_) => {
                self.enter_notice(LossReason::TimeUp, now);
                Some(Reaction::Lost {
                    reason: LossReason::TimeUp,
                    band: None,
                })
            }
            Screen::Notice { .. } => {
                self.screen = Screen::Welcome;
                Some(Reaction::ReturnedToWelcome { unlocked: None })
            }
            Screen::WinAnimation { level, .. } => {
                let unlocked = self.progression.record_win(level);
                info!("win window closed, unlocked {}", unlocked);
                self.screen = Screen::Welcome;
                Some(Reaction::ReturnedToWelcome { unlocked })
            }
            _ => None,
        }
    }

    /// Blanks to the asleep screen, discarding any round in progress.
    pub fn sleep(&mut self) {
        info!("sleeping from {}", self.kind());
        self.screen = Screen::Asleep;
    }

    /// Wakes to the welcome screen.
    pub fn wake(&mut self) {
        info!("waking");
        self.screen = Screen::Welcome;
    }

    fn enter_notice(&mut self, reason: LossReason, now: I) {
        let (level, target) = match &self.screen {
            Screen::InGame(session) => (session.level, session.round_target),
            _ => return,
        };

        info!("level {} lost: {}", level, reason);
        self.screen = Screen::Notice {
            reason,
            level,
            target,
            pause: Deadline::after(now, self.notice_ms),
        };
    }
}
