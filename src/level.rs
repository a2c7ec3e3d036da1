//! Level configuration table.

use crate::config::{MAX_LEVEL, POT_MAX};
use heapless::Vec;

/// Per-level rules. Immutable once the table is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LevelConfig {
    /// Time allowed for the round in milliseconds, `0` for untimed.
    pub timer_ms: u64,

    /// Half-width of the winning band, in pot units.
    pub win_window: u16,

    /// Readings allowed before the round is lost, `0` for unlimited.
    pub tries_allowed: u8,
}

impl LevelConfig {
    /// Creates a level configuration.
    pub const fn new(timer_ms: u64, win_window: u16, tries_allowed: u8) -> Self {
        Self {
            timer_ms,
            win_window,
            tries_allowed,
        }
    }

    /// Returns true if the round runs against a clock.
    pub fn is_timed(&self) -> bool {
        self.timer_ms != 0
    }

    /// Returns the try budget a new session starts with.
    pub fn initial_tries(&self) -> Tries {
        match self.tries_allowed {
            0 => Tries::Unlimited,
            n => Tries::Limited(n),
        }
    }
}

/// Remaining try budget of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tries {
    Unlimited,
    Limited(u8),
}

impl Tries {
    /// Consumes one try. Returns true when the budget is exhausted.
    pub fn consume(&mut self) -> bool {
        match self {
            Tries::Unlimited => false,
            Tries::Limited(n) => {
                *n = n.saturating_sub(1);
                *n == 0
            }
        }
    }

    /// Returns true if no tries remain.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Tries::Limited(0))
    }
}

/// Level table validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LevelError {
    /// More than five levels were added.
    TooManyLevels,

    /// Fewer than five levels were added.
    MissingLevels { defined: u8 },

    /// A level has a zero-width winning band and could never be won.
    ZeroWinWindow { level: u8 },

    /// A level's winning band is wider than the pot's range.
    WindowTooWide { level: u8 },
}

impl core::fmt::Display for LevelError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LevelError::TooManyLevels => {
                write!(f, "level table holds at most {} levels", MAX_LEVEL)
            }
            LevelError::MissingLevels { defined } => {
                write!(
                    f,
                    "level table needs {} levels, only {} defined",
                    MAX_LEVEL, defined
                )
            }
            LevelError::ZeroWinWindow { level } => {
                write!(f, "level {} has a zero win window", level)
            }
            LevelError::WindowTooWide { level } => {
                write!(
                    f,
                    "level {} win window exceeds the pot range of {}",
                    level, POT_MAX
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LevelError {}

/// The rules for levels 1 through 5.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelTable {
    levels: [LevelConfig; MAX_LEVEL as usize],
}

impl LevelTable {
    /// Creates a new table builder.
    pub fn builder() -> LevelTableBuilder {
        LevelTableBuilder::new()
    }

    /// Clamps a level number into `1..=5`.
    pub fn clamp(level: u8) -> u8 {
        level.clamp(1, MAX_LEVEL)
    }

    /// Returns the rules for `level`, clamped into `1..=5`.
    pub fn get(&self, level: u8) -> &LevelConfig {
        &self.levels[usize::from(Self::clamp(level) - 1)]
    }
}

impl Default for LevelTable {
    fn default() -> Self {
        Self {
            levels: [
                LevelConfig::new(0, 40, 0),
                LevelConfig::new(0, 25, 0),
                LevelConfig::new(30_000, 20, 0),
                LevelConfig::new(0, 15, 5),
                LevelConfig::new(20_000, 10, 5),
            ],
        }
    }
}

/// Builder for a validated [`LevelTable`]. Levels are added in order, starting at 1.
#[derive(Debug, Default)]
pub struct LevelTableBuilder {
    levels: Vec<LevelConfig, { MAX_LEVEL as usize }>,
}

impl LevelTableBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self { levels: Vec::new() }
    }

    /// Adds the next level.
    ///
    /// # Errors
    /// * `TooManyLevels` - Five levels were already added
    pub fn level(mut self, config: LevelConfig) -> Result<Self, LevelError> {
        self.levels
            .push(config)
            .map_err(|_| LevelError::TooManyLevels)?;
        Ok(self)
    }

    /// Builds and validates the table.
    ///
    /// # Errors
    /// * `MissingLevels` - Fewer than five levels were added
    /// * `ZeroWinWindow` - A level's win window is zero
    /// * `WindowTooWide` - A level's win window exceeds the pot range
    pub fn build(self) -> Result<LevelTable, LevelError> {
        for (level, config) in (1..).zip(self.levels.iter()) {
            if config.win_window == 0 {
                return Err(LevelError::ZeroWinWindow { level });
            }
            if config.win_window > POT_MAX {
                return Err(LevelError::WindowTooWide { level });
            }
        }

        let defined = self.levels.len() as u8;
        let levels = self
            .levels
            .into_array()
            .map_err(|_| LevelError::MissingLevels { defined })?;

        Ok(LevelTable { levels })
    }
}
