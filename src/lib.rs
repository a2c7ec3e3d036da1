#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`Device`**: Owns the board and every component, advanced by `Device::tick`
//! - **`Board`**: Hardware traits to implement for your pot, button, LEDs, buzzer and display
//! - **`TimeSource`**: Trait to implement for your millisecond clock
//! - **`Deadline`**: Armed/fired one-shot timer shared by every timed component
//! - **`PotDebouncer`**: Turns noisy analog readings into edge-triggered stable values
//! - **`ButtonGestures`**: Debounces the button and classifies clicks and long-presses
//! - **`Game`**: Screen state machine, level table, scoring and progression
//! - **`TonePlayer`** / **`MelodyPlayer`**: Non-blocking buzzer playback
//! - **`DisplayCache`**: Skips redraws when the text has not changed
//!
//! Nothing in the crate blocks. Every component keeps its own timers and is
//! advanced from the single `Device::tick` call, which must be polled
//! continuously by the board's main loop.

#[macro_use]
mod fmt;

pub mod button;
pub mod config;
pub mod device;
pub mod display;
pub mod game;
pub mod hal;
pub mod idle;
pub mod level;
pub mod melody;
pub mod pot;
pub mod score;
pub mod time;
pub mod tone;
pub mod ui;

pub use button::{ButtonEvent, ButtonGestures};
pub use config::Config;
pub use device::Device;
pub use display::{DisplayCache, Line};
pub use game::{Game, GameSession, LossReason, Progression, Reaction, Screen, ScreenKind};
pub use hal::{AnalogInput, Board, ButtonInput, Buzzer, Led, LedBank, TextDisplay};
pub use idle::IdleTracker;
pub use level::{LevelConfig, LevelError, LevelTable, LevelTableBuilder, Tries};
pub use melody::{Melody, MelodyBuilder, MelodyError, MelodyPlayer, Note};
pub use pot::PotDebouncer;
pub use score::Band;
pub use time::{Deadline, TimeDuration, TimeInstant, TimeSource};
pub use tone::TonePlayer;
