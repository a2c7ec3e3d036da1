//! Win melody and the LED blink that accompanies it.

use crate::config::BLINK_INTERVAL_MS;
use crate::hal::{Buzzer, Led, LedBank};
use crate::time::{Deadline, TimeInstant};
use crate::tone::TonePlayer;
use heapless::Vec;

/// Maximum number of notes in a [`Melody`].
pub const MAX_NOTES: usize = 16;

/// A single note. A frequency of `0` is a rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Note {
    pub frequency_hz: u32,
    pub duration_ms: u64,
}

impl Note {
    /// Creates a note.
    #[inline]
    pub const fn new(frequency_hz: u32, duration_ms: u64) -> Self {
        Self {
            frequency_hz,
            duration_ms,
        }
    }
}

/// Melody validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MelodyError {
    /// No notes provided.
    EmptyMelody,

    /// A note has zero duration.
    ZeroDurationNote,

    /// Melody capacity exceeded.
    CapacityExceeded,
}

impl core::fmt::Display for MelodyError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MelodyError::EmptyMelody => write!(f, "melody must have at least one note"),
            MelodyError::ZeroDurationNote => write!(f, "melody notes must have non-zero duration"),
            MelodyError::CapacityExceeded => {
                write!(f, "melody capacity of {} notes exceeded", MAX_NOTES)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MelodyError {}

/// An ordered list of notes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Melody {
    notes: Vec<Note, MAX_NOTES>,
}

impl Melody {
    /// Creates a new melody builder.
    pub fn builder() -> MelodyBuilder {
        MelodyBuilder::new()
    }

    /// The default win fanfare: a rising C major arpeggio.
    pub fn fanfare() -> Self {
        const FANFARE: [Note; 6] = [
            Note::new(523, 120),
            Note::new(659, 120),
            Note::new(784, 120),
            Note::new(1_047, 240),
            Note::new(784, 120),
            Note::new(1_047, 360),
        ];

        let mut notes = Vec::new();
        for note in FANFARE {
            // FANFARE is shorter than MAX_NOTES.
            let _ = notes.push(note);
        }
        Self { notes }
    }

    /// Returns the number of notes.
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Returns true if the melody has no notes. Built melodies never are.
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Returns the note at `index`.
    pub fn get(&self, index: usize) -> Option<&Note> {
        self.notes.get(index)
    }
}

impl Default for Melody {
    fn default() -> Self {
        Self::fanfare()
    }
}

/// Builder for constructing validated melodies.
#[derive(Debug, Default)]
pub struct MelodyBuilder {
    notes: Vec<Note, MAX_NOTES>,
}

impl MelodyBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self { notes: Vec::new() }
    }

    /// Appends a note.
    ///
    /// # Errors
    /// * `CapacityExceeded` - The melody already holds [`MAX_NOTES`] notes
    pub fn note(mut self, frequency_hz: u32, duration_ms: u64) -> Result<Self, MelodyError> {
        self.notes
            .push(Note::new(frequency_hz, duration_ms))
            .map_err(|_| MelodyError::CapacityExceeded)?;
        Ok(self)
    }

    /// Builds and validates the melody.
    ///
    /// # Errors
    /// * `EmptyMelody` - No notes were added
    /// * `ZeroDurationNote` - A note has zero duration
    pub fn build(self) -> Result<Melody, MelodyError> {
        if self.notes.is_empty() {
            return Err(MelodyError::EmptyMelody);
        }

        if self.notes.iter().any(|n| n.duration_ms == 0) {
            return Err(MelodyError::ZeroDurationNote);
        }

        Ok(Melody { notes: self.notes })
    }
}

/// Plays a [`Melody`] through a [`TonePlayer`] while blinking every LED.
#[derive(Debug, Clone)]
pub struct MelodyPlayer<I: TimeInstant> {
    melody: Melody,
    note_index: usize,
    note_ends: Deadline<I>,
    playing: bool,
    blink: Deadline<I>,
    blink_on: bool,
    blink_interval_ms: u64,
}

impl<I: TimeInstant> MelodyPlayer<I> {
    /// Creates an idle player for `melody`.
    pub fn new(melody: Melody) -> Self {
        Self::with_blink_interval(melody, BLINK_INTERVAL_MS)
    }

    /// Creates an idle player with a custom blink half-period.
    pub fn with_blink_interval(melody: Melody, blink_interval_ms: u64) -> Self {
        Self {
            melody,
            note_index: 0,
            note_ends: Deadline::disarmed(),
            playing: false,
            blink: Deadline::disarmed(),
            blink_on: false,
            blink_interval_ms,
        }
    }

    /// Starts from the first note with all LEDs lit.
    pub fn start<B>(&mut self, now: I, tone: &mut TonePlayer<I>, board: &mut B)
    where
        B: Buzzer + LedBank,
    {
        self.note_index = 0;
        self.playing = true;
        self.set_blink(true, board);
        self.blink.arm(now, self.blink_interval_ms);
        self.play_current(now, tone, board);
    }

    /// Advances the blink and the melody.
    ///
    /// When the last note ends the melody wraps around if `looping` is true,
    /// otherwise it stops. Returns true on the tick playback stops.
    pub fn tick<B>(&mut self, now: I, looping: bool, tone: &mut TonePlayer<I>, board: &mut B) -> bool
    where
        B: Buzzer + LedBank,
    {
        if !self.playing {
            return false;
        }

        if self.blink.fire(now) {
            self.set_blink(!self.blink_on, board);
            self.blink.arm(now, self.blink_interval_ms);
        }

        if !self.note_ends.fire(now) {
            return false;
        }

        self.note_index += 1;
        if self.note_index >= self.melody.len() {
            if !looping {
                self.stop(tone, board);
                return true;
            }
            self.note_index = 0;
        }

        self.play_current(now, tone, board);
        false
    }

    /// Silences the melody and turns every LED off.
    pub fn stop<B>(&mut self, tone: &mut TonePlayer<I>, board: &mut B)
    where
        B: Buzzer + LedBank,
    {
        self.playing = false;
        self.note_ends.disarm();
        self.blink.disarm();
        self.blink_on = false;
        tone.stop(board);
        board.all_off();
    }

    /// Returns true while the melody is playing.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Index of the note currently playing.
    pub fn note_index(&self) -> usize {
        self.note_index
    }

    /// Current blink phase.
    pub fn blink_on(&self) -> bool {
        self.blink_on
    }

    fn play_current<B: Buzzer>(&mut self, now: I, tone: &mut TonePlayer<I>, buzzer: &mut B) {
        if let Some(note) = self.melody.get(self.note_index).copied() {
            tone.start(note.frequency_hz, note.duration_ms, now, buzzer);
            self.note_ends.arm(now, note.duration_ms);
        }
    }

    fn set_blink<L: LedBank>(&mut self, on: bool, leds: &mut L) {
        self.blink_on = on;
        for led in Led::ALL {
            leds.set(led, on);
        }
    }
}
