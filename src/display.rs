//! Redraw suppression for the two-line text display.

use crate::hal::TextDisplay;
use heapless::String;

/// Characters per display line.
pub const LINE_WIDTH: usize = 16;

/// One line of display text.
pub type Line = String<LINE_WIDTH>;

/// Remembers what is on the display and only redraws when it changes.
#[derive(Debug, Clone, Default)]
pub struct DisplayCache {
    shown: Option<(Line, Line)>,
}

impl DisplayCache {
    /// Creates an empty cache; the first render always draws.
    pub fn new() -> Self {
        Self { shown: None }
    }

    /// Draws `line0` and `line1` unless they are already shown.
    ///
    /// Returns true if the display was redrawn.
    pub fn render<D: TextDisplay>(&mut self, line0: &str, line1: &str, display: &mut D) -> bool {
        let next = (truncated(line0), truncated(line1));
        if self.shown.as_ref() == Some(&next) {
            return false;
        }

        display.clear();
        display.set_cursor(0, 0);
        display.print(&next.0);
        display.set_cursor(0, 1);
        display.print(&next.1);

        self.shown = Some(next);
        true
    }

    /// Forgets the cached content so the next render draws unconditionally.
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// The lines last drawn, if any.
    pub fn shown(&self) -> Option<(&str, &str)> {
        self.shown.as_ref().map(|(a, b)| (a.as_str(), b.as_str()))
    }
}

/// Copies at most [`LINE_WIDTH`] characters of `text`.
pub fn truncated(text: &str) -> Line {
    let mut line = Line::new();
    for c in text.chars() {
        if line.push(c).is_err() {
            break;
        }
    }
    line
}
