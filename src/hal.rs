//! Hardware abstraction traits.
//!
//! The game core never touches pins directly. Implement these traits for
//! your board's ADC, GPIO, PWM and character LCD drivers. Every method is
//! infallible: handle hardware errors inside the implementation.

/// One of the six indicator LEDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Led {
    Red1,
    Red2,
    Red3,
    Green1,
    Green2,
    Green3,
}

impl Led {
    /// All LEDs, reds first.
    pub const ALL: [Led; 6] = [
        Led::Red1,
        Led::Red2,
        Led::Red3,
        Led::Green1,
        Led::Green2,
        Led::Green3,
    ];

    /// The red triplet, in lighting order.
    pub const REDS: [Led; 3] = [Led::Red1, Led::Red2, Led::Red3];

    /// The green triplet, in lighting order.
    pub const GREENS: [Led; 3] = [Led::Green1, Led::Green2, Led::Green3];

    /// Position of this LED within [`Led::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Analog input the potentiometer is wired to.
pub trait AnalogInput {
    /// Reads the current value. Readings are expected in `0..=1023`.
    fn read(&mut self) -> u16;
}

/// Digital input the button is wired to (active low, pulled up).
pub trait ButtonInput {
    /// Returns true while the pin reads low, i.e. while the button is held.
    fn is_low(&mut self) -> bool;
}

/// The six on/off indicator outputs.
pub trait LedBank {
    /// Switches a single LED.
    fn set(&mut self, led: Led, on: bool);

    /// Switches every LED off.
    fn all_off(&mut self) {
        for led in Led::ALL {
            self.set(led, false);
        }
    }
}

/// Square-wave tone generator driving the buzzer.
///
/// There is no duration parameter: how long a tone lasts is enforced by
/// [`TonePlayer`](crate::tone::TonePlayer).
pub trait Buzzer {
    /// Starts (or retunes) a tone at `frequency_hz`.
    fn start(&mut self, frequency_hz: u32);

    /// Silences the buzzer.
    fn stop(&mut self);
}

/// A two-line character display (HD44780 style).
pub trait TextDisplay {
    /// Clears both lines and homes the cursor.
    fn clear(&mut self);

    /// Moves the cursor to `col` on `row` (0 or 1).
    fn set_cursor(&mut self, col: u8, row: u8);

    /// Prints text at the cursor.
    fn print(&mut self, text: &str);

    /// Turns the display (and backlight) on.
    fn display_on(&mut self);

    /// Turns the display (and backlight) off. Contents are kept by the controller.
    fn display_off(&mut self);
}

/// Everything the device drives, in one type.
///
/// Blanket-implemented for any type implementing all five hardware traits,
/// so a board support struct only has to implement the individual traits.
pub trait Board: AnalogInput + ButtonInput + LedBank + Buzzer + TextDisplay {}

impl<T> Board for T where T: AnalogInput + ButtonInput + LedBank + Buzzer + TextDisplay {}
