//! Button debouncing
//!
//! Buttons are wired active-LOW with pull-ups. Each button gets its own
//! [`Debouncer`] which turns contact bounce into a single pressed edge.
//! Debouncers are polled, not interrupt driven: call them every loop
//! iteration for the timing to hold.

use heapless::Vec;

/// Maximum number of buttons on any clock variant
pub const MAX_BUTTONS: usize = 3;

/// Logic level of an input pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Low,
    High,
}

impl Level {
    pub const fn from_high(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// Role of each physical button, by bank index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Advances the setup menu
    Mode,
    /// Increments the field being edited
    Increment,
    /// Decrements the field being edited (three-button clocks only)
    Decrement,
}

impl Button {
    pub const fn index(self) -> usize {
        match self {
            Button::Mode => 0,
            Button::Increment => 1,
            Button::Decrement => 2,
        }
    }
}

/// Debounce state of one button
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Debouncer {
    /// Accepted level after debouncing
    stable: Level,
    /// Raw level seen on the previous poll
    last_raw: Level,
    /// Time of the last raw level change (ms)
    changed_at_ms: u32,
    /// How long the raw level must hold before it is accepted (ms)
    delay_ms: u32,
}

impl Debouncer {
    /// Create a debouncer for a released (HIGH) button
    pub const fn new(delay_ms: u32) -> Self {
        Self {
            stable: Level::High,
            last_raw: Level::High,
            changed_at_ms: 0,
            delay_ms,
        }
    }

    /// Feed one raw sample
    ///
    /// Returns `true` exactly once per press: when the raw level has been
    /// LOW for at least the debounce delay and the accepted level was HIGH.
    pub fn poll(&mut self, raw: Level, now_ms: u32) -> bool {
        if raw != self.last_raw {
            self.last_raw = raw;
            self.changed_at_ms = now_ms;
        }

        if raw != self.stable && now_ms.wrapping_sub(self.changed_at_ms) >= self.delay_ms {
            self.stable = raw;
            return raw == Level::Low;
        }

        false
    }

    /// Accepted level
    pub fn level(&self) -> Level {
        self.stable
    }

    /// Whether the button is currently held down (debounced)
    pub fn is_pressed(&self) -> bool {
        self.stable == Level::Low
    }
}

/// Debouncers for every button on the clock
#[derive(Debug, Clone)]
pub struct ButtonBank {
    buttons: Vec<Debouncer, MAX_BUTTONS>,
}

impl ButtonBank {
    /// Create `count` debouncers sharing `delay_ms` (count is capped at
    /// [`MAX_BUTTONS`])
    pub fn new(count: usize, delay_ms: u32) -> Self {
        let mut buttons = Vec::new();
        for _ in 0..count.min(MAX_BUTTONS) {
            let _ = buttons.push(Debouncer::new(delay_ms));
        }
        Self { buttons }
    }

    /// Feed one raw sample for the button at `index`
    ///
    /// Returns `true` on a debounced press edge; unknown indices never
    /// report a press.
    pub fn poll(&mut self, index: usize, raw: Level, now_ms: u32) -> bool {
        match self.buttons.get_mut(index) {
            Some(button) => button.poll(raw, now_ms),
            None => false,
        }
    }

    /// Feed the sample for a named button
    pub fn poll_button(&mut self, button: Button, raw: Level, now_ms: u32) -> bool {
        self.poll(button.index(), raw, now_ms)
    }

    /// Number of buttons in the bank
    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }
}
