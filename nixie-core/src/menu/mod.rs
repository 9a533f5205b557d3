//! Time setting menu
//!
//! The mode button walks the menu through its pages; the increment and
//! decrement buttons edit the field shown on the current page. The pending
//! time is written back to the RTC on commit.

pub mod events;
pub mod machine;

pub use events::MenuEvent;
pub use machine::SetupMode;

use crate::time::{ClockTime, HOURS_PER_DAY, MINUTES_PER_HOUR};

/// Field being edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Field {
    Hour,
    Minute,
}

/// Menu state plus the time being edited
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SetupMenu {
    mode: SetupMode,
    pending_hour: u8,
    pending_minute: u8,
}

impl Default for SetupMenu {
    fn default() -> Self {
        Self::new()
    }
}

impl SetupMenu {
    pub const fn new() -> Self {
        Self {
            mode: SetupMode::Idle,
            pending_hour: 0,
            pending_minute: 0,
        }
    }

    pub fn mode(&self) -> SetupMode {
        self.mode
    }

    /// Field edited on the current page, if any
    pub fn editing(&self) -> Option<Field> {
        match self.mode {
            SetupMode::SetHour => Some(Field::Hour),
            SetupMode::SetMinute => Some(Field::Minute),
            SetupMode::Idle | SetupMode::Commit => None,
        }
    }

    /// Pending time with seconds at zero
    pub fn pending(&self) -> ClockTime {
        ClockTime::new(self.pending_hour, self.pending_minute, 0).unwrap_or(ClockTime::MIDNIGHT)
    }

    /// Apply one button event
    ///
    /// `current` seeds the pending time when the menu opens.
    pub fn handle(&mut self, event: MenuEvent, current: ClockTime) {
        match event {
            MenuEvent::ModePressed | MenuEvent::Committed => {
                let next = self.mode.transition(event);
                if self.mode == SetupMode::Idle && next == SetupMode::SetHour {
                    self.pending_hour = current.hour();
                    self.pending_minute = current.minute();
                }
                self.mode = next;
            }
            MenuEvent::IncrementPressed => self.step(true),
            MenuEvent::DecrementPressed => self.step(false),
        }
    }

    /// Consume a pending commit
    ///
    /// Returns the time to write to the RTC and drops back to Idle, or
    /// `None` when the menu is not on its commit page.
    pub fn take_commit(&mut self) -> Option<ClockTime> {
        if self.mode != SetupMode::Commit {
            return None;
        }
        self.handle(MenuEvent::Committed, ClockTime::MIDNIGHT);
        Some(self.pending())
    }

    fn step(&mut self, up: bool) {
        match self.editing() {
            Some(Field::Hour) => self.pending_hour = wrap_step(self.pending_hour, HOURS_PER_DAY, up),
            Some(Field::Minute) => {
                self.pending_minute = wrap_step(self.pending_minute, MINUTES_PER_HOUR, up)
            }
            None => {}
        }
    }
}

/// Step `value` by one within `0..modulus`, wrapping at both ends
fn wrap_step(value: u8, modulus: u8, up: bool) -> u8 {
    if up {
        (value + 1) % modulus
    } else if value == 0 {
        modulus - 1
    } else {
        value - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u8, m: u8) -> ClockTime {
        ClockTime::new(h, m, 42).unwrap()
    }

    #[test]
    fn test_open_seeds_pending_time() {
        let mut menu = SetupMenu::new();
        menu.handle(MenuEvent::ModePressed, time(7, 30));
        assert_eq!(menu.mode(), SetupMode::SetHour);
        assert_eq!(menu.editing(), Some(Field::Hour));
        assert_eq!(menu.pending(), ClockTime::new(7, 30, 0).unwrap());
    }

    #[test]
    fn test_hour_wraps_both_ways() {
        let mut menu = SetupMenu::new();
        menu.handle(MenuEvent::ModePressed, time(23, 0));

        menu.handle(MenuEvent::IncrementPressed, time(23, 0));
        assert_eq!(menu.pending().hour(), 0);

        menu.handle(MenuEvent::DecrementPressed, time(23, 0));
        assert_eq!(menu.pending().hour(), 23);
    }

    #[test]
    fn test_minute_wraps_both_ways() {
        let mut menu = SetupMenu::new();
        menu.handle(MenuEvent::ModePressed, time(12, 59));
        menu.handle(MenuEvent::ModePressed, time(12, 59));
        assert_eq!(menu.editing(), Some(Field::Minute));

        menu.handle(MenuEvent::IncrementPressed, time(12, 59));
        assert_eq!(menu.pending().minute(), 0);
        // Hour is untouched while editing minutes
        assert_eq!(menu.pending().hour(), 12);

        menu.handle(MenuEvent::DecrementPressed, time(12, 59));
        assert_eq!(menu.pending().minute(), 59);
    }

    #[test]
    fn test_edits_ignored_when_idle() {
        let mut menu = SetupMenu::new();
        menu.handle(MenuEvent::IncrementPressed, time(5, 5));
        assert_eq!(menu.mode(), SetupMode::Idle);
        assert_eq!(menu.pending(), ClockTime::MIDNIGHT);
    }

    #[test]
    fn test_commit_returns_pending_and_idles() {
        let mut menu = SetupMenu::new();
        let now = time(10, 15);
        menu.handle(MenuEvent::ModePressed, now);
        menu.handle(MenuEvent::IncrementPressed, now);
        menu.handle(MenuEvent::ModePressed, now);
        menu.handle(MenuEvent::DecrementPressed, now);
        assert_eq!(menu.take_commit(), None);

        menu.handle(MenuEvent::ModePressed, now);
        assert_eq!(menu.mode(), SetupMode::Commit);

        assert_eq!(menu.take_commit(), ClockTime::new(11, 14, 0));
        assert_eq!(menu.mode(), SetupMode::Idle);
        assert_eq!(menu.take_commit(), None);
    }

    #[test]
    fn test_reopen_reseeds_from_current_time() {
        let mut menu = SetupMenu::new();
        menu.handle(MenuEvent::ModePressed, time(1, 1));
        menu.handle(MenuEvent::ModePressed, time(1, 1));
        menu.handle(MenuEvent::ModePressed, time(1, 1));
        let _ = menu.take_commit();

        menu.handle(MenuEvent::ModePressed, time(18, 45));
        assert_eq!(menu.pending(), ClockTime::new(18, 45, 0).unwrap());
    }
}
