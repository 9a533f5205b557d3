//! Setup menu state machine
//!
//! Idle → SetHour → SetMinute → Commit → Idle. Every mode press moves
//! exactly one step; Commit is left as soon as the time is written.

use super::events::MenuEvent;

/// Menu pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SetupMode {
    /// Normal clock display
    #[default]
    Idle,
    /// Editing hours
    SetHour,
    /// Editing minutes
    SetMinute,
    /// Writing the edited time to the RTC (transient)
    Commit,
}

impl SetupMode {
    /// Page number as shown in diagnostics (0-3)
    pub fn page(self) -> u8 {
        match self {
            SetupMode::Idle => 0,
            SetupMode::SetHour => 1,
            SetupMode::SetMinute => 2,
            SetupMode::Commit => 3,
        }
    }

    /// Whether the menu owns the display
    pub fn is_open(self) -> bool {
        !matches!(self, SetupMode::Idle)
    }

    /// Process an event and return the next page
    pub fn transition(self, event: MenuEvent) -> Self {
        use MenuEvent::*;
        use SetupMode::*;

        match (self, event) {
            (Idle, ModePressed) => SetHour,
            (SetHour, ModePressed) => SetMinute,
            (SetMinute, ModePressed) => Commit,
            (Commit, ModePressed) => Idle,
            (Commit, Committed) => Idle,

            // Edits never change the page
            _ => self,
        }
    }
}
