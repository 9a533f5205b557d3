//! Events that drive the setup menu

/// Debounced button edges and internal menu events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuEvent {
    /// Mode button pressed: advance to the next page
    ModePressed,
    /// Increment button pressed
    IncrementPressed,
    /// Decrement button pressed
    DecrementPressed,
    /// Pending time has been written to the RTC
    Committed,
}
