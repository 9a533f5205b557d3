//! Time source trait

use crate::time::DateTime;

/// A battery-backed real-time clock
pub trait TimeSource {
    /// Error type for bus or data failures
    type Error;

    /// Read the current date and time
    fn now(&mut self) -> Result<DateTime, Self::Error>;

    /// Set the clock
    fn adjust(&mut self, datetime: &DateTime) -> Result<(), Self::Error>;
}
