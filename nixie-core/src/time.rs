//! Time-of-day types
//!
//! The RTC is the only persistent store of time. These types carry its
//! readings through the controller and back when the user sets the clock.

use crate::display::TubeDigits;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub const HOURS_PER_DAY: u8 = 24;
pub const MINUTES_PER_HOUR: u8 = 60;
pub const SECONDS_PER_MINUTE: u8 = 60;

/// Split a two-digit value into (tens, ones)
pub const fn split_digits(value: u8) -> (u8, u8) {
    (value / 10, value % 10)
}

/// Inverse of [`split_digits`]
pub const fn join_digits(tens: u8, ones: u8) -> u8 {
    tens * 10 + ones
}

/// Time of day, 24-hour clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClockTime {
    hour: u8,
    minute: u8,
    second: u8,
}

impl ClockTime {
    pub const MIDNIGHT: Self = Self {
        hour: 0,
        minute: 0,
        second: 0,
    };

    /// Create a time, or `None` if any field is out of range
    pub const fn new(hour: u8, minute: u8, second: u8) -> Option<Self> {
        if hour < HOURS_PER_DAY && minute < MINUTES_PER_HOUR && second < SECONDS_PER_MINUTE {
            Some(Self {
                hour,
                minute,
                second,
            })
        } else {
            None
        }
    }

    pub const fn hour(&self) -> u8 {
        self.hour
    }

    pub const fn minute(&self) -> u8 {
        self.minute
    }

    pub const fn second(&self) -> u8 {
        self.second
    }

    /// Hour as (tens, ones)
    pub const fn hour_digits(&self) -> (u8, u8) {
        split_digits(self.hour)
    }

    /// Minute as (tens, ones)
    pub const fn minute_digits(&self) -> (u8, u8) {
        split_digits(self.minute)
    }

    /// Tube digits for HH:MM
    pub const fn tube_digits(&self) -> TubeDigits {
        TubeDigits::from_hour_minute(self.hour, self.minute)
    }

    /// Same hour and minute with seconds reset to zero
    pub const fn with_zero_seconds(self) -> Self {
        Self { second: 0, ..self }
    }

    /// Seconds since midnight
    pub const fn seconds_of_day(&self) -> u32 {
        self.hour as u32 * 3600 + self.minute as u32 * 60 + self.second as u32
    }

    /// The time one minute later, wrapping 23:59 to 00:00
    pub const fn next_minute(self) -> Self {
        if self.minute + 1 < MINUTES_PER_HOUR {
            Self {
                minute: self.minute + 1,
                ..self
            }
        } else {
            Self {
                hour: (self.hour + 1) % HOURS_PER_DAY,
                minute: 0,
                ..self
            }
        }
    }
}

/// Calendar date and time as kept by the RTC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DateTime {
    /// Full year, 2000-2099 on a DS3231
    pub year: u16,
    /// Month, 1-12
    pub month: u8,
    /// Day of month, 1-31
    pub day: u8,
    pub time: ClockTime,
}

impl DateTime {
    pub const fn new(year: u16, month: u8, day: u8, time: ClockTime) -> Self {
        Self {
            year,
            month,
            day,
            time,
        }
    }

    /// Same date at a different time of day
    pub const fn with_time(self, time: ClockTime) -> Self {
        Self { time, ..self }
    }

    /// Day of week, 0 = Sunday
    ///
    /// Sakamoto's method, valid for the Gregorian calendar.
    pub fn weekday(&self) -> u8 {
        const OFFSETS: [u16; 12] = [0, 3, 2, 5, 0, 3, 5, 1, 4, 6, 2, 4];
        let month = self.month.clamp(1, 12);
        let year = if month < 3 {
            self.year.saturating_sub(1)
        } else {
            self.year
        };
        let sum = year + year / 4 - year / 100
            + year / 400
            + OFFSETS[(month - 1) as usize]
            + self.day as u16;
        (sum % 7) as u8
    }
}
