//! Configuration type definitions

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Longest supported motion timeout (one day)
pub const MAX_MOTION_TIMEOUT_MINUTES: u16 = 24 * 60;

/// Longest time a sweep digit may be held (ms)
pub const MAX_DIGIT_DELAY_MS: u32 = 60_000;

/// Button wiring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ButtonLayout {
    /// Mode and increment
    #[default]
    TwoButton,
    /// Mode, increment and decrement
    ThreeButton,
}

impl ButtonLayout {
    pub const fn button_count(self) -> usize {
        match self {
            ButtonLayout::TwoButton => 2,
            ButtonLayout::ThreeButton => 3,
        }
    }
}

/// Cathode conditioning schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConditioningConfig {
    /// Displayed minutes between periodic sweeps
    pub period_minutes: u16,
    /// Sweep length at power-up (ms)
    pub startup_ms: u32,
    /// Sweep length for periodic runs (ms)
    pub periodic_ms: u32,
    /// Time each digit is shown (ms)
    pub digit_delay_ms: u32,
}

impl Default for ConditioningConfig {
    fn default() -> Self {
        Self {
            period_minutes: 15,
            startup_ms: 2000,
            periodic_ms: 3000,
            digit_delay_ms: 25,
        }
    }
}

/// PIR motion sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MotionConfig {
    /// Minutes without motion before the display is switched off
    pub timeout_minutes: u16,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            timeout_minutes: 60,
        }
    }
}

/// Complete clock configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ClockConfig {
    pub buttons: ButtonLayout,
    /// Debounce delay (ms)
    pub debounce_ms: u32,
    /// Blank the hour tens tube when the hour is below 10
    pub blank_leading_zero: bool,
    pub conditioning: ConditioningConfig,
    /// Motion sensor; `None` keeps the display on permanently
    pub motion: Option<MotionConfig>,
    /// Blink the edited field with this period (ms)
    pub blink_period_ms: Option<u32>,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self::two_button()
    }
}

impl ClockConfig {
    /// Two buttons, all four tubes lit, no motion sensor
    pub const fn two_button() -> Self {
        Self {
            buttons: ButtonLayout::TwoButton,
            debounce_ms: 50,
            blank_leading_zero: false,
            conditioning: ConditioningConfig {
                period_minutes: 15,
                startup_ms: 2000,
                periodic_ms: 3000,
                digit_delay_ms: 25,
            },
            motion: None,
            blink_period_ms: None,
        }
    }

    /// Three buttons, leading-zero blanking and a PIR sensor
    pub const fn three_button_motion() -> Self {
        let mut config = Self::two_button();
        config.buttons = ButtonLayout::ThreeButton;
        config.blank_leading_zero = true;
        config.motion = Some(MotionConfig {
            timeout_minutes: 60,
        });
        config
    }

    /// Check every field for a usable value
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.debounce_ms == 0 {
            return Err(ConfigError::ZeroDebounce);
        }

        let c = &self.conditioning;
        if c.period_minutes == 0 {
            return Err(ConfigError::ZeroConditioningPeriod);
        }
        if c.startup_ms == 0 || c.periodic_ms == 0 {
            return Err(ConfigError::ZeroConditioningDuration);
        }
        if c.digit_delay_ms == 0 {
            return Err(ConfigError::ZeroDigitDelay);
        }
        if c.digit_delay_ms > MAX_DIGIT_DELAY_MS {
            return Err(ConfigError::DigitDelayTooLong(c.digit_delay_ms));
        }

        if let Some(motion) = self.motion {
            if motion.timeout_minutes == 0 || motion.timeout_minutes > MAX_MOTION_TIMEOUT_MINUTES {
                return Err(ConfigError::MotionTimeoutOutOfRange(motion.timeout_minutes));
            }
        }

        if let Some(period) = self.blink_period_ms {
            if period < 2 {
                return Err(ConfigError::BlinkPeriodTooShort(period));
            }
        }

        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    ZeroDebounce,
    ZeroConditioningPeriod,
    ZeroConditioningDuration,
    ZeroDigitDelay,
    DigitDelayTooLong(u32),
    MotionTimeoutOutOfRange(u16),
    BlinkPeriodTooShort(u32),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::ZeroDebounce => write!(f, "debounce_ms must be greater than 0"),
            ConfigError::ZeroConditioningPeriod => {
                write!(f, "conditioning.period_minutes must be greater than 0")
            }
            ConfigError::ZeroConditioningDuration => write!(
                f,
                "conditioning.startup_ms and conditioning.periodic_ms must be greater than 0"
            ),
            ConfigError::ZeroDigitDelay => {
                write!(f, "conditioning.digit_delay_ms must be greater than 0")
            }
            ConfigError::DigitDelayTooLong(ms) => write!(
                f,
                "conditioning.digit_delay_ms is {}, expected at most {}",
                ms, MAX_DIGIT_DELAY_MS
            ),
            ConfigError::MotionTimeoutOutOfRange(minutes) => write!(
                f,
                "motion.timeout_minutes is {}, expected 1..={}",
                minutes, MAX_MOTION_TIMEOUT_MINUTES
            ),
            ConfigError::BlinkPeriodTooShort(period) => {
                write!(f, "blink_period_ms is {}, expected at least 2", period)
            }
        }
    }
}
