//! Display data model
//!
//! Four nixie tubes show hours and minutes. Each tube lights exactly one of
//! its ten cathodes, or none when blanked.

/// Number of tubes in the display
pub const TUBE_COUNT: usize = 4;

/// Number of cathodes (digits 0-9) per tube
pub const CATHODE_COUNT: u8 = 10;

/// A single decimal digit, 0-9
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Digit(u8);

impl Digit {
    pub const ZERO: Self = Self(0);
    pub const NINE: Self = Self(9);

    /// Create a digit, or `None` if `value` is not 0-9
    pub const fn new(value: u8) -> Option<Self> {
        if value < CATHODE_COUNT {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Ones digit of `value`
    pub const fn ones_of(value: u8) -> Self {
        Self(value % 10)
    }

    /// Tens digit of `value` (values 100+ wrap)
    pub const fn tens_of(value: u8) -> Self {
        Self((value / 10) % 10)
    }

    /// Numeric value, 0-9
    pub const fn value(self) -> u8 {
        self.0
    }
}

/// Position of a tube in the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DigitPosition {
    HourTens,
    HourOnes,
    MinuteTens,
    MinuteOnes,
}

impl DigitPosition {
    /// All positions, left to right as seen by the viewer
    pub const ALL: [Self; TUBE_COUNT] = [
        Self::HourTens,
        Self::HourOnes,
        Self::MinuteTens,
        Self::MinuteOnes,
    ];

    /// Order in which tubes are shifted onto the register chain
    ///
    /// The first pattern shifted travels furthest, to the minute-ones tube.
    pub const SHIFT_ORDER: [Self; TUBE_COUNT] = [
        Self::MinuteOnes,
        Self::MinuteTens,
        Self::HourOnes,
        Self::HourTens,
    ];

    const fn index(self) -> usize {
        match self {
            Self::HourTens => 0,
            Self::HourOnes => 1,
            Self::MinuteTens => 2,
            Self::MinuteOnes => 3,
        }
    }

    const fn bit(self) -> u8 {
        1 << self.index()
    }
}

/// The digit held by each tube
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TubeDigits {
    digits: [Digit; TUBE_COUNT],
}

impl TubeDigits {
    /// Show the same digit on every tube
    pub const fn uniform(digit: Digit) -> Self {
        Self {
            digits: [digit; TUBE_COUNT],
        }
    }

    /// Decimal digits of `hour:minute`
    pub const fn from_hour_minute(hour: u8, minute: u8) -> Self {
        Self {
            digits: [
                Digit::tens_of(hour),
                Digit::ones_of(hour),
                Digit::tens_of(minute),
                Digit::ones_of(minute),
            ],
        }
    }

    /// Digit at `position`
    pub const fn get(&self, position: DigitPosition) -> Digit {
        self.digits[position.index()]
    }

    /// Digits as a (hour tens, hour ones, minute tens, minute ones) tuple
    pub const fn as_tuple(&self) -> (u8, u8, u8, u8) {
        (
            self.digits[0].value(),
            self.digits[1].value(),
            self.digits[2].value(),
            self.digits[3].value(),
        )
    }
}

/// Set of tubes to keep dark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BlankMask(u8);

impl BlankMask {
    pub const NONE: Self = Self(0);
    pub const HOURS: Self = Self(DigitPosition::HourTens.bit() | DigitPosition::HourOnes.bit());
    pub const MINUTES: Self =
        Self(DigitPosition::MinuteTens.bit() | DigitPosition::MinuteOnes.bit());

    /// Mask blanking exactly one tube
    pub const fn single(position: DigitPosition) -> Self {
        Self(position.bit())
    }

    /// Mask from an optional single position
    pub const fn from_option(position: Option<DigitPosition>) -> Self {
        match position {
            Some(p) => Self::single(p),
            None => Self::NONE,
        }
    }

    /// Union of two masks
    pub const fn with(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Whether `position` is blanked
    pub const fn contains(self, position: DigitPosition) -> bool {
        self.0 & position.bit() != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// One complete display update: digits plus blanking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    pub digits: TubeDigits,
    pub blank: BlankMask,
}

impl Frame {
    pub const fn new(digits: TubeDigits, blank: BlankMask) -> Self {
        Self { digits, blank }
    }

    /// Frame with every tube lit
    pub const fn unblanked(digits: TubeDigits) -> Self {
        Self::new(digits, BlankMask::NONE)
    }

    /// Cathode lit at `position`, or `None` if the tube is dark
    pub const fn cathode(&self, position: DigitPosition) -> Option<Digit> {
        if self.blank.contains(position) {
            None
        } else {
            Some(self.digits.get(position))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_range() {
        assert_eq!(Digit::new(0), Some(Digit::ZERO));
        assert_eq!(Digit::new(9), Some(Digit::NINE));
        assert_eq!(Digit::new(10), None);
        assert_eq!(Digit::new(255), None);
    }

    #[test]
    fn test_time_digits() {
        let digits = TubeDigits::from_hour_minute(9, 5);
        assert_eq!(digits.as_tuple(), (0, 9, 0, 5));

        let digits = TubeDigits::from_hour_minute(23, 59);
        assert_eq!(digits.as_tuple(), (2, 3, 5, 9));
    }

    #[test]
    fn test_shift_order_reverses_viewer_order() {
        let mut reversed = DigitPosition::ALL;
        reversed.reverse();
        assert_eq!(reversed, DigitPosition::SHIFT_ORDER);
    }

    #[test]
    fn test_single_blank() {
        let frame = Frame::new(
            TubeDigits::from_hour_minute(4, 0),
            BlankMask::single(DigitPosition::HourTens),
        );
        assert_eq!(frame.cathode(DigitPosition::HourTens), None);
        assert_eq!(frame.cathode(DigitPosition::HourOnes), Digit::new(4));
        assert_eq!(frame.cathode(DigitPosition::MinuteTens), Some(Digit::ZERO));
        assert_eq!(frame.cathode(DigitPosition::MinuteOnes), Some(Digit::ZERO));
    }

    #[test]
    fn test_mask_union() {
        let mask = BlankMask::HOURS.with(BlankMask::single(DigitPosition::MinuteOnes));
        assert!(mask.contains(DigitPosition::HourTens));
        assert!(mask.contains(DigitPosition::HourOnes));
        assert!(!mask.contains(DigitPosition::MinuteTens));
        assert!(mask.contains(DigitPosition::MinuteOnes));
        assert!(BlankMask::from_option(None).is_empty());
    }
}
