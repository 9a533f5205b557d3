//! Shift-register tube bank
//!
//! Each tube hangs off its own 10-bit slice of a TPIC6B595 chain, one output
//! per cathode. A digit is sent one-hot: exactly one bit of the slice is
//! set, or none for a dark tube.
//!
//! # Bus sequence
//!
//! ```text
//! latch  ‾‾\_____________________________________/‾‾‾
//! data   ----< b0 >< b1 >  ...  < b39 >-------------
//! clock  ______/‾\___/‾\__  ...  __/‾\_______________
//! ```
//!
//! The first tube shifted ends up in the register furthest from the MCU,
//! so tubes are sent minutes-ones first.

use nixie_core::display::{BlankMask, Digit, DigitPosition, Frame, TubeDigits, CATHODE_COUNT};
use nixie_core::traits::TubeDisplay;
use nixie_hal::{DelayUs, OutputPin};

/// Master-reset pulse width (µs)
pub const RESET_PULSE_US: u32 = 10;

/// Order bits leave the MCU within a tube's slice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BitOrder {
    /// Cathode 0 first
    #[default]
    LsbFirst,
    /// Cathode 9 first
    MsbFirst,
}

/// Bus timing and layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ShiftRegisterConfig {
    pub order: BitOrder,
    /// Bits per tube
    pub width: u8,
    /// Settle time after each data write (µs), 0 to skip
    pub settle_us: u32,
}

impl Default for ShiftRegisterConfig {
    fn default() -> Self {
        Self {
            order: BitOrder::LsbFirst,
            width: CATHODE_COUNT,
            settle_us: 10,
        }
    }
}

/// Shift one tube's one-hot slice out on `data`/`clock`
///
/// `None` keeps data low for every pulse, leaving the tube dark.
pub fn shift_out_one_hot<D, C, Dl>(
    data: &mut D,
    clock: &mut C,
    delay: &mut Dl,
    cathode: Option<Digit>,
    config: &ShiftRegisterConfig,
) where
    D: OutputPin,
    C: OutputPin,
    Dl: DelayUs,
{
    let width = config.width;
    for i in 0..width {
        let bit = match config.order {
            BitOrder::LsbFirst => i,
            BitOrder::MsbFirst => width - 1 - i,
        };
        let lit = cathode.is_some_and(|d| d.value() == bit);
        data.set_state(lit);
        if config.settle_us > 0 {
            delay.delay_us(config.settle_us);
        }
        clock.set_high();
        clock.set_low();
    }
}

/// Four tubes behind a shift-register chain
pub struct ShiftRegisterDisplay<D, C, L, R, Dl> {
    data: D,
    clock: C,
    latch: L,
    reset: R,
    delay: Dl,
    config: ShiftRegisterConfig,
}

impl<D, C, L, R, Dl> ShiftRegisterDisplay<D, C, L, R, Dl>
where
    D: OutputPin,
    C: OutputPin,
    L: OutputPin,
    R: OutputPin,
    Dl: DelayUs,
{
    pub fn new(data: D, clock: C, latch: L, reset: R, delay: Dl, config: ShiftRegisterConfig) -> Self {
        let mut display = Self {
            data,
            clock,
            latch,
            reset,
            delay,
            config,
        };
        display.data.set_low();
        display.clock.set_low();
        display.latch.set_high();
        display.reset.set_high();
        display
    }

    /// Pulse master reset to clear every register
    pub fn reset(&mut self) {
        self.reset.set_low();
        self.delay.delay_us(RESET_PULSE_US);
        self.reset.set_high();
    }

    /// Show `digits`, leaving at most one position dark
    pub fn render_digits(&mut self, digits: TubeDigits, blanked: Option<DigitPosition>) {
        let frame = Frame::new(digits, BlankMask::from_option(blanked));
        self.render(&frame);
    }
}

impl<D, C, L, R, Dl> TubeDisplay for ShiftRegisterDisplay<D, C, L, R, Dl>
where
    D: OutputPin,
    C: OutputPin,
    L: OutputPin,
    R: OutputPin,
    Dl: DelayUs,
{
    fn render(&mut self, frame: &Frame) {
        self.latch.set_low();
        for position in DigitPosition::SHIFT_ORDER {
            shift_out_one_hot(
                &mut self.data,
                &mut self.clock,
                &mut self.delay,
                frame.cathode(position),
                &self.config,
            );
        }
        self.latch.set_high();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::RefCell;
    use heapless::Vec;
    use nixie_hal::delay::NoDelay;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Line {
        Data,
        Clock,
        Latch,
        Reset,
    }

    type Log = RefCell<Vec<(Line, bool), 512>>;

    /// Pin that records every write into a shared log
    struct RecordingPin<'a> {
        line: Line,
        high: bool,
        log: &'a Log,
    }

    impl<'a> RecordingPin<'a> {
        fn new(line: Line, log: &'a Log) -> Self {
            Self {
                line,
                high: false,
                log,
            }
        }
    }

    impl OutputPin for RecordingPin<'_> {
        fn set_high(&mut self) {
            self.high = true;
            let _ = self.log.borrow_mut().push((self.line, true));
        }

        fn set_low(&mut self) {
            self.high = false;
            let _ = self.log.borrow_mut().push((self.line, false));
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    struct CountingDelay<'a>(&'a RefCell<u32>);

    impl DelayUs for CountingDelay<'_> {
        fn delay_us(&mut self, us: u32) {
            *self.0.borrow_mut() += us;
        }
    }

    fn display(log: &Log, config: ShiftRegisterConfig) -> ShiftRegisterDisplay<
        RecordingPin<'_>,
        RecordingPin<'_>,
        RecordingPin<'_>,
        RecordingPin<'_>,
        NoDelay,
    > {
        let display = ShiftRegisterDisplay::new(
            RecordingPin::new(Line::Data, log),
            RecordingPin::new(Line::Clock, log),
            RecordingPin::new(Line::Latch, log),
            RecordingPin::new(Line::Reset, log),
            NoDelay,
            config,
        );
        log.borrow_mut().clear();
        display
    }

    /// Data level sampled on each rising clock edge
    fn clocked_bits(log: &Log) -> Vec<bool, 64> {
        let mut data = false;
        let mut bits = Vec::new();
        for &(line, high) in log.borrow().iter() {
            match line {
                Line::Data => data = high,
                Line::Clock if high => {
                    let _ = bits.push(data);
                }
                _ => {}
            }
        }
        bits
    }

    /// Lit cathode per tube slice, in shift order
    fn lit_per_slice(bits: &[bool]) -> Vec<Option<u8>, 4> {
        bits.chunks(10)
            .map(|slice| {
                let lit: Vec<u8, 10> = (0..10u8).filter(|&i| slice[i as usize]).collect();
                assert!(lit.len() <= 1, "slice is not one-hot");
                lit.first().copied()
            })
            .collect()
    }

    #[test]
    fn test_one_hot_lsb_first() {
        let log = Log::default();
        let mut data = RecordingPin::new(Line::Data, &log);
        let mut clock = RecordingPin::new(Line::Clock, &log);
        let config = ShiftRegisterConfig::default();

        shift_out_one_hot(&mut data, &mut clock, &mut NoDelay, Digit::new(3), &config);

        let bits = clocked_bits(&log);
        assert_eq!(bits.len(), 10);
        for (i, bit) in bits.iter().enumerate() {
            assert_eq!(*bit, i == 3);
        }
        assert!(!clock.is_set_high());
    }

    #[test]
    fn test_one_hot_msb_first() {
        let log = Log::default();
        let mut data = RecordingPin::new(Line::Data, &log);
        let mut clock = RecordingPin::new(Line::Clock, &log);
        let config = ShiftRegisterConfig {
            order: BitOrder::MsbFirst,
            ..Default::default()
        };

        shift_out_one_hot(&mut data, &mut clock, &mut NoDelay, Digit::new(3), &config);

        let bits = clocked_bits(&log);
        for (i, bit) in bits.iter().enumerate() {
            assert_eq!(*bit, i == 6);
        }
    }

    #[test]
    fn test_blank_keeps_data_low() {
        let log = Log::default();
        let mut data = RecordingPin::new(Line::Data, &log);
        let mut clock = RecordingPin::new(Line::Clock, &log);

        shift_out_one_hot(
            &mut data,
            &mut clock,
            &mut NoDelay,
            None,
            &ShiftRegisterConfig::default(),
        );

        let bits = clocked_bits(&log);
        assert_eq!(bits.len(), 10);
        assert!(bits.iter().all(|b| !b));
    }

    #[test]
    fn test_settle_delay_per_bit() {
        let log = Log::default();
        let waited = RefCell::new(0);
        let mut data = RecordingPin::new(Line::Data, &log);
        let mut clock = RecordingPin::new(Line::Clock, &log);

        shift_out_one_hot(
            &mut data,
            &mut clock,
            &mut CountingDelay(&waited),
            Digit::new(0),
            &ShiftRegisterConfig::default(),
        );
        assert_eq!(*waited.borrow(), 100);

        let no_settle = ShiftRegisterConfig {
            settle_us: 0,
            ..Default::default()
        };
        shift_out_one_hot(
            &mut data,
            &mut clock,
            &mut CountingDelay(&waited),
            Digit::new(0),
            &no_settle,
        );
        assert_eq!(*waited.borrow(), 100);
    }

    #[test]
    fn test_render_shift_order_inside_latch() {
        let log = Log::default();
        let mut display = display(&log, ShiftRegisterConfig::default());

        display.render(&Frame::unblanked(TubeDigits::from_hour_minute(12, 34)));

        let entries = log.borrow();
        assert_eq!(entries.first(), Some(&(Line::Latch, false)));
        assert_eq!(entries.last(), Some(&(Line::Latch, true)));
        drop(entries);

        let bits = clocked_bits(&log);
        assert_eq!(bits.len(), 40);
        // Minutes-ones first, hour-tens last
        assert_eq!(
            lit_per_slice(&bits).as_slice(),
            &[Some(4), Some(3), Some(2), Some(1)]
        );
    }

    #[test]
    fn test_render_blanked_hour_tens() {
        let log = Log::default();
        let mut display = display(&log, ShiftRegisterConfig::default());

        display.render_digits(
            TubeDigits::from_hour_minute(4, 0),
            Some(DigitPosition::HourTens),
        );

        let bits = clocked_bits(&log);
        assert_eq!(
            lit_per_slice(&bits).as_slice(),
            &[Some(0), Some(0), Some(4), None]
        );
    }

    #[test]
    fn test_render_full_mask() {
        let log = Log::default();
        let mut display = display(&log, ShiftRegisterConfig::default());

        display.render(&Frame::new(
            TubeDigits::uniform(Digit::NINE),
            BlankMask::HOURS.with(BlankMask::MINUTES),
        ));

        assert!(clocked_bits(&log).iter().all(|b| !b));
    }

    #[test]
    fn test_reset_pulse() {
        let log = Log::default();
        let mut display = display(&log, ShiftRegisterConfig::default());

        display.reset();

        assert_eq!(
            log.borrow().as_slice(),
            &[(Line::Reset, false), (Line::Reset, true)]
        );
    }
}
