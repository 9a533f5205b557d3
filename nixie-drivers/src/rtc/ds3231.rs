//! DS3231 real-time clock (I2C)
//!
//! Time is kept in seven BCD registers starting at 0x00:
//!
//! | Reg  | Contents                                      |
//! |------|-----------------------------------------------|
//! | 0x00 | seconds                                       |
//! | 0x01 | minutes                                       |
//! | 0x02 | hours; bit 6 = 12-hour mode, bit 5 = PM there |
//! | 0x03 | day of week, 1-7                              |
//! | 0x04 | day of month                                  |
//! | 0x05 | month; bit 7 = century                        |
//! | 0x06 | year within the century                       |
//!
//! The driver always writes 24-hour mode but decodes either on read.

use nixie_core::time::{ClockTime, DateTime};
use nixie_core::traits::TimeSource;
use nixie_hal::I2cBus;

/// 7-bit bus address
pub const DS3231_ADDRESS: u8 = 0x68;

/// Register addresses
pub mod reg {
    pub const SECONDS: u8 = 0x00;
    pub const MINUTES: u8 = 0x01;
    pub const HOURS: u8 = 0x02;
    pub const WEEKDAY: u8 = 0x03;
    pub const DAY: u8 = 0x04;
    pub const MONTH: u8 = 0x05;
    pub const YEAR: u8 = 0x06;
    pub const CONTROL: u8 = 0x0E;
    pub const STATUS: u8 = 0x0F;
}

const HOUR_12_MODE: u8 = 1 << 6;
const HOUR_PM: u8 = 1 << 5;
const CENTURY: u8 = 1 << 7;
/// Oscillator stopped since the flag was last cleared
const STATUS_OSF: u8 = 1 << 7;

/// RTC errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RtcError<E> {
    /// I2C transfer failed
    Bus(E),
    /// Registers hold an impossible date or time
    InvalidData,
}

/// Decode one BCD byte, `None` if either nibble is above 9
pub const fn bcd_to_bin(bcd: u8) -> Option<u8> {
    let (tens, ones) = (bcd >> 4, bcd & 0x0F);
    if tens > 9 || ones > 9 {
        return None;
    }
    Some(tens * 10 + ones)
}

pub const fn bin_to_bcd(value: u8) -> u8 {
    ((value / 10) << 4) | (value % 10)
}

/// Decode the hours register in either mode
pub fn decode_hour(raw: u8) -> Option<u8> {
    if raw & HOUR_12_MODE == 0 {
        let hour = bcd_to_bin(raw & 0x3F)?;
        return (hour < 24).then_some(hour);
    }

    let hour = bcd_to_bin(raw & 0x1F)?;
    if !(1..=12).contains(&hour) {
        return None;
    }
    let pm = raw & HOUR_PM != 0;
    Some(match (hour, pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, false) => h,
        (h, true) => h + 12,
    })
}

/// Decode registers 0x00..=0x06
pub fn decode<E>(regs: &[u8; 7]) -> Result<DateTime, RtcError<E>> {
    let bin = |bcd: u8| -> Result<u8, RtcError<E>> { bcd_to_bin(bcd).ok_or(RtcError::InvalidData) };

    let second = bin(regs[0] & 0x7F)?;
    let minute = bin(regs[1] & 0x7F)?;
    let hour = decode_hour(regs[2]).ok_or(RtcError::InvalidData)?;
    let time = ClockTime::new(hour, minute, second).ok_or(RtcError::InvalidData)?;

    let day = bin(regs[4] & 0x3F)?;
    let month = bin(regs[5] & 0x1F)?;
    if !(1..=31).contains(&day) || !(1..=12).contains(&month) {
        return Err(RtcError::InvalidData);
    }

    let century = if regs[5] & CENTURY != 0 { 2100 } else { 2000 };
    let year = century + bin(regs[6])? as u16;

    Ok(DateTime::new(year, month, day, time))
}

/// Encode a date and time as registers 0x00..=0x06 (24-hour mode)
///
/// Years outside 2000-2199 are clamped.
pub fn encode(datetime: &DateTime) -> [u8; 7] {
    let year = datetime.year.clamp(2000, 2199);
    let century = if year >= 2100 { CENTURY } else { 0 };
    let time = datetime.time;

    [
        bin_to_bcd(time.second()),
        bin_to_bcd(time.minute()),
        bin_to_bcd(time.hour()),
        datetime.weekday() + 1,
        bin_to_bcd(datetime.day),
        bin_to_bcd(datetime.month) | century,
        bin_to_bcd((year % 100) as u8),
    ]
}

/// DS3231 driver
pub struct Ds3231<I> {
    i2c: I,
}

impl<I: I2cBus> Ds3231<I> {
    pub fn new(i2c: I) -> Self {
        Self { i2c }
    }

    /// Release the bus
    pub fn release(self) -> I {
        self.i2c
    }

    /// Check the chip answers on the bus
    pub fn probe(&mut self) -> Result<(), RtcError<I::Error>> {
        self.read_register(reg::CONTROL).map(|_| ())
    }

    /// Whether the oscillator stopped (e.g. battery ran flat), meaning the
    /// time can't be trusted
    pub fn lost_power(&mut self) -> Result<bool, RtcError<I::Error>> {
        Ok(self.read_register(reg::STATUS)? & STATUS_OSF != 0)
    }

    fn read_register(&mut self, register: u8) -> Result<u8, RtcError<I::Error>> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(DS3231_ADDRESS, &[register], &mut buf)
            .map_err(RtcError::Bus)?;
        Ok(buf[0])
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), RtcError<I::Error>> {
        self.i2c
            .write(DS3231_ADDRESS, &[register, value])
            .map_err(RtcError::Bus)
    }
}

impl<I: I2cBus> TimeSource for Ds3231<I> {
    type Error = RtcError<I::Error>;

    fn now(&mut self) -> Result<DateTime, Self::Error> {
        let mut regs = [0u8; 7];
        self.i2c
            .write_read(DS3231_ADDRESS, &[reg::SECONDS], &mut regs)
            .map_err(RtcError::Bus)?;
        decode(&regs)
    }

    fn adjust(&mut self, datetime: &DateTime) -> Result<(), Self::Error> {
        let regs = encode(datetime);
        let mut frame = [0u8; 8];
        frame[0] = reg::SECONDS;
        frame[1..].copy_from_slice(&regs);
        self.i2c
            .write(DS3231_ADDRESS, &frame)
            .map_err(RtcError::Bus)?;

        // A valid time is set; clear the oscillator-stop flag
        let status = self.read_register(reg::STATUS)?;
        self.write_register(reg::STATUS, status & !STATUS_OSF)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct NoAck;

    /// Register-file model of the chip
    struct MockBus {
        regs: [u8; 0x13],
        fail: bool,
    }

    impl MockBus {
        fn new() -> Self {
            Self {
                regs: [0; 0x13],
                fail: false,
            }
        }

        fn with_time(regs: [u8; 7]) -> Self {
            let mut bus = Self::new();
            bus.regs[..7].copy_from_slice(&regs);
            bus
        }
    }

    impl I2cBus for MockBus {
        type Error = NoAck;

        fn write(&mut self, address: u8, data: &[u8]) -> Result<(), NoAck> {
            if self.fail || address != DS3231_ADDRESS {
                return Err(NoAck);
            }
            let start = data[0] as usize;
            self.regs[start..start + data.len() - 1].copy_from_slice(&data[1..]);
            Ok(())
        }

        fn write_read(
            &mut self,
            address: u8,
            write_data: &[u8],
            read_buf: &mut [u8],
        ) -> Result<(), NoAck> {
            if self.fail || address != DS3231_ADDRESS {
                return Err(NoAck);
            }
            let start = write_data[0] as usize;
            read_buf.copy_from_slice(&self.regs[start..start + read_buf.len()]);
            Ok(())
        }
    }

    #[test]
    fn test_bcd() {
        assert_eq!(bin_to_bcd(59), 0x59);
        assert_eq!(bcd_to_bin(0x59), Some(59));
        for v in 0..100 {
            assert_eq!(bcd_to_bin(bin_to_bcd(v)), Some(v));
        }
        assert_eq!(bcd_to_bin(0x1A), None);
        assert_eq!(bcd_to_bin(0xA1), None);
    }

    #[test]
    fn test_read_24_hour() {
        // 2024-03-09 21:07:45
        let mut rtc = Ds3231::new(MockBus::with_time([0x45, 0x07, 0x21, 0x07, 0x09, 0x03, 0x24]));
        let now = rtc.now().unwrap();
        assert_eq!((now.year, now.month, now.day), (2024, 3, 9));
        assert_eq!(now.time, ClockTime::new(21, 7, 45).unwrap());
    }

    #[test]
    fn test_decode_12_hour_mode() {
        assert_eq!(decode_hour(HOUR_12_MODE | 0x12), Some(0)); // 12 AM
        assert_eq!(decode_hour(HOUR_12_MODE | 0x01), Some(1));
        assert_eq!(decode_hour(HOUR_12_MODE | HOUR_PM | 0x12), Some(12));
        assert_eq!(decode_hour(HOUR_12_MODE | HOUR_PM | 0x11), Some(23));
        assert_eq!(decode_hour(HOUR_12_MODE | 0x00), None);
        assert_eq!(decode_hour(HOUR_12_MODE | 0x13), None);
        assert_eq!(decode_hour(0x23), Some(23));
        assert_eq!(decode_hour(0x24), None);
    }

    #[test]
    fn test_invalid_registers() {
        // 61 seconds
        let regs = [0x61, 0x00, 0x00, 0x01, 0x01, 0x01, 0x00];
        assert_eq!(decode::<NoAck>(&regs), Err(RtcError::InvalidData));
        // Month 13
        let regs = [0x00, 0x00, 0x00, 0x01, 0x01, 0x13, 0x00];
        assert_eq!(decode::<NoAck>(&regs), Err(RtcError::InvalidData));
        // Day 0
        let regs = [0x00, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00];
        assert_eq!(decode::<NoAck>(&regs), Err(RtcError::InvalidData));
    }

    #[test]
    fn test_every_time_of_day_survives_the_chip() {
        let mut rtc = Ds3231::new(MockBus::new());
        for hour in 0..24 {
            for minute in 0..60 {
                let time = ClockTime::new(hour, minute, minute).unwrap();
                let datetime = DateTime::new(2031, 12, 31, time);
                rtc.adjust(&datetime).unwrap();
                assert_eq!(rtc.now().unwrap(), datetime);
            }
        }
    }

    #[test]
    fn test_adjust_writes_24_hour_and_weekday() {
        let mut rtc = Ds3231::new(MockBus::new());
        // 2024-03-09 is a Saturday
        let datetime = DateTime::new(2024, 3, 9, ClockTime::new(15, 30, 0).unwrap());
        rtc.adjust(&datetime).unwrap();

        let bus = rtc.release();
        assert_eq!(bus.regs[reg::HOURS as usize], 0x15);
        assert_eq!(bus.regs[reg::HOURS as usize] & HOUR_12_MODE, 0);
        assert_eq!(bus.regs[reg::WEEKDAY as usize], 7);
        assert_eq!(bus.regs[reg::YEAR as usize], 0x24);
    }

    #[test]
    fn test_adjust_clears_oscillator_flag() {
        let mut bus = MockBus::new();
        bus.regs[reg::STATUS as usize] = STATUS_OSF | 0x08;
        let mut rtc = Ds3231::new(bus);
        assert_eq!(rtc.lost_power(), Ok(true));

        rtc.adjust(&DateTime::new(2025, 1, 1, ClockTime::MIDNIGHT)).unwrap();
        assert_eq!(rtc.lost_power(), Ok(false));
        // Other status bits are left alone
        assert_eq!(rtc.release().regs[reg::STATUS as usize], 0x08);
    }

    #[test]
    fn test_rejects_non_bcd_nibbles() {
        // Seconds 0x1A
        let regs = [0x1A, 0x00, 0x00, 0x01, 0x01, 0x01, 0x00];
        assert_eq!(decode::<NoAck>(&regs), Err(RtcError::InvalidData));
        // Year 0xF0
        let regs = [0x00, 0x00, 0x00, 0x01, 0x01, 0x01, 0xF0];
        assert_eq!(decode::<NoAck>(&regs), Err(RtcError::InvalidData));
        // Hour 0x0B in either mode
        assert_eq!(decode_hour(0x0B), None);
        assert_eq!(decode_hour(HOUR_12_MODE | 0x0B), None);
    }

    #[test]
    fn test_century_bit() {
        let regs = encode(&DateTime::new(2105, 6, 1, ClockTime::MIDNIGHT));
        assert_eq!(regs[5], CENTURY | 0x06);
        assert_eq!(decode::<NoAck>(&regs).unwrap().year, 2105);
    }

    #[test]
    fn test_bus_errors_propagate() {
        let mut bus = MockBus::new();
        bus.fail = true;
        let mut rtc = Ds3231::new(bus);
        assert_eq!(rtc.probe(), Err(RtcError::Bus(NoAck)));
        assert_eq!(rtc.now(), Err(RtcError::Bus(NoAck)));
    }
}
