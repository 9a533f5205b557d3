//! Adapters from `embedded-hal` 1.0 types
//!
//! Wrap a chip HAL pin, bus or delay to use it with the clock drivers.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital;
use embedded_hal::i2c;

use crate::delay::DelayUs;
use crate::gpio::{InputPin, OutputPin};
use crate::i2c::I2cBus;

/// Output pin backed by an `embedded-hal` output
///
/// Remembers the last written level so [`OutputPin::is_set_high`] does not
/// need a stateful pin. Write errors are dropped.
pub struct EhOutput<P> {
    pin: P,
    high: bool,
}

impl<P: digital::OutputPin> EhOutput<P> {
    /// Wrap `pin` and drive it to `initial_high`
    pub fn new(pin: P, initial_high: bool) -> Self {
        let mut output = Self {
            pin,
            high: initial_high,
        };
        output.set_state(initial_high);
        output
    }

    /// Return the wrapped pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: digital::OutputPin> OutputPin for EhOutput<P> {
    fn set_high(&mut self) {
        let _ = self.pin.set_high();
        self.high = true;
    }

    fn set_low(&mut self) {
        let _ = self.pin.set_low();
        self.high = false;
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

/// Input pin backed by an `embedded-hal` input
///
/// A failed read reports HIGH, the idle level of a pulled-up button.
pub struct EhInput<P> {
    pin: P,
}

impl<P: digital::InputPin> EhInput<P> {
    /// Wrap `pin`
    pub fn new(pin: P) -> Self {
        Self { pin }
    }
}

impl<P: digital::InputPin> InputPin for EhInput<P> {
    fn is_high(&mut self) -> bool {
        self.pin.is_high().unwrap_or(true)
    }
}

/// I2C bus backed by an `embedded-hal` blocking I2C master
pub struct EhI2c<I> {
    bus: I,
}

impl<I: i2c::I2c> EhI2c<I> {
    /// Wrap `bus`
    pub fn new(bus: I) -> Self {
        Self { bus }
    }
}

impl<I: i2c::I2c> I2cBus for EhI2c<I> {
    type Error = I::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.bus.write(address, data)
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.bus.write_read(address, write_data, read_buf)
    }
}

/// Delay backed by an `embedded-hal` delay provider
pub struct EhDelay<D> {
    delay: D,
}

impl<D: DelayNs> EhDelay<D> {
    /// Wrap `delay`
    pub fn new(delay: D) -> Self {
        Self { delay }
    }
}

impl<D: DelayNs> DelayUs for EhDelay<D> {
    fn delay_us(&mut self, us: u32) {
        self.delay.delay_us(us);
    }
}
