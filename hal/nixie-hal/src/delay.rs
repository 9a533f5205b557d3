//! Busy-wait delays
//!
//! The shift-register bus needs microsecond settle times between edges.

/// Blocking microsecond delay
pub trait DelayUs {
    /// Pause for at least `us` microseconds
    fn delay_us(&mut self, us: u32);
}

/// Delay that returns immediately
///
/// Useful for host tests and for buses fast enough to need no settle time.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

impl DelayUs for NoDelay {
    fn delay_us(&mut self, _us: u32) {}
}
