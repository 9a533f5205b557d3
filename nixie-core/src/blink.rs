//! Square-wave blinking for the field being edited

/// Blinks with a fixed period measured from one reference timestamp
///
/// Visible for the first half of each period, dark for the second.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Blinker {
    period_ms: u32,
    reference_ms: u32,
}

impl Blinker {
    pub const fn new(period_ms: u32) -> Self {
        Self {
            period_ms: if period_ms == 0 { 1 } else { period_ms },
            reference_ms: 0,
        }
    }

    /// Restart the phase so the field is visible at `now_ms`
    pub fn restart(&mut self, now_ms: u32) {
        self.reference_ms = now_ms;
    }

    pub fn visible(&self, now_ms: u32) -> bool {
        let phase = now_ms.wrapping_sub(self.reference_ms) % self.period_ms;
        phase < self.period_ms / 2
    }
}
