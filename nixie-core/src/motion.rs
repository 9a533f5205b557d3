//! Motion-gated display power
//!
//! The display is switched off after a stretch without motion and back on
//! as soon as the PIR sensor reports motion again.

/// Motion gate state
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionGate {
    timeout_ms: u32,
    armed_at_ms: Option<u32>,
    display_on: bool,
}

impl MotionGate {
    /// New gate; the display starts powered
    pub const fn new(timeout_ms: u32) -> Self {
        Self {
            timeout_ms,
            armed_at_ms: None,
            display_on: true,
        }
    }

    /// Gate with the timeout given in minutes
    pub const fn from_minutes(minutes: u16) -> Self {
        Self::new(minutes as u32 * 60_000)
    }

    pub fn display_on(&self) -> bool {
        self.display_on
    }

    /// Feed one sensor sample
    ///
    /// Returns the new display power level when it changes. Motion re-arms
    /// the timeout; so does switching off.
    pub fn poll(&mut self, motion: bool, now_ms: u32) -> Option<bool> {
        let armed_at = *self.armed_at_ms.get_or_insert(now_ms);

        if motion {
            self.armed_at_ms = Some(now_ms);
            if !self.display_on {
                self.display_on = true;
                return Some(true);
            }
            return None;
        }

        if now_ms.wrapping_sub(armed_at) >= self.timeout_ms {
            self.armed_at_ms = Some(now_ms);
            if self.display_on {
                self.display_on = false;
                return Some(false);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINUTE: u32 = 60_000;

    #[test]
    fn test_turns_off_after_timeout() {
        let mut gate = MotionGate::from_minutes(60);
        assert_eq!(gate.poll(false, 0), None);
        assert_eq!(gate.poll(false, 60 * MINUTE - 1), None);
        assert!(gate.display_on());
        assert_eq!(gate.poll(false, 60 * MINUTE), Some(false));
        assert!(!gate.display_on());
        // Only reported once
        assert_eq!(gate.poll(false, 120 * MINUTE), None);
    }

    #[test]
    fn test_motion_turns_back_on() {
        let mut gate = MotionGate::new(1000);
        gate.poll(false, 0);
        assert_eq!(gate.poll(false, 1000), Some(false));
        assert_eq!(gate.poll(true, 1500), Some(true));
        assert_eq!(gate.poll(true, 1600), None);
    }

    #[test]
    fn test_motion_rearms_timeout() {
        let mut gate = MotionGate::new(1000);
        gate.poll(false, 0);
        gate.poll(true, 900);
        assert_eq!(gate.poll(false, 1500), None);
        assert_eq!(gate.poll(false, 1900), Some(false));
    }

    #[test]
    fn test_timer_wraps() {
        let mut gate = MotionGate::new(1000);
        let start = u32::MAX - 10;
        gate.poll(false, start);
        assert_eq!(gate.poll(false, start.wrapping_add(999)), None);
        assert_eq!(gate.poll(false, start.wrapping_add(1000)), Some(false));
    }
}
