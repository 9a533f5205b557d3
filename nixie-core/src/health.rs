//! Fault tracking for polled peripherals
//!
//! A peripheral read every tick can fail every tick. [`ReadHealth`] turns
//! that stream into one report when the fault starts and one when it clears.

/// Change in a peripheral's health
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HealthChange {
    /// First failure after a good read
    Failed,
    /// Good read after `failed_polls` consecutive failures
    Recovered { failed_polls: u32 },
}

/// Consecutive-failure counter for one peripheral
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReadHealth {
    failures: u32,
}

impl ReadHealth {
    pub const fn new() -> Self {
        Self { failures: 0 }
    }

    /// Record one read; returns a change only on the edges
    pub fn record(&mut self, ok: bool) -> Option<HealthChange> {
        if ok {
            if self.failures == 0 {
                return None;
            }
            let failed_polls = self.failures;
            self.failures = 0;
            return Some(HealthChange::Recovered { failed_polls });
        }

        self.failures = self.failures.saturating_add(1);
        (self.failures == 1).then_some(HealthChange::Failed)
    }

    pub fn is_healthy(&self) -> bool {
        self.failures == 0
    }
}
