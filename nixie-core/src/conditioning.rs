//! Cathode conditioning sweep
//!
//! Cycles every tube through 0..9 and back down to 1 so that unused
//! cathodes stay clean. The sweep is polled: each call reports whether the
//! shown digit changed, and it only finishes on a cycle boundary.

use crate::display::Digit;

/// Steps in one sweep cycle: 0..=9 up, then 8..=1 down
pub const SWEEP_STEPS: u32 = 18;

/// Digit shown at `step` within a cycle (`step` taken modulo the cycle)
pub const fn sweep_digit(step: u32) -> Digit {
    let step = step % SWEEP_STEPS;
    if step <= 9 {
        Digit::ones_of(step as u8)
    } else {
        Digit::ones_of((SWEEP_STEPS - step) as u8)
    }
}

/// Result of polling the conditioner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SweepStep {
    /// No sweep running
    Idle,
    /// Sweep moved to a new digit; render it on all tubes
    Show(Digit),
    /// Sweep running, digit unchanged
    Hold,
    /// Sweep just completed (reported once)
    Done,
}

#[derive(Debug, Clone, Copy)]
struct Run {
    started_at_ms: u32,
    duration_ms: u32,
    digit_delay_ms: u32,
    last_step: Option<u32>,
}

/// Polled cathode conditioner
#[derive(Debug, Clone, Default)]
pub struct CathodeConditioner {
    run: Option<Run>,
}

impl CathodeConditioner {
    pub const fn new() -> Self {
        Self { run: None }
    }

    /// Start (or restart) a sweep
    ///
    /// A new cycle begins only while the elapsed time at its start is at
    /// most `duration_ms`, so the sweep may overrun by up to one cycle.
    pub fn start(&mut self, now_ms: u32, duration_ms: u32, digit_delay_ms: u32) {
        self.run = Some(Run {
            started_at_ms: now_ms,
            duration_ms,
            digit_delay_ms: digit_delay_ms.max(1),
            last_step: None,
        });
    }

    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    pub fn poll(&mut self, now_ms: u32) -> SweepStep {
        let Some(run) = self.run.as_mut() else {
            return SweepStep::Idle;
        };

        let elapsed = now_ms.wrapping_sub(run.started_at_ms);
        let step = elapsed / run.digit_delay_ms;
        let cycle_ms = SWEEP_STEPS.saturating_mul(run.digit_delay_ms);
        let cycle_start = (step / SWEEP_STEPS).saturating_mul(cycle_ms);

        if cycle_start > run.duration_ms {
            self.run = None;
            return SweepStep::Done;
        }

        if run.last_step == Some(step) {
            return SweepStep::Hold;
        }
        run.last_step = Some(step);
        SweepStep::Show(sweep_digit(step))
    }
}
