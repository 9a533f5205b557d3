//! Embassy async tasks
//!
//! The clock runs as a single superloop task that owns all hardware.

pub mod clock;

pub use clock::{clock_task, ClockHardware, MotionHardware};
