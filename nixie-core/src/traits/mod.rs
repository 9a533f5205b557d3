//! Collaborator traits
//!
//! These traits define the boundary between the clock logic and the
//! hardware. Drivers in `nixie-drivers` implement them.

pub mod display;
pub mod rtc;

pub use display::TubeDisplay;
pub use rtc::TimeSource;
