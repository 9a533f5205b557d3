//! Nixie Clock Hardware Abstraction Layer
//!
//! This crate defines the small set of hardware traits the clock drivers are
//! written against. Chip HALs that implement `embedded-hal` 1.0 plug in
//! through the adapters in [`compat`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (nixie-firmware)           │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  nixie-drivers (shift register, DS3231) │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  nixie-hal (this crate - traits)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  any embedded-hal 1.0 implementation    │
//! │  (embassy-rp, ...) via `compat`         │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`i2c::I2cBus`] - I2C bus operations
//! - [`delay::DelayUs`] - Short busy-wait delays

#![no_std]
#![deny(unsafe_code)]

pub mod compat;
pub mod delay;
pub mod gpio;
pub mod i2c;

// Re-export key traits at crate root for convenience
pub use delay::DelayUs;
pub use gpio::{InputPin, OutputPin};
pub use i2c::I2cBus;
