//! Board-agnostic core logic for the nixie clock firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Display data model (digits, tube positions, blanking)
//! - Time-of-day types and digit decomposition
//! - Button debouncing
//! - Time setting menu state machine
//! - Cathode conditioning sweep
//! - Motion-gated display power
//! - Fault edge tracking for polled peripherals
//! - Configuration type definitions
//! - Collaborator traits (tube display, time source)
//! - The polled clock controller tying it all together

#![no_std]
#![deny(unsafe_code)]

pub mod blink;
pub mod conditioning;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod display;
pub mod health;
pub mod menu;
pub mod motion;
pub mod time;
pub mod traits;
