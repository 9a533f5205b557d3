//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in nixie-core, written against the nixie-hal pin and bus traits:
//!
//! - Shift-register tube bank (TPIC6B595 chain, one-hot per tube)
//! - DS3231 real-time clock

#![no_std]
#![deny(unsafe_code)]

pub mod rtc;
pub mod shift_register;

pub use rtc::{Ds3231, RtcError};
pub use shift_register::{BitOrder, ShiftRegisterConfig, ShiftRegisterDisplay};
