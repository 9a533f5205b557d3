//! Clock configuration
//!
//! Generated by build.rs from clock.toml, which it has already validated.

#[allow(unused_imports)]
use nixie_core::config::{ButtonLayout, ClockConfig, ConditioningConfig, MotionConfig};

include!(concat!(env!("OUT_DIR"), "/clock_config.rs"));
