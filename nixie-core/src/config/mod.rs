//! Configuration types
//!
//! Board-agnostic clock configuration. The firmware loads it from a TOML
//! file at build time and bakes the validated result into the binary.

pub mod types;

pub use types::*;
