//! Configuration types
//!
//! The blink period is fixed; the only board-dependent input is the timer
//! clock, from which the prescaler and reload values are derived.

pub mod timer;

pub use timer::*;
