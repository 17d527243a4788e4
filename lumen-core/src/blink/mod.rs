//! Blink state machine
//!
//! The LED is always in exactly one of three modes. Commands move it between
//! modes from the foreground; timer ticks only ever toggle the pin while
//! blinking.

pub mod machine;
pub mod state;

pub use machine::{BlinkMachine, LedControl, Tick};
pub use state::{LedState, LedStateCell};
