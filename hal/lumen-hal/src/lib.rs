//! Lumen Hardware Abstraction Layer
//!
//! This crate defines the hardware seams of the LED controller so the
//! command/blink logic in `lumen-core` can run unchanged on the target
//! and on the host under test.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  lumen-firmware (bring-up, interrupts)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  lumen-core (line reader, dispatcher,   │
//! │  blink state machine)                   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  lumen-hal (this crate - traits)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  lumen-hal-stm32l4 (embassy-stm32)      │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Digital output (the LED)
//! - [`uart::UartTx`] - Serial transmit (echo and responses)
//! - [`timer::PeriodicTimer`] - Reloading tick source driving the blink

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod timer;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use gpio::OutputPin;
pub use timer::PeriodicTimer;
pub use uart::{UartConfig, UartTx};
