//! Board-agnostic core logic for the Lumen LED controller
//!
//! Everything between the serial byte stream and the LED pin that does not
//! touch registers lives here, so it can be exercised on the host:
//!
//! - Line reader and the interrupt-to-foreground command handoff
//! - Command table and dispatcher
//! - Blink state machine and its lock-free state cell
//! - Timer configuration (prescaler/reload derivation)
//!
//! # Contexts
//!
//! ```text
//!  USART RX irq ──► LineReader ──► CommandSlot ──► foreground ──► Dispatcher
//!                                                                     │
//!  TIM update irq ──► BlinkMachine::on_tick ◄──── BlinkMachine::enter ◄┘
//! ```
//!
//! The only values crossing contexts are a [`line::CommandLine`] snapshot
//! (through the depth-1 [`line::CommandSlot`]) and the [`blink::LedState`]
//! tag (through [`blink::LedStateCell`]).

#![no_std]
#![deny(unsafe_code)]

pub mod blink;
pub mod command;
pub mod config;
pub mod line;

pub use blink::{BlinkMachine, LedControl, LedState, LedStateCell, Tick};
pub use command::{CommandEntry, CommandTable, Dispatch, Dispatcher};
pub use config::{ConfigError, TimerConfig, TimerSettings};
pub use line::{CommandLine, CommandSlot, Feed, LineReader};
