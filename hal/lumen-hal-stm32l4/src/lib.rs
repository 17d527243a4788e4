//! STM32L4-specific HAL for the Lumen LED controller
//!
//! Implements the `lumen-hal` traits on top of embassy-stm32 blocking
//! drivers. Supported chips:
//!
//! - STM32L432KC (NUCLEO-L432KC)
//!
//! # Features
//!
//! - `stm32l432kc` - Enable support for the STM32L432KC
//! - `defmt` - Enable debug formatting support
//!
//! # Board wiring (NUCLEO-L432KC)
//!
//! | Signal | Pin  | Function |
//! |--------|------|----------|
//! | LED    | PB3  | LD3, active high |
//! | TX     | PA2  | USART2_TX (AF7), to ST-LINK VCP |
//! | RX     | PA15 | USART2_RX (AF3), from ST-LINK VCP |
//! | Blink  | TIM2 | update interrupt |

#![no_std]

pub mod gpio;
pub mod timer;
pub mod uart;

pub use gpio::{ActiveLevel, Led};
pub use timer::BlinkTimer;
pub use uart::{usart_config, SerialTx, UartBusError, Usart2Rx};
