//! Board configuration
//!
//! Values come from `board.toml`, validated and turned into constants by
//! `build.rs`.

use lumen_core::TimerConfig;
use lumen_hal::UartConfig;

include!(concat!(env!("OUT_DIR"), "/board_config.rs"));

/// Blink timer derivation for the configured clock
pub const TIMER_CONFIG: TimerConfig = TimerConfig::new(SYSCLK_HZ);

/// USART2 line settings (8N1)
pub const SERIAL_CONFIG: UartConfig = UartConfig::with_baudrate(BAUDRATE);
