//! Shared state between the interrupt handlers and the foreground loop
//!
//! Hardware owners sit behind blocking critical-section mutexes and are
//! installed once during startup, before their interrupts are unmasked.

use core::cell::RefCell;

use embassy_stm32::gpio::Output;
use embassy_stm32::mode::Blocking;
use embassy_stm32::usart;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

use lumen_core::{BlinkMachine, CommandSlot, LedState, LedStateCell, LineReader};
use lumen_hal_stm32l4::{BlinkTimer, Led, SerialTx, Usart2Rx};

/// The board LED behind its active-level wrapper
pub type BoardLed = Led<Output<'static>>;

/// Blink machine wired to the board LED and TIM2
pub type BoardBlinker = BlinkMachine<'static, BoardLed, BlinkTimer>;

/// USART2 transmit half
pub type BoardSerialTx = SerialTx<usart::UartTx<'static, Blocking>>;

/// USART2 receive half plus the line being assembled
pub struct Receiver {
    pub rx: Usart2Rx,
    pub reader: LineReader,
}

/// Completed command line, RX interrupt to foreground
pub static COMMAND_SLOT: CommandSlot = CommandSlot::new();

/// Current LED mode, read by the TIM2 interrupt
pub static LED_STATE: LedStateCell = LedStateCell::new(LedState::Off);

/// LED pin and blink timer (TIM2 interrupt and foreground)
pub static BLINKER: Mutex<CriticalSectionRawMutex, RefCell<Option<BoardBlinker>>> =
    Mutex::new(RefCell::new(None));

/// Console output (USART2 interrupt echo and foreground responses)
pub static SERIAL_TX: Mutex<CriticalSectionRawMutex, RefCell<Option<BoardSerialTx>>> =
    Mutex::new(RefCell::new(None));

/// Console input (USART2 interrupt only)
pub static RECEIVER: Mutex<CriticalSectionRawMutex, RefCell<Option<Receiver>>> =
    Mutex::new(RefCell::new(None));
