//! Lumen - serial-controlled LED firmware
//!
//! Runs on the NUCLEO-L432KC. Commands typed on the ST-LINK virtual COM
//! port (`on`, `off`, `blink`, `stop`) switch the user LED between steady
//! and blinking modes.
//!
//! Two interrupts do the time-critical work: USART2 assembles lines and
//! TIM2 toggles the LED while blinking. The foreground only dispatches
//! completed lines and otherwise sleeps.

#![no_std]
#![no_main]

use defmt::*;
use embassy_stm32::gpio::{Level, Output, Speed};
use embassy_stm32::interrupt;
use embassy_stm32::interrupt::{InterruptExt, Priority};
use embassy_stm32::usart::Uart;
use {defmt_rtt as _, panic_probe as _};

use lumen_core::command::BANNER;
use lumen_core::{BlinkMachine, CommandTable, Dispatch, Dispatcher, LineReader};
use lumen_hal::UartTx;
use lumen_hal_stm32l4::{usart_config, BlinkTimer, Led, SerialTx, Usart2Rx};

use crate::channels::{Receiver, BLINKER, COMMAND_SLOT, LED_STATE, RECEIVER, SERIAL_TX};
use crate::console::{Console, SharedBlinker};

mod board;
mod channels;
mod console;
mod handlers;

/// NVIC priority shared by the USART2 and TIM2 handlers
const IRQ_PRIORITY: Priority = Priority::P1;

/// Main entry point
#[cortex_m_rt::entry]
fn main() -> ! {
    info!("Lumen firmware starting...");

    // Reset clock tree: MSI at 4 MHz drives SYSCLK and the timer kernel
    let p = embassy_stm32::init(Default::default());
    info!("Peripherals initialized");

    // Derive blink timer registers from board.toml
    let settings = unwrap!(board::TIMER_CONFIG.settings());
    info!(
        "Blink timer: {} Hz / ({} + 1) / ({} + 1)",
        board::SYSCLK_HZ,
        settings.prescaler,
        settings.reload
    );

    // LD3 on PB3, off at reset
    let led = Led::active_high(Output::new(p.PB3, Level::Low, Speed::Low));
    let timer = BlinkTimer::new(p.TIM2, settings.prescaler, settings.reload);

    let input_clock = timer.input_clock().0;
    if input_clock != board::SYSCLK_HZ {
        warn!(
            "TIM2 clock is {} Hz but board.toml says {} Hz, blink period will be off",
            input_clock,
            board::SYSCLK_HZ
        );
    }

    // Installed before TIM2 is unmasked so the handler always finds it
    let blinker = BlinkMachine::new(&LED_STATE, led, timer);
    BLINKER.lock(|cell| *cell.borrow_mut() = Some(blinker));
    info!("Blink machine installed");

    // USART2 on the ST-LINK VCP: TX PA2 (AF7), RX PA15 (AF3)
    let uart_config = usart_config(&board::SERIAL_CONFIG);
    let uart = unwrap!(Uart::new_blocking(p.USART2, p.PA15, p.PA2, uart_config));
    let (tx, rx) = uart.split();

    let mut rx = Usart2Rx::new(rx);
    rx.listen();

    SERIAL_TX.lock(|cell| *cell.borrow_mut() = Some(SerialTx::new(tx)));
    RECEIVER.lock(|cell| {
        *cell.borrow_mut() = Some(Receiver {
            rx,
            reader: LineReader::new(),
        })
    });
    info!("USART2 initialized at {} baud", board::SERIAL_CONFIG.baudrate);

    if let Err(e) = Console.write_str(BANNER) {
        warn!("Failed to write banner: {}", e);
    }

    interrupt::USART2.set_priority(IRQ_PRIORITY);
    interrupt::TIM2.set_priority(IRQ_PRIORITY);
    // Safety: both handlers only touch state installed above
    unsafe {
        interrupt::USART2.enable();
        interrupt::TIM2.enable();
    }
    info!("Interrupts enabled, waiting for commands");

    let dispatcher = Dispatcher::new(unwrap!(CommandTable::standard()));
    let mut led = SharedBlinker;
    let mut console = Console;

    loop {
        match COMMAND_SLOT.take() {
            Some(line) => match dispatcher.dispatch(line.as_bytes(), &mut led, &mut console) {
                Dispatch::Applied { token, state } => info!("Command '{}' -> {}", token, state),
                Dispatch::Unknown => warn!("Unknown command: {}", line),
                Dispatch::Empty => {}
            },
            None => {
                // Check and sleep with interrupts masked; a pending IRQ still wakes WFI
                cortex_m::interrupt::free(|_| {
                    if !COMMAND_SLOT.is_ready() {
                        cortex_m::asm::wfi();
                    }
                });
            }
        }
    }
}
