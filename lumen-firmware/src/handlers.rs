//! Interrupt handlers
//!
//! Both run at the same NVIC priority, so they never preempt each other;
//! only the foreground loop is ever interrupted.

use defmt::*;
use embassy_stm32::interrupt;
use lumen_core::{Feed, Tick};

use crate::channels::{BLINKER, COMMAND_SLOT, RECEIVER};
use crate::console::Console;

/// One received byte per interrupt
#[interrupt]
fn USART2() {
    RECEIVER.lock(|cell| {
        let mut cell = cell.borrow_mut();
        let Some(receiver) = cell.as_mut() else {
            return;
        };

        let byte = match receiver.rx.try_read() {
            Ok(Some(byte)) => byte,
            Ok(None) => return,
            Err(e) => {
                warn!("USART2 receive error: {}", e);
                return;
            }
        };

        match receiver.reader.feed(byte, &mut Console, &COMMAND_SLOT) {
            Feed::Published => debug!("Command line ready"),
            Feed::SlotBusy => warn!("Previous command still pending, line dropped"),
            Feed::Dropped => trace!("Line full, dropped {=u8:#x}", byte),
            Feed::Stored | Feed::Empty => {}
        }
    });
}

/// Blink period elapsed
#[interrupt]
fn TIM2() {
    let tick = BLINKER.lock(|cell| cell.borrow_mut().as_mut().map(|machine| machine.on_tick()));

    match tick {
        Some(Tick::Toggled { high }) => trace!("LED toggled, high={}", high),
        Some(Tick::Ignored(state)) => debug!("Stray blink tick in {}", state),
        None => {}
    }
}
