//! Handles onto the shared hardware
//!
//! Both are zero-sized and take their lock per operation, so neither
//! context holds a critical section for longer than one byte or one
//! mode change.

use defmt::*;
use lumen_core::{LedControl, LedState};
use lumen_hal::UartTx;
use lumen_hal_stm32l4::UartBusError;

use crate::channels::{BLINKER, LED_STATE, SERIAL_TX};

/// Serial console writer over the shared USART2 TX half
///
/// Writes before the TX half is installed are discarded.
pub struct Console;

impl UartTx for Console {
    type Error = UartBusError;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        for &byte in data {
            SERIAL_TX.lock(|cell| match cell.borrow_mut().as_mut() {
                Some(tx) => tx.write_byte(byte),
                None => Ok(()),
            })?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        SERIAL_TX.lock(|cell| match cell.borrow_mut().as_mut() {
            Some(tx) => tx.flush(),
            None => Ok(()),
        })
    }
}

/// LED mode control over the shared blink machine
pub struct SharedBlinker;

impl LedControl for SharedBlinker {
    fn enter(&mut self, target: LedState) {
        let installed = BLINKER.lock(|cell| match cell.borrow_mut().as_mut() {
            Some(machine) => {
                machine.enter(target);
                true
            }
            None => false,
        });

        if !installed {
            warn!("LED mode {} requested before the blinker was installed", target);
        }
    }

    fn state(&self) -> LedState {
        LED_STATE.get()
    }
}
