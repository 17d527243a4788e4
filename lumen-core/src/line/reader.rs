//! Byte-at-a-time line reader
//!
//! Runs inside the USART RX interrupt. Each call consumes exactly one byte,
//! never waits on anything but the single echo byte, and leaves the buffer
//! consistent before returning.
//!
//! Policy:
//! - CR or LF ends a line. Non-empty lines are lowercased (ASCII `A`-`Z`
//!   only) and published; empty lines are ignored. The cursor always resets.
//! - Any other byte is stored and echoed while there is room.
//! - Once `LINE_CAPACITY - 1` bytes are stored, further bytes are dropped
//!   without echo or error until the next terminator.

use heapless::Vec;
use lumen_hal::UartTx;

use super::slot::{CommandLine, CommandSlot};

/// Command buffer size: longest token (`blink`) plus headroom, with one
/// slot always kept free
pub const LINE_CAPACITY: usize = 8;

/// Maximum number of bytes a line can hold
pub const MAX_LINE_LEN: usize = LINE_CAPACITY - 1;

/// What happened to a fed byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Feed {
    /// Byte stored and echoed
    Stored,
    /// Buffer full, byte discarded
    Dropped,
    /// Terminator on an empty line, nothing published
    Empty,
    /// Terminator completed a line and it was handed off
    Published,
    /// Terminator completed a line but the previous one is still pending
    SlotBusy,
}

/// Accumulates bytes into command lines
#[derive(Debug, Clone, Default)]
pub struct LineReader {
    buffer: Vec<u8, MAX_LINE_LEN>,
}

impl LineReader {
    /// Create a reader with an empty buffer
    pub const fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Number of bytes accumulated on the current line
    pub fn cursor(&self) -> usize {
        self.buffer.len()
    }

    /// Feed one received byte
    ///
    /// Accepted bytes are echoed to `echo` unmodified. Echo failures are
    /// ignored: there is nowhere to report them.
    pub fn feed<T: UartTx>(&mut self, byte: u8, echo: &mut T, slot: &CommandSlot) -> Feed {
        match byte {
            b'\r' | b'\n' => self.terminate(slot),
            _ => {
                if self.buffer.push(byte).is_err() {
                    return Feed::Dropped;
                }
                echo.write_byte(byte).ok();
                Feed::Stored
            }
        }
    }

    fn terminate(&mut self, slot: &CommandSlot) -> Feed {
        if self.buffer.is_empty() {
            return Feed::Empty;
        }

        self.buffer.make_ascii_lowercase();
        let line = CommandLine::from_bytes(&self.buffer).unwrap_or_default();
        self.buffer.clear();

        if slot.offer(line) {
            Feed::Published
        } else {
            Feed::SlotBusy
        }
    }
}
