//! Interrupt-to-foreground command handoff
//!
//! A completed line is copied out of the reader's buffer into a
//! [`CommandLine`] and moved through a depth-1 channel. The buffer itself
//! never leaves the RX interrupt, so the reader may start the next line while
//! the foreground is still dispatching the previous one.
//!
//! "Ready" is simply "the slot is occupied". When it is, further lines are
//! dropped rather than overwriting the pending one.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, TrySendError};
use heapless::Vec;

use super::reader::MAX_LINE_LEN;

/// A completed, normalized command line
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandLine {
    bytes: Vec<u8, MAX_LINE_LEN>,
}

impl CommandLine {
    /// Copy a line out of a buffer
    ///
    /// Returns `None` if the bytes exceed [`MAX_LINE_LEN`].
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        Vec::from_slice(bytes).ok().map(|bytes| Self { bytes })
    }

    /// Raw line bytes (no terminator)
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Line as text, if it is valid UTF-8
    pub fn as_str(&self) -> Option<&str> {
        core::str::from_utf8(&self.bytes).ok()
    }

    /// Number of bytes in the line
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Check if the line is empty
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for CommandLine {
    fn format(&self, f: defmt::Formatter) {
        match self.as_str() {
            Some(text) => defmt::write!(f, "{=str}", text),
            None => defmt::write!(f, "{=[u8]}", self.as_bytes()),
        }
    }
}

/// Single-producer/single-consumer handoff cell of depth 1
///
/// Producer: the line reader (RX interrupt). Consumer: the foreground loop.
pub struct CommandSlot {
    channel: Channel<CriticalSectionRawMutex, CommandLine, 1>,
}

impl Default for CommandSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandSlot {
    /// Create an empty slot
    pub const fn new() -> Self {
        Self {
            channel: Channel::new(),
        }
    }

    /// Publish a line
    ///
    /// Returns `false` and drops `line` if the previous line has not been
    /// taken yet.
    pub fn offer(&self, line: CommandLine) -> bool {
        match self.channel.try_send(line) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => false,
        }
    }

    /// Take the pending line, clearing the ready state
    pub fn take(&self) -> Option<CommandLine> {
        self.channel.try_receive().ok()
    }

    /// Check if a line is waiting
    pub fn is_ready(&self) -> bool {
        !self.channel.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(text: &str) -> CommandLine {
        CommandLine::from_bytes(text.as_bytes()).unwrap()
    }

    #[test]
    fn test_command_line_capacity() {
        assert!(CommandLine::from_bytes(b"1234567").is_some());
        assert!(CommandLine::from_bytes(b"12345678").is_none());
    }

    #[test]
    fn test_command_line_non_utf8() {
        let raw = CommandLine::from_bytes(&[0xff, b'o', b'n']).unwrap();
        assert_eq!(raw.as_str(), None);
        assert_eq!(raw.as_bytes(), &[0xff, b'o', b'n']);
        assert_eq!(raw.len(), 3);
    }

    #[test]
    fn test_offer_then_take() {
        let slot = CommandSlot::new();
        assert!(!slot.is_ready());
        assert!(slot.take().is_none());

        assert!(slot.offer(line("on")));
        assert!(slot.is_ready());
        assert_eq!(slot.take(), Some(line("on")));
        assert!(!slot.is_ready());
    }

    #[test]
    fn test_full_slot_keeps_pending_line() {
        let slot = CommandSlot::new();
        assert!(slot.offer(line("blink")));
        assert!(!slot.offer(line("stop")));

        assert_eq!(slot.take(), Some(line("blink")));
        assert!(slot.take().is_none());

        // Ownership returned to the producer
        assert!(slot.offer(line("stop")));
        assert_eq!(slot.take(), Some(line("stop")));
    }
}
