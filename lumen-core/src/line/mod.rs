//! Serial line input
//!
//! Turns the raw RX byte stream into discrete, lowercased command lines and
//! hands them from interrupt context to the foreground loop.

pub mod reader;
pub mod slot;

pub use reader::{Feed, LineReader, LINE_CAPACITY, MAX_LINE_LEN};
pub use slot::{CommandLine, CommandSlot};
