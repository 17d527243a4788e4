//! Text command handling
//!
//! Four tokens drive the LED: `on`, `off`, `blink`, `stop`. Each maps to a
//! target mode and a fixed response line.

pub mod dispatch;
pub mod table;

pub use dispatch::{Dispatch, Dispatcher};
pub use table::{
    CommandEntry, CommandTable, TableError, BANNER, COMMANDS, MAX_COMMANDS, UNKNOWN_RESPONSE,
};
