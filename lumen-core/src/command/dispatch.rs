//! Command dispatcher
//!
//! Runs on the foreground path with a line taken from the
//! [`CommandSlot`](crate::line::CommandSlot). On a match the LED transition
//! completes before the response is written, so the user never sees a
//! status for a mode that has not been entered yet.

use lumen_hal::UartTx;

use super::table::{CommandTable, UNKNOWN_RESPONSE};
use crate::blink::{LedControl, LedState};

/// Outcome of dispatching one line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Dispatch {
    /// Token matched and its target mode was entered
    Applied {
        token: &'static str,
        state: LedState,
    },
    /// Line matched no token; mode unchanged
    Unknown,
    /// Empty line; nothing done
    Empty,
}

/// Maps command lines to LED transitions and responses
#[derive(Debug, Clone)]
pub struct Dispatcher {
    table: CommandTable,
}

impl Dispatcher {
    /// Create a dispatcher over `table`
    pub fn new(table: CommandTable) -> Self {
        Self { table }
    }

    /// The command table
    pub fn table(&self) -> &CommandTable {
        &self.table
    }

    /// Dispatch one normalized line
    ///
    /// Response write errors are ignored: the serial port is the only
    /// channel to report them on.
    pub fn dispatch<L, U>(&self, line: &[u8], led: &mut L, out: &mut U) -> Dispatch
    where
        L: LedControl,
        U: UartTx,
    {
        if line.is_empty() {
            return Dispatch::Empty;
        }

        match self.table.lookup(line) {
            Some(entry) => {
                led.enter(entry.target);
                out.write_str(entry.response).ok();
                Dispatch::Applied {
                    token: entry.token,
                    state: entry.target,
                }
            }
            None => {
                out.write_str(UNKNOWN_RESPONSE).ok();
                Dispatch::Unknown
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blink::machine::mock::{MockPin, MockTimer};
    use crate::blink::{BlinkMachine, LedStateCell};
    use heapless::Vec;

    #[derive(Default)]
    struct Terminal {
        out: Vec<u8, 128>,
    }

    impl Terminal {
        fn text(&self) -> &str {
            core::str::from_utf8(&self.out).unwrap()
        }
    }

    impl UartTx for Terminal {
        type Error = ();

        fn write_blocking(&mut self, data: &[u8]) -> Result<(), ()> {
            self.out.extend_from_slice(data).map_err(|_| ())
        }

        fn flush(&mut self) -> Result<(), ()> {
            Ok(())
        }
    }

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(CommandTable::standard().unwrap())
    }

    #[test]
    fn test_on_off_responses() {
        let cell = LedStateCell::default();
        let mut led = BlinkMachine::new(&cell, MockPin::default(), MockTimer::default());
        let d = dispatcher();

        let mut term = Terminal::default();
        assert_eq!(
            d.dispatch(b"on", &mut led, &mut term),
            Dispatch::Applied {
                token: "on",
                state: LedState::On
            }
        );
        assert_eq!(term.text(), "\r\nLED ON\r\n> ");
        assert!(led.led().high);

        let mut term = Terminal::default();
        d.dispatch(b"off", &mut led, &mut term);
        assert_eq!(term.text(), "\r\nLED OFF\r\n> ");
        assert!(!led.led().high);
    }

    #[test]
    fn test_blink_then_stop() {
        let cell = LedStateCell::default();
        let mut led = BlinkMachine::new(&cell, MockPin::default(), MockTimer::default());
        let d = dispatcher();

        let mut term = Terminal::default();
        d.dispatch(b"blink", &mut led, &mut term);
        assert_eq!(term.text(), "\r\nBLINK 200ms (type 'stop' to end)\r\n> ");
        assert_eq!(cell.get(), LedState::Blinking);
        assert!(led.timer().running);

        let mut term = Terminal::default();
        assert_eq!(
            d.dispatch(b"stop", &mut led, &mut term),
            Dispatch::Applied {
                token: "stop",
                state: LedState::Off
            }
        );
        assert_eq!(term.text(), "\r\nBLINK STOPPED, LED OFF\r\n> ");
        assert_eq!(cell.get(), LedState::Off);
        assert!(!led.timer().running);
    }

    #[test]
    fn test_unknown_leaves_state() {
        let cell = LedStateCell::default();
        let mut led = BlinkMachine::new(&cell, MockPin::default(), MockTimer::default());
        let d = dispatcher();
        led.enter(LedState::On);
        let writes = led.led().writes;

        let mut term = Terminal::default();
        assert_eq!(d.dispatch(b"xyz", &mut led, &mut term), Dispatch::Unknown);
        assert_eq!(term.text(), "\r\nUnknown: on | off | blink | stop\r\n> ");
        assert_eq!(cell.get(), LedState::On);
        assert_eq!(led.led().writes, writes);
    }

    #[test]
    fn test_empty_line_is_silent() {
        let cell = LedStateCell::default();
        let mut led = BlinkMachine::new(&cell, MockPin::default(), MockTimer::default());
        let mut term = Terminal::default();

        assert_eq!(dispatcher().dispatch(b"", &mut led, &mut term), Dispatch::Empty);
        assert!(term.out.is_empty());
    }

    #[test]
    fn test_repeated_command_keeps_level() {
        let cell = LedStateCell::default();
        let mut led = BlinkMachine::new(&cell, MockPin::default(), MockTimer::default());
        let d = dispatcher();

        let mut term = Terminal::default();
        d.dispatch(b"off", &mut led, &mut term);
        d.dispatch(b"off", &mut led, &mut term);
        assert!(!led.led().high);
        assert_eq!(term.text(), "\r\nLED OFF\r\n> \r\nLED OFF\r\n> ");

        d.dispatch(b"on", &mut led, &mut term);
        d.dispatch(b"on", &mut led, &mut term);
        assert!(led.led().high);
        assert_eq!(cell.get(), LedState::On);
    }
}
