//! Command table
//!
//! Built once at startup from [`COMMANDS`] and never modified. Lookup is an
//! exact match on the already-lowercased line; tokens are unique, so the
//! first (and only) match wins.

use heapless::FnvIndexMap;

use crate::blink::LedState;

/// Maximum number of table entries (power of two for the index map)
pub const MAX_COMMANDS: usize = 4;

/// Startup banner and first prompt
pub const BANNER: &str = "STM32L432KC ready. Commands: on | off | blink | stop\r\n> ";

/// Response to any line that matches no token
pub const UNKNOWN_RESPONSE: &str = "\r\nUnknown: on | off | blink | stop\r\n> ";

/// One recognized command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CommandEntry {
    /// Lowercase token, matched exactly
    pub token: &'static str,
    /// Mode entered on match
    pub target: LedState,
    /// Text written after the transition
    pub response: &'static str,
}

impl CommandEntry {
    /// Create an entry
    pub const fn new(token: &'static str, target: LedState, response: &'static str) -> Self {
        Self {
            token,
            target,
            response,
        }
    }
}

/// The standard command set, in listing order
///
/// `stop` and `off` share a target; they differ only in wording so that
/// `blink`/`stop` pair up the way `on`/`off` do.
pub const COMMANDS: [CommandEntry; MAX_COMMANDS] = [
    CommandEntry::new("on", LedState::On, "\r\nLED ON\r\n> "),
    CommandEntry::new("off", LedState::Off, "\r\nLED OFF\r\n> "),
    CommandEntry::new(
        "blink",
        LedState::Blinking,
        "\r\nBLINK 200ms (type 'stop' to end)\r\n> ",
    ),
    CommandEntry::new("stop", LedState::Off, "\r\nBLINK STOPPED, LED OFF\r\n> "),
];

/// Errors from building a command table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TableError {
    /// Token appears more than once
    DuplicateToken(&'static str),
    /// More entries than [`MAX_COMMANDS`]
    TooManyCommands,
}

/// Immutable token → entry map
#[derive(Debug, Clone)]
pub struct CommandTable {
    entries: FnvIndexMap<&'static str, CommandEntry, MAX_COMMANDS>,
}

impl CommandTable {
    /// Build a table, preserving entry order
    pub fn new(entries: &[CommandEntry]) -> Result<Self, TableError> {
        let mut map = FnvIndexMap::new();

        for entry in entries {
            if map.contains_key(entry.token) {
                return Err(TableError::DuplicateToken(entry.token));
            }
            map.insert(entry.token, *entry)
                .map_err(|_| TableError::TooManyCommands)?;
        }

        Ok(Self { entries: map })
    }

    /// Build the table from [`COMMANDS`]
    pub fn standard() -> Result<Self, TableError> {
        Self::new(&COMMANDS)
    }

    /// Find the entry for a normalized line
    pub fn lookup(&self, line: &[u8]) -> Option<&CommandEntry> {
        let token = core::str::from_utf8(line).ok()?;
        self.entries.get(token)
    }

    /// Entries in table order
    pub fn iter(&self) -> impl Iterator<Item = &CommandEntry> {
        self.entries.values()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::String;

    #[test]
    fn test_standard_table() {
        let table = CommandTable::standard().unwrap();
        assert_eq!(table.len(), 4);

        assert_eq!(table.lookup(b"on").unwrap().target, LedState::On);
        assert_eq!(table.lookup(b"off").unwrap().target, LedState::Off);
        assert_eq!(table.lookup(b"blink").unwrap().target, LedState::Blinking);
        assert_eq!(table.lookup(b"stop").unwrap().target, LedState::Off);
    }

    #[test]
    fn test_lookup_is_exact() {
        let table = CommandTable::standard().unwrap();
        assert!(table.lookup(b"ON").is_none());
        assert!(table.lookup(b"on ").is_none());
        assert!(table.lookup(b"blin").is_none());
        assert!(table.lookup(b"").is_none());
        assert!(table.lookup(&[0xff, 0xfe]).is_none());
    }

    #[test]
    fn test_order_matches_unknown_listing() {
        let table = CommandTable::standard().unwrap();
        let mut listing: String<32> = String::new();
        for (i, entry) in table.iter().enumerate() {
            if i > 0 {
                listing.push_str(" | ").unwrap();
            }
            listing.push_str(entry.token).unwrap();
        }

        assert_eq!(listing.as_str(), "on | off | blink | stop");
        assert!(UNKNOWN_RESPONSE.contains(listing.as_str()));
        assert!(BANNER.contains(listing.as_str()));
    }

    #[test]
    fn test_duplicate_token_rejected() {
        let entries = [
            CommandEntry::new("on", LedState::On, "a"),
            CommandEntry::new("on", LedState::Off, "b"),
        ];
        assert_eq!(
            CommandTable::new(&entries).unwrap_err(),
            TableError::DuplicateToken("on")
        );
    }

    #[test]
    fn test_too_many_commands() {
        let entries = [
            CommandEntry::new("a", LedState::On, ""),
            CommandEntry::new("b", LedState::On, ""),
            CommandEntry::new("c", LedState::On, ""),
            CommandEntry::new("d", LedState::On, ""),
            CommandEntry::new("e", LedState::On, ""),
        ];
        assert_eq!(
            CommandTable::new(&entries).unwrap_err(),
            TableError::TooManyCommands
        );
    }

    #[test]
    fn test_tokens_fit_line_buffer() {
        for entry in COMMANDS {
            assert!(entry.token.len() <= crate::line::MAX_LINE_LEN);
            assert!(!entry.token.bytes().any(|b| b.is_ascii_uppercase()));
        }
    }
}
