//! LED mode and its cross-context cell

use portable_atomic::{AtomicU8, Ordering};

/// LED output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum LedState {
    /// Pin low, timer stopped
    #[default]
    Off = 0,
    /// Pin high, timer stopped
    On = 1,
    /// Timer running, pin toggled on every tick
    Blinking = 2,
}

impl LedState {
    /// Get the state as its tag value
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Convert from a tag value
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(LedState::Off),
            1 => Some(LedState::On),
            2 => Some(LedState::Blinking),
            _ => None,
        }
    }

    /// Check if timer ticks should toggle the pin in this state
    pub fn reacts_to_ticks(&self) -> bool {
        matches!(self, LedState::Blinking)
    }
}

/// Authoritative LED mode, readable from any context
///
/// Written only by [`BlinkMachine::enter`](super::BlinkMachine::enter) on the
/// foreground path. The timer interrupt reads it without taking a lock.
#[derive(Debug)]
pub struct LedStateCell {
    tag: AtomicU8,
}

impl Default for LedStateCell {
    fn default() -> Self {
        Self::new(LedState::Off)
    }
}

impl LedStateCell {
    /// Create a cell holding `state`
    pub const fn new(state: LedState) -> Self {
        Self {
            tag: AtomicU8::new(state as u8),
        }
    }

    /// Current mode
    pub fn get(&self) -> LedState {
        // Only `set` writes the tag, so it is always a valid variant
        LedState::from_u8(self.tag.load(Ordering::Acquire)).unwrap_or_default()
    }

    /// Record a new mode
    pub fn set(&self, state: LedState) {
        self.tag.store(state.as_u8(), Ordering::Release);
    }
}
