//! LED output
//!
//! Wraps any `embedded-hal` output pin and remembers the level it last
//! drove, so toggling never has to read the output register back.

use embedded_hal::digital::OutputPin as EhOutputPin;
use lumen_hal::OutputPin;

/// Whether the LED is driven active-high or active-low on the board wiring.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActiveLevel {
    High,
    Low,
}

/// LED that remembers its active level and last logical state.
pub struct Led<PIN> {
    pin: PIN,
    active: ActiveLevel,
    lit: bool,
}

impl<PIN: EhOutputPin> Led<PIN> {
    /// Create an LED wrapper, initializing it to unlit.
    pub fn new(pin: PIN, active: ActiveLevel) -> Self {
        let mut led = Self {
            pin,
            active,
            lit: true,
        };
        led.drive(false);
        led
    }

    pub fn active_high(pin: PIN) -> Self {
        Self::new(pin, ActiveLevel::High)
    }

    pub fn active_low(pin: PIN) -> Self {
        Self::new(pin, ActiveLevel::Low)
    }

    pub fn free(self) -> PIN {
        self.pin
    }

    fn drive(&mut self, lit: bool) {
        // Infallible on STM32
        let _ = match (self.active, lit) {
            (ActiveLevel::High, true) | (ActiveLevel::Low, false) => self.pin.set_high(),
            (ActiveLevel::High, false) | (ActiveLevel::Low, true) => self.pin.set_low(),
        };
        self.lit = lit;
    }
}

/// "High" here is the logical level: lit.
impl<PIN: EhOutputPin> OutputPin for Led<PIN> {
    fn set_high(&mut self) {
        self.drive(true);
    }

    fn set_low(&mut self) {
        self.drive(false);
    }

    fn is_set_high(&self) -> bool {
        self.lit
    }
}
