//! Blink state machine definition
//!
//! Transitions are total: every mode accepts every target.
//!
//! | Target     | Timer                      | Pin        |
//! |------------|----------------------------|------------|
//! | `Off`      | stop, clear pending tick   | low        |
//! | `On`       | stop, clear pending tick   | high       |
//! | `Blinking` | rewind to zero, start      | unchanged  |
//!
//! The new mode is recorded before any side effect, so a tick that fires in
//! the middle of a transition already sees the target mode.

use lumen_hal::{OutputPin, PeriodicTimer};

use super::state::{LedState, LedStateCell};

/// Something the dispatcher can move between LED modes
pub trait LedControl {
    /// Enter `target`, performing its side effects
    fn enter(&mut self, target: LedState);

    /// Current mode
    fn state(&self) -> LedState;
}

/// Outcome of a timer tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tick {
    /// Pin inverted; carries the new level
    Toggled { high: bool },
    /// Stray tick in a non-blinking mode, pin untouched
    Ignored(LedState),
}

/// LED mode owner: the pin, the timer, and the shared mode cell
pub struct BlinkMachine<'a, P, T> {
    state: &'a LedStateCell,
    led: P,
    timer: T,
}

impl<'a, P: OutputPin, T: PeriodicTimer> BlinkMachine<'a, P, T> {
    /// Take ownership of the pin and timer and enter `Off`
    pub fn new(state: &'a LedStateCell, led: P, timer: T) -> Self {
        let mut machine = Self { state, led, timer };
        machine.enter(LedState::Off);
        machine
    }

    /// Timer update reaction, called from the timer interrupt
    pub fn on_tick(&mut self) -> Tick {
        self.timer.clear_pending();

        let current = self.state.get();
        if !current.reacts_to_ticks() {
            return Tick::Ignored(current);
        }

        self.led.toggle();
        Tick::Toggled {
            high: self.led.is_set_high(),
        }
    }

    /// The LED pin
    pub fn led(&self) -> &P {
        &self.led
    }

    /// The blink timer
    pub fn timer(&self) -> &T {
        &self.timer
    }

    /// Give back the pin and timer
    pub fn release(self) -> (P, T) {
        (self.led, self.timer)
    }

    fn halt_timer(&mut self) {
        self.timer.stop();
        self.timer.clear_pending();
    }
}

impl<P: OutputPin, T: PeriodicTimer> LedControl for BlinkMachine<'_, P, T> {
    fn enter(&mut self, target: LedState) {
        self.state.set(target);

        match target {
            LedState::Off => {
                self.halt_timer();
                self.led.set_low();
            }
            LedState::On => {
                self.halt_timer();
                self.led.set_high();
            }
            LedState::Blinking => {
                self.timer.reset_counter();
                self.timer.start();
            }
        }
    }

    fn state(&self) -> LedState {
        self.state.get()
    }
}


#[cfg(test)]
mod tests {
    use super::mock::{MockPin, MockTimer};
    use super::*;

    fn machine(cell: &LedStateCell) -> BlinkMachine<'_, MockPin, MockTimer> {
        BlinkMachine::new(cell, MockPin::default(), MockTimer::default())
    }

    #[test]
    fn test_starts_off() {
        let cell = LedStateCell::new(LedState::Blinking);
        let m = machine(&cell);
        assert_eq!(m.state(), LedState::Off);
        assert!(!m.led().high);
        assert!(!m.timer().running);
    }

    #[test]
    fn test_on_and_off() {
        let cell = LedStateCell::default();
        let mut m = machine(&cell);

        m.enter(LedState::On);
        assert_eq!(cell.get(), LedState::On);
        assert!(m.led().high);
        assert!(!m.timer().running);

        m.enter(LedState::Off);
        assert_eq!(cell.get(), LedState::Off);
        assert!(!m.led().high);
    }

    #[test]
    fn test_blinking_keeps_level_until_first_tick() {
        let cell = LedStateCell::default();
        let mut m = machine(&cell);
        m.enter(LedState::On);
        let writes = m.led().writes;

        m.timer.counter = 123;
        m.enter(LedState::Blinking);
        assert!(m.timer().running);
        assert_eq!(m.timer().counter, 0);
        assert!(m.led().high);
        assert_eq!(m.led().writes, writes);

        assert!(m.timer.elapse());
        assert_eq!(m.on_tick(), Tick::Toggled { high: false });
        assert!(!m.timer().pending);

        m.timer.elapse();
        assert_eq!(m.on_tick(), Tick::Toggled { high: true });
    }

    #[test]
    fn test_stray_tick_is_inert() {
        let cell = LedStateCell::default();
        let mut m = machine(&cell);

        for target in [LedState::Off, LedState::On] {
            m.enter(target);
            let level = m.led().high;
            m.timer.pending = true;

            assert_eq!(m.on_tick(), Tick::Ignored(target));
            assert_eq!(m.led().high, level);
            assert!(!m.timer().pending);
        }
    }

    #[test]
    fn test_leaving_blinking_halts_timer() {
        let cell = LedStateCell::default();
        let mut m = machine(&cell);

        m.enter(LedState::Blinking);
        m.timer.elapse();
        m.enter(LedState::Off);

        assert!(!m.timer().running);
        assert!(!m.timer().pending);
        assert!(!m.led().high);
    }

    #[test]
    fn test_reentering_blinking_rewinds() {
        let cell = LedStateCell::default();
        let mut m = machine(&cell);

        m.enter(LedState::Blinking);
        m.enter(LedState::Blinking);
        assert_eq!(m.timer().resets, 2);
        assert!(m.timer().running);
    }

    #[test]
    fn test_release_returns_parts() {
        let cell = LedStateCell::default();
        let mut m = machine(&cell);
        m.enter(LedState::On);

        let (pin, timer) = m.release();
        assert!(pin.high);
        assert!(!timer.running);
    }
}
