//! Periodic timer abstraction
//!
//! A reloading counter that raises an update notification every period.
//! The prescaler and reload values are programmed once at bring-up; after
//! that the application only starts, stops and rewinds it.

/// Reloading tick source
pub trait PeriodicTimer {
    /// Start counting
    fn start(&mut self);

    /// Stop counting; the counter value is kept
    fn stop(&mut self);

    /// Rewind the counter to zero without changing the running state
    fn reset_counter(&mut self);

    /// Clear the pending-tick (update) indicator
    ///
    /// Returns whether a tick was pending.
    fn clear_pending(&mut self) -> bool;

    /// Check if the counter is running
    fn is_running(&self) -> bool;
}

impl<T: PeriodicTimer + ?Sized> PeriodicTimer for &mut T {
    fn start(&mut self) {
        T::start(self)
    }

    fn stop(&mut self) {
        T::stop(self)
    }

    fn reset_counter(&mut self) {
        T::reset_counter(self)
    }

    fn clear_pending(&mut self) -> bool {
        T::clear_pending(self)
    }

    fn is_running(&self) -> bool {
        T::is_running(self)
    }
}
