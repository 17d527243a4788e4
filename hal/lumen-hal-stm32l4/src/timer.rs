//! Blink timer on TIM2
//!
//! Programmed once with the prescaler/reload pair derived by
//! `lumen_core::TimerConfig`, then driven through `lumen_hal::PeriodicTimer`.

use embassy_stm32::peripherals::TIM2;
use embassy_stm32::time::Hertz;
use embassy_stm32::timer::low_level::Timer;
use embassy_stm32::Peri;
use lumen_hal::PeriodicTimer;

/// TIM2 as a reloading tick source
pub struct BlinkTimer {
    timer: Timer<'static, TIM2>,
}

impl BlinkTimer {
    /// Configure TIM2: stopped, counter at zero, update interrupt enabled
    ///
    /// The update event generated here latches the prescaler; its flag is
    /// cleared again so the first real tick is a full period away.
    pub fn new(tim: Peri<'static, TIM2>, prescaler: u16, reload: u16) -> Self {
        let timer = Timer::new(tim);
        timer.stop();

        let regs = timer.regs_core();
        regs.psc().write_value(prescaler);
        regs.arr().write(|r| r.set_arr(reload));
        regs.egr().write(|r| r.set_ug(true));
        timer.reset();
        timer.clear_update_interrupt();
        timer.enable_update_interrupt(true);

        Self { timer }
    }

    /// Timer kernel clock feeding the prescaler
    pub fn input_clock(&self) -> Hertz {
        self.timer.get_clock_frequency()
    }
}

impl PeriodicTimer for BlinkTimer {
    fn start(&mut self) {
        self.timer.start();
    }

    fn stop(&mut self) {
        self.timer.stop();
    }

    fn reset_counter(&mut self) {
        self.timer.reset();
    }

    fn clear_pending(&mut self) -> bool {
        self.timer.clear_update_interrupt()
    }

    fn is_running(&self) -> bool {
        self.timer.regs_core().cr1().read().cen()
    }
}
