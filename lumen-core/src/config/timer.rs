//! Blink timer configuration
//!
//! The timer input clock is first prescaled down to a 1 kHz count rate,
//! then the counter reloads every `period_ms` counts:
//!
//! ```text
//! sysclk ──► PSC (sysclk / 1 kHz - 1) ──► 1 kHz ──► ARR (200 - 1) ──► 5 Hz update
//! ```

/// Default timer input clock: the 4 MHz MSI the core boots on
pub const DEFAULT_SYSCLK_HZ: u32 = 4_000_000;

/// Intermediate count rate after the prescaler
pub const TICK_RATE_HZ: u32 = 1_000;

/// Interval between blink toggles
pub const BLINK_PERIOD_MS: u32 = 200;

/// Largest value the 16-bit PSC/ARR registers hold
const REGISTER_MAX: u32 = u16::MAX as u32;

/// Errors from timer configuration validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Timer input clock is zero
    ZeroClock,
    /// Intermediate count rate is zero
    ZeroTickRate,
    /// Blink period is zero
    ZeroPeriod,
    /// Input clock is slower than the requested count rate
    ClockBelowTickRate,
    /// Input clock is not a whole multiple of the count rate
    UnevenPrescale,
    /// Prescaler does not fit the 16-bit register
    PrescalerOverflow(u32),
    /// Reload value does not fit the 16-bit register
    ReloadOverflow(u32),
}

/// Derived register values for the blink timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerSettings {
    /// Value for the PSC register (divides by `prescaler + 1`)
    pub prescaler: u16,
    /// Value for the ARR register (reloads after `reload + 1` counts)
    pub reload: u16,
}

/// Blink timer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerConfig {
    /// Timer kernel clock in Hz
    pub sysclk_hz: u32,
    /// Count rate after the prescaler in Hz
    pub tick_rate_hz: u32,
    /// Update (tick) period in milliseconds
    pub period_ms: u32,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SYSCLK_HZ)
    }
}

impl TimerConfig {
    /// Standard 1 kHz / 200 ms configuration for the given input clock
    pub const fn new(sysclk_hz: u32) -> Self {
        Self {
            sysclk_hz,
            tick_rate_hz: TICK_RATE_HZ,
            period_ms: BLINK_PERIOD_MS,
        }
    }

    /// Raw prescaler value, before range checking
    pub const fn prescaler(&self) -> u32 {
        match self.sysclk_hz.checked_div(self.tick_rate_hz) {
            Some(ratio) => ratio.saturating_sub(1),
            None => 0,
        }
    }

    /// Raw reload value, before range checking
    pub const fn reload(&self) -> u32 {
        let counts = self.tick_rate_hz as u64 * self.period_ms as u64 / 1000;
        if counts > u32::MAX as u64 {
            u32::MAX
        } else {
            (counts as u32).saturating_sub(1)
        }
    }

    /// Validate the configuration and derive the register values
    pub fn settings(&self) -> Result<TimerSettings, ConfigError> {
        if self.sysclk_hz == 0 {
            return Err(ConfigError::ZeroClock);
        }
        if self.tick_rate_hz == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        if self.period_ms == 0 {
            return Err(ConfigError::ZeroPeriod);
        }
        if self.sysclk_hz < self.tick_rate_hz {
            return Err(ConfigError::ClockBelowTickRate);
        }
        if self.sysclk_hz % self.tick_rate_hz != 0 {
            return Err(ConfigError::UnevenPrescale);
        }

        let prescaler = self.prescaler();
        if prescaler > REGISTER_MAX {
            return Err(ConfigError::PrescalerOverflow(prescaler));
        }

        let reload = self.reload();
        if reload > REGISTER_MAX {
            return Err(ConfigError::ReloadOverflow(reload));
        }

        Ok(TimerSettings {
            prescaler: prescaler as u16,
            reload: reload as u16,
        })
    }

    /// Actual update period in microseconds for the derived settings
    pub fn actual_period_us(&self) -> Result<u64, ConfigError> {
        let settings = self.settings()?;
        let counts = (settings.prescaler as u64 + 1) * (settings.reload as u64 + 1);
        Ok(counts * 1_000_000 / self.sysclk_hz as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_msi_settings() {
        let config = TimerConfig::default();
        assert_eq!(
            config.settings(),
            Ok(TimerSettings {
                prescaler: 3999,
                reload: 199,
            })
        );
        assert_eq!(config.actual_period_us(), Ok(200_000));
    }

    #[test]
    fn test_faster_clock_only_changes_prescaler() {
        let config = TimerConfig::new(16_000_000);
        let settings = config.settings().unwrap();
        assert_eq!(settings.prescaler, 15_999);
        assert_eq!(settings.reload, 199);
        assert_eq!(config.actual_period_us(), Ok(200_000));
    }

    #[test]
    fn test_prescaler_overflow() {
        // 80 MHz / 1 kHz = 80000 does not fit PSC
        let config = TimerConfig::new(80_000_000);
        assert_eq!(
            config.settings(),
            Err(ConfigError::PrescalerOverflow(79_999))
        );
    }

    #[test]
    fn test_zero_inputs() {
        assert_eq!(TimerConfig::new(0).settings(), Err(ConfigError::ZeroClock));

        let mut config = TimerConfig::default();
        config.tick_rate_hz = 0;
        assert_eq!(config.settings(), Err(ConfigError::ZeroTickRate));
        assert_eq!(config.prescaler(), 0);

        let mut config = TimerConfig::default();
        config.period_ms = 0;
        assert_eq!(config.settings(), Err(ConfigError::ZeroPeriod));
    }

    #[test]
    fn test_clock_below_tick_rate() {
        assert_eq!(
            TimerConfig::new(999).settings(),
            Err(ConfigError::ClockBelowTickRate)
        );
    }

    #[test]
    fn test_uneven_prescale() {
        assert_eq!(
            TimerConfig::new(4_000_500).settings(),
            Err(ConfigError::UnevenPrescale)
        );
    }

    #[test]
    fn test_reload_overflow() {
        let mut config = TimerConfig::default();
        config.period_ms = 70_000;
        assert_eq!(config.settings(), Err(ConfigError::ReloadOverflow(69_999)));
    }
}
