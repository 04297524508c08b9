//! Countdown configuration

use std::time::Duration;

use bank_core::Countdown;

/// Countdown timer configuration
#[derive(Clone, Debug)]
pub struct TimerConfig {
    /// Total used until the operator configures another
    pub default_total: Countdown,
    /// Wall-clock length of one tick
    pub tick_interval: Duration,
}

impl Default for TimerConfig {
    fn default() -> Self {
        TimerConfig {
            default_total: Countdown::DEFAULT,
            tick_interval: Duration::from_secs(1),
        }
    }
}

impl TimerConfig {
    /// Default configuration with a different starting total
    pub fn with_total(default_total: Countdown) -> Self {
        TimerConfig {
            default_total,
            ..TimerConfig::default()
        }
    }
}
