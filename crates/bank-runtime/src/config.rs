//! Session configuration

use std::path::PathBuf;

use bank_core::{BankResult, Countdown, InflationRate};
use bank_time::TimerConfig;

/// Session configuration
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Ledger file loaded at startup and written on save
    pub data_path: PathBuf,
    /// Countdown settings
    pub timer: TimerConfig,
    /// Rate used until the operator sets one
    pub default_rate: InflationRate,
    /// Pending operator requests before senders wait
    pub command_buffer: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            data_path: PathBuf::from("data.csv"),
            timer: TimerConfig::default(),
            default_rate: InflationRate::DEFAULT,
            command_buffer: 64,
        }
    }
}

impl SessionConfig {
    pub const DATA_PATH_VAR: &'static str = "BANK_DATA_PATH";
    pub const RATE_VAR: &'static str = "BANK_INFLATION_RATE";
    pub const PERIOD_VAR: &'static str = "BANK_INFLATION_PERIOD";

    /// Defaults overlaid with `BANK_*` environment variables
    pub fn from_env() -> BankResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with whatever `lookup` returns for each variable
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> BankResult<Self> {
        let mut config = SessionConfig::default();

        if let Some(path) = lookup(Self::DATA_PATH_VAR).filter(|p| !p.trim().is_empty()) {
            config.data_path = PathBuf::from(path);
        }
        if let Some(rate) = lookup(Self::RATE_VAR) {
            config.default_rate = rate.parse()?;
        }
        if let Some(period) = lookup(Self::PERIOD_VAR) {
            config.timer = TimerConfig::with_total(Countdown::parse_nonzero(&period)?);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use bank_core::BankError;
    use std::collections::HashMap;
    use std::time::Duration;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = SessionConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.data_path, PathBuf::from("data.csv"));
        assert_eq!(config.default_rate.percent(), 15);
        assert_eq!(config.timer.default_total.as_secs(), 600);
        assert_eq!(config.timer.tick_interval, Duration::from_secs(1));
    }

    #[test]
    fn test_env_overrides() {
        let config = SessionConfig::from_lookup(lookup(&[
            ("BANK_DATA_PATH", "/tmp/class.csv"),
            ("BANK_INFLATION_RATE", "40"),
            ("BANK_INFLATION_PERIOD", "02:30"),
        ]))
        .unwrap();
        assert_eq!(config.data_path, PathBuf::from("/tmp/class.csv"));
        assert_eq!(config.default_rate.percent(), 40);
        assert_eq!(config.timer.default_total.as_secs(), 150);
    }

    #[test]
    fn test_env_rejects_bad_values() {
        assert!(matches!(
            SessionConfig::from_lookup(lookup(&[("BANK_INFLATION_RATE", "900")])),
            Err(BankError::InvalidRate(ref r)) if r == "900"
        ));
        assert!(matches!(
            SessionConfig::from_lookup(lookup(&[("BANK_INFLATION_PERIOD", "soon")])),
            Err(BankError::InvalidTimeFormat(_))
        ));
        assert!(matches!(
            SessionConfig::from_lookup(lookup(&[("BANK_INFLATION_PERIOD", "00:00")])),
            Err(BankError::InvalidDuration(_))
        ));
    }
}
