//! Currency and inflation primitives
//!
//! Wealth is held in whole currency units. Fractional input is floored at
//! the boundary so no operation ever leaves a fractional balance behind.

use std::fmt;
use std::str::FromStr;

use crate::{BankError, BankResult};

/// Amount of currency moved by a deposit or withdrawal
///
/// Any sign is accepted; the ledger does not clamp wealth at zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(pub i64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    #[inline]
    pub fn units(self) -> i64 {
        self.0
    }
}

impl FromStr for Amount {
    type Err = BankError;

    /// Parse operator input: any finite number within `i64`, floored to
    /// whole units
    fn from_str(s: &str) -> BankResult<Self> {
        let text = s.trim();
        if let Ok(units) = text.parse::<i64>() {
            return Ok(Amount(units));
        }
        // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive
        let in_range = |v: f64| v >= i64::MIN as f64 && v < i64::MAX as f64;
        match text.parse::<f64>().map(f64::floor) {
            Ok(value) if value.is_finite() && in_range(value) => Ok(Amount(value as i64)),
            _ => Err(BankError::InvalidAmount(s.to_string())),
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Inflation rate in whole percent
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InflationRate(u16);

impl InflationRate {
    pub const MIN_PERCENT: u16 = 1;
    pub const MAX_PERCENT: u16 = 250;
    pub const DEFAULT: InflationRate = InflationRate(15);

    pub fn new(percent: i64) -> BankResult<Self> {
        if percent < Self::MIN_PERCENT as i64 || percent > Self::MAX_PERCENT as i64 {
            return Err(BankError::InvalidRate(percent.to_string()));
        }
        Ok(InflationRate(percent as u16))
    }

    #[inline]
    pub fn percent(self) -> u16 {
        self.0
    }

    /// Inflate one balance: `floor(wealth * (100 + rate) / 100)`
    ///
    /// Saturates at the i64 bounds instead of wrapping.
    pub fn apply(self, wealth: i64) -> i64 {
        let scaled = wealth as i128 * (100 + self.0 as i128);
        let inflated = scaled.div_euclid(100);
        i64::try_from(inflated).unwrap_or(if inflated > 0 { i64::MAX } else { i64::MIN })
    }
}

impl Default for InflationRate {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl FromStr for InflationRate {
    type Err = BankError;

    fn from_str(s: &str) -> BankResult<Self> {
        let percent = s
            .trim()
            .trim_end_matches('%')
            .parse::<i64>()
            .map_err(|_| BankError::InvalidRate(s.to_string()))?;
        InflationRate::new(percent)
    }
}

impl fmt::Display for InflationRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
