//! Countdown durations
//!
//! Durations are whole seconds, entered and shown as zero-padded `MM:SS`.
//! Seconds are in `0..=59`; minutes are unbounded.

use std::fmt;
use std::str::FromStr;

use crate::{BankError, BankResult};

/// Countdown length in whole seconds
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Countdown(u32);

impl Countdown {
    pub const ZERO: Countdown = Countdown(0);
    /// Ten minutes
    pub const DEFAULT: Countdown = Countdown(600);

    #[inline]
    pub fn from_secs(secs: u32) -> Self {
        Countdown(secs)
    }

    /// Build from minutes and seconds, seconds in `0..=59`
    pub fn from_parts(minutes: u32, seconds: u32) -> BankResult<Self> {
        let invalid = || BankError::InvalidTimeFormat(format!("{minutes}:{seconds}"));
        if seconds > 59 {
            return Err(invalid());
        }
        minutes
            .checked_mul(60)
            .and_then(|secs| secs.checked_add(seconds))
            .map(Countdown)
            .ok_or_else(invalid)
    }

    /// Parse `MM:SS`; rejects a zero-length countdown
    pub fn parse_nonzero(s: &str) -> BankResult<Self> {
        let countdown: Countdown = s.parse()?;
        if countdown.is_zero() {
            return Err(BankError::InvalidDuration(format!("{s:?} is zero")));
        }
        Ok(countdown)
    }

    #[inline]
    pub fn as_secs(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

/// Format a second count as `MM:SS`
///
/// Minutes are not wrapped, so a count past an hour reads as e.g. `75:00`.
pub fn format_mm_ss(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

impl FromStr for Countdown {
    type Err = BankError;

    fn from_str(s: &str) -> BankResult<Self> {
        let malformed = || BankError::InvalidTimeFormat(s.to_string());
        let (minutes, seconds) = s.trim().split_once(':').ok_or_else(malformed)?;
        let field = |part: &str| -> BankResult<u32> {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(malformed());
            }
            part.parse::<u32>().map_err(|_| malformed())
        };
        let (minutes, seconds) = (field(minutes)?, field(seconds)?);
        Countdown::from_parts(minutes, seconds).map_err(|_| malformed())
    }
}

impl fmt::Debug for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Countdown({})", format_mm_ss(self.0))
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_mm_ss(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_mm_ss() {
        assert_eq!("00:02".parse::<Countdown>().unwrap().as_secs(), 2);
        assert_eq!("10:00".parse::<Countdown>().unwrap().as_secs(), 600);
        assert_eq!("1:5".parse::<Countdown>().unwrap().as_secs(), 65);
        assert_eq!(" 59:59 ".parse::<Countdown>().unwrap().as_secs(), 3599);
    }

    #[test]
    fn test_parse_past_an_hour() {
        assert_eq!("60:00".parse::<Countdown>().unwrap().as_secs(), 3600);
        assert_eq!("90:30".parse::<Countdown>().unwrap().as_secs(), 5430);
        assert_eq!(Countdown::from_secs(5430).to_string(), "90:30");
        // overflowing minute counts are malformed, not wrapped
        assert!(matches!(
            "99999999:00".parse::<Countdown>(),
            Err(BankError::InvalidTimeFormat(_))
        ));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for input in ["", "12", "1:2:3", "ab:cd", "-1:00", "00:60", "10:75", ":30", "05:"] {
            assert!(
                matches!(input.parse::<Countdown>(), Err(BankError::InvalidTimeFormat(_))),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_nonzero() {
        assert!(matches!(
            Countdown::parse_nonzero("00:00"),
            Err(BankError::InvalidDuration(_))
        ));
        assert!(matches!(
            Countdown::parse_nonzero("0:xx"),
            Err(BankError::InvalidTimeFormat(_))
        ));
        assert_eq!(Countdown::parse_nonzero("00:01").unwrap().as_secs(), 1);
    }

    #[test]
    fn test_format() {
        assert_eq!(format_mm_ss(0), "00:00");
        assert_eq!(format_mm_ss(65), "01:05");
        assert_eq!(Countdown::DEFAULT.to_string(), "10:00");
        assert_eq!(format_mm_ss(4500), "75:00");
    }

    proptest! {
        #[test]
        fn prop_format_then_parse(minutes in 0u32..=600, seconds in 0u32..=59) {
            let countdown = Countdown::from_parts(minutes, seconds).unwrap();
            let parsed: Countdown = countdown.to_string().parse().unwrap();
            prop_assert_eq!(parsed, countdown);
        }
    }
}
