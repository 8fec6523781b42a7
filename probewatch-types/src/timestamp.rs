//! Probe timestamps.
//!
//! Probe logs stamp every observation with a compact, zero-padded
//! `YYYYMMDDHHMMSS` token in local time. We keep the parsed value as a
//! [`NaiveDateTime`] so arithmetic and ordering are exact, and render it in
//! the readable `YYYY-MM-DD HH:MM:SS` form.

use core::fmt;
use core::str::FromStr;
use core::time::Duration;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

use crate::TokenError;

/// Length of a raw timestamp token.
const TOKEN_LEN: usize = 14;

/// A validated observation timestamp with one-second resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    /// Build a timestamp from calendar fields, validating every range.
    pub fn from_parts(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Option<Self> {
        if !(1..=9999).contains(&year) {
            return None;
        }
        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        let time = NaiveTime::from_hms_opt(hour, minute, second)?;
        Some(Self(NaiveDateTime::new(date, time)))
    }

    /// The underlying chrono value.
    pub const fn as_naive(&self) -> NaiveDateTime {
        self.0
    }

    /// Render back to the raw `YYYYMMDDHHMMSS` token.
    pub fn token(&self) -> String {
        self.0.format("%Y%m%d%H%M%S").to_string()
    }

    /// Absolute distance between two timestamps.
    pub fn abs_diff(&self, other: &Timestamp) -> TimeDelta {
        let (lo, hi) = if self <= other { (self, other) } else { (other, self) };
        hi.0.signed_duration_since(lo.0)
    }

    /// Whether two timestamps are at most `tolerance` apart (inclusive).
    pub fn is_within(&self, other: &Timestamp, tolerance: Duration) -> bool {
        match TimeDelta::from_std(tolerance) {
            Ok(tolerance) => self.abs_diff(other) <= tolerance,
            // Larger than any representable distance.
            Err(_) => true,
        }
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(value: NaiveDateTime) -> Self {
        Self(value)
    }
}

impl FromStr for Timestamp {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TokenError::Timestamp(s.to_string());

        if s.len() != TOKEN_LEN || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        // All-ASCII digits, so byte slicing is safe and every field parses.
        let field = |range: core::ops::Range<usize>| -> Result<u32, TokenError> {
            s[range].parse().map_err(|_| invalid())
        };

        let year = field(0..4)? as i32;
        Self::from_parts(
            year,
            field(4..6)?,
            field(6..8)?,
            field(8..10)?,
            field(10..12)?,
            field(12..14)?,
        )
        .ok_or_else(invalid)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d %H:%M:%S"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_timestamp(s: &str) -> bool {
        s.parse::<Timestamp>().is_ok()
    }

    #[test]
    fn accepts_well_formed_token() {
        assert!(is_timestamp("20201019133326"));
    }

    #[test]
    fn rejects_non_digits() {
        assert!(!is_timestamp("2020101913332a"));
        assert!(!is_timestamp("-02010191333.6"));
    }

    #[test]
    fn requires_exactly_fourteen_digits() {
        // Sub-second precision
        assert!(!is_timestamp("202010191333261"));
        // Missing zero padding
        assert!(!is_timestamp("2020619133326"));
        assert!(!is_timestamp(""));
    }

    #[test]
    fn year_range() {
        assert!(is_timestamp("19691019133326"));
        assert!(!is_timestamp("00001019133326"));
        assert!(is_timestamp("00011019133326"));
        assert!(is_timestamp("20381019133326"));
        assert!(is_timestamp("99991019133326"));
    }

    #[test]
    fn month_and_day_range() {
        assert!(!is_timestamp("20200019133326"));
        assert!(!is_timestamp("20201319133326"));
        assert!(!is_timestamp("20201000133326"));
        assert!(!is_timestamp("20201032133326"));
        // April has 30 days
        assert!(!is_timestamp("20200431133326"));
    }

    #[test]
    fn leap_years() {
        assert!(is_timestamp("20240229133326"));
        assert!(!is_timestamp("20230229133326"));
        assert!(is_timestamp("20000229000000"));
        assert!(!is_timestamp("19000229000000"));
    }

    #[test]
    fn time_of_day_range() {
        assert!(is_timestamp("20201019003326"));
        assert!(!is_timestamp("20201019243326"));
        assert!(is_timestamp("20201019130026"));
        assert!(!is_timestamp("20201019136026"));
        assert!(is_timestamp("20201019130000"));
        assert!(!is_timestamp("20201019130060"));
    }

    #[test]
    fn display_and_token() {
        let t: Timestamp = "20221019133324".parse().unwrap();
        assert_eq!(t.to_string(), "2022-10-19 13:33:24");
        assert_eq!(t.token(), "20221019133324");
    }

    #[test]
    fn ordering_follows_time() {
        let a: Timestamp = "20221019235959".parse().unwrap();
        let b: Timestamp = "20221020000000".parse().unwrap();
        assert!(a < b);
        assert_eq!(a.abs_diff(&b), TimeDelta::seconds(1));
        assert_eq!(b.abs_diff(&a), TimeDelta::seconds(1));
    }

    #[test]
    fn tolerance_is_inclusive() {
        let a: Timestamp = "20221019133300".parse().unwrap();
        let b: Timestamp = "20221019133305".parse().unwrap();
        let c: Timestamp = "20221019133306".parse().unwrap();
        let tolerance = Duration::from_secs(5);

        assert!(a.is_within(&b, tolerance));
        assert!(b.is_within(&a, tolerance));
        assert!(!a.is_within(&c, tolerance));
        assert!(a.is_within(&a, Duration::ZERO));
        assert!(a.is_within(&c, Duration::MAX));
    }

    #[test]
    fn error_names_token() {
        let err = "2022".parse::<Timestamp>().unwrap_err();
        assert_eq!(err, TokenError::Timestamp("2022".to_string()));
        assert!(err.to_string().contains("2022"));
    }
}
