//! Anomalous intervals and their rendered periods.

use core::fmt;
use core::time::Duration;

use crate::Timestamp;

/// Separator between the two ends of a rendered [`Period`].
pub const PERIOD_SEPARATOR: &str = " ~ ";

/// A run of qualifying records for one address.
///
/// `last_event` is the last record inside the run. `return_time` is the
/// first record after it, or `None` if the run was still open at the end of
/// the observed data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interval {
    pub occurrence: Timestamp,
    pub last_event: Timestamp,
    pub return_time: Option<Timestamp>,
    /// Number of qualifying records in the run.
    pub records: usize,
}

impl Interval {
    /// Effective end: the return time, else the last event.
    pub fn end(&self) -> Timestamp {
        self.return_time.unwrap_or(self.last_event)
    }

    /// Whether the run never recovered within the observed data.
    pub fn is_open(&self) -> bool {
        self.return_time.is_none()
    }

    /// The reported `(start, end)` period.
    pub fn period(&self) -> Period {
        Period {
            start: self.occurrence,
            end: self.end(),
        }
    }

    /// Fuzzy equality: starts and effective ends each within `tolerance`.
    pub fn nearly_equals(&self, other: &Interval, tolerance: Duration) -> bool {
        self.occurrence.is_within(&other.occurrence, tolerance)
            && self.end().is_within(&other.end(), tolerance)
    }
}

/// A reported `(start, end)` pair, rendered as `start ~ end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Period {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.start, PERIOD_SEPARATOR, self.end)
    }
}
