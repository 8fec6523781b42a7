//! Probe response values.

use core::fmt;
use core::str::FromStr;

use crate::TokenError;

/// Token a pinger writes when no response was received.
pub const NO_RESPONSE: &str = "-";

/// The outcome of a single probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ProbeValue {
    /// The probe timed out.
    NoResponse,
    /// Round-trip latency in milliseconds.
    Millis(u64),
}

impl ProbeValue {
    /// Whether the probe timed out.
    pub const fn is_no_response(&self) -> bool {
        matches!(self, ProbeValue::NoResponse)
    }

    /// The latency, if a response was received.
    pub const fn millis(&self) -> Option<u64> {
        match self {
            ProbeValue::NoResponse => None,
            ProbeValue::Millis(ms) => Some(*ms),
        }
    }
}

impl FromStr for ProbeValue {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == NO_RESPONSE {
            return Ok(ProbeValue::NoResponse);
        }
        // u64::from_str would accept a leading '+'.
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TokenError::Value(s.to_string()));
        }
        s.parse()
            .map(ProbeValue::Millis)
            .map_err(|_| TokenError::Value(s.to_string()))
    }
}

impl fmt::Display for ProbeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeValue::NoResponse => f.write_str(NO_RESPONSE),
            ProbeValue::Millis(ms) => write!(f, "{}", ms),
        }
    }
}
