//! A single probe observation.

use probewatch_types::{Address, ProbeValue, Timestamp, TokenError};

/// One `(timestamp, address, value)` row from a probe log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observation {
    pub at: Timestamp,
    pub address: Address,
    pub value: ProbeValue,
}

impl Observation {
    pub fn new(at: Timestamp, address: Address, value: ProbeValue) -> Self {
        Self { at, address, value }
    }

    /// Validate the three leading tokens of a log line.
    ///
    /// Tokens are trimmed before parsing.
    pub fn from_tokens(at: &str, address: &str, value: &str) -> Result<Self, TokenError> {
        Ok(Self {
            at: at.trim().parse()?,
            address: address.trim().parse()?,
            value: value.trim().parse()?,
        })
    }
}
