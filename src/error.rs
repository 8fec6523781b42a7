//! Error types for loading and querying probe logs.

use std::io;

use probewatch_types::{Address, Subnet, TokenError};
use thiserror::Error;

/// Errors that can occur while ingesting or querying a probe log.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The source could not be opened or read.
    #[error("Failed to read {source_name}: {source}")]
    Input {
        source_name: String,
        #[source]
        source: io::Error,
    },

    /// A single record was malformed.
    #[error("Malformed record on line {line}: {reason}")]
    RecordParse { line: u64, reason: String },

    /// Direct lookup of an address that was never observed.
    #[error("Address not found: {0}")]
    AddressNotFound(Address),

    /// Direct lookup of a subnet with no observed members.
    #[error("Subnet not found: {0}")]
    SubnetNotFound(Subnet),
}

impl ProbeError {
    pub(crate) fn record(line: u64, err: TokenError) -> Self {
        ProbeError::RecordParse {
            line,
            reason: err.to_string(),
        }
    }
}
