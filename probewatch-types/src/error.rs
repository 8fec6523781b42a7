//! Token parsing errors.

use thiserror::Error;

/// Errors produced when a raw log token fails validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Timestamp is not a valid `YYYYMMDDHHMMSS` token.
    #[error("invalid timestamp {0:?}")]
    Timestamp(String),

    /// Address is not a dotted-quad with an optional `/prefixlen`.
    #[error("invalid IPv4 address {0:?}")]
    Address(String),

    /// Prefix length is outside 0..=32.
    #[error("invalid prefix length in {0:?}")]
    PrefixLength(String),

    /// Value is neither `-` nor a non-negative integer.
    #[error("invalid response value {0:?}")]
    Value(String),
}
