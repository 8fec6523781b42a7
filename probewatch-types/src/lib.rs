//! # probewatch-types
//!
//! Core value types for probe response-time logs. A probe log is a series of
//! `(timestamp, address, value)` observations produced by a pinger: the value
//! is either a latency in milliseconds or `-` when no response came back.
//!
//! ## Design Goals
//!
//! - **Validated at the edge**: every type has a strict `FromStr` so malformed
//!   tokens never reach detection code
//! - **Small and `Copy`**: timestamps, addresses and intervals are plain values
//! - **Optional serialization**: enable the `serde` feature as needed
//!
//! ## Features
//!
//! - `serde`: serialization of all value types via serde
//!
//! ## Example
//!
//! ```rust
//! use probewatch_types::{Address, ProbeValue, Timestamp};
//!
//! let at: Timestamp = "20221019133324".parse().unwrap();
//! let address: Address = "10.20.30.1/16".parse().unwrap();
//! let value: ProbeValue = "-".parse().unwrap();
//!
//! assert_eq!(at.to_string(), "2022-10-19 13:33:24");
//! assert_eq!(address.subnet().to_string(), "10.20.0.0/16");
//! assert!(value.is_no_response());
//! ```

mod address;
mod error;
mod interval;
mod timestamp;
mod value;

pub use address::{Address, Subnet};
pub use error::TokenError;
pub use interval::{Interval, Period, PERIOD_SEPARATOR};
pub use timestamp::Timestamp;
pub use value::{ProbeValue, NO_RESPONSE};
