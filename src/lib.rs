//! # probewatch
//!
//! Detects anomalous periods in network probe logs. A probe log records, for
//! each monitored address, a response time per probe or `-` when the probe
//! timed out. From it probewatch reports:
//!
//! - **Failures**: runs of consecutive timeouts for one address
//! - **High load**: runs where the trailing average response time reaches a
//!   threshold
//! - **Subnet failures**: failures every address in a subnet experienced at
//!   about the same time
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  ┌─────────┐    ┌───────────────┐    ┌──────────┐            │
//! │  │ source  │───▶│ data (store,  │───▶│ analyzer │──▶ report  │
//! │  │ (input) │    │ subnet index) │    │ (queries)│            │
//! │  └─────────┘    └───────────────┘    └──────────┘            │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`source`]**: Ingestion behind the [`ProbeSource`] trait ([`FileSource`]
//!   for CSV files, [`MemorySource`] for in-memory observations)
//! - **[`data`]**: Record store, subnet index, run detection, windowed load
//!   evaluation and subnet correlation
//! - **[`analyzer`]**: [`ProbeLog`], the immutable loaded log and its queries
//! - **[`report`]**: Rendered periods in text or JSON
//! - **[`config`]**: Layered [`Settings`]
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Everything, with defaults
//! probewatch --file responses.csv
//!
//! # Subnet failures lasting 3+ probes, as JSON
//! probewatch --file responses.csv --query subnet --threshold 3 --format json
//! ```
//!
//! ### As a library
//!
//! ```
//! use std::time::Duration;
//! use probewatch::{MemorySource, ProbeLog};
//!
//! let mut source = MemorySource::from_tokens([
//!     ("20221019133324", "10.20.30.1/16", "-"),
//!     ("20221019133324", "10.20.30.2/16", "-"),
//!     ("20221019133325", "10.20.30.1/16", "12"),
//!     ("20221019133326", "10.20.30.2/16", "9"),
//! ]);
//! let log = ProbeLog::from_source(&mut source).unwrap();
//!
//! let subnet = log.find_all_subnet_failure(1, Duration::from_secs(5));
//! assert_eq!(subnet[0].to_string(), "10.20.0.0/16 2022-10-19 13:33:24 ~ 2022-10-19 13:33:25");
//! ```

pub mod analyzer;
pub mod config;
pub mod data;
pub mod error;
pub mod report;
pub mod source;

// Re-export main types for convenience
pub use analyzer::{normalize_threshold, ProbeLog, QueryParams};
pub use config::{OutputFormat, Query, Settings};
pub use data::{RecordStore, SubnetIndex, DEFAULT_TOLERANCE};
pub use error::ProbeError;
pub use report::{AddressPeriod, Report, SubnetPeriod};
pub use source::{FileSource, MemorySource, Observation, ProbeSource};

pub use probewatch_types::{Address, Interval, Period, ProbeValue, Subnet, Timestamp};
