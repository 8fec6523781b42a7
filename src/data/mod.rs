//! Storage and detection over probe observations.
//!
//! ## Submodules
//!
//! - [`store`]: Per-address time series ([`RecordStore`])
//! - [`subnet`]: Subnet membership derived from the store ([`SubnetIndex`])
//! - [`detect`]: Run detection turning per-record verdicts into intervals
//! - [`window`]: Trailing-window averages feeding the high-load verdict
//! - [`correlate`]: Tolerance-based intersection of failures across a subnet
//! - [`duration`]: Parsing and formatting of tolerance strings (e.g., "5s")
//!
//! ## Data Flow
//!
//! ```text
//! Observation (validated)
//!        │
//!        ▼
//! RecordStore::from_observations() ──▶ SubnetIndex::from_store()
//!        │                                    │
//!        ▼                                    │
//! failure_intervals() / high_load_intervals() │
//!        │                                    │
//!        └──────────────▶ correlate() ◀───────┘
//! ```

pub mod correlate;
pub mod detect;
pub mod duration;
pub mod store;
pub mod subnet;
pub mod window;

pub use correlate::{correlate, DEFAULT_TOLERANCE};
pub use detect::{detect_runs, failure_intervals, high_load_intervals, RunTracker};
pub use store::{RecordStore, Series};
pub use subnet::SubnetIndex;
pub use window::{LoadEvaluator, LoadWindow};
