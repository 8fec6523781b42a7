//! Ingestion of probe observations.
//!
//! Detection never parses text itself. A [`ProbeSource`] hands over fully
//! validated [`Observation`]s; malformed lines are dropped before they reach
//! the record store.

mod file;
mod memory;
mod observation;

pub use file::{read_observations, FileSource};
pub use memory::MemorySource;
pub use observation::Observation;

use std::fmt::Debug;

use crate::ProbeError;

/// Trait for loading probe observations from various sources.
///
/// # Example
///
/// ```no_run
/// use probewatch::{FileSource, ProbeSource};
///
/// let mut source = FileSource::new("responses.csv");
/// let observations = source.observations()?;
/// println!("Loaded {} observations from {}", observations.len(), source.description());
/// # Ok::<(), probewatch::ProbeError>(())
/// ```
pub trait ProbeSource: Debug {
    /// Load every valid observation from the source.
    ///
    /// Malformed records are skipped. An error is returned only when the
    /// source itself cannot be read.
    fn observations(&mut self) -> Result<Vec<Observation>, ProbeError>;

    /// Returns a human-readable description of the source.
    fn description(&self) -> &str;
}
