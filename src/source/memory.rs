//! In-memory data source.

use super::{Observation, ProbeSource};
use crate::ProbeError;

/// A source backed by observations already held in memory.
///
/// Useful when embedding the detector behind another ingestion path.
///
/// # Example
///
/// ```
/// use probewatch::{MemorySource, Observation, ProbeLog};
///
/// let obs = Observation::from_tokens("20221019133324", "10.20.30.1/16", "-").unwrap();
/// let log = ProbeLog::from_source(&mut MemorySource::new(vec![obs])).unwrap();
/// assert_eq!(log.addresses().count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    observations: Vec<Observation>,
}

impl MemorySource {
    pub fn new(observations: Vec<Observation>) -> Self {
        Self { observations }
    }

    /// Parse `(timestamp, address, value)` token triples, dropping invalid ones.
    pub fn from_tokens<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str, &'a str)>,
    {
        let observations = rows
            .into_iter()
            .filter_map(|(at, address, value)| Observation::from_tokens(at, address, value).ok())
            .collect();
        Self { observations }
    }
}

impl ProbeSource for MemorySource {
    fn observations(&mut self) -> Result<Vec<Observation>, ProbeError> {
        Ok(self.observations.clone())
    }

    fn description(&self) -> &str {
        "memory"
    }
}
