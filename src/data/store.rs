//! Record store: per-address time series of probe values.

use std::collections::{BTreeMap, HashMap};

use probewatch_types::{Address, ProbeValue, Timestamp};

use crate::source::Observation;
use crate::ProbeError;

/// Observations for one address, ordered by timestamp.
pub type Series = BTreeMap<Timestamp, ProbeValue>;

/// Immutable store of probe observations keyed by address, then time.
///
/// Addresses keep their first-seen order. A repeated timestamp for the same
/// address overwrites the earlier value.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    order: Vec<Address>,
    series: HashMap<Address, Series>,
}

impl RecordStore {
    /// Build a store from observations in arrival order.
    pub fn from_observations<I>(observations: I) -> Self
    where
        I: IntoIterator<Item = Observation>,
    {
        let mut order = Vec::new();
        let mut series: HashMap<Address, Series> = HashMap::new();

        for obs in observations {
            let entry = series.entry(obs.address).or_insert_with(|| {
                order.push(obs.address);
                Series::new()
            });
            entry.insert(obs.at, obs.value);
        }

        Self { order, series }
    }

    /// Addresses in first-seen order.
    pub fn addresses(&self) -> impl Iterator<Item = &Address> {
        self.order.iter()
    }

    /// The records for `address`, ascending by timestamp.
    pub fn records_for(
        &self,
        address: &Address,
    ) -> Result<impl Iterator<Item = (Timestamp, ProbeValue)> + '_, ProbeError> {
        self.series(address)
            .map(|s| s.iter().map(|(at, value)| (*at, *value)))
            .ok_or(ProbeError::AddressNotFound(*address))
    }

    /// The full series for `address`, if it was observed.
    pub fn series(&self, address: &Address) -> Option<&Series> {
        self.series.get(address)
    }

    /// Number of distinct addresses.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Total records across all addresses.
    pub fn record_count(&self) -> usize {
        self.series.values().map(Series::len).sum()
    }
}
