//! Query entry points over a loaded probe log.

use std::path::Path;
use std::time::Duration;

use probewatch_types::{Address, Interval, ProbeValue, Subnet, Timestamp};
use tracing::{debug, warn};

use crate::data::{
    correlate, failure_intervals, high_load_intervals, RecordStore, Series, SubnetIndex,
    DEFAULT_TOLERANCE,
};
use crate::report::{AddressPeriod, SubnetPeriod};
use crate::source::{FileSource, Observation, ProbeSource};
use crate::ProbeError;

/// Parameters shared by the detection queries.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryParams {
    /// Minimum consecutive failures for a failure to be reported.
    /// Non-positive values are treated as 1.
    pub run_length: i64,
    /// Number of trailing records averaged for high load.
    pub window: usize,
    /// Inclusive lower bound on the trailing average for high load.
    pub average: f64,
    /// Allowed skew between member failures in subnet correlation.
    pub tolerance: Duration,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            run_length: 1,
            window: 3,
            average: 100.0,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

/// Clamp a user-supplied run-length threshold to at least 1.
pub fn normalize_threshold(threshold: i64) -> usize {
    usize::try_from(threshold.max(1)).unwrap_or(usize::MAX)
}

/// An immutable, fully loaded probe log.
///
/// The record store and subnet index are built once at construction; every
/// query recomputes its result from them, so repeated calls are idempotent.
///
/// # Example
///
/// ```
/// use probewatch::{MemorySource, ProbeLog};
///
/// let mut source = MemorySource::from_tokens([
///     ("20221019133324", "10.20.30.1/16", "-"),
///     ("20221019133325", "10.20.30.1/16", "-"),
///     ("20221019133326", "10.20.30.1/16", "5"),
/// ]);
/// let log = ProbeLog::from_source(&mut source).unwrap();
///
/// let failures = log.find_all_failure(1);
/// assert_eq!(failures[0].to_string(), "10.20.30.1/16 2022-10-19 13:33:24 ~ 2022-10-19 13:33:26");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ProbeLog {
    store: RecordStore,
    subnets: SubnetIndex,
}

impl ProbeLog {
    /// Build from validated observations in arrival order.
    pub fn from_observations<I>(observations: I) -> Self
    where
        I: IntoIterator<Item = Observation>,
    {
        let store = RecordStore::from_observations(observations);
        let subnets = SubnetIndex::from_store(&store);
        debug!(
            addresses = store.len(),
            subnets = subnets.len(),
            records = store.record_count(),
            "built probe log"
        );
        Self { store, subnets }
    }

    /// Load everything from `source`, failing if it cannot be read.
    pub fn from_source<S>(source: &mut S) -> Result<Self, ProbeError>
    where
        S: ProbeSource + ?Sized,
    {
        let observations = source.observations()?;
        Ok(Self::from_observations(observations))
    }

    /// Load a CSV probe log, degrading to an empty log if it cannot be read.
    ///
    /// The failure is logged at warn level. Use [`from_source`](Self::from_source)
    /// with a [`FileSource`] to surface it instead.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        let mut source = FileSource::new(path);
        match Self::from_source(&mut source) {
            Ok(log) => log,
            Err(err) => {
                warn!(error = %err, "probe log unavailable, continuing with no records");
                Self::default()
            }
        }
    }

    /// The underlying record store.
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Observed addresses in first-seen order.
    pub fn addresses(&self) -> impl Iterator<Item = &Address> {
        self.store.addresses()
    }

    /// Observed subnets in first-seen order.
    pub fn subnets(&self) -> impl Iterator<Item = &Subnet> {
        self.subnets.subnets()
    }

    pub fn members_of(&self, subnet: &Subnet) -> Result<&[Address], ProbeError> {
        self.subnets.members_of(subnet)
    }

    pub fn records_for(
        &self,
        address: &Address,
    ) -> Result<impl Iterator<Item = (Timestamp, ProbeValue)> + '_, ProbeError> {
        self.store.records_for(address)
    }

    /// Failure intervals for one address.
    pub fn address_failures(
        &self,
        address: &Address,
        threshold: i64,
    ) -> Result<Vec<Interval>, ProbeError> {
        let series = self.series(address)?;
        Ok(series_failures(series, normalize_threshold(threshold)))
    }

    /// High-load intervals for one address.
    pub fn address_high_load(
        &self,
        address: &Address,
        window: usize,
        average: f64,
    ) -> Result<Vec<Interval>, ProbeError> {
        let series = self.series(address)?;
        Ok(high_load_intervals(entries(series), window, average))
    }

    /// Failure intervals shared by every member of `subnet`.
    ///
    /// Boundaries come from the subnet's first-seen member. A subnet with a
    /// single member reports that member's failures.
    pub fn subnet_failures(
        &self,
        subnet: &Subnet,
        threshold: i64,
        tolerance: Duration,
    ) -> Result<Vec<Interval>, ProbeError> {
        let threshold = normalize_threshold(threshold);
        let members = self
            .members_of(subnet)?
            .iter()
            .map(|address| self.series(address).map(|s| series_failures(s, threshold)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(correlate(&members, tolerance))
    }

    /// Failure periods for every address.
    ///
    /// A threshold of 0 or less is treated as 1.
    pub fn find_all_failure(&self, threshold: i64) -> Vec<AddressPeriod> {
        let threshold = normalize_threshold(threshold);
        self.store
            .addresses()
            .filter_map(|address| self.store.series(address).map(|s| (address, s)))
            .flat_map(|(address, series)| {
                series_failures(series, threshold)
                    .into_iter()
                    .map(move |interval| AddressPeriod::new(*address, &interval))
            })
            .collect()
    }

    /// High-load periods for every address.
    pub fn find_high_load(&self, window: usize, average: f64) -> Vec<AddressPeriod> {
        self.store
            .addresses()
            .filter_map(|address| self.store.series(address).map(|s| (address, s)))
            .flat_map(|(address, series)| {
                high_load_intervals(entries(series), window, average)
                    .into_iter()
                    .map(move |interval| AddressPeriod::new(*address, &interval))
            })
            .collect()
    }

    /// Failure periods shared across every subnet's members.
    pub fn find_all_subnet_failure(
        &self,
        threshold: i64,
        tolerance: Duration,
    ) -> Vec<SubnetPeriod> {
        let mut result = Vec::new();
        for subnet in self.subnets.subnets() {
            match self.subnet_failures(subnet, threshold, tolerance) {
                Ok(intervals) => result.extend(
                    intervals
                        .iter()
                        .map(|interval| SubnetPeriod::new(*subnet, interval)),
                ),
                // Index and store are built together, so this is unreachable.
                Err(err) => debug!(%subnet, error = %err, "skipping subnet"),
            }
        }
        result
    }

    fn series(&self, address: &Address) -> Result<&Series, ProbeError> {
        self.store
            .series(address)
            .ok_or(ProbeError::AddressNotFound(*address))
    }
}

fn entries(series: &Series) -> impl Iterator<Item = (Timestamp, ProbeValue)> + '_ {
    series.iter().map(|(at, value)| (*at, *value))
}

fn series_failures(series: &Series, threshold: usize) -> Vec<Interval> {
    failure_intervals(entries(series), threshold)
}
