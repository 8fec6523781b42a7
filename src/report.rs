//! Rendered query results.
//!
//! Every query reports periods as `start ~ end` with both ends formatted
//! `YYYY-MM-DD HH:MM:SS`.

use std::fmt;

use probewatch_types::{Address, Interval, Period, Subnet};
use serde::{Serialize, Serializer};

use crate::analyzer::{ProbeLog, QueryParams};
use crate::config::Query;

/// Serialize any `Display` value as a string.
fn as_display<T: fmt::Display, S: Serializer>(value: &T, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

/// A failure or high-load period for one address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AddressPeriod {
    pub address: Address,
    #[serde(serialize_with = "as_display")]
    pub period: Period,
}

impl AddressPeriod {
    pub fn new(address: Address, interval: &Interval) -> Self {
        Self {
            address,
            period: interval.period(),
        }
    }
}

impl fmt::Display for AddressPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.address, self.period)
    }
}

/// A failure period shared by every member of a subnet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubnetPeriod {
    pub subnet: Subnet,
    #[serde(serialize_with = "as_display")]
    pub period: Period,
}

impl SubnetPeriod {
    pub fn new(subnet: Subnet, interval: &Interval) -> Self {
        Self {
            subnet,
            period: interval.period(),
        }
    }
}

impl fmt::Display for SubnetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.subnet, self.period)
    }
}

/// Results of one or more queries against a probe log.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Report {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failures: Option<Vec<AddressPeriod>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high_load: Option<Vec<AddressPeriod>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subnet_failures: Option<Vec<SubnetPeriod>>,
}

impl Report {
    /// Run the selected queries.
    pub fn collect(log: &ProbeLog, query: Query, params: &QueryParams) -> Self {
        let mut report = Report::default();

        if matches!(query, Query::Failure | Query::All) {
            report.failures = Some(log.find_all_failure(params.run_length));
        }
        if matches!(query, Query::HighLoad | Query::All) {
            report.high_load = Some(log.find_high_load(params.window, params.average));
        }
        if matches!(query, Query::Subnet | Query::All) {
            report.subnet_failures =
                Some(log.find_all_subnet_failure(params.run_length, params.tolerance));
        }

        report
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// One section per query, one line per period.
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        if let Some(rows) = &self.failures {
            render_section(
                &mut out,
                "Failures",
                rows.iter().map(|r| (r.address.to_string(), r.period)),
            );
        }
        if let Some(rows) = &self.high_load {
            render_section(
                &mut out,
                "High load",
                rows.iter().map(|r| (r.address.to_string(), r.period)),
            );
        }
        if let Some(rows) = &self.subnet_failures {
            render_section(
                &mut out,
                "Subnet failures",
                rows.iter().map(|r| (r.subnet.to_string(), r.period)),
            );
        }

        out
    }
}

fn render_section<I>(out: &mut String, title: &str, rows: I)
where
    I: Iterator<Item = (String, Period)>,
{
    use std::fmt::Write;

    let rows: Vec<_> = rows.collect();
    let _ = writeln!(out, "{} ({}):", title, rows.len());

    let width = rows.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    for (key, period) in rows {
        let _ = writeln!(out, "  {:<width$}  {}", key, period, width = width);
    }
}
