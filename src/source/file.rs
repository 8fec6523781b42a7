//! File-based data source.
//!
//! Reads a comma-delimited probe log. Each line carries at least three
//! fields: `timestamp,address,value`. Extra trailing fields are ignored.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, info};

use super::{Observation, ProbeSource};
use crate::ProbeError;

/// A data source that reads probe observations from a CSV file.
///
/// The file is read in full on every call to
/// [`observations`](ProbeSource::observations).
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self { path, description }
    }

    /// Returns the path being read.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProbeSource for FileSource {
    fn observations(&mut self) -> Result<Vec<Observation>, ProbeError> {
        let file = File::open(&self.path).map_err(|source| ProbeError::Input {
            source_name: self.path.display().to_string(),
            source,
        })?;
        read_observations(file, &self.description)
    }

    fn description(&self) -> &str {
        &self.description
    }
}

/// Read every valid observation from a comma-delimited reader.
///
/// Malformed lines are skipped and logged at debug level. Only an I/O failure
/// of the underlying reader is returned as an error.
pub fn read_observations<R: Read>(
    reader: R,
    source_name: &str,
) -> Result<Vec<Observation>, ProbeError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut observations = Vec::new();
    let mut skipped = 0usize;

    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(err) if err.is_io_error() => {
                return Err(ProbeError::Input {
                    source_name: source_name.to_string(),
                    source: err.into(),
                });
            }
            Err(err) => {
                let line = err.position().map_or(0, |p| p.line());
                debug!(line, error = %err, "skipping unreadable record");
                skipped += 1;
                continue;
            }
        };

        match parse_record(&record) {
            Ok(observation) => observations.push(observation),
            Err(err) => {
                debug!(%err, "skipping record");
                skipped += 1;
            }
        }
    }

    info!(
        source = source_name,
        accepted = observations.len(),
        skipped,
        "loaded probe log"
    );
    Ok(observations)
}

fn parse_record(record: &StringRecord) -> Result<Observation, ProbeError> {
    let line = record.position().map_or(0, |p| p.line());
    match (record.get(0), record.get(1), record.get(2)) {
        (Some(at), Some(address), Some(value)) => {
            Observation::from_tokens(at, address, value).map_err(|e| ProbeError::record(line, e))
        }
        _ => Err(ProbeError::RecordParse {
            line,
            reason: format!("expected at least 3 fields, found {}", record.len()),
        }),
    }
}
