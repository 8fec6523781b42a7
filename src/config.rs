//! Layered settings.
//!
//! Values are resolved in order, later sources winning:
//!
//! 1. built-in defaults
//! 2. an optional TOML file passed with `--config`
//! 3. `PROBEWATCH_*` environment variables
//! 4. command-line flags (applied by the binary)
//!
//! ```toml
//! file = "responses.csv"
//! query = "subnet"
//! threshold = 3
//! window = 5
//! average = 250.0
//! tolerance = "5s"
//! format = "json"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::analyzer::QueryParams;
use crate::data::duration::{format_duration, parse_duration};
use crate::data::DEFAULT_TOLERANCE;

/// Which detection queries to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Query {
    /// Per-address failure periods.
    Failure,
    /// Per-address high-load periods.
    HighLoad,
    /// Subnet-wide failure periods.
    Subnet,
    /// All of the above.
    #[default]
    All,
}

/// How results are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Resolved settings for a run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    /// Probe log to read.
    pub file: PathBuf,
    pub query: Query,
    /// Minimum consecutive failures; non-positive means 1.
    pub threshold: i64,
    /// High-load window size in records.
    pub window: usize,
    /// High-load average threshold, inclusive.
    pub average: f64,
    /// Subnet matching tolerance, e.g. "5s".
    pub tolerance: String,
    pub format: OutputFormat,
    /// Fail instead of reporting nothing when the log cannot be read.
    pub strict: bool,
}

impl Default for Settings {
    fn default() -> Self {
        let params = QueryParams::default();
        Self {
            file: PathBuf::from("responses.csv"),
            query: Query::default(),
            threshold: params.run_length,
            window: params.window,
            average: params.average,
            tolerance: format_duration(DEFAULT_TOLERANCE),
            format: OutputFormat::default(),
            strict: false,
        }
    }
}

impl Settings {
    /// Resolve defaults, the optional config file and the environment.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(config_path, Environment::with_prefix("PROBEWATCH"))
    }

    fn load_with_env(config_path: Option<&Path>, env: Environment) -> Result<Self, ConfigError> {
        let defaults = Settings::default();

        let mut builder = Config::builder()
            .set_default("file", defaults.file.display().to_string())?
            .set_default("query", "all")?
            .set_default("threshold", defaults.threshold)?
            .set_default("window", defaults.window as i64)?
            .set_default("average", defaults.average)?
            .set_default("tolerance", defaults.tolerance)?
            .set_default("format", "text")?
            .set_default("strict", defaults.strict)?;

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path));
        }

        builder
            .add_source(env.try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Detection parameters with the tolerance string parsed.
    ///
    /// The average threshold must be a non-negative number.
    pub fn query_params(&self) -> Result<QueryParams> {
        if !self.average.is_finite() || self.average < 0.0 {
            bail!("Average threshold must be a non-negative number: {}", self.average);
        }
        let tolerance = parse_duration(&self.tolerance)
            .with_context(|| format!("Invalid tolerance {:?}", self.tolerance))?;
        Ok(QueryParams {
            run_length: self.threshold,
            window: self.window,
            average: self.average,
            tolerance,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use std::time::Duration;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let source: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Environment::with_prefix("PROBEWATCH").source(Some(source))
    }

    #[test]
    fn defaults_without_sources() {
        let settings = Settings::load_with_env(None, env(&[])).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.tolerance, "5s");
        assert_eq!(settings.query_params().unwrap(), QueryParams::default());
    }

    #[test]
    fn file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "file = \"probe.csv\"\nquery = \"high-load\"\nthreshold = 3\nwindow = 5\n\
             average = 2.5\ntolerance = \"1500ms\"\nformat = \"json\""
        )
        .unwrap();

        let settings = Settings::load_with_env(Some(file.path()), env(&[])).unwrap();
        assert_eq!(settings.file, PathBuf::from("probe.csv"));
        assert_eq!(settings.query, Query::HighLoad);
        assert_eq!(settings.threshold, 3);
        assert_eq!(settings.window, 5);
        assert_eq!(settings.average, 2.5);
        assert_eq!(settings.format, OutputFormat::Json);
        assert_eq!(
            settings.query_params().unwrap().tolerance,
            Duration::from_millis(1500)
        );
    }

    #[test]
    fn environment_overrides_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "threshold = 3").unwrap();

        let settings = Settings::load_with_env(
            Some(file.path()),
            env(&[("PROBEWATCH_THRESHOLD", "4"), ("PROBEWATCH_STRICT", "true")]),
        )
        .unwrap();
        assert_eq!(settings.threshold, 4);
        assert!(settings.strict);
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let missing = Path::new("/nonexistent/probewatch.toml");
        let result = Settings::load_with_env(Some(missing), env(&[]));
        assert!(result.is_err());
    }

    #[test]
    fn bad_tolerance_is_reported() {
        let settings = Settings {
            tolerance: "soon".to_string(),
            ..Settings::default()
        };
        let err = settings.query_params().unwrap_err();
        assert!(err.to_string().contains("soon"));
    }

    #[test]
    fn out_of_range_tolerance_is_reported() {
        let settings = Settings {
            tolerance: "1e20s".to_string(),
            ..Settings::default()
        };
        assert!(settings.query_params().is_err());
    }

    #[test]
    fn negative_or_nan_average_is_rejected() {
        for average in [-1.0, f64::NAN, f64::INFINITY] {
            let settings = Settings {
                average,
                ..Settings::default()
            };
            let err = settings.query_params().unwrap_err();
            assert!(err.to_string().contains("Average threshold"));
        }

        let zero = Settings {
            average: 0.0,
            ..Settings::default()
        };
        assert_eq!(zero.query_params().unwrap().average, 0.0);
    }
}
