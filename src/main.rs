use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use probewatch::{FileSource, OutputFormat, ProbeLog, Query, Report, Settings};

#[derive(Parser, Debug)]
#[command(name = "probewatch")]
#[command(about = "Detect failure and high-load periods in probe response-time logs")]
struct Args {
    /// Path to the probe log (timestamp,address,value per line)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Settings file (TOML); PROBEWATCH_* environment variables override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Which queries to run
    #[arg(short, long, value_enum)]
    query: Option<Query>,

    /// Minimum consecutive timeouts reported as a failure
    #[arg(short, long, allow_negative_numbers = true)]
    threshold: Option<i64>,

    /// Number of trailing records averaged for high load
    #[arg(short, long)]
    window: Option<usize>,

    /// Trailing average (ms) at or above which a host is under high load
    #[arg(short, long)]
    average: Option<f64>,

    /// Subnet matching tolerance (e.g., "5s", "1500ms")
    #[arg(long)]
    tolerance: Option<String>,

    /// Output format
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Fail if the probe log cannot be read instead of reporting nothing
    #[arg(long)]
    strict: bool,

    /// Write the JSON report to a file instead of stdout
    #[arg(short, long)]
    export: Option<PathBuf>,
}

impl Args {
    /// Command-line flags take precedence over every other source.
    fn apply(&self, settings: &mut Settings) {
        if let Some(file) = &self.file {
            settings.file = file.clone();
        }
        if let Some(query) = self.query {
            settings.query = query;
        }
        if let Some(threshold) = self.threshold {
            settings.threshold = threshold;
        }
        if let Some(window) = self.window {
            settings.window = window;
        }
        if let Some(average) = self.average {
            settings.average = average;
        }
        if let Some(tolerance) = &self.tolerance {
            settings.tolerance = tolerance.clone();
        }
        if let Some(format) = self.format {
            settings.format = format;
        }
        if self.strict {
            settings.strict = true;
        }
    }
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays clean for reports
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let mut settings =
        Settings::load(args.config.as_deref()).context("Failed to load settings")?;
    args.apply(&mut settings);

    let params = settings.query_params()?;
    let log = load_log(&settings)?;

    info!(
        file = %settings.file.display(),
        query = ?settings.query,
        threshold = params.run_length,
        window = params.window,
        average = params.average,
        tolerance = ?params.tolerance,
        "running detection"
    );
    let report = Report::collect(&log, settings.query, &params);

    // Handle export mode
    if let Some(export_path) = &args.export {
        return export_to_file(&report, export_path);
    }

    match settings.format {
        OutputFormat::Text => print!("{}", report.render_text()),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }
    Ok(())
}

/// Load the probe log, honouring the strict setting
fn load_log(settings: &Settings) -> Result<ProbeLog> {
    if settings.strict {
        let mut source = FileSource::new(&settings.file);
        ProbeLog::from_source(&mut source)
            .with_context(|| format!("Failed to load {}", settings.file.display()))
    } else {
        Ok(ProbeLog::open(&settings.file))
    }
}

/// Export the report to a JSON file
fn export_to_file(report: &Report, export_path: &Path) -> Result<()> {
    let json = report.to_json()?;
    fs::write(export_path, json)
        .with_context(|| format!("Failed to write {}", export_path.display()))?;

    println!("Exported report to: {}", export_path.display());
    Ok(())
}
