use std::time::Duration;

use anyhow::{bail, Result};

/// Suffix to seconds multiplier (order matters: "ms" before "s" before "m")
const UNITS: &[(&str, f64)] = &[
    ("ms", 0.001),
    ("s", 1.0),
    ("m", 60.0),
    ("h", 3_600.0),
];

/// Parse tolerance strings like "5s", "1500ms", "2m", "0.5h".
///
/// A bare number is taken as seconds.
pub fn parse_duration(s: &str) -> Result<Duration> {
    let s = s.trim();

    let (val_str, multiplier) = UNITS
        .iter()
        .find_map(|(suffix, multiplier)| s.strip_suffix(suffix).map(|v| (v, *multiplier)))
        .unwrap_or((s, 1.0));

    let val: f64 = match val_str.trim().parse() {
        Ok(val) => val,
        Err(_) => bail!("Unknown duration format: {}", s),
    };
    if !val.is_finite() || val < 0.0 {
        bail!("Duration must be a non-negative number: {}", s);
    }

    match Duration::try_from_secs_f64(val * multiplier) {
        Ok(duration) => Ok(duration),
        Err(_) => bail!("Duration out of range: {}", s),
    }
}

/// Format a duration for display
pub fn format_duration(d: Duration) -> String {
    let millis = d.as_millis();
    if millis == 0 {
        "0s".to_string()
    } else if millis < 1_000 {
        format!("{}ms", millis)
    } else if millis % 1_000 == 0 {
        format!("{}s", d.as_secs())
    } else {
        format!("{:.3}s", d.as_secs_f64())
    }
}
