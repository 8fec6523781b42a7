//! Trailing-window load evaluation.

use std::collections::VecDeque;

use probewatch_types::ProbeValue;

/// The most recent `size` probe values for one address.
///
/// A window only yields an average once more than `size` values have been
/// pushed, so the first `size` records of a series are never evaluated.
#[derive(Debug, Clone)]
pub struct LoadWindow {
    size: usize,
    values: VecDeque<ProbeValue>,
}

impl LoadWindow {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            values: VecDeque::with_capacity(size.saturating_add(1).min(1024)),
        }
    }

    /// Push the next value.
    ///
    /// Returns `None` while the window is still filling, or when it holds no
    /// numeric values; otherwise the average of the numeric values.
    pub fn push(&mut self, value: ProbeValue) -> Option<f64> {
        self.values.push_back(value);
        if self.values.len() <= self.size {
            return None;
        }
        self.values.pop_front();
        self.average()
    }

    /// Average over numeric values only; timeouts are excluded.
    pub fn average(&self) -> Option<f64> {
        let (count, total) = self
            .values
            .iter()
            .filter_map(ProbeValue::millis)
            .fold((0u64, 0u128), |(n, sum), ms| (n + 1, sum + u128::from(ms)));

        (count > 0).then(|| total as f64 / count as f64)
    }
}

/// Per-record high-load verdicts for one address.
#[derive(Debug, Clone)]
pub struct LoadEvaluator {
    window: LoadWindow,
    threshold: f64,
}

impl LoadEvaluator {
    pub fn new(window_size: usize, threshold: f64) -> Self {
        Self {
            window: LoadWindow::new(window_size),
            threshold,
        }
    }

    /// Consume the next record; true when the trailing average is at or
    /// above the threshold.
    pub fn observe(&mut self, value: ProbeValue) -> bool {
        self.window
            .push(value)
            .is_some_and(|average| average >= self.threshold)
    }
}
