//! Interval detection over one address's time series.
//!
//! A run is a maximal stretch of consecutive qualifying records. Runs shorter
//! than the run-length threshold are discarded. A run that is still open
//! after the last record is reported without a return time.

use probewatch_types::{Interval, ProbeValue, Timestamp};

use super::window::LoadEvaluator;

/// State machine that turns per-record verdicts into intervals.
#[derive(Debug, Clone)]
pub struct RunTracker {
    threshold: usize,
    count: usize,
    start: Option<Timestamp>,
    last: Option<Timestamp>,
    intervals: Vec<Interval>,
}

impl RunTracker {
    /// Create a tracker that reports runs of at least `threshold` records.
    ///
    /// The threshold is used as given; callers normalize it.
    pub fn new(threshold: usize) -> Self {
        Self {
            threshold,
            count: 0,
            start: None,
            last: None,
            intervals: Vec::new(),
        }
    }

    /// Feed the next record. Records must arrive in ascending time order.
    pub fn observe(&mut self, at: Timestamp, qualifies: bool) {
        if qualifies {
            if self.count == 0 {
                self.start = Some(at);
            }
            self.count += 1;
            self.last = Some(at);
        } else if self.count >= 1 {
            self.close(Some(at));
        }
    }

    /// Close any open run and return the intervals found.
    pub fn finish(mut self) -> Vec<Interval> {
        if self.count >= 1 {
            self.close(None);
        }
        self.intervals
    }

    fn close(&mut self, return_time: Option<Timestamp>) {
        if self.count >= self.threshold {
            if let (Some(occurrence), Some(last_event)) = (self.start, self.last) {
                self.intervals.push(Interval {
                    occurrence,
                    last_event,
                    return_time,
                    records: self.count,
                });
            }
        }
        self.count = 0;
        self.start = None;
        self.last = None;
    }
}

/// Scan `records` and report runs where `qualifies` holds.
pub fn detect_runs<I, F>(records: I, threshold: usize, mut qualifies: F) -> Vec<Interval>
where
    I: IntoIterator<Item = (Timestamp, ProbeValue)>,
    F: FnMut(ProbeValue) -> bool,
{
    let mut tracker = RunTracker::new(threshold);
    for (at, value) in records {
        tracker.observe(at, qualifies(value));
    }
    tracker.finish()
}

/// Runs of consecutive "no response" records.
pub fn failure_intervals<I>(records: I, threshold: usize) -> Vec<Interval>
where
    I: IntoIterator<Item = (Timestamp, ProbeValue)>,
{
    detect_runs(records, threshold, |value| value.is_no_response())
}

/// Runs where the trailing `window_size` average is at least `average`.
pub fn high_load_intervals<I>(records: I, window_size: usize, average: f64) -> Vec<Interval>
where
    I: IntoIterator<Item = (Timestamp, ProbeValue)>,
{
    let mut evaluator = LoadEvaluator::new(window_size, average);
    detect_runs(records, 1, |value| evaluator.observe(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records one second apart starting at 2022-10-19 13:33:00.
    fn series(values: &[&str]) -> Vec<(Timestamp, ProbeValue)> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let at = Timestamp::from_parts(2022, 10, 19, 13, 33, i as u32).unwrap();
                (at, v.parse().unwrap())
            })
            .collect()
    }

    fn at(second: u32) -> Timestamp {
        Timestamp::from_parts(2022, 10, 19, 13, 33, second).unwrap()
    }

    /// Four failure runs of length 1, 2, 3 and 4.
    fn four_runs() -> Vec<(Timestamp, ProbeValue)> {
        series(&[
            "-", "1", // run of 1
            "-", "-", "2", // run of 2
            "-", "-", "-", "3", // run of 3
            "-", "-", "-", "-", "4", // run of 4
        ])
    }

    #[test]
    fn single_run_with_recovery() {
        let intervals = failure_intervals(series(&["-", "-", "5"]), 1);
        assert_eq!(
            intervals,
            vec![Interval {
                occurrence: at(0),
                last_event: at(1),
                return_time: Some(at(2)),
                records: 2,
            }]
        );
    }

    #[test]
    fn open_run_has_no_return_time() {
        let intervals = failure_intervals(series(&["5", "-", "-"]), 1);
        assert_eq!(intervals.len(), 1);
        assert_eq!(intervals[0].occurrence, at(1));
        assert_eq!(intervals[0].last_event, at(2));
        assert_eq!(intervals[0].return_time, None);
        assert_eq!(intervals[0].end(), at(2));
    }

    #[test]
    fn empty_series_has_no_intervals() {
        assert!(failure_intervals(Vec::new(), 1).is_empty());
        assert!(high_load_intervals(Vec::new(), 1, 0.0).is_empty());
    }

    #[test]
    fn threshold_filters_short_runs() {
        assert_eq!(failure_intervals(four_runs(), 1).len(), 4);

        let long = failure_intervals(four_runs(), 3);
        assert_eq!(long.len(), 2);
        assert_eq!(long[0].records, 3);
        assert_eq!(long[0].occurrence, at(5));
        assert_eq!(long[0].return_time, Some(at(8)));
        assert_eq!(long[1].records, 4);

        assert!(failure_intervals(four_runs(), 5).is_empty());
    }

    #[test]
    fn threshold_is_monotone() {
        let mut previous = usize::MAX;
        for threshold in 1..=6 {
            let intervals = failure_intervals(four_runs(), threshold);
            assert!(intervals.len() <= previous);
            assert!(intervals.iter().all(|i| i.records >= threshold));
            previous = intervals.len();
        }
    }

    #[test]
    fn intervals_are_ordered_and_disjoint() {
        let intervals = failure_intervals(four_runs(), 1);
        for pair in intervals.windows(2) {
            assert!(pair[0].occurrence < pair[1].occurrence);
            assert!(pair[0].end() <= pair[1].occurrence);
        }
    }

    #[test]
    fn short_run_still_resets_count() {
        // Two runs of 2 must not merge into one run of 4.
        let intervals = failure_intervals(series(&["-", "-", "1", "-", "-", "1"]), 3);
        assert!(intervals.is_empty());
    }

    #[test]
    fn tracker_accepts_external_verdicts() {
        let mut tracker = RunTracker::new(2);
        tracker.observe(at(0), true);
        tracker.observe(at(1), false);
        tracker.observe(at(2), true);
        tracker.observe(at(3), true);
        let intervals = tracker.finish();

        assert_eq!(intervals.len(), 1);
        assert_eq!(intervals[0].occurrence, at(2));
        assert!(intervals[0].is_open());
    }

    #[test]
    fn high_load_sawtooth() {
        let records = series(&["1", "2", "3", "4", "5", "1", "1", "1", "1"]);

        // Windows at t3..t5 average 3, 4 and 3.33; t6 drops to 2.33.
        let intervals = high_load_intervals(records.clone(), 3, 3.0);
        assert_eq!(
            intervals,
            vec![Interval {
                occurrence: at(3),
                last_event: at(5),
                return_time: Some(at(6)),
                records: 3,
            }]
        );

        assert!(high_load_intervals(records.clone(), 3, 5.0).is_empty());

        let narrow = high_load_intervals(records, 1, 3.0);
        assert_eq!(narrow.len(), 1);
        assert_eq!(narrow[0].occurrence, at(2));
        assert_eq!(narrow[0].return_time, Some(at(5)));
    }

    #[test]
    fn narrow_window_splits_double_sawtooth() {
        let records = series(&["1", "5", "1", "5", "1"]);
        assert_eq!(high_load_intervals(records.clone(), 1, 3.0).len(), 2);
        // avg(5,1)=3 and avg(1,5)=3 keep a width-2 window loaded throughout.
        assert_eq!(high_load_intervals(records, 2, 3.0).len(), 1);
    }

    #[test]
    fn high_load_ignores_filling_window() {
        let records = series(&["9", "9", "9"]);
        assert!(high_load_intervals(records, 3, 1.0).is_empty());

        let records = series(&["9", "9", "9", "9"]);
        let intervals = high_load_intervals(records, 3, 1.0);
        assert_eq!(intervals.len(), 1);
        assert_eq!(intervals[0].occurrence, at(3));
        assert!(intervals[0].is_open());
    }

    #[test]
    fn raising_average_shrinks_coverage() {
        let records = series(&["1", "2", "3", "4", "5", "1", "6", "2", "8", "-", "3", "9"]);
        let averages = [0.0, 1.0, 2.5, 3.0, 4.0, 5.5, 7.0, 10.0];

        for pair in averages.windows(2) {
            let loose = high_load_intervals(records.clone(), 2, pair[0]);
            let strict = high_load_intervals(records.clone(), 2, pair[1]);

            let covered = |v: &[Interval]| v.iter().map(|i| i.records).sum::<usize>();
            assert!(covered(&strict[..]) <= covered(&loose[..]));

            for inner in &strict {
                assert!(
                    loose.iter().any(|outer| outer.occurrence <= inner.occurrence
                        && inner.last_event <= outer.last_event),
                    "{:?} not inside any interval at average {}",
                    inner,
                    pair[0]
                );
            }
        }
    }

    #[test]
    fn raising_average_can_split_a_run() {
        let records = series(&["0", "5", "3", "5"]);
        assert_eq!(high_load_intervals(records.clone(), 1, 3.0).len(), 1);
        assert_eq!(high_load_intervals(records, 1, 4.0).len(), 2);
    }

    #[test]
    fn sawtooth_count_never_grows_with_average() {
        let records = series(&["1", "2", "3", "4", "5", "1", "1", "1", "1"]);
        let mut previous = usize::MAX;
        for average in [1.0, 2.0, 3.0, 4.0, 5.0] {
            let count = high_load_intervals(records.clone(), 3, average).len();
            assert!(count <= previous, "average {} reported {}", average, count);
            previous = count;
        }
    }

    #[test]
    fn all_timeouts_never_count_as_load() {
        let records = series(&["-", "-", "-", "-"]);
        assert!(high_load_intervals(records, 2, 0.0).is_empty());
    }
}
