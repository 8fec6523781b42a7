//! Subnet-wide failure correlation.

use std::time::Duration;

use probewatch_types::Interval;

/// Default tolerance when matching intervals across hosts.
///
/// Covers the usual probe interval plus timeout skew between hosts.
pub const DEFAULT_TOLERANCE: Duration = Duration::from_secs(5);

/// Intervals every member experienced, within `tolerance`.
///
/// `members` holds one failure list per subnet member in member order. The
/// first member's intervals seed the result and supply the reported
/// boundaries; each member then filters the candidates down to those with a
/// nearly-equal counterpart in its own list. A single member trivially
/// matches itself.
pub fn correlate(members: &[Vec<Interval>], tolerance: Duration) -> Vec<Interval> {
    let Some((seed, _)) = members.split_first() else {
        return Vec::new();
    };

    let mut candidates = seed.clone();
    for intervals in members {
        candidates.retain(|candidate| {
            intervals
                .iter()
                .any(|other| candidate.nearly_equals(other, tolerance))
        });
        if candidates.is_empty() {
            break;
        }
    }
    candidates
}
