//! Lead-time crossing detection between two consecutive polls.

use chrono::Duration;

/// Lead-times (in minutes) crossed between two remaining-time samples.
///
/// `L` is crossed iff `previous > L` and `current <= L`. Each lead-time is
/// checked on its own, so a coarse poll can report several at once; they are
/// returned in the order configured. When a new cycle starts `current` jumps
/// above `previous`, which never satisfies the rule above.
pub fn crossed_thresholds(previous: Duration, current: Duration, lead_minutes: &[u32]) -> Vec<u32> {
    lead_minutes
        .iter()
        .copied()
        .filter(|&minutes| {
            let threshold = Duration::minutes(i64::from(minutes));
            previous > threshold && current <= threshold
        })
        .collect()
}
