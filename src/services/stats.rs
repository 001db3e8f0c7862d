//! Read-side aggregation folds.
//!
//! Every function here is pure over already-fetched rows so the math can be
//! exercised without a database. All of them tolerate empty input and return
//! zeros/empty maps rather than erroring.

use std::collections::BTreeMap;

/// Mood trend labels. Threshold comparisons are strict: a difference of
/// exactly 0.3 is "stable".
const TREND_THRESHOLD: f64 = 0.3;
const TREND_WINDOW: usize = 7;

pub fn average(values: &[i16]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|v| *v as f64).sum::<f64>() / values.len() as f64
}

/// Count per value 1-5, keyed by the value as a string ("1".."5").
/// Always contains all five keys so clients can chart without gap handling.
pub fn distribution(values: &[i16]) -> BTreeMap<String, i64> {
    let mut dist: BTreeMap<String, i64> = (1..=5).map(|v| (v.to_string(), 0)).collect();
    for v in values {
        if (1..=5).contains(v) {
            *dist.entry(v.to_string()).or_insert(0) += 1;
        }
    }
    dist
}

/// Threshold comparison behind the trend heuristic. Strictly greater than
/// the threshold counts as movement; a difference of exactly 0.3 does not.
pub fn trend_label(oldest_mean: f64, recent_mean: f64) -> &'static str {
    let diff = recent_mean - oldest_mean;
    if diff > TREND_THRESHOLD {
        "improving"
    } else if diff < -TREND_THRESHOLD {
        "declining"
    } else {
        "stable"
    }
}

/// Two-window trend heuristic: mean of the most recent (up to) seven values
/// against the mean of the oldest seven in the window. Not a regression.
///
/// `values` must be ordered oldest first.
pub fn mood_trend(values: &[i16]) -> &'static str {
    if values.len() < 2 {
        return "stable";
    }
    let oldest: Vec<i16> = values.iter().take(TREND_WINDOW).copied().collect();
    let recent: Vec<i16> = values
        .iter()
        .rev()
        .take(TREND_WINDOW)
        .copied()
        .collect();

    trend_label(average(&oldest), average(&recent))
}

/// Completed entries over expected entries, clamped to [0, 1].
pub fn completion_rate(completed: i64, expected: i64) -> f64 {
    if expected <= 0 {
        return 0.0;
    }
    (completed as f64 / expected as f64).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_of_empty_is_zero() {
        assert_eq!(average(&[]), 0.0);
    }

    #[test]
    fn distribution_prefills_all_five_buckets() {
        let dist = distribution(&[]);
        assert_eq!(dist.len(), 5);
        assert!(dist.values().all(|&c| c == 0));
    }

    #[test]
    fn distribution_counts_values() {
        let dist = distribution(&[1, 3, 3, 5, 5, 5]);
        assert_eq!(dist["1"], 1);
        assert_eq!(dist["2"], 0);
        assert_eq!(dist["3"], 2);
        assert_eq!(dist["5"], 3);
    }

    #[test]
    fn trend_improving_when_recent_window_is_higher() {
        // Oldest seven average 3.0, recent seven average 3.5714… → improving.
        let values = [3, 3, 3, 3, 3, 3, 3, 4, 4, 4, 3, 3, 4, 3];
        assert_eq!(mood_trend(&values), "improving");
    }

    #[test]
    fn trend_declining_when_recent_window_is_lower() {
        let values = [4, 4, 4, 4, 4, 4, 4, 3, 3, 3, 3, 3, 3, 3];
        assert_eq!(mood_trend(&values), "declining");
    }

    #[test]
    fn difference_of_exactly_threshold_is_stable() {
        assert_eq!(trend_label(0.0, 0.3), "stable");
        assert_eq!(trend_label(0.3, 0.0), "stable");
        assert_eq!(trend_label(0.0, 0.301), "improving");
        assert_eq!(trend_label(0.301, 0.0), "declining");
    }

    #[test]
    fn sub_threshold_movement_is_stable() {
        // Recent window averages 3.2857 → diff below 0.3.
        let values = [3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 4, 4];
        assert_eq!(mood_trend(&values), "stable");
    }

    #[test]
    fn trend_of_short_series_is_stable() {
        assert_eq!(mood_trend(&[]), "stable");
        assert_eq!(mood_trend(&[5]), "stable");
    }

    #[test]
    fn completion_rate_handles_zero_expected() {
        assert_eq!(completion_rate(3, 0), 0.0);
    }

    #[test]
    fn completion_rate_is_clamped() {
        assert_eq!(completion_rate(10, 5), 1.0);
        assert_eq!(completion_rate(3, 6), 0.5);
    }
}
