//! Descriptive statistics over in-memory product values.
//!
//! Everything here is pure: callers load the product set once and pass
//! slices in.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Tukey fence multiplier for box plot whiskers
const WHISKER_IQR_FACTOR: f64 = 1.5;

/// Round half away from zero to two decimals
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// One equal-width histogram bucket covering `[start, end)`; the last bucket is closed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: u64,
}

/// Split `[min, max]` of `values` into `bins` equal-width buckets.
///
/// When every value is identical the range becomes the unit-width span
/// centred on that value. Empty input gives no buckets.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }

    let mut min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let mut max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if min == max {
        min -= 0.5;
        max += 0.5;
    }

    let width = (max - min) / bins as f64;
    let mut counts = vec![0u64; bins];

    for &value in values {
        let index = ((value - min) / width).floor() as usize;
        counts[index.min(bins - 1)] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: min + width * i as f64,
            end: if i + 1 == bins {
                max
            } else {
                min + width * (i + 1) as f64
            },
            count,
        })
        .collect()
}

/// Quantile `q` in `[0, 1]` of ascending `sorted`, interpolating linearly
/// between the closest ranks. `sorted` must be non-empty.
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;

    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

/// Five-number summary of one group plus the points beyond its whiskers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BoxSummary {
    pub group: String,
    pub lower_whisker: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

impl BoxSummary {
    /// Summarise one group's values; `None` for an empty group
    pub fn from_values(group: impl Into<String>, values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let q1 = quantile(&sorted, 0.25);
        let median = quantile(&sorted, 0.5);
        let q3 = quantile(&sorted, 0.75);
        let iqr = q3 - q1;
        let low_fence = q1 - WHISKER_IQR_FACTOR * iqr;
        let high_fence = q3 + WHISKER_IQR_FACTOR * iqr;

        let (inside, outliers): (Vec<f64>, Vec<f64>) = sorted
            .iter()
            .partition(|v| (low_fence..=high_fence).contains(*v));

        // The median always lies inside the fences, so `inside` is never empty
        let lower_whisker = inside.first().copied().unwrap_or(median);
        let upper_whisker = inside.last().copied().unwrap_or(median);

        Some(Self {
            group: group.into(),
            lower_whisker,
            q1,
            median,
            q3,
            upper_whisker,
            outliers,
        })
    }
}

/// Group `(label, value)` pairs by label in first-seen order and summarise each group
pub fn box_summaries<'a, I>(pairs: I) -> Vec<BoxSummary>
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    let mut groups: Vec<(&str, Vec<f64>)> = Vec::new();

    for (label, value) in pairs {
        match groups.iter_mut().find(|(g, _)| *g == label) {
            Some((_, values)) => values.push(value),
            None => groups.push((label, vec![value])),
        }
    }

    groups
        .into_iter()
        .filter_map(|(label, values)| BoxSummary::from_values(label, &values))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(4.0), 4.0);
        assert_eq!(round2(3.14159), 3.14);
        assert_eq!(round2(2.675_1), 2.68);
    }

    #[test]
    fn test_histogram_counts_every_value() {
        let values = [1.0, 1.5, 2.0, 3.3, 4.1, 4.4, 5.0];
        let bins = histogram(&values, 10);

        assert_eq!(bins.len(), 10);
        assert_eq!(bins.iter().map(|b| b.count).sum::<u64>(), 7);
        assert_eq!(bins[0].start, 1.0);
        assert_eq!(bins[9].end, 5.0);
        // max lands in the closed last bucket
        assert_eq!(bins[9].count, 1);
    }

    #[test]
    fn test_histogram_identical_values() {
        let bins = histogram(&[4.0, 4.0, 4.0], 10);

        assert_eq!(bins.len(), 10);
        assert_eq!(bins[0].start, 3.5);
        assert_eq!(bins[9].end, 4.5);
        assert_eq!(bins.iter().map(|b| b.count).sum::<u64>(), 3);
    }

    #[test]
    fn test_histogram_empty() {
        assert!(histogram(&[], 10).is_empty());
    }

    #[test]
    fn test_quantile_interpolates() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&sorted, 0.0), 1.0);
        assert_eq!(quantile(&sorted, 0.5), 2.5);
        assert_eq!(quantile(&sorted, 0.25), 1.75);
        assert_eq!(quantile(&sorted, 1.0), 4.0);
        assert_eq!(quantile(&[7.0], 0.75), 7.0);
    }

    #[test]
    fn test_box_summary_flags_outliers() {
        let summary =
            BoxSummary::from_values("Snacks", &[10.0, 12.0, 11.0, 13.0, 12.0, 100.0]).unwrap();

        assert_eq!(summary.median, 12.0);
        assert_eq!(summary.outliers, vec![100.0]);
        assert_eq!(summary.lower_whisker, 10.0);
        assert_eq!(summary.upper_whisker, 13.0);
    }

    #[test]
    fn test_box_summary_single_value() {
        let summary = BoxSummary::from_values("Tea", &[5.0]).unwrap();
        assert_eq!(summary.q1, 5.0);
        assert_eq!(summary.q3, 5.0);
        assert_eq!(summary.lower_whisker, 5.0);
        assert!(summary.outliers.is_empty());
    }

    #[test]
    fn test_box_summaries_keep_first_seen_order() {
        let pairs = vec![("Zeta", 1.0), ("Acme", 2.0), ("Zeta", 3.0)];
        let summaries = box_summaries(pairs);

        let groups: Vec<_> = summaries.iter().map(|s| s.group.as_str()).collect();
        assert_eq!(groups, vec!["Zeta", "Acme"]);
        assert_eq!(summaries[0].median, 2.0);
    }
}
