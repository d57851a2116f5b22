use serde::Serialize;

use crate::trial::Trajectory;

/// Spread of one per-age quantity across all trials.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PercentileBand {
    pub p10: f64,
    pub p20: f64,
    pub p50: f64,
    pub p80: f64,
    pub p90: f64,
}

/// Percentiles of `values` with linear interpolation between order
/// statistics at fractional rank `p * (n - 1)`.
///
/// `values` must be non-empty; the orchestrator guarantees at least one
/// trial before aggregation runs.
pub fn percentile_band(values: &[f64]) -> PercentileBand {
    debug_assert!(!values.is_empty(), "percentile_band requires samples");
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let interp = |p: f64| -> f64 {
        let h = p * (sorted.len() - 1) as f64;
        let lo = h.floor() as usize;
        let hi = (lo + 1).min(sorted.len() - 1);
        sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo])
    };

    PercentileBand {
        p10: interp(0.10),
        p20: interp(0.20),
        p50: interp(0.50),
        p80: interp(0.80),
        p90: interp(0.90),
    }
}

/// One band per simulated year, over whichever series `select` picks
/// out of each trajectory.
pub fn bands_by_year(
    trials: &[Trajectory],
    select: impl Fn(&Trajectory) -> &[f64],
) -> Vec<PercentileBand> {
    let years = trials.first().map_or(0, |t| select(t).len());
    (0..years)
        .map(|year| {
            let samples: Vec<f64> = trials.iter().map(|t| select(t)[year]).collect();
            percentile_band(&samples)
        })
        .collect()
}

/// Share of trials that never ran out of money, as a percentage.
pub fn success_rate(trials: &[Trajectory]) -> f64 {
    if trials.is_empty() {
        return 0.0;
    }
    let survived = trials.iter().filter(|t| !t.exhausted).count();
    100.0 * survived as f64 / trials.len() as f64
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn trial(assets: Vec<f64>, exhausted: bool) -> Trajectory {
        Trajectory { spending: vec![0.0; assets.len()], assets, exhausted }
    }

    #[test]
    fn percentiles_interpolate_on_integer_ranks() {
        // n = 11, h = p * 10 lands exactly on order statistics.
        let values: Vec<f64> = (0..=10).map(f64::from).collect();
        let band = percentile_band(&values);
        assert_eq!(band.p10, 1.0);
        assert_eq!(band.p20, 2.0);
        assert_eq!(band.p50, 5.0);
        assert_eq!(band.p80, 8.0);
        assert_eq!(band.p90, 9.0);
    }

    #[test]
    fn percentiles_interpolate_between_ranks() {
        // n = 2: h = p, straight line between the two samples.
        let band = percentile_band(&[0.0, 10.0]);
        assert!((band.p10 - 1.0).abs() < 1e-12);
        assert!((band.p50 - 5.0).abs() < 1e-12);
        assert!((band.p90 - 9.0).abs() < 1e-12);
    }

    #[test]
    fn single_sample_collapses_the_band() {
        let band = percentile_band(&[7.5]);
        assert_eq!(band.p10, 7.5);
        assert_eq!(band.p50, 7.5);
        assert_eq!(band.p90, 7.5);
    }

    #[test]
    fn input_order_does_not_matter() {
        let a = percentile_band(&[3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0]);
        let b = percentile_band(&[9.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0, 1.0]);
        assert_eq!(a, b);
    }

    #[test]
    fn bands_by_year_aggregates_across_trials() {
        let trials = vec![
            trial(vec![0.0, 100.0], false),
            trial(vec![5.0, 200.0], false),
            trial(vec![10.0, 300.0], false),
        ];
        let bands = bands_by_year(&trials, |t| &t.assets);
        assert_eq!(bands.len(), 2);
        assert_eq!(bands[0].p50, 5.0);
        assert_eq!(bands[1].p50, 200.0);
    }

    #[test]
    fn success_rate_counts_surviving_trials() {
        let trials = vec![
            trial(vec![1.0], false),
            trial(vec![0.0], true),
            trial(vec![1.0], false),
            trial(vec![0.0], true),
        ];
        assert_eq!(success_rate(&trials), 50.0);
        assert_eq!(success_rate(&[]), 0.0);
    }

    proptest! {
        /// Band quantiles are ordered and bounded by the sample range.
        #[test]
        fn band_is_monotone_and_bounded(
            values in prop::collection::vec(-1.0e9..1.0e9f64, 1..200)
        ) {
            let band = percentile_band(&values);
            prop_assert!(band.p10 <= band.p20);
            prop_assert!(band.p20 <= band.p50);
            prop_assert!(band.p50 <= band.p80);
            prop_assert!(band.p80 <= band.p90);

            let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
            let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            prop_assert!(band.p10 >= min && band.p90 <= max);
        }
    }
}
