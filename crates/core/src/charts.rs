//! Synthetic chart series derived from the scalar metric strings.
//!
//! The charts are illustrative, not authoritative: each generator reduces a
//! free-form metric string to a bare number, then synthesises a small series
//! around it with bounded jitter. The RNG is injected so tests can seed it;
//! production callers pass `rand::thread_rng()`.
//!
//! Numeric extraction is deliberately lossy: every character outside
//! `[0-9.]` is dropped, so `"$125,000"` parses to 125000 but `"$125K"`
//! parses to 125 and `"18 months"` and `"18%"` both parse to 18. The charts
//! only need plausible magnitudes, so nothing here tries to be smarter.

use crate::update::UpdateRecord;
use chrono::{DateTime, Datelike, Utc};
use rand::Rng;
use serde::Serialize;

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Number of points in each monthly series.
const SERIES_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenueTrendPoint {
    pub month: String,
    pub revenue: f64,
    pub growth: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BurnRatePoint {
    pub month: String,
    pub burn_rate: f64,
    pub runway: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowthTrajectoryPoint {
    pub month: String,
    pub growth: f64,
    pub target: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsComparisonPoint {
    pub metric: String,
    pub current: f64,
    pub previous: f64,
}

/// The four derived series, recomputed on every render and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub revenue_trend: Vec<RevenueTrendPoint>,
    pub burn_rate: Vec<BurnRatePoint>,
    pub growth_trajectory: Vec<GrowthTrajectoryPoint>,
    pub metrics_comparison: Vec<MetricsComparisonPoint>,
}

impl ChartSeries {
    /// Derives all four series from a record's scalar metrics.
    pub fn for_record<R: Rng + ?Sized>(
        record: &UpdateRecord,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Self {
        let revenue = record.revenue.as_deref().unwrap_or("");
        let burn_rate = record.burn_rate.as_deref().unwrap_or("");
        let runway = record.runway.as_deref().unwrap_or("");
        let growth = record.growth.as_deref().unwrap_or("");

        Self {
            revenue_trend: revenue_trend(revenue, growth, now, rng),
            burn_rate: burn_rate_series(burn_rate, runway, now, rng),
            growth_trajectory: growth_trajectory(growth, now, rng),
            metrics_comparison: metrics_comparison(revenue, growth, burn_rate, runway),
        }
    }
}

/// Reduces a free-form metric string to a number.
///
/// Keeps only ASCII digits and `.`; anything unparsable becomes 0.
pub fn extract_number(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    cleaned.parse().unwrap_or(0.0)
}

/// Labels for the six months ending at the current month.
fn trailing_month_labels(now: DateTime<Utc>) -> Vec<String> {
    (0..SERIES_LEN)
        .map(|i| {
            let idx = (now.month0() as usize + 12 - (SERIES_LEN - 1) + i) % 12;
            MONTH_LABELS[idx].to_string()
        })
        .collect()
}

/// Six months of revenue extrapolated around the reported figure, with a
/// jittered growth rate attached to each point.
pub fn revenue_trend<R: Rng + ?Sized>(
    revenue: &str,
    growth: &str,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<RevenueTrendPoint> {
    let base = extract_number(revenue);
    let rate = extract_number(growth);

    trailing_month_labels(now)
        .into_iter()
        .enumerate()
        .map(|(i, month)| RevenueTrendPoint {
            month,
            revenue: (base * (1.0 + (rate / 100.0) * (i as f64 - 2.5)))
                .round()
                .max(0.0),
            growth: (rate + rng.gen_range(-5.0..5.0)).round(),
        })
        .collect()
}

/// Six months of burn with +/-10% jitter, runway counting down by one month.
pub fn burn_rate_series<R: Rng + ?Sized>(
    burn_rate: &str,
    runway: &str,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<BurnRatePoint> {
    let base = extract_number(burn_rate);
    let runway_months = extract_number(runway);

    trailing_month_labels(now)
        .into_iter()
        .enumerate()
        .map(|(i, month)| BurnRatePoint {
            month,
            burn_rate: (base * (1.0 + rng.gen_range(-0.1..0.1))).round().max(0.0),
            runway: (runway_months - i as f64).max(0.0),
        })
        .collect()
}

/// Six months of jittered actual growth against a constant target of
/// `max(growth * 1.2, 20)`, rounded.
pub fn growth_trajectory<R: Rng + ?Sized>(
    growth: &str,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<GrowthTrajectoryPoint> {
    let rate = extract_number(growth);
    let target = (rate * 1.2).max(20.0).round();

    trailing_month_labels(now)
        .into_iter()
        .map(|month| GrowthTrajectoryPoint {
            month,
            growth: (rate + rng.gen_range(-5.0..5.0)).round().max(0.0),
            target,
        })
        .collect()
}

/// Period-over-period comparison: exactly four rows in fixed order, with the
/// previous period synthesised as a fixed multiple of the current value. The
/// burn-rate multiple is above 1 on purpose: the previous period is shown as
/// higher spend, so burn reads as improving.
pub fn metrics_comparison(
    revenue: &str,
    growth: &str,
    burn_rate: &str,
    runway: &str,
) -> Vec<MetricsComparisonPoint> {
    let rows: [(&str, f64, f64); 4] = [
        ("Revenue", extract_number(revenue), 0.85),
        ("Growth", extract_number(growth), 0.9),
        ("Burn Rate", extract_number(burn_rate), 1.1),
        ("Runway", extract_number(runway), 0.8),
    ];

    rows.into_iter()
        .map(|(metric, current, factor)| MetricsComparisonPoint {
            metric: metric.to_string(),
            current,
            previous: (current * factor).round(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn august() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 23, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_extract_number_under_format_noise() {
        assert_eq!(extract_number("$125,000"), 125000.0);
        assert_eq!(extract_number("125000"), 125000.0);
        assert_eq!(extract_number("23%"), 23.0);
        assert_eq!(extract_number("18 months"), 18.0);
        assert_eq!(extract_number("18%"), 18.0);
    }

    #[test]
    fn test_extract_number_k_suffix_is_stripped_not_scaled() {
        // "K" is dropped like any other non-digit, so $125K parses to 125.
        assert_eq!(extract_number("$125K"), 125.0);
    }

    #[test]
    fn test_extract_number_unparsable_is_zero() {
        assert_eq!(extract_number(""), 0.0);
        assert_eq!(extract_number("n/a"), 0.0);
        assert_eq!(extract_number("1.2.3"), 0.0);
    }

    #[test]
    fn test_trailing_months_end_at_current_month() {
        let labels = trailing_month_labels(august());
        assert_eq!(labels, ["Mar", "Apr", "May", "Jun", "Jul", "Aug"]);

        let january = Utc.with_ymd_and_hms(2026, 1, 15, 0, 0, 0).unwrap();
        let labels = trailing_month_labels(january);
        assert_eq!(labels, ["Aug", "Sep", "Oct", "Nov", "Dec", "Jan"]);
    }

    #[test]
    fn test_revenue_trend_shape_and_clamping() {
        let mut rng = StdRng::seed_from_u64(7);
        let points = revenue_trend("$10,000", "80%", august(), &mut rng);
        assert_eq!(points.len(), 6);
        // With 80% growth the early months extrapolate negative; clamped to 0.
        assert_eq!(points[0].revenue, 0.0);
        assert!(points[5].revenue > 10_000.0);
        for window in points.windows(2) {
            assert!(window[1].revenue >= window[0].revenue);
        }
    }

    #[test]
    fn test_revenue_trend_growth_jitter_is_bounded() {
        let mut rng = StdRng::seed_from_u64(42);
        for point in revenue_trend("$125,000", "23%", august(), &mut rng) {
            assert!(point.growth >= 18.0 && point.growth <= 28.0);
        }
    }

    #[test]
    fn test_burn_rate_runway_counts_down_and_clamps() {
        let mut rng = StdRng::seed_from_u64(1);
        let points = burn_rate_series("$45,000", "3 months", august(), &mut rng);
        let runways: Vec<f64> = points.iter().map(|p| p.runway).collect();
        assert_eq!(runways, [3.0, 2.0, 1.0, 0.0, 0.0, 0.0]);
        for point in &points {
            assert!(point.burn_rate >= 40_500.0 && point.burn_rate <= 49_500.0);
        }
    }

    #[test]
    fn test_growth_trajectory_target_floor() {
        let mut rng = StdRng::seed_from_u64(2);
        let low = growth_trajectory("10%", august(), &mut rng);
        assert!(low.iter().all(|p| p.target == 20.0));

        let high = growth_trajectory("50%", august(), &mut rng);
        assert!(high.iter().all(|p| p.target == 60.0));
        assert!(high.iter().all(|p| p.growth >= 0.0));
    }

    #[test]
    fn test_metrics_comparison_fixed_rows_even_when_absent() {
        let rows = metrics_comparison("", "", "", "");
        let names: Vec<&str> = rows.iter().map(|r| r.metric.as_str()).collect();
        assert_eq!(names, ["Revenue", "Growth", "Burn Rate", "Runway"]);
        assert!(rows.iter().all(|r| r.current == 0.0 && r.previous == 0.0));
    }

    #[test]
    fn test_metrics_comparison_factors() {
        let rows = metrics_comparison("$125,000", "23%", "$45,000", "18 months");
        assert_eq!(rows[0].previous, 106250.0);
        assert_eq!(rows[1].previous, 21.0);
        // Burn rate previous is higher: spend has come down since.
        assert_eq!(rows[2].previous, 49500.0);
        assert_eq!(rows[3].previous, 14.0);
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let now = august();
        let mut a = StdRng::seed_from_u64(99);
        let mut b = StdRng::seed_from_u64(99);
        assert_eq!(
            revenue_trend("$125,000", "23%", now, &mut a),
            revenue_trend("$125,000", "23%", now, &mut b)
        );
    }
}
