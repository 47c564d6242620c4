//! Tests for report derivations
//!
//! Covers the critical-stock boundary and the fixed-width revenue
//! series: daily charts always span 7 buckets and monthly charts stay
//! in calendar order even across a year boundary.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::timeseries::{
    fill_daily_buckets, fill_monthly_buckets, first_of_month, shift_months, RevenuePoint,
};
use shared::validation::is_critical_stock;

/// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn point(day: NaiveDate, revenue: &str, items: i64) -> RevenuePoint {
    RevenuePoint {
        period_start: day,
        revenue: dec(revenue),
        items_sold: items,
    }
}

mod critical_stock {
    use super::*;

    #[test]
    fn boundary_counts_as_critical() {
        assert!(is_critical_stock(dec("5"), Some(dec("5"))));
        assert!(!is_critical_stock(dec("5.001"), Some(dec("5"))));
    }

    #[test]
    fn missing_threshold_defaults_to_five() {
        assert!(is_critical_stock(dec("4"), None));
        assert!(is_critical_stock(dec("5"), None));
        assert!(!is_critical_stock(dec("6"), None));
    }
}

mod weekly_series {
    use super::*;

    #[test]
    fn empty_week_yields_seven_zero_buckets() {
        let buckets = fill_daily_buckets(date(2026, 8, 1), 7, &[]);
        assert_eq!(buckets.len(), 7);
        assert!(buckets.iter().all(|b| b.revenue == Decimal::ZERO && b.items_sold == 0));
    }

    #[test]
    fn gaps_between_sale_days_are_zero_filled() {
        let points = vec![
            point(date(2026, 8, 2), "50000", 4),
            point(date(2026, 8, 5), "25000", 1),
        ];
        let buckets = fill_daily_buckets(date(2026, 8, 1), 7, &points);

        assert_eq!(buckets.len(), 7);
        assert_eq!(buckets[1].label, "2026-08-02");
        assert_eq!(buckets[1].revenue, dec("50000"));
        assert_eq!(buckets[2].revenue, Decimal::ZERO);
        assert_eq!(buckets[4].revenue, dec("25000"));
        assert_eq!(buckets[6].revenue, Decimal::ZERO);
    }

    #[test]
    fn labels_follow_the_calendar() {
        let buckets = fill_daily_buckets(date(2026, 8, 28), 7, &[]);
        // Series runs past a month boundary without reordering
        assert_eq!(buckets[0].label, "2026-08-28");
        assert_eq!(buckets[3].label, "2026-08-31");
        assert_eq!(buckets[4].label, "2026-09-01");
    }
}

mod monthly_series {
    use super::*;

    #[test]
    fn months_stay_in_calendar_order_across_year_boundary() {
        // Nov and Dec of the earlier year must precede Jan, not sort after it
        let start = date(2025, 11, 1);
        let buckets = fill_monthly_buckets(start, 6, &[]);

        let labels: Vec<&str> = buckets.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["2025-11", "2025-12", "2026-01", "2026-02", "2026-03", "2026-04"]
        );
    }

    #[test]
    fn sales_land_in_their_month_bucket() {
        let points = vec![
            point(date(2025, 12, 1), "400000", 20),
            point(date(2026, 2, 1), "150000", 6),
        ];
        let buckets = fill_monthly_buckets(date(2025, 11, 1), 6, &points);

        assert_eq!(buckets[1].revenue, dec("400000"));
        assert_eq!(buckets[3].revenue, dec("150000"));
        assert_eq!(buckets[0].revenue, Decimal::ZERO);
    }

    #[test]
    fn shift_months_wraps_years_both_ways() {
        assert_eq!(shift_months(date(2026, 1, 1), -1), date(2025, 12, 1));
        assert_eq!(shift_months(date(2025, 12, 1), 1), date(2026, 1, 1));
        assert_eq!(shift_months(date(2026, 3, 1), -15), date(2024, 12, 1));
    }

    #[test]
    fn first_of_month_truncates_the_day() {
        assert_eq!(first_of_month(date(2026, 8, 28)), date(2026, 8, 1));
        assert_eq!(first_of_month(date(2026, 8, 1)), date(2026, 8, 1));
    }
}

mod property_tests {
    use super::*;

    fn day_strategy() -> impl Strategy<Value = NaiveDate> {
        (0i64..=3650i64).prop_map(|n| date(2020, 1, 1) + chrono::Duration::days(n))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// The daily series always has exactly the requested width
        #[test]
        fn prop_daily_series_fixed_width(start in day_strategy(), days in 1u32..=31) {
            let buckets = fill_daily_buckets(start, days, &[]);
            prop_assert_eq!(buckets.len(), days as usize);
        }

        /// Bucket labels are strictly increasing, so the series is ordered
        #[test]
        fn prop_daily_labels_strictly_increasing(start in day_strategy()) {
            let buckets = fill_daily_buckets(start, 7, &[]);
            for pair in buckets.windows(2) {
                prop_assert!(pair[0].label < pair[1].label);
            }
        }

        /// Monthly labels are strictly increasing even across year wraps
        #[test]
        fn prop_monthly_labels_strictly_increasing(start in day_strategy(), months in 1u32..=24) {
            let buckets = fill_monthly_buckets(first_of_month(start), months, &[]);
            for pair in buckets.windows(2) {
                prop_assert!(pair[0].label < pair[1].label);
            }
        }

        /// Shifting months forward and back is an identity
        #[test]
        fn prop_shift_months_roundtrip(start in day_strategy(), offset in -60i32..=60) {
            let month = first_of_month(start);
            prop_assert_eq!(shift_months(shift_months(month, offset), -offset), month);
        }

        /// Every in-window point lands in exactly one bucket
        #[test]
        fn prop_points_preserved_in_window(start in day_strategy(), offsets in prop::collection::btree_set(0i64..7, 1..=7)) {
            let points: Vec<RevenuePoint> = offsets
                .iter()
                .map(|&o| point(start + chrono::Duration::days(o), "1000", 1))
                .collect();
            let buckets = fill_daily_buckets(start, 7, &points);

            let total: Decimal = buckets.iter().map(|b| b.revenue).sum();
            prop_assert_eq!(total, dec("1000") * Decimal::from(points.len() as i64));
        }
    }
}
