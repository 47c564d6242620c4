//! Fixed-width revenue time series for report charts
//!
//! The database only returns buckets with sales; these helpers pad the
//! gaps with zero buckets so charts keep a fixed width, and keep the
//! monthly series in calendar order even across a year boundary.

use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

/// One bucket in a revenue time series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenueBucket {
    pub label: String,
    pub revenue: Decimal,
    pub items_sold: i64,
}

/// An aggregated data point keyed by the start of its period
#[derive(Debug, Clone, Copy)]
pub struct RevenuePoint {
    pub period_start: NaiveDate,
    pub revenue: Decimal,
    pub items_sold: i64,
}

/// First day of the month containing `date`
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

/// Shift a first-of-month date by a signed number of months
pub fn shift_months(month_start: NaiveDate, offset: i32) -> NaiveDate {
    let total = month_start.year() * 12 + month_start.month0() as i32 + offset;
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(month_start)
}

/// Build a daily series of exactly `days` buckets starting at `start`.
/// Days without a matching point become zero buckets.
pub fn fill_daily_buckets(start: NaiveDate, days: u32, points: &[RevenuePoint]) -> Vec<RevenueBucket> {
    (0..days as i64)
        .map(|offset| {
            let day = start + Duration::days(offset);
            bucket_for(day, day.format("%Y-%m-%d").to_string(), points)
        })
        .collect()
}

/// Build a monthly series of exactly `months` buckets in calendar order
/// starting at `start_month` (a first-of-month date).
pub fn fill_monthly_buckets(
    start_month: NaiveDate,
    months: u32,
    points: &[RevenuePoint],
) -> Vec<RevenueBucket> {
    (0..months as i32)
        .map(|offset| {
            let month = shift_months(start_month, offset);
            bucket_for(month, month.format("%Y-%m").to_string(), points)
        })
        .collect()
}

fn bucket_for(period_start: NaiveDate, label: String, points: &[RevenuePoint]) -> RevenueBucket {
    match points.iter().find(|p| p.period_start == period_start) {
        Some(p) => RevenueBucket {
            label,
            revenue: p.revenue,
            items_sold: p.items_sold,
        },
        None => RevenueBucket {
            label,
            revenue: Decimal::ZERO,
            items_sold: 0,
        },
    }
}
