//! Metrics calculator: derived KPI set for a group of records on a target
//! date, and the full-month time series behind the trend charts.

use crate::dimensions::dates_for_month;
use crate::error::{DashboardError, Result};
use crate::schema::Record;
use crate::utils::days_in_month;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Derived KPI block for one (group, date). Recomputed on demand, never
/// persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateMetrics {
    pub date: NaiveDate,
    pub day_number: u32,
    pub days_in_month: u32,
    /// Month-to-date revenue, summed over the date subset.
    pub mtd_revenue: f64,
    pub month_target: f64,
    /// `mtd_revenue / month_target * 100`; `0` when the target is zero.
    pub percent_to_target: f64,
    /// Revenue per elapsed day; `0` on day zero.
    pub actual_run_rate: f64,
    /// Per-day revenue needed for the rest of the month to hit target,
    /// clamped at zero once the target is met.
    pub required_run_rate: f64,
    pub total_base: f64,
    pub net_adds_today: f64,
    /// Sum of per-row `daily_revenue * usd_zar_rate` (row-level FX weighting).
    pub daily_revenue_zar: f64,
    /// Sum of per-row `new_billed_revenue * usd_rate * usd_zar_rate`.
    pub net_adds_revenue_zar: f64,
}

/// Aggregates the KPI set for `target_date` over `rows`.
///
/// Returns `None` when no row carries the target date; callers must render
/// that as "no data", not as zero-valued KPIs.
///
/// Precondition: all rows sharing a date carry the same `month_day`. The
/// value is taken from the first matching row and not re-validated here; use
/// [`compute_date_metrics_checked`] to enforce it.
pub fn compute_date_metrics(rows: &[Record], target_date: NaiveDate) -> Option<DateMetrics> {
    let date_rows: Vec<&Record> = rows.iter().filter(|r| r.date == target_date).collect();
    let first = date_rows.first()?;

    let mtd_revenue: f64 = date_rows.iter().map(|r| r.month_revenue).sum();
    let month_target: f64 = date_rows.iter().map(|r| r.month_target).sum();
    let total_base: f64 = date_rows.iter().map(|r| r.total_subs).sum();
    let net_adds_today: f64 = date_rows.iter().map(|r| r.new_subs).sum();

    // Each row's own exchange rate applies to its own revenue; summing first
    // and converting once would be wrong for multi-currency groups.
    let daily_revenue_zar: f64 = date_rows
        .iter()
        .map(|r| r.daily_revenue * r.usd_zar_rate)
        .sum();
    let net_adds_revenue_zar: f64 = date_rows
        .iter()
        .map(|r| r.new_billed_revenue * r.usd_rate * r.usd_zar_rate)
        .sum();

    let day_number = first.month_day;
    let month_days = days_in_month(first.date);

    let actual_run_rate = if day_number > 0 {
        mtd_revenue / day_number as f64
    } else {
        0.0
    };

    let remaining_days = (month_days as i64 - day_number as i64).max(1) as f64;
    let required_run_rate = ((month_target - mtd_revenue) / remaining_days).max(0.0);

    let percent_to_target = if month_target > 0.0 {
        (mtd_revenue / month_target) * 100.0
    } else {
        0.0
    };

    Some(DateMetrics {
        date: target_date,
        day_number,
        days_in_month: month_days,
        mtd_revenue,
        month_target,
        percent_to_target,
        actual_run_rate,
        required_run_rate,
        total_base,
        net_adds_today,
        daily_revenue_zar,
        net_adds_revenue_zar,
    })
}

/// Like [`compute_date_metrics`], but fails when rows on the target date
/// disagree on `month_day` (the precondition the unchecked variant trusts).
pub fn compute_date_metrics_checked(
    rows: &[Record],
    target_date: NaiveDate,
) -> Result<Option<DateMetrics>> {
    let mut day_numbers = rows
        .iter()
        .filter(|r| r.date == target_date)
        .map(|r| r.month_day);

    if let Some(first) = day_numbers.next() {
        if day_numbers.any(|d| d != first) {
            return Err(DashboardError::DataIntegrity {
                date: target_date.to_string(),
                details: "rows disagree on monthDay for the same date".to_string(),
            });
        }
    }

    Ok(compute_date_metrics(rows, target_date))
}

/// KPI series for every date of `year_month` present in `rows`, ascending by
/// date. Dates with no data are absent rather than zero-filled.
pub fn compute_month_metrics(rows: &[Record], year_month: &str) -> Vec<DateMetrics> {
    dates_for_month(rows, year_month)
        .into_iter()
        .filter_map(|date| compute_date_metrics(rows, date))
        .collect()
}

/// Linear pacing benchmark: the share of the month target expected by
/// `day_number`. `days_in_month` is >= 1 by calendar construction.
pub fn compute_target_to_date(month_target: f64, days_in_month: u32, day_number: u32) -> f64 {
    (month_target / days_in_month as f64) * day_number as f64
}
