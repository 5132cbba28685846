//! Detail table rows: one row per group for the selected date, combining the
//! date KPI block with month-level context (latest MTD, target variance).
//! Plain data for the presentation layer and CSV export to consume.

use crate::metrics::{compute_date_metrics, compute_month_metrics};
use crate::schema::Group;
use crate::status::{classify, Status};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    pub category: String,
    pub market: String,
    pub service: String,
    pub currency: String,
    pub mtd_revenue: f64,
    pub month_target: f64,
    pub percent_to_target: f64,
    pub actual_run_rate: f64,
    pub required_run_rate: f64,
    pub total_base: f64,
    pub net_adds_today: f64,
    pub daily_revenue_zar: f64,
    pub net_adds_revenue_zar: f64,
    /// MTD revenue at the latest available date of the selected month.
    pub latest_mtd: f64,
    /// `month_target - latest_mtd`; negative once the target is beaten.
    pub target_variance: f64,
    pub status: Status,
}

/// Builds one table row per group. Groups with no data on `date` are omitted
/// entirely rather than rendered as zeros.
pub fn build_table_rows(groups: &[Group], date: NaiveDate, month: &str) -> Vec<TableRow> {
    groups
        .iter()
        .filter_map(|group| {
            let metrics = compute_date_metrics(&group.rows, date)?;

            let month_series = compute_month_metrics(&group.rows, month);
            let latest_mtd = month_series.last().map(|m| m.mtd_revenue).unwrap_or(0.0);
            let target_variance = metrics.month_target - latest_mtd;

            Some(TableRow {
                category: group.category.clone(),
                market: group.market.clone(),
                service: group.service.clone(),
                currency: group.currency.clone(),
                mtd_revenue: metrics.mtd_revenue,
                month_target: metrics.month_target,
                percent_to_target: metrics.percent_to_target,
                actual_run_rate: metrics.actual_run_rate,
                required_run_rate: metrics.required_run_rate,
                total_base: metrics.total_base,
                net_adds_today: metrics.net_adds_today,
                daily_revenue_zar: metrics.daily_revenue_zar,
                net_adds_revenue_zar: metrics.net_adds_revenue_zar,
                latest_mtd,
                target_variance,
                status: classify(metrics.percent_to_target),
            })
        })
        .collect()
}
