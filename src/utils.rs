use crate::error::{DashboardError, Result};
use chrono::{Datelike, Days, NaiveDate};

/// Year-month string (`YYYY-MM`) for a date. This is the canonical month key
/// used by the filter engine, dimension indexer and metrics calculator.
pub fn year_month(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// Parses a `YYYY-MM` string into `(year, month)`.
pub fn parse_year_month(ym: &str) -> Result<(i32, u32)> {
    let mut parts = ym.splitn(2, '-');
    let year = parts
        .next()
        .and_then(|y| y.parse::<i32>().ok())
        .ok_or_else(|| DashboardError::InvalidYearMonth(ym.to_string()))?;
    let month = parts
        .next()
        .and_then(|m| m.parse::<u32>().ok())
        .filter(|m| (1..=12).contains(m))
        .ok_or_else(|| DashboardError::InvalidYearMonth(ym.to_string()))?;
    Ok((year, month))
}

pub fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };

    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap()
        .checked_sub_days(Days::new(1))
        .unwrap()
}

/// Calendar length of the month containing `date`.
pub fn days_in_month(date: NaiveDate) -> u32 {
    last_day_of_month(date.year(), date.month()).day()
}
