//! Record normalizer: turns raw tabular export rows (heterogeneous column
//! naming, currency-formatted numbers, mixed date formats) into canonical
//! [`Record`]s.
//!
//! Sheet exports arrive with either human-readable headers ("Month Revenue")
//! or single-letter positional headers ("T"). Each semantic field carries an
//! ordered list of alias candidates; the first candidate with a non-empty
//! value wins.

use crate::schema::Record;
use chrono::NaiveDate;
use log::{debug, info};
use std::collections::HashMap;
use std::io;

/// A raw export row: column header -> raw cell text.
pub type RawRow = HashMap<String, String>;

// Alias candidates per semantic field, in priority order. Letters follow the
// source sheet's column layout (A..X).
const CATEGORY: &[&str] = &["Category", "A"];
const MARKET: &[&str] = &["Market", "B"];
const SERVICE: &[&str] = &["Service", "C"];
const MONTH_DAY: &[&str] = &["Month Day", "D"];
const DATE: &[&str] = &["Date", "E"];
const UNSUBSCRIBED: &[&str] = &["Unsubscribed", "F"];
const ACTIVE_SUBS: &[&str] = &["Active Subs", "G"];
const NEW_SUBS: &[&str] = &["New Subs", "H"];
const TOTAL_SUBS: &[&str] = &["Total Subs", "I"];
const NEW_PAID: &[&str] = &["New Paid", "J"];
const RENEWALS_PAID: &[&str] = &["Renewals Paid", "K"];
const TOTAL_PAID: &[&str] = &["Total Paid", "L"];
const CURRENCY: &[&str] = &["Currency", "M"];
const NEW_BILLED_REVENUE: &[&str] = &["New Billed Revenue", "N"];
const RENEWAL_REVENUE: &[&str] = &["Renewal Revenue", "O"];
const USD_RATE: &[&str] = &["USD rate", "P"];
const DAILY_REVENUE: &[&str] = &["Daily Revenue", "Q"];
const MONTH_CUMM: &[&str] = &["Month Cumm", "R"];
const USD_ZAR_RATE: &[&str] = &["USD/ZAR", "S"];
const MONTH_REVENUE: &[&str] = &["Month Revenue", "T"];
const MONTH_TARGET: &[&str] = &["Month Target", "U"];
const TARGET_RUN_RATE: &[&str] = &["Target Run Rate", "V"];
const ACTUAL_RUN_RATE: &[&str] = &["Actual Run Rate", "W"];
const REQUIRED_RUN_RATE: &[&str] = &["Required Run Rate", "X"];

/// Result of normalizing one batch of raw rows.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedBatch {
    /// Canonical records in input order, minus skipped and invalid rows.
    pub records: Vec<Record>,
    /// Rows dropped because no supported date format matched.
    pub skipped_invalid_dates: usize,
}

fn lookup<'a>(row: &'a RawRow, aliases: &[&str]) -> Option<&'a str> {
    aliases
        .iter()
        .filter_map(|name| row.get(*name))
        .map(|v| v.trim())
        .find(|v| !v.is_empty())
}

/// Coerces a currency-formatted cell into a float.
///
/// Strips `$`/`R` symbols, whitespace, thousands separators and anything else
/// outside `[0-9.-]`, preserving the minus sign so refunds survive. Empty or
/// unparseable input coerces to `0.0`.
pub fn parse_amount(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    cleaned.parse::<f64>().unwrap_or(0.0)
}

/// Parses a date cell, trying ISO (`YYYY-MM-DD`) first, then `MM/DD/YYYY`.
/// Returns `None` when no format matches; the caller drops the row.
pub fn parse_flexible_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%m/%d/%Y"))
        .ok()
}

fn numeric(row: &RawRow, aliases: &[&str]) -> f64 {
    lookup(row, aliases).map(parse_amount).unwrap_or(0.0)
}

fn text(row: &RawRow, aliases: &[&str]) -> String {
    lookup(row, aliases).unwrap_or("").to_string()
}

fn record_from_row(row: &RawRow) -> Option<Record> {
    let date = parse_flexible_date(lookup(row, DATE).unwrap_or(""))?;

    Some(Record {
        category: text(row, CATEGORY),
        market: text(row, MARKET),
        service: text(row, SERVICE),
        currency: lookup(row, CURRENCY).unwrap_or("USD").to_string(),
        date,
        month_day: numeric(row, MONTH_DAY).max(0.0) as u32,
        unsubscribed: numeric(row, UNSUBSCRIBED),
        active_subs: numeric(row, ACTIVE_SUBS),
        new_subs: numeric(row, NEW_SUBS),
        total_subs: numeric(row, TOTAL_SUBS),
        new_paid: numeric(row, NEW_PAID),
        renewals_paid: numeric(row, RENEWALS_PAID),
        total_paid: numeric(row, TOTAL_PAID),
        new_billed_revenue: numeric(row, NEW_BILLED_REVENUE),
        renewal_revenue: numeric(row, RENEWAL_REVENUE),
        usd_rate: numeric(row, USD_RATE),
        daily_revenue: numeric(row, DAILY_REVENUE),
        month_cumm: numeric(row, MONTH_CUMM),
        usd_zar_rate: numeric(row, USD_ZAR_RATE),
        month_revenue: numeric(row, MONTH_REVENUE),
        month_target: numeric(row, MONTH_TARGET),
        target_run_rate: numeric(row, TARGET_RUN_RATE),
        actual_run_rate: numeric(row, ACTUAL_RUN_RATE),
        required_run_rate: numeric(row, REQUIRED_RUN_RATE),
    })
}

/// Normalizes a batch of raw rows into canonical records.
///
/// `skip_rows` holds 1-based spreadsheet row numbers (the header is row 1, so
/// the first data row is row 2). Position-based skipping is applied before
/// date validation so skip numbers always refer to the original sheet.
pub fn normalize_rows(rows: &[RawRow], skip_rows: &[usize]) -> NormalizedBatch {
    let mut records = Vec::with_capacity(rows.len());
    let mut skipped_invalid_dates = 0;

    for (index, row) in rows.iter().enumerate() {
        let sheet_row = index + 2;
        if skip_rows.contains(&sheet_row) {
            continue;
        }

        match record_from_row(row) {
            Some(record) => records.push(record),
            None => {
                debug!("Dropping sheet row {}: unparseable date", sheet_row);
                skipped_invalid_dates += 1;
            }
        }
    }

    info!(
        "Normalized {} records ({} dropped for invalid dates)",
        records.len(),
        skipped_invalid_dates
    );

    NormalizedBatch {
        records,
        skipped_invalid_dates,
    }
}

/// Reads a CSV export (header row first) and normalizes it.
pub fn normalize_csv<R: io::Read>(
    reader: R,
    skip_rows: &[usize],
) -> crate::error::Result<NormalizedBatch> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let mut rows = Vec::new();

    for result in csv_reader.records() {
        let record = result?;
        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.to_string(), v.to_string()))
            .collect();
        rows.push(row);
    }

    Ok(normalize_rows(&rows, skip_rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_row(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_amount_currency_formats() {
        assert_eq!(parse_amount("$1,234.56"), 1234.56);
        assert_eq!(parse_amount("R 500"), 500.0);
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("-45.2"), -45.2);
        assert_eq!(parse_amount("not a number"), 0.0);
    }

    #[test]
    fn test_parse_flexible_date() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(parse_flexible_date("2024-01-15"), Some(expected));
        assert_eq!(parse_flexible_date("01/15/2024"), Some(expected));
        assert_eq!(parse_flexible_date("not-a-date"), None);
        assert_eq!(parse_flexible_date(""), None);
    }

    #[test]
    fn test_named_header_beats_letter_fallback() {
        let row = raw_row(&[
            ("Category", "Streaming"),
            ("A", "WrongCategory"),
            ("Date", "2024-01-15"),
        ]);
        let record = record_from_row(&row).unwrap();
        assert_eq!(record.category, "Streaming");
    }

    #[test]
    fn test_letter_fallback_when_named_empty() {
        let row = raw_row(&[("Category", ""), ("A", "Streaming"), ("E", "2024-01-15")]);
        let record = record_from_row(&row).unwrap();
        assert_eq!(record.category, "Streaming");
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    }

    #[test]
    fn test_missing_currency_defaults_to_usd() {
        let row = raw_row(&[("Date", "2024-01-15")]);
        assert_eq!(record_from_row(&row).unwrap().currency, "USD");
    }

    #[test]
    fn test_invalid_date_drops_row() {
        let rows = vec![
            raw_row(&[("Date", "2024-01-15"), ("Category", "A")]),
            raw_row(&[("Date", "not-a-date"), ("Category", "B")]),
        ];
        let batch = normalize_rows(&rows, &[]);
        assert_eq!(batch.records.len(), 1);
        assert_eq!(batch.skipped_invalid_dates, 1);
    }

    #[test]
    fn test_skip_rows_use_sheet_positions() {
        // Index 0 is sheet row 2; skipping row 2 must happen before date
        // validation so the skip is not also counted as an invalid date.
        let rows = vec![
            raw_row(&[("Date", "garbage"), ("Category", "Reference")]),
            raw_row(&[("Date", "2024-01-15"), ("Category", "Kept")]),
        ];
        let batch = normalize_rows(&rows, &[2]);
        assert_eq!(batch.records.len(), 1);
        assert_eq!(batch.records[0].category, "Kept");
        assert_eq!(batch.skipped_invalid_dates, 0);
    }

    #[test]
    fn test_normalize_csv_end_to_end() {
        let csv_text = "\
Category,Market,Service,Month Day,Date,Currency,Daily Revenue,Month Revenue,Month Target
Streaming,ZA,Basic,15,2024-01-15,ZAR,\"R 1,500\",R 20000,R 40000
Streaming,ZA,Basic,15,01/15/2024,USD,$100.50,$2000,$4000
Broken,ZA,Basic,0,never,ZAR,1,1,1
";
        let batch = normalize_csv(csv_text.as_bytes(), &[]).unwrap();
        assert_eq!(batch.records.len(), 2);
        assert_eq!(batch.skipped_invalid_dates, 1);
        assert_eq!(batch.records[0].daily_revenue, 1500.0);
        assert_eq!(batch.records[1].daily_revenue, 100.50);
        assert_eq!(batch.records[0].date, batch.records[1].date);
    }
}
