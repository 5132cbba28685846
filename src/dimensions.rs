//! Dimension indexer: sorted unique value sets over a record collection,
//! used to populate filter options and pick default filter state.

use crate::schema::Record;
use crate::utils::year_month;
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Sorted unique values of a categorical field. Empty strings are excluded.
pub fn unique_values<F>(records: &[Record], field: F) -> Vec<String>
where
    F: Fn(&Record) -> &str,
{
    let set: BTreeSet<&str> = records
        .iter()
        .map(|r| field(r))
        .filter(|v| !v.is_empty())
        .collect();
    set.into_iter().map(String::from).collect()
}

/// Sorted unique `YYYY-MM` strings present in the collection.
pub fn available_months(records: &[Record]) -> Vec<String> {
    let set: BTreeSet<String> = records.iter().map(|r| year_month(r.date)).collect();
    set.into_iter().collect()
}

/// Sorted unique dates falling within the given `YYYY-MM`.
pub fn dates_for_month(records: &[Record], ym: &str) -> Vec<NaiveDate> {
    let set: BTreeSet<NaiveDate> = records
        .iter()
        .filter(|r| year_month(r.date) == ym)
        .map(|r| r.date)
        .collect();
    set.into_iter().collect()
}

/// Latest month present in the collection; `None` when empty.
pub fn latest_month(records: &[Record]) -> Option<String> {
    records.iter().map(|r| year_month(r.date)).max()
}

/// Latest date within the given month; `None` when the month has no data.
pub fn latest_date_in_month(records: &[Record], ym: &str) -> Option<NaiveDate> {
    records
        .iter()
        .filter(|r| year_month(r.date) == ym)
        .map(|r| r.date)
        .max()
}
