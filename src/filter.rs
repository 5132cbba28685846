//! Filter engine: applies a [`FilterSpec`] to a record collection.

use crate::schema::{FilterSpec, Record, ViewMode, ALL};
use crate::utils::year_month;

fn constrains(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .filter(|v| !v.is_empty() && *v != ALL)
}

/// True when the record satisfies every active constraint in the spec.
///
/// The `currency` constraint only applies under [`ViewMode::Construct`]; the
/// `month` constraint compares against the record's derived year-month. The
/// spec's `date` field selects the KPI target date and is not a row filter.
pub fn matches(record: &Record, spec: &FilterSpec) -> bool {
    if let Some(category) = constrains(&spec.category) {
        if record.category != category {
            return false;
        }
    }

    if let Some(market) = constrains(&spec.market) {
        if record.market != market {
            return false;
        }
    }

    if let Some(service) = constrains(&spec.service) {
        if record.service != service {
            return false;
        }
    }

    if spec.view_mode == ViewMode::Construct {
        if let Some(currency) = constrains(&spec.currency) {
            if record.currency != currency {
                return false;
            }
        }
    }

    if let Some(month) = spec.month.as_deref().filter(|m| !m.is_empty()) {
        if year_month(record.date) != month {
            return false;
        }
    }

    true
}

/// Order-preserving subset of `records` matching `spec`. An empty spec is
/// the identity.
pub fn filter_records(records: &[Record], spec: &FilterSpec) -> Vec<Record> {
    records
        .iter()
        .filter(|r| matches(r, spec))
        .cloned()
        .collect()
}
