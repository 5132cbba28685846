//! Grouping engine: deterministic partitions of a record collection into
//! [`Group`]s, in first-seen key order so downstream tables and charts render
//! stably without re-sorting.

use crate::schema::{Group, Record, ViewMode, ROLLED_UP_CURRENCY};
use std::collections::HashMap;

fn partition<K, F, G>(records: &[Record], key_of: F, group_of: G) -> Vec<Group>
where
    K: std::hash::Hash + Eq,
    F: Fn(&Record) -> K,
    G: Fn(&Record) -> Group,
{
    let mut groups: Vec<Group> = Vec::new();
    let mut index: HashMap<K, usize> = HashMap::new();

    for record in records {
        let key = key_of(record);
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push(group_of(record));
            groups.len() - 1
        });
        groups[slot].rows.push(record.clone());
    }

    groups
}

/// Groups by the full construct tuple (category, market, service, currency).
pub fn group_by_construct(records: &[Record]) -> Vec<Group> {
    partition(
        records,
        |r| {
            (
                r.category.clone(),
                r.market.clone(),
                r.service.clone(),
                r.currency.clone(),
            )
        },
        |r| Group {
            category: r.category.clone(),
            market: r.market.clone(),
            service: r.service.clone(),
            currency: r.currency.clone(),
            rows: Vec::new(),
        },
    )
}

/// Groups by (category, market, service), rolling all currencies into one
/// group whose `currency` is the literal `"Multiple"`.
pub fn group_by_service(records: &[Record]) -> Vec<Group> {
    partition(
        records,
        |r| (r.category.clone(), r.market.clone(), r.service.clone()),
        |r| Group {
            category: r.category.clone(),
            market: r.market.clone(),
            service: r.service.clone(),
            currency: ROLLED_UP_CURRENCY.to_string(),
            rows: Vec::new(),
        },
    )
}

/// Dispatches on the view mode.
pub fn group_records(records: &[Record], view_mode: ViewMode) -> Vec<Group> {
    match view_mode {
        ViewMode::Construct => group_by_construct(records),
        ViewMode::Service => group_by_service(records),
    }
}
