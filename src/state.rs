//! Explicit application state and reducer.
//!
//! The dashboard's interaction state is one immutable value; every user
//! interaction becomes an [`Action`] and [`AppState::reduce`] returns the
//! next state. Core computations always receive the record collection and
//! filter spec as explicit parameters, never through shared mutable state.

use crate::dimensions::{latest_date_in_month, latest_month};
use crate::schema::{FilterSpec, Record, SnapshotMetadata, ViewMode};
use crate::DashboardView;
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetCategory(String),
    SetMarket(String),
    SetService(String),
    SetCurrency(String),
    SetViewMode(ViewMode),
    /// Selecting a month also re-targets the date to the latest available
    /// date within that month.
    SetMonth(String),
    SetDate(NaiveDate),
    ShowTargetToDate(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub records: Vec<Record>,
    pub metadata: Option<SnapshotMetadata>,
    pub filters: FilterSpec,
    pub show_target_to_date: bool,
}

impl AppState {
    /// Initial state for a loaded snapshot: all dimensions unconstrained,
    /// month and date defaulted to the latest available data.
    pub fn new(records: Vec<Record>, metadata: Option<SnapshotMetadata>) -> Self {
        let month = latest_month(&records);
        let date = month
            .as_deref()
            .and_then(|m| latest_date_in_month(&records, m));

        AppState {
            records,
            metadata,
            filters: FilterSpec {
                month,
                date,
                ..FilterSpec::default()
            },
            show_target_to_date: false,
        }
    }

    /// Applies one action, returning the next state. The record snapshot is
    /// carried over untouched.
    pub fn reduce(&self, action: Action) -> AppState {
        let mut next = self.clone();
        match action {
            Action::SetCategory(v) => next.filters.category = Some(v),
            Action::SetMarket(v) => next.filters.market = Some(v),
            Action::SetService(v) => next.filters.service = Some(v),
            Action::SetCurrency(v) => next.filters.currency = Some(v),
            Action::SetViewMode(mode) => next.filters.view_mode = mode,
            Action::SetMonth(month) => {
                next.filters.date = latest_date_in_month(&next.records, &month);
                next.filters.month = Some(month);
            }
            Action::SetDate(date) => next.filters.date = Some(date),
            Action::ShowTargetToDate(show) => next.show_target_to_date = show,
        }
        next
    }

    /// Derives the full dashboard view for the current filters.
    pub fn dashboard(&self) -> DashboardView {
        crate::build_dashboard(&self.records, &self.filters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::record;

    fn sample() -> Vec<Record> {
        vec![
            record("Streaming", "ZA", "Basic", "ZAR", "2024-01-15"),
            record("Streaming", "ZA", "Basic", "ZAR", "2024-02-10"),
            record("Streaming", "ZA", "Basic", "ZAR", "2024-02-12"),
        ]
    }

    #[test]
    fn test_defaults_pick_latest_month_and_date() {
        let state = AppState::new(sample(), None);
        assert_eq!(state.filters.month.as_deref(), Some("2024-02"));
        assert_eq!(state.filters.date, Some("2024-02-12".parse().unwrap()));
        assert_eq!(state.filters.view_mode, ViewMode::Construct);
    }

    #[test]
    fn test_defaults_with_empty_snapshot() {
        let state = AppState::new(Vec::new(), None);
        assert!(state.filters.month.is_none());
        assert!(state.filters.date.is_none());
    }

    #[test]
    fn test_reduce_is_pure() {
        let state = AppState::new(sample(), None);
        let next = state.reduce(Action::SetCategory("Gaming".to_string()));
        assert!(state.filters.category.is_none());
        assert_eq!(next.filters.category.as_deref(), Some("Gaming"));
    }

    #[test]
    fn test_set_month_retargets_date() {
        let state = AppState::new(sample(), None);
        let next = state.reduce(Action::SetMonth("2024-01".to_string()));
        assert_eq!(next.filters.month.as_deref(), Some("2024-01"));
        assert_eq!(next.filters.date, Some("2024-01-15".parse().unwrap()));

        let none = state.reduce(Action::SetMonth("2024-03".to_string()));
        assert!(none.filters.date.is_none());
    }

    #[test]
    fn test_view_mode_and_toggle() {
        let state = AppState::new(sample(), None);
        let next = state
            .reduce(Action::SetViewMode(ViewMode::Service))
            .reduce(Action::ShowTargetToDate(true));
        assert_eq!(next.filters.view_mode, ViewMode::Service);
        assert!(next.show_target_to_date);
    }
}
