//! # Service Performance Core
//!
//! Aggregation and metrics engine for a subscription revenue dashboard. The
//! crate ingests a periodic export of subscription/revenue records (one row
//! per category x market x service x currency x date) and deterministically
//! derives the business metrics behind a filterable dashboard: month-to-date
//! revenue, run rates, percent-to-target, net adds and their ZAR-normalized
//! counterparts.
//!
//! ## Pipeline
//!
//! Normalizer -> canonical [`Record`]s -> dimension indexer / filter engine
//! -> grouping engine -> metrics calculator -> status classifier. Every
//! stage is a pure, synchronous transform: the same snapshot and filter spec
//! always produce the same output. Presentation (HTML, charts, DOM wiring)
//! and network I/O live outside this crate and consume plain data.
//!
//! ## Example
//!
//! ```rust,ignore
//! use service_performance_core::*;
//!
//! let snapshot = loader::load_snapshot("data/data.json", "data/meta.json")?;
//! let state = AppState::new(snapshot.records, snapshot.metadata);
//! let view = state.dashboard();
//!
//! if let Some(kpis) = &view.date_metrics {
//!     println!("MTD R{:.0} ({})", kpis.mtd_revenue, classify(kpis.percent_to_target));
//! }
//! ```

pub mod dimensions;
pub mod error;
pub mod export;
pub mod filter;
pub mod grouping;
pub mod loader;
pub mod metrics;
pub mod normalizer;
pub mod schema;
pub mod state;
pub mod status;
pub mod table;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{DashboardError, Result};
pub use filter::{filter_records, matches};
pub use grouping::{group_by_construct, group_by_service, group_records};
pub use loader::{load_snapshot, Snapshot};
pub use metrics::{
    compute_date_metrics, compute_date_metrics_checked, compute_month_metrics,
    compute_target_to_date, DateMetrics,
};
pub use normalizer::{normalize_csv, normalize_rows, NormalizedBatch};
pub use schema::{
    DateRange, DimensionSets, FilterSpec, Group, Record, SnapshotMetadata, ViewMode, ALL,
    ROLLED_UP_CURRENCY,
};
pub use state::{Action, AppState};
pub use status::{classify, Status};
pub use table::{build_table_rows, TableRow};

/// Everything the presentation layer needs to render one filter state:
/// groups for the table, the aggregate KPI block for the selected date, the
/// month series for the trend charts, and pre-built table rows.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub groups: Vec<Group>,
    /// Aggregate KPIs across the whole filtered set for the selected date;
    /// `None` means "no data for this date", not zero.
    pub date_metrics: Option<DateMetrics>,
    pub month_series: Vec<DateMetrics>,
    pub table_rows: Vec<TableRow>,
}

/// Computes the full dashboard view for a record collection and filter spec.
pub fn build_dashboard(records: &[Record], spec: &FilterSpec) -> DashboardView {
    let filtered = filter_records(records, spec);
    let groups = group_records(&filtered, spec.view_mode);

    let date_metrics = spec
        .date
        .and_then(|date| compute_date_metrics(&filtered, date));

    let month_series = spec
        .month
        .as_deref()
        .map(|month| compute_month_metrics(&filtered, month))
        .unwrap_or_default();

    let table_rows = match (spec.date, spec.month.as_deref()) {
        (Some(date), Some(month)) => build_table_rows(&groups, date, month),
        _ => Vec::new(),
    };

    DashboardView {
        groups,
        date_metrics,
        month_series,
        table_rows,
    }
}
