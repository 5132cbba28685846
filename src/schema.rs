use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Sentinel filter value meaning "no constraint on this dimension".
pub const ALL: &str = "All";

/// Currency marker for service-level groups that roll up multiple currencies.
pub const ROLLED_UP_CURRENCY: &str = "Multiple";

/// One canonical row of the subscription/revenue export: a single
/// category x market x service x currency x date observation.
///
/// Money-like fields hold currency-local amounts; ZAR-normalized values are
/// derived by the metrics calculator, never stored. Missing numeric fields
/// deserialize as `0.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub category: String,
    pub market: String,
    pub service: String,

    #[schemars(description = "ISO-like currency code, e.g. ZAR or USD")]
    #[serde(default = "default_currency")]
    pub currency: String,

    #[schemars(description = "Calendar date of the observation (YYYY-MM-DD)")]
    pub date: NaiveDate,

    /// Ordinal day within the record's month (1..31). Trusted from the
    /// source export; the engine does not re-derive it from `date`.
    #[serde(default)]
    pub month_day: u32,

    // Subscription counters
    #[serde(default)]
    pub unsubscribed: f64,
    #[serde(default)]
    pub active_subs: f64,
    #[serde(default)]
    pub new_subs: f64,
    #[serde(default)]
    pub total_subs: f64,

    // Payment counters
    #[serde(default)]
    pub new_paid: f64,
    #[serde(default)]
    pub renewals_paid: f64,
    #[serde(default)]
    pub total_paid: f64,

    // Revenue and exchange rates
    #[serde(default)]
    pub new_billed_revenue: f64,
    #[serde(default)]
    pub renewal_revenue: f64,
    #[serde(default)]
    pub usd_rate: f64,
    #[serde(default)]
    pub daily_revenue: f64,
    #[serde(default)]
    pub month_cumm: f64,
    #[serde(default)]
    pub usd_zar_rate: f64,

    // Monthly tracking
    #[serde(default)]
    pub month_revenue: f64,
    #[serde(default)]
    pub month_target: f64,

    // Run rates as exported by the sheet (the engine recomputes its own)
    #[serde(default)]
    pub target_run_rate: f64,
    #[serde(default)]
    pub actual_run_rate: f64,
    #[serde(default)]
    pub required_run_rate: f64,
}

fn default_currency() -> String {
    "USD".to_string()
}

impl Record {
    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(Record)
    }

    pub fn schema_as_json() -> Result<String, serde_json::Error> {
        let schema = Self::generate_json_schema();
        serde_json::to_string_pretty(&schema)
    }
}

/// How records are grouped for tables and charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// One group per (category, market, service, currency) tuple.
    Construct,
    /// One group per (category, market, service), currencies rolled up.
    Service,
}

impl Default for ViewMode {
    fn default() -> Self {
        Self::Construct
    }
}

/// Filter specification supplied by the presentation layer. `None` or the
/// literal `"All"` on a dimension means no constraint. The `currency`
/// constraint only applies under `ViewMode::Construct`; `date` selects the
/// KPI target date and is not a row filter.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FilterSpec {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub market: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub view_mode: ViewMode,
    /// Year-month constraint (`YYYY-MM`), compared against each record's
    /// derived year-month.
    #[serde(default)]
    pub month: Option<String>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// A partition cell produced by the grouping engine. `currency` holds the
/// literal `"Multiple"` for service-level roll-ups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub category: String,
    pub market: String,
    pub service: String,
    pub currency: String,
    pub rows: Vec<Record>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DateRange {
    pub min: NaiveDate,
    pub max: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DimensionSets {
    pub categories: Vec<String>,
    pub markets: Vec<String>,
    pub services: Vec<String>,
    pub currencies: Vec<String>,
}

/// Metadata document published alongside the record snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotMetadata {
    pub last_updated: DateTime<Utc>,
    pub row_count: usize,
    pub date_range: Option<DateRange>,
    pub dimensions: DimensionSets,
}

impl SnapshotMetadata {
    /// Derives metadata from a record collection, stamped with `last_updated`.
    pub fn from_records(records: &[Record], last_updated: DateTime<Utc>) -> Self {
        let date_range = records
            .iter()
            .map(|r| r.date)
            .min()
            .zip(records.iter().map(|r| r.date).max())
            .map(|(min, max)| DateRange { min, max });

        SnapshotMetadata {
            last_updated,
            row_count: records.len(),
            date_range,
            dimensions: DimensionSets {
                categories: crate::dimensions::unique_values(records, |r| &r.category),
                markets: crate::dimensions::unique_values(records, |r| &r.market),
                services: crate::dimensions::unique_values(records, |r| &r.service),
                currencies: crate::dimensions::unique_values(records, |r| &r.currency),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str) -> Record {
        serde_json::from_str(&format!(
            r#"{{"category":"Streaming","market":"ZA","service":"Basic","currency":"ZAR","date":"{}","monthDay":15}}"#,
            date
        ))
        .unwrap()
    }

    #[test]
    fn test_schema_generation() {
        let schema_json = Record::schema_as_json().unwrap();
        assert!(schema_json.contains("category"));
        assert!(schema_json.contains("monthDay"));
        assert!(schema_json.contains("usdZarRate"));
    }

    #[test]
    fn test_record_deserializes_with_defaults() {
        let r = record("2024-01-15");
        assert_eq!(r.date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(r.month_day, 15);
        assert_eq!(r.daily_revenue, 0.0);
        assert_eq!(r.month_target, 0.0);
    }

    #[test]
    fn test_currency_defaults_to_usd() {
        let r: Record = serde_json::from_str(
            r#"{"category":"A","market":"B","service":"C","date":"2024-03-01"}"#,
        )
        .unwrap();
        assert_eq!(r.currency, "USD");
    }

    #[test]
    fn test_view_mode_wire_format() {
        assert_eq!(
            serde_json::to_string(&ViewMode::Construct).unwrap(),
            "\"construct\""
        );
        let v: ViewMode = serde_json::from_str("\"service\"").unwrap();
        assert_eq!(v, ViewMode::Service);
    }

    #[test]
    fn test_metadata_from_records() {
        let records = vec![record("2024-01-15"), record("2024-02-03")];
        let now = Utc::now();
        let meta = SnapshotMetadata::from_records(&records, now);
        assert_eq!(meta.row_count, 2);
        let range = meta.date_range.unwrap();
        assert_eq!(range.min, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(range.max, NaiveDate::from_ymd_opt(2024, 2, 3).unwrap());
        assert_eq!(meta.dimensions.categories, vec!["Streaming"]);
    }

    #[test]
    fn test_metadata_empty_records() {
        let meta = SnapshotMetadata::from_records(&[], Utc::now());
        assert_eq!(meta.row_count, 0);
        assert!(meta.date_range.is_none());
        assert!(meta.dimensions.currencies.is_empty());
    }
}
