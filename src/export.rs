//! CSV export of the detail table. Fields containing commas or quotes are
//! quoted with internal quotes doubled, per the usual CSV rules.

use crate::error::Result;
use crate::table::TableRow;
use std::io::Write;

/// Serializes table rows as CSV (header first) into `writer`.
pub fn write_table_csv<W: Write>(rows: &[TableRow], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Convenience wrapper returning the CSV document as a string.
pub fn table_to_csv_string(rows: &[TableRow]) -> Result<String> {
    let mut buffer = Vec::new();
    write_table_csv(rows, &mut buffer)?;
    String::from_utf8(buffer)
        .map_err(|e| crate::error::DashboardError::ContractViolation(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::Status;

    fn row(service: &str) -> TableRow {
        TableRow {
            category: "Streaming".to_string(),
            market: "ZA".to_string(),
            service: service.to_string(),
            currency: "ZAR".to_string(),
            mtd_revenue: 1000.0,
            month_target: 2000.0,
            percent_to_target: 50.0,
            actual_run_rate: 100.0,
            required_run_rate: 55.0,
            total_base: 4000.0,
            net_adds_today: 25.0,
            daily_revenue_zar: 1850.0,
            net_adds_revenue_zar: 950.0,
            latest_mtd: 1000.0,
            target_variance: 1000.0,
            status: Status::Red,
        }
    }

    #[test]
    fn test_header_and_rows() {
        let csv = table_to_csv_string(&[row("Basic")]).unwrap();
        let mut lines = csv.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("category,market,service,currency"));
        assert!(header.contains("targetVariance"));
        let data = lines.next().unwrap();
        assert!(data.contains("Basic"));
        assert!(data.contains("1850"));
    }

    #[test]
    fn test_fields_with_commas_and_quotes_are_escaped() {
        let csv = table_to_csv_string(&[row("Basic, \"Plus\" tier")]).unwrap();
        assert!(csv.contains("\"Basic, \"\"Plus\"\" tier\""));
    }

    #[test]
    fn test_empty_rows_still_not_an_error() {
        let csv = table_to_csv_string(&[]).unwrap();
        assert!(csv.is_empty());
    }
}
