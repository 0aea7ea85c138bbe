//! YAML Export functionality
//!
//! Exports the dashboard report to YAML format for human reading.

use crate::error::{DashboardError, DashboardResult};
use crate::export::json::ReportExport;
use std::io::Write;

/// Export a report to YAML format
pub fn export_report_yaml<W: Write>(export: &ReportExport<'_>, writer: &mut W) -> DashboardResult<()> {
    writeln!(writer, "# Sales Dashboard Report")?;
    writeln!(writer, "# Generated: {}", export.report.generated_at)?;
    writeln!(writer, "# App Version: {}", export.app_version)?;
    if let Some(period) = export.period {
        writeln!(writer, "# Period: {} to {}", period.from(), period.to())?;
    }
    writeln!(writer)?;

    serde_yaml::to_writer(writer, export).map_err(|e| DashboardError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EnrichedSale, Money, SaleRecord};
    use crate::reports::DashboardReport;
    use crate::services::SalesFilter;
    use chrono::NaiveDate;

    #[test]
    fn test_yaml_export() {
        let sale = SaleRecord::new(
            "1",
            NaiveDate::from_ymd_opt(2024, 12, 1).unwrap(),
            "ZZ",
            Money::from_cents(2500),
        );
        let report = DashboardReport::run(&[EnrichedSale::from_parts(sale, None, None)], &SalesFilter::all());
        let mut out = Vec::new();
        export_report_yaml(&ReportExport::new(&report, None), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("# Sales Dashboard Report"));

        let body: serde_yaml::Value = serde_yaml::from_str(&text).unwrap();
        assert_eq!(body["schema_version"].as_str(), Some("1.0.0"));
        assert_eq!(body["summary"]["sale_count"].as_u64(), Some(1));
        assert!(body["products"]["rows"][0]["description"].is_null());
        assert!(body["suppliers"]["totals"][0]["supplier_name"].is_null());
    }
}
