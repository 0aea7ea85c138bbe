//! JSON Export functionality
//!
//! Exports the dashboard report for one filter selection to JSON format
//! with schema versioning.

use crate::error::{DashboardError, DashboardResult};
use crate::reports::DashboardReport;
use crate::services::DateRange;
use serde::Serialize;
use std::io::Write;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Report export structure
#[derive(Debug, Clone, Serialize)]
pub struct ReportExport<'a> {
    /// Schema version for compatibility checking
    pub schema_version: &'static str,

    /// Application version that created the export
    pub app_version: &'static str,

    /// Dates spanned by the exported sales
    pub period: Option<DateRange>,

    /// The report itself
    #[serde(flatten)]
    pub report: &'a DashboardReport,
}

impl<'a> ReportExport<'a> {
    pub fn new(report: &'a DashboardReport, period: Option<DateRange>) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION,
            app_version: env!("CARGO_PKG_VERSION"),
            period,
            report,
        }
    }
}

/// Export a report to JSON
pub fn export_report_json<W: Write>(
    export: &ReportExport<'_>,
    writer: &mut W,
    pretty: bool,
) -> DashboardResult<()> {
    if pretty {
        serde_json::to_writer_pretty(writer, export)
    } else {
        serde_json::to_writer(writer, export)
    }
    .map_err(|e| DashboardError::Export(e.to_string()))?;

    Ok(())
}
