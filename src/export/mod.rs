//! Export module for the sales dashboard
//!
//! Provides data export functionality in multiple formats:
//! - CSV: the enriched table dump and the report in long format
//! - JSON: machine-readable report with schema versioning
//! - YAML: human-readable report

pub mod csv;
pub mod json;
pub mod yaml;

pub use csv::{export_enriched_csv, export_report_csv};
pub use json::{export_report_json, ReportExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_report_yaml;
