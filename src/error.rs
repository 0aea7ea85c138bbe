//! Custom error types for the sales dashboard
//!
//! This module defines the error hierarchy for the pipeline using thiserror
//! for ergonomic error definitions. Every load-time error names the source
//! table it came from so a failed render can point at the offending file.

use std::fmt;
use std::path::PathBuf;

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

/// The three tabular inputs of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Sales,
    Products,
    Suppliers,
}

impl SourceKind {
    /// All sources, in load order
    pub const ALL: [SourceKind; 3] = [Self::Sales, Self::Products, Self::Suppliers];
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sales => write!(f, "sales"),
            Self::Products => write!(f, "products"),
            Self::Suppliers => write!(f, "suppliers"),
        }
    }
}

/// The main error type for dashboard operations
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Malformed CSV structure in a source (ragged rows, bad UTF-8)
    #[error("CSV error in {table} source: {message}")]
    Csv { table: SourceKind, message: String },

    /// An input file does not exist
    #[error("{table} source not found: {}", path.display())]
    SourceNotFound { table: SourceKind, path: PathBuf },

    /// An input file does not match the expected schema
    #[error("Schema error in {table} source: {message}")]
    Schema { table: SourceKind, message: String },

    /// A cell could not be parsed (money, date)
    #[error("Parse error in {table} source, row {row}, column '{column}': {message}")]
    Parse {
        table: SourceKind,
        row: usize,
        column: String,
        message: String,
    },

    /// A date range whose start lies after its end
    #[error("Invalid date range: {from} is after {to}")]
    InvalidRange { from: NaiveDate, to: NaiveDate },

    /// Validation errors for user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl DashboardError {
    /// Create a schema error for a header that is absent from a source
    pub fn missing_column(table: SourceKind, column: impl AsRef<str>) -> Self {
        Self::Schema {
            table,
            message: format!("missing column '{}'", column.as_ref()),
        }
    }

    /// Create a schema error for a reference key that appears twice
    pub fn duplicate_key(table: SourceKind, column: impl AsRef<str>, key: impl AsRef<str>) -> Self {
        Self::Schema {
            table,
            message: format!(
                "duplicate key '{}' in column '{}'",
                key.as_ref(),
                column.as_ref()
            ),
        }
    }

    /// Create a CSV error for a reader failure in a source
    pub fn csv(table: SourceKind, err: csv::Error) -> Self {
        let message = err.to_string();
        Self::Csv {
            table,
            message: message.trim_start_matches("CSV error: ").to_string(),
        }
    }

    /// Create a parse error for a single cell
    pub fn parse(
        table: SourceKind,
        row: usize,
        column: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Parse {
            table,
            row,
            column: column.into(),
            message: message.into(),
        }
    }

    /// The source table this error refers to, if any
    pub fn table(&self) -> Option<SourceKind> {
        match self {
            Self::SourceNotFound { table, .. }
            | Self::Schema { table, .. }
            | Self::Csv { table, .. }
            | Self::Parse { table, .. } => Some(*table),
            _ => None,
        }
    }

    /// Check if this is a "source not found" error
    pub fn is_source_not_found(&self) -> bool {
        matches!(self, Self::SourceNotFound { .. })
    }

    /// Check if this is a schema error
    pub fn is_schema(&self) -> bool {
        matches!(self, Self::Schema { .. })
    }

    /// Check if this is a parse error
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for DashboardError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

// Reader errors go through `DashboardError::csv`, so this only sees writers
impl From<csv::Error> for DashboardError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

/// Result type alias for dashboard operations
pub type DashboardResult<T> = Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DashboardError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_source_not_found_names_table_and_path() {
        let err = DashboardError::SourceNotFound {
            table: SourceKind::Products,
            path: PathBuf::from("data/tati-produtos.csv"),
        };
        assert_eq!(
            err.to_string(),
            "products source not found: data/tati-produtos.csv"
        );
        assert!(err.is_source_not_found());
        assert_eq!(err.table(), Some(SourceKind::Products));
    }

    #[test]
    fn test_missing_column_error() {
        let err = DashboardError::missing_column(SourceKind::Sales, "valor da venda");
        assert_eq!(
            err.to_string(),
            "Schema error in sales source: missing column 'valor da venda'"
        );
        assert!(err.is_schema());
    }

    #[test]
    fn test_parse_error_display() {
        let err = DashboardError::parse(SourceKind::Sales, 3, "Dia", "invalid date '31/02'");
        assert_eq!(
            err.to_string(),
            "Parse error in sales source, row 3, column 'Dia': invalid date '31/02'"
        );
        assert!(err.is_parse());
    }

    #[test]
    fn test_csv_error_names_table() {
        let mut reader = csv::ReaderBuilder::new().from_reader("a,b\n1\n".as_bytes());
        let err = reader.records().next().unwrap().unwrap_err();
        let err = DashboardError::csv(SourceKind::Products, err);

        assert_eq!(err.table(), Some(SourceKind::Products));
        let text = err.to_string();
        assert!(text.starts_with("CSV error in products source: "));
        assert_eq!(text.matches("CSV error").count(), 1);
    }

    #[test]
    fn test_invalid_range_display() {
        let err = DashboardError::InvalidRange {
            from: NaiveDate::from_ymd_opt(2024, 12, 5).unwrap(),
            to: NaiveDate::from_ymd_opt(2024, 12, 1).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid date range: 2024-12-05 is after 2024-12-01"
        );
        assert_eq!(err.table(), None);
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: DashboardError = io_err.into();
        assert!(matches!(err, DashboardError::Io(_)));
    }
}
