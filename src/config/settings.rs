//! Dashboard settings
//!
//! Manages the knobs of the pipeline: where the sources live, which columns
//! they carry, which year their day/month dates belong to, and how payment
//! flags and money are read.

use serde::{Deserialize, Serialize};

use super::paths::DashboardPaths;
use super::schema::Schema;
use crate::error::DashboardError;
use crate::models::{DEFAULT_AFFIRMATIVE_FLAGS, DEFAULT_CURRENCY_SYMBOL};

/// Settings for the sales dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Year appended to the day/month dates of the sales source
    #[serde(default = "default_year")]
    pub year: i32,

    /// Currency prefix stripped when parsing and shown when displaying
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// File name of the sales source
    #[serde(default = "default_sales_file")]
    pub sales_file: String,

    /// File name of the products source
    #[serde(default = "default_products_file")]
    pub products_file: String,

    /// File name of the suppliers source
    #[serde(default = "default_suppliers_file")]
    pub suppliers_file: String,

    /// Payment flags that mean "paid" (case-insensitive)
    #[serde(default = "default_affirmative_flags")]
    pub affirmative_flags: Vec<String>,

    /// Expected source columns
    #[serde(default)]
    pub schema: Schema,
}

fn default_schema_version() -> u32 {
    1
}

fn default_year() -> i32 {
    2024
}

fn default_currency() -> String {
    DEFAULT_CURRENCY_SYMBOL.to_string()
}

fn default_sales_file() -> String {
    "tati-vendas.csv".to_string()
}

fn default_products_file() -> String {
    "tati-produtos.csv".to_string()
}

fn default_suppliers_file() -> String {
    "tati-fornecedores.csv".to_string()
}

fn default_affirmative_flags() -> Vec<String> {
    DEFAULT_AFFIRMATIVE_FLAGS.iter().map(|s| s.to_string()).collect()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            year: default_year(),
            currency_symbol: default_currency(),
            sales_file: default_sales_file(),
            products_file: default_products_file(),
            suppliers_file: default_suppliers_file(),
            affirmative_flags: default_affirmative_flags(),
            schema: Schema::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &DashboardPaths) -> Result<Self, DashboardError> {
        let settings_path = paths.settings_file();

        let settings = if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                DashboardError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                DashboardError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            tracing::debug!(path = %settings_path.display(), "loaded settings");
            settings
        } else {
            // Don't save yet - let caller decide when to persist
            Settings::default()
        };

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &DashboardPaths) -> Result<(), DashboardError> {
        std::fs::create_dir_all(paths.data_dir()).map_err(|e| {
            DashboardError::Io(format!("Failed to create data directory: {}", e))
        })?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            DashboardError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            DashboardError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }

    /// Reject settings the loader cannot work with
    pub fn validate(&self) -> Result<(), DashboardError> {
        if chrono::NaiveDate::from_ymd_opt(self.year, 1, 1).is_none() {
            return Err(DashboardError::Config(format!(
                "year {} is out of range",
                self.year
            )));
        }

        for (name, file) in [
            ("sales_file", &self.sales_file),
            ("products_file", &self.products_file),
            ("suppliers_file", &self.suppliers_file),
        ] {
            if file.trim().is_empty() {
                return Err(DashboardError::Config(format!("{} cannot be empty", name)));
            }
        }

        self.schema.validate().map_err(DashboardError::Config)
    }
}
