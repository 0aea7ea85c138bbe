//! Path management for the sales dashboard
//!
//! Resolves the directory holding the three source files and the settings
//! file.
//!
//! ## Path Resolution Order
//!
//! 1. An explicit directory (the `--data-dir` flag)
//! 2. `DASHBOARD_DATA_DIR` environment variable (if set)
//! 3. The current working directory

use std::path::{Path, PathBuf};

use super::settings::Settings;
use crate::error::{DashboardError, SourceKind};

/// Environment variable that overrides the data directory
pub const DATA_DIR_ENV: &str = "DASHBOARD_DATA_DIR";

/// Name of the settings file inside the data directory
pub const SETTINGS_FILE_NAME: &str = "dashboard.json";

/// Manages all paths used by the dashboard
#[derive(Debug, Clone)]
pub struct DashboardPaths {
    /// Directory holding the source files
    data_dir: PathBuf,
}

impl DashboardPaths {
    /// Resolve the data directory
    ///
    /// # Errors
    ///
    /// Returns an error if no directory was given and the current directory
    /// cannot be determined.
    pub fn resolve(explicit: Option<PathBuf>) -> Result<Self, DashboardError> {
        let data_dir = match explicit {
            Some(dir) => dir,
            None => match std::env::var(DATA_DIR_ENV) {
                Ok(custom) if !custom.is_empty() => PathBuf::from(custom),
                _ => std::env::current_dir().map_err(|e| {
                    DashboardError::Config(format!("Could not determine current directory: {}", e))
                })?,
            },
        };

        Ok(Self { data_dir })
    }

    /// Create DashboardPaths with a custom data directory (useful for testing)
    pub fn with_data_dir(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Get the data directory
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.data_dir.join(SETTINGS_FILE_NAME)
    }

    /// Get the paths of the three sources named by the settings
    pub fn sources(&self, settings: &Settings) -> SourcePaths {
        SourcePaths {
            sales: self.data_dir.join(&settings.sales_file),
            products: self.data_dir.join(&settings.products_file),
            suppliers: self.data_dir.join(&settings.suppliers_file),
        }
    }
}

/// Locations of the three source files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePaths {
    pub sales: PathBuf,
    pub products: PathBuf,
    pub suppliers: PathBuf,
}

impl SourcePaths {
    /// Get the path of one source
    pub fn path(&self, kind: SourceKind) -> &Path {
        match kind {
            SourceKind::Sales => &self.sales,
            SourceKind::Products => &self.products,
            SourceKind::Suppliers => &self.suppliers,
        }
    }

    /// Iterate over all sources with their kind
    pub fn iter(&self) -> impl Iterator<Item = (SourceKind, &Path)> {
        SourceKind::ALL.into_iter().map(move |kind| (kind, self.path(kind)))
    }
}
