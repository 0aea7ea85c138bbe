//! Configuration module for the sales dashboard
//!
//! This module provides configuration management including:
//! - Data directory and source path resolution
//! - Source column schema
//! - Settings persistence

pub mod paths;
pub mod schema;
pub mod settings;

pub use paths::{DashboardPaths, SourcePaths};
pub use schema::{ProductColumns, SalesColumns, Schema, SupplierColumns};
pub use settings::Settings;
