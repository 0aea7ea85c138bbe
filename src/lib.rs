//! Sales Dashboard - terminal sales reporting for a small shop
//!
//! This library reads three CSV sources (sales, products, suppliers), joins
//! them into one enriched table and answers the questions of the shop's
//! dashboard: how much was sold and earned per day, per supplier and per
//! product, and how much is still to be received.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Data directory, source schema and settings
//! - `error`: Custom error types
//! - `models`: Money and the sale, product and supplier records
//! - `services`: Loading, joining, caching and filtering
//! - `reports`: Aggregations over a filtered table
//! - `display`: Terminal tables
//! - `export`: CSV, JSON and YAML output
//! - `cli`: Command handlers for the `dashboard` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use sales_dashboard::config::{DashboardPaths, Settings};
//! use sales_dashboard::reports::DashboardReport;
//! use sales_dashboard::services::{load, SalesFilter};
//!
//! let paths = DashboardPaths::resolve(None)?;
//! let settings = Settings::load_or_create(&paths)?;
//! let sales = load(&paths.sources(&settings), &settings)?;
//! let report = DashboardReport::run(&sales, &SalesFilter::all());
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;

pub use error::{DashboardError, DashboardResult};
