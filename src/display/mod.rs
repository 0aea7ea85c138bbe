//! Display formatting for terminal output
//!
//! Provides utilities for formatting reports and sales for terminal
//! display as tables.

pub mod report;
pub mod sale;

pub use report::{
    format_bar, format_daily, format_payments, format_percentage, format_products,
    format_suppliers, format_summary, EMPTY_PERIOD,
};
pub use sale::{format_product_options, format_sales};
