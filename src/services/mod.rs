//! Pipeline services
//!
//! - `loader`: reads and joins the three sources
//! - `cache`: keeps the joined table until a source changes
//! - `filter`: date-range and product filtering

pub mod cache;
pub mod filter;
pub mod loader;

pub use cache::DatasetCache;
pub use filter::{filter_sales, product_options, DateRange, SalesFilter};
pub use loader::{join, load, parse_sale_date, SalesLoader};
