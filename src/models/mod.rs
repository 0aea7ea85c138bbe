//! Core data models for the sales dashboard
//!
//! This module contains the records read from the three sources (sales,
//! products, suppliers), the joined row the pipeline works on, and the Money
//! type shared by all of them.

pub mod enriched;
pub mod money;
pub mod product;
pub mod sale;
pub mod supplier;

pub use enriched::{label_or_unknown, EnrichedSale, UNKNOWN_LABEL};
pub use money::{format_money, parse_money, Money, MoneyParseError, DEFAULT_CURRENCY_SYMBOL};
pub use product::ProductRecord;
pub use sale::{PaymentStatus, SaleRecord, DEFAULT_AFFIRMATIVE_FLAGS};
pub use supplier::SupplierRecord;
