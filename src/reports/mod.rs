//! Reports module for the sales dashboard
//!
//! Aggregations over a filtered sales table: headline cards, daily totals,
//! supplier and product rankings, and the payment split.

pub mod daily;
pub mod dashboard;
pub mod payment;
pub mod product;
pub mod summary;
pub mod supplier;

pub use daily::{DailyReport, DailyTotal};
pub use dashboard::DashboardReport;
pub use payment::{OutstandingSale, PaymentReport, PaymentStatusTotal};
pub use product::{ProductReport, ProductTotal};
pub use summary::SummaryCards;
pub use supplier::{DailySupplierTotal, SupplierReport, SupplierTotal};
