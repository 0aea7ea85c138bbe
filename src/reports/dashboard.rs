//! Dashboard Report
//!
//! Bundles every view of the dashboard for one filter selection, so the
//! cards, charts and tables always come from the same filtered table.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::daily::DailyReport;
use super::payment::PaymentReport;
use super::product::ProductReport;
use super::summary::SummaryCards;
use super::supplier::SupplierReport;
use crate::models::EnrichedSale;
use crate::services::{filter_sales, SalesFilter};

/// All aggregates of one filtered view
#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub generated_at: DateTime<Utc>,
    pub filter: SalesFilter,
    pub summary: SummaryCards,
    pub daily: DailyReport,
    pub suppliers: SupplierReport,
    pub products: ProductReport,
    pub payments: PaymentReport,
}

impl DashboardReport {
    /// Build the report from rows that already passed `filter`
    pub fn build(filtered: &[EnrichedSale], filter: SalesFilter) -> Self {
        Self {
            generated_at: Utc::now(),
            filter,
            summary: SummaryCards::generate(filtered),
            daily: DailyReport::generate(filtered),
            suppliers: SupplierReport::generate(filtered),
            products: ProductReport::generate(filtered),
            payments: PaymentReport::generate(filtered),
        }
    }

    /// Filter the full table, then build the report
    pub fn run(sales: &[EnrichedSale], filter: &SalesFilter) -> Self {
        let filtered = filter_sales(sales, filter);
        Self::build(&filtered, filter.clone())
    }

    pub fn is_empty(&self) -> bool {
        self.summary.sale_count == 0
    }
}
