//! Payment Report
//!
//! Paid versus outstanding sales, and the list of sales still to be
//! collected.

use crate::error::DashboardResult;
use crate::models::{format_money, EnrichedSale, Money, PaymentStatus};
use chrono::NaiveDate;
use serde::Serialize;
use std::io::Write;

/// Total for one payment status
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentStatusTotal {
    pub status: PaymentStatus,
    pub sale_amount: Money,
    pub sale_count: usize,
}

/// A sale that has not been paid yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutstandingSale {
    pub sale_id: String,
    pub date: NaiveDate,
    pub customer_name: String,
    pub sale_amount: Money,
}

/// Payment Report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentReport {
    /// Always two rows: Paid, then Outstanding
    pub totals: Vec<PaymentStatusTotal>,
    /// Unpaid sales by date (oldest first, source order within a day)
    pub outstanding: Vec<OutstandingSale>,
}

impl PaymentReport {
    /// Generate the report from (filtered) sales
    pub fn generate(sales: &[EnrichedSale]) -> Self {
        let totals = PaymentStatus::ALL
            .iter()
            .map(|status| {
                let matching = sales.iter().filter(|s| s.payment_status() == *status);
                PaymentStatusTotal {
                    status: *status,
                    sale_amount: matching.clone().map(EnrichedSale::sale_amount).sum(),
                    sale_count: matching.count(),
                }
            })
            .collect();

        let mut outstanding: Vec<OutstandingSale> = sales
            .iter()
            .filter(|s| s.payment_status() == PaymentStatus::Outstanding)
            .map(|s| OutstandingSale {
                sale_id: s.sale.sale_id.clone(),
                date: s.date(),
                customer_name: s.sale.customer_name.clone(),
                sale_amount: s.sale_amount(),
            })
            .collect();
        outstanding.sort_by_key(|s| s.date);

        Self {
            totals,
            outstanding,
        }
    }

    /// Total of one status
    pub fn total(&self, status: PaymentStatus) -> Money {
        self.totals
            .iter()
            .filter(|t| t.status == status)
            .map(|t| t.sale_amount)
            .sum()
    }

    pub fn paid(&self) -> Money {
        self.total(PaymentStatus::Paid)
    }

    pub fn outstanding_total(&self) -> Money {
        self.total(PaymentStatus::Outstanding)
    }

    /// Export the outstanding sales to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> DashboardResult<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(["Sale", "Date", "Customer", "Amount"])?;
        for sale in &self.outstanding {
            wtr.write_record([
                sale.sale_id.clone(),
                sale.date.format("%d/%m/%Y").to_string(),
                sale.customer_name.clone(),
                format_money(sale.sale_amount),
            ])?;
        }
        wtr.flush()?;
        Ok(())
    }
}
