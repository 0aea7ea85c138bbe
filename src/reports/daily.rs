//! Daily Report
//!
//! Sales and profit per calendar day, oldest first.

use crate::error::DashboardResult;
use crate::models::{format_money, EnrichedSale, Money};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

/// Totals for one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyTotal {
    /// The day
    pub date: NaiveDate,
    /// Sum of sale amounts
    pub sale_amount: Money,
    /// Sum of known profits
    pub profit: Money,
    /// Number of sales
    pub sale_count: usize,
}

/// Daily Report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DailyReport {
    /// One row per day with sales, ascending by date
    pub rows: Vec<DailyTotal>,
}

impl DailyReport {
    /// Generate the report from (filtered) sales
    pub fn generate(sales: &[EnrichedSale]) -> Self {
        let mut by_day: BTreeMap<NaiveDate, DailyTotal> = BTreeMap::new();

        for sale in sales {
            let entry = by_day.entry(sale.date()).or_insert_with(|| DailyTotal {
                date: sale.date(),
                sale_amount: Money::zero(),
                profit: Money::zero(),
                sale_count: 0,
            });
            entry.sale_amount += sale.sale_amount();
            entry.profit += sale.profit_or_zero();
            entry.sale_count += 1;
        }

        Self {
            rows: by_day.into_values().collect(),
        }
    }

    pub fn total_sales(&self) -> Money {
        self.rows.iter().map(|r| r.sale_amount).sum()
    }

    pub fn total_profit(&self) -> Money {
        self.rows.iter().map(|r| r.profit).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> DashboardResult<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(["Date", "Sales", "Profit", "Count"])?;
        for row in &self.rows {
            wtr.write_record([
                row.date.to_string(),
                format_money(row.sale_amount),
                format_money(row.profit),
                row.sale_count.to_string(),
            ])?;
        }
        wtr.flush()?;
        Ok(())
    }
}
