//! Product Report
//!
//! Sales and profit per product description, best sellers first.

use crate::error::DashboardResult;
use crate::models::{format_money, label_or_unknown, EnrichedSale, Money};
use serde::Serialize;
use std::collections::HashMap;
use std::io::Write;

/// Totals for one product
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductTotal {
    /// `None` for sales whose product is unknown
    pub description: Option<String>,
    pub sale_amount: Money,
    pub profit: Money,
    pub sale_count: usize,
}

impl ProductTotal {
    pub fn label(&self) -> &str {
        label_or_unknown(self.description.as_deref())
    }
}

/// Product Report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProductReport {
    /// Descending by sales; equal sales ordered by description, unknown last
    pub rows: Vec<ProductTotal>,
}

impl ProductReport {
    /// Generate the report from (filtered) sales
    pub fn generate(sales: &[EnrichedSale]) -> Self {
        let mut by_product: HashMap<Option<&str>, ProductTotal> = HashMap::new();

        for sale in sales {
            let description = sale.description.as_deref();
            let entry = by_product
                .entry(description)
                .or_insert_with(|| ProductTotal {
                    description: description.map(str::to_string),
                    sale_amount: Money::zero(),
                    profit: Money::zero(),
                    sale_count: 0,
                });
            entry.sale_amount += sale.sale_amount();
            entry.profit += sale.profit_or_zero();
            entry.sale_count += 1;
        }

        let mut rows: Vec<ProductTotal> = by_product.into_values().collect();
        rows.sort_by(|a, b| {
            b.sale_amount
                .cmp(&a.sale_amount)
                .then_with(|| a.description.is_none().cmp(&b.description.is_none()))
                .then_with(|| a.description.cmp(&b.description))
        });

        Self { rows }
    }

    /// Top `limit` products
    pub fn top(&self, limit: usize) -> &[ProductTotal] {
        &self.rows[..limit.min(self.rows.len())]
    }

    pub fn total_sales(&self) -> Money {
        self.rows.iter().map(|r| r.sale_amount).sum()
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> DashboardResult<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(["Product", "Sales", "Profit", "Count"])?;
        for row in &self.rows {
            wtr.write_record([
                row.label().to_string(),
                format_money(row.sale_amount),
                format_money(row.profit),
                row.sale_count.to_string(),
            ])?;
        }
        wtr.flush()?;
        Ok(())
    }
}
