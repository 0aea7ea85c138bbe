//! Supplier Report
//!
//! Sales per supplier, plus the same totals split by day for stacked
//! daily charts. Sales without a known supplier form their own group
//! (`supplier_name: None`, ordered last) so no amount is lost.

use crate::error::DashboardResult;
use crate::models::{format_money, label_or_unknown, EnrichedSale, Money};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

/// Total sales of one supplier
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SupplierTotal {
    /// `None` for sales whose supplier is unknown
    pub supplier_name: Option<String>,
    pub sale_amount: Money,
    pub sale_count: usize,
}

impl SupplierTotal {
    pub fn label(&self) -> &str {
        label_or_unknown(self.supplier_name.as_deref())
    }
}

/// Sales of one supplier on one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailySupplierTotal {
    pub date: NaiveDate,
    pub supplier_name: Option<String>,
    pub sale_amount: Money,
}

impl DailySupplierTotal {
    pub fn label(&self) -> &str {
        label_or_unknown(self.supplier_name.as_deref())
    }
}

/// Sort key placing named suppliers by name, then the unknown group
type GroupKey<'a> = (bool, Option<&'a str>);

fn group_key(name: Option<&str>) -> GroupKey<'_> {
    (name.is_none(), name)
}

/// Supplier Report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SupplierReport {
    /// Totals by supplier, ordered by name with the unknown group last
    pub totals: Vec<SupplierTotal>,
    /// Totals by (day, supplier), ordered by day then as `totals`
    pub daily: Vec<DailySupplierTotal>,
}

impl SupplierReport {
    /// Generate the report from (filtered) sales
    pub fn generate(sales: &[EnrichedSale]) -> Self {
        let mut totals: BTreeMap<GroupKey<'_>, (Money, usize)> = BTreeMap::new();
        let mut daily: BTreeMap<(NaiveDate, GroupKey<'_>), Money> = BTreeMap::new();

        for sale in sales {
            let key = group_key(sale.supplier_name.as_deref());

            let entry = totals.entry(key).or_insert((Money::zero(), 0));
            entry.0 += sale.sale_amount();
            entry.1 += 1;

            *daily.entry((sale.date(), key)).or_default() += sale.sale_amount();
        }

        Self {
            totals: totals
                .into_iter()
                .map(|((_, name), (sale_amount, sale_count))| SupplierTotal {
                    supplier_name: name.map(str::to_string),
                    sale_amount,
                    sale_count,
                })
                .collect(),
            daily: daily
                .into_iter()
                .map(|((date, (_, name)), sale_amount)| DailySupplierTotal {
                    date,
                    supplier_name: name.map(str::to_string),
                    sale_amount,
                })
                .collect(),
        }
    }

    pub fn total_sales(&self) -> Money {
        self.totals.iter().map(|t| t.sale_amount).sum()
    }

    /// Export both tables to CSV format; daily rows carry a date, totals don't
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> DashboardResult<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(["Date", "Supplier", "Sales"])?;
        for row in &self.daily {
            wtr.write_record([
                row.date.to_string(),
                row.label().to_string(),
                format_money(row.sale_amount),
            ])?;
        }
        for total in &self.totals {
            wtr.write_record([
                String::new(),
                total.label().to_string(),
                format_money(total.sale_amount),
            ])?;
        }
        wtr.flush()?;
        Ok(())
    }
}
