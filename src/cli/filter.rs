//! Filter arguments shared by every report command

use crate::error::{DashboardError, DashboardResult};
use crate::models::EnrichedSale;
use crate::services::{parse_sale_date, DateRange, SalesFilter};
use clap::Args;

/// Date range and product selection
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// First day to include (dd/mm/yyyy, dd/mm or yyyy-mm-dd); defaults to the earliest sale
    #[arg(long, global = true)]
    pub from: Option<String>,

    /// Last day to include; defaults to the latest sale
    #[arg(long, global = true)]
    pub to: Option<String>,

    /// Product description to keep (repeatable); all products when omitted
    #[arg(long = "product", global = true)]
    pub products: Vec<String>,
}

impl FilterArgs {
    /// Turn the arguments into a filter, filling open ends of the range
    /// from the dates present in `sales`
    pub fn resolve(&self, sales: &[EnrichedSale], year: i32) -> DashboardResult<SalesFilter> {
        let from = self
            .from
            .as_deref()
            .map(|text| parse_bound("--from", text, year))
            .transpose()?;
        let to = self
            .to
            .as_deref()
            .map(|text| parse_bound("--to", text, year))
            .transpose()?;

        let covering = DateRange::covering(sales);
        let range = match (from, to) {
            (None, None) => None,
            (Some(from), Some(to)) => Some(DateRange::new(from, to)?),
            (Some(from), None) => {
                let to = covering.map_or(from, |c| c.to().max(from));
                Some(DateRange::new(from, to)?)
            }
            (None, Some(to)) => {
                let from = covering.map_or(to, |c| c.from().min(to));
                Some(DateRange::new(from, to)?)
            }
        };

        let mut filter = SalesFilter::all().with_products(self.products.iter().cloned());
        filter.range = range;
        Ok(filter)
    }
}

fn parse_bound(flag: &str, text: &str, year: i32) -> DashboardResult<chrono::NaiveDate> {
    parse_sale_date(text, year)
        .map_err(|e| DashboardError::Validation(format!("Invalid {} value: {}", flag, e)))
}
