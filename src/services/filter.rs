//! Filter engine
//!
//! Narrows the enriched table to a date range and a set of products. The
//! filter is an explicit value passed in by the caller; nothing here keeps
//! state between calls.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{DashboardError, DashboardResult};
use crate::models::EnrichedSale;

/// An inclusive date range whose start is never after its end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    from: NaiveDate,
    to: NaiveDate,
}

impl DateRange {
    /// Create a range, rejecting `from > to`
    pub fn new(from: NaiveDate, to: NaiveDate) -> DashboardResult<Self> {
        if from > to {
            return Err(DashboardError::InvalidRange { from, to });
        }
        Ok(Self { from, to })
    }

    /// A range covering a single day
    pub fn single_day(date: NaiveDate) -> Self {
        Self { from: date, to: date }
    }

    /// The smallest range containing every sale, or `None` for an empty table
    pub fn covering(sales: &[EnrichedSale]) -> Option<Self> {
        let from = sales.iter().map(EnrichedSale::date).min()?;
        let to = sales.iter().map(EnrichedSale::date).max()?;
        Some(Self { from, to })
    }

    pub fn from(&self) -> NaiveDate {
        self.from
    }

    pub fn to(&self) -> NaiveDate {
        self.to
    }

    /// Check if a date falls inside the range (both ends included)
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }
}

/// User-selected filter criteria
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SalesFilter {
    /// Date range; `None` keeps every date
    pub range: Option<DateRange>,

    /// Product descriptions to keep; empty keeps every product
    pub products: BTreeSet<String>,
}

impl SalesFilter {
    /// A filter that keeps everything
    pub fn all() -> Self {
        Self::default()
    }

    /// Restrict to a date range
    pub fn with_range(mut self, range: DateRange) -> Self {
        self.range = Some(range);
        self
    }

    /// Restrict to a set of product descriptions
    pub fn with_products<I, S>(mut self, products: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.products = products.into_iter().map(Into::into).collect();
        self
    }

    /// Check if a sale passes the filter
    pub fn matches(&self, sale: &EnrichedSale) -> bool {
        let in_range = self.range.map_or(true, |range| range.contains(sale.date()));
        let product_selected = self.products.is_empty()
            || sale
                .description
                .as_ref()
                .is_some_and(|d| self.products.contains(d));

        in_range && product_selected
    }
}

/// Apply a filter, returning the matching rows in their original order
pub fn filter_sales(sales: &[EnrichedSale], filter: &SalesFilter) -> Vec<EnrichedSale> {
    let filtered: Vec<EnrichedSale> = sales
        .iter()
        .filter(|sale| filter.matches(sale))
        .cloned()
        .collect();

    tracing::debug!(
        input = sales.len(),
        kept = filtered.len(),
        products = filter.products.len(),
        "filtered sales"
    );

    filtered
}

/// Sorted distinct product descriptions, for building a product picker
pub fn product_options(sales: &[EnrichedSale]) -> Vec<String> {
    sales
        .iter()
        .filter_map(|sale| sale.description.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, ProductRecord, SaleRecord};

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, day).unwrap()
    }

    fn row(id: &str, day: u32, description: Option<&str>) -> EnrichedSale {
        let sale = SaleRecord::new(id, date(day), "P", Money::from_cents(1000));
        let product = description.map(|d| ProductRecord::new("P", "F", d, Money::from_cents(400)));
        EnrichedSale::from_parts(sale, product.as_ref(), None)
    }

    fn table() -> Vec<EnrichedSale> {
        vec![
            row("1", 1, Some("Brinco")),
            row("2", 5, Some("Colar")),
            row("3", 3, Some("Brinco")),
            row("4", 10, None),
        ]
    }

    fn ids(rows: &[EnrichedSale]) -> Vec<&str> {
        rows.iter().map(|r| r.sale.sale_id.as_str()).collect()
    }

    #[test]
    fn test_inverted_range_rejected() {
        let err = DateRange::new(date(5), date(1)).unwrap_err();
        assert!(matches!(err, DashboardError::InvalidRange { .. }));
        assert!(DateRange::new(date(1), date(1)).is_ok());
    }

    #[test]
    fn test_single_day_range() {
        let filter = SalesFilter::all().with_range(DateRange::single_day(date(1)));
        assert_eq!(ids(&filter_sales(&table(), &filter)), vec!["1"]);
    }

    #[test]
    fn test_range_is_inclusive_and_keeps_order() {
        let filter = SalesFilter::all().with_range(DateRange::new(date(3), date(10)).unwrap());
        assert_eq!(ids(&filter_sales(&table(), &filter)), vec!["2", "3", "4"]);
    }

    #[test]
    fn test_empty_product_selection_selects_all() {
        let sales = table();
        assert_eq!(filter_sales(&sales, &SalesFilter::all()), sales);
    }

    #[test]
    fn test_product_selection() {
        let filter = SalesFilter::all().with_products(["Brinco"]);
        assert_eq!(ids(&filter_sales(&table(), &filter)), vec!["1", "3"]);

        // Unmatched rows have no description and never pass a product filter
        let filter = SalesFilter::all().with_products(["Brinco", "Colar"]);
        assert_eq!(ids(&filter_sales(&table(), &filter)), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let filter = SalesFilter::all()
            .with_range(DateRange::new(date(1), date(5)).unwrap())
            .with_products(["Brinco", "Colar"]);

        let once = filter_sales(&table(), &filter);
        let twice = filter_sales(&once, &filter);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_range_outside_data_is_empty() {
        let filter = SalesFilter::all().with_range(DateRange::single_day(date(20)));
        assert!(filter_sales(&table(), &filter).is_empty());
        assert!(filter_sales(&[], &SalesFilter::all()).is_empty());
    }

    #[test]
    fn test_covering_range() {
        let range = DateRange::covering(&table()).unwrap();
        assert_eq!(range.from(), date(1));
        assert_eq!(range.to(), date(10));
        assert_eq!(DateRange::covering(&[]), None);
    }

    #[test]
    fn test_product_options_sorted_and_distinct() {
        assert_eq!(product_options(&table()), vec!["Brinco", "Colar"]);
    }
}
