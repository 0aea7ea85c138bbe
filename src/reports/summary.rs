//! Summary cards: headline totals for the selected period

use crate::models::{EnrichedSale, Money};
use serde::Serialize;

/// Headline numbers shown above the charts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SummaryCards {
    /// Sum of sale amounts
    pub total_sales: Money,
    /// Sum of known profits
    pub total_profit: Money,
    /// Mean sale amount; `None` when there are no sales
    pub average_ticket: Option<Money>,
    /// Number of sales
    pub sale_count: usize,
}

impl SummaryCards {
    pub fn generate(sales: &[EnrichedSale]) -> Self {
        let total_sales: Money = sales.iter().map(EnrichedSale::sale_amount).sum();
        let total_profit: Money = sales.iter().map(EnrichedSale::profit_or_zero).sum();

        Self {
            total_sales,
            total_profit,
            average_ticket: Money::average(total_sales, sales.len()),
            sale_count: sales.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProductRecord, SaleRecord};
    use chrono::NaiveDate;

    fn row(amount: i64, cost: Option<i64>) -> EnrichedSale {
        let sale = SaleRecord::new(
            "x",
            NaiveDate::from_ymd_opt(2024, 12, 1).unwrap(),
            "P",
            Money::from_cents(amount),
        );
        let product = cost.map(|c| ProductRecord::new("P", "F", "Anel", Money::from_cents(c)));
        EnrichedSale::from_parts(sale, product.as_ref(), None)
    }

    #[test]
    fn test_cards() {
        let cards = SummaryCards::generate(&[row(10000, Some(4000)), row(5000, Some(2000))]);

        assert_eq!(cards.total_sales, Money::from_cents(15000));
        assert_eq!(cards.total_profit, Money::from_cents(9000));
        assert_eq!(cards.average_ticket, Some(Money::from_cents(7500)));
        assert_eq!(cards.sale_count, 2);
    }

    #[test]
    fn test_unknown_profit_counts_as_zero() {
        let cards = SummaryCards::generate(&[row(10000, Some(4000)), row(5000, None)]);
        assert_eq!(cards.total_profit, Money::from_cents(6000));
    }

    #[test]
    fn test_empty_period() {
        let cards = SummaryCards::generate(&[]);
        assert_eq!(cards.total_sales, Money::zero());
        assert_eq!(cards.average_ticket, None);
        assert_eq!(cards.sale_count, 0);
    }
}
