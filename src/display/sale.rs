//! Sale display formatting
//!
//! Formats the enriched sales table and the product picker for terminal
//! output.

use tabled::Tabled;

use super::report::{render, EMPTY_PERIOD};
use crate::models::EnrichedSale;

#[derive(Tabled)]
struct SaleRow {
    #[tabled(rename = "Sale")]
    sale_id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Product")]
    description: String,
    #[tabled(rename = "Supplier")]
    supplier: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Profit")]
    profit: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Customer")]
    customer: String,
}

/// Format enriched sales as a table, in table order
pub fn format_sales(sales: &[EnrichedSale], symbol: &str) -> String {
    if sales.is_empty() {
        return EMPTY_PERIOD.to_string();
    }

    let rows: Vec<SaleRow> = sales
        .iter()
        .map(|s| SaleRow {
            sale_id: s.sale.sale_id.clone(),
            date: s.date().format("%d/%m/%Y").to_string(),
            description: s.description_label().to_string(),
            supplier: s.supplier_label().to_string(),
            amount: s.sale_amount().format_with_symbol(symbol),
            // Unknown cost leaves profit blank rather than zero
            profit: s
                .profit
                .map(|p| p.format_with_symbol(symbol))
                .unwrap_or_default(),
            status: s.payment_status().to_string(),
            customer: s.sale.customer_name.clone(),
        })
        .collect();

    render(rows)
}

/// Format the product choices, one per line
pub fn format_product_options(options: &[String]) -> String {
    if options.is_empty() {
        return "No products found.".to_string();
    }
    options.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, SaleRecord, UNKNOWN_LABEL};
    use chrono::NaiveDate;

    #[test]
    fn test_unmatched_sale_shown_as_unknown() {
        let sale = SaleRecord::new(
            "9",
            NaiveDate::from_ymd_opt(2024, 12, 3).unwrap(),
            "ZZ",
            Money::from_cents(1990),
        );
        let text = format_sales(&[EnrichedSale::from_parts(sale, None, None)], "R$");

        assert!(text.contains(UNKNOWN_LABEL));
        assert!(text.contains("03/12/2024"));
        assert!(text.contains("R$ 19,90"));
    }

    #[test]
    fn test_product_options() {
        let options = vec!["Anel".to_string(), "Colar".to_string()];
        assert_eq!(format_product_options(&options), "Anel\nColar");
        assert_eq!(format_product_options(&[]), "No products found.");
        assert_eq!(format_sales(&[], "R$"), EMPTY_PERIOD);
    }
}
