//! Enriched sale model
//!
//! A sale joined with its product and supplier. Enrichment fields are
//! optional: a sale whose product or supplier is unknown keeps its place in
//! the table with those fields empty.

use chrono::NaiveDate;
use serde::Serialize;

use super::money::Money;
use super::product::ProductRecord;
use super::sale::{PaymentStatus, SaleRecord};
use super::supplier::SupplierRecord;

/// Display label for rows whose product or supplier did not match
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Name to show for an optional product or supplier name
pub fn label_or_unknown(name: Option<&str>) -> &str {
    name.unwrap_or(UNKNOWN_LABEL)
}

/// A sale with product and supplier details attached
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrichedSale {
    /// The originating sale
    #[serde(flatten)]
    pub sale: SaleRecord,

    /// Supplier id from the matched product
    pub supplier_id: Option<String>,

    /// Product description from the matched product
    pub description: Option<String>,

    /// Unit cost from the matched product
    pub unit_cost: Option<Money>,

    /// Listed price from the matched product
    pub unit_price: Option<Money>,

    /// Supplier name from the matched supplier
    pub supplier_name: Option<String>,

    /// `sale_amount - unit_cost`, present only when the cost is known
    pub profit: Option<Money>,
}

impl EnrichedSale {
    /// Build an enriched row from a sale and whatever reference data matched
    pub fn from_parts(
        sale: SaleRecord,
        product: Option<&ProductRecord>,
        supplier: Option<&SupplierRecord>,
    ) -> Self {
        let unit_cost = product.map(|p| p.unit_cost);
        let profit = unit_cost.map(|cost| sale.sale_amount - cost);

        Self {
            supplier_id: product.map(|p| p.supplier_id.clone()),
            description: product.map(|p| p.description.clone()),
            unit_cost,
            unit_price: product.and_then(|p| p.unit_price),
            supplier_name: supplier.map(|s| s.supplier_name.clone()),
            profit,
            sale,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.sale.date
    }

    pub fn sale_amount(&self) -> Money {
        self.sale.sale_amount
    }

    pub fn payment_status(&self) -> PaymentStatus {
        self.sale.payment_status
    }

    /// Profit for summing; unknown profit counts as zero
    pub fn profit_or_zero(&self) -> Money {
        self.profit.unwrap_or_default()
    }

    /// Description for display, falling back to [`UNKNOWN_LABEL`]
    pub fn description_label(&self) -> &str {
        label_or_unknown(self.description.as_deref())
    }

    /// Supplier name for display, falling back to [`UNKNOWN_LABEL`]
    pub fn supplier_label(&self) -> &str {
        label_or_unknown(self.supplier_name.as_deref())
    }
}
