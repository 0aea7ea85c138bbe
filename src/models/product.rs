//! Product model
//!
//! Reference data describing each product: who supplies it, what it cost
//! and what it is listed for.

use serde::{Deserialize, Serialize};

use super::money::Money;

/// A product from the products source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Product identifier (referenced by sales)
    pub product_id: String,

    /// Supplier identifier (foreign key into the suppliers source)
    pub supplier_id: String,

    /// Human-readable description, used by the product filter
    pub description: String,

    /// What the product cost to acquire
    pub unit_cost: Money,

    /// Listed selling price, if the source has one
    #[serde(default)]
    pub unit_price: Option<Money>,
}

impl ProductRecord {
    /// Create a new product without a listed price
    pub fn new(
        product_id: impl Into<String>,
        supplier_id: impl Into<String>,
        description: impl Into<String>,
        unit_cost: Money,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            supplier_id: supplier_id.into(),
            description: description.into(),
            unit_cost,
            unit_price: None,
        }
    }

    /// Set the listed selling price
    pub fn with_price(mut self, unit_price: Money) -> Self {
        self.unit_price = Some(unit_price);
        self
    }
}
