//! Supplier model

use serde::{Deserialize, Serialize};

/// A supplier from the suppliers source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierRecord {
    pub supplier_id: String,
    pub supplier_name: String,
}

impl SupplierRecord {
    pub fn new(supplier_id: impl Into<String>, supplier_name: impl Into<String>) -> Self {
        Self {
            supplier_id: supplier_id.into(),
            supplier_name: supplier_name.into(),
        }
    }
}
