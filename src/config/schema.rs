//! Column schema of the three sources
//!
//! Column names are configuration rather than string literals scattered
//! through the loader. The defaults are the headers of the shop's
//! spreadsheets.

use serde::{Deserialize, Serialize};

/// Columns of the sales source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalesColumns {
    pub sale_id: String,
    pub date: String,
    pub product_id: String,
    pub sale_amount: String,
    pub paid: String,
    pub customer_name: String,
}

impl Default for SalesColumns {
    fn default() -> Self {
        Self {
            sale_id: "id venda".to_string(),
            date: "Dia".to_string(),
            product_id: "id da peça".to_string(),
            sale_amount: "valor da venda".to_string(),
            paid: "Pago".to_string(),
            customer_name: "Nome do cliente".to_string(),
        }
    }
}

/// Columns of the products source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductColumns {
    pub product_id: String,
    pub supplier_id: String,
    pub description: String,
    pub unit_cost: String,
    pub unit_price: String,
}

impl Default for ProductColumns {
    fn default() -> Self {
        Self {
            product_id: "id da peça".to_string(),
            supplier_id: "id do fornecedor".to_string(),
            description: "descrição da peça".to_string(),
            unit_cost: "valor da peça".to_string(),
            unit_price: "valor vender".to_string(),
        }
    }
}

/// Columns of the suppliers source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupplierColumns {
    pub supplier_id: String,
    pub supplier_name: String,
}

impl Default for SupplierColumns {
    fn default() -> Self {
        Self {
            supplier_id: "id do fornecedor".to_string(),
            supplier_name: "nome do fornecedor".to_string(),
        }
    }
}

/// Expected columns of every source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Schema {
    pub sales: SalesColumns,
    pub products: ProductColumns,
    pub suppliers: SupplierColumns,
}

impl Schema {
    /// Check that no column name is blank
    pub fn validate(&self) -> Result<(), String> {
        let names = [
            &self.sales.sale_id,
            &self.sales.date,
            &self.sales.product_id,
            &self.sales.sale_amount,
            &self.sales.paid,
            &self.sales.customer_name,
            &self.products.product_id,
            &self.products.supplier_id,
            &self.products.description,
            &self.products.unit_cost,
            &self.products.unit_price,
            &self.suppliers.supplier_id,
            &self.suppliers.supplier_name,
        ];
        if names.iter().any(|name| name.trim().is_empty()) {
            return Err("schema column names cannot be blank".into());
        }
        Ok(())
    }
}
