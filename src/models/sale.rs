//! Sale model
//!
//! One row of the sales source: what was sold, when, for how much, to whom,
//! and whether the customer has paid.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// Payment flags that count as paid when no configuration overrides them
pub const DEFAULT_AFFIRMATIVE_FLAGS: [&str; 6] = ["sim", "s", "yes", "y", "true", "1"];

/// Payment status of a sale, normalized from the free-text "paid" flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum PaymentStatus {
    /// The customer has paid
    Paid,
    /// Payment is still due (negative, blank or unrecognized flag)
    #[default]
    Outstanding,
}

impl PaymentStatus {
    /// Both statuses in report order
    pub const ALL: [PaymentStatus; 2] = [Self::Paid, Self::Outstanding];

    /// Normalize a raw flag against a list of affirmative values
    ///
    /// Matching ignores case and surrounding whitespace. Anything that is not
    /// affirmative, including an empty cell, is outstanding.
    pub fn from_flag<S: AsRef<str>>(flag: &str, affirmative: &[S]) -> Self {
        let flag = flag.trim();
        if !flag.is_empty()
            && affirmative
                .iter()
                .any(|yes| yes.as_ref().trim().eq_ignore_ascii_case(flag))
        {
            Self::Paid
        } else {
            Self::Outstanding
        }
    }

    pub fn is_paid(&self) -> bool {
        matches!(self, Self::Paid)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Paid => "Paid",
            Self::Outstanding => "Outstanding",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single sale as read from the sales source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleRecord {
    /// Sale identifier
    pub sale_id: String,

    /// Calendar date of the sale
    pub date: NaiveDate,

    /// Product sold (foreign key into the products source)
    pub product_id: String,

    /// Amount charged
    pub sale_amount: Money,

    /// Normalized payment status
    pub payment_status: PaymentStatus,

    /// The flag exactly as written in the source
    #[serde(default)]
    pub paid_flag: String,

    /// Customer name
    #[serde(default)]
    pub customer_name: String,
}

impl SaleRecord {
    /// Create a new, outstanding sale
    pub fn new(
        sale_id: impl Into<String>,
        date: NaiveDate,
        product_id: impl Into<String>,
        sale_amount: Money,
    ) -> Self {
        Self {
            sale_id: sale_id.into(),
            date,
            product_id: product_id.into(),
            sale_amount,
            payment_status: PaymentStatus::Outstanding,
            paid_flag: String::new(),
            customer_name: String::new(),
        }
    }

    /// Set the raw payment flag and its normalized status
    pub fn with_payment(mut self, flag: impl Into<String>, status: PaymentStatus) -> Self {
        self.paid_flag = flag.into();
        self.payment_status = status;
        self
    }

    /// Set the customer name
    pub fn with_customer(mut self, customer_name: impl Into<String>) -> Self {
        self.customer_name = customer_name.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(flag: &str) -> PaymentStatus {
        PaymentStatus::from_flag(flag, &DEFAULT_AFFIRMATIVE_FLAGS)
    }

    #[test]
    fn test_affirmative_flags() {
        assert_eq!(status("Sim"), PaymentStatus::Paid);
        assert_eq!(status(" SIM "), PaymentStatus::Paid);
        assert_eq!(status("yes"), PaymentStatus::Paid);
        assert_eq!(status("1"), PaymentStatus::Paid);
    }

    #[test]
    fn test_negative_and_absent_flags_are_outstanding() {
        for flag in ["Não", "Nao", "não", "N", "no", "", "   ", "talvez"] {
            assert_eq!(
                status(flag),
                PaymentStatus::Outstanding,
                "flag = {:?}",
                flag
            );
        }
    }

    #[test]
    fn test_custom_affirmative_list() {
        let flags = vec!["pago".to_string()];
        assert_eq!(PaymentStatus::from_flag("Pago", &flags), PaymentStatus::Paid);
        assert_eq!(PaymentStatus::from_flag("Sim", &flags), PaymentStatus::Outstanding);
    }

    #[test]
    fn test_builder() {
        let sale = SaleRecord::new(
            "7",
            NaiveDate::from_ymd_opt(2024, 12, 3).unwrap(),
            "A",
            Money::from_cents(2500),
        )
        .with_payment("Sim", PaymentStatus::Paid)
        .with_customer("Maria");

        assert_eq!(sale.sale_id, "7");
        assert!(sale.payment_status.is_paid());
        assert_eq!(sale.paid_flag, "Sim");
        assert_eq!(sale.customer_name, "Maria");
    }

    #[test]
    fn test_status_display() {
        assert_eq!(PaymentStatus::Paid.to_string(), "Paid");
        assert_eq!(PaymentStatus::Outstanding.to_string(), "Outstanding");
    }
}
