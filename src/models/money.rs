//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) to avoid floating-point precision
//! issues. Source files write amounts the Brazilian way (`R$ 1234,56`), so
//! parsing and formatting use a comma as the decimal separator.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Currency prefix used by the source files and the display formatter
pub const DEFAULT_CURRENCY_SYMBOL: &str = "R$";

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use sales_dashboard::models::Money;
    /// let amount = Money::from_cents(1050); // R$ 10,50
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from a float, rounding to the nearest cent
    ///
    /// The rounding applies to the binary value, so `1999.995` (stored as
    /// `1999.99499...`) becomes `1999.99`. Parse text with [`parse_money`]
    /// when the decimal digits matter.
    pub fn from_f64(value: f64) -> Self {
        Self((value * 100.0).round() as i64)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Get the amount as a float, for charting layers
    pub fn to_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Parse a money amount using the default `R$` prefix
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        Self::parse_with_symbol(s, DEFAULT_CURRENCY_SYMBOL)
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "10,50", "-10,50", "R$ 10,50", "-R$ 10,50",
    /// "R$ -10,50", "10", "10.50". A third fractional digit rounds half away
    /// from zero on the decimal text.
    pub fn parse_with_symbol(s: &str, symbol: &str) -> Result<Self, MoneyParseError> {
        let invalid = || MoneyParseError::InvalidFormat(s.trim().to_string());

        let (negative, rest) = split_sign(s.trim());
        let rest = if symbol.is_empty() {
            rest
        } else {
            rest.strip_prefix(symbol).unwrap_or(rest).trim_start()
        };
        let (negative, rest) = if negative {
            (true, rest)
        } else {
            split_sign(rest)
        };

        let normalized = rest.replace(',', ".");
        let (whole, fraction) = normalized
            .split_once('.')
            .unwrap_or((normalized.as_str(), ""));

        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        // A second separator survives the split and fails the digit check
        if !whole.bytes().all(|b| b.is_ascii_digit())
            || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let units: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };

        let digits = fraction.as_bytes();
        let digit = |i: usize| digits.get(i).map_or(0, |b| i64::from(b - b'0'));
        let round_up = i64::from(digits.get(2).is_some_and(|b| *b >= b'5'));
        let cents = digit(0) * 10 + digit(1) + round_up;

        // Accumulate with the sign applied so i64::MIN stays reachable
        let sign = if negative { -1 } else { 1 };
        let total = (units * sign)
            .checked_mul(100)
            .and_then(|v| v.checked_add(cents * sign))
            .ok_or_else(invalid)?;

        Ok(Self(total))
    }

    /// Format as plain decimal text with a comma separator, e.g. "-1234,56"
    pub fn format_plain(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!("{}{},{:02}", sign, self.units().abs(), self.cents_part())
    }

    /// Format for display with a currency symbol and thousands grouping,
    /// e.g. "R$ 1.234,56"
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        let units = group_thousands(self.units().unsigned_abs());
        if symbol.is_empty() {
            format!("{}{},{:02}", sign, units, self.cents_part())
        } else {
            format!("{}{} {},{:02}", sign, symbol, units, self.cents_part())
        }
    }

    /// Average of a total over a number of items, rounded half away from zero
    /// to the nearest cent
    pub fn average(total: Money, count: usize) -> Option<Money> {
        let count = i64::try_from(count).ok().filter(|n| *n > 0)?;
        let quotient = total.0 / count;
        let remainder = (total.0 % count).abs();
        let round_away = remainder >= count - remainder;
        Some(Self(if round_away {
            quotient + total.0.signum()
        } else {
            quotient
        }))
    }
}

/// Parse a source-formatted amount ("R$ 1234,56") into Money
pub fn parse_money(text: &str) -> Result<Money, MoneyParseError> {
    Money::parse(text)
}

/// Render Money the way the sources write it, minus the prefix ("1234,56")
///
/// This is the inverse of [`parse_money`].
pub fn format_money(value: Money) -> String {
    value.format_plain()
}

fn split_sign(s: &str) -> (bool, &str) {
    match s.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, s),
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_with_symbol(DEFAULT_CURRENCY_SYMBOL))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: '{}'", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}
