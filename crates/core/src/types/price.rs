//! Type-safe price representation using decimal arithmetic.
//!
//! Catalog prices are whole currency units (e.g. `1250` for €1,250), but
//! amounts are carried as [`Decimal`] so line totals and subtotals never
//! go through floating point.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::quantity::Quantity;

/// Largest accepted amount, in whole currency units.
pub const MAX_PRICE_UNITS: i64 = 1_000_000_000;

/// Errors that can occur when reading a price from outside data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
    #[error("price amount cannot be negative")]
    Negative,
    #[error("price amount exceeds {max} units")]
    TooLarge { max: i64 },
}

/// A price with currency information.
///
/// Deserialised amounts must lie in `[0, MAX_PRICE_UNITS]`, so line totals
/// and subtotals built from catalog or snapshot data stay far from the
/// `Decimal` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PriceRepr")]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., euros, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price from whole currency units.
    ///
    /// ```rust
    /// # use atelier_core::{CurrencyCode, Price};
    /// let price = Price::from_units(1250, CurrencyCode::EUR);
    /// assert_eq!(price.to_string(), "€1250.00");
    /// ```
    #[must_use]
    pub fn from_units(units: i64, currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::from(units), currency_code)
    }

    /// A zero amount in the given currency.
    #[must_use]
    pub const fn zero(currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::ZERO, currency_code)
    }

    /// Price multiplied by a line quantity, saturating at `Decimal::MAX`.
    #[must_use]
    pub fn times(self, quantity: Quantity) -> Self {
        Self::new(
            self.amount.saturating_mul(Decimal::from(quantity.get())),
            self.currency_code,
        )
    }

    /// Add two prices of the same currency.
    ///
    /// Returns `None` when the currencies differ or the sum overflows.
    #[must_use]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        if self.currency_code != other.currency_code {
            return None;
        }
        self.amount
            .checked_add(other.amount)
            .map(|amount| Self::new(amount, self.currency_code))
    }
}

#[derive(Deserialize)]
struct PriceRepr {
    amount: Decimal,
    currency_code: CurrencyCode,
}

impl TryFrom<PriceRepr> for Price {
    type Error = PriceError;

    fn try_from(repr: PriceRepr) -> Result<Self, Self::Error> {
        if repr.amount < Decimal::ZERO {
            return Err(PriceError::Negative);
        }
        if repr.amount > Decimal::from(MAX_PRICE_UNITS) {
            return Err(PriceError::TooLarge {
                max: MAX_PRICE_UNITS,
            });
        }
        Ok(Self::new(repr.amount, repr.currency_code))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{:.2}",
            self.currency_code.symbol(),
            self.amount.round_dp(2)
        )
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    EUR,
    USD,
    GBP,
    CHF,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::EUR => "€",
            Self::USD => "$",
            Self::GBP => "£",
            Self::CHF => "CHF ",
        }
    }

    /// Three-letter ISO code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::EUR => "EUR",
            Self::USD => "USD",
            Self::GBP => "GBP",
            Self::CHF => "CHF",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_times_quantity() {
        let price = Price::from_units(450, CurrencyCode::EUR);
        let total = price.times(Quantity::clamped(3));
        assert_eq!(total.amount, Decimal::from(1350));
        assert_eq!(total.currency_code, CurrencyCode::EUR);
    }

    #[test]
    fn test_checked_add_same_currency() {
        let a = Price::from_units(100, CurrencyCode::USD);
        let b = Price::from_units(250, CurrencyCode::USD);
        assert_eq!(a.checked_add(b).unwrap().amount, Decimal::from(350));
    }

    #[test]
    fn test_checked_add_mixed_currency() {
        let a = Price::from_units(100, CurrencyCode::USD);
        let b = Price::from_units(250, CurrencyCode::EUR);
        assert!(a.checked_add(b).is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(Price::from_units(890, CurrencyCode::GBP).to_string(), "£890.00");
        assert_eq!(Price::zero(CurrencyCode::CHF).to_string(), "CHF 0.00");
    }

    #[test]
    fn test_serde_amount_is_string() {
        let json = serde_json::to_string(&Price::from_units(5, CurrencyCode::EUR)).unwrap();
        assert_eq!(json, r#"{"amount":"5","currency_code":"EUR"}"#);
        let back: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Price::from_units(5, CurrencyCode::EUR));
    }

    #[test]
    fn test_deserialize_rejects_out_of_range_amounts() {
        let huge = r#"{"amount":"79228162514264337593543950335","currency_code":"EUR"}"#;
        assert!(serde_json::from_str::<Price>(huge).is_err());

        let negative = r#"{"amount":"-1","currency_code":"EUR"}"#;
        assert!(serde_json::from_str::<Price>(negative).is_err());

        let at_limit = format!(r#"{{"amount":"{MAX_PRICE_UNITS}","currency_code":"EUR"}}"#);
        assert!(serde_json::from_str::<Price>(&at_limit).is_ok());
    }

    #[test]
    fn test_arithmetic_never_panics() {
        let max = Price::new(Decimal::MAX, CurrencyCode::EUR);
        assert_eq!(max.times(Quantity::clamped(10)).amount, Decimal::MAX);
        assert!(max.checked_add(Price::from_units(1, CurrencyCode::EUR)).is_none());
    }
}
