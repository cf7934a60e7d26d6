//! Bounded line-item quantity.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Quantity of a single cart line, always within `[MIN, MAX]`.
///
/// Quantities are clamped rather than rejected: asking for 15 yields 10,
/// asking for 0 (or a negative number) yields 1. Deserialization goes through
/// the same clamp, so a tampered snapshot can never load an out-of-range value.
///
/// ```
/// use atelier_core::Quantity;
///
/// assert_eq!(Quantity::clamped(15).get(), 10);
/// assert_eq!(Quantity::clamped(0).get(), 1);
/// assert_eq!(Quantity::clamped(7).saturating_add(Quantity::clamped(5)).get(), 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "u8")]
pub struct Quantity(u8);

impl Quantity {
    /// Smallest storable quantity.
    pub const MIN: u8 = 1;
    /// Largest storable quantity per line.
    pub const MAX: u8 = 10;

    /// A quantity of one.
    pub const ONE: Self = Self(Self::MIN);

    /// Coerce any integer into the allowed range.
    #[must_use]
    pub fn clamped(value: i64) -> Self {
        let bounded = value.clamp(i64::from(Self::MIN), i64::from(Self::MAX));
        // The clamp above guarantees the value fits.
        Self(u8::try_from(bounded).unwrap_or(Self::MAX))
    }

    /// Add two quantities, clamping at [`Quantity::MAX`].
    ///
    /// The second element of [`Quantity::overflowing_add`] tells whether any
    /// part of the addition was dropped.
    #[must_use]
    pub fn saturating_add(self, other: Self) -> Self {
        self.overflowing_add(other).0
    }

    /// Add two quantities, returning the clamped sum and whether it overflowed.
    #[must_use]
    pub fn overflowing_add(self, other: Self) -> (Self, bool) {
        let sum = u16::from(self.0) + u16::from(other.0);
        let overflowed = sum > u16::from(Self::MAX);
        (Self::clamped(i64::from(sum)), overflowed)
    }

    /// Get the underlying value.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl From<i64> for Quantity {
    fn from(value: i64) -> Self {
        Self::clamped(value)
    }
}

impl From<Quantity> for u8 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        Self::from(quantity.0)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_clamped_bounds() {
        assert_eq!(Quantity::clamped(i64::MIN).get(), 1);
        assert_eq!(Quantity::clamped(-3).get(), 1);
        assert_eq!(Quantity::clamped(1).get(), 1);
        assert_eq!(Quantity::clamped(10).get(), 10);
        assert_eq!(Quantity::clamped(11).get(), 10);
        assert_eq!(Quantity::clamped(i64::MAX).get(), 10);
    }

    #[test]
    fn test_overflowing_add_reports_drop() {
        let (sum, overflowed) = Quantity::clamped(4).overflowing_add(Quantity::clamped(6));
        assert_eq!(sum.get(), 10);
        assert!(!overflowed);

        let (sum, overflowed) = Quantity::clamped(2).overflowing_add(Quantity::clamped(10));
        assert_eq!(sum.get(), 10);
        assert!(overflowed);
    }

    #[test]
    fn test_deserialize_clamps() {
        let q: Quantity = serde_json::from_str("42").unwrap();
        assert_eq!(q.get(), 10);
        let q: Quantity = serde_json::from_str("-1").unwrap();
        assert_eq!(q.get(), 1);
    }

    #[test]
    fn test_serialize_plain_number() {
        assert_eq!(serde_json::to_string(&Quantity::clamped(3)).unwrap(), "3");
    }
}
