//! Core types for Atelier.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod category;
pub mod id;
pub mod locale;
pub mod price;
pub mod product;
pub mod quantity;
pub mod size;

pub use category::{Category, CategoryError};
pub use id::ProductId;
pub use locale::{Locale, LocaleError, LocalizedText};
pub use price::{CurrencyCode, MAX_PRICE_UNITS, Price, PriceError};
pub use product::Product;
pub use quantity::Quantity;
pub use size::{Size, SizeError};
