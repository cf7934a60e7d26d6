//! Atelier Core - Shared domain types.
//!
//! This crate provides the types used across all Atelier components:
//! - `storefront` - Catalog, cart, wishlist, UI and recently-viewed stores
//! - `cli` - Command-line driver over the stores
//!
//! # Architecture
//!
//! The core crate contains only types and pure helpers - no I/O, no storage,
//! no clocks. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product ids, sizes, prices, quantities
//!   and localized text, plus the read-only [`Product`] record

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
