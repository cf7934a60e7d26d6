//! Atelier Storefront library.
//!
//! Client-side state for a luxury storefront: a static catalog with shop-page
//! filtering, and the cart, wishlist, UI and recently-viewed stores that the
//! view layer reads from and dispatches to.
//!
//! # Architecture
//!
//! - [`state::AppContext`] owns every store; it is passed to the view layer
//!   instead of living in globals
//! - Each store separates a pure state type from its persistence side effect
//! - [`persistence`] snapshots persisted stores to a local key-value medium

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod clock;
pub mod config;
pub mod error;
pub mod persistence;
pub mod state;
pub mod store;
