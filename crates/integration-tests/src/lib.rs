//! Integration tests for the Atelier storefront stores.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p atelier-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_scenario` - Shopper flows driven through [`AppContext`]
//! - `persistence_reload` - Snapshots surviving a restart, and corrupt data
//! - `cart_properties` - Cart invariants checked against a reference model
//!
//! [`AppContext`]: atelier_storefront::state::AppContext

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use atelier_storefront::catalog::Catalog;
use atelier_storefront::clock::ManualClock;
use atelier_storefront::config::StorefrontConfig;
use atelier_storefront::persistence::Storage;
use atelier_storefront::state::AppContext;
use chrono::{DateTime, Utc};

/// Fixed start time for contexts built with [`context_at`].
pub const START: DateTime<Utc> = DateTime::<Utc>::UNIX_EPOCH;

/// Build a context over `storage` with the seeded catalog and a manual clock.
#[must_use]
pub fn context_at(storage: Arc<dyn Storage>) -> (AppContext, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(START));
    let ctx = AppContext::with_clock(
        StorefrontConfig::default(),
        Arc::new(Catalog::seeded()),
        storage,
        clock.clone(),
    );
    (ctx, clock)
}
