//! Wishlist store: a set of products with toggle semantics.

use std::sync::Arc;

use atelier_core::{Price, Product, ProductId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::instrument;

use crate::clock::Clock;
use crate::persistence::Persistor;

/// A saved product, with display fields copied at save time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistEntry {
    pub product_id: ProductId,
    pub name: String,
    pub price: Price,
    pub image: Option<String>,
    pub added_at: DateTime<Utc>,
}

/// Result of [`WishlistStore::toggle_item`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WishlistToggle {
    Added,
    Removed,
}

/// Wishlist contents, most recently added last.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WishlistState {
    #[serde(default)]
    entries: Vec<WishlistEntry>,
}

impl WishlistState {
    /// Add the product if absent, remove it if present.
    pub fn toggle(&mut self, product: &Product, now: DateTime<Utc>) -> WishlistToggle {
        if self.remove(&product.id) {
            return WishlistToggle::Removed;
        }
        self.entries.push(WishlistEntry {
            product_id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image: product.primary_image().map(str::to_owned),
            added_at: now,
        });
        WishlistToggle::Added
    }

    /// Remove the product. Returns whether it was present.
    pub fn remove(&mut self, product_id: &ProductId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.product_id != *product_id);
        self.entries.len() != before
    }

    /// Whether the product is saved.
    #[must_use]
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.entries.iter().any(|entry| entry.product_id == *product_id)
    }

    /// Saved entries.
    #[must_use]
    pub fn entries(&self) -> &[WishlistEntry] {
        &self.entries
    }

    /// Drop repeated product ids, keeping the first occurrence.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        let mut seen = std::collections::HashSet::new();
        self.entries
            .retain(|entry| seen.insert(entry.product_id.clone()));
        self
    }
}

/// Persisted wishlist with a count watcher for the header glyph.
pub struct WishlistStore {
    state: WishlistState,
    persistor: Persistor,
    clock: Arc<dyn Clock>,
    count_tx: watch::Sender<usize>,
}

impl std::fmt::Debug for WishlistStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WishlistStore")
            .field("state", &self.state)
            .field("persistor", &self.persistor)
            .finish_non_exhaustive()
    }
}

impl WishlistStore {
    /// Rehydrate the wishlist from its persisted snapshot.
    #[must_use]
    pub fn load(persistor: Persistor, clock: Arc<dyn Clock>) -> Self {
        let state = persistor.load::<WishlistState>().sanitized();
        let (count_tx, _) = watch::channel(state.entries().len());
        Self {
            state,
            persistor,
            clock,
            count_tx,
        }
    }

    /// Re-read the snapshot, replacing the in-memory state.
    pub fn rehydrate(&mut self) {
        self.state = self.persistor.load::<WishlistState>().sanitized();
        self.count_tx.send_replace(self.state.entries().len());
    }

    /// Add the product if absent, remove it if present.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn toggle_item(&mut self, product: &Product) -> WishlistToggle {
        let result = self.state.toggle(product, self.clock.now());
        tracing::debug!(?result, "Wishlist toggled");
        self.commit();
        result
    }

    /// Remove the product if saved. Missing products are a no-op.
    #[instrument(skip(self))]
    pub fn remove_item(&mut self, product_id: &ProductId) -> bool {
        let removed = self.state.remove(product_id);
        if removed {
            self.commit();
        }
        removed
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        if !self.state.entries.is_empty() {
            self.state.entries.clear();
            self.commit();
        }
    }

    fn commit(&mut self) {
        self.persistor.save(&self.state);
        self.count_tx.send_replace(self.state.entries().len());
    }

    /// Whether the product is saved.
    #[must_use]
    pub fn is_in_wishlist(&self, product_id: &ProductId) -> bool {
        self.state.contains(product_id)
    }

    /// Saved entries, oldest first.
    #[must_use]
    pub fn items(&self) -> &[WishlistEntry] {
        self.state.entries()
    }

    /// Number of saved entries.
    #[must_use]
    pub fn count(&self) -> usize {
        self.state.entries().len()
    }

    /// Whether the last snapshot write failed.
    #[must_use]
    pub const fn persistence_degraded(&self) -> bool {
        self.persistor.is_degraded()
    }

    /// Watch the entry count.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.count_tx.subscribe()
    }
}
