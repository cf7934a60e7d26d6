//! Recently viewed products: a bounded, de-duplicated recency list.

use std::sync::Arc;

use atelier_core::{Price, Product, ProductId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::clock::Clock;
use crate::persistence::Persistor;

/// Default number of products remembered.
pub const DEFAULT_MAX_ENTRIES: usize = 8;

/// A viewed product, with display fields copied at view time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentlyViewedEntry {
    pub product_id: ProductId,
    pub name: String,
    pub price: Price,
    pub image: Option<String>,
    pub viewed_at: DateTime<Utc>,
}

/// Entries, most recent first.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RecentlyViewedState {
    #[serde(default)]
    entries: Vec<RecentlyViewedEntry>,
}

impl RecentlyViewedState {
    /// Move (or insert) the product to the head, then truncate to `max`.
    pub fn record(&mut self, product: &Product, now: DateTime<Utc>, max: usize) {
        self.entries.retain(|entry| entry.product_id != product.id);
        self.entries.insert(
            0,
            RecentlyViewedEntry {
                product_id: product.id.clone(),
                name: product.name.clone(),
                price: product.price,
                image: product.primary_image().map(str::to_owned),
                viewed_at: now,
            },
        );
        self.entries.truncate(max);
    }

    /// Entries, most recent first.
    #[must_use]
    pub fn entries(&self) -> &[RecentlyViewedEntry] {
        &self.entries
    }

    /// Drop repeated ids (keeping the most recent) and enforce `max`.
    #[must_use]
    pub fn sanitized(mut self, max: usize) -> Self {
        let mut seen = std::collections::HashSet::new();
        self.entries
            .retain(|entry| seen.insert(entry.product_id.clone()));
        self.entries.truncate(max);
        self
    }
}

/// Persisted recency list.
pub struct RecentlyViewedStore {
    state: RecentlyViewedState,
    persistor: Persistor,
    clock: Arc<dyn Clock>,
    max_entries: usize,
}

impl std::fmt::Debug for RecentlyViewedStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecentlyViewedStore")
            .field("state", &self.state)
            .field("max_entries", &self.max_entries)
            .finish_non_exhaustive()
    }
}

impl RecentlyViewedStore {
    /// Rehydrate the list, keeping at most `max_entries` (at least one).
    #[must_use]
    pub fn load(persistor: Persistor, clock: Arc<dyn Clock>, max_entries: usize) -> Self {
        let max_entries = max_entries.max(1);
        let state = persistor
            .load::<RecentlyViewedState>()
            .sanitized(max_entries);
        Self {
            state,
            persistor,
            clock,
            max_entries,
        }
    }

    /// Re-read the snapshot, replacing the in-memory state.
    pub fn rehydrate(&mut self) {
        self.state = self
            .persistor
            .load::<RecentlyViewedState>()
            .sanitized(self.max_entries);
    }

    /// Record a product view.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add_viewed_product(&mut self, product: &Product) {
        self.state
            .record(product, self.clock.now(), self.max_entries);
        self.persistor.save(&self.state);
    }

    /// Forget every view.
    pub fn clear(&mut self) {
        self.state = RecentlyViewedState::default();
        self.persistor.erase();
    }

    /// Entries, most recent first.
    #[must_use]
    pub fn items(&self) -> &[RecentlyViewedEntry] {
        self.state.entries()
    }

    /// Entries other than the product currently on screen.
    pub fn items_excluding<'a>(
        &'a self,
        current: &ProductId,
    ) -> impl Iterator<Item = &'a RecentlyViewedEntry> {
        self.items()
            .iter()
            .filter(move |entry| entry.product_id != *current)
    }

    /// Maximum list length.
    #[must_use]
    pub const fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Whether the last snapshot write failed.
    #[must_use]
    pub const fn persistence_degraded(&self) -> bool {
        self.persistor.is_degraded()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use atelier_core::{Category, CurrencyCode, LocalizedText};
    use chrono::TimeDelta;

    use super::*;
    use crate::clock::ManualClock;
    use crate::persistence::{MemoryStorage, keys};

    fn boot(id: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Boot {id}"),
            localized_name: LocalizedText::default(),
            description: LocalizedText::default(),
            price: Price::from_units(980, CurrencyCode::EUR),
            images: Vec::new(),
            category: Category::Boots,
            sizes: Vec::new(),
            in_stock: true,
            is_new: false,
        }
    }

    fn ids(store: &RecentlyViewedStore) -> Vec<&str> {
        store.items().iter().map(|e| e.product_id.as_str()).collect()
    }

    fn store(storage: &Arc<MemoryStorage>, max: usize) -> RecentlyViewedStore {
        RecentlyViewedStore::load(
            Persistor::new(storage.clone(), "test", keys::RECENTLY_VIEWED),
            Arc::new(ManualClock::default()),
            max,
        )
    }

    #[test]
    fn test_most_recent_first_and_dedup() {
        let storage = Arc::new(MemoryStorage::new());
        let mut viewed = store(&storage, 8);
        for id in ["1", "2", "3", "1"] {
            viewed.add_viewed_product(&boot(id));
        }
        assert_eq!(ids(&viewed), ["1", "3", "2"]);
    }

    #[test]
    fn test_truncates_to_max() {
        let storage = Arc::new(MemoryStorage::new());
        let mut viewed = store(&storage, 3);
        for id in ["1", "2", "3", "4", "5"] {
            viewed.add_viewed_product(&boot(id));
        }
        assert_eq!(ids(&viewed), ["5", "4", "3"]);
    }

    #[test]
    fn test_excludes_current_product() {
        let storage = Arc::new(MemoryStorage::new());
        let mut viewed = store(&storage, 8);
        viewed.add_viewed_product(&boot("1"));
        viewed.add_viewed_product(&boot("2"));
        let current = ProductId::new("2");
        let others: Vec<_> = viewed
            .items_excluding(&current)
            .map(|e| e.product_id.as_str())
            .collect();
        assert_eq!(others, ["1"]);

        let kept: Vec<&RecentlyViewedEntry> = {
            let on_screen = ProductId::new("1");
            viewed.items_excluding(&on_screen).collect()
        };
        assert_eq!(kept.len(), 1);
        assert_eq!(kept.first().unwrap().product_id.as_str(), "2");
    }

    #[test]
    fn test_reload_applies_smaller_max() {
        let storage = Arc::new(MemoryStorage::new());
        let mut viewed = store(&storage, 8);
        for id in ["1", "2", "3", "4"] {
            viewed.add_viewed_product(&boot(id));
        }
        assert_eq!(ids(&store(&storage, 2)), ["4", "3"]);
    }

    #[test]
    fn test_view_timestamp_refreshes() {
        let clock = Arc::new(ManualClock::default());
        let storage = Arc::new(MemoryStorage::new());
        let mut viewed = RecentlyViewedStore::load(
            Persistor::new(storage, "test", keys::RECENTLY_VIEWED),
            clock.clone(),
            8,
        );
        viewed.add_viewed_product(&boot("1"));
        clock.advance(TimeDelta::minutes(3));
        viewed.add_viewed_product(&boot("1"));
        assert_eq!(viewed.items().len(), 1);
        assert_eq!(viewed.items()[0].viewed_at, clock.now());
    }

    #[test]
    fn test_clear_erases_snapshot() {
        let storage = Arc::new(MemoryStorage::new());
        let mut viewed = store(&storage, 8);
        viewed.add_viewed_product(&boot("1"));
        viewed.clear();
        assert!(viewed.items().is_empty());
        assert!(storage.is_empty());
    }
}
