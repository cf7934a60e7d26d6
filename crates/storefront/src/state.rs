//! Application context shared with the view layer.
//!
//! [`AppContext`] is the single owner of every store. The view layer holds a
//! reference to it, reads store state to render, and calls its action methods
//! from event handlers. Each action reads the store's current state at call
//! time, so rapid repeated clicks always build on the latest quantities.
//!
//! Two contexts over the same storage (e.g. two browser tabs) do not see each
//! other's writes until [`AppContext::rehydrate`] is called.

use std::sync::Arc;

use atelier_core::{Product, ProductId, Quantity, Size};
use tracing::instrument;

use crate::catalog::Catalog;
use crate::clock::{Clock, SystemClock};
use crate::config::StorefrontConfig;
use crate::error::{AppError, CheckoutError, Result};
use crate::persistence::{FileStorage, Persistor, Storage, keys};
use crate::store::{
    AddOutcome, CartStore, RecentlyViewedEntry, RecentlyViewedStore, UiStore, WishlistStore,
    WishlistToggle,
};

/// Application state owned by the view layer.
pub struct AppContext {
    config: StorefrontConfig,
    catalog: Arc<Catalog>,
    cart: CartStore,
    wishlist: WishlistStore,
    ui: UiStore,
    recently_viewed: RecentlyViewedStore,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("config", &self.config)
            .field("products", &self.catalog.len())
            .field("cart", &self.cart)
            .field("wishlist", &self.wishlist)
            .field("recently_viewed", &self.recently_viewed)
            .finish_non_exhaustive()
    }
}

impl AppContext {
    /// Create a context over `storage`, rehydrating every persisted store.
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: Arc<Catalog>, storage: Arc<dyn Storage>) -> Self {
        Self::with_clock(config, catalog, storage, Arc::new(SystemClock))
    }

    /// Like [`AppContext::new`] with an explicit time source.
    #[must_use]
    pub fn with_clock(
        config: StorefrontConfig,
        catalog: Arc<Catalog>,
        storage: Arc<dyn Storage>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let namespace = config.namespace.as_str();
        let cart = CartStore::load(Persistor::new(storage.clone(), namespace, keys::CART));
        let wishlist = WishlistStore::load(
            Persistor::new(storage.clone(), namespace, keys::WISHLIST),
            clock.clone(),
        );
        let recently_viewed = RecentlyViewedStore::load(
            Persistor::new(storage, namespace, keys::RECENTLY_VIEWED),
            clock.clone(),
            config.recently_viewed_max,
        );
        let ui = UiStore::new(clock, config.toast_ttl, config.max_toasts);

        tracing::info!(
            namespace,
            cart_items = cart.item_count(),
            wishlist = wishlist.count(),
            "Storefront context ready"
        );

        Self {
            config,
            catalog,
            cart,
            wishlist,
            ui,
            recently_viewed,
        }
    }

    /// Open the configured catalog and file storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog file cannot be loaded or the data
    /// directory cannot be created.
    pub fn open(config: StorefrontConfig) -> Result<Self> {
        let catalog = match &config.catalog_path {
            Some(path) => Catalog::from_path(path)?,
            None => Catalog::seeded(),
        };
        let storage = FileStorage::open(&config.data_dir)?;
        Ok(Self::new(config, Arc::new(catalog), Arc::new(storage)))
    }

    /// Re-read every persisted store from storage.
    ///
    /// Call when another writer may have changed the medium.
    pub fn rehydrate(&mut self) {
        self.cart.rehydrate();
        self.wishlist.rehydrate();
        self.recently_viewed.rehydrate();
    }

    // =========================================================================
    // Actions
    // =========================================================================

    /// Add a product to the cart, report the result as a toast, and open the
    /// cart drawer on success.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ProductNotFound`] for unknown ids and
    /// [`AppError::CartRejected`] when the cart refuses the request.
    #[instrument(skip(self))]
    pub fn add_to_cart(
        &mut self,
        product_id: &ProductId,
        size: Option<&Size>,
        quantity: i64,
    ) -> Result<AddOutcome> {
        let catalog = Arc::clone(&self.catalog);
        let product = find_product(&catalog, product_id)?;
        let name = product.display_name(self.config.locale).to_owned();
        let was_degraded = self.cart.persistence_degraded();

        match self.cart.add_item(product, size, quantity) {
            Ok(outcome) => {
                self.ui.toast().success("Added to bag", line_label(&name, size));
                if let AddOutcome::Incremented { clamped: true, .. } = outcome {
                    self.ui.toast().warning(
                        "Quantity limit reached",
                        format!("You can order up to {} of {name} per size.", Quantity::MAX),
                    );
                }
                if self.cart.persistence_degraded() && !was_degraded {
                    self.ui.toast().warning(
                        "Bag not saved",
                        "Your bag will be kept for this visit only.",
                    );
                }
                self.ui.set_cart_drawer_open(true);
                Ok(outcome)
            }
            Err(rejection) => {
                self.ui
                    .toast()
                    .error("Could not add to bag", rejection.to_string());
                Err(rejection.into())
            }
        }
    }

    /// Toggle a product in the wishlist and confirm with a toast.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ProductNotFound`] for unknown ids.
    #[instrument(skip(self))]
    pub fn toggle_wishlist(&mut self, product_id: &ProductId) -> Result<WishlistToggle> {
        let catalog = Arc::clone(&self.catalog);
        let product = find_product(&catalog, product_id)?;
        let name = product.display_name(self.config.locale).to_owned();

        let toggle = self.wishlist.toggle_item(product);
        let title = match toggle {
            WishlistToggle::Added => "Saved to wishlist",
            WishlistToggle::Removed => "Removed from wishlist",
        };
        self.ui.toast().info(title, name);
        Ok(toggle)
    }

    /// Record a product page view.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ProductNotFound`] for unknown ids.
    #[instrument(skip(self))]
    pub fn view_product(&mut self, product_id: &ProductId) -> Result<()> {
        let catalog = Arc::clone(&self.catalog);
        let product = find_product(&catalog, product_id)?;
        self.recently_viewed.add_viewed_product(product);
        Ok(())
    }

    /// The "recently viewed" rail for a product page.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ProductNotFound`] for unknown ids.
    pub fn recently_viewed_for(&self, product_id: &ProductId) -> Result<Vec<&RecentlyViewedEntry>> {
        find_product(&self.catalog, product_id)?;
        Ok(self.recently_viewed.items_excluding(product_id).collect())
    }

    /// Payment is not wired up; checkout always refuses and says so.
    ///
    /// # Errors
    ///
    /// Always returns [`CheckoutError`]: [`CheckoutError::EmptyCart`] for an
    /// empty bag, [`CheckoutError::Disabled`] otherwise.
    #[instrument(skip(self))]
    pub fn checkout(&mut self) -> Result<()> {
        let error = if self.cart.state().is_empty() {
            CheckoutError::EmptyCart
        } else {
            CheckoutError::Disabled
        };
        tracing::info!(%error, "Checkout refused");
        self.ui.toast().info("Checkout", error.to_string());
        Err(error.into())
    }

    /// Drop toasts whose time-to-live has elapsed.
    pub fn tick(&mut self) -> usize {
        self.ui.expire_due()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    /// Get a reference to the catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Get a reference to the cart store.
    #[must_use]
    pub const fn cart(&self) -> &CartStore {
        &self.cart
    }

    /// Get a mutable reference to the cart store.
    pub const fn cart_mut(&mut self) -> &mut CartStore {
        &mut self.cart
    }

    /// Get a reference to the wishlist store.
    #[must_use]
    pub const fn wishlist(&self) -> &WishlistStore {
        &self.wishlist
    }

    /// Get a mutable reference to the wishlist store.
    pub const fn wishlist_mut(&mut self) -> &mut WishlistStore {
        &mut self.wishlist
    }

    /// Get a reference to the UI store.
    #[must_use]
    pub const fn ui(&self) -> &UiStore {
        &self.ui
    }

    /// Get a mutable reference to the UI store.
    pub const fn ui_mut(&mut self) -> &mut UiStore {
        &mut self.ui
    }

    /// Get a reference to the recently viewed store.
    #[must_use]
    pub const fn recently_viewed(&self) -> &RecentlyViewedStore {
        &self.recently_viewed
    }

    /// Get a mutable reference to the recently viewed store.
    pub const fn recently_viewed_mut(&mut self) -> &mut RecentlyViewedStore {
        &mut self.recently_viewed
    }

    /// Whether any persisted store failed its last write.
    #[must_use]
    pub const fn persistence_degraded(&self) -> bool {
        self.cart.persistence_degraded()
            || self.wishlist.persistence_degraded()
            || self.recently_viewed.persistence_degraded()
    }
}

fn find_product<'a>(catalog: &'a Catalog, product_id: &ProductId) -> Result<&'a Product> {
    catalog
        .get(product_id)
        .ok_or_else(|| AppError::ProductNotFound(product_id.clone()))
}

fn line_label(name: &str, size: Option<&Size>) -> String {
    size.map_or_else(|| name.to_owned(), |size| format!("{name}, size {size}"))
}
