//! Cart store.
//!
//! The cart is split in two layers:
//!
//! - [`CartState`] is plain data with a pure reducer ([`CartState::reduce`]).
//!   It owns every invariant: one line per `(product, size)`, quantities in
//!   `[1, 10]`, a single currency across lines.
//! - [`CartStore`] wraps the state, persists a snapshot after every mutation
//!   and publishes a fresh [`CartSummary`] to subscribers (badge, drawer,
//!   checkout summary).
//!
//! Derived values (`item_count`, `subtotal`) are recomputed on every read.

use atelier_core::{CurrencyCode, Price, Product, ProductId, Quantity, Size};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::watch;
use tracing::instrument;

use crate::persistence::Persistor;

/// Reasons an add-to-cart request is refused.
///
/// These are user-facing validation results, not faults.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartRejection {
    /// The product comes in sizes and none was selected.
    #[error("please select a size")]
    SizeRequired,

    /// The selected size is not offered for the product.
    #[error("size {size} is not available for this product")]
    InvalidSize {
        /// The rejected size label.
        size: String,
    },

    /// The product is sold out.
    #[error("this product is out of stock")]
    OutOfStock,

    /// The cart already holds items priced in another currency.
    #[error("cart is priced in {cart}, product is priced in {product}")]
    CurrencyMismatch {
        /// Currency of the existing lines.
        cart: &'static str,
        /// Currency of the rejected product.
        product: &'static str,
    },
}

/// Identity of a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineKey {
    pub product_id: ProductId,
    pub size: Option<Size>,
}

impl LineKey {
    /// Build a key from borrowed parts.
    #[must_use]
    pub fn new(product_id: &ProductId, size: Option<&Size>) -> Self {
        Self {
            product_id: product_id.clone(),
            size: size.cloned(),
        }
    }
}

/// One cart line, with product fields copied at add time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    /// `None` for one-size products.
    pub size: Option<Size>,
    pub quantity: Quantity,
    pub name: String,
    /// Unit price at the time the line was created.
    pub price: Price,
    #[serde(default)]
    pub images: Vec<String>,
}

impl CartLine {
    fn from_product(product: &Product, size: Option<Size>, quantity: Quantity) -> Self {
        Self {
            product_id: product.id.clone(),
            size,
            quantity,
            name: product.name.clone(),
            price: product.price,
            images: product.images.clone(),
        }
    }

    /// Whether this line has the given identity.
    #[must_use]
    pub fn matches(&self, product_id: &ProductId, size: Option<&Size>) -> bool {
        self.product_id == *product_id && self.size.as_ref() == size
    }

    /// The line's identity.
    #[must_use]
    pub fn key(&self) -> LineKey {
        LineKey::new(&self.product_id, self.size.as_ref())
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// What a successful add did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line was appended.
    Added { quantity: Quantity },
    /// An existing line was incremented.
    Incremented {
        quantity: Quantity,
        /// Part of the requested quantity was dropped at the cap.
        clamped: bool,
    },
}

impl AddOutcome {
    /// Resulting quantity of the affected line.
    #[must_use]
    pub const fn quantity(self) -> Quantity {
        match self {
            Self::Added { quantity } | Self::Incremented { quantity, .. } => quantity,
        }
    }
}

/// An input to [`CartState::reduce`].
#[derive(Debug, Clone, Copy)]
pub enum CartAction<'a> {
    Add {
        product: &'a Product,
        size: Option<&'a Size>,
        quantity: i64,
    },
    Remove {
        product_id: &'a ProductId,
        size: Option<&'a Size>,
    },
    UpdateQuantity {
        product_id: &'a ProductId,
        size: Option<&'a Size>,
        quantity: i64,
    },
    Clear,
}

/// Result of a successfully reduced [`CartAction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartChange {
    Added(AddOutcome),
    Removed,
    QuantitySet(Quantity),
    Cleared,
    /// Nothing matched; state is untouched.
    Unchanged,
}

impl CartChange {
    /// Whether the state was modified and needs persisting.
    #[must_use]
    pub const fn is_mutation(self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// Snapshot of the derived cart values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartSummary {
    pub item_count: u32,
    pub line_count: usize,
    pub subtotal: Price,
}

/// Cart contents. Persisted as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CartState {
    #[serde(default)]
    lines: Vec<CartLine>,
}

impl CartState {
    /// Apply an action and report what changed.
    ///
    /// # Errors
    ///
    /// Only `Add` can fail, with a [`CartRejection`] describing the invalid
    /// request. Removing or updating a missing line is [`CartChange::Unchanged`].
    pub fn reduce(&mut self, action: CartAction<'_>) -> Result<CartChange, CartRejection> {
        match action {
            CartAction::Add {
                product,
                size,
                quantity,
            } => self.add(product, size, quantity).map(CartChange::Added),
            CartAction::Remove { product_id, size } => {
                let before = self.lines.len();
                self.lines.retain(|line| !line.matches(product_id, size));
                Ok(if self.lines.len() == before {
                    CartChange::Unchanged
                } else {
                    CartChange::Removed
                })
            }
            CartAction::UpdateQuantity {
                product_id,
                size,
                quantity,
            } => Ok(self
                .lines
                .iter_mut()
                .find(|line| line.matches(product_id, size))
                .map_or(CartChange::Unchanged, |line| {
                    line.quantity = Quantity::clamped(quantity);
                    CartChange::QuantitySet(line.quantity)
                })),
            CartAction::Clear => {
                if self.lines.is_empty() {
                    Ok(CartChange::Unchanged)
                } else {
                    self.lines.clear();
                    Ok(CartChange::Cleared)
                }
            }
        }
    }

    fn add(
        &mut self,
        product: &Product,
        size: Option<&Size>,
        quantity: i64,
    ) -> Result<AddOutcome, CartRejection> {
        validate_size(product, size)?;
        if !product.in_stock {
            return Err(CartRejection::OutOfStock);
        }
        if let Some(cart) = self.currency()
            && cart != product.price.currency_code
        {
            return Err(CartRejection::CurrencyMismatch {
                cart: cart.code(),
                product: product.price.currency_code.code(),
            });
        }

        let requested = Quantity::clamped(quantity);
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.matches(&product.id, size))
        {
            let (quantity, clamped) = line.quantity.overflowing_add(requested);
            line.quantity = quantity;
            return Ok(AddOutcome::Incremented { quantity, clamped });
        }

        self.lines
            .push(CartLine::from_product(product, size.cloned(), requested));
        Ok(AddOutcome::Added {
            quantity: requested,
        })
    }

    /// Restore invariants on state read from outside (e.g. a snapshot).
    ///
    /// Duplicate keys are merged with their quantities summed and clamped;
    /// lines priced in a currency other than the first line's are dropped.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let mut clean: Vec<CartLine> = Vec::with_capacity(self.lines.len());
        for line in self.lines {
            if let Some(first) = clean.first()
                && first.price.currency_code != line.price.currency_code
            {
                tracing::warn!(
                    product_id = %line.product_id,
                    "Dropping cart line in foreign currency"
                );
                continue;
            }
            match clean
                .iter_mut()
                .find(|kept| kept.matches(&line.product_id, line.size.as_ref()))
            {
                Some(kept) => kept.quantity = kept.quantity.saturating_add(line.quantity),
                None => clean.push(line),
            }
        }
        Self { lines: clean }
    }

    /// All lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The line for `(product_id, size)`, if any.
    #[must_use]
    pub fn line(&self, product_id: &ProductId, size: Option<&Size>) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.matches(product_id, size))
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of quantities across lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| u32::from(line.quantity)).sum()
    }

    /// Currency of the cart, if it has any lines.
    #[must_use]
    pub fn currency(&self) -> Option<CurrencyCode> {
        self.lines.first().map(|line| line.price.currency_code)
    }

    /// Sum of price times quantity across lines.
    ///
    /// An empty cart reports zero in the default currency. The sum saturates
    /// rather than overflowing.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        let currency = self.currency().unwrap_or_default();
        let amount = self
            .lines
            .iter()
            .fold(Decimal::ZERO, |total, line| {
                total.saturating_add(line.line_total().amount)
            });
        Price::new(amount, currency)
    }

    /// Derived values in one struct.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        CartSummary {
            item_count: self.item_count(),
            line_count: self.lines.len(),
            subtotal: self.subtotal(),
        }
    }
}

fn validate_size(product: &Product, size: Option<&Size>) -> Result<(), CartRejection> {
    match size {
        None if product.requires_size() => Err(CartRejection::SizeRequired),
        None => Ok(()),
        Some(size) if product.offers_size(size) => Ok(()),
        Some(size) => Err(CartRejection::InvalidSize {
            size: size.to_string(),
        }),
    }
}

/// The cart state plus its persistence and change notification.
#[derive(Debug)]
pub struct CartStore {
    state: CartState,
    persistor: Persistor,
    summary_tx: watch::Sender<CartSummary>,
}

impl CartStore {
    /// Rehydrate the cart from its persisted snapshot.
    #[must_use]
    pub fn load(persistor: Persistor) -> Self {
        let state = persistor.load::<CartState>().sanitized();
        tracing::debug!(
            key = persistor.key(),
            lines = state.lines().len(),
            "Cart rehydrated"
        );
        let (summary_tx, _) = watch::channel(state.summary());
        Self {
            state,
            persistor,
            summary_tx,
        }
    }

    /// Re-read the snapshot, replacing the in-memory state.
    pub fn rehydrate(&mut self) {
        self.state = self.persistor.load::<CartState>().sanitized();
        self.summary_tx.send_replace(self.state.summary());
    }

    /// Add `quantity` of `product` in `size`.
    ///
    /// # Errors
    ///
    /// Returns a [`CartRejection`] when the request is invalid; the cart is
    /// left unchanged.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add_item(
        &mut self,
        product: &Product,
        size: Option<&Size>,
        quantity: i64,
    ) -> Result<AddOutcome, CartRejection> {
        let outcome = self
            .state
            .add(product, size, quantity)
            .inspect_err(|rejection| tracing::debug!(%rejection, "Add to cart rejected"))?;
        self.commit();
        tracing::info!(quantity = %outcome.quantity(), "Added to cart");
        Ok(outcome)
    }

    /// Remove the line for `(product_id, size)`. Returns whether a line existed.
    #[instrument(skip(self))]
    pub fn remove_item(&mut self, product_id: &ProductId, size: Option<&Size>) -> bool {
        matches!(
            self.dispatch(CartAction::Remove { product_id, size }),
            Ok(CartChange::Removed)
        )
    }

    /// Set a line's quantity, clamped to `[1, 10]`.
    ///
    /// Returns the stored quantity, or `None` if no such line exists.
    #[instrument(skip(self))]
    pub fn update_quantity(
        &mut self,
        product_id: &ProductId,
        size: Option<&Size>,
        quantity: i64,
    ) -> Option<Quantity> {
        match self.dispatch(CartAction::UpdateQuantity {
            product_id,
            size,
            quantity,
        }) {
            Ok(CartChange::QuantitySet(quantity)) => Some(quantity),
            _ => None,
        }
    }

    /// Empty the cart.
    #[instrument(skip(self))]
    pub fn clear(&mut self) {
        let _ = self.dispatch(CartAction::Clear);
    }

    fn dispatch(&mut self, action: CartAction<'_>) -> Result<CartChange, CartRejection> {
        let change = self.state.reduce(action)?;
        if change.is_mutation() {
            self.commit();
        }
        Ok(change)
    }

    fn commit(&mut self) {
        self.persistor.save(&self.state);
        self.summary_tx.send_replace(self.state.summary());
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &CartState {
        &self.state
    }

    /// All lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        self.state.lines()
    }

    /// Sum of quantities across lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.state.item_count()
    }

    /// Sum of price times quantity across lines.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.state.subtotal()
    }

    /// Whether the last snapshot write failed.
    #[must_use]
    pub const fn persistence_degraded(&self) -> bool {
        self.persistor.is_degraded()
    }

    /// Watch the cart summary. The receiver sees every mutation.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CartSummary> {
        self.summary_tx.subscribe()
    }
}
