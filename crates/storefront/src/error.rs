//! Unified error handling.
//!
//! Nothing here is fatal to a session. [`AppError`] reports what went wrong
//! around the stores (unknown products, refused cart requests, catalog and
//! storage setup) so the caller can show it; the stores keep working.

use atelier_core::ProductId;
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::persistence::StorageError;
use crate::store::CartRejection;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// No product with this id in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// An add-to-cart request was refused.
    #[error("Cart rejected: {0}")]
    CartRejected(#[from] CartRejection),

    /// Catalog could not be loaded.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Storage medium could not be opened.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration is invalid.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Checkout was refused.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),
}

/// Why checkout cannot proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// There is nothing to pay for.
    #[error("your bag is empty")]
    EmptyCart,

    /// Online payment is switched off for this storefront.
    #[error("online checkout is not available yet")]
    Disabled,
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
