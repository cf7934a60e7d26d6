//! Client state stores.
//!
//! Each store owns its data exclusively. Persisted stores (cart, wishlist,
//! recently viewed) write a full snapshot through their
//! [`Persistor`](crate::persistence::Persistor) after every mutation; the UI
//! store is ephemeral.

pub mod cart;
pub mod recently_viewed;
pub mod ui;
pub mod wishlist;

pub use cart::{
    AddOutcome, CartAction, CartChange, CartLine, CartRejection, CartState, CartStore,
    CartSummary, LineKey,
};
pub use recently_viewed::{RecentlyViewedEntry, RecentlyViewedState, RecentlyViewedStore};
pub use ui::{Drawers, Severity, Toast, ToastRequest, Toaster, UiStore};
pub use wishlist::{WishlistEntry, WishlistState, WishlistStore, WishlistToggle};
