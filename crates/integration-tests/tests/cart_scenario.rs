//! Shopper flows driven through `AppContext`, the way the view layer calls it.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::sync::Arc;

use atelier_core::{ProductId, Quantity, Size};
use atelier_integration_tests::context_at;
use atelier_storefront::error::{AppError, CheckoutError};
use atelier_storefront::persistence::MemoryStorage;
use atelier_storefront::store::{AddOutcome, CartRejection, Severity};
use chrono::TimeDelta;
use rust_decimal::Decimal;

fn id(raw: &str) -> ProductId {
    ProductId::new(raw)
}

fn size(raw: &str) -> Size {
    Size::parse(raw).unwrap()
}

// =============================================================================
// Cart
// =============================================================================

#[test]
fn test_add_clamp_update_remove() {
    let (mut ctx, _clock) = context_at(Arc::new(MemoryStorage::new()));
    let sneaker = id("1");
    let forty_two = size("42");

    let outcome = ctx.add_to_cart(&sneaker, Some(&forty_two), 2).unwrap();
    assert_eq!(
        outcome,
        AddOutcome::Added {
            quantity: Quantity::clamped(2)
        }
    );
    assert_eq!(ctx.cart().item_count(), 2);
    assert_eq!(ctx.cart().subtotal().amount, Decimal::from(900));
    assert!(ctx.ui().drawers().cart);

    let outcome = ctx.add_to_cart(&sneaker, Some(&forty_two), 15).unwrap();
    assert_eq!(
        outcome,
        AddOutcome::Incremented {
            quantity: Quantity::clamped(10),
            clamped: true
        }
    );
    assert_eq!(ctx.cart().lines().len(), 1);
    assert_eq!(ctx.cart().item_count(), 10);

    ctx.cart_mut().update_quantity(&sneaker, Some(&forty_two), 0);
    assert_eq!(ctx.cart().item_count(), 1);

    assert!(ctx.cart_mut().remove_item(&sneaker, Some(&forty_two)));
    assert!(ctx.cart().lines().is_empty());
    assert_eq!(ctx.cart().subtotal().amount, Decimal::ZERO);
}

#[test]
fn test_repeated_adds_accumulate_and_clamp() {
    let (mut ctx, _clock) = context_at(Arc::new(MemoryStorage::new()));
    let sneaker = id("1");
    let forty = size("40");

    for _ in 0..4 {
        ctx.add_to_cart(&sneaker, Some(&forty), 3).unwrap();
    }

    assert_eq!(ctx.cart().lines().len(), 1);
    assert_eq!(ctx.cart().item_count(), 10);
    assert!(
        ctx.ui()
            .visible()
            .any(|toast| toast.severity == Severity::Warning)
    );
}

#[test]
fn test_sizes_make_separate_lines() {
    let (mut ctx, _clock) = context_at(Arc::new(MemoryStorage::new()));
    let sneaker = id("1");

    ctx.add_to_cart(&sneaker, Some(&size("41")), 1).unwrap();
    ctx.add_to_cart(&sneaker, Some(&size("43")), 2).unwrap();
    ctx.add_to_cart(&id("6"), None, 1).unwrap();

    assert_eq!(ctx.cart().lines().len(), 3);
    assert_eq!(ctx.cart().item_count(), 4);
    // 3 x 450 + 1850
    assert_eq!(ctx.cart().subtotal().amount, Decimal::from(3_200));
}

#[test]
fn test_rejected_adds_leave_cart_untouched() {
    let (mut ctx, _clock) = context_at(Arc::new(MemoryStorage::new()));

    let missing_size = ctx.add_to_cart(&id("1"), None, 1).unwrap_err();
    assert!(matches!(
        missing_size,
        AppError::CartRejected(CartRejection::SizeRequired)
    ));

    let sold_out = ctx.add_to_cart(&id("5"), Some(&size("40")), 1).unwrap_err();
    assert!(matches!(
        sold_out,
        AppError::CartRejected(CartRejection::OutOfStock)
    ));

    let unknown = ctx.add_to_cart(&id("999"), None, 1).unwrap_err();
    assert!(matches!(unknown, AppError::ProductNotFound(_)));

    assert!(ctx.cart().lines().is_empty());
    assert!(!ctx.ui().drawers().cart);
    assert_eq!(
        ctx.ui()
            .visible()
            .filter(|toast| toast.severity == Severity::Error)
            .count(),
        2
    );
}

#[test]
fn test_checkout_always_refused() {
    let (mut ctx, _clock) = context_at(Arc::new(MemoryStorage::new()));
    assert!(matches!(
        ctx.checkout(),
        Err(AppError::Checkout(CheckoutError::EmptyCart))
    ));

    ctx.add_to_cart(&id("8"), None, 1).unwrap();
    assert!(matches!(
        ctx.checkout(),
        Err(AppError::Checkout(CheckoutError::Disabled))
    ));
    assert_eq!(ctx.cart().item_count(), 1);
}

// =============================================================================
// Wishlist, recently viewed, toasts
// =============================================================================

#[test]
fn test_wishlist_toggle_round_trip() {
    let (mut ctx, _clock) = context_at(Arc::new(MemoryStorage::new()));
    let bag = id("6");

    ctx.toggle_wishlist(&bag).unwrap();
    assert!(ctx.wishlist().is_in_wishlist(&bag));
    assert_eq!(ctx.wishlist().count(), 1);

    ctx.toggle_wishlist(&bag).unwrap();
    assert!(!ctx.wishlist().is_in_wishlist(&bag));
    assert_eq!(ctx.wishlist().count(), 0);
}

#[test]
fn test_recently_viewed_rail_excludes_current_product() {
    let (mut ctx, clock) = context_at(Arc::new(MemoryStorage::new()));

    for raw in ["1", "2", "3", "1"] {
        ctx.view_product(&id(raw)).unwrap();
        clock.advance(TimeDelta::seconds(30));
    }

    let all: Vec<&str> = ctx
        .recently_viewed()
        .items()
        .iter()
        .map(|entry| entry.product_id.as_str())
        .collect();
    assert_eq!(all, ["1", "3", "2"]);

    let current = id("3");
    let rail = ctx.recently_viewed_for(&current).unwrap();
    let ids: Vec<&str> = rail.iter().map(|entry| entry.product_id.as_str()).collect();
    assert_eq!(ids, ["1", "2"]);
}

#[test]
fn test_toasts_expire_with_the_clock() {
    let (mut ctx, clock) = context_at(Arc::new(MemoryStorage::new()));
    ctx.toggle_wishlist(&id("2")).unwrap();
    assert_eq!(ctx.ui().visible().count(), 1);

    clock.advance(TimeDelta::seconds(3));
    assert_eq!(ctx.tick(), 0);

    clock.advance(TimeDelta::seconds(2));
    assert_eq!(ctx.tick(), 1);
    assert_eq!(ctx.ui().visible().count(), 0);
}
