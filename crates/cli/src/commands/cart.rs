//! Bag commands.

use atelier_core::{ProductId, Size};
use atelier_storefront::error::Result;
use atelier_storefront::state::AppContext;

/// Print bag lines and totals.
pub fn show(ctx: &AppContext) {
    let cart = ctx.cart();
    if cart.lines().is_empty() {
        println!("Your bag is empty.");
        return;
    }

    for line in cart.lines() {
        let size = line.size.as_ref().map_or("one size", Size::as_str);
        println!(
            "{:>4}  {:<36} {:<9} x{:<3} {:>12}",
            line.product_id.as_str(),
            line.name,
            size,
            line.quantity,
            line.line_total().to_string(),
        );
    }
    println!("Items: {}", cart.item_count());
    println!("Subtotal: {}", cart.subtotal());
    if cart.persistence_degraded() {
        println!("(bag could not be saved; changes last for this session only)");
    }
}

/// Add a product to the bag.
///
/// # Errors
///
/// Returns an error for unknown products or refused requests.
pub fn add(
    ctx: &mut AppContext,
    product_id: &ProductId,
    size: Option<&Size>,
    qty: i64,
) -> Result<()> {
    let outcome = ctx.add_to_cart(product_id, size, qty)?;
    println!(
        "{product_id}: quantity {} ({} in bag)",
        outcome.quantity(),
        ctx.cart().item_count()
    );
    Ok(())
}

/// Set a line's quantity. Missing lines are reported, not treated as errors.
///
/// # Errors
///
/// Never fails today; kept fallible to match the other bag actions.
pub fn update(
    ctx: &mut AppContext,
    product_id: &ProductId,
    size: Option<&Size>,
    qty: i64,
) -> Result<()> {
    match ctx.cart_mut().update_quantity(product_id, size, qty) {
        Some(quantity) => println!("{product_id}: quantity {quantity}"),
        None => println!("{product_id} is not in your bag."),
    }
    Ok(())
}

/// Remove a line. Missing lines are a no-op.
pub fn remove(ctx: &mut AppContext, product_id: &ProductId, size: Option<&Size>) {
    if ctx.cart_mut().remove_item(product_id, size) {
        println!("Removed {product_id}. {} items in bag.", ctx.cart().item_count());
    }
}

/// Empty the bag.
pub fn clear(ctx: &mut AppContext) {
    ctx.cart_mut().clear();
    println!("Your bag is empty.");
}

/// Attempt checkout, which is always refused.
///
/// # Errors
///
/// Always returns the refusal reason.
pub fn checkout(ctx: &mut AppContext) -> Result<()> {
    ctx.checkout()
}
