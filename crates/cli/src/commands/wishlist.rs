//! Wishlist commands.

use atelier_core::ProductId;
use atelier_storefront::error::Result;
use atelier_storefront::state::AppContext;

/// Print saved products.
pub fn show(ctx: &AppContext) {
    let items = ctx.wishlist().items();
    if items.is_empty() {
        println!("Your wishlist is empty.");
        return;
    }
    for entry in items {
        println!(
            "{:>4}  {:<36} {:>12}",
            entry.product_id.as_str(),
            entry.name,
            entry.price.to_string()
        );
    }
}

/// Save or unsave a product.
///
/// # Errors
///
/// Returns an error for unknown products.
pub fn toggle(ctx: &mut AppContext, product_id: &ProductId) -> Result<()> {
    ctx.toggle_wishlist(product_id)?;
    Ok(())
}
