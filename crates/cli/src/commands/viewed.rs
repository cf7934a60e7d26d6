//! Recently viewed commands.

use atelier_core::ProductId;
use atelier_storefront::error::Result;
use atelier_storefront::state::AppContext;

/// Print recently viewed products, most recent first.
pub fn show(ctx: &AppContext, exclude: Option<&ProductId>) {
    let viewed = ctx.recently_viewed();
    let entries: Vec<_> = match exclude {
        Some(current) => viewed.items_excluding(current).collect(),
        None => viewed.items().iter().collect(),
    };
    if entries.is_empty() {
        println!("Nothing viewed yet.");
        return;
    }
    for entry in entries {
        println!(
            "{:>4}  {:<36} {:>12}  {}",
            entry.product_id.as_str(),
            entry.name,
            entry.price.to_string(),
            entry.viewed_at.format("%Y-%m-%d %H:%M")
        );
    }
}

/// Record a product page view.
///
/// # Errors
///
/// Returns an error for unknown products.
pub fn add(ctx: &mut AppContext, product_id: &ProductId) -> Result<()> {
    ctx.view_product(product_id)?;
    println!("Viewed {product_id}.");
    Ok(())
}
