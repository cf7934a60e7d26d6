//! Shop page listing.

use atelier_core::{Category, Size};
use atelier_storefront::catalog::{CatalogQuery, CategoryFilter, PriceRange, SortOrder};
use atelier_storefront::state::AppContext;
use rust_decimal::Decimal;

/// Shop page inputs, as given on the command line.
#[derive(Debug, Default)]
pub struct Filters {
    pub category: Option<Category>,
    pub size: Option<Size>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub search: Option<String>,
    pub in_stock: bool,
    pub sort: SortOrder,
}

impl From<&Filters> for CatalogQuery {
    fn from(filters: &Filters) -> Self {
        Self {
            category: filters
                .category
                .map_or(CategoryFilter::All, CategoryFilter::Only),
            size: filters.size.clone(),
            price: PriceRange {
                min: filters.min_price,
                max: filters.max_price,
            },
            search: filters.search.clone(),
            in_stock_only: filters.in_stock,
            sort: filters.sort,
        }
    }
}

/// Print the filtered product list.
pub fn list(ctx: &AppContext, filters: &Filters) {
    let locale = ctx.config().locale;
    let products = ctx.catalog().query(&CatalogQuery::from(filters));

    if products.is_empty() {
        println!("No products match these filters.");
        return;
    }

    for product in products {
        let mut flags = Vec::new();
        if product.is_new {
            flags.push("new");
        }
        if !product.in_stock {
            flags.push("sold out");
        }
        if ctx.wishlist().is_in_wishlist(&product.id) {
            flags.push("saved");
        }
        let sizes = product
            .sizes
            .iter()
            .map(Size::as_str)
            .collect::<Vec<_>>()
            .join(" ");

        println!(
            "{:>4}  {:<36} {:>12}  {:<12} {}{}",
            product.id.as_str(),
            product.display_name(locale),
            product.price.to_string(),
            product.category.slug(),
            if sizes.is_empty() { "one size" } else { sizes.as_str() },
            if flags.is_empty() {
                String::new()
            } else {
                format!("  [{}]", flags.join(", "))
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_to_query() {
        let filters = Filters {
            category: Some(Category::Boots),
            min_price: Some(Decimal::from(100)),
            sort: SortOrder::PriceDesc,
            ..Filters::default()
        };
        let query = CatalogQuery::from(&filters);
        assert_eq!(query.category, CategoryFilter::Only(Category::Boots));
        assert_eq!(query.price.min, Some(Decimal::from(100)));
        assert!(query.price.max.is_none());
        assert_eq!(query.sort, SortOrder::PriceDesc);
        assert!(!query.in_stock_only);
    }
}
