//! Read-only product catalog with shop-page filtering and sorting.
//!
//! The catalog is small (tens of products) and static, so queries run as a
//! plain filter-then-stable-sort pass on every input change; nothing is cached.

mod seed;

use std::collections::HashMap;

use atelier_core::{Category, Product, ProductId, Size};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The JSON document is malformed.
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Two products share an id.
    #[error("duplicate product id: {0}")]
    DuplicateId(ProductId),

    /// Reading the catalog file failed.
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
}

/// Category filter for the shop page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    fn matches(self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == category,
        }
    }
}

/// Inclusive price bounds. Either side may be open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PriceRange {
    pub min: Option<Decimal>,
    pub max: Option<Decimal>,
}

impl PriceRange {
    /// Whether `amount` lies within the bounds.
    #[must_use]
    pub fn contains(&self, amount: Decimal) -> bool {
        self.min.is_none_or(|min| amount >= min) && self.max.is_none_or(|max| amount <= max)
    }
}

/// Shop page sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Catalog order.
    #[default]
    Featured,
    /// Products flagged new first, catalog order otherwise.
    Newest,
    PriceAsc,
    PriceDesc,
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "featured" => Ok(Self::Featured),
            "newest" => Ok(Self::Newest),
            "price-asc" => Ok(Self::PriceAsc),
            "price-desc" => Ok(Self::PriceDesc),
            other => Err(format!("unknown sort order: {other}")),
        }
    }
}

/// Shop page query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    pub category: CategoryFilter,
    pub size: Option<Size>,
    pub price: PriceRange,
    /// Case-insensitive substring matched against every translated name.
    pub search: Option<String>,
    pub in_stock_only: bool,
    pub sort: SortOrder,
}

impl CatalogQuery {
    fn matches(&self, product: &Product, needle: Option<&str>) -> bool {
        self.category.matches(product.category)
            && self.size.as_ref().is_none_or(|size| product.offers_size(size))
            && self.price.contains(product.price.amount)
            && (!self.in_stock_only || product.in_stock)
            && needle.is_none_or(|needle| name_matches(product, needle))
    }
}

fn name_matches(product: &Product, needle: &str) -> bool {
    product.name.to_lowercase().contains(needle)
        || product
            .localized_name
            .translations()
            .any(|(_, name)| name.to_lowercase().contains(needle))
}

/// An ordered, immutable list of products.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
}

impl Catalog {
    /// Build a catalog from products in display order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateId`] if two products share an id.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(products.len());
        for (position, product) in products.iter().enumerate() {
            if index.insert(product.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateId(product.id.clone()));
            }
        }
        Ok(Self { products, index })
    }

    /// The built-in collection.
    #[must_use]
    pub fn seeded() -> Self {
        let products = seed::products();
        let index = products
            .iter()
            .enumerate()
            .map(|(position, product)| (product.id.clone(), position))
            .collect();
        Self { products, index }
    }

    /// Parse a JSON array of products.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid or ids repeat.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Self::new(serde_json::from_str(json)?)
    }

    /// Load a JSON catalog file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: &std::path::Path) -> Result<Self, CatalogError> {
        let catalog = Self::from_json(&std::fs::read_to_string(path)?)?;
        tracing::info!(path = %path.display(), products = catalog.len(), "Catalog loaded");
        Ok(catalog)
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.index.get(id).and_then(|&position| self.products.get(position))
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Categories that have at least one product, in [`Category::ALL`] order.
    #[must_use]
    pub fn categories(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|category| self.products.iter().any(|p| p.category == *category))
            .collect()
    }

    /// Every distinct size, in first-seen order.
    #[must_use]
    pub fn sizes(&self) -> Vec<&Size> {
        let mut sizes: Vec<&Size> = Vec::new();
        for size in self.products.iter().flat_map(|p| &p.sizes) {
            if !sizes.contains(&size) {
                sizes.push(size);
            }
        }
        sizes
    }

    /// Filter and sort for the shop page.
    ///
    /// Sorting is stable, so equal keys keep catalog order. A category with no
    /// products, or an inverted price range, yields an empty list.
    #[must_use]
    pub fn query(&self, query: &CatalogQuery) -> Vec<&Product> {
        let needle = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let mut results: Vec<&Product> = self
            .products
            .iter()
            .filter(|product| query.matches(product, needle.as_deref()))
            .collect();

        match query.sort {
            SortOrder::Featured => {}
            SortOrder::Newest => results.sort_by_key(|product| !product.is_new),
            SortOrder::PriceAsc => results.sort_by_key(|product| product.price.amount),
            SortOrder::PriceDesc => {
                results.sort_by(|a, b| b.price.amount.cmp(&a.price.amount));
            }
        }
        results
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::seeded()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.to_string()).collect()
    }

    #[test]
    fn test_seeded_ids_are_unique() {
        let seeded = Catalog::seeded();
        assert!(Catalog::new(seeded.products().to_vec()).is_ok());
        assert!(!seeded.is_empty());
    }

    #[test]
    fn test_get() {
        let catalog = Catalog::seeded();
        assert_eq!(catalog.get(&ProductId::new("1")).unwrap().id.as_str(), "1");
        assert!(catalog.get(&ProductId::new("missing")).is_none());
    }

    #[test]
    fn test_default_query_is_catalog_order() {
        let catalog = Catalog::seeded();
        let all = catalog.query(&CatalogQuery::default());
        assert_eq!(all.len(), catalog.len());
        assert_eq!(
            ids(&all),
            catalog.products().iter().map(|p| p.id.to_string()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_category_filter() {
        let catalog = Catalog::seeded();
        let bags = catalog.query(&CatalogQuery {
            category: CategoryFilter::Only(Category::Bags),
            ..CatalogQuery::default()
        });
        assert!(!bags.is_empty());
        assert!(bags.iter().all(|p| p.category == Category::Bags));
    }

    #[test]
    fn test_category_without_products_is_empty() {
        let only_bag = Catalog::new(
            Catalog::seeded()
                .products()
                .iter()
                .filter(|p| p.category == Category::Bags)
                .cloned()
                .collect(),
        )
        .unwrap();
        let result = only_bag.query(&CatalogQuery {
            category: CategoryFilter::Only(Category::Boots),
            ..CatalogQuery::default()
        });
        assert!(result.is_empty());
    }

    #[test]
    fn test_size_filter() {
        let catalog = Catalog::seeded();
        let size = Size::parse("44").unwrap();
        let result = catalog.query(&CatalogQuery {
            size: Some(size.clone()),
            ..CatalogQuery::default()
        });
        assert!(!result.is_empty());
        assert!(result.iter().all(|p| p.offers_size(&size)));
    }

    #[test]
    fn test_price_range_inclusive() {
        let catalog = Catalog::seeded();
        let exact = catalog.get(&ProductId::new("1")).unwrap().price.amount;
        let result = catalog.query(&CatalogQuery {
            price: PriceRange {
                min: Some(exact),
                max: Some(exact),
            },
            ..CatalogQuery::default()
        });
        assert!(result.iter().any(|p| p.id.as_str() == "1"));
        assert!(result.iter().all(|p| p.price.amount == exact));
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let catalog = Catalog::seeded();
        let result = catalog.query(&CatalogQuery {
            price: PriceRange {
                min: Some(Decimal::from(1000)),
                max: Some(Decimal::from(10)),
            },
            ..CatalogQuery::default()
        });
        assert!(result.is_empty());
    }

    #[test]
    fn test_sort_by_price() {
        let catalog = Catalog::seeded();
        let asc = catalog.query(&CatalogQuery {
            sort: SortOrder::PriceAsc,
            ..CatalogQuery::default()
        });
        assert!(asc.windows(2).all(|w| w[0].price.amount <= w[1].price.amount));

        let desc = catalog.query(&CatalogQuery {
            sort: SortOrder::PriceDesc,
            ..CatalogQuery::default()
        });
        assert!(desc.windows(2).all(|w| w[0].price.amount >= w[1].price.amount));
    }

    #[test]
    fn test_sort_newest_is_stable() {
        let catalog = Catalog::seeded();
        let newest = catalog.query(&CatalogQuery {
            sort: SortOrder::Newest,
            ..CatalogQuery::default()
        });
        let split = newest.iter().take_while(|p| p.is_new).count();
        assert!(split > 0);
        assert!(newest[split..].iter().all(|p| !p.is_new));

        // Within each group, catalog order is preserved.
        let position = |p: &&Product| catalog.products().iter().position(|c| c.id == p.id);
        let new_positions: Vec<_> = newest[..split].iter().map(position).collect();
        assert!(new_positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_search_matches_translations() {
        let catalog = Catalog::seeded();
        let result = catalog.query(&CatalogQuery {
            search: Some("  MOCASSIN ".to_string()),
            ..CatalogQuery::default()
        });
        assert!(!result.is_empty());
        assert!(result.iter().all(|p| p.category == Category::Loafers));
    }

    #[test]
    fn test_in_stock_only() {
        let catalog = Catalog::seeded();
        let result = catalog.query(&CatalogQuery {
            in_stock_only: true,
            ..CatalogQuery::default()
        });
        assert!(result.len() < catalog.len());
        assert!(result.iter().all(|p| p.in_stock));
    }

    #[test]
    fn test_from_json_rejects_duplicates() {
        let json = r#"[
            {"id":"1","name":"A","price":{"amount":"1","currency_code":"EUR"},"category":"bags"},
            {"id":"1","name":"B","price":{"amount":"2","currency_code":"EUR"},"category":"bags"}
        ]"#;
        assert!(matches!(
            Catalog::from_json(json),
            Err(CatalogError::DuplicateId(_))
        ));
    }

    #[test]
    fn test_from_json_rejects_out_of_range_price() {
        let json = r#"[
            {"id":"1","name":"A","price":{"amount":"79228162514264337593543950335","currency_code":"EUR"},"category":"bags"}
        ]"#;
        assert!(matches!(
            Catalog::from_json(json),
            Err(CatalogError::Json(_))
        ));
    }

    #[test]
    fn test_sort_order_parse() {
        assert_eq!("price-desc".parse::<SortOrder>(), Ok(SortOrder::PriceDesc));
        assert!("cheapest".parse::<SortOrder>().is_err());
    }
}
