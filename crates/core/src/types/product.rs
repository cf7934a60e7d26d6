//! Read-only catalog product record.

use serde::{Deserialize, Serialize};

use super::{Category, Locale, LocalizedText, Price, ProductId, Size};

/// A catalog product.
///
/// Products are supplied by the catalog and never mutated by the stores; cart,
/// wishlist and recently-viewed entries copy the display fields they need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    /// Canonical (untranslated) product name.
    pub name: String,
    /// Translated product names, keyed by locale.
    #[serde(default)]
    pub localized_name: LocalizedText,
    #[serde(default)]
    pub description: LocalizedText,
    pub price: Price,
    /// Image URIs, primary image first.
    #[serde(default)]
    pub images: Vec<String>,
    pub category: Category,
    /// Sizes offered, in display order. Empty for one-size products.
    #[serde(default)]
    pub sizes: Vec<Size>,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    #[serde(default)]
    pub is_new: bool,
}

const fn default_in_stock() -> bool {
    true
}

impl Product {
    /// Name for the given locale, falling back to the canonical name.
    #[must_use]
    pub fn display_name(&self, locale: Locale) -> &str {
        match self.localized_name.get(locale) {
            "" => &self.name,
            localized => localized,
        }
    }

    /// First image, used for thumbnails.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Whether a size must be chosen before adding to the cart.
    #[must_use]
    pub fn requires_size(&self) -> bool {
        !self.sizes.is_empty()
    }

    /// Whether the product is offered in `size`.
    #[must_use]
    pub fn offers_size(&self, size: &Size) -> bool {
        self.sizes.contains(size)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::CurrencyCode;

    fn sample() -> Product {
        Product {
            id: ProductId::new("7"),
            name: "Derby Noir".to_string(),
            localized_name: LocalizedText::default().with(Locale::Fr, "Derby Noir (FR)"),
            description: LocalizedText::english("Polished calfskin derby."),
            price: Price::from_units(690, CurrencyCode::EUR),
            images: vec!["/img/derby-1.jpg".to_string(), "/img/derby-2.jpg".to_string()],
            category: Category::Loafers,
            sizes: vec![Size::parse("41").unwrap(), Size::parse("42").unwrap()],
            in_stock: true,
            is_new: false,
        }
    }

    #[test]
    fn test_display_name_falls_back_to_canonical() {
        let product = sample();
        assert_eq!(product.display_name(Locale::Fr), "Derby Noir (FR)");
        // No English translation: the French one wins over the canonical name.
        assert_eq!(product.display_name(Locale::En), "Derby Noir (FR)");

        let bare = Product {
            localized_name: LocalizedText::default(),
            ..sample()
        };
        assert_eq!(bare.display_name(Locale::It), "Derby Noir");
    }

    #[test]
    fn test_sizes() {
        let product = sample();
        assert!(product.requires_size());
        assert!(product.offers_size(&Size::parse("42").unwrap()));
        assert!(!product.offers_size(&Size::parse("44").unwrap()));
        assert_eq!(product.primary_image(), Some("/img/derby-1.jpg"));
    }

    #[test]
    fn test_deserialize_defaults() {
        let json = r#"{
            "id": "9",
            "name": "Silk Scarf",
            "price": { "amount": "320", "currency_code": "EUR" },
            "category": "accessories"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert!(product.in_stock);
        assert!(!product.is_new);
        assert!(!product.requires_size());
        assert!(product.primary_image().is_none());
    }
}
