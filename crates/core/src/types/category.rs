//! Catalog categories.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when a category slug is not recognised.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown category: {0}")]
pub struct CategoryError(pub String);

/// Product category, serialized as its lowercase slug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Sneakers,
    Boots,
    Loafers,
    Bags,
    Accessories,
    Apparel,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Self; 6] = [
        Self::Sneakers,
        Self::Boots,
        Self::Loafers,
        Self::Bags,
        Self::Accessories,
        Self::Apparel,
    ];

    /// URL/storage slug for the category.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Sneakers => "sneakers",
            Self::Boots => "boots",
            Self::Loafers => "loafers",
            Self::Bags => "bags",
            Self::Accessories => "accessories",
            Self::Apparel => "apparel",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl std::str::FromStr for Category {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| category.slug() == needle)
            .ok_or_else(|| CategoryError(s.to_owned()))
    }
}
