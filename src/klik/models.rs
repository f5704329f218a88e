//! Data models for KlikIndomaret categories and product listings.

use serde::{Deserialize, Serialize};

/// A top-level category group from the storefront navigation menu.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuperCategory {
    /// Group header label
    pub name: String,
    /// Categories in document order
    pub categories: Vec<Category>,
}

/// A category entry below a [`SuperCategory`].
///
/// A category is either a branch carrying its sub-category names, or a leaf
/// with no `subcategories` field at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Category label
    pub name: String,
    /// Category page link as found in the markup
    pub link: String,
    /// Sub-category names in document order; absent for leaf categories
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategories: Option<Vec<String>>,
}

impl Category {
    /// Returns true if this category has no sub-tree of its own.
    pub fn is_leaf(&self) -> bool {
        self.subcategories.is_none()
    }
}

/// A single product as listed on a category page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Price Look-Up code, unique per catalog
    pub plu: String,
    /// Absolute product page URL
    pub link: String,
    /// Product title
    pub title: String,
    /// Breadcrumb-derived category label of the listing page
    pub category: String,
    /// Current price in whole Rupiah
    pub price: u64,
    /// Strikeout price, present only when the listing shows one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_price: Option<u64>,
    /// Discount badge text, present only when the listing shows one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<String>,
    /// True iff `discount` is present
    pub is_discount: bool,
    /// True iff the item carries a flash-sale marker
    pub is_flash_sale: bool,
}

impl Product {
    /// Returns the saved amount against the strikeout price, if any.
    pub fn savings(&self) -> Option<u64> {
        self.old_price.map(|old| old.saturating_sub(self.price))
    }
}

/// One decoded listing page: its breadcrumb category plus the products on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    /// Category label shared by every product on the page
    pub category: String,
    /// Products in page order
    pub products: Vec<Product>,
}

impl Listing {
    /// Returns number of products on the page.
    pub fn count(&self) -> usize {
        self.products.len()
    }

    /// Returns true if the page listed no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
