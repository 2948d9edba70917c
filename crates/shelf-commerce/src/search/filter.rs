//! Catalog filter types.

use crate::catalog::Product;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Brand and text filter applied to the catalog listing.
///
/// Both predicates are optional and intersect. Brand matching is exact;
/// the text predicate is a trimmed, case-insensitive substring match on the
/// display name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogFilter {
    /// Selected brand, if any.
    pub brand: Option<String>,
    /// Raw search text as typed.
    pub search: String,
}

impl CatalogFilter {
    /// Create an empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the brand.
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    /// Set the search text.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Select a brand, or clear it when it is already selected.
    pub fn toggle_brand(mut self, brand: &str) -> Self {
        if self.brand.as_deref() == Some(brand) {
            self.brand = None;
        } else {
            self.brand = Some(brand.to_string());
        }
        self
    }

    /// Lowercased, trimmed search needle; `None` when the text is blank.
    pub fn needle(&self) -> Option<String> {
        let trimmed = self.search.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
    }

    /// Whether neither predicate is active.
    pub fn is_empty(&self) -> bool {
        self.brand.is_none() && self.needle().is_none()
    }

    /// Apply the filter to a slice of products, keeping catalog order.
    pub fn apply(&self, items: &[Product]) -> Vec<Product> {
        let needle = self.needle();
        items
            .iter()
            .filter(|item| match &self.brand {
                Some(brand) => &item.brand == brand,
                None => true,
            })
            .filter(|item| match &needle {
                Some(needle) => item.name_contains(needle),
                None => true,
            })
            .cloned()
            .collect()
    }
}

/// Filter `items` by an optional brand and a search text.
pub fn filter_products(items: &[Product], brand: Option<&str>, search: &str) -> Vec<Product> {
    CatalogFilter {
        brand: brand.map(str::to_string),
        search: search.to_string(),
    }
    .apply(items)
}

/// Distinct brands in order of first occurrence.
pub fn distinct_brands(items: &[Product]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut brands = Vec::new();
    for item in items {
        if seen.insert(item.brand.as_str()) {
            brands.push(item.brand.clone());
        }
    }
    brands
}
