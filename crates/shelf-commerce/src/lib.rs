//! Storefront domain types and logic for Shelf.
//!
//! This crate provides the types shared by every screen of the storefront:
//!
//! - **Catalog**: Products, feedback entries, limited-time deals
//! - **Favorites**: The denormalized snapshot mirrored into the device cache
//! - **Search**: Brand and text filtering over a fetched catalog
//!
//! # Example
//!
//! ```rust
//! use shelf_commerce::prelude::*;
//!
//! let product = Product::new("1", "Abcart", 100.0).with_limited_time_deal(0.2);
//!
//! assert_eq!(product.discount_percent(), 20);
//! assert_eq!(product.discounted_price(Currency::USD).display_amount(), "80.00");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod catalog;
pub mod search;

pub use catalog::{favorite_key, Deal, FavoriteRecord, Feedback, Product, FAVORITE_KEY_PREFIX};
pub use error::CommerceError;
pub use ids::ProductId;
pub use money::{Currency, Money};
pub use search::{distinct_brands, filter_products, CatalogFilter};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::ProductId;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{
        favorite_key, Deal, FavoriteRecord, Feedback, Product, FAVORITE_KEY_PREFIX,
    };

    // Search
    pub use crate::search::{distinct_brands, filter_products, CatalogFilter};
}
