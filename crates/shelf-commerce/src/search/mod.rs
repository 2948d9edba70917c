//! Search module.
//!
//! Brand and text filtering over an already-fetched catalog.

mod filter;

pub use filter::{distinct_brands, filter_products, CatalogFilter};
