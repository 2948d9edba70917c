//! Storefront screen view-models for Shelf.
//!
//! Each screen owns its state and talks to the remote catalog through
//! [`CatalogApi`](shelf_data::CatalogApi) and to the device store through
//! [`FavoriteCache`](shelf_cache::FavoriteCache):
//!
//! - [`CatalogScreen`] - product listing with brand and text filters
//! - [`DetailScreen`] - one product, with favorite toggling
//! - [`FavoritesScreen`] - favorited products, with remove and clear-all
//!
//! Favorite writes go through [`FavoriteSync`], which touches both sides
//! and reports each outcome in a [`SyncReport`]. Focus-triggered loads are
//! guarded by [`FocusGenerations`] so a late response never overwrites a
//! newer one.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use shelf_screens::prelude::*;
//!
//! let sync = FavoriteSync::new(catalog, favorites);
//! let mut screen = CatalogScreen::new(sync);
//! screen.on_focus().await;
//! screen.select_brand("Abcart");
//! for product in screen.view().filtered() {
//!     println!("{} {}", product.name, product.discount_percent());
//! }
//! ```

mod catalog;
mod detail;
mod favorites;
mod focus;
mod route;
mod sync;

pub use catalog::{CatalogScreen, CatalogView};
pub use detail::{DetailScreen, DetailState};
pub use favorites::{FavoritesScreen, FavoritesSource};
pub use focus::{FocusGenerations, FocusTicket};
pub use route::{Route, RouteError};
pub use sync::{FavoriteSync, SyncReport, WriteOutcome};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        CatalogScreen, CatalogView, DetailScreen, DetailState, FavoriteSync, FavoritesScreen,
        FocusTicket, Route, SyncReport, WriteOutcome,
    };
}
