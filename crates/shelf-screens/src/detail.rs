//! Product detail screen.

use shelf_commerce::{Product, ProductId};
use shelf_data::FetchError;
use tracing::{debug, error, warn};

use crate::focus::{FocusGenerations, FocusTicket};
use crate::sync::{FavoriteSync, SyncReport};

/// What the detail screen is showing.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    /// Before the first focus completes.
    Loading,
    Loaded { product: Product, is_favorite: bool },
    /// The fetch failed or the product doesn't exist.
    NotFound,
}

/// One product, re-fetched on every focus.
#[derive(Debug)]
pub struct DetailScreen {
    id: ProductId,
    sync: FavoriteSync,
    state: DetailState,
    generations: FocusGenerations,
}

impl DetailScreen {
    pub fn new(id: ProductId, sync: FavoriteSync) -> Self {
        Self {
            id,
            sync,
            state: DetailState::Loading,
            generations: FocusGenerations::new(),
        }
    }

    pub fn id(&self) -> &ProductId {
        &self.id
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn product(&self) -> Option<&Product> {
        match &self.state {
            DetailState::Loaded { product, .. } => Some(product),
            _ => None,
        }
    }

    pub fn is_favorite(&self) -> bool {
        matches!(self.state, DetailState::Loaded { is_favorite: true, .. })
    }

    pub fn begin_focus(&self) -> FocusTicket {
        self.generations.begin()
    }

    pub async fn fetch(&self) -> Result<Product, FetchError> {
        self.sync.catalog().get_product(&self.id).await
    }

    /// Apply a fetch result. Returns whether the state changed.
    pub fn apply_product(
        &mut self,
        ticket: &FocusTicket,
        result: Result<Product, FetchError>,
    ) -> bool {
        if !ticket.is_current() {
            debug!(
                product_id = %self.id,
                generation = ticket.generation(),
                "discarding stale product response"
            );
            return false;
        }
        self.state = match result {
            Ok(product) => DetailState::Loaded {
                is_favorite: product.status,
                product,
            },
            Err(e) => {
                error!(product_id = %self.id, error = %e, "failed to fetch product");
                DetailState::NotFound
            }
        };
        true
    }

    pub async fn on_focus(&mut self) -> bool {
        let ticket = self.begin_focus();
        let result = self.fetch().await;
        self.apply_product(&ticket, result)
    }

    /// Flip the favorite flag; the shown flag follows the remote result.
    ///
    /// Returns `None` until a product is loaded.
    pub async fn toggle_favorite(&mut self) -> Option<SyncReport> {
        let DetailState::Loaded {
            product,
            is_favorite,
        } = &mut self.state
        else {
            warn!(product_id = %self.id, "no product loaded to toggle");
            return None;
        };

        let report = self.sync.set_favorite(product, !*is_favorite).await;
        if report.remote_applied() {
            *is_favorite = report.status;
            product.status = report.status;
        }
        Some(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use shelf_cache::{FavoriteCache, MemoryStore};
    use shelf_commerce::{Currency, Feedback};
    use shelf_data::MemoryCatalog;

    fn setup(id: &str) -> (Arc<MemoryCatalog>, FavoriteCache, DetailScreen) {
        let catalog = Arc::new(MemoryCatalog::new(vec![Product::new("42", "Abcart", 100.0)
            .with_limited_time_deal(0.2)
            .with_feedback(Feedback::new("Lan", "Great", 5.0))]));
        let cache = FavoriteCache::new(Arc::new(MemoryStore::new()));
        let sync = FavoriteSync::new(catalog.clone(), cache.clone());
        (catalog, cache, DetailScreen::new(ProductId::new(id), sync))
    }

    #[tokio::test]
    async fn test_loading_until_focused() {
        let (_catalog, _cache, mut screen) = setup("42");
        assert_eq!(screen.state(), &DetailState::Loading);

        assert!(screen.on_focus().await);
        let product = screen.product().unwrap();
        assert_eq!(product.discount_percent(), 20);
        assert_eq!(product.discounted_price(Currency::USD).display_amount(), "80.00");
        assert!(!screen.is_favorite());
    }

    #[tokio::test]
    async fn test_unknown_product_is_not_found() {
        let (_catalog, _cache, mut screen) = setup("404");
        screen.on_focus().await;
        assert_eq!(screen.state(), &DetailState::NotFound);
        assert!(screen.toggle_favorite().await.is_none());
    }

    #[tokio::test]
    async fn test_toggle_twice_restores_remote_and_cache() {
        let (catalog, cache, mut screen) = setup("42");
        screen.on_focus().await;
        let id = ProductId::new("42");

        let report = screen.toggle_favorite().await.unwrap();
        assert!(report.is_synced());
        assert!(screen.is_favorite());
        assert!(cache.contains(&id).await.unwrap());
        assert_eq!(catalog.status_of(&id), Some(true));

        screen.toggle_favorite().await.unwrap();
        assert!(!screen.is_favorite());
        assert!(!cache.contains(&id).await.unwrap());
        assert_eq!(catalog.status_of(&id), Some(false));
    }

    #[tokio::test]
    async fn test_failed_remote_keeps_flag() {
        let (catalog, cache, mut screen) = setup("42");
        screen.on_focus().await;
        catalog.fail_updates_for("42");

        let report = screen.toggle_favorite().await.unwrap();
        assert!(!report.remote_applied());
        assert!(!screen.is_favorite());
        assert!(!cache.contains(&ProductId::new("42")).await.unwrap());
    }

    #[tokio::test]
    async fn test_refocus_refetches() {
        let (catalog, _cache, mut screen) = setup("42");
        screen.on_focus().await;
        catalog.replace(vec![Product::new("42", "Renamed", 100.0).with_status(true)]);

        screen.on_focus().await;
        assert_eq!(screen.product().unwrap().name, "Renamed");
        assert!(screen.is_favorite());
    }

    #[tokio::test]
    async fn test_stale_product_is_discarded() {
        let (_catalog, _cache, mut screen) = setup("42");
        let stale = screen.begin_focus();
        let fresh = screen.begin_focus();
        let result = screen.fetch().await;

        assert!(!screen.apply_product(&stale, result.clone()));
        assert_eq!(screen.state(), &DetailState::Loading);
        assert!(screen.apply_product(&fresh, result));
    }
}
