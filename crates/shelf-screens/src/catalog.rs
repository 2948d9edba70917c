//! Catalog listing screen.

use shelf_commerce::{distinct_brands, CatalogFilter, Product, ProductId};
use shelf_data::FetchError;
use tracing::{debug, error, info, warn};

use crate::focus::{FocusGenerations, FocusTicket};
use crate::sync::{FavoriteSync, SyncReport};

/// Immutable snapshot of the catalog listing.
///
/// Built from the fetched items and the current filter; brands and the
/// filtered list are derived on construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogView {
    items: Vec<Product>,
    brands: Vec<String>,
    filter: CatalogFilter,
    filtered: Vec<Product>,
}

impl CatalogView {
    pub fn new(items: Vec<Product>, filter: CatalogFilter) -> Self {
        let brands = distinct_brands(&items);
        let filtered = filter.apply(&items);
        Self {
            items,
            brands,
            filter,
            filtered,
        }
    }

    /// Same filter over new items.
    pub fn with_items(&self, items: Vec<Product>) -> Self {
        Self::new(items, self.filter.clone())
    }

    /// Same items under a new filter.
    pub fn with_filter(&self, filter: CatalogFilter) -> Self {
        Self::new(self.items.clone(), filter)
    }

    /// Every fetched product, in catalog order.
    pub fn items(&self) -> &[Product] {
        &self.items
    }

    /// Distinct brands in order of first occurrence.
    pub fn brands(&self) -> &[String] {
        &self.brands
    }

    pub fn filter(&self) -> &CatalogFilter {
        &self.filter
    }

    /// Products matching the filter, in catalog order.
    pub fn filtered(&self) -> &[Product] {
        &self.filtered
    }

    pub fn selected_brand(&self) -> Option<&str> {
        self.filter.brand.as_deref()
    }

    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.items.iter().find(|p| &p.id == id)
    }
}

/// The catalog listing: fetches every product on focus and filters locally.
#[derive(Debug)]
pub struct CatalogScreen {
    sync: FavoriteSync,
    view: CatalogView,
    generations: FocusGenerations,
}

impl CatalogScreen {
    pub fn new(sync: FavoriteSync) -> Self {
        Self {
            sync,
            view: CatalogView::default(),
            generations: FocusGenerations::new(),
        }
    }

    pub fn view(&self) -> &CatalogView {
        &self.view
    }

    /// Start a focus-triggered load.
    pub fn begin_focus(&self) -> FocusTicket {
        self.generations.begin()
    }

    /// Fetch the catalog.
    pub async fn fetch(&self) -> Result<Vec<Product>, FetchError> {
        self.sync.catalog().list_products().await
    }

    /// Apply a fetch result. Returns whether the view changed.
    ///
    /// Failures and stale tickets leave the previous view in place.
    pub fn apply_products(
        &mut self,
        ticket: &FocusTicket,
        result: Result<Vec<Product>, FetchError>,
    ) -> bool {
        if !ticket.is_current() {
            debug!(generation = ticket.generation(), "discarding stale catalog response");
            return false;
        }
        match result {
            Ok(items) => {
                info!(count = items.len(), "catalog loaded");
                self.view = self.view.with_items(items);
                true
            }
            Err(e) => {
                error!(error = %e, "failed to fetch catalog");
                false
            }
        }
    }

    /// Fetch and apply in one step.
    pub async fn on_focus(&mut self) -> bool {
        let ticket = self.begin_focus();
        let result = self.fetch().await;
        self.apply_products(&ticket, result)
    }

    /// Select a brand, or clear the selection when it is already selected.
    pub fn select_brand(&mut self, brand: &str) {
        let filter = self.view.filter().clone().toggle_brand(brand);
        self.view = self.view.with_filter(filter);
    }

    pub fn clear_brand(&mut self) {
        let filter = CatalogFilter {
            brand: None,
            ..self.view.filter().clone()
        };
        self.view = self.view.with_filter(filter);
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        let filter = self.view.filter().clone().with_search(text);
        self.view = self.view.with_filter(filter);
    }

    pub fn clear_search(&mut self) {
        self.set_search(String::new());
    }

    /// Flip the favorite flag of a listed product.
    ///
    /// The listed item follows the remote result. Returns `None` when the
    /// product isn't in the listing.
    pub async fn toggle_favorite(&mut self, id: &ProductId) -> Option<SyncReport> {
        let Some(product) = self.view.find(id).cloned() else {
            warn!(product_id = %id, "cannot toggle a product that is not listed");
            return None;
        };

        let report = self.sync.set_favorite(&product, !product.status).await;
        if report.remote_applied() {
            let items = self
                .view
                .items()
                .iter()
                .cloned()
                .map(|p| if &p.id == id { p.with_status(report.status) } else { p })
                .collect();
            self.view = self.view.with_items(items);
        }
        Some(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use shelf_cache::{FavoriteCache, MemoryStore};
    use shelf_data::MemoryCatalog;

    fn products() -> Vec<Product> {
        vec![
            Product::new("1", "Abcart Pencils", 5.0).with_brand("Abcart"),
            Product::new("2", "xyz Canvas", 20.0).with_brand("Xyz"),
            Product::new("3", "Abcart Brushes", 8.0).with_brand("Abcart"),
        ]
    }

    fn setup() -> (Arc<MemoryCatalog>, CatalogScreen) {
        let catalog = Arc::new(MemoryCatalog::new(products()));
        let cache = FavoriteCache::new(Arc::new(MemoryStore::new()));
        let screen = CatalogScreen::new(FavoriteSync::new(catalog.clone(), cache));
        (catalog, screen)
    }

    fn names(items: &[Product]) -> Vec<&str> {
        items.iter().map(|p| p.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_focus_loads_items_and_brands() {
        let (_catalog, mut screen) = setup();
        assert!(screen.on_focus().await);
        assert_eq!(screen.view().items().len(), 3);
        assert_eq!(screen.view().brands().to_vec(), vec!["Abcart", "Xyz"]);
        assert_eq!(screen.view().filtered().len(), 3);
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_previous_items() {
        let (catalog, mut screen) = setup();
        screen.on_focus().await;
        catalog.set_offline(true);

        assert!(!screen.on_focus().await);
        assert_eq!(screen.view().items().len(), 3);
    }

    #[tokio::test]
    async fn test_stale_response_is_discarded() {
        let (catalog, mut screen) = setup();
        let first = screen.begin_focus();
        let first_result = screen.fetch().await;

        catalog.replace(vec![Product::new("9", "Newer", 1.0)]);
        let second = screen.begin_focus();
        let second_result = screen.fetch().await;

        assert!(screen.apply_products(&second, second_result));
        assert!(!screen.apply_products(&first, first_result));
        assert_eq!(names(screen.view().items()), vec!["Newer"]);
    }

    #[tokio::test]
    async fn test_brand_toggle_and_search() {
        let (_catalog, mut screen) = setup();
        screen.on_focus().await;
        screen.set_search("  BRUSH ");
        let searched = screen.view().filtered().to_vec();
        assert_eq!(names(&searched), vec!["Abcart Brushes"]);

        screen.select_brand("Xyz");
        assert!(screen.view().filtered().is_empty());

        screen.select_brand("Xyz");
        assert_eq!(screen.view().selected_brand(), None);
        assert_eq!(screen.view().filtered(), searched.as_slice());

        screen.select_brand("Abcart");
        screen.clear_search();
        assert_eq!(screen.view().filtered().len(), 2);
        screen.clear_brand();
        assert_eq!(screen.view().filtered().len(), 3);
    }

    #[tokio::test]
    async fn test_toggle_favorite_patches_listing() {
        let (catalog, mut screen) = setup();
        screen.on_focus().await;
        let id = ProductId::new("2");

        let report = screen.toggle_favorite(&id).await.unwrap();
        assert!(report.is_synced());
        assert!(screen.view().find(&id).unwrap().status);
        assert_eq!(catalog.status_of(&id), Some(true));

        catalog.fail_updates_for("2");
        let report = screen.toggle_favorite(&id).await.unwrap();
        assert!(!report.remote_applied());
        assert!(screen.view().find(&id).unwrap().status);
    }

    #[tokio::test]
    async fn test_toggle_unknown_product() {
        let (_catalog, mut screen) = setup();
        assert!(screen.toggle_favorite(&ProductId::new("1")).await.is_none());
    }
}
