//! Favorites screen.

use serde::Serialize;
use shelf_cache::CacheError;
use shelf_commerce::{FavoriteRecord, Product, ProductId};
use shelf_data::FetchError;
use tracing::{debug, error, info, warn};

use crate::focus::{FocusGenerations, FocusTicket};
use crate::sync::{FavoriteSync, SyncReport};

/// Where the displayed favorites came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FavoritesSource {
    /// Nothing loaded yet.
    #[default]
    Empty,
    /// Snapshots from the device store.
    Local,
    /// Products flagged as favorites in the remote catalog.
    Remote,
}

/// Favorited products with remove and clear-all.
///
/// A focus shows the device store snapshots first, then replaces them with
/// the remote favorites once those arrive. When the remote fetch fails the
/// snapshots stay on screen.
#[derive(Debug)]
pub struct FavoritesScreen {
    sync: FavoriteSync,
    items: Vec<FavoriteRecord>,
    source: FavoritesSource,
    generations: FocusGenerations,
}

impl FavoritesScreen {
    pub fn new(sync: FavoriteSync) -> Self {
        Self {
            sync,
            items: Vec::new(),
            source: FavoritesSource::Empty,
            generations: FocusGenerations::new(),
        }
    }

    pub fn items(&self) -> &[FavoriteRecord] {
        &self.items
    }

    pub fn source(&self) -> FavoritesSource {
        self.source
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn begin_focus(&self) -> FocusTicket {
        self.generations.begin()
    }

    /// Read every favorite snapshot from the device store.
    pub async fn load_local(&self) -> Result<Vec<FavoriteRecord>, CacheError> {
        self.sync.cache().load_all().await
    }

    /// Fetch the catalog; favorites are picked out on apply.
    pub async fn fetch_remote(&self) -> Result<Vec<Product>, FetchError> {
        self.sync.catalog().list_products().await
    }

    /// Show device store snapshots. Returns whether the list changed.
    pub fn apply_local(
        &mut self,
        ticket: &FocusTicket,
        result: Result<Vec<FavoriteRecord>, CacheError>,
    ) -> bool {
        if !ticket.is_current() {
            debug!(generation = ticket.generation(), "discarding stale local favorites");
            return false;
        }
        match result {
            Ok(records) => {
                debug!(count = records.len(), "loaded local favorites");
                self.items = records;
                self.source = FavoritesSource::Local;
                true
            }
            Err(e) => {
                warn!(error = %e, "failed to read local favorites");
                false
            }
        }
    }

    /// Show the remote favorites. Returns whether the list changed.
    pub fn apply_remote(
        &mut self,
        ticket: &FocusTicket,
        result: Result<Vec<Product>, FetchError>,
    ) -> bool {
        if !ticket.is_current() {
            debug!(generation = ticket.generation(), "discarding stale remote favorites");
            return false;
        }
        match result {
            Ok(products) => {
                self.items = products
                    .iter()
                    .filter(|p| p.is_favorite())
                    .map(FavoriteRecord::from_product)
                    .collect();
                self.source = FavoritesSource::Remote;
                info!(count = self.items.len(), "favorites loaded");
                true
            }
            Err(e) => {
                error!(error = %e, "failed to fetch favorites, showing local snapshots");
                false
            }
        }
    }

    /// Local load, then remote fetch, under one ticket.
    pub async fn on_focus(&mut self) {
        let ticket = self.begin_focus();
        let local = self.load_local().await;
        self.apply_local(&ticket, local);
        let remote = self.fetch_remote().await;
        self.apply_remote(&ticket, remote);
    }

    /// Drop one favorite from the list, the device store and the catalog.
    pub async fn remove(&mut self, id: &ProductId) -> SyncReport {
        self.items.retain(|record| &record.id != id);
        self.sync.unfavorite(id).await
    }

    /// Drop every displayed favorite. The list is emptied whatever the
    /// remote outcomes are.
    pub async fn clear_all(&mut self) -> Vec<SyncReport> {
        let ids: Vec<ProductId> = self.items.drain(..).map(|record| record.id).collect();
        self.sync.clear_all(&ids).await
    }
}
