//! Favorite write-through to the catalog and the device store.

use std::sync::Arc;

use futures::future::join_all;
use serde::Serialize;
use shelf_cache::FavoriteCache;
use shelf_commerce::{FavoriteRecord, Product, ProductId};
use shelf_data::CatalogApi;
use tracing::{info, warn};

/// Result of one side of a favorite write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "error", rename_all = "lowercase")]
pub enum WriteOutcome {
    Applied,
    /// Not attempted because an earlier step failed.
    Skipped,
    Failed(String),
}

impl WriteOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }

    fn from_result<E: std::fmt::Display>(result: Result<(), E>) -> Self {
        match result {
            Ok(()) => Self::Applied,
            Err(e) => Self::Failed(e.to_string()),
        }
    }
}

/// Outcome of setting a product's favorite flag on both sides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub product_id: ProductId,
    /// Requested favorite flag.
    pub status: bool,
    pub remote: WriteOutcome,
    pub local: WriteOutcome,
}

impl SyncReport {
    /// Both sides were written.
    pub fn is_synced(&self) -> bool {
        self.remote.is_applied() && self.local.is_applied()
    }

    /// Exactly one side was written.
    pub fn is_partial(&self) -> bool {
        self.remote.is_applied() != self.local.is_applied()
    }

    pub fn remote_applied(&self) -> bool {
        self.remote.is_applied()
    }
}

/// Writes favorite changes to the remote catalog and the device store.
///
/// The catalog is authoritative; the device store mirrors it. No atomicity
/// is provided across the pair, every call returns what happened on each
/// side instead.
#[derive(Clone)]
pub struct FavoriteSync {
    catalog: Arc<dyn CatalogApi>,
    cache: FavoriteCache,
}

impl std::fmt::Debug for FavoriteSync {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavoriteSync")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

impl FavoriteSync {
    pub fn new(catalog: Arc<dyn CatalogApi>, cache: FavoriteCache) -> Self {
        Self { catalog, cache }
    }

    pub fn catalog(&self) -> &Arc<dyn CatalogApi> {
        &self.catalog
    }

    pub fn cache(&self) -> &FavoriteCache {
        &self.cache
    }

    /// Set the favorite flag of `product`: remote first, then the device
    /// store entry is written (on) or deleted (off).
    ///
    /// The device store is left alone when the remote write fails.
    pub async fn set_favorite(&self, product: &Product, status: bool) -> SyncReport {
        let id = &product.id;
        let remote = WriteOutcome::from_result(self.catalog.update_status(id, status).await);
        if let WriteOutcome::Failed(error) = &remote {
            warn!(product_id = %id, status, %error, "remote favorite update failed");
            return SyncReport {
                product_id: id.clone(),
                status,
                remote,
                local: WriteOutcome::Skipped,
            };
        }

        let local = if status {
            self.cache.put(&FavoriteRecord::from_product(product)).await
        } else {
            self.cache.remove(id).await
        };
        let report = SyncReport {
            product_id: id.clone(),
            status,
            remote,
            local: WriteOutcome::from_result(local),
        };
        match &report.local {
            WriteOutcome::Failed(error) => {
                warn!(product_id = %id, status, %error, "favorite updated on the catalog only");
            }
            _ => info!(product_id = %id, status, "favorite updated"),
        }
        report
    }

    /// Drop a favorite: device store entry first, then the remote flag.
    pub async fn unfavorite(&self, id: &ProductId) -> SyncReport {
        let local = WriteOutcome::from_result(self.cache.remove(id).await);
        if let WriteOutcome::Failed(error) = &local {
            warn!(product_id = %id, %error, "failed to delete favorite entry");
        }
        let remote = self.push_unfavorite(id).await;
        SyncReport {
            product_id: id.clone(),
            status: false,
            remote,
            local,
        }
    }

    /// Drop several favorites: one batch delete in the device store, then
    /// every remote flag concurrently. Nothing is rolled back.
    pub async fn clear_all(&self, ids: &[ProductId]) -> Vec<SyncReport> {
        if ids.is_empty() {
            return Vec::new();
        }

        let local = WriteOutcome::from_result(self.cache.remove_many(ids).await);
        if let WriteOutcome::Failed(error) = &local {
            warn!(count = ids.len(), %error, "failed to clear favorite entries");
        }

        let remotes = join_all(ids.iter().map(|id| self.push_unfavorite(id))).await;
        let reports: Vec<SyncReport> = ids
            .iter()
            .zip(remotes)
            .map(|(id, remote)| SyncReport {
                product_id: id.clone(),
                status: false,
                remote,
                local: local.clone(),
            })
            .collect();

        let failed = reports.iter().filter(|r| !r.remote_applied()).count();
        info!(count = reports.len(), failed, "cleared favorites");
        reports
    }

    async fn push_unfavorite(&self, id: &ProductId) -> WriteOutcome {
        let remote = WriteOutcome::from_result(self.catalog.update_status(id, false).await);
        if let WriteOutcome::Failed(error) = &remote {
            warn!(product_id = %id, %error, "remote unfavorite failed");
        }
        remote
    }
}
