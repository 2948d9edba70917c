//! Favorite snapshots mirrored into the device store.

use std::sync::Arc;

use shelf_commerce::{favorite_key, FavoriteRecord, ProductId, FAVORITE_KEY_PREFIX};
use tracing::warn;

use crate::{CacheError, KvStore};

/// Typed view over the `product_<id>` entries of a device store.
///
/// Other keys in the same store are left alone.
#[derive(Clone)]
pub struct FavoriteCache {
    store: Arc<dyn KvStore>,
}

impl std::fmt::Debug for FavoriteCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavoriteCache").finish_non_exhaustive()
    }
}

impl FavoriteCache {
    /// Wrap a device store.
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// Write or replace a snapshot.
    pub async fn put(&self, record: &FavoriteRecord) -> Result<(), CacheError> {
        let value = record.to_json()?;
        self.store.set(&record.storage_key(), &value).await
    }

    /// Read one snapshot; unreadable entries count as missing.
    pub async fn get(&self, id: &ProductId) -> Result<Option<FavoriteRecord>, CacheError> {
        let key = favorite_key(id);
        Ok(self
            .store
            .get(&key)
            .await?
            .and_then(|value| parse_entry(&key, &value)))
    }

    /// Whether a snapshot exists for `id`.
    pub async fn contains(&self, id: &ProductId) -> Result<bool, CacheError> {
        Ok(self.store.get(&favorite_key(id)).await?.is_some())
    }

    /// Delete one snapshot.
    pub async fn remove(&self, id: &ProductId) -> Result<(), CacheError> {
        self.store.remove(&favorite_key(id)).await
    }

    /// Delete several snapshots in one batch.
    pub async fn remove_many(&self, ids: &[ProductId]) -> Result<(), CacheError> {
        if ids.is_empty() {
            return Ok(());
        }
        let keys: Vec<String> = ids.iter().map(favorite_key).collect();
        self.store.multi_remove(&keys).await
    }

    /// Every snapshot in the store.
    ///
    /// Entries that fail to parse are skipped with a warning.
    pub async fn load_all(&self) -> Result<Vec<FavoriteRecord>, CacheError> {
        let keys: Vec<String> = self
            .store
            .all_keys()
            .await?
            .into_iter()
            .filter(|key| key.starts_with(FAVORITE_KEY_PREFIX))
            .collect();
        if keys.is_empty() {
            return Ok(Vec::new());
        }

        let records = self
            .store
            .multi_get(&keys)
            .await?
            .into_iter()
            .filter_map(|(key, value)| value.and_then(|value| parse_entry(&key, &value)))
            .collect();
        Ok(records)
    }
}

fn parse_entry(key: &str, value: &str) -> Option<FavoriteRecord> {
    match FavoriteRecord::from_json(value) {
        Ok(record) => Some(record),
        Err(e) => {
            warn!(key, error = %e, "skipping unreadable favorite entry");
            None
        }
    }
}
