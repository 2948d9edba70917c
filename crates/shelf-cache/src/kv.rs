//! Key-value store abstraction.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::CacheError;

/// An async string key-value store, the shape of a mobile device store.
///
/// Implementations synchronize internally; all methods take `&self`.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Get a value, `None` if the key doesn't exist.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Set a value, replacing any previous one.
    async fn set(&self, key: &str, value: &str) -> Result<(), CacheError>;

    /// Remove a key. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), CacheError>;

    /// Every key currently stored.
    async fn all_keys(&self) -> Result<Vec<String>, CacheError>;

    /// Get several values at once, paired with their keys in request order.
    async fn multi_get(
        &self,
        keys: &[String],
    ) -> Result<Vec<(String, Option<String>)>, CacheError> {
        let mut pairs = Vec::with_capacity(keys.len());
        for key in keys {
            pairs.push((key.clone(), self.get(key).await?));
        }
        Ok(pairs)
    }

    /// Remove several keys at once.
    async fn multi_remove(&self, keys: &[String]) -> Result<(), CacheError> {
        for key in keys {
            self.remove(key).await?;
        }
        Ok(())
    }
}

/// Process-local store.
///
/// Can be switched into a failing mode to exercise write-failure paths.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
    failing: AtomicBool,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every operation fail with a store error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of stored entries.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    /// Whether the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    fn check(&self) -> Result<(), CacheError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(CacheError::StoreError("store unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.check()?;
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        self.check()?;
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), CacheError> {
        self.check()?;
        self.entries.lock().await.remove(key);
        Ok(())
    }

    async fn all_keys(&self) -> Result<Vec<String>, CacheError> {
        self.check()?;
        Ok(self.entries.lock().await.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_remove() {
        let store = MemoryStore::new();
        store.set("a", "1").await.unwrap();
        assert_eq!(store.get("a").await.unwrap().as_deref(), Some("1"));

        store.remove("a").await.unwrap();
        assert_eq!(store.get("a").await.unwrap(), None);
        store.remove("a").await.unwrap();
    }

    #[tokio::test]
    async fn test_batch_operations() {
        let store = MemoryStore::new();
        store.set("x", "1").await.unwrap();
        store.set("y", "2").await.unwrap();

        let keys = vec!["y".to_string(), "missing".to_string(), "x".to_string()];
        let pairs = store.multi_get(&keys).await.unwrap();
        assert_eq!(
            pairs,
            vec![
                ("y".to_string(), Some("2".to_string())),
                ("missing".to_string(), None),
                ("x".to_string(), Some("1".to_string())),
            ]
        );

        store.multi_remove(&keys).await.unwrap();
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_failing_store() {
        let store = MemoryStore::new();
        store.set_failing(true);
        assert!(matches!(
            store.set("a", "1").await,
            Err(CacheError::StoreError(_))
        ));
        store.set_failing(false);
        assert!(store.all_keys().await.unwrap().is_empty());
    }
}
