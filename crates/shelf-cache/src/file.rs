//! File-backed device store.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::{CacheError, KvStore};

/// A device store persisted as one JSON object in a file.
///
/// The whole map is loaded on open and rewritten (temp file + rename) after
/// every mutation.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open the store at `path`, starting empty if the file doesn't exist.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, CacheError> {
        let path = path.as_ref().to_path_buf();
        let entries = match tokio::fs::read_to_string(&path).await {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => serde_json::from_str(&content).map_err(|e| {
                CacheError::OpenError(format!("{}: {}", path.display(), e))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(CacheError::OpenError(format!("{}: {}", path.display(), e))),
        };
        debug!(path = %path.display(), entries = entries.len(), "opened file store");
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), CacheError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let content = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, content).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    /// Persist `next` and only then make it the live map; on error the
    /// live map is left as it was.
    async fn commit(
        &self,
        entries: &mut BTreeMap<String, String>,
        next: BTreeMap<String, String>,
    ) -> Result<(), CacheError> {
        self.persist(&next).await?;
        *entries = next;
        Ok(())
    }
}

#[async_trait]
impl KvStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        let mut entries = self.entries.lock().await;
        let mut next = entries.clone();
        next.insert(key.to_string(), value.to_string());
        self.commit(&mut entries, next).await
    }

    async fn remove(&self, key: &str) -> Result<(), CacheError> {
        let mut entries = self.entries.lock().await;
        if !entries.contains_key(key) {
            return Ok(());
        }
        let mut next = entries.clone();
        next.remove(key);
        self.commit(&mut entries, next).await
    }

    async fn all_keys(&self) -> Result<Vec<String>, CacheError> {
        Ok(self.entries.lock().await.keys().cloned().collect())
    }

    async fn multi_remove(&self, keys: &[String]) -> Result<(), CacheError> {
        let mut entries = self.entries.lock().await;
        let mut next = entries.clone();
        for key in keys {
            next.remove(key);
        }
        if next.len() == entries.len() {
            return Ok(());
        }
        self.commit(&mut entries, next).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let store = FileStore::open(&path).await.unwrap();
        store.set("product_1", r#"{"id":"1"}"#).await.unwrap();
        store.set("other", "x").await.unwrap();
        drop(store);

        let reopened = FileStore::open(&path).await.unwrap();
        assert_eq!(
            reopened.get("product_1").await.unwrap().as_deref(),
            Some(r#"{"id":"1"}"#)
        );
        assert_eq!(reopened.all_keys().await.unwrap(), vec!["other", "product_1"]);
    }

    #[tokio::test]
    async fn test_multi_remove_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let store = FileStore::open(&path).await.unwrap();
        store.set("a", "1").await.unwrap();
        store.set("b", "2").await.unwrap();
        store
            .multi_remove(&["a".to_string(), "b".to_string()])
            .await
            .unwrap();

        let reopened = FileStore::open(&path).await.unwrap();
        assert!(reopened.all_keys().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_write_leaves_entries_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("sub");
        let store = FileStore::open(sub.join("store.json")).await.unwrap();
        std::fs::write(&sub, "not a directory").unwrap();

        assert!(store.set("product_1", "{}").await.is_err());
        assert_eq!(store.get("product_1").await.unwrap(), None);
        assert!(store.all_keys().await.unwrap().is_empty());

        std::fs::remove_file(&sub).unwrap();
        store.set("product_1", "{}").await.unwrap();
        store.set("product_2", "{}").await.unwrap();
        std::fs::remove_dir_all(&sub).unwrap();
        std::fs::write(&sub, "not a directory").unwrap();

        assert!(store.remove("product_1").await.is_err());
        assert!(store
            .multi_remove(&["product_1".to_string(), "product_2".to_string()])
            .await
            .is_err());
        assert_eq!(
            store.all_keys().await.unwrap(),
            vec!["product_1", "product_2"]
        );
    }

    #[tokio::test]
    async fn test_corrupt_file_fails_to_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "{not json").unwrap();

        assert!(matches!(
            FileStore::open(&path).await,
            Err(CacheError::OpenError(_))
        ));
    }

    #[tokio::test]
    async fn test_empty_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "").unwrap();

        let store = FileStore::open(&path).await.unwrap();
        assert!(store.all_keys().await.unwrap().is_empty());
    }
}
