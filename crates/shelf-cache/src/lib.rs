//! Device key-value store and favorites mirror for Shelf.
//!
//! The device store is a flat string-to-string map with async batch
//! operations. Values are JSON written by the callers. [`FavoriteCache`]
//! layers the `product_<id>` favorite snapshots on top of any [`KvStore`].
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use shelf_cache::{FavoriteCache, FileStore};
//!
//! let store = FileStore::open(".shelf/favorites.json").await?;
//! let favorites = FavoriteCache::new(Arc::new(store));
//!
//! favorites.put(&FavoriteRecord::from_product(&product)).await?;
//! let mirrored = favorites.load_all().await?;
//! ```

mod error;
mod favorites;
mod file;
mod kv;

pub use error::CacheError;
pub use favorites::FavoriteCache;
pub use file::FileStore;
pub use kv::{KvStore, MemoryStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{CacheError, FavoriteCache, FileStore, KvStore, MemoryStore};
}
