//! In-process catalog.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use shelf_commerce::{Product, ProductId};

use crate::{CatalogApi, FetchError};

/// A `CatalogApi` held in memory.
///
/// Behaves like the REST resource (404 for unknown ids, status updates are
/// persisted) and can be told to fail, either entirely or for status updates
/// of selected products.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    products: Mutex<Vec<Product>>,
    offline: AtomicBool,
    failing_updates: Mutex<HashSet<ProductId>>,
    update_calls: AtomicUsize,
}

impl MemoryCatalog {
    /// Create a catalog holding `products` in order.
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: Mutex::new(products),
            ..Self::default()
        }
    }

    /// Make every call fail with a request error.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Make status updates of `id` fail with a server error.
    pub fn fail_updates_for(&self, id: impl Into<ProductId>) {
        lock(&self.failing_updates).insert(id.into());
    }

    /// Replace the catalog contents.
    pub fn replace(&self, products: Vec<Product>) {
        *lock(&self.products) = products;
    }

    /// Snapshot of the current contents.
    pub fn products(&self) -> Vec<Product> {
        lock(&self.products).clone()
    }

    /// Current favorite flag of a product, `None` if unknown.
    pub fn status_of(&self, id: &ProductId) -> Option<bool> {
        lock(&self.products)
            .iter()
            .find(|p| &p.id == id)
            .map(|p| p.status)
    }

    /// Number of status updates attempted so far.
    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    fn check_online(&self) -> Result<(), FetchError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(FetchError::RequestError("catalog is offline".to_string()));
        }
        Ok(())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn not_found(id: &ProductId) -> FetchError {
    FetchError::HttpError {
        status: 404,
        message: format!("product {} not found", id),
    }
}

#[async_trait]
impl CatalogApi for MemoryCatalog {
    async fn list_products(&self) -> Result<Vec<Product>, FetchError> {
        self.check_online()?;
        Ok(self.products())
    }

    async fn get_product(&self, id: &ProductId) -> Result<Product, FetchError> {
        self.check_online()?;
        lock(&self.products)
            .iter()
            .find(|p| &p.id == id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn update_status(&self, id: &ProductId, status: bool) -> Result<(), FetchError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        self.check_online()?;
        if lock(&self.failing_updates).contains(id) {
            return Err(FetchError::HttpError {
                status: 500,
                message: format!("update of {} rejected", id),
            });
        }
        let mut products = lock(&self.products);
        let product = products
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| not_found(id))?;
        product.status = status;
        Ok(())
    }
}
