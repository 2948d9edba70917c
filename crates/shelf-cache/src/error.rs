//! Cache error types.

use thiserror::Error;

/// Errors that can occur when using the device store.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Failed to open the store.
    #[error("Failed to open store: {0}")]
    OpenError(String),

    /// Failed to serialize or parse a value.
    #[error("Serialization error: {0}")]
    SerializeError(#[from] serde_json::Error),

    /// Failed to encode a favorite snapshot.
    #[error("Record error: {0}")]
    Record(#[from] shelf_commerce::CommerceError),

    /// Failed to perform store operation.
    #[error("Store operation failed: {0}")]
    StoreError(String),

    /// Failed to read or write the backing file.
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),
}
