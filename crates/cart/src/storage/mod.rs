//! Key-value persistence for cart snapshots.
//!
//! The store treats storage as an opaque async key-value service: it reads a
//! single string value at startup and overwrites it after every mutation.
//!
//! # Implementations
//!
//! - [`MemoryStorage`] - Process-local map, for tests and ephemeral sessions
//! - [`FileStorage`] - One JSON file per key on local disk

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use thiserror::Error;

/// Errors from a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Backend-specific failure.
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Async key-value storage for serialized snapshots.
#[async_trait::async_trait]
pub trait CartStorage: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// Returns `Ok(None)` when nothing has been stored yet.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: String) -> Result<(), StorageError>;
}

#[async_trait::async_trait]
impl<T: CartStorage + ?Sized> CartStorage for std::sync::Arc<T> {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        (**self).set(key, value).await
    }
}
