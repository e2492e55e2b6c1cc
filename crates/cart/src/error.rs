//! Cart store error type.

use thiserror::Error;

use crate::snapshot::SnapshotError;
use crate::storage::StorageError;

/// Errors returned by [`CartStore`](crate::CartStore) operations.
///
/// A mutation that fails with [`CartError::Storage`] has already published
/// its new state to subscribers; only the persisted snapshot is stale.
#[derive(Debug, Error)]
pub enum CartError {
    /// Reading or writing the storage backend failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The snapshot could not be encoded or decoded.
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),
}

/// Result type alias for `CartError`.
pub type Result<T> = std::result::Result<T, CartError>;
