//! Cart snapshot encoding.
//!
//! A snapshot is the whole cart as a JSON array of line items:
//!
//! ```json
//! [{"id":"1","title":"Shirt","image_url":"https://...","price":20.0,"quantity":2}]
//! ```

use std::collections::HashSet;

use gomarketplace_core::{CartItem, ProductId};
use thiserror::Error;

/// Storage key the mobile client has always used for the cart.
pub const DEFAULT_CART_KEY: &str = "@GoMarketplace:cart";

/// Errors encoding or decoding a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The stored value is not a valid list of cart items.
    #[error("Malformed cart snapshot: {0}")]
    Decode(#[source] serde_json::Error),

    /// The cart could not be serialized.
    #[error("Failed to encode cart snapshot: {0}")]
    Encode(#[source] serde_json::Error),

    /// The stored list contains the same product twice.
    #[error("Cart snapshot contains duplicate product id: {0}")]
    DuplicateId(ProductId),
}

/// Serialize cart items into a snapshot string.
///
/// # Errors
///
/// Returns [`SnapshotError::Encode`] if serialization fails.
pub fn encode(items: &[CartItem]) -> Result<String, SnapshotError> {
    serde_json::to_string(items).map_err(SnapshotError::Encode)
}

/// Parse a snapshot string into cart items.
///
/// # Errors
///
/// Returns [`SnapshotError::Decode`] if the value is not a JSON array of
/// valid items (including zero quantities, negative prices, or empty ids),
/// and [`SnapshotError::DuplicateId`] if two items share an id.
pub fn decode(raw: &str) -> Result<Vec<CartItem>, SnapshotError> {
    let items: Vec<CartItem> = serde_json::from_str(raw).map_err(SnapshotError::Decode)?;

    let mut seen = HashSet::with_capacity(items.len());
    for item in &items {
        if !seen.insert(&item.id) {
            return Err(SnapshotError::DuplicateId(item.id.clone()));
        }
    }

    Ok(items)
}
