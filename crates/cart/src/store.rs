//! The cart store.
//!
//! [`CartStore`] owns the authoritative [`CartState`]. Every mutation follows
//! the same protocol: compute the new cart, publish it to subscribers, then
//! overwrite the stored snapshot with the full cart.
//!
//! Mutations are serialized by a single-writer lock held from reading the
//! current state until the snapshot write finishes, so two overlapping calls
//! never both start from the same state.

use std::fmt;
use std::sync::Arc;

use gomarketplace_core::{NewCartItem, ProductId};
use tokio::sync::{Mutex, watch};
use tracing::instrument;

use crate::config::CartConfig;
use crate::error::Result;
use crate::state::{CartChange, CartState};
use crate::storage::{CartStorage, FileStorage};

/// Shared handle to a persisted cart.
///
/// Cheaply cloneable via `Arc`; every clone operates on the same cart.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<CartStoreInner>,
}

struct CartStoreInner {
    storage: Arc<dyn CartStorage>,
    key: String,
    state: watch::Sender<CartState>,
    writer: Mutex<()>,
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("key", &self.inner.key)
            .field("state", &*self.inner.state.borrow())
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Load the cart stored under `key` and return a store over it.
    ///
    /// A missing snapshot yields an empty cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Storage`](crate::CartError::Storage) if the read
    /// fails and [`CartError::Snapshot`](crate::CartError::Snapshot) if the
    /// stored value is malformed.
    #[instrument(skip_all)]
    pub async fn hydrate(
        storage: impl CartStorage + 'static,
        key: impl Into<String>,
    ) -> Result<Self> {
        let key = key.into();

        let state = match storage.get(&key).await? {
            Some(raw) => CartState::from_snapshot(&raw)?,
            None => {
                tracing::debug!("No stored cart, starting empty");
                CartState::new()
            }
        };

        tracing::debug!(key = %key, lines = state.len(), "Cart hydrated");
        Ok(Self::with_state(Arc::new(storage), key, state))
    }

    /// Open the file-backed cart described by `config`.
    ///
    /// # Errors
    ///
    /// See [`CartStore::hydrate`].
    pub async fn open(config: &CartConfig) -> Result<Self> {
        let storage = FileStorage::new(&config.data_dir);
        Self::hydrate(storage, config.cart_key.clone()).await
    }

    /// Create a store with an empty cart without reading storage.
    ///
    /// The first mutation overwrites whatever is stored under `key`.
    #[must_use]
    pub fn empty(storage: impl CartStorage + 'static, key: impl Into<String>) -> Self {
        Self::with_state(Arc::new(storage), key.into(), CartState::new())
    }

    fn with_state(storage: Arc<dyn CartStorage>, key: String, state: CartState) -> Self {
        let (state, _) = watch::channel(state);
        Self {
            inner: Arc::new(CartStoreInner {
                storage,
                key,
                state,
                writer: Mutex::new(()),
            }),
        }
    }

    /// Storage key the cart is persisted under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.inner.key
    }

    /// A copy of the current cart.
    #[must_use]
    pub fn products(&self) -> CartState {
        self.inner.state.borrow().clone()
    }

    /// Subscribe to cart changes.
    ///
    /// The receiver sees each new cart before its snapshot is written.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CartState> {
        self.inner.state.subscribe()
    }

    /// Add a product, or bump its quantity if it is already in the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot write fails. The new cart has
    /// already been published when this happens.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub async fn add_to_cart(&self, product: NewCartItem) -> Result<CartChange> {
        self.mutate(|state| state.add(product)).await
    }

    /// Raise a product's quantity by one. Unknown ids are a no-op and do not
    /// touch storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot write fails.
    #[instrument(skip(self, id), fields(product_id = %id))]
    pub async fn increment(&self, id: &ProductId) -> Result<CartChange> {
        self.mutate(|state| state.increment(id)).await
    }

    /// Lower a product's quantity by one, removing it at zero. Unknown ids
    /// are a no-op and do not touch storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot write fails.
    #[instrument(skip(self, id), fields(product_id = %id))]
    pub async fn decrement(&self, id: &ProductId) -> Result<CartChange> {
        self.mutate(|state| state.decrement(id)).await
    }

    #[allow(clippy::significant_drop_tightening)]
    async fn mutate(&self, apply: impl FnOnce(&mut CartState) -> CartChange) -> Result<CartChange> {
        let _writer = self.inner.writer.lock().await;

        let mut next = self.inner.state.borrow().clone();
        let change = apply(&mut next);
        if !change.is_change() {
            tracing::debug!("Product not in cart, nothing to do");
            return Ok(change);
        }

        let snapshot = next.to_snapshot()?;
        self.inner.state.send_replace(next);
        tracing::debug!(?change, "Cart updated");

        if let Err(e) = self.inner.storage.set(&self.inner.key, snapshot).await {
            tracing::warn!(error = %e, key = %self.inner.key, "Failed to persist cart");
            return Err(e.into());
        }

        Ok(change)
    }
}

#[cfg(test)]
mod tests {
    use gomarketplace_core::{Price, Quantity};

    use super::*;
    use crate::CartError;
    use crate::snapshot::DEFAULT_CART_KEY;
    use crate::storage::{MemoryStorage, StorageError};

    /// Storage whose writes always fail.
    struct BrokenStorage;

    #[async_trait::async_trait]
    impl CartStorage for BrokenStorage {
        async fn get(&self, _key: &str) -> std::result::Result<Option<String>, StorageError> {
            Ok(None)
        }

        async fn set(&self, _key: &str, _value: String) -> std::result::Result<(), StorageError> {
            Err(StorageError::Backend("read-only".to_string()))
        }
    }

    fn shirt() -> NewCartItem {
        NewCartItem {
            id: ProductId::parse("1").unwrap(),
            title: "Shirt".to_string(),
            image_url: "u".to_string(),
            price: Price::from_cents(2000),
        }
    }

    fn pid(id: &str) -> ProductId {
        ProductId::parse(id).unwrap()
    }

    async fn stored(storage: &MemoryStorage) -> CartState {
        let raw = storage.get(DEFAULT_CART_KEY).await.unwrap().unwrap();
        CartState::from_snapshot(&raw).unwrap()
    }

    #[tokio::test]
    async fn test_hydrate_missing_snapshot_is_empty() {
        let store = CartStore::hydrate(MemoryStorage::new(), DEFAULT_CART_KEY)
            .await
            .unwrap();
        assert!(store.products().is_empty());
        assert_eq!(store.key(), DEFAULT_CART_KEY);
    }

    #[tokio::test]
    async fn test_hydrate_existing_snapshot() {
        let raw = r#"[{"id":"1","title":"Shirt","image_url":"u","price":20,"quantity":3}]"#;
        let storage = MemoryStorage::with_entry(DEFAULT_CART_KEY, raw);
        let store = CartStore::hydrate(storage, DEFAULT_CART_KEY).await.unwrap();

        let item = store.products().get(&pid("1")).cloned().unwrap();
        assert_eq!(item.quantity.get(), 3);
        assert_eq!(item.price, Price::from_cents(2000));
    }

    #[tokio::test]
    async fn test_hydrate_malformed_snapshot_fails() {
        let storage = MemoryStorage::with_entry(DEFAULT_CART_KEY, "{oops");
        let result = CartStore::hydrate(storage, DEFAULT_CART_KEY).await;
        assert!(matches!(result, Err(CartError::Snapshot(_))));
    }

    #[tokio::test]
    async fn test_add_persists_full_cart() {
        let storage = Arc::new(MemoryStorage::new());
        let store = CartStore::empty(Arc::clone(&storage), DEFAULT_CART_KEY);

        assert_eq!(store.add_to_cart(shirt()).await.unwrap(), CartChange::Added);

        assert_eq!(storage.write_count(), 1);
        assert_eq!(stored(&storage).await, store.products());
    }

    #[tokio::test]
    async fn test_unknown_id_does_not_write() {
        let storage = Arc::new(MemoryStorage::new());
        let store = CartStore::empty(Arc::clone(&storage), DEFAULT_CART_KEY);

        assert_eq!(store.increment(&pid("9")).await.unwrap(), CartChange::Unchanged);
        assert_eq!(store.decrement(&pid("9")).await.unwrap(), CartChange::Unchanged);
        assert_eq!(storage.write_count(), 0);
    }

    #[tokio::test]
    async fn test_add_then_decrement_to_empty() {
        let storage = Arc::new(MemoryStorage::new());
        let store = CartStore::empty(Arc::clone(&storage), DEFAULT_CART_KEY);

        store.add_to_cart(shirt()).await.unwrap();
        let change = store.add_to_cart(shirt()).await.unwrap();
        assert_eq!(
            change,
            CartChange::Incremented {
                quantity: Quantity::new(2).unwrap()
            }
        );
        assert_eq!(store.products().len(), 1);

        store.decrement(&pid("1")).await.unwrap();
        assert_eq!(store.products().item_count(), 1);

        assert_eq!(store.decrement(&pid("1")).await.unwrap(), CartChange::Removed);
        assert!(store.products().is_empty());
        assert!(stored(&storage).await.is_empty());
        assert_eq!(storage.write_count(), 4);
    }

    #[tokio::test]
    async fn test_subscribers_see_updates() {
        let store = CartStore::empty(MemoryStorage::new(), DEFAULT_CART_KEY);
        let mut rx = store.subscribe();

        store.add_to_cart(shirt()).await.unwrap();

        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().len(), 1);
    }

    #[tokio::test]
    async fn test_write_failure_surfaces_and_keeps_published_state() {
        let store = CartStore::empty(BrokenStorage, DEFAULT_CART_KEY);
        let rx = store.subscribe();

        let result = store.add_to_cart(shirt()).await;

        assert!(matches!(result, Err(CartError::Storage(_))));
        assert_eq!(store.products().len(), 1);
        assert_eq!(rx.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_increments_are_not_lost() {
        let storage = Arc::new(MemoryStorage::new());
        let store = CartStore::empty(Arc::clone(&storage), DEFAULT_CART_KEY);
        store.add_to_cart(shirt()).await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..50 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.increment(&pid("1")).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.products().item_count(), 51);
        assert_eq!(stored(&storage).await.item_count(), 51);
    }
}
