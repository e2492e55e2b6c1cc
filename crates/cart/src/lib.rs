//! GoMarketplace Cart - Persisted shopping-cart store.
//!
//! The cart is a small list of line items owned by a [`CartStore`]. Product
//! listings add items, the cart screen increments and decrements them, and
//! after every change the whole cart is written to a key-value storage
//! backend so it survives restarts.
//!
//! # Usage
//!
//! ```rust,no_run
//! use gomarketplace_cart::{CartConfig, CartStore};
//! use gomarketplace_core::{NewCartItem, Price, ProductId};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = CartConfig::from_env()?;
//! let store = CartStore::open(&config).await?;
//!
//! store
//!     .add_to_cart(NewCartItem {
//!         id: ProductId::parse("1")?,
//!         title: "Shirt".to_string(),
//!         image_url: "https://cdn.example/shirt.png".to_string(),
//!         price: Price::from_cents(2000),
//!     })
//!     .await?;
//!
//! println!("{} items, {}", store.products().item_count(), store.products().subtotal());
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`store`] - The shared cart handle and its mutations
//! - [`state`] - Cart contents and pure transitions
//! - [`storage`] - Storage trait with memory and file backends
//! - [`snapshot`] - JSON snapshot format
//! - [`config`] - Environment configuration

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod snapshot;
pub mod state;
pub mod storage;
pub mod store;

pub use config::{CartConfig, ConfigError};
pub use error::CartError;
pub use snapshot::{DEFAULT_CART_KEY, SnapshotError};
pub use state::{CartChange, CartState};
pub use storage::{CartStorage, FileStorage, MemoryStorage, StorageError};
pub use store::CartStore;
