//! Integration tests for the GoMarketplace cart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p gomarketplace-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_lifecycle` - Hydrate, mutate, and rehydrate through the public store API
//! - `file_persistence` - File-backed carts across store restarts
//!
//! This library holds the fixtures shared by the test binaries.

use gomarketplace_core::{NewCartItem, Price, ProductId};

/// Build a product listing entry.
///
/// # Panics
///
/// Panics if `id` is empty.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn product(id: &str, title: &str, cents: u32) -> NewCartItem {
    NewCartItem {
        id: ProductId::parse(id).unwrap(),
        title: title.to_string(),
        image_url: format!("https://cdn.gomarketplace.test/{id}.png"),
        price: Price::from_cents(cents),
    }
}

/// Parse a product id.
///
/// # Panics
///
/// Panics if `id` is empty.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn pid(id: &str) -> ProductId {
    ProductId::parse(id).unwrap()
}
