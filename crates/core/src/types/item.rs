//! Cart line items.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId, Quantity};

/// A product as offered to the cart, before it has a quantity.
///
/// This is what a product listing hands to `add_to_cart`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCartItem {
    /// Catalog product ID.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Product image URL.
    pub image_url: String,
    /// Unit price.
    pub price: Price,
}

impl NewCartItem {
    /// Turn this product into a cart line with the given quantity.
    #[must_use]
    pub fn with_quantity(self, quantity: Quantity) -> CartItem {
        CartItem {
            id: self.id,
            title: self.title,
            image_url: self.image_url,
            price: self.price,
            quantity,
        }
    }
}

/// A line in the cart.
///
/// Field names match the persisted snapshot format:
/// `id`, `title`, `image_url`, `price`, `quantity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Catalog product ID, unique within a cart.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Product image URL.
    pub image_url: String,
    /// Unit price.
    pub price: Price,
    /// Units in the cart, always at least one.
    pub quantity: Quantity,
}

impl CartItem {
    /// Unit price multiplied by quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity.get())
    }
}
