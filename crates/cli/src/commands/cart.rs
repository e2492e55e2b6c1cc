//! Cart commands.
//!
//! Each command opens the file-backed cart, applies at most one mutation, and
//! returns the rendered cart for printing.

use std::fmt;

use gomarketplace_cart::{CartChange, CartConfig, CartState, CartStore};
use gomarketplace_core::{NewCartItem, Price, ProductId};
use rust_decimal::Decimal;

use super::CommandError;

/// Render the stored cart.
pub async fn show(config: &CartConfig) -> Result<String, CommandError> {
    let store = CartStore::open(config).await?;
    Ok(render(&store.products()))
}

/// Add a product to the stored cart.
pub async fn add(
    config: &CartConfig,
    id: &str,
    title: String,
    image_url: String,
    price: Decimal,
) -> Result<String, CommandError> {
    let product = NewCartItem {
        id: ProductId::parse(id)?,
        title,
        image_url,
        price: Price::new(price)?,
    };

    let store = CartStore::open(config).await?;
    let change = store.add_to_cart(product).await?;
    log_change(id, change);
    Ok(render(&store.products()))
}

/// Raise a product's quantity in the stored cart.
pub async fn increment(config: &CartConfig, id: &str) -> Result<String, CommandError> {
    let id = ProductId::parse(id)?;
    let store = CartStore::open(config).await?;
    let change = store.increment(&id).await?;
    log_change(id.as_str(), change);
    Ok(render(&store.products()))
}

/// Lower a product's quantity in the stored cart.
pub async fn decrement(config: &CartConfig, id: &str) -> Result<String, CommandError> {
    let id = ProductId::parse(id)?;
    let store = CartStore::open(config).await?;
    let change = store.decrement(&id).await?;
    log_change(id.as_str(), change);
    Ok(render(&store.products()))
}

fn log_change(id: &str, change: CartChange) {
    match change {
        CartChange::Added => tracing::info!(product_id = %id, "Added to cart"),
        CartChange::Incremented { quantity } | CartChange::Decremented { quantity } => {
            tracing::info!(product_id = %id, %quantity, "Quantity updated");
        }
        CartChange::Removed => tracing::info!(product_id = %id, "Removed from cart"),
        CartChange::Unchanged => tracing::warn!(product_id = %id, "Product is not in the cart"),
    }
}

/// Format a cart as a plain-text table.
fn render(cart: &CartState) -> String {
    CartTable(cart).to_string()
}

struct CartTable<'a>(&'a CartState);

impl fmt::Display for CartTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cart = self.0;
        if cart.is_empty() {
            return writeln!(f, "Cart is empty");
        }

        for item in cart.items() {
            writeln!(
                f,
                "{:<12} {:<30} x{:<4} {:>10}",
                item.id.as_str(),
                item.title,
                item.quantity.get(),
                item.line_total().to_string()
            )?;
        }
        writeln!(
            f,
            "{} items, subtotal {}",
            cart.item_count(),
            cart.subtotal()
        )
    }
}
