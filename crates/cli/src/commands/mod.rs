//! CLI subcommand implementations.

pub mod cart;

use gomarketplace_cart::{CartError, ConfigError};
use gomarketplace_core::{PriceError, ProductIdError};
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Cart store operation failed.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Product ID argument is invalid.
    #[error("Invalid product id: {0}")]
    InvalidProductId(#[from] ProductIdError),

    /// Price argument is invalid.
    #[error("Invalid price: {0}")]
    InvalidPrice(#[from] PriceError),
}
