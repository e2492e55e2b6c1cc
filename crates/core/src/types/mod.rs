//! Core types for GoMarketplace.
//!
//! This module provides type-safe wrappers for the cart's domain concepts.

pub mod id;
pub mod item;
pub mod price;
pub mod quantity;

pub use id::{ProductId, ProductIdError};
pub use item::{CartItem, NewCartItem};
pub use price::{Price, PriceError};
pub use quantity::Quantity;
