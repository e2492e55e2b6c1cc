//! GoMarketplace Core - Shared cart domain types.
//!
//! This crate provides the types used by every GoMarketplace cart component:
//! - `cart` - The cart store with persistence
//! - `cli` - Command-line tool for inspecting and editing a stored cart
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no async
//! runtime. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs, prices, quantities, and cart items

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
