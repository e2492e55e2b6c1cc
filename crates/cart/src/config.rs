//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `GOMARKETPLACE_DATA_DIR` - Directory holding stored carts (default: `.gomarketplace`)
//! - `GOMARKETPLACE_CART_KEY` - Storage key for the cart snapshot (default: `@GoMarketplace:cart`)

use std::path::PathBuf;

use thiserror::Error;

use crate::snapshot::DEFAULT_CART_KEY;

const DATA_DIR_VAR: &str = "GOMARKETPLACE_DATA_DIR";
const CART_KEY_VAR: &str = "GOMARKETPLACE_CART_KEY";
const DEFAULT_DATA_DIR: &str = ".gomarketplace";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart storage configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    /// Root directory for file-backed storage
    pub data_dir: PathBuf,
    /// Key the cart snapshot is stored under
    pub cart_key: String,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            cart_key: DEFAULT_CART_KEY.to_string(),
        }
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = lookup(DATA_DIR_VAR).map_or_else(
            || Ok(PathBuf::from(DEFAULT_DATA_DIR)),
            |dir| {
                if dir.trim().is_empty() {
                    Err(ConfigError::InvalidEnvVar(
                        DATA_DIR_VAR.to_string(),
                        "must not be empty".to_string(),
                    ))
                } else {
                    Ok(PathBuf::from(dir))
                }
            },
        )?;

        let cart_key = match lookup(CART_KEY_VAR) {
            Some(key) if key.is_empty() => {
                return Err(ConfigError::InvalidEnvVar(
                    CART_KEY_VAR.to_string(),
                    "must not be empty".to_string(),
                ));
            }
            Some(key) => key,
            None => DEFAULT_CART_KEY.to_string(),
        };

        Ok(Self { data_dir, cart_key })
    }
}
