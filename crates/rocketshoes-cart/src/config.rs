//! # Cart Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     ROCKETSHOES_CATALOG_URL=http://localhost:3333                      │
//! │     ROCKETSHOES_STORAGE_DIR=/var/lib/rocketshoes                       │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/storefront/cart.toml (Linux)                             │
//! │     ~/Library/Application Support/com.rocketshoes.storefront/cart.toml │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     localhost:3333 catalog, "@RocketShoes:cart" key                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [catalog]
//! base_url = "http://localhost:3333"
//! timeout_secs = 10
//!
//! [storage]
//! key = "@RocketShoes:cart"
//! dir = "/var/lib/rocketshoes"
//!
//! [messages]
//! out_of_stock = "Requested amount is out of stock"
//! add_failed = "Could not add the product"
//! remove_failed = "Could not remove the product"
//! update_failed = "Could not change the product amount"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use rocketshoes_core::DEFAULT_CART_KEY;

use crate::error::{CartOperation, ConfigError, ConfigResult};

// =============================================================================
// Catalog Settings
// =============================================================================

/// Where the Catalog Service lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// Base URL of the storefront API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout (seconds). Unset means wait indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    "http://localhost:3333".to_string()
}

impl Default for CatalogSettings {
    fn default() -> Self {
        CatalogSettings {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

impl CatalogSettings {
    /// Request timeout as a Duration.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

// =============================================================================
// Storage Settings
// =============================================================================

/// Where the cart is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Slot key the cart is stored under.
    #[serde(default = "default_key")]
    pub key: String,

    /// Directory for the file slot. Defaults to the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

fn default_key() -> String {
    DEFAULT_CART_KEY.to_string()
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            key: default_key(),
            dir: None,
        }
    }
}

// =============================================================================
// Messages
// =============================================================================

/// User-facing texts sent to the Notifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Messages {
    #[serde(default = "default_out_of_stock")]
    pub out_of_stock: String,

    #[serde(default = "default_add_failed")]
    pub add_failed: String,

    #[serde(default = "default_remove_failed")]
    pub remove_failed: String,

    #[serde(default = "default_update_failed")]
    pub update_failed: String,
}

fn default_out_of_stock() -> String {
    "Requested amount is out of stock".to_string()
}
fn default_add_failed() -> String {
    "Could not add the product".to_string()
}
fn default_remove_failed() -> String {
    "Could not remove the product".to_string()
}
fn default_update_failed() -> String {
    "Could not change the product amount".to_string()
}

impl Default for Messages {
    fn default() -> Self {
        Messages {
            out_of_stock: default_out_of_stock(),
            add_failed: default_add_failed(),
            remove_failed: default_remove_failed(),
            update_failed: default_update_failed(),
        }
    }
}

impl Messages {
    /// Generic failure text of an operation.
    pub fn failure(&self, operation: CartOperation) -> &str {
        match operation {
            CartOperation::Add => &self.add_failed,
            CartOperation::Remove => &self.remove_failed,
            CartOperation::UpdateAmount => &self.update_failed,
        }
    }
}

// =============================================================================
// Main Cart Configuration
// =============================================================================

/// Complete cart configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartConfig {
    #[serde(default)]
    pub catalog: CatalogSettings,

    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub messages: Messages,
}

impl CartConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (cart.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading cart config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load cart config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ConfigResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ConfigError::SaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::SaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| ConfigError::SaveFailed(e.to_string()))?;

        info!(?path, "Cart config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        let url = Url::parse(&self.catalog.base_url)?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::InvalidUrl(format!(
                "Catalog URL must start with http:// or https://, got: {}",
                self.catalog.base_url
            )));
        }

        if self.catalog.timeout_secs == Some(0) {
            return Err(ConfigError::InvalidConfig(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        if self.storage.key.trim().is_empty() {
            return Err(ConfigError::InvalidConfig("storage key must not be empty".into()));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("ROCKETSHOES_CATALOG_URL") {
            debug!(url = %url, "Overriding catalog URL from environment");
            self.catalog.base_url = url;
        }

        if let Some(timeout) = lookup("ROCKETSHOES_CATALOG_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) => self.catalog.timeout_secs = Some(secs),
                Err(_) => warn!(value = %timeout, "Ignoring non-numeric catalog timeout"),
            }
        }

        if let Some(dir) = lookup("ROCKETSHOES_STORAGE_DIR") {
            debug!(dir = %dir, "Overriding storage directory from environment");
            self.storage.dir = Some(PathBuf::from(dir));
        }

        if let Some(key) = lookup("ROCKETSHOES_STORAGE_KEY") {
            self.storage.key = key;
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "rocketshoes", "storefront")
            .map(|dirs| dirs.config_dir().join("cart.toml"))
    }
}
