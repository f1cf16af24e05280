//! Cache interface traits.

use super::CacheEntryOptions;
use catalog_core::CatalogResult;
use async_trait::async_trait;
use shaku::Interface;
use tracing::{debug, warn};

/// Raw cache store contract.
///
/// Values are opaque JSON strings so the trait stays dyn-compatible.
/// Implementations report transport failures as errors; [`CacheExt`] is
/// where they get absorbed.
#[async_trait]
pub trait CacheInterface: Interface + Send + Sync {
    /// Get a raw value from the cache.
    ///
    /// Returns `None` if the key doesn't exist or has expired. A hit re-arms
    /// the entry's sliding expiration, if it has one.
    async fn get_raw(&self, key: &str) -> CatalogResult<Option<String>>;

    /// Store a raw value, replacing any existing entry.
    async fn set_raw(&self, key: &str, value: &str, options: CacheEntryOptions) -> CatalogResult<()>;

    /// Delete a value from the cache.
    ///
    /// Returns `true` if the key existed. Absence is not an error.
    async fn remove_raw(&self, key: &str) -> CatalogResult<bool>;

    /// Check if caching is enabled.
    fn is_enabled(&self) -> bool;
}

/// Typed, fail-closed cache access.
///
/// None of these methods can fail: transport errors are logged and turn
/// into a miss or a no-op, and an entry that doesn't deserialize is a miss.
#[async_trait]
pub trait CacheExt: CacheInterface {
    /// Get a typed value from the cache.
    async fn get<T: serde::de::DeserializeOwned + Send>(&self, key: &str) -> Option<T> {
        let json = match self.get_raw(key).await {
            Ok(Some(json)) => json,
            Ok(None) => return None,
            Err(e) => {
                warn!("Cache get for '{}' failed, treating as miss: {}", key, e);
                return None;
            }
        };

        match serde_json::from_str(&json) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Cache entry '{}' did not deserialize, treating as miss: {}", key, e);
                None
            }
        }
    }

    /// Store a typed value in the cache.
    async fn set<T: serde::Serialize + Send + Sync>(&self, key: &str, value: &T, options: CacheEntryOptions) {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                warn!("Cache value for '{}' did not serialize, skipping: {}", key, e);
                return;
            }
        };

        if let Err(e) = self.set_raw(key, &json, options).await {
            warn!("Cache set for '{}' failed, skipping: {}", key, e);
        }
    }

    /// Remove an entry from the cache.
    async fn remove(&self, key: &str) {
        match self.remove_raw(key).await {
            Ok(existed) => debug!("Invalidated cache key '{}' (existed: {})", key, existed),
            Err(e) => warn!("Cache remove for '{}' failed: {}", key, e),
        }
    }
}

impl<T: CacheInterface + ?Sized> CacheExt for T {}
