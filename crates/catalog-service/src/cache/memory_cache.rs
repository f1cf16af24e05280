//! In-process cache backend.

use super::{CacheEntryOptions, CacheInterface, DEFAULT_ABSOLUTE_EXPIRATION};
use catalog_core::{CatalogResult, HealthCheck, HealthStatus};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    absolute_deadline: Instant,
    sliding: Option<Duration>,
    expires_at: Instant,
}

impl Entry {
    fn new(value: String, options: CacheEntryOptions, now: Instant) -> Self {
        Self {
            value,
            absolute_deadline: now + options.absolute_or_default(),
            sliding: options.sliding_expiration,
            expires_at: now + options.initial_ttl(),
        }
    }

    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    fn touch(&mut self, now: Instant) {
        if let Some(sliding) = self.sliding {
            self.expires_at = (now + sliding).min(self.absolute_deadline);
        }
    }
}

/// Process-local cache with the same expiration semantics as the Redis
/// backend.
///
/// Entries are not shared between processes, so this only suits a single
/// instance, local development and tests. Time comes from tokio's clock.
#[derive(Debug)]
pub struct MemoryCacheService {
    entries: Mutex<HashMap<String, Entry>>,
    default_ttl: Duration,
}

impl Default for MemoryCacheService {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryCacheService {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            default_ttl: DEFAULT_ABSOLUTE_EXPIRATION,
        }
    }

    /// Sets the absolute expiration used when a write gives none.
    #[must_use]
    pub fn with_default_ttl(mut self, default_ttl: Duration) -> Self {
        self.default_ttl = default_ttl;
        self
    }

    /// Number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .lock()
            .values()
            .filter(|e| !e.is_expired(now))
            .count()
    }

    /// Returns true when no live entries remain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CacheInterface for MemoryCacheService {
    fn is_enabled(&self) -> bool {
        true
    }

    async fn get_raw(&self, key: &str) -> CatalogResult<Option<String>> {
        let now = Instant::now();
        let mut entries = self.entries.lock();

        if entries.get(key).is_some_and(|e| e.is_expired(now)) {
            entries.remove(key);
        }
        let value = entries.get_mut(key).map(|entry| {
            entry.touch(now);
            entry.value.clone()
        });

        match &value {
            Some(_) => debug!("Cache hit for key '{}'", key),
            None => debug!("Cache miss for key '{}'", key),
        }
        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: &str, options: CacheEntryOptions) -> CatalogResult<()> {
        let options = options.or_default_ttl(self.default_ttl);
        let now = Instant::now();
        let mut entries = self.entries.lock();
        entries.retain(|_, e| !e.is_expired(now));
        entries.insert(key.to_string(), Entry::new(value.to_string(), options, now));
        debug!("Cached key '{}' for {:?}", key, options.initial_ttl());
        Ok(())
    }

    async fn remove_raw(&self, key: &str) -> CatalogResult<bool> {
        let now = Instant::now();
        let removed = self.entries.lock().remove(key);
        Ok(removed.is_some_and(|e| !e.is_expired(now)))
    }
}

#[async_trait]
impl HealthCheck for MemoryCacheService {
    fn name(&self) -> &str {
        "cache"
    }

    async fn check(&self) -> HealthStatus {
        HealthStatus::Healthy
    }
}
