//! Redis-based cache implementation.
//!
//! Each entry is a hash:
//!
//! ```text
//! <instance_name><key>  →  { data: <json>, absexp: <epoch ms>, sldexp: <ms or -1> }
//! ```
//!
//! The key's own expiry is `min(sliding, absolute)`. A hit on an entry with a
//! sliding expiration pushes the expiry forward again, capped at `absexp`.

use super::{CacheEntryOptions, CacheInterface, DEFAULT_ABSOLUTE_EXPIRATION};
use catalog_config::CacheConfig;
use catalog_core::{CatalogError, CatalogResult, HealthCheck, HealthStatus};
use async_trait::async_trait;
use chrono::Utc;
use deadpool_redis::redis::{self, RedisError};
use deadpool_redis::{Config, Pool, Runtime};
use shaku::Component;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

const DATA_FIELD: &str = "data";
const ABSOLUTE_FIELD: &str = "absexp";
const SLIDING_FIELD: &str = "sldexp";
const NO_SLIDING: i64 = -1;

type RedisResultUnit = Result<(), RedisError>;

/// Creates a Redis connection pool from cache configuration.
///
/// Only builds the pool; no connection is attempted, so an unreachable
/// server is not an error here.
pub fn create_redis_pool(config: &CacheConfig) -> CatalogResult<Pool> {
    Config::from_url(&config.redis_url)
        .builder()
        .map_err(|e| CatalogError::Configuration(format!("Invalid Redis config: {}", e)))?
        .max_size(config.pool_size)
        .runtime(Runtime::Tokio1)
        .build()
        .map_err(|e| CatalogError::Configuration(format!("Failed to create Redis pool: {}", e)))
}

/// Redis-based cache service.
#[derive(Component)]
#[shaku(interface = CacheInterface)]
pub struct RedisCacheService {
    /// Redis connection pool; `None` disables caching.
    pool: Option<Arc<Pool>>,
    /// Prefix prepended to every key.
    instance_name: String,
    /// Absolute expiration used when a write gives none.
    #[shaku(default = DEFAULT_ABSOLUTE_EXPIRATION)]
    default_ttl: Duration,
}

impl RedisCacheService {
    /// Create a new Redis cache service.
    #[must_use]
    pub fn new(pool: Arc<Pool>, instance_name: impl Into<String>) -> Self {
        Self {
            pool: Some(pool),
            instance_name: instance_name.into(),
            default_ttl: DEFAULT_ABSOLUTE_EXPIRATION,
        }
    }

    /// Sets the absolute expiration used when a write gives none.
    #[must_use]
    pub fn with_default_ttl(mut self, default_ttl: Duration) -> Self {
        self.default_ttl = default_ttl;
        self
    }

    /// Create a no-op cache service (for when caching is disabled).
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            pool: None,
            instance_name: String::new(),
            default_ttl: DEFAULT_ABSOLUTE_EXPIRATION,
        }
    }

    /// Round-trips a `PING`.
    pub async fn ping(&self) -> CatalogResult<()> {
        let mut conn = self.get_conn().await?;
        let _: String = redis::cmd("PING")
            .query_async::<String>(&mut *conn)
            .await
            .map_err(|e| redis_error("PING", e))?;
        Ok(())
    }

    fn full_key(&self, key: &str) -> String {
        format!("{}{}", self.instance_name, key)
    }

    async fn get_conn(&self) -> CatalogResult<deadpool_redis::Connection> {
        match &self.pool {
            Some(pool) => pool.get().await.map_err(|e| {
                CatalogError::cache(format!("Failed to get Redis connection: {}", e))
            }),
            None => Err(CatalogError::cache("Cache is disabled")),
        }
    }
}

fn redis_error(op: &str, err: RedisError) -> CatalogError {
    CatalogError::cache(format!("Redis {} failed: {}", op, err))
}

fn millis(duration: Duration) -> i64 {
    i64::try_from(duration.as_millis()).unwrap_or(i64::MAX)
}

/// Remaining key lifetime after a sliding hit, or `None` if there is no
/// sliding window to re-arm.
fn sliding_refresh_ms(absexp: Option<i64>, sldexp: Option<i64>, now_ms: i64) -> Option<i64> {
    let sliding = sldexp.filter(|s| *s > 0)?;
    let ttl = match absexp {
        Some(deadline) => sliding.min(deadline - now_ms),
        None => sliding,
    };
    (ttl > 0).then_some(ttl)
}

#[async_trait]
impl CacheInterface for RedisCacheService {
    fn is_enabled(&self) -> bool {
        self.pool.is_some()
    }

    async fn get_raw(&self, key: &str) -> CatalogResult<Option<String>> {
        if !self.is_enabled() {
            return Ok(None);
        }

        let full_key = self.full_key(key);
        let mut conn = self.get_conn().await?;
        let (data, absexp, sldexp): (Option<String>, Option<i64>, Option<i64>) = redis::cmd("HMGET")
            .arg(&full_key)
            .arg(DATA_FIELD)
            .arg(ABSOLUTE_FIELD)
            .arg(SLIDING_FIELD)
            .query_async(&mut *conn)
            .await
            .map_err(|e| redis_error("HMGET", e))?;

        let Some(data) = data else {
            debug!("Cache miss for key '{}'", full_key);
            return Ok(None);
        };
        debug!("Cache hit for key '{}'", full_key);

        if let Some(ttl_ms) = sliding_refresh_ms(absexp, sldexp, Utc::now().timestamp_millis()) {
            let refreshed: RedisResultUnit = redis::cmd("PEXPIRE")
                .arg(&full_key)
                .arg(ttl_ms)
                .query_async(&mut *conn)
                .await;
            if let Err(e) = refreshed {
                warn!("Failed to refresh sliding expiration for '{}': {}", full_key, e);
            }
        }

        Ok(Some(data))
    }

    async fn set_raw(&self, key: &str, value: &str, options: CacheEntryOptions) -> CatalogResult<()> {
        if !self.is_enabled() {
            return Ok(());
        }

        let options = options.or_default_ttl(self.default_ttl);
        let full_key = self.full_key(key);
        let absexp = Utc::now().timestamp_millis() + millis(options.absolute_or_default());
        let sldexp = options.sliding_expiration.map_or(NO_SLIDING, millis);
        let ttl_ms = millis(options.initial_ttl()).max(1);

        let mut conn = self.get_conn().await?;
        let _: () = redis::pipe()
            .atomic()
            .del(&full_key)
            .ignore()
            .hset_multiple(
                &full_key,
                &[
                    (ABSOLUTE_FIELD, absexp.to_string()),
                    (SLIDING_FIELD, sldexp.to_string()),
                    (DATA_FIELD, value.to_string()),
                ],
            )
            .ignore()
            .pexpire(&full_key, ttl_ms)
            .ignore()
            .query_async(&mut *conn)
            .await
            .map_err(|e| redis_error("HSET", e))?;

        debug!("Cached key '{}' with TTL {}ms", full_key, ttl_ms);
        Ok(())
    }

    async fn remove_raw(&self, key: &str) -> CatalogResult<bool> {
        if !self.is_enabled() {
            return Ok(false);
        }

        let full_key = self.full_key(key);
        let mut conn = self.get_conn().await?;
        let deleted: i64 = redis::cmd("DEL")
            .arg(&full_key)
            .query_async(&mut *conn)
            .await
            .map_err(|e| redis_error("DEL", e))?;

        debug!("Deleted key '{}': {}", full_key, deleted > 0);
        Ok(deleted > 0)
    }
}

#[async_trait]
impl HealthCheck for RedisCacheService {
    fn name(&self) -> &str {
        "cache"
    }

    async fn check(&self) -> HealthStatus {
        if !self.is_enabled() {
            return HealthStatus::Healthy;
        }
        match self.ping().await {
            Ok(()) => HealthStatus::Healthy,
            Err(e) => HealthStatus::Degraded(e.to_string()),
        }
    }
}

impl std::fmt::Debug for RedisCacheService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCacheService")
            .field("enabled", &self.is_enabled())
            .field("instance_name", &self.instance_name)
            .field("default_ttl", &self.default_ttl)
            .finish()
    }
}
