//! Common test infrastructure for Redis integration tests.

use catalog_config::CacheConfig;
use catalog_service::{create_redis_pool, RedisCacheService};
use deadpool_redis::redis;
use deadpool_redis::Pool;
use std::sync::Arc;
use testcontainers::{runners::AsyncRunner, ContainerAsync};
use testcontainers_modules::redis::Redis;

/// Key prefix used by every test cache.
pub const PREFIX: &str = "catalog-test:";

/// Redis testcontainer with a pool pointed at it.
pub struct TestRedis {
    _container: ContainerAsync<Redis>,
    pool: Arc<Pool>,
}

impl TestRedis {
    /// Starts a fresh Redis container and waits until it answers `PING`.
    pub async fn new() -> Self {
        let container = Redis::default()
            .start()
            .await
            .expect("Failed to start Redis container");

        let port = container
            .get_host_port_ipv4(6379)
            .await
            .expect("Failed to get Redis port");

        let config = CacheConfig {
            redis_url: format!("redis://127.0.0.1:{}", port),
            pool_size: 4,
            ..CacheConfig::default()
        };
        let pool = Arc::new(create_redis_pool(&config).expect("Failed to create Redis pool"));

        let redis = Self {
            _container: container,
            pool,
        };
        redis.wait_until_ready(30).await;
        redis
    }

    /// A cache service over the container, keys prefixed with [`PREFIX`].
    pub fn cache(&self) -> RedisCacheService {
        RedisCacheService::new(Arc::clone(&self.pool), PREFIX)
    }

    /// Remaining lifetime of a stored key in milliseconds, as Redis reports it.
    pub async fn pttl(&self, key: &str) -> i64 {
        let mut conn = self.pool.get().await.expect("Failed to get connection");
        redis::cmd("PTTL")
            .arg(format!("{}{}", PREFIX, key))
            .query_async(&mut *conn)
            .await
            .expect("PTTL failed")
    }

    /// Reads one field of a stored entry's hash.
    pub async fn field(&self, key: &str, field: &str) -> Option<String> {
        let mut conn = self.pool.get().await.expect("Failed to get connection");
        redis::cmd("HGET")
            .arg(format!("{}{}", PREFIX, key))
            .arg(field)
            .query_async(&mut *conn)
            .await
            .expect("HGET failed")
    }

    async fn wait_until_ready(&self, max_attempts: u32) {
        let cache = self.cache();
        let mut attempts = 0;
        loop {
            attempts += 1;
            match cache.ping().await {
                Ok(()) => return,
                Err(e) => {
                    if attempts >= max_attempts {
                        panic!("Redis not ready after {} attempts: {}", max_attempts, e);
                    }
                    tokio::time::sleep(std::time::Duration::from_secs(1)).await;
                }
            }
        }
    }
}
