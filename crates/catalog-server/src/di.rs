//! Dependency injection module using Shaku.
//!
//! `CatalogModule` holds the whole stack for a single process:
//!
//! ```text
//! ProductServiceImpl
//!   ├─ ProductRepositoryImpl → MySqlProductDaoImpl → DatabasePool
//!   └─ RedisCacheService   (or MemoryCacheService via override)
//! ```

use catalog_config::{CacheBackend, CacheConfig};
use catalog_core::{CatalogResult, HealthCheck};
use catalog_repository::{
    DatabasePool, DatabasePoolParameters, MySqlProductDaoImpl, ProductRepositoryImpl,
};
use catalog_service::{
    create_redis_pool, CacheEntryOptions, CacheInterface, MemoryCacheService, ProductService,
    ProductServiceImpl, ProductServiceImplParameters, RedisCacheService, RedisCacheServiceParameters,
};
use shaku::{module, HasComponent};
use std::sync::Arc;
use tracing::info;

module! {
    pub CatalogModule {
        components = [
            DatabasePool,
            MySqlProductDaoImpl,
            ProductRepositoryImpl,
            RedisCacheService,
            ProductServiceImpl,
        ],
        providers = [],
    }
}

/// A built module plus the pieces startup and `/health` need directly.
pub struct CatalogWiring {
    pub module: Arc<CatalogModule>,
    /// Dependency checks for `/health`, database first.
    pub health_checks: Vec<Arc<dyn HealthCheck>>,
    /// The Redis cache, when that backend is active.
    pub redis: Option<Arc<RedisCacheService>>,
}

impl CatalogWiring {
    /// Resolves the product service.
    pub fn product_service(&self) -> Arc<dyn ProductService> {
        self.module.resolve()
    }

    /// Resolves the cache the product service was wired with.
    pub fn cache(&self) -> Arc<dyn CacheInterface> {
        self.module.resolve()
    }
}

impl std::fmt::Debug for CatalogWiring {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogWiring")
            .field("health_checks", &self.health_checks.len())
            .field("redis", &self.redis)
            .finish_non_exhaustive()
    }
}

/// Expiration applied to cached product reads.
#[must_use]
pub fn product_cache_options(cache: &CacheConfig) -> CacheEntryOptions {
    let options = CacheEntryOptions::absolute(cache.product_ttl());
    match cache.product_sliding_ttl() {
        Some(idle) => options.with_sliding(idle),
        None => options,
    }
}

/// Builds the module around an existing database pool.
///
/// Malformed cache configuration fails here. Nothing is connected, so an
/// unreachable Redis does not.
pub fn build_catalog_module(database: &DatabasePool, cache: &CacheConfig) -> CatalogResult<CatalogWiring> {
    use catalog_repository::DatabasePoolInterface;

    let mysql = database.inner().clone();
    let mut health_checks: Vec<Arc<dyn HealthCheck>> =
        vec![Arc::new(DatabasePool::with_pool(mysql.clone()))];
    let mut redis = None;

    let builder = CatalogModule::builder()
        .with_component_parameters::<DatabasePool>(DatabasePoolParameters { pool: mysql })
        .with_component_parameters::<ProductServiceImpl>(ProductServiceImplParameters {
            product_cache_options: product_cache_options(cache),
        });

    let builder = match (cache.enabled, cache.backend) {
        (false, _) => {
            info!("Product cache disabled");
            builder.with_component_parameters::<RedisCacheService>(RedisCacheServiceParameters {
                pool: None,
                instance_name: String::new(),
                default_ttl: cache.default_ttl(),
            })
        }
        (true, CacheBackend::Redis) => {
            let pool = Arc::new(create_redis_pool(cache)?);
            let service = Arc::new(
                RedisCacheService::new(pool.clone(), cache.instance_name.clone())
                    .with_default_ttl(cache.default_ttl()),
            );
            health_checks.push(service.clone());
            redis = Some(service);

            info!("Product cache: Redis at {}", cache.redis_url);
            builder.with_component_parameters::<RedisCacheService>(RedisCacheServiceParameters {
                pool: Some(pool),
                instance_name: cache.instance_name.clone(),
                default_ttl: cache.default_ttl(),
            })
        }
        (true, CacheBackend::Memory) => {
            info!("Product cache: in-process memory");
            builder.with_component_override::<dyn CacheInterface>(Box::new(
                MemoryCacheService::new().with_default_ttl(cache.default_ttl()),
            ))
        }
    };

    Ok(CatalogWiring {
        module: Arc::new(builder.build()),
        health_checks,
        redis,
    })
}
