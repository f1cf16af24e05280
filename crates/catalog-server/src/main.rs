//! # Catalog Cloud Server
//!
//! Loads configuration, connects to MySQL, wires the product service with its
//! cache and serves the REST API until shutdown.

use catalog_config::{AppConfig, ConfigLoader};
use catalog_core::{CatalogError, CatalogResult};
use catalog_repository::{DatabasePool, DatabasePoolInterface};
use catalog_rest::{create_router, AppState};
use catalog_server::{di, startup};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match ConfigLoader::from_default_location().load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    startup::init_logging(&config.observability);

    info!("Starting Catalog Cloud Server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Environment: {}", config.app.environment);

    if let Err(e) = run(config).await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> CatalogResult<()> {
    let database = DatabasePool::new(&config.database).await?;

    if config.database.run_migrations {
        database.run_migrations().await?;
    }

    let wiring = di::build_catalog_module(&database, &config.cache)?;
    if let Some(redis) = &wiring.redis {
        startup::check_cache_reachable(redis).await;
    }

    let state = AppState::from_module(wiring.module.as_ref()).with_health_checks(wiring.health_checks.clone());
    let router = create_router(state, &config.server);

    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| CatalogError::Internal(format!("Failed to bind {}: {}", addr, e)))?;

    startup::print_startup_info(&addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(startup::shutdown_signal())
        .await
        .map_err(|e| CatalogError::Internal(format!("REST server error: {}", e)))?;

    database.close().await;
    info!("Server shutdown complete");
    Ok(())
}
