//! Core SportStore functionality
//!
//! This module contains the main SportStore struct, which owns the database
//! pool, the shared distributed cache client and the runtime settings, and
//! wires them into product repositories.

use cache_system::CacheManager;
use config::{AppConfig, CatalogConfig, ENABLE_REDIS_CACHING, Settings, SettingsSource};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use store_object::GenericStore;
use tracing::{info, warn};

use crate::errors::SportStoreError;
use crate::model::Product;
use crate::repository::CachedProductRepository;

/// Main SportStore coordinator
pub struct SportStore {
    pool: PgPool,
    cache: Arc<CacheManager>,
    settings: Arc<Settings>,
    catalog: CatalogConfig,
}

impl std::fmt::Debug for SportStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SportStore")
            .field("pool_size", &self.pool.size())
            .field("cache", &self.cache)
            .field("catalog", &self.catalog)
            .finish()
    }
}

impl SportStore {
    /// Connect to the database and prepare the cache client
    pub async fn new(config: AppConfig) -> Result<Self, SportStoreError> {
        let database = &config.database;

        let mut pool_options = sqlx::postgres::PgPoolOptions::new()
            .max_connections(database.max_connections)
            .min_connections(database.min_connections)
            .acquire_timeout(Duration::from_secs(database.connection_timeout_seconds))
            .idle_timeout(Duration::from_secs(database.idle_timeout_seconds));

        // Set max lifetime if specified
        if database.max_lifetime_seconds > 0 {
            pool_options =
                pool_options.max_lifetime(Duration::from_secs(database.max_lifetime_seconds));
        }

        let pool = pool_options.connect(&database.connection_string()).await?;
        let cache = Arc::new(CacheManager::new(config.cache.clone())?);
        let settings = Arc::new(config.runtime_settings());

        info!(
            host = %database.host,
            database = %database.database,
            caching_enabled = settings.is_enabled(ENABLE_REDIS_CACHING),
            "SportStore initialized"
        );

        Ok(Self {
            pool,
            cache,
            settings,
            catalog: config.catalog,
        })
    }

    /// Get database pool reference
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runtime settings; changes are seen by every repository on its next read
    pub fn settings(&self) -> Arc<Settings> {
        Arc::clone(&self.settings)
    }

    /// Product repository over PostgreSQL with the shared cache
    pub fn product_repository(&self) -> CachedProductRepository<GenericStore<Product>> {
        let store = Arc::new(GenericStore::<Product>::new(self.pool.clone()));
        CachedProductRepository::from_catalog_config(
            store,
            self.cache.clone(),
            self.settings.clone(),
            &self.catalog,
        )
    }

    /// Check database connection health; an unreachable cache is only reported
    pub async fn health_check(&self) -> Result<(), SportStoreError> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;

        if let Err(e) = self.cache.ping().await {
            warn!(error = %e, "Distributed cache unreachable, catalog reads will use the database");
        }
        Ok(())
    }
}
