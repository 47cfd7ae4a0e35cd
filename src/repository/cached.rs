//! Cache-aside product repository
//!
//! `get_all_products` consults the distributed cache first and repopulates it
//! from the backing store on a miss. Every other read and all writes go straight
//! to the store. The cache is best-effort: its failures are logged and never
//! reach the caller.

use crate::codec::{JsonListCodec, ListCodec};
use crate::errors::RepositoryError;
use crate::model::Product;
use crate::repository::ProductRepository;
use async_trait::async_trait;
use cache_system::{CacheParams, DistributedCache};
use config::{CatalogConfig, ENABLE_REDIS_CACHING, SettingsSource};
use std::fmt;
use std::sync::Arc;
use store_object::{Filterable, StoreFilter, StoreObject};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

pub struct CachedProductRepository<S, C = JsonListCodec> {
    store: Arc<S>,
    cache: CacheParams,
    settings: Arc<dyn SettingsSource>,
    codec: C,
    evict_on_write: bool,
}

impl<S, C> fmt::Debug for CachedProductRepository<S, C>
where
    S: fmt::Debug,
    C: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedProductRepository")
            .field("store", &self.store)
            .field("cache_key", &self.cache.key)
            .field("cache_ttl", &self.cache.ttl)
            .field("caching_enabled", &self.caching_enabled())
            .field("codec", &self.codec)
            .field("evict_on_write", &self.evict_on_write)
            .finish()
    }
}

impl<S> CachedProductRepository<S, JsonListCodec> {
    pub fn new(store: Arc<S>, cache: CacheParams, settings: Arc<dyn SettingsSource>) -> Self {
        Self {
            store,
            cache,
            settings,
            codec: JsonListCodec,
            evict_on_write: false,
        }
    }

    /// Repository using the list key, TTL and write policy from `catalog`
    pub fn from_catalog_config(
        store: Arc<S>,
        cache: Arc<dyn DistributedCache>,
        settings: Arc<dyn SettingsSource>,
        catalog: &CatalogConfig,
    ) -> Self {
        let params = CacheParams::new(cache, &catalog.list_cache_key, catalog.list_cache_ttl());
        Self::new(store, params, settings).with_evict_on_write(catalog.evict_on_write)
    }
}

impl<S, C> CachedProductRepository<S, C> {
    pub fn with_codec<C2>(self, codec: C2) -> CachedProductRepository<S, C2> {
        CachedProductRepository {
            store: self.store,
            cache: self.cache,
            settings: self.settings,
            codec,
            evict_on_write: self.evict_on_write,
        }
    }

    /// Evict the cached list after every successful create, update and delete
    pub fn with_evict_on_write(mut self, evict_on_write: bool) -> Self {
        self.evict_on_write = evict_on_write;
        self
    }

    /// Re-read on every call so the flag can change at runtime
    pub fn caching_enabled(&self) -> bool {
        self.settings.is_enabled(ENABLE_REDIS_CACHING)
    }

    /// Issue the list-key removal on the current runtime without awaiting it
    fn spawn_eviction(&self) -> Option<JoinHandle<()>> {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!(key = %self.cache.key, "No async runtime, distributed cache not cleared");
            return None;
        };

        let cache = Arc::clone(&self.cache.cache);
        let key = self.cache.key.clone();
        let handle = runtime.spawn(async move {
            if let Err(e) = cache.remove(&key).await {
                warn!(key = %key, error = %e, "Distributed cache eviction failed");
            }
        });

        info!(key = %self.cache.key, "Distributed cache cleared");
        Some(handle)
    }
}

impl<S, C> CachedProductRepository<S, C>
where
    S: StoreObject<Model = Product, Id = i32> + Filterable,
    C: ListCodec<Product>,
{
    /// Cached list, or `None` for anything that must count as a miss
    async fn read_cached(&self) -> Option<Vec<Product>> {
        let key = &self.cache.key;

        let payload = match self.cache.cache.get_string(key).await {
            Ok(Some(payload)) if !payload.is_empty() => payload,
            Ok(_) => {
                debug_log!("cache miss for {}", key);
                return None;
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Distributed cache read failed, falling back to store");
                return None;
            }
        };

        match self.codec.decode(&payload) {
            Ok(products) => Some(products),
            Err(e) => {
                warn!(key = %key, error = %e, "Discarding undecodable cached product list");
                None
            }
        }
    }

    /// Best-effort write of the freshly fetched list
    async fn populate_cache(&self, products: &[Product]) {
        let key = &self.cache.key;

        let payload = match self.codec.encode(products) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(key = %key, error = %e, "Could not encode product list for caching");
                return;
            }
        };

        match self
            .cache
            .cache
            .set_string(key, &payload, &self.cache.entry_options())
            .await
        {
            Ok(()) => info!(
                key = %key,
                count = products.len(),
                ttl_secs = self.cache.ttl.as_secs(),
                "ProductRepository.get_all_products: products list cached"
            ),
            Err(e) => warn!(key = %key, error = %e, "Distributed cache write failed"),
        }
    }

    async fn list_from_store(&self) -> Result<Vec<Product>, RepositoryError> {
        self.store.list_all().await.map_err(|e| {
            error!(error = %e, "Error in ProductRepository.get_all_products");
            RepositoryError::Storage(e)
        })
    }

    fn evict_after_write(&self) {
        if self.evict_on_write {
            // fire-and-forget like an explicit clear_cache
            let _ = self.spawn_eviction();
        }
    }
}

#[async_trait]
impl<S, C> ProductRepository for CachedProductRepository<S, C>
where
    S: StoreObject<Model = Product, Id = i32> + Filterable + 'static,
    C: ListCodec<Product> + 'static,
{
    async fn get_all_products(&self) -> Result<Vec<Product>, RepositoryError> {
        if !self.caching_enabled() {
            let products = self.list_from_store().await?;
            info!(count = products.len(), "ProductRepository.get_all_products");
            return Ok(products);
        }

        if let Some(products) = self.read_cached().await {
            info!(
                count = products.len(),
                "ProductRepository.get_all_products: read from distributed cache"
            );
            return Ok(products);
        }

        let products = self.list_from_store().await?;
        self.populate_cache(&products).await;
        Ok(products)
    }

    async fn find_product_by_id(&self, product_id: i32) -> Result<Option<Product>, RepositoryError> {
        let product = self.store.get_by_id(&product_id).await.map_err(|e| {
            error!(product_id, error = %e, "Error in ProductRepository.find_product_by_id");
            RepositoryError::Storage(e)
        })?;

        info!(product_id, found = product.is_some(), "ProductRepository.find_product_by_id");
        Ok(product)
    }

    async fn find_products_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<Product>, RepositoryError> {
        let filter = StoreFilter::new().add_condition("category", category);
        let products = self.store.list_by_filter(&filter).await.map_err(|e| {
            error!(category, error = %e, "Error in ProductRepository.find_products_by_category");
            RepositoryError::Storage(e)
        })?;

        info!(category, count = products.len(), "ProductRepository.find_products_by_category");
        Ok(products)
    }

    async fn create(&self, product: Product) -> Result<Product, RepositoryError> {
        let created = self.store.create(product).await.map_err(|e| {
            error!(error = %e, "Error in ProductRepository.create");
            RepositoryError::Storage(e)
        })?;

        info!(product_id = created.product_id, "ProductRepository.create");
        self.evict_after_write();
        Ok(created)
    }

    async fn update(&self, product: Product) -> Result<Product, RepositoryError> {
        let product_id = product.product_id;
        let updated = self
            .store
            .update(product)
            .await
            .map_err(|e| {
                error!(product_id, error = %e, "Error in ProductRepository.update");
                RepositoryError::Storage(e)
            })?
            .ok_or_else(|| {
                warn!(product_id, "ProductRepository.update: no such product");
                RepositoryError::NotFound(product_id)
            })?;

        info!(product_id, "ProductRepository.update");
        self.evict_after_write();
        Ok(updated)
    }

    async fn delete(&self, product_id: i32) -> Result<(), RepositoryError> {
        let deleted = self.store.delete(&product_id).await.map_err(|e| {
            error!(product_id, error = %e, "Error in ProductRepository.delete");
            RepositoryError::Storage(e)
        })?;

        if !deleted {
            warn!(product_id, "ProductRepository.delete: no such product");
            return Err(RepositoryError::NotFound(product_id));
        }

        info!(product_id, "ProductRepository.delete");
        self.evict_after_write();
        Ok(())
    }

    fn clear_cache(&self) -> Option<JoinHandle<()>> {
        self.spawn_eviction()
    }
}
