//! Shared fixtures for repository integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use sportstore::cache_system::{
    CacheEntryOptions, CacheError, DistributedCache, ManualClock, MemoryCache,
};
use sportstore::store_object::MemoryStore;
use sportstore::{CachedProductRepository, CatalogConfig, Product, Settings, ENABLE_REDIS_CACHING};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

pub const LIST_KEY: &str = "ProductsList";

/// `MemoryCache` that counts calls and can be told to fail
#[derive(Debug)]
pub struct RecordingCache {
    inner: MemoryCache,
    gets: AtomicUsize,
    sets: AtomicUsize,
    removes: AtomicUsize,
    fail_get: AtomicBool,
    fail_set: AtomicBool,
    fail_remove: AtomicBool,
}

impl RecordingCache {
    pub fn new(clock: Arc<ManualClock>) -> Self {
        Self {
            inner: MemoryCache::with_clock(clock),
            gets: AtomicUsize::new(0),
            sets: AtomicUsize::new(0),
            removes: AtomicUsize::new(0),
            fail_get: AtomicBool::new(false),
            fail_set: AtomicBool::new(false),
            fail_remove: AtomicBool::new(false),
        }
    }

    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn sets(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }

    pub fn removes(&self) -> usize {
        self.removes.load(Ordering::SeqCst)
    }

    /// Total calls of any kind
    pub fn calls(&self) -> usize {
        self.gets() + self.sets() + self.removes()
    }

    pub fn fail_get(&self, fail: bool) {
        self.fail_get.store(fail, Ordering::SeqCst);
    }

    pub fn fail_set(&self, fail: bool) {
        self.fail_set.store(fail, Ordering::SeqCst);
    }

    pub fn fail_remove(&self, fail: bool) {
        self.fail_remove.store(fail, Ordering::SeqCst);
    }

    /// Store a raw payload without going through the counters
    pub async fn inject(&self, key: &str, payload: &str) {
        self.inner
            .set_string(key, payload, &CacheEntryOptions::new())
            .await
            .unwrap();
    }

    /// Current raw payload, without going through the counters
    pub async fn peek(&self, key: &str) -> Option<String> {
        self.inner.get_string(key).await.unwrap()
    }

    pub async fn expires_at(&self, key: &str) -> Option<DateTime<Utc>> {
        self.inner.expires_at(key).await
    }
}

#[async_trait]
impl DistributedCache for RecordingCache {
    async fn get_string(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        if self.fail_get.load(Ordering::SeqCst) {
            return Err(CacheError::Unavailable("get refused".to_string()));
        }
        self.inner.get_string(key).await
    }

    async fn set_string(
        &self,
        key: &str,
        value: &str,
        options: &CacheEntryOptions,
    ) -> Result<(), CacheError> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        if self.fail_set.load(Ordering::SeqCst) {
            return Err(CacheError::Unavailable("set refused".to_string()));
        }
        self.inner.set_string(key, value, options).await
    }

    async fn remove(&self, key: &str) -> Result<(), CacheError> {
        self.removes.fetch_add(1, Ordering::SeqCst);
        if self.fail_remove.load(Ordering::SeqCst) {
            return Err(CacheError::Unavailable("remove refused".to_string()));
        }
        self.inner.remove(key).await
    }
}

pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

pub fn sample_products() -> Vec<Product> {
    vec![
        Product::new("Roadster", "Carbon road bike", 129_900, "Bikes"),
        Product::new("Trail Boot", "Waterproof hiking boot", 14_950, "Boots")
            .with_photo_url("https://img.example.com/trail-boot.png"),
    ]
}

pub struct Harness {
    pub store: Arc<MemoryStore<Product>>,
    pub cache: Arc<RecordingCache>,
    pub settings: Arc<Settings>,
    pub clock: Arc<ManualClock>,
    pub repo: CachedProductRepository<MemoryStore<Product>>,
}

impl Harness {
    pub async fn new(caching_enabled: bool) -> Self {
        Self::with_catalog(caching_enabled, CatalogConfig::default()).await
    }

    pub async fn with_catalog(caching_enabled: bool, catalog: CatalogConfig) -> Self {
        let store = Arc::new(MemoryStore::with_records(sample_products()).await.unwrap());
        let clock = Arc::new(ManualClock::new(start_time()));
        let cache = Arc::new(RecordingCache::new(clock.clone()));

        let settings = Arc::new(Settings::new());
        if caching_enabled {
            settings.set(ENABLE_REDIS_CACHING, "true");
        }

        let repo = CachedProductRepository::from_catalog_config(
            store.clone(),
            cache.clone(),
            settings.clone(),
            &catalog,
        );

        Self {
            store,
            cache,
            settings,
            clock,
            repo,
        }
    }

    /// Let spawned evictions run until the list key is gone
    pub async fn wait_for_eviction(&self) {
        for _ in 0..100 {
            if self.cache.peek(LIST_KEY).await.is_none() {
                return;
            }
            tokio::task::yield_now().await;
        }
        panic!("list key was never evicted");
    }

    /// Give any spawned task a chance to run
    pub async fn settle(&self) {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }
}
