//! # SportStore
//!
//! Product catalog data layer for the SportStore storefront. Products live in
//! PostgreSQL; the full product list is read through a distributed cache
//! (cache-aside, one well-known key, absolute TTL, explicit eviction).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sportstore::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!
//!     let sportstore = SportStore::new(config).await?;
//!     sportstore.auto_migrate::<Product>(false).await?;
//!
//!     let products = sportstore.product_repository();
//!     products
//!         .create(Product::new("Roadster", "Carbon road bike", 129_900, "Bikes"))
//!         .await?;
//!
//!     // first call fills the cache, the second one is served from it
//!     let all = products.get_all_products().await?;
//!     let again = products.get_all_products().await?;
//!     assert_eq!(all, again);
//!
//!     Ok(())
//! }
//! ```

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

pub mod codec;
pub mod core;
pub mod errors;
pub mod migration;
pub mod model;
pub mod prelude;
pub mod repository;
pub mod telemetry;

// Re-export the main public types for convenience
pub use codec::{JsonListCodec, ListCodec};
pub use core::SportStore;
pub use errors::{CodecError, RepositoryError, SportStoreError};
pub use model::Product;
pub use repository::{CachedProductRepository, ProductRepository};

// Re-export centralized config
pub use config::{
    AppConfig, CacheConfig, CatalogConfig, DatabaseConfig, ENABLE_REDIS_CACHING, Settings,
    SettingsSource,
};

// Re-export internal crates used in the public API
pub use cache_system;
pub use store_object;

// Re-export external dependencies used in public API
pub use async_trait;
pub use sqlx;
