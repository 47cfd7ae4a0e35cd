//! Convenience re-exports for common SportStore usage
//!
//! # Example
//!
//! ```rust
//! use sportstore::prelude::*;
//!
//! let product = Product::new("Roadster", "Carbon road bike", 129_900, "Bikes");
//! assert_eq!(product.category, "Bikes");
//! ```

// Core SportStore components
pub use crate::codec::{JsonListCodec, ListCodec};
pub use crate::core::SportStore;
pub use crate::errors::{CodecError, RepositoryError, SportStoreError};
pub use crate::model::Product;
pub use crate::repository::{CachedProductRepository, ProductRepository};
pub use crate::telemetry::init_tracing;

// Re-export centralized config
pub use config::{
    AppConfig, CacheConfig, CatalogConfig, DatabaseConfig, ENABLE_REDIS_CACHING, Settings,
    SettingsSource,
};

// Re-export commonly used store-object and cache-system types
pub use cache_system::prelude::*;
pub use store_object::prelude::*;

// Common external dependencies
pub use anyhow;
pub use sqlx;
pub use tokio;
