//! Error types for the SportStore crate
//!
//! This module contains all error types that can be returned by SportStore operations.

use cache_system::CacheError;
use config::ConfigError;
use store_object::StoreError;
use thiserror::Error;

/// Errors raised while wiring the catalog to its database and cache
#[derive(Error, Debug)]
pub enum SportStoreError {
    #[error("Database connection error: {0}")]
    DatabaseConnection(#[from] sqlx::Error),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Errors surfaced by `ProductRepository` operations
///
/// Cache failures never appear here; the repository degrades to the
/// backing store instead.
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Backing store error: {0}")]
    Storage(#[from] StoreError),

    #[error("Product not found: {0}")]
    NotFound(i32),
}

/// Errors converting a product list to or from its cached form
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Failed to encode product list: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Failed to decode product list: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Malformed product list: {0}")]
    Malformed(String),
}
