//! Cache parameter configuration
//!
//! This module defines the CacheParams struct
//! binding a cache client to the key and TTL a store uses.

use crate::traits::{CacheEntryOptions, DistributedCache};
use std::sync::Arc;
use std::time::Duration;

/// Cache parameters for one cached dataset
#[derive(Debug, Clone)]
pub struct CacheParams {
    /// Shared cache client
    pub cache: Arc<dyn DistributedCache>,
    /// Well-known key holding the dataset
    pub key: String,
    /// Absolute expiration from the time of each write
    pub ttl: Duration,
}

impl CacheParams {
    pub fn new(cache: Arc<dyn DistributedCache>, key: &str, ttl: Duration) -> Self {
        Self {
            cache,
            key: key.to_string(),
            ttl,
        }
    }

    /// Options applied on every write of the dataset
    pub fn entry_options(&self) -> CacheEntryOptions {
        CacheEntryOptions::new().with_absolute_expiration(self.ttl)
    }
}
