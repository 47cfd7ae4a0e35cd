//! Distributed cache client contract
//!
//! A string key/value cache shared across processes. The catalog layer only
//! issues get/set/remove against it and never owns its storage.

use crate::errors::CacheError;
use async_trait::async_trait;
use std::fmt::Debug;
use std::time::Duration;

/// Per-entry options for `set_string`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheEntryOptions {
    /// Fixed deadline measured from the write; reads never extend it
    pub absolute_expiration_relative_to_now: Option<Duration>,
}

impl CacheEntryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_absolute_expiration(mut self, ttl: Duration) -> Self {
        self.absolute_expiration_relative_to_now = Some(ttl);
        self
    }
}

/// Key → string cache with absolute expiration
#[async_trait]
pub trait DistributedCache: Send + Sync + Debug {
    /// Get the value stored under `key`, `None` when absent or expired
    async fn get_string(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Store `value` under `key`, replacing any previous value and expiration
    async fn set_string(
        &self,
        key: &str,
        value: &str,
        options: &CacheEntryOptions,
    ) -> Result<(), CacheError>;

    /// Remove `key`; removing an absent key is not an error
    async fn remove(&self, key: &str) -> Result<(), CacheError>;
}
