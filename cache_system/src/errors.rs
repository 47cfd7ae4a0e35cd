//! Error types for cache operations
//!
//! This module defines all error types that can occur
//! during cache operations and Redis interactions.

use std::time::Duration;
use thiserror::Error;

/// Cache system errors
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Cache operation timeout")]
    Timeout,

    #[error("Invalid TTL value: {0:?}")]
    InvalidTtl(Duration),

    #[error("Cache unavailable: {0}")]
    Unavailable(String),
}
