//! Cache manager implementation
//!
//! This module provides the Redis-backed `DistributedCache` and its
//! connection management.

use crate::errors::CacheError;
use crate::traits::{CacheEntryOptions, DistributedCache};
use async_trait::async_trait;
use config::CacheConfig;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client, RedisResult};
use std::fmt::Debug;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Redis-based cache manager
#[derive(Clone)]
pub struct CacheManager {
    client: Arc<Client>,
    config: Arc<CacheConfig>,
    connection_pool: Arc<RwLock<Option<MultiplexedConnection>>>,
}

impl Debug for CacheManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let connection_status = {
            match self.connection_pool.try_read() {
                Ok(pool) => {
                    if pool.is_some() {
                        "connected"
                    } else {
                        "no_connection"
                    }
                }
                Err(_) => "lock_error",
            }
        };

        f.debug_struct("CacheManager")
            .field("config", &self.config)
            .field("connected", &connection_status)
            .finish()
    }
}

impl CacheManager {
    /// Create a new cache manager; no connection is opened until first use
    pub fn new(config: CacheConfig) -> Result<Self, CacheError> {
        let client = Client::open(config.redis_url.as_str())?;

        Ok(Self {
            client: Arc::new(client),
            config: Arc::new(config),
            connection_pool: Arc::new(RwLock::new(None)),
        })
    }

    /// Get or create Redis connection
    async fn get_connection(&self) -> Result<MultiplexedConnection, CacheError> {
        if let Some(connection) = self.connection_pool.read().await.as_ref() {
            return Ok(connection.clone());
        }

        let mut pool = self.connection_pool.write().await;

        if pool.is_none() {
            let connection = tokio::time::timeout(
                self.config.connection_timeout(),
                self.client.get_multiplexed_async_connection(),
            )
            .await
            .map_err(|_| CacheError::Timeout)??;
            *pool = Some(connection);
        }

        pool.as_ref()
            .cloned()
            .ok_or_else(|| CacheError::Connection("Failed to get connection from pool".into()))
    }

    /// Forget the shared connection so the next command reconnects
    async fn reset_connection(&self) {
        *self.connection_pool.write().await = None;
    }

    /// Run one command on the shared connection, bounded by the configured timeout
    async fn execute<T, F, Fut>(&self, command: F) -> Result<T, CacheError>
    where
        F: FnOnce(MultiplexedConnection) -> Fut,
        Fut: Future<Output = RedisResult<T>>,
    {
        let connection = self.get_connection().await?;

        match tokio::time::timeout(self.config.timeout(), command(connection)).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                if e.is_connection_dropped() || e.is_io_error() {
                    self.reset_connection().await;
                }
                Err(e.into())
            }
            Err(_) => Err(CacheError::Timeout),
        }
    }

    /// Ping Redis to check connectivity
    pub async fn ping(&self) -> Result<String, CacheError> {
        self.execute(|mut conn| async move {
            let pong: String = redis::cmd("PING").query_async(&mut conn).await?;
            Ok(pong)
        })
        .await
    }

    /// Get current configuration
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }
}

#[async_trait]
impl DistributedCache for CacheManager {
    async fn get_string(&self, key: &str) -> Result<Option<String>, CacheError> {
        let key = key.to_string();
        self.execute(|mut conn| async move { conn.get::<_, Option<String>>(key).await })
            .await
    }

    async fn set_string(
        &self,
        key: &str,
        value: &str,
        options: &CacheEntryOptions,
    ) -> Result<(), CacheError> {
        let key = key.to_string();
        let value = value.to_string();

        match options.absolute_expiration_relative_to_now {
            Some(ttl) => {
                let millis = u64::try_from(ttl.as_millis())
                    .ok()
                    .filter(|ms| *ms > 0)
                    .ok_or(CacheError::InvalidTtl(ttl))?;
                self.execute(|mut conn| async move {
                    conn.pset_ex::<_, _, ()>(key, value, millis).await
                })
                .await
            }
            None => {
                self.execute(|mut conn| async move { conn.set::<_, _, ()>(key, value).await })
                    .await
            }
        }
    }

    async fn remove(&self, key: &str) -> Result<(), CacheError> {
        let key = key.to_string();
        self.execute(|mut conn| async move { conn.del::<_, i32>(key).await })
            .await
            .map(|_| ())
    }
}
