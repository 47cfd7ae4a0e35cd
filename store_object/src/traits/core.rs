//! Trait definitions
//!
//! This module defines core traits for backing store operations.

use crate::StoreError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait that defines common store operations for all entities
#[async_trait]
pub trait StoreObject: Send + Sync + Debug {
    /// The model type that this object represents
    type Model: Clone + Send + Sync + Debug + Serialize + for<'de> Deserialize<'de>;

    /// The ID type used for this object
    type Id: Clone + Send + Sync + Debug;

    /// Insert a new record; the store assigns its identity
    async fn create(&self, data: Self::Model) -> Result<Self::Model, StoreError>;

    /// Get an object by its ID
    async fn get_by_id(&self, id: &Self::Id) -> Result<Option<Self::Model>, StoreError>;

    /// List all objects of this type, ordered by ID
    async fn list_all(&self) -> Result<Vec<Self::Model>, StoreError>;

    /// Replace the record with the same ID; `None` when no such record exists
    async fn update(&self, data: Self::Model) -> Result<Option<Self::Model>, StoreError>;

    /// Delete an object by its ID; `false` when no such record exists
    async fn delete(&self, id: &Self::Id) -> Result<bool, StoreError>;

    /// Count total objects of this type
    async fn count(&self) -> Result<i64, StoreError>;
}
