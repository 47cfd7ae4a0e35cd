//! Convenience re-exports for common store-object usage

// Core traits
pub use crate::traits::{Filterable, StoreFilter, StoreObject, TableMetadata};

// Stores
pub use crate::generic_store::GenericStore;
pub use crate::memory_store::{MemoryStore, StoreStats};

pub use crate::errors::StoreError;
pub use crate::id_type::SequentialId;
pub use crate::DbPool;

// Common external dependencies
pub use async_trait::async_trait;
pub use serde::{Deserialize, Serialize};
