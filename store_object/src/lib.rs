//! Store Object - backing store abstraction for SportStore
//!
//! This crate provides the traits the catalog layer consumes for its
//! authoritative data, a PostgreSQL implementation and an in-memory one.

pub mod errors;
pub mod generic_store;
pub mod id_type;
pub mod memory_store;
pub mod prelude;
pub mod traits;

pub use errors::StoreError;
pub use generic_store::GenericStore;
pub use id_type::SequentialId;
pub use memory_store::{MemoryStore, StoreStats};
pub use traits::*;

use sqlx::PgPool;

pub type DbPool = PgPool;
