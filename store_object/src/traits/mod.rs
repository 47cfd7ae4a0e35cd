//! Traits for backing store operations
//!
//! This module contains all the traits that define the interface the
//! catalog layer uses to reach its authoritative data.

pub mod core;
pub mod filterable;
pub mod table_metadata;

// Re-export all public items for convenience
pub use core::StoreObject;
pub use filterable::{Filterable, StoreFilter};
pub use table_metadata::TableMetadata;
