//! Cache system for distributed string caching
//!
//! This crate provides the distributed cache client abstraction used by the
//! catalog repository, a Redis-backed implementation and an in-process one.

pub mod clock;
pub mod errors;
pub mod manager;
pub mod memory;
pub mod params;
pub mod prelude;
pub mod traits;

// Re-export centralized config
pub use config::CacheConfig;

pub use clock::{Clock, ManualClock, SystemClock};
pub use errors::CacheError;
pub use manager::CacheManager;
pub use memory::MemoryCache;
pub use params::CacheParams;
pub use traits::{CacheEntryOptions, DistributedCache};
