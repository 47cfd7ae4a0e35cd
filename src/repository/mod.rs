//! Product repository
//!
//! The read/write contract the storefront uses for catalog data, and its
//! cache-aside implementation.

pub mod cached;
pub mod product;

pub use cached::CachedProductRepository;
pub use product::ProductRepository;
