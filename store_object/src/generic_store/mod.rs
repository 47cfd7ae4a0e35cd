pub mod core;
pub mod filterable;
pub mod store_object;

pub use core::GenericStore;
