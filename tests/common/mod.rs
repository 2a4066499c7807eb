#![allow(dead_code)] // Each test binary uses a different subset of helpers

pub mod memory_registry;
pub mod strategies;
pub mod test_db;

pub use memory_registry::MemoryRegistry;
pub use test_db::connected_store;
