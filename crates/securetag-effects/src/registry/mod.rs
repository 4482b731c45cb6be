//! Registry storage handlers

pub mod memory;

pub use memory::MemoryRegistryHandler;
