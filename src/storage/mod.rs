//! Storage implementations for the record collection

#[cfg(feature = "in-memory")]
pub mod in_memory;
pub mod json_file;

#[cfg(feature = "in-memory")]
pub use in_memory::InMemoryStorage;
pub use json_file::JsonFileStorage;
