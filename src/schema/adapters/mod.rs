//! Schema source adapters.

pub mod json;
pub mod memory;

pub use json::JsonSchemaSource;
pub use memory::InMemorySchemaSource;
