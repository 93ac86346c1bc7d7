//! Protoform: a runtime for schema-defined protocol messages.
//!
//! Messages are structured records with optional scalar fields, repeated
//! fields, embedded messages, map fields, and oneof groups. Each type is
//! described once by descriptors, built through a mutable builder, and read
//! through an immutable, thread-safe message view with structural equality,
//! hashing, and deterministic rendering.
//!
//! # Modules
//!
//! - [`schema`]: descriptors, validation, pools, and schema documents
//! - [`message`]: builders, messages, containers, and default instances
//!
//! Wire-format encoding is out of scope; encoders read descriptors and
//! messages through the public API.

pub mod message;
pub mod schema;
