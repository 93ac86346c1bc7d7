//! Port trait definitions for the schema subsystem.
//!
//! Ports define what the pool needs from the outside: a place to load a
//! schema document from, and a validator to run over the descriptors.

pub mod source;
pub mod validator;

pub use source::SchemaSource;
pub use validator::{SchemaConfig, SchemaValidator};
