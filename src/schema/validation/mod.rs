//! Schema validation implementation.
//!
//! This module provides the individual rules and the composite validator a
//! pool runs before it is published.

pub mod rules;
pub mod service;

pub use service::DefaultSchemaValidator;
