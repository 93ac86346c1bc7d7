//! Unit tests for the message module.
//!
//! Tests are organised by runtime concept, covering happy paths, error
//! cases, and edge cases for builders, messages, and containers.
