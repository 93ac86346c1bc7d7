//! Validator port for schema validation.
//!
//! Defines the interface a pool runs over its descriptors before it is
//! published, and the configuration that tunes the rules.

use crate::schema::{
    domain::{EnumDescriptor, MessageDescriptor},
    error::SchemaResult,
};

/// Highest field number the descriptor format can address.
pub const MAX_FIELD_NUMBER: u32 = 536_870_911;

/// Field numbers reserved for implementation use.
pub const RESERVED_FIELD_NUMBERS: std::ops::RangeInclusive<u32> = 19_000..=19_999;

/// Port for validating a complete set of descriptors.
///
/// Validation occurs in two layers:
/// 1. Type validation (unique names across the pool, enum consistency)
/// 2. Field validation (numbers, references, map keys, defaults, oneofs)
///
/// # Implementation Notes
///
/// Implementations should:
/// - Collect all errors before returning (not fail-fast)
/// - Use `SchemaError::multiple` to combine errors
/// - Be stateless and thread-safe
pub trait SchemaValidator: Send + Sync {
    /// Validates every message and enum of one schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError` if any rule fails. Multiple failures are
    /// combined using `SchemaError::Multiple`.
    fn validate(&self, messages: &[MessageDescriptor], enums: &[EnumDescriptor]) -> SchemaResult<()>;

    /// Validates type-level rules: unique type names and enum values.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError` if type validation fails.
    fn validate_types(&self, messages: &[MessageDescriptor], enums: &[EnumDescriptor]) -> SchemaResult<()>;

    /// Validates the fields of one message against the whole schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError` if field validation fails.
    fn validate_fields(
        &self,
        message: &MessageDescriptor,
        messages: &[MessageDescriptor],
        enums: &[EnumDescriptor],
    ) -> SchemaResult<()>;
}

/// Configuration for schema validation rules.
///
/// # Examples
///
/// ```
/// use protoform::schema::ports::validator::SchemaConfig;
///
/// let config = SchemaConfig::default();
/// assert!(config.reject_reserved_numbers);
///
/// let lenient = SchemaConfig::lenient();
/// assert!(lenient.allow_empty_oneofs);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaConfig {
    /// Largest accepted field number.
    pub max_field_number: u32,
    /// Whether numbers in the reserved range are rejected.
    pub reject_reserved_numbers: bool,
    /// Whether oneof groups without members are accepted.
    pub allow_empty_oneofs: bool,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            max_field_number: MAX_FIELD_NUMBER,
            reject_reserved_numbers: true,
            allow_empty_oneofs: false,
        }
    }
}

impl SchemaConfig {
    /// Creates a lenient configuration accepting reserved numbers and
    /// empty oneof groups.
    ///
    /// Useful for schemas produced by tools that emit placeholder groups.
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            reject_reserved_numbers: false,
            allow_empty_oneofs: true,
            ..Default::default()
        }
    }

    /// Creates a strict configuration limiting field numbers to 16 bits.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            max_field_number: 65_535,
            reject_reserved_numbers: true,
            allow_empty_oneofs: false,
        }
    }
}
