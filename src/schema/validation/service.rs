//! Validation service implementation.
//!
//! Provides the default implementation of the `SchemaValidator` port,
//! combining the individual rules into one pass.

use crate::schema::{
    domain::{EnumDescriptor, MessageDescriptor},
    error::{SchemaError, SchemaResult},
    ports::validator::{SchemaConfig, SchemaValidator},
    validation::rules,
};

/// Default implementation of the schema validator.
///
/// Applies every rule, collecting errors to report all problems in a schema
/// rather than the first one found.
///
/// # Examples
///
/// ```
/// use protoform::schema::domain::{FieldDescriptor, MessageDescriptor, ScalarKind};
/// use protoform::schema::ports::validator::SchemaValidator;
/// use protoform::schema::validation::DefaultSchemaValidator;
///
/// let message = MessageDescriptor::builder("Ping")
///     .field(FieldDescriptor::scalar("seq", 1, ScalarKind::Int64))
///     .build()
///     .expect("valid descriptor");
///
/// let validator = DefaultSchemaValidator::new();
/// assert!(validator.validate(&[message], &[]).is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct DefaultSchemaValidator {
    config: SchemaConfig,
}

impl DefaultSchemaValidator {
    /// Creates a validator with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a validator with a custom configuration.
    #[must_use]
    pub const fn with_config(config: SchemaConfig) -> Self {
        Self { config }
    }

    /// Returns the current configuration.
    #[must_use]
    pub const fn config(&self) -> &SchemaConfig {
        &self.config
    }
}

impl SchemaValidator for DefaultSchemaValidator {
    fn validate(&self, messages: &[MessageDescriptor], enums: &[EnumDescriptor]) -> SchemaResult<()> {
        let mut errors = Vec::new();

        if let Err(e) = self.validate_types(messages, enums) {
            errors.push(e);
        }

        for message in messages {
            if let Err(e) = self.validate_fields(message, messages, enums) {
                errors.push(e);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::multiple(errors))
        }
    }

    fn validate_types(&self, messages: &[MessageDescriptor], enums: &[EnumDescriptor]) -> SchemaResult<()> {
        let mut errors = Vec::new();

        if let Err(e) = rules::validate_unique_type_names(messages, enums) {
            errors.push(e);
        }

        for descriptor in enums {
            if let Err(e) = rules::validate_enum(descriptor) {
                errors.push(e);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::multiple(errors))
        }
    }

    fn validate_fields(
        &self,
        message: &MessageDescriptor,
        messages: &[MessageDescriptor],
        enums: &[EnumDescriptor],
    ) -> SchemaResult<()> {
        let mut errors = Vec::new();

        for field in message.fields() {
            let checks = [
                rules::validate_field_number(message, field, &self.config),
                rules::validate_field_reference(message, field, messages, enums),
                rules::validate_map_key(message, field),
                rules::validate_default(message, field, enums),
            ];
            errors.extend(checks.into_iter().filter_map(Result::err));
        }

        if let Err(e) = rules::validate_oneofs(message, &self.config) {
            errors.push(e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::multiple(errors))
        }
    }
}
