//! Individual schema rule implementations.
//!
//! Each rule is a pure function checking one aspect of a descriptor set.
//! Rules that can find several problems at once return them combined with
//! [`SchemaError::multiple`].

use crate::schema::{
    domain::{Cardinality, EnumDescriptor, FieldDescriptor, FieldType, MessageDescriptor},
    error::SchemaError,
    ports::validator::{RESERVED_FIELD_NUMBERS, SchemaConfig},
};
use std::collections::HashSet;

fn finish(errors: Vec<SchemaError>) -> Result<(), SchemaError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(SchemaError::multiple(errors))
    }
}

/// Validates that no two types (messages or enums) share a name.
///
/// # Errors
///
/// Returns `SchemaError::DuplicateTypeName` once per repeated name.
pub fn validate_unique_type_names(
    messages: &[MessageDescriptor],
    enums: &[EnumDescriptor],
) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let names = messages
        .iter()
        .map(MessageDescriptor::name)
        .chain(enums.iter().map(EnumDescriptor::name));
    let mut errors = Vec::new();
    for name in names {
        if !seen.insert(name) && reported.insert(name) {
            errors.push(SchemaError::DuplicateTypeName(name.to_owned()));
        }
    }
    finish(errors)
}

/// Validates one enum: a valid name, at least one value, and unique value
/// names and numbers.
///
/// # Errors
///
/// Returns `SchemaError::InvalidName`, `EmptyEnum`, `DuplicateEnumNumber`,
/// or `DuplicateEnumValue`.
pub fn validate_enum(descriptor: &EnumDescriptor) -> Result<(), SchemaError> {
    let mut errors = Vec::new();
    if !crate::schema::domain::is_type_name(descriptor.name()) {
        errors.push(SchemaError::invalid_name("enum type", descriptor.name()));
    }
    if descriptor.values().is_empty() {
        errors.push(SchemaError::EmptyEnum(descriptor.name().to_owned()));
    }
    let mut numbers = HashSet::new();
    let mut names = HashSet::new();
    for value in descriptor.values() {
        if !crate::schema::domain::is_identifier(value.name()) {
            errors.push(SchemaError::invalid_name("enum value", value.name()));
        }
        if !numbers.insert(value.number()) {
            errors.push(SchemaError::DuplicateEnumNumber {
                enum_type: descriptor.name().to_owned(),
                number: value.number(),
            });
        }
        if !names.insert(value.name()) {
            errors.push(SchemaError::DuplicateEnumValue {
                enum_type: descriptor.name().to_owned(),
                value: value.name().to_owned(),
            });
        }
    }
    finish(errors)
}

/// Validates that a field number lies in `1..=max_field_number` and, when
/// configured, outside the reserved range.
///
/// # Errors
///
/// Returns `SchemaError::FieldNumberOutOfRange` or
/// `SchemaError::ReservedFieldNumber`.
pub fn validate_field_number(
    message: &MessageDescriptor,
    field: &FieldDescriptor,
    config: &SchemaConfig,
) -> Result<(), SchemaError> {
    let number = field.number();
    if number == 0 || number > config.max_field_number {
        return Err(SchemaError::FieldNumberOutOfRange {
            message_type: message.name().to_owned(),
            field: field.name().to_owned(),
            number,
            max: config.max_field_number,
        });
    }
    if config.reject_reserved_numbers && RESERVED_FIELD_NUMBERS.contains(&number) {
        return Err(SchemaError::ReservedFieldNumber {
            message_type: message.name().to_owned(),
            field: field.name().to_owned(),
            number,
        });
    }
    Ok(())
}

/// Validates that an enum or message reference resolves to a type of the
/// right kind.
///
/// # Errors
///
/// Returns `SchemaError::UnknownType` or `SchemaError::WrongTypeKind`.
pub fn validate_field_reference(
    message: &MessageDescriptor,
    field: &FieldDescriptor,
    messages: &[MessageDescriptor],
    enums: &[EnumDescriptor],
) -> Result<(), SchemaError> {
    let is_message = |name: &str| messages.iter().any(|m| m.name() == name);
    let is_enum = |name: &str| enums.iter().any(|e| e.name() == name);

    let (type_name, expected, found, other) = match field.field_type() {
        FieldType::Scalar(_) => return Ok(()),
        FieldType::Enum(name) => (name, "an enum", is_enum(name), is_message(name)),
        FieldType::Message(name) => (name, "a message", is_message(name), is_enum(name)),
    };

    if found {
        Ok(())
    } else if other {
        Err(SchemaError::WrongTypeKind {
            message_type: message.name().to_owned(),
            field: field.name().to_owned(),
            type_name: type_name.clone(),
            expected,
        })
    } else {
        Err(SchemaError::UnknownType {
            message_type: message.name().to_owned(),
            field: field.name().to_owned(),
            type_name: type_name.clone(),
        })
    }
}

/// Validates that a map field is keyed by an integral, bool, or string kind.
///
/// # Errors
///
/// Returns `SchemaError::InvalidMapKey`.
pub fn validate_map_key(message: &MessageDescriptor, field: &FieldDescriptor) -> Result<(), SchemaError> {
    match field.cardinality() {
        Cardinality::Map { key } if !key.is_valid_map_key() => Err(SchemaError::InvalidMapKey {
            message_type: message.name().to_owned(),
            field: field.name().to_owned(),
            key,
        }),
        Cardinality::Singular | Cardinality::Repeated | Cardinality::Map { .. } => Ok(()),
    }
}

/// Validates a declared default: only singular scalar and enum fields may
/// carry one, and it must match the field's value type.
///
/// # Errors
///
/// Returns `SchemaError::DefaultNotAllowed` or
/// `SchemaError::DefaultTypeMismatch`.
pub fn validate_default(
    message: &MessageDescriptor,
    field: &FieldDescriptor,
    enums: &[EnumDescriptor],
) -> Result<(), SchemaError> {
    let Some(default) = field.declared_default() else {
        return Ok(());
    };

    if !field.is_singular() || field.field_type().is_message() {
        return Err(SchemaError::DefaultNotAllowed {
            message_type: message.name().to_owned(),
            field: field.name().to_owned(),
        });
    }

    let matches = match field.field_type() {
        FieldType::Scalar(kind) => kind.accepts(default),
        FieldType::Enum(name) => default.as_enum_number().is_some_and(|number| {
            enums
                .iter()
                .find(|e| e.name() == name)
                .is_some_and(|e| e.value_by_number(number).is_some())
        }),
        FieldType::Message(_) => false,
    };

    if matches {
        Ok(())
    } else {
        Err(SchemaError::DefaultTypeMismatch {
            message_type: message.name().to_owned(),
            field: field.name().to_owned(),
            expected: field.field_type().to_string(),
            actual: default.kind_name(),
        })
    }
}

/// Validates that every oneof group has at least one member.
///
/// # Errors
///
/// Returns `SchemaError::EmptyOneof` for each empty group unless the
/// configuration allows them.
pub fn validate_oneofs(message: &MessageDescriptor, config: &SchemaConfig) -> Result<(), SchemaError> {
    if config.allow_empty_oneofs {
        return Ok(());
    }
    let errors = message
        .oneofs()
        .iter()
        .filter(|oneof| oneof.is_empty())
        .map(|oneof| SchemaError::EmptyOneof {
            message_type: message.name().to_owned(),
            oneof: oneof.name().to_owned(),
        })
        .collect();
    finish(errors)
}
