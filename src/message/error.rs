//! Runtime error types for builders, messages, and containers.
//!
//! Every failed mutation leaves the builder exactly as it was before the
//! call; errors name the field as `Type#field`.

use std::fmt;
use thiserror::Error;

/// Result type for builder and message operations.
pub type MessageResult<T> = Result<T, MessageError>;

/// Where a rejected null appeared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NullPosition {
    /// The value argument (or a `None` collection argument).
    Value,
    /// A map key.
    MapKey,
    /// A map value.
    MapValue,
}

impl NullPosition {
    const fn suffix(self) -> &'static str {
        match self {
            Self::Value => " to null",
            Self::MapKey => " - map key is null",
            Self::MapValue => " - map value is null",
        }
    }
}

/// A null value was supplied where the runtime requires a value.
///
/// # Examples
///
/// ```
/// use protoform::message::error::{NullPosition, NullValueError};
///
/// let err = NullValueError::new("TestMap", "mapBoolBool", NullPosition::MapKey);
/// assert_eq!(err.to_string(), "Cannot set TestMap#mapBoolBool - map key is null");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Cannot set {message_type}#{field}{}", .position.suffix())]
pub struct NullValueError {
    message_type: String,
    field: String,
    position: NullPosition,
}

impl NullValueError {
    /// Creates the error.
    #[must_use]
    pub fn new(message_type: impl Into<String>, field: impl Into<String>, position: NullPosition) -> Self {
        Self {
            message_type: message_type.into(),
            field: field.into(),
            position,
        }
    }

    /// Returns the message type name.
    #[must_use]
    pub fn message_type(&self) -> &str {
        &self.message_type
    }

    /// Returns the field name.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Returns where the null appeared.
    #[must_use]
    pub const fn position(&self) -> NullPosition {
        self.position
    }
}

/// A read-only container exposed by a message was asked to mutate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message_type}#{field} is read-only on a built message")]
pub struct ImmutableContainerError {
    message_type: String,
    field: String,
}

impl ImmutableContainerError {
    /// Creates the error.
    #[must_use]
    pub fn new(message_type: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            message_type: message_type.into(),
            field: field.into(),
        }
    }

    /// Returns the message type name.
    #[must_use]
    pub fn message_type(&self) -> &str {
        &self.message_type
    }

    /// Returns the field name.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }
}

/// Field-level operations, named in [`MessageError::NotApplicable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Presence test.
    Has,
    /// Singular read.
    Get,
    /// Singular set.
    Set,
    /// Repeated append.
    Add,
    /// Map insert.
    Put,
    /// Map removal.
    Remove,
    /// Element or entry count.
    Count,
    /// Repeated element access.
    Repeated,
    /// Map access.
    Map,
    /// In-place edit of an embedded message.
    UpdateMessage,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Has => "has",
            Self::Get => "get",
            Self::Set => "set",
            Self::Add => "add",
            Self::Put => "put",
            Self::Remove => "remove",
            Self::Count => "count",
            Self::Repeated => "repeated access",
            Self::Map => "map access",
            Self::UpdateMessage => "update_message",
        })
    }
}

/// Errors raised by builders, messages, and their containers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageError {
    /// A null argument was rejected.
    #[error(transparent)]
    NullValue(#[from] NullValueError),

    /// A read-only container was asked to mutate.
    #[error(transparent)]
    ImmutableContainer(#[from] ImmutableContainerError),

    /// The message type has no field of that name.
    #[error("{message_type} has no field '{field}'")]
    UnknownField {
        /// The message type.
        message_type: String,
        /// The requested field name.
        field: String,
    },

    /// The message type has no oneof group of that name.
    #[error("{message_type} has no oneof '{oneof}'")]
    UnknownOneof {
        /// The message type.
        message_type: String,
        /// The requested group name.
        oneof: String,
    },

    /// A value of the wrong representation was supplied.
    #[error("{message_type}#{field} expects {expected}, got {actual}")]
    KindMismatch {
        /// The message type.
        message_type: String,
        /// The field.
        field: String,
        /// The field's value type.
        expected: String,
        /// The supplied representation.
        actual: &'static str,
    },

    /// An enum number is not declared by the field's enum.
    #[error("{message_type}#{field}: {number} is not a value of enum {enum_type}")]
    UnknownEnumValue {
        /// The message type.
        message_type: String,
        /// The field.
        field: String,
        /// The field's enum.
        enum_type: String,
        /// The rejected number.
        number: i32,
    },

    /// The operation is not defined for the field's shape.
    #[error("{operation} is not applicable to {message_type}#{field}")]
    NotApplicable {
        /// The message type.
        message_type: String,
        /// The field.
        field: String,
        /// The rejected operation.
        operation: Operation,
    },

    /// A repeated-field position past the last element.
    #[error("{message_type}#{field}: index {index} is out of bounds for length {len}")]
    IndexOutOfBounds {
        /// The message type.
        message_type: String,
        /// The field.
        field: String,
        /// The requested position.
        index: usize,
        /// The element count at the time of the call.
        len: usize,
    },

    /// A message of another type was merged in.
    #[error("cannot merge {actual} into {expected}")]
    IncompatibleType {
        /// The destination type.
        expected: String,
        /// The source type.
        actual: String,
    },
}

impl MessageError {
    /// Creates a null-value error for the value argument.
    #[must_use]
    pub fn null_value(message_type: impl Into<String>, field: impl Into<String>) -> Self {
        Self::NullValue(NullValueError::new(message_type, field, NullPosition::Value))
    }

    /// Creates a not-applicable error.
    #[must_use]
    pub fn not_applicable(message_type: impl Into<String>, field: impl Into<String>, operation: Operation) -> Self {
        Self::NotApplicable {
            message_type: message_type.into(),
            field: field.into(),
            operation,
        }
    }
}
