//! Error types for descriptor construction and schema intake.
//!
//! Every inconsistency in a type model is reported while descriptors and
//! pools are finalised, never deferred to builder or message use.

use super::domain::ScalarKind;
use std::sync::Arc;
use thiserror::Error;

/// Result type for descriptor and pool construction.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors raised while finalising message, enum, or pool descriptors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A type, field, or oneof name is empty or not an identifier.
    #[error("invalid {what} name '{name}'")]
    InvalidName {
        /// What kind of declaration carried the name.
        what: &'static str,
        /// The rejected name.
        name: String,
    },

    /// Two types in one pool share a name.
    #[error("duplicate type name '{0}'")]
    DuplicateTypeName(String),

    /// Two fields of one message share a name.
    #[error("duplicate field name '{field}' in {message_type}")]
    DuplicateFieldName {
        /// The owning message type.
        message_type: String,
        /// The repeated field name.
        field: String,
    },

    /// Two fields of one message share a number.
    #[error("duplicate field number {number} in {message_type} ('{first}' and '{second}')")]
    DuplicateFieldNumber {
        /// The owning message type.
        message_type: String,
        /// The repeated field number.
        number: u32,
        /// The field that declared the number first.
        first: String,
        /// The field that declared it again.
        second: String,
    },

    /// A field number is zero or above the configured maximum.
    #[error("{message_type}#{field} has number {number}, outside 1..={max}")]
    FieldNumberOutOfRange {
        /// The owning message type.
        message_type: String,
        /// The offending field.
        field: String,
        /// The declared number.
        number: u32,
        /// The configured upper bound.
        max: u32,
    },

    /// A field number falls into the reserved implementation range.
    #[error("{message_type}#{field} uses reserved number {number}")]
    ReservedFieldNumber {
        /// The owning message type.
        message_type: String,
        /// The offending field.
        field: String,
        /// The declared number.
        number: u32,
    },

    /// A field refers to a type the pool does not define.
    #[error("{message_type}#{field} references unknown type '{type_name}'")]
    UnknownType {
        /// The owning message type.
        message_type: String,
        /// The offending field.
        field: String,
        /// The unresolved type name.
        type_name: String,
    },

    /// A field refers to a type of the wrong kind (an enum where a message
    /// is expected, or the reverse).
    #[error("{message_type}#{field} expects {expected} '{type_name}', which is not one")]
    WrongTypeKind {
        /// The owning message type.
        message_type: String,
        /// The offending field.
        field: String,
        /// The referenced type name.
        type_name: String,
        /// `"a message"` or `"an enum"`.
        expected: &'static str,
    },

    /// A map field declares a key kind that cannot key a map.
    #[error("{message_type}#{field} cannot use {key} as a map key")]
    InvalidMapKey {
        /// The owning message type.
        message_type: String,
        /// The offending field.
        field: String,
        /// The rejected key kind.
        key: ScalarKind,
    },

    /// A document field is labelled repeated and also declares a map key.
    #[error("{message_type}#{field} declares a map key and the repeated label")]
    RepeatedMapField {
        /// The owning message type.
        message_type: String,
        /// The offending field.
        field: String,
    },

    /// A repeated or map field was placed inside a oneof group.
    #[error("oneof member {message_type}#{field} must be a singular field")]
    InvalidOneofMember {
        /// The owning message type.
        message_type: String,
        /// The offending field.
        field: String,
    },

    /// A oneof group declares no members.
    #[error("oneof {message_type}.{oneof} declares no members")]
    EmptyOneof {
        /// The owning message type.
        message_type: String,
        /// The empty group.
        oneof: String,
    },

    /// A default was declared on a field that cannot carry one.
    #[error("{message_type}#{field} cannot declare a default value")]
    DefaultNotAllowed {
        /// The owning message type.
        message_type: String,
        /// The offending field.
        field: String,
    },

    /// A declared default does not match the field's value type.
    #[error("default for {message_type}#{field} must be {expected}, got {actual}")]
    DefaultTypeMismatch {
        /// The owning message type.
        message_type: String,
        /// The offending field.
        field: String,
        /// Description of the field's value type.
        expected: String,
        /// Kind of the declared default.
        actual: &'static str,
    },

    /// An enum declares no values.
    #[error("enum {0} declares no values")]
    EmptyEnum(String),

    /// An enum declares the same number twice.
    #[error("enum {enum_type} declares number {number} more than once")]
    DuplicateEnumNumber {
        /// The enum type.
        enum_type: String,
        /// The repeated number.
        number: i32,
    },

    /// An enum declares the same value name twice.
    #[error("enum {enum_type} declares value '{value}' more than once")]
    DuplicateEnumValue {
        /// The enum type.
        enum_type: String,
        /// The repeated value name.
        value: String,
    },

    /// Several schema errors were found in one pass.
    #[error("{} schema errors: {}", .0.len(), format_errors(.0))]
    Multiple(Vec<Self>),
}

fn format_errors(errors: &[SchemaError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl SchemaError {
    /// Creates an invalid-name error.
    #[must_use]
    pub fn invalid_name(what: &'static str, name: impl Into<String>) -> Self {
        Self::InvalidName {
            what,
            name: name.into(),
        }
    }

    /// Combines errors found in one validation pass.
    ///
    /// A single error is returned unwrapped. Nested `Multiple` values are
    /// flattened so callers always see one level.
    #[must_use]
    pub fn multiple(errors: Vec<Self>) -> Self {
        let mut flat = Vec::with_capacity(errors.len());
        for error in errors {
            match error {
                Self::Multiple(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        if flat.len() == 1 {
            if let Some(only) = flat.pop() {
                return only;
            }
        }
        Self::Multiple(flat)
    }

    /// Returns the individual errors, whether or not they were combined.
    #[must_use]
    pub fn errors(&self) -> &[Self] {
        match self {
            Self::Multiple(errors) => errors,
            single => std::slice::from_ref(single),
        }
    }
}

/// Error returned when a scalar kind keyword is not recognised.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown scalar kind: {0}")]
pub struct ParseScalarKindError(pub String);

/// Errors raised while loading a schema document from a source.
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    /// The document could not be parsed.
    #[error("malformed schema document: {0}")]
    Malformed(Arc<serde_json::Error>),

    /// The document parsed but describes an inconsistent schema.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(Arc::new(err))
    }
}
