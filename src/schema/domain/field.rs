//! Field descriptors: the per-field metadata every other component reads.

use super::ScalarKind;
use crate::message::domain::Value;
use std::fmt;

/// The value type a field holds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// A scalar of the given kind.
    Scalar(ScalarKind),
    /// A value of the named enum.
    Enum(String),
    /// An embedded message of the named type.
    Message(String),
}

impl FieldType {
    /// Returns `true` when values of this type are references.
    #[must_use]
    pub const fn is_reference(&self) -> bool {
        match self {
            Self::Scalar(kind) => kind.is_reference(),
            Self::Enum(_) | Self::Message(_) => true,
        }
    }

    /// Returns the referenced type name for enum and message types.
    #[must_use]
    pub fn type_name(&self) -> Option<&str> {
        match self {
            Self::Scalar(_) => None,
            Self::Enum(name) | Self::Message(name) => Some(name),
        }
    }

    /// Returns `true` for embedded-message types.
    #[must_use]
    pub const fn is_message(&self) -> bool {
        matches!(self, Self::Message(_))
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(kind) => write!(f, "{kind}"),
            Self::Enum(name) => write!(f, "enum {name}"),
            Self::Message(name) => write!(f, "message {name}"),
        }
    }
}

/// How many values a field holds and how they are addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    /// At most one value, with explicit presence.
    Singular,
    /// An ordered sequence of values.
    Repeated,
    /// Values addressed by a scalar key.
    Map {
        /// The key kind.
        key: ScalarKind,
    },
}

/// The field classification used by presence and rendering rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// A singular scalar or enum field outside any oneof.
    Scalar,
    /// A singular embedded-message field outside any oneof.
    Message,
    /// A repeated scalar or enum field.
    RepeatedScalar,
    /// A repeated embedded-message field.
    RepeatedMessage,
    /// A map field.
    Map,
    /// A member of a oneof group.
    OneofMember,
}

impl FieldKind {
    /// Returns `true` if `has` is defined for fields of this kind.
    #[must_use]
    pub const fn tracks_presence(self) -> bool {
        matches!(self, Self::Scalar | Self::Message | Self::OneofMember)
    }
}

/// Metadata for one field of a message type.
///
/// Descriptors are assembled with the constructors and modifiers below and
/// are frozen once their owning [`MessageDescriptor`](super::MessageDescriptor)
/// is built.
///
/// # Examples
///
/// ```
/// use protoform::schema::domain::{FieldDescriptor, FieldKind, ScalarKind};
///
/// let tags = FieldDescriptor::scalar("tags", 4, ScalarKind::String).repeated();
/// assert_eq!(tags.kind(), FieldKind::RepeatedScalar);
///
/// let retries = FieldDescriptor::scalar("retries", 5, ScalarKind::Int32).with_default(3);
/// assert_eq!(retries.declared_default().and_then(|v| v.as_i32()), Some(3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: String,
    number: u32,
    field_type: FieldType,
    cardinality: Cardinality,
    default: Option<Value>,
    oneof: Option<usize>,
}

impl FieldDescriptor {
    /// Creates a singular field of the given type.
    #[must_use]
    pub fn new(name: impl Into<String>, number: u32, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            number,
            field_type,
            cardinality: Cardinality::Singular,
            default: None,
            oneof: None,
        }
    }

    /// Creates a singular scalar field.
    #[must_use]
    pub fn scalar(name: impl Into<String>, number: u32, kind: ScalarKind) -> Self {
        Self::new(name, number, FieldType::Scalar(kind))
    }

    /// Creates a singular field holding a value of the named enum.
    #[must_use]
    pub fn enumeration(name: impl Into<String>, number: u32, enum_type: impl Into<String>) -> Self {
        Self::new(name, number, FieldType::Enum(enum_type.into()))
    }

    /// Creates a singular embedded-message field of the named type.
    #[must_use]
    pub fn message(name: impl Into<String>, number: u32, message_type: impl Into<String>) -> Self {
        Self::new(name, number, FieldType::Message(message_type.into()))
    }

    /// Makes the field repeated.
    #[must_use]
    pub fn repeated(mut self) -> Self {
        self.cardinality = Cardinality::Repeated;
        self
    }

    /// Makes the field a map keyed by `key`; the field type becomes the
    /// map's value type.
    #[must_use]
    pub fn map(mut self, key: ScalarKind) -> Self {
        self.cardinality = Cardinality::Map { key };
        self
    }

    /// Declares a default value returned while the field is absent.
    #[must_use]
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub(crate) const fn assign_oneof(&mut self, oneof: usize) {
        self.oneof = Some(oneof);
    }

    /// Drops a group index carried over from another descriptor.
    pub(crate) const fn detach_oneof(&mut self) {
        self.oneof = None;
    }

    /// Returns the declared field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the field number.
    #[must_use]
    pub const fn number(&self) -> u32 {
        self.number
    }

    /// Returns the value type.
    #[must_use]
    pub const fn field_type(&self) -> &FieldType {
        &self.field_type
    }

    /// Returns the cardinality.
    #[must_use]
    pub const fn cardinality(&self) -> Cardinality {
        self.cardinality
    }

    /// Returns the declared default, if any.
    #[must_use]
    pub const fn declared_default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Returns the index of the owning oneof group, if any.
    #[must_use]
    pub const fn oneof_index(&self) -> Option<usize> {
        self.oneof
    }

    /// Returns the map key kind for map fields.
    #[must_use]
    pub const fn map_key_kind(&self) -> Option<ScalarKind> {
        match self.cardinality {
            Cardinality::Map { key } => Some(key),
            Cardinality::Singular | Cardinality::Repeated => None,
        }
    }

    /// Returns `true` for singular fields (including oneof members).
    #[must_use]
    pub const fn is_singular(&self) -> bool {
        matches!(self.cardinality, Cardinality::Singular)
    }

    /// Returns `true` for repeated fields.
    #[must_use]
    pub const fn is_repeated(&self) -> bool {
        matches!(self.cardinality, Cardinality::Repeated)
    }

    /// Returns `true` for map fields.
    #[must_use]
    pub const fn is_map(&self) -> bool {
        matches!(self.cardinality, Cardinality::Map { .. })
    }

    /// Returns the derived field kind.
    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        if self.oneof.is_some() {
            return FieldKind::OneofMember;
        }
        let message = self.field_type.is_message();
        match self.cardinality {
            Cardinality::Map { .. } => FieldKind::Map,
            Cardinality::Repeated if message => FieldKind::RepeatedMessage,
            Cardinality::Repeated => FieldKind::RepeatedScalar,
            Cardinality::Singular if message => FieldKind::Message,
            Cardinality::Singular => FieldKind::Scalar,
        }
    }
}
