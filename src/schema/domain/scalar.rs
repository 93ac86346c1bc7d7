//! Scalar value kinds a field can declare.

use crate::message::domain::{MapKey, Value};
use crate::schema::error::ParseScalarKindError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The scalar kinds a field may declare.
///
/// Several kinds share one in-memory representation; they differ only in
/// how an encoder would lay them out, which this runtime does not do.
///
/// # Examples
///
/// ```
/// use protoform::schema::domain::ScalarKind;
///
/// let kind = ScalarKind::try_from("sint32").expect("known kind");
/// assert_eq!(kind, ScalarKind::Sint32);
/// assert!(!kind.is_reference());
/// assert!(ScalarKind::String.is_reference());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarKind {
    /// 64-bit float.
    Double,
    /// 32-bit float.
    Float,
    /// Signed 32-bit integer.
    Int32,
    /// Signed 64-bit integer.
    Int64,
    /// Unsigned 32-bit integer.
    Uint32,
    /// Unsigned 64-bit integer.
    Uint64,
    /// Signed 32-bit integer, zigzag-encoded on the wire.
    Sint32,
    /// Signed 64-bit integer, zigzag-encoded on the wire.
    Sint64,
    /// Unsigned 32-bit integer, fixed width on the wire.
    Fixed32,
    /// Unsigned 64-bit integer, fixed width on the wire.
    Fixed64,
    /// Signed 32-bit integer, fixed width on the wire.
    Sfixed32,
    /// Signed 64-bit integer, fixed width on the wire.
    Sfixed64,
    /// Boolean.
    Bool,
    /// UTF-8 text.
    String,
    /// Arbitrary bytes.
    Bytes,
}

impl ScalarKind {
    /// Every scalar kind, in declaration order.
    pub const ALL: [Self; 15] = [
        Self::Double,
        Self::Float,
        Self::Int32,
        Self::Int64,
        Self::Uint32,
        Self::Uint64,
        Self::Sint32,
        Self::Sint64,
        Self::Fixed32,
        Self::Fixed64,
        Self::Sfixed32,
        Self::Sfixed64,
        Self::Bool,
        Self::String,
        Self::Bytes,
    ];

    /// Returns the schema keyword for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Double => "double",
            Self::Float => "float",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Sint32 => "sint32",
            Self::Sint64 => "sint64",
            Self::Fixed32 => "fixed32",
            Self::Fixed64 => "fixed64",
            Self::Sfixed32 => "sfixed32",
            Self::Sfixed64 => "sfixed64",
            Self::Bool => "bool",
            Self::String => "string",
            Self::Bytes => "bytes",
        }
    }

    /// Returns `true` for kinds whose values are references (and may
    /// therefore be null at a dynamic call site).
    #[must_use]
    pub const fn is_reference(self) -> bool {
        matches!(self, Self::String | Self::Bytes)
    }

    /// Returns `true` if this kind may key a map field.
    #[must_use]
    pub const fn is_valid_map_key(self) -> bool {
        !matches!(self, Self::Double | Self::Float | Self::Bytes)
    }

    /// Returns the zero value used when a field declares no default.
    #[must_use]
    pub const fn zero_value(self) -> Value {
        match self {
            Self::Double => Value::Double(0.0),
            Self::Float => Value::Float(0.0),
            Self::Int32 | Self::Sint32 | Self::Sfixed32 => Value::Int32(0),
            Self::Int64 | Self::Sint64 | Self::Sfixed64 => Value::Int64(0),
            Self::Uint32 | Self::Fixed32 => Value::UInt32(0),
            Self::Uint64 | Self::Fixed64 => Value::UInt64(0),
            Self::Bool => Value::Bool(false),
            Self::String => Value::String(String::new()),
            Self::Bytes => Value::Bytes(Vec::new()),
        }
    }

    /// Returns `true` if `value` has this kind's in-memory representation.
    #[must_use]
    pub const fn accepts(self, value: &Value) -> bool {
        matches!(
            (self, value),
            (Self::Double, Value::Double(_))
                | (Self::Float, Value::Float(_))
                | (
                    Self::Int32 | Self::Sint32 | Self::Sfixed32,
                    Value::Int32(_)
                )
                | (
                    Self::Int64 | Self::Sint64 | Self::Sfixed64,
                    Value::Int64(_)
                )
                | (Self::Uint32 | Self::Fixed32, Value::UInt32(_))
                | (Self::Uint64 | Self::Fixed64, Value::UInt64(_))
                | (Self::Bool, Value::Bool(_))
                | (Self::String, Value::String(_))
                | (Self::Bytes, Value::Bytes(_))
        )
    }

    /// Returns `true` if `key` has this kind's in-memory representation.
    #[must_use]
    pub const fn accepts_key(self, key: &MapKey) -> bool {
        matches!(
            (self, key),
            (
                Self::Int32 | Self::Sint32 | Self::Sfixed32,
                MapKey::Int32(_)
            ) | (
                Self::Int64 | Self::Sint64 | Self::Sfixed64,
                MapKey::Int64(_)
            ) | (Self::Uint32 | Self::Fixed32, MapKey::UInt32(_))
                | (Self::Uint64 | Self::Fixed64, MapKey::UInt64(_))
                | (Self::Bool, MapKey::Bool(_))
                | (Self::String, MapKey::String(_))
        )
    }
}

impl TryFrom<&str> for ScalarKind {
    type Error = ParseScalarKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| ParseScalarKindError(value.to_owned()))
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
