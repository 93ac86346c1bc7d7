//! Dynamic field values.

use super::Message;
use std::fmt;
use std::hash::{Hash, Hasher};

/// The content of one field, one repeated element, or one map value.
///
/// `Null` exists only to express an absent argument at the dynamic
/// surface; no field ever stores it.
///
/// Floating-point values compare and hash by bit pattern, so equality is
/// reflexive and agrees with hashing.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// An absent argument.
    #[default]
    Null,
    /// A `bool`.
    Bool(bool),
    /// A signed 32-bit integer (`int32`, `sint32`, `sfixed32`).
    Int32(i32),
    /// A signed 64-bit integer (`int64`, `sint64`, `sfixed64`).
    Int64(i64),
    /// An unsigned 32-bit integer (`uint32`, `fixed32`).
    UInt32(u32),
    /// An unsigned 64-bit integer (`uint64`, `fixed64`).
    UInt64(u64),
    /// A `float`.
    Float(f32),
    /// A `double`.
    Double(f64),
    /// A `string`.
    String(String),
    /// A `bytes` value.
    Bytes(Vec<u8>),
    /// An enum value, by number.
    Enum(i32),
    /// An embedded message.
    Message(Message),
}

impl Value {
    /// Returns `true` for [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the value as a `bool`.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as an `i32`.
    #[must_use]
    pub const fn as_i32(&self) -> Option<i32> {
        match self {
            Self::Int32(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as an `i64`.
    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int64(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as a `u32`.
    #[must_use]
    pub const fn as_u32(&self) -> Option<u32> {
        match self {
            Self::UInt32(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as a `u64`.
    #[must_use]
    pub const fn as_u64(&self) -> Option<u64> {
        match self {
            Self::UInt64(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as an `f32`.
    #[must_use]
    pub const fn as_f32(&self) -> Option<f32> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as an `f64`.
    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Double(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as a string slice.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the value as a byte slice.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the enum number.
    #[must_use]
    pub const fn as_enum_number(&self) -> Option<i32> {
        match self {
            Self::Enum(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the embedded message.
    #[must_use]
    pub const fn as_message(&self) -> Option<&Message> {
        match self {
            Self::Message(v) => Some(v),
            _ => None,
        }
    }

    /// Consumes the value, returning the string it holds.
    #[must_use]
    pub fn into_string(self) -> Option<String> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    /// Consumes the value, returning the message it holds.
    #[must_use]
    pub fn into_message(self) -> Option<Message> {
        match self {
            Self::Message(v) => Some(v),
            _ => None,
        }
    }

    /// Short name of the value's representation, used in error messages.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int32(_) => "int32",
            Self::Int64(_) => "int64",
            Self::UInt32(_) => "uint32",
            Self::UInt64(_) => "uint64",
            Self::Float(_) => "float",
            Self::Double(_) => "double",
            Self::String(_) => "string",
            Self::Bytes(_) => "bytes",
            Self::Enum(_) => "enum",
            Self::Message(_) => "message",
        }
    }

    const fn discriminant(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Bool(_) => 1,
            Self::Int32(_) => 2,
            Self::Int64(_) => 3,
            Self::UInt32(_) => 4,
            Self::UInt64(_) => 5,
            Self::Float(_) => 6,
            Self::Double(_) => 7,
            Self::String(_) => 8,
            Self::Bytes(_) => 9,
            Self::Enum(_) => 10,
            Self::Message(_) => 11,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int32(a), Self::Int32(b)) | (Self::Enum(a), Self::Enum(b)) => a == b,
            (Self::Int64(a), Self::Int64(b)) => a == b,
            (Self::UInt32(a), Self::UInt32(b)) => a == b,
            (Self::UInt64(a), Self::UInt64(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::Double(a), Self::Double(b)) => a.to_bits() == b.to_bits(),
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Bytes(a), Self::Bytes(b)) => a == b,
            (Self::Message(a), Self::Message(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.discriminant().hash(state);
        match self {
            Self::Null => {}
            Self::Bool(v) => v.hash(state),
            Self::Int32(v) | Self::Enum(v) => v.hash(state),
            Self::Int64(v) => v.hash(state),
            Self::UInt32(v) => v.hash(state),
            Self::UInt64(v) => v.hash(state),
            Self::Float(v) => v.to_bits().hash(state),
            Self::Double(v) => v.to_bits().hash(state),
            Self::String(v) => v.hash(state),
            Self::Bytes(v) => v.hash(state),
            Self::Message(v) => v.hash(state),
        }
    }
}

macro_rules! value_from {
    ($($source:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$source> for Value {
                fn from(value: $source) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

value_from! {
    bool => Bool,
    i32 => Int32,
    i64 => Int64,
    u32 => UInt32,
    u64 => UInt64,
    f32 => Float,
    f64 => Double,
    String => String,
    Vec<u8> => Bytes,
    Message => Message,
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Self::Bytes(value.to_vec())
    }
}

impl From<&Message> for Value {
    fn from(value: &Message) -> Self {
        Self::Message(value.clone())
    }
}

impl From<MapKey> for Value {
    fn from(key: MapKey) -> Self {
        key.into_value()
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// A map key.
///
/// Keys order naturally (numerically, or lexicographically for strings),
/// which is the order map entries render in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MapKey {
    /// A `bool` key.
    Bool(bool),
    /// A signed 32-bit key.
    Int32(i32),
    /// A signed 64-bit key.
    Int64(i64),
    /// An unsigned 32-bit key.
    UInt32(u32),
    /// An unsigned 64-bit key.
    UInt64(u64),
    /// A string key.
    String(String),
}

impl MapKey {
    /// Converts the key into the equivalent [`Value`].
    #[must_use]
    pub fn into_value(self) -> Value {
        match self {
            Self::Bool(v) => Value::Bool(v),
            Self::Int32(v) => Value::Int32(v),
            Self::Int64(v) => Value::Int64(v),
            Self::UInt32(v) => Value::UInt32(v),
            Self::UInt64(v) => Value::UInt64(v),
            Self::String(v) => Value::String(v),
        }
    }

    /// Short name of the key's representation.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int32(_) => "int32",
            Self::Int64(_) => "int64",
            Self::UInt32(_) => "uint32",
            Self::UInt64(_) => "uint64",
            Self::String(_) => "string",
        }
    }
}

/// Error returned when a [`Value`] cannot key a map.
///
/// Carries the rejected value back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotAKey(pub Value);

impl TryFrom<Value> for MapKey {
    type Error = NotAKey;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Bool(v) => Ok(Self::Bool(v)),
            Value::Int32(v) => Ok(Self::Int32(v)),
            Value::Int64(v) => Ok(Self::Int64(v)),
            Value::UInt32(v) => Ok(Self::UInt32(v)),
            Value::UInt64(v) => Ok(Self::UInt64(v)),
            Value::String(v) => Ok(Self::String(v)),
            other => Err(NotAKey(other)),
        }
    }
}

macro_rules! key_from {
    ($($source:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$source> for MapKey {
                fn from(value: $source) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

key_from! {
    bool => Bool,
    i32 => Int32,
    i64 => Int64,
    u32 => UInt32,
    u64 => UInt64,
    String => String,
}

impl From<&str> for MapKey {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl fmt::Display for MapKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int32(v) => write!(f, "{v}"),
            Self::Int64(v) => write!(f, "{v}"),
            Self::UInt32(v) => write!(f, "{v}"),
            Self::UInt64(v) => write!(f, "{v}"),
            Self::String(v) => f.write_str(v),
        }
    }
}
