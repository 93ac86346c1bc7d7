//! The serialisable schema document a generator or parser emits.
//!
//! ```json
//! {
//!   "enums": [{ "name": "Color", "values": [{ "name": "RED", "number": 0 }] }],
//!   "messages": [{
//!     "name": "Shape",
//!     "fields": [
//!       { "name": "color", "number": 1, "type": "Color", "default": "RED" },
//!       { "name": "tags", "number": 2, "type": "string", "label": "repeated" },
//!       { "name": "attrs", "number": 3, "type": "int32", "key_type": "string" },
//!       { "name": "radius", "number": 4, "type": "double", "oneof": "dimensions" }
//!     ]
//!   }]
//! }
//! ```
//!
//! `type` is a scalar keyword or the name of an enum or message declared in
//! the same document. A `key_type` turns the field into a map whose values
//! have `type`.

use crate::message::domain::Value;
use crate::schema::{
    domain::{EnumDescriptor, FieldDescriptor, FieldType, MessageDescriptor, ScalarKind},
    error::{SchemaError, SourceError},
    pool::DescriptorPool,
    ports::SchemaConfig,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A complete schema: every enum and message type it declares.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SchemaDocument {
    /// Enum declarations.
    #[serde(default)]
    pub enums: Vec<EnumDocument>,
    /// Message declarations.
    #[serde(default)]
    pub messages: Vec<MessageDocument>,
}

/// One enum declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumDocument {
    /// The enum name.
    pub name: String,
    /// Values in declaration order; the first is the default.
    pub values: Vec<EnumValueDocument>,
}

/// One enum value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumValueDocument {
    /// The value name.
    pub name: String,
    /// The value number.
    pub number: i32,
}

/// One message declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageDocument {
    /// The message name.
    pub name: String,
    /// Fields in declaration order.
    #[serde(default)]
    pub fields: Vec<FieldDocument>,
    /// Oneof groups to declare up front, including ones with no members.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub oneofs: Vec<String>,
}

/// Whether a field holds one value or a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    /// At most one value.
    #[default]
    Optional,
    /// An ordered sequence.
    Repeated,
}

/// One field declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDocument {
    /// The field name.
    pub name: String,
    /// The field number.
    pub number: u32,
    /// Scalar keyword or declared type name.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Optional or repeated.
    #[serde(default)]
    pub label: Label,
    /// Present for map fields: the key kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_type: Option<ScalarKind>,
    /// The owning oneof group, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oneof: Option<String>,
    /// Declared default for singular scalar and enum fields. Enum defaults
    /// may be given as a value name or a number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
}

impl SchemaDocument {
    /// Parses a document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Malformed`] if the text is not a valid
    /// document.
    pub fn from_json(text: &str) -> Result<Self, SourceError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Converts the document into descriptors and finalises a pool.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] for defaults that cannot be converted to the
    /// field's type, for descriptor errors, and for every pool-level
    /// inconsistency.
    pub fn into_pool(self, config: SchemaConfig) -> Result<DescriptorPool, SchemaError> {
        let enum_docs: HashMap<&str, &EnumDocument> =
            self.enums.iter().map(|e| (e.name.as_str(), e)).collect();

        let mut errors = Vec::new();
        let mut messages = Vec::with_capacity(self.messages.len());
        for message in &self.messages {
            match message.to_descriptor(&enum_docs) {
                Ok(descriptor) => messages.push(descriptor),
                Err(error) => errors.push(error),
            }
        }
        if !errors.is_empty() {
            return Err(SchemaError::multiple(errors));
        }

        let enums = self.enums.iter().map(EnumDocument::to_descriptor);
        let builder = messages
            .into_iter()
            .fold(DescriptorPool::builder().with_config(config), |builder, descriptor| {
                builder.add_message(descriptor)
            });
        enums
            .fold(builder, |acc, descriptor| acc.add_enum(descriptor))
            .build()
    }
}

impl EnumDocument {
    fn to_descriptor(&self) -> EnumDescriptor {
        EnumDescriptor::new(
            self.name.as_str(),
            self.values.iter().map(|v| (v.name.as_str(), v.number)),
        )
    }
}

impl MessageDocument {
    fn to_descriptor(&self, enums: &HashMap<&str, &EnumDocument>) -> Result<MessageDescriptor, SchemaError> {
        let mut errors = Vec::new();
        let mut builder = self
            .oneofs
            .iter()
            .fold(MessageDescriptor::builder(self.name.as_str()), |acc, group| {
                acc.oneof(group.as_str())
            });

        for field in &self.fields {
            match field.to_descriptor(&self.name, enums) {
                Ok(descriptor) => {
                    builder = match &field.oneof {
                        Some(group) => builder.oneof_field(group.as_str(), descriptor),
                        None => builder.field(descriptor),
                    };
                }
                Err(error) => errors.push(error),
            }
        }

        match builder.build() {
            Ok(descriptor) if errors.is_empty() => Ok(descriptor),
            Ok(_) => Err(SchemaError::multiple(errors)),
            Err(error) => {
                errors.push(error);
                Err(SchemaError::multiple(errors))
            }
        }
    }
}

impl FieldDocument {
    fn field_type(&self, enums: &HashMap<&str, &EnumDocument>) -> FieldType {
        ScalarKind::try_from(self.type_name.as_str()).map_or_else(
            |_| {
                if enums.contains_key(self.type_name.as_str()) {
                    FieldType::Enum(self.type_name.clone())
                } else {
                    FieldType::Message(self.type_name.clone())
                }
            },
            FieldType::Scalar,
        )
    }

    fn to_descriptor(
        &self,
        message_type: &str,
        enums: &HashMap<&str, &EnumDocument>,
    ) -> Result<FieldDescriptor, SchemaError> {
        let field_type = self.field_type(enums);
        let mut descriptor = FieldDescriptor::new(self.name.as_str(), self.number, field_type.clone());
        descriptor = match (self.key_type, self.label) {
            (Some(_), Label::Repeated) => {
                return Err(SchemaError::RepeatedMapField {
                    message_type: message_type.to_owned(),
                    field: self.name.clone(),
                });
            }
            (Some(key), Label::Optional) => descriptor.map(key),
            (None, Label::Repeated) => descriptor.repeated(),
            (None, Label::Optional) => descriptor,
        };

        let Some(default) = &self.default else {
            return Ok(descriptor);
        };
        if !descriptor.is_singular() || field_type.is_message() {
            return Err(SchemaError::DefaultNotAllowed {
                message_type: message_type.to_owned(),
                field: self.name.clone(),
            });
        }

        convert_default(&field_type, default, enums)
            .map(|value| descriptor.with_default(value))
            .ok_or_else(|| SchemaError::DefaultTypeMismatch {
                message_type: message_type.to_owned(),
                field: self.name.clone(),
                expected: field_type.to_string(),
                actual: json_kind(default),
            })
    }
}

fn convert_default(
    field_type: &FieldType,
    default: &serde_json::Value,
    enums: &HashMap<&str, &EnumDocument>,
) -> Option<Value> {
    match field_type {
        FieldType::Scalar(kind) => convert_scalar(*kind, default),
        FieldType::Enum(name) => {
            let declared = enums.get(name.as_str())?;
            match default {
                serde_json::Value::String(value_name) => declared
                    .values
                    .iter()
                    .find(|v| &v.name == value_name)
                    .map(|v| Value::Enum(v.number)),
                serde_json::Value::Number(number) => number
                    .as_i64()
                    .and_then(|n| i32::try_from(n).ok())
                    .map(Value::Enum),
                _ => None,
            }
        }
        FieldType::Message(_) => None,
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "float defaults are written at double precision and narrowed like a float literal; \
              values beyond the float range are rejected"
)]
fn convert_scalar(kind: ScalarKind, default: &serde_json::Value) -> Option<Value> {
    let value = match kind {
        ScalarKind::Double => Value::Double(default.as_f64()?),
        ScalarKind::Float => {
            let wide = default.as_f64()?;
            let narrowed = wide as f32;
            if narrowed.is_infinite() && wide.is_finite() {
                return None;
            }
            Value::Float(narrowed)
        }
        ScalarKind::Int32 | ScalarKind::Sint32 | ScalarKind::Sfixed32 => {
            Value::Int32(i32::try_from(default.as_i64()?).ok()?)
        }
        ScalarKind::Int64 | ScalarKind::Sint64 | ScalarKind::Sfixed64 => Value::Int64(default.as_i64()?),
        ScalarKind::Uint32 | ScalarKind::Fixed32 => Value::UInt32(u32::try_from(default.as_u64()?).ok()?),
        ScalarKind::Uint64 | ScalarKind::Fixed64 => Value::UInt64(default.as_u64()?),
        ScalarKind::Bool => Value::Bool(default.as_bool()?),
        ScalarKind::String => Value::String(default.as_str()?.to_owned()),
        ScalarKind::Bytes => Value::Bytes(default.as_str()?.as_bytes().to_vec()),
    };
    Some(value)
}

const fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
