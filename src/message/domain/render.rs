//! Deterministic text rendering for messages.
//!
//! `Type{a=1, b=[x, y], c={k1=v1, k2=v2}}`: set fields only, declaration
//! order, map entries by ascending key. The same content always renders the
//! same text regardless of the order it was built in.

use super::{Message, Value, store::Present};
use crate::schema::{MessageType, domain::FieldDescriptor};
use std::fmt::{self, Write as _};

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message_type = self.message_type();
        write!(f, "{}{{", message_type.name())?;
        for (position, (field, present)) in self.store().present(message_type.descriptor()).into_iter().enumerate() {
            if position > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}=", field.name())?;
            match present {
                Present::Single(value) => write_value(f, message_type, field, value)?,
                Present::Repeated(values) => {
                    f.write_char('[')?;
                    for (i, value) in values.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write_value(f, message_type, field, value)?;
                    }
                    f.write_char(']')?;
                }
                Present::Map(entries) => {
                    f.write_char('{')?;
                    for (i, (key, value)) in entries.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{key}=")?;
                        write_value(f, message_type, field, value)?;
                    }
                    f.write_char('}')?;
                }
            }
        }
        f.write_char('}')
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

fn write_value(
    f: &mut fmt::Formatter<'_>,
    message_type: &MessageType,
    field: &FieldDescriptor,
    value: &Value,
) -> fmt::Result {
    match value {
        Value::Null => f.write_str("null"),
        Value::Bool(v) => write!(f, "{v}"),
        Value::Int32(v) => write!(f, "{v}"),
        Value::Int64(v) => write!(f, "{v}"),
        Value::UInt32(v) => write!(f, "{v}"),
        Value::UInt64(v) => write!(f, "{v}"),
        Value::Float(v) => write!(f, "{v:?}"),
        Value::Double(v) => write!(f, "{v:?}"),
        Value::String(v) => f.write_str(v),
        Value::Bytes(bytes) => {
            f.write_str("0x")?;
            bytes.iter().try_for_each(|byte| write!(f, "{byte:02x}"))
        }
        Value::Enum(number) => match message_type
            .field_enum(field)
            .and_then(|declared| declared.value_by_number(*number))
        {
            Some(declared) => f.write_str(declared.name()),
            None => write!(f, "{number}"),
        },
        Value::Message(nested) => write!(f, "{nested}"),
    }
}
