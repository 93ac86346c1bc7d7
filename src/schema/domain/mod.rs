//! Descriptor types for the schema subsystem.
//!
//! Descriptors are plain data: they are assembled through builders, checked
//! once when a [`DescriptorPool`](crate::schema::DescriptorPool) is
//! finalised, and never mutated afterwards.

mod enum_type;
mod field;
mod message_type;
pub mod naming;
mod oneof;
mod scalar;

pub use enum_type::{EnumDescriptor, EnumValueDescriptor};
pub use field::{Cardinality, FieldDescriptor, FieldKind, FieldType};
pub use message_type::{MessageDescriptor, MessageDescriptorBuilder};
pub use naming::{AccessorNames, OneofAccessorNames};
pub use oneof::OneofDescriptor;
pub use scalar::ScalarKind;

pub(crate) use message_type::{is_identifier, is_type_name};
