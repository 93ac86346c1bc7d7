//! Message descriptors and their builder.

use super::{FieldDescriptor, OneofDescriptor};
use crate::schema::error::{SchemaError, SchemaResult};
use std::collections::HashMap;

/// The ordered fields and oneof groups of one message type.
///
/// # Invariants
///
/// - Field names and numbers are unique within the message
/// - Every oneof member is a singular field belonging to exactly one group
/// - Field order is declaration order, which drives rendering and hashing
///
/// # Examples
///
/// ```
/// use protoform::schema::domain::{FieldDescriptor, MessageDescriptor, ScalarKind};
///
/// let descriptor = MessageDescriptor::builder("Ping")
///     .field(FieldDescriptor::scalar("seq", 1, ScalarKind::Uint64))
///     .oneof_field("payload", FieldDescriptor::scalar("text", 2, ScalarKind::String))
///     .oneof_field("payload", FieldDescriptor::scalar("blob", 3, ScalarKind::Bytes))
///     .build()
///     .expect("valid descriptor");
///
/// assert_eq!(descriptor.fields().len(), 3);
/// assert_eq!(descriptor.oneofs().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDescriptor {
    name: String,
    fields: Vec<FieldDescriptor>,
    oneofs: Vec<OneofDescriptor>,
    by_name: HashMap<String, usize>,
    by_number: HashMap<u32, usize>,
}

impl MessageDescriptor {
    /// Starts a descriptor for the named message type.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> MessageDescriptorBuilder {
        MessageDescriptorBuilder::new(name)
    }

    /// Returns the type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Returns the field at `index`.
    #[must_use]
    pub fn field(&self, index: usize) -> Option<&FieldDescriptor> {
        self.fields.get(index)
    }

    /// Looks up a field and its index by declared name.
    #[must_use]
    pub fn field_by_name(&self, name: &str) -> Option<(usize, &FieldDescriptor)> {
        let index = *self.by_name.get(name)?;
        self.fields.get(index).map(|field| (index, field))
    }

    /// Looks up a field and its index by number.
    #[must_use]
    pub fn field_by_number(&self, number: u32) -> Option<(usize, &FieldDescriptor)> {
        let index = *self.by_number.get(&number)?;
        self.fields.get(index).map(|field| (index, field))
    }

    /// Returns the oneof groups in declaration order.
    #[must_use]
    pub fn oneofs(&self) -> &[OneofDescriptor] {
        &self.oneofs
    }

    /// Looks up a oneof group and its index by name.
    #[must_use]
    pub fn oneof_by_name(&self, name: &str) -> Option<(usize, &OneofDescriptor)> {
        self.oneofs
            .iter()
            .enumerate()
            .find(|(_, oneof)| oneof.name() == name)
    }
}

/// Builder collecting fields in declaration order.
#[derive(Debug)]
pub struct MessageDescriptorBuilder {
    name: String,
    fields: Vec<FieldDescriptor>,
    oneofs: Vec<OneofDescriptor>,
}

impl MessageDescriptorBuilder {
    /// Creates an empty builder for the named type.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            oneofs: Vec::new(),
        }
    }

    /// Appends a field outside any oneof group.
    ///
    /// A field cloned from another descriptor's oneof group loses its
    /// membership; use [`oneof_field`](Self::oneof_field) to place it in a
    /// group of this type.
    #[must_use]
    pub fn field(mut self, mut field: FieldDescriptor) -> Self {
        field.detach_oneof();
        self.fields.push(field);
        self
    }

    /// Appends multiple fields outside any oneof group.
    #[must_use]
    pub fn fields(self, fields: impl IntoIterator<Item = FieldDescriptor>) -> Self {
        fields.into_iter().fold(self, Self::field)
    }

    /// Declares a oneof group without adding members.
    ///
    /// Groups are otherwise created on first use by
    /// [`oneof_field`](Self::oneof_field).
    #[must_use]
    pub fn oneof(mut self, group: impl Into<String>) -> Self {
        self.group_index(group.into());
        self
    }

    /// Appends a field as a member of the named oneof group.
    #[must_use]
    pub fn oneof_field(mut self, group: impl Into<String>, mut field: FieldDescriptor) -> Self {
        let group_index = self.group_index(group.into());
        let field_index = self.fields.len();
        field.assign_oneof(group_index);
        if let Some(oneof) = self.oneofs.get_mut(group_index) {
            oneof.push_member(field_index);
        }
        self.fields.push(field);
        self
    }

    fn group_index(&mut self, group: String) -> usize {
        if let Some(index) = self.oneofs.iter().position(|oneof| oneof.name() == group) {
            return index;
        }
        self.oneofs.push(OneofDescriptor::new(group));
        self.oneofs.len() - 1
    }

    /// Finalises the descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] (combined with [`SchemaError::multiple`]) for
    /// invalid names, duplicate field names or numbers, and repeated or map
    /// fields placed inside a oneof group.
    pub fn build(self) -> SchemaResult<MessageDescriptor> {
        let mut errors = Vec::new();

        if !is_type_name(&self.name) {
            errors.push(SchemaError::invalid_name("message type", &self.name));
        }

        let mut by_name = HashMap::with_capacity(self.fields.len());
        let mut by_number: HashMap<u32, usize> = HashMap::with_capacity(self.fields.len());

        for (index, field) in self.fields.iter().enumerate() {
            if !is_identifier(field.name()) {
                errors.push(SchemaError::invalid_name("field", field.name()));
            }
            if by_name.insert(field.name().to_owned(), index).is_some() {
                errors.push(SchemaError::DuplicateFieldName {
                    message_type: self.name.clone(),
                    field: field.name().to_owned(),
                });
            }
            if let Some(first) = by_number.get(&field.number()).copied() {
                let first_name = self.fields.get(first).map_or("", FieldDescriptor::name);
                errors.push(SchemaError::DuplicateFieldNumber {
                    message_type: self.name.clone(),
                    number: field.number(),
                    first: first_name.to_owned(),
                    second: field.name().to_owned(),
                });
            } else {
                by_number.insert(field.number(), index);
            }
            if field.oneof_index().is_some() && !field.is_singular() {
                errors.push(SchemaError::InvalidOneofMember {
                    message_type: self.name.clone(),
                    field: field.name().to_owned(),
                });
            }
        }

        for oneof in &self.oneofs {
            if !is_identifier(oneof.name()) {
                errors.push(SchemaError::invalid_name("oneof", oneof.name()));
            }
        }

        if !errors.is_empty() {
            return Err(SchemaError::multiple(errors));
        }

        Ok(MessageDescriptor {
            name: self.name,
            fields: self.fields,
            oneofs: self.oneofs,
            by_name,
            by_number,
        })
    }
}

/// Returns `true` for ASCII identifiers: a letter or `_` followed by
/// letters, digits, or `_`.
pub(crate) fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Returns `true` for dotted type names whose segments are identifiers.
pub(crate) fn is_type_name(name: &str) -> bool {
    !name.is_empty() && name.split('.').all(is_identifier)
}
