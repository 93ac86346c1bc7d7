//! Message builders.

use super::{
    MapFieldMut, MapKey, MapView, Message, OneofCase, RepeatedFieldMut, RepeatedView, Value,
    store::FieldStore,
};
use crate::message::error::{MessageError, MessageResult, Operation};
use crate::schema::MessageType;

/// Mutable state for one message under construction.
///
/// Mutators return `&mut Self` so calls chain with `?`. A failed call
/// leaves the builder exactly as it was. [`build`](Self::build) snapshots
/// the current state and leaves the builder usable.
///
/// # Examples
///
/// ```
/// use protoform::message::domain::Value;
/// use protoform::schema::DescriptorPool;
/// use protoform::schema::domain::{FieldDescriptor, MessageDescriptor, ScalarKind};
///
/// let pool = DescriptorPool::builder()
///     .add_message(
///         MessageDescriptor::builder("Tagged")
///             .field(FieldDescriptor::scalar("name", 1, ScalarKind::String))
///             .field(FieldDescriptor::scalar("tags", 2, ScalarKind::String).repeated())
///             .build()
///             .expect("valid descriptor"),
///     )
///     .build()
///     .expect("valid pool");
/// let tagged = pool.message_type("Tagged").expect("declared type");
///
/// let mut builder = tagged.new_builder();
/// builder
///     .set("name", "abra")
///     .and_then(|b| b.add("tags", "x"))
///     .and_then(|b| b.add("tags", "y"))
///     .expect("valid values");
///
/// let err = builder.set("name", Value::Null).expect_err("null is rejected");
/// assert_eq!(err.to_string(), "Cannot set Tagged#name to null");
///
/// assert_eq!(builder.build().to_string(), "Tagged{name=abra, tags=[x, y]}");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageBuilder {
    message_type: MessageType,
    store: FieldStore,
}

impl MessageBuilder {
    /// Creates an empty builder for `message_type`.
    #[must_use]
    pub fn new(message_type: MessageType) -> Self {
        let store = FieldStore::empty(message_type.descriptor());
        Self::from_parts(message_type, store)
    }

    pub(crate) const fn from_parts(message_type: MessageType, store: FieldStore) -> Self {
        Self { message_type, store }
    }

    /// Returns the type under construction.
    #[must_use]
    pub const fn message_type(&self) -> &MessageType {
        &self.message_type
    }

    /// Sets a singular or oneof-member field.
    ///
    /// Setting a oneof member makes it the group's active member and
    /// discards the previous member's value.
    ///
    /// # Errors
    ///
    /// Returns `MessageError::NullValue` for [`Value::Null`],
    /// `MessageError::KindMismatch` for a value of the wrong type,
    /// `MessageError::UnknownEnumValue` for undeclared enum numbers, and
    /// `MessageError::NotApplicable` for repeated and map fields.
    pub fn set(&mut self, field: &str, value: impl Into<Value>) -> MessageResult<&mut Self> {
        self.store.set(&self.message_type, field, value.into())?;
        Ok(self)
    }

    /// Resets a field: singular fields become absent, repeated and map
    /// fields are emptied, and an active oneof member resets its group.
    ///
    /// # Errors
    ///
    /// Returns `MessageError::UnknownField` for undeclared names.
    pub fn clear(&mut self, field: &str) -> MessageResult<&mut Self> {
        self.store.clear(&self.message_type, field)?;
        Ok(self)
    }

    /// Appends one element to a repeated field.
    ///
    /// # Errors
    ///
    /// Returns `MessageError::NullValue` for a null element,
    /// `MessageError::KindMismatch` for an element of the wrong type, and
    /// `MessageError::NotApplicable` unless the field is repeated.
    pub fn add(&mut self, field: &str, value: impl Into<Value>) -> MessageResult<&mut Self> {
        self.store.add(&self.message_type, field, value.into())?;
        Ok(self)
    }

    /// Appends every element of `values`, or none if any is rejected.
    ///
    /// # Errors
    ///
    /// Returns `MessageError::NullValue` when `values` is `None` or holds a
    /// null element, and the errors of [`add`](Self::add) otherwise.
    pub fn add_all<I>(&mut self, field: &str, values: Option<I>) -> MessageResult<&mut Self>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let collected = values.map(|items| items.into_iter().map(Into::into).collect());
        self.store.add_all(&self.message_type, field, collected)?;
        Ok(self)
    }

    /// Inserts a map entry, overwriting an equal key.
    ///
    /// # Errors
    ///
    /// Returns `MessageError::NullValue` naming the map key or map value when
    /// either is null, `MessageError::KindMismatch` for a key or value of
    /// the wrong type, and `MessageError::NotApplicable` unless the field is
    /// a map.
    pub fn put(&mut self, field: &str, key: impl Into<Value>, value: impl Into<Value>) -> MessageResult<&mut Self> {
        self.store.put(&self.message_type, field, key.into(), value.into())?;
        Ok(self)
    }

    /// Inserts every entry of `entries`, or none if any is rejected.
    ///
    /// # Errors
    ///
    /// Returns `MessageError::NullValue` when `entries` is `None`, and the
    /// errors of [`put`](Self::put) for individual entries.
    pub fn put_all<I, K, V>(&mut self, field: &str, entries: Option<I>) -> MessageResult<&mut Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Value>,
        V: Into<Value>,
    {
        let collected = entries.map(|items| {
            items
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect()
        });
        self.store.put_all(&self.message_type, field, collected)?;
        Ok(self)
    }

    /// Removes a map entry, returning its value.
    ///
    /// # Errors
    ///
    /// Returns `MessageError::NotApplicable` unless the field is a map.
    pub fn remove(&mut self, field: &str, key: impl Into<MapKey>) -> MessageResult<Option<Value>> {
        self.store.remove(&self.message_type, field, &key.into())
    }

    /// Resets a oneof group to [`OneofCase::NotSet`].
    ///
    /// # Errors
    ///
    /// Returns `MessageError::UnknownOneof` for undeclared groups.
    pub fn clear_oneof(&mut self, group: &str) -> MessageResult<&mut Self> {
        self.store.clear_oneof(&self.message_type, group)?;
        Ok(self)
    }

    /// Edits an embedded-message field in place.
    ///
    /// `edit` receives a builder seeded with the field's current value (the
    /// nested default instance while absent); its result is stored back and
    /// marks the field present. If `edit` fails, nothing changes.
    ///
    /// # Errors
    ///
    /// Returns `MessageError::NotApplicable` unless the field is a singular
    /// embedded message, and any error `edit` returns.
    pub fn update_message<F>(&mut self, field: &str, edit: F) -> MessageResult<&mut Self>
    where
        F: FnOnce(&mut Self) -> MessageResult<()>,
    {
        let (_, descriptor) = self.message_type.resolve_field(field)?;
        if !descriptor.is_singular() || !descriptor.field_type().is_message() {
            return Err(MessageError::not_applicable(
                self.message_type.name(),
                descriptor.name(),
                Operation::UpdateMessage,
            ));
        }

        let current = self.store.get(&self.message_type, field)?;
        let Some(message) = current.as_message() else {
            return Err(MessageError::not_applicable(
                self.message_type.name(),
                field,
                Operation::UpdateMessage,
            ));
        };
        let mut nested = message.to_builder();
        edit(&mut nested)?;
        self.store.set(&self.message_type, field, Value::Message(nested.build()))?;
        Ok(self)
    }

    /// Merges a message of the same type into this builder.
    ///
    /// Present singular fields overwrite, embedded messages present on both
    /// sides merge recursively, repeated fields append, map entries
    /// overwrite per key, and an active oneof member becomes active here.
    ///
    /// # Errors
    ///
    /// Returns `MessageError::IncompatibleType` when `other` has a different
    /// type.
    pub fn merge_from(&mut self, other: &Message) -> MessageResult<&mut Self> {
        self.merge_store(other.message_type(), other.store())
    }

    /// Merges another builder's current state into this one.
    ///
    /// # Errors
    ///
    /// Returns `MessageError::IncompatibleType` when `other` has a different
    /// type.
    pub fn merge_from_builder(&mut self, other: &Self) -> MessageResult<&mut Self> {
        self.merge_store(&other.message_type, &other.store)
    }

    fn merge_store(&mut self, source_type: &MessageType, source: &FieldStore) -> MessageResult<&mut Self> {
        if *source_type != self.message_type {
            return Err(MessageError::IncompatibleType {
                expected: self.message_type.name().to_owned(),
                actual: source_type.name().to_owned(),
            });
        }
        self.store.merge_fields(source);
        tracing::trace!(message_type = %self.message_type, "merged into builder");
        Ok(self)
    }

    /// Snapshots the current state into an immutable message.
    #[must_use]
    pub fn build(&self) -> Message {
        tracing::trace!(message_type = %self.message_type, "message built");
        Message::from_parts(self.message_type.clone(), self.store.clone())
    }

    /// Returns whether a singular or oneof-member field is set.
    ///
    /// # Errors
    ///
    /// See [`Message::has`].
    pub fn has(&self, field: &str) -> MessageResult<bool> {
        self.store.has(&self.message_type, field)
    }

    /// Returns a singular field's value, or its default while absent.
    ///
    /// # Errors
    ///
    /// See [`Message::get`].
    pub fn get(&self, field: &str) -> MessageResult<Value> {
        self.store.get(&self.message_type, field)
    }

    /// Returns the element or entry count of a repeated or map field.
    ///
    /// # Errors
    ///
    /// See [`Message::count`].
    pub fn count(&self, field: &str) -> MessageResult<usize> {
        self.store.count(&self.message_type, field)
    }

    /// Returns a read-only view of a repeated field.
    ///
    /// # Errors
    ///
    /// See [`Message::repeated`].
    pub fn repeated(&self, field: &str) -> MessageResult<RepeatedView<'_>> {
        let (descriptor, values) = self.store.repeated(&self.message_type, field)?;
        Ok(RepeatedView::new(self.message_type.name(), descriptor.name(), values))
    }

    /// Returns one element of a repeated field.
    ///
    /// # Errors
    ///
    /// See [`Message::repeated_get`].
    pub fn repeated_get(&self, field: &str, index: usize) -> MessageResult<Option<&Value>> {
        let (_, values) = self.store.repeated(&self.message_type, field)?;
        Ok(values.get(index))
    }

    /// Returns a mutable handle to a repeated field.
    ///
    /// # Errors
    ///
    /// Returns `MessageError::NotApplicable` unless the field is repeated.
    pub fn repeated_mut(&mut self, field: &str) -> MessageResult<RepeatedFieldMut<'_>> {
        let (descriptor, values) = self.store.repeated_mut(&self.message_type, field)?;
        Ok(RepeatedFieldMut::new(&self.message_type, descriptor, values))
    }

    /// Returns a read-only view of a map field.
    ///
    /// # Errors
    ///
    /// See [`Message::map`].
    pub fn map(&self, field: &str) -> MessageResult<MapView<'_>> {
        let (descriptor, entries) = self.store.map(&self.message_type, field)?;
        Ok(MapView::new(self.message_type.name(), descriptor.name(), entries))
    }

    /// Looks up one map entry.
    ///
    /// # Errors
    ///
    /// See [`Message::map_get`].
    pub fn map_get(&self, field: &str, key: impl Into<MapKey>) -> MessageResult<Option<&Value>> {
        let (_, entries) = self.store.map(&self.message_type, field)?;
        Ok(entries.get(&key.into()))
    }

    /// Returns a mutable handle to a map field.
    ///
    /// # Errors
    ///
    /// Returns `MessageError::NotApplicable` unless the field is a map.
    pub fn map_mut(&mut self, field: &str) -> MessageResult<MapFieldMut<'_>> {
        let (descriptor, entries) = self.store.map_mut(&self.message_type, field)?;
        Ok(MapFieldMut::new(&self.message_type, descriptor, entries))
    }

    /// Returns which member of a oneof group is active.
    ///
    /// # Errors
    ///
    /// See [`Message::oneof_case`].
    pub fn oneof_case(&self, group: &str) -> MessageResult<OneofCase> {
        self.store.oneof_case(&self.message_type, group)
    }
}
