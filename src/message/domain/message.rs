//! The immutable message view.

use super::{
    MapKey, MapView, MessageBuilder, OneofCase, RepeatedView, Value,
    store::FieldStore,
};
use crate::message::error::MessageResult;
use crate::schema::MessageType;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A finalised, read-only message.
///
/// Messages are produced by [`MessageBuilder::build`] and by the default
/// instance registry. They are cheap to clone (the field storage is shared)
/// and safe to send across threads.
///
/// # Invariants
///
/// - No operation on a message changes what it observes
/// - Collections are exposed only through read-only views
/// - Equality and hashing are structural and never depend on how the
///   message was built
///
/// # Examples
///
/// ```
/// use protoform::schema::DescriptorPool;
/// use protoform::schema::domain::{FieldDescriptor, MessageDescriptor, ScalarKind};
///
/// let pool = DescriptorPool::builder()
///     .add_message(
///         MessageDescriptor::builder("Point")
///             .field(FieldDescriptor::scalar("x", 1, ScalarKind::Int32))
///             .field(FieldDescriptor::scalar("y", 2, ScalarKind::Int32))
///             .build()
///             .expect("valid descriptor"),
///     )
///     .build()
///     .expect("valid pool");
/// let point = pool.message_type("Point").expect("declared type");
///
/// let mut builder = point.new_builder();
/// builder.set("x", 3).expect("int32 field");
/// let message = builder.build();
///
/// assert!(message.has("x").expect("known field"));
/// assert!(!message.has("y").expect("known field"));
/// assert_eq!(message.to_string(), "Point{x=3}");
/// ```
#[derive(Clone)]
pub struct Message {
    message_type: MessageType,
    store: Arc<FieldStore>,
}

impl Message {
    pub(crate) fn from_parts(message_type: MessageType, store: FieldStore) -> Self {
        Self::from_shared(message_type, Arc::new(store))
    }

    pub(crate) const fn from_shared(message_type: MessageType, store: Arc<FieldStore>) -> Self {
        Self { message_type, store }
    }

    pub(crate) fn store(&self) -> &FieldStore {
        &self.store
    }

    /// Returns the message's type.
    #[must_use]
    pub const fn message_type(&self) -> &MessageType {
        &self.message_type
    }

    /// Returns `true` if both messages share the same storage.
    ///
    /// Every absent embedded-message field of a type reads as the same
    /// default instance, which this makes observable.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.store, &other.store)
    }

    /// Returns a builder seeded with this message's content.
    #[must_use]
    pub fn to_builder(&self) -> MessageBuilder {
        MessageBuilder::from_parts(self.message_type.clone(), (*self.store).clone())
    }

    /// Returns a copy of `self` with `other` merged in.
    pub(crate) fn merged_with(&self, other: &Self) -> Self {
        let mut store = (*self.store).clone();
        store.merge_fields(&other.store);
        Self::from_parts(self.message_type.clone(), store)
    }

    /// Returns whether a singular or oneof-member field is set.
    ///
    /// # Errors
    ///
    /// Returns `MessageError::UnknownField` for undeclared names and
    /// `MessageError::NotApplicable` for repeated and map fields.
    pub fn has(&self, field: &str) -> MessageResult<bool> {
        self.store.has(&self.message_type, field)
    }

    /// Returns a singular field's value, or its default while absent.
    ///
    /// Absent embedded-message fields read as the nested type's default
    /// instance; non-active oneof members read as their default.
    ///
    /// # Errors
    ///
    /// Returns `MessageError::UnknownField` for undeclared names and
    /// `MessageError::NotApplicable` for repeated and map fields.
    pub fn get(&self, field: &str) -> MessageResult<Value> {
        self.store.get(&self.message_type, field)
    }

    /// Returns the element or entry count of a repeated or map field.
    ///
    /// # Errors
    ///
    /// Returns `MessageError::NotApplicable` for singular fields.
    pub fn count(&self, field: &str) -> MessageResult<usize> {
        self.store.count(&self.message_type, field)
    }

    /// Returns a read-only view of a repeated field.
    ///
    /// # Errors
    ///
    /// Returns `MessageError::NotApplicable` unless the field is repeated.
    pub fn repeated(&self, field: &str) -> MessageResult<RepeatedView<'_>> {
        let (descriptor, values) = self.store.repeated(&self.message_type, field)?;
        Ok(RepeatedView::new(self.message_type.name(), descriptor.name(), values))
    }

    /// Returns one element of a repeated field.
    ///
    /// # Errors
    ///
    /// Returns `MessageError::NotApplicable` unless the field is repeated.
    pub fn repeated_get(&self, field: &str, index: usize) -> MessageResult<Option<&Value>> {
        let (_, values) = self.store.repeated(&self.message_type, field)?;
        Ok(values.get(index))
    }

    /// Returns a read-only view of a map field.
    ///
    /// # Errors
    ///
    /// Returns `MessageError::NotApplicable` unless the field is a map.
    pub fn map(&self, field: &str) -> MessageResult<MapView<'_>> {
        let (descriptor, entries) = self.store.map(&self.message_type, field)?;
        Ok(MapView::new(self.message_type.name(), descriptor.name(), entries))
    }

    /// Looks up one map entry.
    ///
    /// # Errors
    ///
    /// Returns `MessageError::NotApplicable` unless the field is a map.
    pub fn map_get(&self, field: &str, key: impl Into<MapKey>) -> MessageResult<Option<&Value>> {
        let (_, entries) = self.store.map(&self.message_type, field)?;
        Ok(entries.get(&key.into()))
    }

    /// Returns which member of a oneof group is active.
    ///
    /// # Errors
    ///
    /// Returns `MessageError::UnknownOneof` for undeclared groups.
    pub fn oneof_case(&self, group: &str) -> MessageResult<OneofCase> {
        self.store.oneof_case(&self.message_type, group)
    }
}

impl PartialEq for Message {
    fn eq(&self, other: &Self) -> bool {
        self.message_type == other.message_type && (self.ptr_eq(other) || self.store == other.store)
    }
}

impl Eq for Message {}

impl Hash for Message {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.message_type.hash(state);
        self.store.hash(state);
    }
}
