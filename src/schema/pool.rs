//! Descriptor pools and the type handles resolved from them.
//!
//! A pool is the validated, immutable set of message and enum types of one
//! schema. Handles ([`MessageType`], [`EnumType`]) are cheap to clone and
//! keep their pool alive.

use crate::message::{
    domain::{Message, MessageBuilder},
    error::{MessageError, MessageResult},
    registry::DefaultInstanceRegistry,
};
use crate::schema::{
    domain::{EnumDescriptor, FieldDescriptor, FieldType, MessageDescriptor, OneofDescriptor},
    error::{SchemaError, SourceError},
    ports::{SchemaConfig, SchemaSource, SchemaValidator},
    validation::DefaultSchemaValidator,
};
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

#[derive(Debug, Clone, Copy)]
enum TypeEntry {
    Message(usize),
    Enum(usize),
}

#[derive(Debug)]
struct PoolInner {
    messages: Vec<Arc<MessageDescriptor>>,
    enums: Vec<Arc<EnumDescriptor>>,
    names: HashMap<String, TypeEntry>,
    defaults: DefaultInstanceRegistry,
}

/// The validated type model of one schema.
///
/// # Examples
///
/// ```
/// use protoform::schema::DescriptorPool;
/// use protoform::schema::domain::{FieldDescriptor, MessageDescriptor, ScalarKind};
///
/// let pool = DescriptorPool::builder()
///     .add_message(
///         MessageDescriptor::builder("Ping")
///             .field(FieldDescriptor::scalar("seq", 1, ScalarKind::Int64))
///             .build()
///             .expect("valid descriptor"),
///     )
///     .build()
///     .expect("valid pool");
///
/// let ping = pool.message_type("Ping").expect("declared type");
/// assert_eq!(ping.name(), "Ping");
/// assert!(ping.default_instance().ptr_eq(&ping.default_instance()));
/// ```
#[derive(Clone)]
pub struct DescriptorPool {
    inner: Arc<PoolInner>,
}

impl DescriptorPool {
    /// Starts an empty pool with the default [`SchemaConfig`].
    #[must_use]
    pub fn builder() -> DescriptorPoolBuilder {
        DescriptorPoolBuilder::default()
    }

    /// Loads a schema document from `source` and finalises it.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Malformed`] if the document cannot be parsed
    /// and [`SourceError::Schema`] if it describes an inconsistent schema.
    pub fn from_source(source: &impl SchemaSource, config: SchemaConfig) -> Result<Self, SourceError> {
        let document = source.load()?;
        Ok(document.into_pool(config)?)
    }

    /// Resolves a message type by name.
    #[must_use]
    pub fn message_type(&self, name: &str) -> Option<MessageType> {
        match self.inner.names.get(name) {
            Some(TypeEntry::Message(index)) => self.message_at(*index),
            Some(TypeEntry::Enum(_)) | None => None,
        }
    }

    /// Resolves an enum type by name.
    #[must_use]
    pub fn enum_type(&self, name: &str) -> Option<EnumType> {
        match self.inner.names.get(name) {
            Some(TypeEntry::Enum(index)) => self.inner.enums.get(*index).map(|descriptor| EnumType {
                pool: self.clone(),
                descriptor: Arc::clone(descriptor),
            }),
            Some(TypeEntry::Message(_)) | None => None,
        }
    }

    /// Returns every message type in declaration order.
    #[must_use]
    pub fn message_types(&self) -> Vec<MessageType> {
        (0..self.inner.messages.len())
            .filter_map(|index| self.message_at(index))
            .collect()
    }

    /// Returns every enum descriptor in declaration order.
    pub fn enums(&self) -> impl Iterator<Item = &EnumDescriptor> {
        self.inner.enums.iter().map(AsRef::as_ref)
    }

    /// Returns the registry holding this pool's default instances.
    #[must_use]
    pub fn default_instances(&self) -> &DefaultInstanceRegistry {
        &self.inner.defaults
    }

    /// Returns `true` if both handles refer to the same pool.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn enum_descriptor(&self, name: &str) -> Option<&EnumDescriptor> {
        match self.inner.names.get(name) {
            Some(TypeEntry::Enum(index)) => self.inner.enums.get(*index).map(AsRef::as_ref),
            Some(TypeEntry::Message(_)) | None => None,
        }
    }

    fn message_at(&self, index: usize) -> Option<MessageType> {
        self.inner.messages.get(index).map(|descriptor| MessageType {
            pool: self.clone(),
            index,
            descriptor: Arc::clone(descriptor),
        })
    }
}

impl fmt::Debug for DescriptorPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DescriptorPool")
            .field("messages", &self.inner.messages.len())
            .field("enums", &self.inner.enums.len())
            .finish_non_exhaustive()
    }
}

/// Builder collecting descriptors for a [`DescriptorPool`].
#[derive(Debug, Default)]
pub struct DescriptorPoolBuilder {
    config: SchemaConfig,
    messages: Vec<MessageDescriptor>,
    enums: Vec<EnumDescriptor>,
}

impl DescriptorPoolBuilder {
    /// Replaces the validation configuration.
    #[must_use]
    pub fn with_config(mut self, config: SchemaConfig) -> Self {
        self.config = config;
        self
    }

    /// Adds a message type.
    #[must_use]
    pub fn add_message(mut self, descriptor: MessageDescriptor) -> Self {
        self.messages.push(descriptor);
        self
    }

    /// Adds an enum type.
    #[must_use]
    pub fn add_enum(mut self, descriptor: EnumDescriptor) -> Self {
        self.enums.push(descriptor);
        self
    }

    /// Validates the collected descriptors and publishes the pool.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] describing every inconsistency found: duplicate
    /// type names, unresolved references, invalid numbers, map keys, defaults,
    /// enums, and empty oneof groups.
    pub fn build(self) -> Result<DescriptorPool, SchemaError> {
        let validator = DefaultSchemaValidator::with_config(self.config);
        if let Err(error) = validator.validate(&self.messages, &self.enums) {
            tracing::warn!(
                errors = error.errors().len(),
                %error,
                "schema rejected"
            );
            return Err(error);
        }

        let mut names = HashMap::with_capacity(self.messages.len() + self.enums.len());
        for (index, descriptor) in self.messages.iter().enumerate() {
            names.insert(descriptor.name().to_owned(), TypeEntry::Message(index));
        }
        for (index, descriptor) in self.enums.iter().enumerate() {
            names.insert(descriptor.name().to_owned(), TypeEntry::Enum(index));
        }

        tracing::debug!(
            messages = self.messages.len(),
            enums = self.enums.len(),
            "descriptor pool finalised"
        );

        Ok(DescriptorPool {
            inner: Arc::new(PoolInner {
                defaults: DefaultInstanceRegistry::with_capacity(self.messages.len()),
                messages: self.messages.into_iter().map(Arc::new).collect(),
                enums: self.enums.into_iter().map(Arc::new).collect(),
                names,
            }),
        })
    }
}

/// Handle to one message type of a pool.
///
/// Two handles are equal when they name the same entry of the same pool;
/// same-named types from different pools are distinct.
#[derive(Clone)]
pub struct MessageType {
    pool: DescriptorPool,
    index: usize,
    descriptor: Arc<MessageDescriptor>,
}

impl MessageType {
    /// Returns the type name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.descriptor.name()
    }

    /// Returns the descriptor.
    #[must_use]
    pub fn descriptor(&self) -> &MessageDescriptor {
        &self.descriptor
    }

    /// Returns the owning pool.
    #[must_use]
    pub const fn pool(&self) -> &DescriptorPool {
        &self.pool
    }

    /// Returns the position of this type within its pool.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Returns an empty builder for this type.
    #[must_use]
    pub fn new_builder(&self) -> MessageBuilder {
        MessageBuilder::new(self.clone())
    }

    /// Returns the shared, fully-unset instance of this type.
    #[must_use]
    pub fn default_instance(&self) -> Message {
        self.pool.default_instances().default_instance_of(self)
    }

    /// Looks up a field by declared name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.descriptor.field_by_name(name).map(|(_, field)| field)
    }

    /// Resolves the message type of an embedded-message field.
    #[must_use]
    pub fn field_message_type(&self, field: &FieldDescriptor) -> Option<Self> {
        match field.field_type() {
            FieldType::Message(name) => self.pool.message_type(name),
            FieldType::Scalar(_) | FieldType::Enum(_) => None,
        }
    }

    /// Resolves the enum of an enum-typed field.
    #[must_use]
    pub fn field_enum(&self, field: &FieldDescriptor) -> Option<&EnumDescriptor> {
        match field.field_type() {
            FieldType::Enum(name) => self.pool.enum_descriptor(name),
            FieldType::Scalar(_) | FieldType::Message(_) => None,
        }
    }

    pub(crate) fn resolve_field(&self, name: &str) -> MessageResult<(usize, &FieldDescriptor)> {
        self.descriptor
            .field_by_name(name)
            .ok_or_else(|| MessageError::UnknownField {
                message_type: self.name().to_owned(),
                field: name.to_owned(),
            })
    }

    pub(crate) fn resolve_oneof(&self, name: &str) -> MessageResult<(usize, &OneofDescriptor)> {
        self.descriptor
            .oneof_by_name(name)
            .ok_or_else(|| MessageError::UnknownOneof {
                message_type: self.name().to_owned(),
                oneof: name.to_owned(),
            })
    }
}

impl PartialEq for MessageType {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.pool.ptr_eq(&other.pool)
    }
}

impl Eq for MessageType {}

impl Hash for MessageType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name().hash(state);
        self.index.hash(state);
    }
}

impl fmt::Debug for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MessageType({})", self.name())
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Handle to one enum type of a pool.
#[derive(Clone)]
pub struct EnumType {
    pool: DescriptorPool,
    descriptor: Arc<EnumDescriptor>,
}

impl EnumType {
    /// Returns the enum name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.descriptor.name()
    }

    /// Returns the descriptor.
    #[must_use]
    pub fn descriptor(&self) -> &EnumDescriptor {
        &self.descriptor
    }

    /// Returns the owning pool.
    #[must_use]
    pub const fn pool(&self) -> &DescriptorPool {
        &self.pool
    }
}

impl PartialEq for EnumType {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.descriptor, &other.descriptor)
    }
}

impl Eq for EnumType {}

impl fmt::Debug for EnumType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EnumType({})", self.name())
    }
}
