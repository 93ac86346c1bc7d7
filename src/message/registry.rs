//! Default instance registry.
//!
//! Each message type has exactly one fully-unset instance, created on first
//! request and shared by every reader afterwards.

use crate::message::domain::{Message, store::FieldStore};
use crate::schema::MessageType;
use std::sync::{Arc, OnceLock};

/// Per-pool cache of default instances, one slot per message type.
///
/// Slots initialise at most once even under concurrent first access;
/// later reads do not lock.
pub struct DefaultInstanceRegistry {
    slots: Box<[OnceLock<Arc<FieldStore>>]>,
}

impl DefaultInstanceRegistry {
    pub(crate) fn with_capacity(types: usize) -> Self {
        Self {
            slots: (0..types).map(|_| OnceLock::new()).collect(),
        }
    }

    /// Returns the default instance of `message_type`.
    ///
    /// Handles from another pool are served by their own pool's registry.
    #[must_use]
    pub fn default_instance_of(&self, message_type: &MessageType) -> Message {
        let owner = message_type.pool().default_instances();
        if !std::ptr::eq(self, owner) {
            return owner.default_instance_of(message_type);
        }
        let store = self.slots.get(message_type.index()).map_or_else(
            || Arc::new(FieldStore::empty(message_type.descriptor())),
            |slot| {
                Arc::clone(slot.get_or_init(|| {
                    tracing::debug!(message_type = %message_type, "default instance materialised");
                    Arc::new(FieldStore::empty(message_type.descriptor()))
                }))
            },
        );
        Message::from_shared(message_type.clone(), store)
    }

    /// Returns how many types have materialised their default instance.
    #[must_use]
    pub fn materialised(&self) -> usize {
        self.slots.iter().filter(|slot| slot.get().is_some()).count()
    }

    /// Returns the number of message types the registry covers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if the pool declares no message types.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl std::fmt::Debug for DefaultInstanceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultInstanceRegistry")
            .field("types", &self.len())
            .field("materialised", &self.materialised())
            .finish()
    }
}

/// Returns the default instance of `message_type`.
///
/// # Examples
///
/// ```
/// use protoform::message::registry::default_instance_of;
/// use protoform::schema::DescriptorPool;
/// use protoform::schema::domain::MessageDescriptor;
///
/// let pool = DescriptorPool::builder()
///     .add_message(MessageDescriptor::builder("Empty").build().expect("valid descriptor"))
///     .build()
///     .expect("valid pool");
/// let empty = pool.message_type("Empty").expect("declared type");
///
/// assert!(default_instance_of(&empty).ptr_eq(&empty.default_instance()));
/// assert_eq!(pool.default_instances().materialised(), 1);
/// ```
#[must_use]
pub fn default_instance_of(message_type: &MessageType) -> Message {
    message_type.pool().default_instances().default_instance_of(message_type)
}
