//! Runtime types for message instances.
//!
//! Builders hold mutable per-instance state; messages are immutable
//! snapshots sharing their storage. Both address fields by declared name
//! and check every value against the field's descriptor.

mod builder;
mod container;
mod message;
mod oneof;
mod render;
pub(crate) mod store;
mod value;

pub use builder::MessageBuilder;
pub use container::{MapContainer, MapFieldMut, MapView, RepeatedContainer, RepeatedFieldMut, RepeatedView};
pub use message::Message;
pub use oneof::OneofCase;
pub use value::{MapKey, NotAKey, Value};
