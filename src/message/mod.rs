//! Message runtime: builders, immutable messages, and default instances.
//!
//! # Architecture
//!
//! - **Domain**: dynamic values, builders, messages, and their container
//!   views ([`domain::MessageBuilder`], [`domain::Message`], etc.)
//! - **Registry**: the per-type default instance cache
//! - **Errors**: null rejection, read-only containers, and field-shape
//!   mismatches
//!
//! # Example
//!
//! ```
//! use protoform::message::domain::{MapContainer, OneofCase};
//! use protoform::schema::DescriptorPool;
//! use protoform::schema::domain::{FieldDescriptor, MessageDescriptor, ScalarKind};
//!
//! let pool = DescriptorPool::builder()
//!     .add_message(
//!         MessageDescriptor::builder("Settings")
//!             .field(FieldDescriptor::scalar("flags", 1, ScalarKind::Bool).map(ScalarKind::String))
//!             .oneof_field("source", FieldDescriptor::scalar("path", 2, ScalarKind::String))
//!             .oneof_field("source", FieldDescriptor::scalar("inline", 3, ScalarKind::Bytes))
//!             .build()
//!             .expect("valid descriptor"),
//!     )
//!     .build()
//!     .expect("valid pool");
//! let settings = pool.message_type("Settings").expect("declared type");
//!
//! let mut builder = settings.new_builder();
//! builder
//!     .put("flags", "verbose", true)
//!     .and_then(|b| b.set("path", "/etc/app"))
//!     .expect("valid values");
//! let message = builder.build();
//!
//! assert_eq!(message.oneof_case("source").expect("known group"), OneofCase::Member(2));
//! let mut flags = message.map("flags").expect("map field");
//! assert_eq!(flags.len(), 1);
//! assert!(flags.insert("quiet".into(), true.into()).is_err());
//! ```

pub mod domain;
pub mod error;
pub mod registry;

#[cfg(test)]
mod tests;
