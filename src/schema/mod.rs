//! Schema model: descriptors, validation, and descriptor pools.
//!
//! # Architecture
//!
//! - **Domain**: descriptor types and the accessor naming convention
//!   ([`domain::MessageDescriptor`], [`domain::FieldDescriptor`], etc.)
//! - **Ports**: where schemas come from ([`ports::SchemaSource`]) and how
//!   they are checked ([`ports::SchemaValidator`])
//! - **Adapters**: JSON and in-memory sources
//! - **Validation**: the rules a pool runs once before it is published
//!
//! # Example
//!
//! ```
//! use protoform::message::domain::Value;
//! use protoform::schema::DescriptorPool;
//! use protoform::schema::domain::{FieldDescriptor, MessageDescriptor, ScalarKind};
//!
//! let pool = DescriptorPool::builder()
//!     .add_message(
//!         MessageDescriptor::builder("Greeting")
//!             .field(FieldDescriptor::scalar("text", 1, ScalarKind::String))
//!             .build()
//!             .expect("valid descriptor"),
//!     )
//!     .build()
//!     .expect("valid pool");
//!
//! let greeting = pool.message_type("Greeting").expect("declared type");
//! let mut builder = greeting.new_builder();
//! builder.set("text", "hello").expect("string field");
//! let message = builder.build();
//! assert_eq!(message.to_string(), "Greeting{text=hello}");
//! assert_eq!(message.get("text").expect("known field"), Value::from("hello"));
//! ```

pub mod adapters;
pub mod document;
pub mod domain;
pub mod error;
pub mod pool;
pub mod ports;
pub mod validation;

pub use document::SchemaDocument;
pub use error::{SchemaError, SchemaResult, SourceError};
pub use pool::{DescriptorPool, DescriptorPoolBuilder, EnumType, MessageType};
pub use ports::SchemaConfig;
