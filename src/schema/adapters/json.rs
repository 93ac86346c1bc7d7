//! JSON text schema source.

use crate::schema::{document::SchemaDocument, error::SourceError, ports::SchemaSource};

/// Schema source backed by JSON text, typically embedded with
/// `include_str!` by generated code.
///
/// # Examples
///
/// ```
/// use protoform::schema::{DescriptorPool, SchemaConfig};
/// use protoform::schema::adapters::JsonSchemaSource;
///
/// let source = JsonSchemaSource::new(r#"{"messages":[{"name":"Empty"}]}"#);
/// let pool = DescriptorPool::from_source(&source, SchemaConfig::default())
///     .expect("valid schema");
/// assert!(pool.message_type("Empty").is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonSchemaSource {
    text: String,
}

impl JsonSchemaSource {
    /// Wraps JSON text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl SchemaSource for JsonSchemaSource {
    fn load(&self) -> Result<SchemaDocument, SourceError> {
        SchemaDocument::from_json(&self.text)
    }
}
