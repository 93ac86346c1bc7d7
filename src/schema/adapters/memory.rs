//! In-memory schema source.

use crate::schema::{document::SchemaDocument, error::SourceError, ports::SchemaSource};

/// Schema source holding an already-built document.
///
/// Useful in tests and for tools that assemble documents programmatically.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InMemorySchemaSource {
    document: SchemaDocument,
}

impl InMemorySchemaSource {
    /// Wraps a document.
    #[must_use]
    pub const fn new(document: SchemaDocument) -> Self {
        Self { document }
    }
}

impl SchemaSource for InMemorySchemaSource {
    fn load(&self) -> Result<SchemaDocument, SourceError> {
        Ok(self.document.clone())
    }
}
