//! Source port for schema documents.

use crate::schema::{document::SchemaDocument, error::SourceError};

/// Anything that can produce a schema document.
///
/// Generators and parsers hand the runtime a type model through this port;
/// the pool never cares where the document came from.
pub trait SchemaSource {
    /// Loads the document.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Malformed`] when the underlying text cannot be
    /// parsed.
    fn load(&self) -> Result<SchemaDocument, SourceError>;
}
