//! Oneof group descriptors.

/// A named group of fields of which at most one is set at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneofDescriptor {
    name: String,
    fields: Vec<usize>,
}

impl OneofDescriptor {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub(crate) fn push_member(&mut self, field_index: usize) {
        self.fields.push(field_index);
    }

    /// Returns the group name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the member field indices in declaration order.
    #[must_use]
    pub fn field_indices(&self) -> &[usize] {
        &self.fields
    }

    /// Returns `true` if the field at `field_index` belongs to this group.
    #[must_use]
    pub fn contains(&self, field_index: usize) -> bool {
        self.fields.contains(&field_index)
    }

    /// Returns `true` if the group declares no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
