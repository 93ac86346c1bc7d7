//! Oneof group state.

use super::Value;

/// Which member of a oneof group is active.
///
/// # Examples
///
/// ```
/// use protoform::message::domain::OneofCase;
///
/// assert!(!OneofCase::NotSet.is_set());
/// assert_eq!(OneofCase::Member(3).field_number(), Some(3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OneofCase {
    /// No member is set.
    #[default]
    NotSet,
    /// The member with this field number is set.
    Member(u32),
}

impl OneofCase {
    /// Returns `true` if a member is active.
    #[must_use]
    pub const fn is_set(self) -> bool {
        matches!(self, Self::Member(_))
    }

    /// Returns the active member's field number.
    #[must_use]
    pub const fn field_number(self) -> Option<u32> {
        match self {
            Self::NotSet => None,
            Self::Member(number) => Some(number),
        }
    }
}

/// Tagged-union storage for one group: at most one member holds a value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub(crate) enum OneofState {
    #[default]
    NotSet,
    Active {
        field: usize,
        value: Value,
    },
}

impl OneofState {
    /// Makes `field` the active member, discarding the previous member's value.
    pub(crate) fn activate(&mut self, field: usize, value: Value) {
        *self = Self::Active { field, value };
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::NotSet;
    }

    /// Resets the group only if `field` is the active member.
    pub(crate) fn clear_member(&mut self, field: usize) {
        if self.active_field() == Some(field) {
            self.clear();
        }
    }

    pub(crate) const fn active_field(&self) -> Option<usize> {
        match self {
            Self::NotSet => None,
            Self::Active { field, .. } => Some(*field),
        }
    }

    /// Returns the stored value if `field` is the active member.
    pub(crate) fn value_of(&self, field: usize) -> Option<&Value> {
        match self {
            Self::Active { field: active, value } if *active == field => Some(value),
            Self::Active { .. } | Self::NotSet => None,
        }
    }

    /// Applies merge semantics: an active source member becomes active here,
    /// merging recursively when both sides hold the same message member.
    pub(crate) fn merge_from(&mut self, source: &Self) {
        let Self::Active {
            field: source_field,
            value: source_value,
        } = source
        else {
            return;
        };

        if let Self::Active { field, value } = self {
            if *field == *source_field {
                if let (Value::Message(mine), Value::Message(theirs)) = (&*value, source_value) {
                    *value = Value::Message(mine.merged_with(theirs));
                    return;
                }
            }
        }
        self.activate(*source_field, source_value.clone());
    }
}
