//! Enum descriptors.

use std::fmt;

/// One named value of an enum.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumValueDescriptor {
    name: String,
    number: i32,
}

impl EnumValueDescriptor {
    /// Creates an enum value.
    #[must_use]
    pub fn new(name: impl Into<String>, number: i32) -> Self {
        Self {
            name: name.into(),
            number,
        }
    }

    /// Returns the value name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the value number.
    #[must_use]
    pub const fn number(&self) -> i32 {
        self.number
    }
}

impl fmt::Display for EnumValueDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A closed enumeration of named integer values.
///
/// The first declared value is the enum's default.
///
/// # Examples
///
/// ```
/// use protoform::schema::domain::EnumDescriptor;
///
/// let color = EnumDescriptor::new("Color", [("RED", 0), ("GREEN", 1)]);
/// assert_eq!(color.default_number(), Some(0));
/// assert_eq!(color.value_by_number(1).map(|v| v.name()), Some("GREEN"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDescriptor {
    name: String,
    values: Vec<EnumValueDescriptor>,
}

impl EnumDescriptor {
    /// Creates an enum from `(name, number)` pairs in declaration order.
    ///
    /// Consistency (non-empty, unique numbers and names) is checked when the
    /// enum is added to a pool.
    #[must_use]
    pub fn new<N>(name: impl Into<String>, values: impl IntoIterator<Item = (N, i32)>) -> Self
    where
        N: Into<String>,
    {
        Self {
            name: name.into(),
            values: values
                .into_iter()
                .map(|(value_name, number)| EnumValueDescriptor::new(value_name, number))
                .collect(),
        }
    }

    /// Returns the enum name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the values in declaration order.
    #[must_use]
    pub fn values(&self) -> &[EnumValueDescriptor] {
        &self.values
    }

    /// Looks up a value by number.
    #[must_use]
    pub fn value_by_number(&self, number: i32) -> Option<&EnumValueDescriptor> {
        self.values.iter().find(|value| value.number == number)
    }

    /// Looks up a value by name.
    #[must_use]
    pub fn value_by_name(&self, name: &str) -> Option<&EnumValueDescriptor> {
        self.values.iter().find(|value| value.name == name)
    }

    /// Returns the number of the first declared value.
    #[must_use]
    pub fn default_number(&self) -> Option<i32> {
        self.values.first().map(EnumValueDescriptor::number)
    }
}
