//! Accessor naming convention for generated message types.
//!
//! Generators emit one wrapper type per message; the names here are the
//! surface those wrappers must expose. Field names are converted to
//! `snake_case`; a bare getter that would collide with a Rust keyword or a
//! method every generated type already carries gets a trailing `_`.

use super::{Cardinality, FieldDescriptor, OneofDescriptor};

/// Words that cannot be used as a bare getter name.
const RESERVED: &[&str] = &[
    // Rust keywords, strict and reserved.
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl",
    "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "self", "static", "struct", "super", "trait", "true", "try", "type", "typeof",
    "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
    // Methods present on every generated wrapper.
    "build", "clone", "default_instance", "merge_from", "message_type", "new_builder",
    "to_builder",
];

/// Accessor names for one field.
///
/// # Examples
///
/// ```
/// use protoform::schema::domain::{AccessorNames, FieldDescriptor, ScalarKind};
///
/// let field = FieldDescriptor::scalar("fooInt", 1, ScalarKind::Int32);
/// let names = AccessorNames::for_field(&field);
/// assert_eq!(names.getter(), "foo_int");
/// assert_eq!(names.has().as_deref(), Some("has_foo_int"));
/// assert_eq!(names.setter().as_deref(), Some("set_foo_int"));
///
/// let keyword = FieldDescriptor::scalar("type", 2, ScalarKind::Int32);
/// assert_eq!(AccessorNames::for_field(&keyword).getter(), "type_");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessorNames {
    base: String,
    cardinality: Cardinality,
}

impl AccessorNames {
    /// Derives accessor names for `field`.
    #[must_use]
    pub fn for_field(field: &FieldDescriptor) -> Self {
        Self {
            base: to_snake_case(field.name()),
            cardinality: field.cardinality(),
        }
    }

    /// Returns the `snake_case` field stem.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Returns the getter name, escaped when it would collide.
    #[must_use]
    pub fn getter(&self) -> String {
        escape_reserved(&self.base)
    }

    /// Returns `has_<field>` for singular fields.
    #[must_use]
    pub fn has(&self) -> Option<String> {
        self.singular(|base| format!("has_{base}"))
    }

    /// Returns `set_<field>` for singular fields.
    #[must_use]
    pub fn setter(&self) -> Option<String> {
        self.singular(|base| format!("set_{base}"))
    }

    /// Returns `clear_<field>`.
    #[must_use]
    pub fn clear(&self) -> String {
        format!("clear_{}", self.base)
    }

    /// Returns `add_<field>` for repeated fields.
    #[must_use]
    pub fn adder(&self) -> Option<String> {
        self.repeated(|base| format!("add_{base}"))
    }

    /// Returns `add_all_<field>` for repeated fields.
    #[must_use]
    pub fn add_all(&self) -> Option<String> {
        self.repeated(|base| format!("add_all_{base}"))
    }

    /// Returns `put_<field>` for map fields.
    #[must_use]
    pub fn putter(&self) -> Option<String> {
        self.mapped(|base| format!("put_{base}"))
    }

    /// Returns `put_all_<field>` for map fields.
    #[must_use]
    pub fn put_all(&self) -> Option<String> {
        self.mapped(|base| format!("put_all_{base}"))
    }

    /// Returns `remove_<field>` for map fields.
    #[must_use]
    pub fn remover(&self) -> Option<String> {
        self.mapped(|base| format!("remove_{base}"))
    }

    /// Returns `<field>_map` for map fields.
    #[must_use]
    pub fn map_getter(&self) -> Option<String> {
        self.mapped(|base| format!("{base}_map"))
    }

    /// Returns `<field>_count` for repeated and map fields.
    #[must_use]
    pub fn count(&self) -> Option<String> {
        match self.cardinality {
            Cardinality::Singular => None,
            Cardinality::Repeated | Cardinality::Map { .. } => Some(format!("{}_count", self.base)),
        }
    }

    fn singular(&self, name: impl FnOnce(&str) -> String) -> Option<String> {
        matches!(self.cardinality, Cardinality::Singular).then(|| name(&self.base))
    }

    fn repeated(&self, name: impl FnOnce(&str) -> String) -> Option<String> {
        matches!(self.cardinality, Cardinality::Repeated).then(|| name(&self.base))
    }

    fn mapped(&self, name: impl FnOnce(&str) -> String) -> Option<String> {
        matches!(self.cardinality, Cardinality::Map { .. }).then(|| name(&self.base))
    }
}

/// Accessor names for one oneof group.
///
/// # Examples
///
/// ```
/// use protoform::schema::domain::{FieldDescriptor, MessageDescriptor, OneofAccessorNames, ScalarKind};
///
/// let descriptor = MessageDescriptor::builder("TestOneof")
///     .oneof_field("oneofName", FieldDescriptor::scalar("fooInt", 1, ScalarKind::Int32))
///     .build()
///     .expect("valid descriptor");
/// let names = OneofAccessorNames::for_oneof(&descriptor.oneofs()[0]);
/// assert_eq!(names.case_getter(), "oneof_name_case");
/// assert_eq!(names.case_type(), "OneofNameCase");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneofAccessorNames {
    base: String,
}

impl OneofAccessorNames {
    /// Derives accessor names for `oneof`.
    #[must_use]
    pub fn for_oneof(oneof: &OneofDescriptor) -> Self {
        Self {
            base: to_snake_case(oneof.name()),
        }
    }

    /// Returns `<group>_case`.
    #[must_use]
    pub fn case_getter(&self) -> String {
        format!("{}_case", self.base)
    }

    /// Returns `clear_<group>`.
    #[must_use]
    pub fn clear(&self) -> String {
        format!("clear_{}", self.base)
    }

    /// Returns the case enum name, `<Group>Case`.
    #[must_use]
    pub fn case_type(&self) -> String {
        format!("{}Case", to_upper_camel_case(&self.base))
    }

    /// Returns the case enum variant for a member field.
    #[must_use]
    pub fn case_variant(field: &FieldDescriptor) -> String {
        to_upper_camel_case(field.name())
    }

    /// Returns the case enum variant meaning "no member set".
    #[must_use]
    pub const fn not_set_variant() -> &'static str {
        "NotSet"
    }
}

/// Converts `camelCase`, `PascalCase`, or `snake_case` to `snake_case`.
///
/// Acronym runs stay together (`HTTPServer` becomes `http_server`); digits
/// never start a new word.
#[must_use]
pub fn to_snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (index, &current) in chars.iter().enumerate() {
        if current.is_ascii_uppercase() {
            let previous = index.checked_sub(1).and_then(|i| chars.get(i)).copied();
            let next = chars.get(index + 1).copied();
            let starts_word = match previous {
                Some(prev) if prev.is_ascii_lowercase() || prev.is_ascii_digit() => true,
                Some(prev) if prev.is_ascii_uppercase() => next.is_some_and(|n| n.is_ascii_lowercase()),
                _ => false,
            };
            if starts_word && !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            out.push(current.to_ascii_lowercase());
        } else {
            out.push(current);
        }
    }
    out
}

/// Converts `snake_case` or `camelCase` to `UpperCamelCase`.
#[must_use]
pub fn to_upper_camel_case(name: &str) -> String {
    name.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_ascii_uppercase().to_string() + chars.as_str()
            })
        })
        .collect()
}

/// Appends `_` to names that collide with keywords or runtime methods.
#[must_use]
pub fn escape_reserved(name: &str) -> String {
    if RESERVED.contains(&name) {
        format!("{name}_")
    } else {
        name.to_owned()
    }
}
