//! Container traits for repeated and map fields, with read-only views for
//! messages and checked mutable handles for builders.

use super::{
    MapKey, Value,
    store::{check_entry, check_value},
};
use crate::message::error::{ImmutableContainerError, MessageError, MessageResult, NullPosition};
use crate::schema::{MessageType, domain::FieldDescriptor};
use std::collections::BTreeMap;
use std::collections::btree_map;
use std::slice;

/// Sequence access shared by repeated-field views and handles.
pub trait RepeatedContainer {
    /// Returns the number of elements.
    fn len(&self) -> usize;

    /// Returns `true` if there are no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the element at `index`.
    fn get(&self, index: usize) -> Option<&Value>;

    /// Appends an element.
    ///
    /// # Errors
    ///
    /// Read-only views always fail with `ImmutableContainerError`; builder
    /// handles fail on null or mistyped elements.
    fn push(&mut self, value: Value) -> MessageResult<()>;

    /// Removes every element.
    ///
    /// # Errors
    ///
    /// Read-only views always fail with `ImmutableContainerError`.
    fn clear(&mut self) -> MessageResult<()>;
}

/// Keyed access shared by map-field views and handles.
pub trait MapContainer {
    /// Returns the number of entries.
    fn len(&self) -> usize;

    /// Returns `true` if there are no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the value stored under `key`.
    fn get(&self, key: &MapKey) -> Option<&Value>;

    /// Returns `true` if `key` has an entry.
    fn contains_key(&self, key: &MapKey) -> bool {
        self.get(key).is_some()
    }

    /// Inserts an entry, returning the value it replaced.
    ///
    /// # Errors
    ///
    /// Read-only views always fail with `ImmutableContainerError`; builder
    /// handles fail on null or mistyped keys and values.
    fn insert(&mut self, key: Value, value: Value) -> MessageResult<Option<Value>>;

    /// Removes an entry, returning its value.
    ///
    /// # Errors
    ///
    /// Read-only views always fail with `ImmutableContainerError`.
    fn remove(&mut self, key: &MapKey) -> MessageResult<Option<Value>>;

    /// Removes every entry.
    ///
    /// # Errors
    ///
    /// Read-only views always fail with `ImmutableContainerError`.
    fn clear(&mut self) -> MessageResult<()>;
}

/// Read-only view of a repeated field.
#[derive(Debug, Clone, Copy)]
pub struct RepeatedView<'a> {
    owner: &'a str,
    field: &'a str,
    values: &'a [Value],
}

impl<'a> RepeatedView<'a> {
    pub(crate) const fn new(owner: &'a str, field: &'a str, values: &'a [Value]) -> Self {
        Self { owner, field, values }
    }

    /// Returns the elements as a slice.
    #[must_use]
    pub const fn as_slice(&self) -> &'a [Value] {
        self.values
    }

    /// Iterates over the elements.
    pub fn iter(&self) -> slice::Iter<'a, Value> {
        self.values.iter()
    }

    /// Copies the elements out.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Value> {
        self.values.to_vec()
    }

    fn rejected(&self) -> ImmutableContainerError {
        ImmutableContainerError::new(self.owner, self.field)
    }
}

impl RepeatedContainer for RepeatedView<'_> {
    fn len(&self) -> usize {
        self.values.len()
    }

    fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    fn push(&mut self, _value: Value) -> MessageResult<()> {
        Err(self.rejected().into())
    }

    fn clear(&mut self) -> MessageResult<()> {
        Err(self.rejected().into())
    }
}

impl<'a> IntoIterator for RepeatedView<'a> {
    type Item = &'a Value;
    type IntoIter = slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl PartialEq for RepeatedView<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl PartialEq<[Value]> for RepeatedView<'_> {
    fn eq(&self, other: &[Value]) -> bool {
        self.values == other
    }
}

impl PartialEq<Vec<Value>> for RepeatedView<'_> {
    fn eq(&self, other: &Vec<Value>) -> bool {
        self.values == other.as_slice()
    }
}

/// Read-only view of a map field, iterating in ascending key order.
#[derive(Debug, Clone, Copy)]
pub struct MapView<'a> {
    owner: &'a str,
    field: &'a str,
    entries: &'a BTreeMap<MapKey, Value>,
}

impl<'a> MapView<'a> {
    pub(crate) const fn new(owner: &'a str, field: &'a str, entries: &'a BTreeMap<MapKey, Value>) -> Self {
        Self { owner, field, entries }
    }

    /// Iterates over the entries in key order.
    pub fn iter(&self) -> btree_map::Iter<'a, MapKey, Value> {
        self.entries.iter()
    }

    /// Iterates over the keys in order.
    pub fn keys(&self) -> btree_map::Keys<'a, MapKey, Value> {
        self.entries.keys()
    }

    /// Copies the entries out.
    #[must_use]
    pub fn to_btree_map(&self) -> BTreeMap<MapKey, Value> {
        self.entries.clone()
    }

    fn rejected(&self) -> ImmutableContainerError {
        ImmutableContainerError::new(self.owner, self.field)
    }
}

impl MapContainer for MapView<'_> {
    fn len(&self) -> usize {
        self.entries.len()
    }

    fn get(&self, key: &MapKey) -> Option<&Value> {
        self.entries.get(key)
    }

    fn insert(&mut self, _key: Value, _value: Value) -> MessageResult<Option<Value>> {
        Err(self.rejected().into())
    }

    fn remove(&mut self, _key: &MapKey) -> MessageResult<Option<Value>> {
        Err(self.rejected().into())
    }

    fn clear(&mut self) -> MessageResult<()> {
        Err(self.rejected().into())
    }
}

impl<'a> IntoIterator for MapView<'a> {
    type Item = (&'a MapKey, &'a Value);
    type IntoIter = btree_map::Iter<'a, MapKey, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl PartialEq for MapView<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl PartialEq<BTreeMap<MapKey, Value>> for MapView<'_> {
    fn eq(&self, other: &BTreeMap<MapKey, Value>) -> bool {
        self.entries == other
    }
}

/// Mutable handle to a builder's repeated field.
///
/// Applies the same null and type rules as [`MessageBuilder::add`](super::MessageBuilder::add).
#[derive(Debug)]
pub struct RepeatedFieldMut<'a> {
    message_type: &'a MessageType,
    field: &'a FieldDescriptor,
    values: &'a mut Vec<Value>,
}

impl<'a> RepeatedFieldMut<'a> {
    pub(crate) const fn new(
        message_type: &'a MessageType,
        field: &'a FieldDescriptor,
        values: &'a mut Vec<Value>,
    ) -> Self {
        Self {
            message_type,
            field,
            values,
        }
    }

    /// Replaces the element at `index`, returning the old one.
    ///
    /// # Errors
    ///
    /// Fails on null or mistyped values, and with
    /// `MessageError::IndexOutOfBounds` when `index` is past the last
    /// element.
    pub fn set(&mut self, index: usize, value: Value) -> MessageResult<Value> {
        check_value(self.message_type, self.field, &value, NullPosition::Value)?;
        let len = self.values.len();
        let slot = self.values.get_mut(index).ok_or_else(|| MessageError::IndexOutOfBounds {
            message_type: self.message_type.name().to_owned(),
            field: self.field.name().to_owned(),
            index,
            len,
        })?;
        Ok(std::mem::replace(slot, value))
    }

    /// Removes and returns the element at `index`, if any.
    pub fn remove(&mut self, index: usize) -> Option<Value> {
        (index < self.values.len()).then(|| self.values.remove(index))
    }
}

impl RepeatedContainer for RepeatedFieldMut<'_> {
    fn len(&self) -> usize {
        self.values.len()
    }

    fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    fn push(&mut self, value: Value) -> MessageResult<()> {
        check_value(self.message_type, self.field, &value, NullPosition::Value)?;
        self.values.push(value);
        Ok(())
    }

    fn clear(&mut self) -> MessageResult<()> {
        self.values.clear();
        Ok(())
    }
}

/// Mutable handle to a builder's map field.
///
/// Applies the same null and type rules as [`MessageBuilder::put`](super::MessageBuilder::put).
#[derive(Debug)]
pub struct MapFieldMut<'a> {
    message_type: &'a MessageType,
    field: &'a FieldDescriptor,
    entries: &'a mut BTreeMap<MapKey, Value>,
}

impl<'a> MapFieldMut<'a> {
    pub(crate) const fn new(
        message_type: &'a MessageType,
        field: &'a FieldDescriptor,
        entries: &'a mut BTreeMap<MapKey, Value>,
    ) -> Self {
        Self {
            message_type,
            field,
            entries,
        }
    }
}

impl MapContainer for MapFieldMut<'_> {
    fn len(&self) -> usize {
        self.entries.len()
    }

    fn get(&self, key: &MapKey) -> Option<&Value> {
        self.entries.get(key)
    }

    fn insert(&mut self, key: Value, value: Value) -> MessageResult<Option<Value>> {
        let checked = check_entry(self.message_type, self.field, key, &value)?;
        Ok(self.entries.insert(checked, value))
    }

    fn remove(&mut self, key: &MapKey) -> MessageResult<Option<Value>> {
        Ok(self.entries.remove(key))
    }

    fn clear(&mut self) -> MessageResult<()> {
        self.entries.clear();
        Ok(())
    }
}
