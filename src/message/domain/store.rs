//! Per-instance field storage shared by builders and messages.
//!
//! A store holds one slot per declared field plus one state per oneof
//! group. It carries no type information of its own; every operation takes
//! the owning [`MessageType`], so a cached default-instance store never
//! points back at its pool.

use super::{MapKey, OneofCase, Value, oneof::OneofState};
use crate::message::error::{MessageError, MessageResult, NullPosition, NullValueError, Operation};
use crate::schema::{
    MessageType,
    domain::{Cardinality, FieldDescriptor, FieldType, MessageDescriptor},
};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum Slot {
    Singular(Option<Value>),
    Repeated(Vec<Value>),
    Map(BTreeMap<MapKey, Value>),
    /// Member storage lives in the group's [`OneofState`].
    Oneof,
}

/// A field that is set, as seen by rendering.
pub(crate) enum Present<'a> {
    Single(&'a Value),
    Repeated(&'a [Value]),
    Map(&'a BTreeMap<MapKey, Value>),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct FieldStore {
    slots: Vec<Slot>,
    oneofs: Vec<OneofState>,
}

impl FieldStore {
    /// Creates a store with every field absent.
    pub(crate) fn empty(descriptor: &MessageDescriptor) -> Self {
        let slots = descriptor
            .fields()
            .iter()
            .map(|field| match (field.oneof_index(), field.cardinality()) {
                (Some(_), _) => Slot::Oneof,
                (None, Cardinality::Singular) => Slot::Singular(None),
                (None, Cardinality::Repeated) => Slot::Repeated(Vec::new()),
                (None, Cardinality::Map { .. }) => Slot::Map(BTreeMap::new()),
            })
            .collect();
        Self {
            slots,
            oneofs: vec![OneofState::NotSet; descriptor.oneofs().len()],
        }
    }

    pub(crate) fn has(&self, ty: &MessageType, name: &str) -> MessageResult<bool> {
        let (index, field) = ty.resolve_field(name)?;
        if let Some(group) = field.oneof_index() {
            return Ok(self.oneof(ty, field, group)?.active_field() == Some(index));
        }
        match self.slot(ty, index, field)? {
            Slot::Singular(value) => Ok(value.is_some()),
            Slot::Repeated(_) | Slot::Map(_) | Slot::Oneof => {
                Err(MessageError::not_applicable(ty.name(), field.name(), Operation::Has))
            }
        }
    }

    /// Returns the field's value, or its default while absent.
    pub(crate) fn get(&self, ty: &MessageType, name: &str) -> MessageResult<Value> {
        let (index, field) = ty.resolve_field(name)?;
        let stored = if let Some(group) = field.oneof_index() {
            self.oneof(ty, field, group)?.value_of(index)
        } else {
            match self.slot(ty, index, field)? {
                Slot::Singular(value) => value.as_ref(),
                Slot::Repeated(_) | Slot::Map(_) | Slot::Oneof => {
                    return Err(MessageError::not_applicable(ty.name(), field.name(), Operation::Get));
                }
            }
        };
        Ok(stored.map_or_else(|| default_value(ty, field), Clone::clone))
    }

    pub(crate) fn set(&mut self, ty: &MessageType, name: &str, value: Value) -> MessageResult<()> {
        let (index, field) = ty.resolve_field(name)?;
        if !field.is_singular() {
            return Err(MessageError::not_applicable(ty.name(), field.name(), Operation::Set));
        }
        check_value(ty, field, &value, NullPosition::Value)?;
        if let Some(group) = field.oneof_index() {
            self.oneof_mut(ty, field, group)?.activate(index, value);
        } else if let Slot::Singular(slot) = self.slot_mut(ty, index, field)? {
            *slot = Some(value);
        }
        Ok(())
    }

    pub(crate) fn clear(&mut self, ty: &MessageType, name: &str) -> MessageResult<()> {
        let (index, field) = ty.resolve_field(name)?;
        if let Some(group) = field.oneof_index() {
            self.oneof_mut(ty, field, group)?.clear_member(index);
            return Ok(());
        }
        match self.slot_mut(ty, index, field)? {
            Slot::Singular(value) => *value = None,
            Slot::Repeated(values) => values.clear(),
            Slot::Map(entries) => entries.clear(),
            Slot::Oneof => {}
        }
        Ok(())
    }

    pub(crate) fn count(&self, ty: &MessageType, name: &str) -> MessageResult<usize> {
        let (index, field) = ty.resolve_field(name)?;
        match self.slot(ty, index, field)? {
            Slot::Repeated(values) => Ok(values.len()),
            Slot::Map(entries) => Ok(entries.len()),
            Slot::Singular(_) | Slot::Oneof => {
                Err(MessageError::not_applicable(ty.name(), field.name(), Operation::Count))
            }
        }
    }

    pub(crate) fn repeated<'a>(
        &'a self,
        ty: &'a MessageType,
        name: &str,
    ) -> MessageResult<(&'a FieldDescriptor, &'a [Value])> {
        let (index, field) = ty.resolve_field(name)?;
        match self.slot(ty, index, field)? {
            Slot::Repeated(values) => Ok((field, values)),
            Slot::Singular(_) | Slot::Map(_) | Slot::Oneof => {
                Err(MessageError::not_applicable(ty.name(), field.name(), Operation::Repeated))
            }
        }
    }

    pub(crate) fn repeated_mut<'a>(
        &'a mut self,
        ty: &'a MessageType,
        name: &str,
    ) -> MessageResult<(&'a FieldDescriptor, &'a mut Vec<Value>)> {
        let (index, field) = ty.resolve_field(name)?;
        match self.slot_mut(ty, index, field)? {
            Slot::Repeated(values) => Ok((field, values)),
            Slot::Singular(_) | Slot::Map(_) | Slot::Oneof => {
                Err(MessageError::not_applicable(ty.name(), field.name(), Operation::Repeated))
            }
        }
    }

    pub(crate) fn map<'a>(
        &'a self,
        ty: &'a MessageType,
        name: &str,
    ) -> MessageResult<(&'a FieldDescriptor, &'a BTreeMap<MapKey, Value>)> {
        let (index, field) = ty.resolve_field(name)?;
        match self.slot(ty, index, field)? {
            Slot::Map(entries) => Ok((field, entries)),
            Slot::Singular(_) | Slot::Repeated(_) | Slot::Oneof => {
                Err(MessageError::not_applicable(ty.name(), field.name(), Operation::Map))
            }
        }
    }

    pub(crate) fn map_mut<'a>(
        &'a mut self,
        ty: &'a MessageType,
        name: &str,
    ) -> MessageResult<(&'a FieldDescriptor, &'a mut BTreeMap<MapKey, Value>)> {
        let (index, field) = ty.resolve_field(name)?;
        match self.slot_mut(ty, index, field)? {
            Slot::Map(entries) => Ok((field, entries)),
            Slot::Singular(_) | Slot::Repeated(_) | Slot::Oneof => {
                Err(MessageError::not_applicable(ty.name(), field.name(), Operation::Map))
            }
        }
    }

    pub(crate) fn add(&mut self, ty: &MessageType, name: &str, value: Value) -> MessageResult<()> {
        let (field, values) = self.repeated_for(ty, name, Operation::Add)?;
        check_value(ty, field, &value, NullPosition::Value)?;
        values.push(value);
        Ok(())
    }

    /// Appends every element or none of them.
    pub(crate) fn add_all(
        &mut self,
        ty: &MessageType,
        name: &str,
        values: Option<Vec<Value>>,
    ) -> MessageResult<()> {
        let (field, existing) = self.repeated_for(ty, name, Operation::Add)?;
        let Some(incoming) = values else {
            return Err(MessageError::null_value(ty.name(), field.name()));
        };
        for value in &incoming {
            check_value(ty, field, value, NullPosition::Value)?;
        }
        existing.extend(incoming);
        Ok(())
    }

    pub(crate) fn put(&mut self, ty: &MessageType, name: &str, key: Value, value: Value) -> MessageResult<()> {
        let (field, entries) = self.map_for(ty, name, Operation::Put)?;
        let checked = check_entry(ty, field, key, &value)?;
        entries.insert(checked, value);
        Ok(())
    }

    /// Inserts every entry or none of them.
    pub(crate) fn put_all(
        &mut self,
        ty: &MessageType,
        name: &str,
        entries: Option<Vec<(Value, Value)>>,
    ) -> MessageResult<()> {
        let (field, existing) = self.map_for(ty, name, Operation::Put)?;
        let Some(incoming) = entries else {
            return Err(MessageError::null_value(ty.name(), field.name()));
        };
        let mut checked = Vec::with_capacity(incoming.len());
        for (key, value) in incoming {
            let map_key = check_entry(ty, field, key, &value)?;
            checked.push((map_key, value));
        }
        existing.extend(checked);
        Ok(())
    }

    pub(crate) fn remove(&mut self, ty: &MessageType, name: &str, key: &MapKey) -> MessageResult<Option<Value>> {
        let (_, entries) = self.map_for(ty, name, Operation::Remove)?;
        Ok(entries.remove(key))
    }

    pub(crate) fn clear_oneof(&mut self, ty: &MessageType, group: &str) -> MessageResult<()> {
        let (index, _) = ty.resolve_oneof(group)?;
        if let Some(state) = self.oneofs.get_mut(index) {
            state.clear();
        }
        Ok(())
    }

    pub(crate) fn oneof_case(&self, ty: &MessageType, group: &str) -> MessageResult<OneofCase> {
        let (index, _) = ty.resolve_oneof(group)?;
        let case = self
            .oneofs
            .get(index)
            .and_then(OneofState::active_field)
            .and_then(|field| ty.descriptor().field(field))
            .map_or(OneofCase::NotSet, |field| OneofCase::Member(field.number()));
        Ok(case)
    }

    /// Merges `source` (a store of the same type) into this one.
    pub(crate) fn merge_fields(&mut self, source: &Self) {
        for (slot, incoming) in self.slots.iter_mut().zip(&source.slots) {
            match (slot, incoming) {
                (Slot::Singular(current), Slot::Singular(Some(value))) => {
                    *current = Some(merge_singular(current.take(), value));
                }
                (Slot::Repeated(values), Slot::Repeated(more)) => values.extend(more.iter().cloned()),
                (Slot::Map(entries), Slot::Map(more)) => {
                    entries.extend(more.iter().map(|(k, v)| (k.clone(), v.clone())));
                }
                _ => {}
            }
        }
        for (state, incoming) in self.oneofs.iter_mut().zip(&source.oneofs) {
            state.merge_from(incoming);
        }
    }

    /// Lists set fields in declaration order.
    pub(crate) fn present<'a>(&'a self, descriptor: &'a MessageDescriptor) -> Vec<(&'a FieldDescriptor, Present<'a>)> {
        descriptor
            .fields()
            .iter()
            .zip(&self.slots)
            .enumerate()
            .filter_map(|(index, (field, slot))| {
                let present = match slot {
                    Slot::Singular(value) => value.as_ref().map(Present::Single),
                    Slot::Repeated(values) if !values.is_empty() => Some(Present::Repeated(values)),
                    Slot::Map(entries) if !entries.is_empty() => Some(Present::Map(entries)),
                    Slot::Oneof => field
                        .oneof_index()
                        .and_then(|group| self.oneofs.get(group))
                        .and_then(|state| state.value_of(index))
                        .map(Present::Single),
                    Slot::Repeated(_) | Slot::Map(_) => None,
                };
                present.map(|p| (field, p))
            })
            .collect()
    }

    fn repeated_for<'a>(
        &'a mut self,
        ty: &'a MessageType,
        name: &str,
        operation: Operation,
    ) -> MessageResult<(&'a FieldDescriptor, &'a mut Vec<Value>)> {
        self.repeated_mut(ty, name).map_err(|err| retag(err, operation))
    }

    fn map_for<'a>(
        &'a mut self,
        ty: &'a MessageType,
        name: &str,
        operation: Operation,
    ) -> MessageResult<(&'a FieldDescriptor, &'a mut BTreeMap<MapKey, Value>)> {
        self.map_mut(ty, name).map_err(|err| retag(err, operation))
    }

    fn slot(&self, ty: &MessageType, index: usize, field: &FieldDescriptor) -> MessageResult<&Slot> {
        self.slots.get(index).ok_or_else(|| missing_field(ty, field))
    }

    fn slot_mut(&mut self, ty: &MessageType, index: usize, field: &FieldDescriptor) -> MessageResult<&mut Slot> {
        self.slots.get_mut(index).ok_or_else(|| missing_field(ty, field))
    }

    fn oneof(&self, ty: &MessageType, field: &FieldDescriptor, group: usize) -> MessageResult<&OneofState> {
        self.oneofs.get(group).ok_or_else(|| missing_field(ty, field))
    }

    fn oneof_mut(
        &mut self,
        ty: &MessageType,
        field: &FieldDescriptor,
        group: usize,
    ) -> MessageResult<&mut OneofState> {
        self.oneofs.get_mut(group).ok_or_else(|| missing_field(ty, field))
    }
}

fn missing_field(ty: &MessageType, field: &FieldDescriptor) -> MessageError {
    MessageError::UnknownField {
        message_type: ty.name().to_owned(),
        field: field.name().to_owned(),
    }
}

fn retag(err: MessageError, operation: Operation) -> MessageError {
    match err {
        MessageError::NotApplicable {
            message_type, field, ..
        } => MessageError::NotApplicable {
            message_type,
            field,
            operation,
        },
        other => other,
    }
}

/// Present embedded messages merge recursively; anything else is replaced.
fn merge_singular(current: Option<Value>, incoming: &Value) -> Value {
    match (current, incoming) {
        (Some(Value::Message(mine)), Value::Message(theirs)) => Value::Message(mine.merged_with(theirs)),
        _ => incoming.clone(),
    }
}

/// The value an absent field reads as.
pub(crate) fn default_value(ty: &MessageType, field: &FieldDescriptor) -> Value {
    if let Some(declared) = field.declared_default() {
        return declared.clone();
    }
    match field.field_type() {
        FieldType::Scalar(kind) => kind.zero_value(),
        FieldType::Enum(_) => Value::Enum(
            ty.field_enum(field)
                .and_then(|e| e.default_number())
                .unwrap_or_default(),
        ),
        FieldType::Message(_) => ty
            .field_message_type(field)
            .map_or(Value::Null, |nested| Value::Message(nested.default_instance())),
    }
}

/// Checks a value against the field's value type.
pub(crate) fn check_value(
    ty: &MessageType,
    field: &FieldDescriptor,
    value: &Value,
    position: NullPosition,
) -> MessageResult<()> {
    if value.is_null() {
        return Err(NullValueError::new(ty.name(), field.name(), position).into());
    }

    let accepted = match field.field_type() {
        FieldType::Scalar(kind) => kind.accepts(value),
        FieldType::Enum(_) => matches!(value, Value::Enum(_)),
        FieldType::Message(_) => value
            .as_message()
            .zip(ty.field_message_type(field))
            .is_some_and(|(message, expected)| *message.message_type() == expected),
    };
    if !accepted {
        return Err(MessageError::KindMismatch {
            message_type: ty.name().to_owned(),
            field: field.name().to_owned(),
            expected: field.field_type().to_string(),
            actual: value.kind_name(),
        });
    }

    if let (Value::Enum(number), Some(declared)) = (value, ty.field_enum(field)) {
        if declared.value_by_number(*number).is_none() {
            return Err(MessageError::UnknownEnumValue {
                message_type: ty.name().to_owned(),
                field: field.name().to_owned(),
                enum_type: declared.name().to_owned(),
                number: *number,
            });
        }
    }
    Ok(())
}

/// Checks a map entry, returning the converted key.
pub(crate) fn check_entry(
    ty: &MessageType,
    field: &FieldDescriptor,
    key: Value,
    value: &Value,
) -> MessageResult<MapKey> {
    if key.is_null() {
        return Err(NullValueError::new(ty.name(), field.name(), NullPosition::MapKey).into());
    }
    let key_mismatch = |actual: &'static str| MessageError::KindMismatch {
        message_type: ty.name().to_owned(),
        field: field.name().to_owned(),
        expected: field
            .map_key_kind()
            .map_or_else(String::new, |kind| format!("{kind} key")),
        actual,
    };
    let map_key = MapKey::try_from(key).map_err(|rejected| key_mismatch(rejected.0.kind_name()))?;
    if !field.map_key_kind().is_some_and(|kind| kind.accepts_key(&map_key)) {
        return Err(key_mismatch(map_key.kind_name()));
    }
    check_value(ty, field, value, NullPosition::MapValue)?;
    Ok(map_key)
}
