//! Typed wrappers over `message_test.json`, written the way a code
//! generator targeting this runtime emits them.
//!
//! Each message type gets an immutable wrapper and a builder wrapper with
//! accessor names from `protoform::schema::domain::naming`. Setters take
//! concrete Rust types, so null can only reach the runtime through the bulk
//! operations (`None`) or the dynamic surface exposed by `dynamic_mut`.

use protoform::message::domain::{
    MapContainer, MapKey, MapView, Message, MessageBuilder, OneofCase, RepeatedView, Value,
};
use protoform::message::error::MessageResult;
use protoform::schema::{DescriptorPool, MessageType, SchemaConfig, adapters::JsonSchemaSource};
use std::collections::BTreeMap;
use std::sync::LazyLock;

static POOL: LazyLock<DescriptorPool> = LazyLock::new(|| {
    let source = JsonSchemaSource::new(include_str!("message_test.json"));
    DescriptorPool::from_source(&source, SchemaConfig::default()).expect("bundled schema is valid")
});

/// Returns the process-wide pool holding every bundled type.
pub fn pool() -> &'static DescriptorPool {
    &POOL
}

fn resolve(name: &str) -> MessageType {
    POOL.message_type(name).expect("bundled schema declares the type")
}

/// Read access shared by built messages and builders.
pub trait Fields {
    /// Reads a singular field, falling back to its default.
    fn value_of(&self, field: &str) -> Value;
    /// Reports presence of a singular field.
    fn present(&self, field: &str) -> bool;
    /// Counts the elements or entries of a collection field.
    fn size_of(&self, field: &str) -> usize;
    /// Views a repeated field.
    fn list_of(&self, field: &str) -> RepeatedView<'_>;
    /// Views a map field.
    fn map_of(&self, field: &str) -> MapView<'_>;
    /// Reads the active member of a oneof group.
    fn case_of(&self, group: &str) -> OneofCase;
}

impl Fields for Message {
    fn value_of(&self, field: &str) -> Value {
        self.get(field).expect("declared singular field")
    }

    fn present(&self, field: &str) -> bool {
        self.has(field).expect("declared singular field")
    }

    fn size_of(&self, field: &str) -> usize {
        self.count(field).expect("declared collection field")
    }

    fn list_of(&self, field: &str) -> RepeatedView<'_> {
        self.repeated(field).expect("declared repeated field")
    }

    fn map_of(&self, field: &str) -> MapView<'_> {
        self.map(field).expect("declared map field")
    }

    fn case_of(&self, group: &str) -> OneofCase {
        self.oneof_case(group).expect("declared oneof group")
    }
}

impl Fields for MessageBuilder {
    fn value_of(&self, field: &str) -> Value {
        self.get(field).expect("declared singular field")
    }

    fn present(&self, field: &str) -> bool {
        self.has(field).expect("declared singular field")
    }

    fn size_of(&self, field: &str) -> usize {
        self.count(field).expect("declared collection field")
    }

    fn list_of(&self, field: &str) -> RepeatedView<'_> {
        self.repeated(field).expect("declared repeated field")
    }

    fn map_of(&self, field: &str) -> MapView<'_> {
        self.map(field).expect("declared map field")
    }

    fn case_of(&self, group: &str) -> OneofCase {
        self.oneof_case(group).expect("declared oneof group")
    }
}

fn string_of(value: &Value) -> String {
    value.as_str().map(str::to_owned).unwrap_or_default()
}

macro_rules! message_wrapper {
    ($name:ident, $builder:ident) => {
        #[doc = concat!("Immutable `", stringify!($name), "`.")]
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(Message);

        impl $name {
            /// Returns the runtime type handle.
            pub fn message_type() -> MessageType {
                resolve(stringify!($name))
            }

            /// Returns the shared default instance.
            pub fn default_instance() -> Self {
                Self(Self::message_type().default_instance())
            }

            /// Starts an empty builder.
            pub fn new_builder() -> $builder {
                $builder(Self::message_type().new_builder())
            }

            /// Starts a builder seeded with this message.
            pub fn to_builder(&self) -> $builder {
                $builder(self.0.to_builder())
            }

            /// Returns the dynamic message.
            pub const fn as_message(&self) -> &Message {
                &self.0
            }

            /// Returns `true` if both wrap the same instance.
            pub fn ptr_eq(&self, other: &Self) -> bool {
                self.0.ptr_eq(&other.0)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<$name> for Value {
            fn from(message: $name) -> Self {
                Self::Message(message.0)
            }
        }

        impl From<Message> for $name {
            fn from(message: Message) -> Self {
                Self(message)
            }
        }

        #[doc = concat!("Builder for `", stringify!($name), "`.")]
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $builder(MessageBuilder);

        impl $builder {
            /// Produces an immutable snapshot.
            pub fn build(&self) -> $name {
                $name(self.0.build())
            }

            /// Merges a built message into this builder.
            pub fn merge_from(&mut self, other: &$name) -> MessageResult<&mut Self> {
                self.0.merge_from(&other.0)?;
                Ok(self)
            }

            /// Returns the dynamic builder.
            pub const fn dynamic(&self) -> &MessageBuilder {
                &self.0
            }

            /// Returns the dynamic builder for untyped edits.
            pub const fn dynamic_mut(&mut self) -> &mut MessageBuilder {
                &mut self.0
            }

            fn with<F>(&mut self, edit: F) -> MessageResult<&mut Self>
            where
                F: FnOnce(&mut MessageBuilder) -> MessageResult<&mut MessageBuilder>,
            {
                edit(&mut self.0)?;
                Ok(self)
            }
        }
    };
}

macro_rules! readers {
    ($($target:ty),+ => $body:tt) => {
        $(impl $target $body)+
    };
}

/// `TestEnum` from the bundled schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TestEnum {
    /// `FIRST = 0`.
    #[default]
    First,
    /// `SECOND = 1`.
    Second,
}

impl TestEnum {
    /// Returns the declared number.
    pub const fn number(self) -> i32 {
        match self {
            Self::First => 0,
            Self::Second => 1,
        }
    }

    /// Maps a declared number back to a variant.
    pub const fn from_number(number: i32) -> Option<Self> {
        match number {
            0 => Some(Self::First),
            1 => Some(Self::Second),
            _ => None,
        }
    }

    fn from_value(value: &Value) -> Self {
        value.as_enum_number().and_then(Self::from_number).unwrap_or_default()
    }
}

impl From<TestEnum> for Value {
    fn from(value: TestEnum) -> Self {
        Self::Enum(value.number())
    }
}

message_wrapper!(SimpleMessage, SimpleMessageBuilder);
message_wrapper!(TestMessage, TestMessageBuilder);
message_wrapper!(TestMap, TestMapBuilder);
message_wrapper!(TestOneof, TestOneofBuilder);
message_wrapper!(ParentMsg, ParentMsgBuilder);
message_wrapper!(NestedMsg, NestedMsgBuilder);
message_wrapper!(MessageWithoutFields, MessageWithoutFieldsBuilder);
message_wrapper!(TestFieldNamedType, TestFieldNamedTypeBuilder);
message_wrapper!(DefaultValues, DefaultValuesBuilder);

readers!(SimpleMessage, SimpleMessageBuilder => {
    /// Reports whether `int32` is set.
    pub fn has_int32(&self) -> bool {
        self.0.present("int32")
    }

    /// Reads `int32`.
    pub fn int32(&self) -> i32 {
        self.0.value_of("int32").as_i32().unwrap_or_default()
    }

    /// Reports whether `string` is set.
    pub fn has_string(&self) -> bool {
        self.0.present("string")
    }

    /// Reads `string`.
    pub fn string(&self) -> String {
        string_of(&self.0.value_of("string"))
    }

    /// Reports whether `message` is set.
    pub fn has_message(&self) -> bool {
        self.0.present("message")
    }

    /// Reads `message`; the default instance while absent.
    pub fn message(&self) -> TestMessage {
        self.0
            .value_of("message")
            .into_message()
            .map_or_else(TestMessage::default_instance, TestMessage)
    }

    /// Reads `enum`.
    pub fn enum_(&self) -> TestEnum {
        TestEnum::from_value(&self.0.value_of("enum"))
    }

    /// Reads `repeatedString`.
    pub fn repeated_string(&self) -> Vec<String> {
        self.0.list_of("repeatedString").iter().map(string_of).collect()
    }

    /// Counts `repeatedString` elements.
    pub fn repeated_string_count(&self) -> usize {
        self.0.size_of("repeatedString")
    }

    /// Reads `repeatedInt32`.
    pub fn repeated_int32(&self) -> Vec<i32> {
        self.0.list_of("repeatedInt32").iter().filter_map(Value::as_i32).collect()
    }

    /// Counts `repeatedInt32` elements.
    pub fn repeated_int32_count(&self) -> usize {
        self.0.size_of("repeatedInt32")
    }
});

impl SimpleMessageBuilder {
    /// Sets `int32`.
    pub fn set_int32(&mut self, value: i32) -> MessageResult<&mut Self> {
        self.with(|b| b.set("int32", value))
    }

    /// Clears `int32`.
    pub fn clear_int32(&mut self) -> MessageResult<&mut Self> {
        self.with(|b| b.clear("int32"))
    }

    /// Sets `string`.
    pub fn set_string(&mut self, value: &str) -> MessageResult<&mut Self> {
        self.with(|b| b.set("string", value))
    }

    /// Sets `message`.
    pub fn set_message(&mut self, value: TestMessage) -> MessageResult<&mut Self> {
        self.with(|b| b.set("message", value))
    }

    /// Sets `enum`.
    pub fn set_enum(&mut self, value: TestEnum) -> MessageResult<&mut Self> {
        self.with(|b| b.set("enum", value))
    }

    /// Appends to `repeatedString`.
    pub fn add_repeated_string(&mut self, value: &str) -> MessageResult<&mut Self> {
        self.with(|b| b.add("repeatedString", value))
    }

    /// Appends every element to `repeatedString`; `None` is rejected.
    pub fn add_all_repeated_string<'a, I>(&mut self, values: Option<I>) -> MessageResult<&mut Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.with(|b| b.add_all("repeatedString", values))
    }

    /// Clears `repeatedString`.
    pub fn clear_repeated_string(&mut self) -> MessageResult<&mut Self> {
        self.with(|b| b.clear("repeatedString"))
    }

    /// Appends to `repeatedInt32`.
    pub fn add_repeated_int32(&mut self, value: i32) -> MessageResult<&mut Self> {
        self.with(|b| b.add("repeatedInt32", value))
    }

    /// Clears `repeatedInt32`.
    pub fn clear_repeated_int32(&mut self) -> MessageResult<&mut Self> {
        self.with(|b| b.clear("repeatedInt32"))
    }
}

readers!(TestMessage, TestMessageBuilder => {
    /// Reads `a`.
    pub fn a(&self) -> i32 {
        self.0.value_of("a").as_i32().unwrap_or_default()
    }
});

impl TestMessageBuilder {
    /// Sets `a`.
    pub fn set_a(&mut self, value: i32) -> MessageResult<&mut Self> {
        self.with(|b| b.set("a", value))
    }
}

readers!(TestMap, TestMapBuilder => {
    /// Looks up one `mapStringString` entry.
    pub fn map_string_string(&self, key: &str) -> Option<String> {
        MapContainer::get(&self.0.map_of("mapStringString"), &MapKey::from(key)).map(string_of)
    }

    /// Views `mapStringString`.
    pub fn map_string_string_map(&self) -> MapView<'_> {
        self.0.map_of("mapStringString")
    }

    /// Counts `mapStringString` entries.
    pub fn map_string_string_count(&self) -> usize {
        self.0.size_of("mapStringString")
    }

    /// Looks up one `mapInt32Int32` entry.
    pub fn map_int32_int32(&self, key: i32) -> Option<i32> {
        MapContainer::get(&self.0.map_of("mapInt32Int32"), &MapKey::from(key)).and_then(Value::as_i32)
    }

    /// Counts `mapInt32Int32` entries.
    pub fn map_int32_int32_count(&self) -> usize {
        self.0.size_of("mapInt32Int32")
    }

    /// Counts `mapBoolBool` entries.
    pub fn map_bool_bool_count(&self) -> usize {
        self.0.size_of("mapBoolBool")
    }
});

impl TestMapBuilder {
    /// Inserts into `mapStringString`.
    pub fn put_map_string_string(&mut self, key: &str, value: &str) -> MessageResult<&mut Self> {
        self.with(|b| b.put("mapStringString", key, value))
    }

    /// Inserts every entry into `mapStringString`; `None` is rejected.
    pub fn put_all_map_string_string(
        &mut self,
        entries: Option<&BTreeMap<String, String>>,
    ) -> MessageResult<&mut Self> {
        let pairs = entries.map(|map| map.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        self.with(|b| b.put_all("mapStringString", pairs))
    }

    /// Removes a `mapStringString` entry.
    pub fn remove_map_string_string(&mut self, key: &str) -> MessageResult<Option<String>> {
        Ok(self.0.remove("mapStringString", key)?.as_ref().map(string_of))
    }

    /// Clears `mapStringString`.
    pub fn clear_map_string_string(&mut self) -> MessageResult<&mut Self> {
        self.with(|b| b.clear("mapStringString"))
    }

    /// Inserts into `mapInt32Int32`.
    pub fn put_map_int32_int32(&mut self, key: i32, value: i32) -> MessageResult<&mut Self> {
        self.with(|b| b.put("mapInt32Int32", key, value))
    }

    /// Clears `mapInt32Int32`.
    pub fn clear_map_int32_int32(&mut self) -> MessageResult<&mut Self> {
        self.with(|b| b.clear("mapInt32Int32"))
    }

    /// Inserts into `mapBoolBool`.
    pub fn put_map_bool_bool(&mut self, key: bool, value: bool) -> MessageResult<&mut Self> {
        self.with(|b| b.put("mapBoolBool", key, value))
    }

    /// Inserts every entry into `mapBoolBool`; `None` is rejected.
    pub fn put_all_map_bool_bool(&mut self, entries: Option<Vec<(bool, bool)>>) -> MessageResult<&mut Self> {
        self.with(|b| b.put_all("mapBoolBool", entries))
    }
}

/// Active member of `TestOneof.oneofName`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OneofNameCase {
    /// No member is set.
    #[default]
    NotSet,
    /// `fooInt` is set.
    FooInt,
    /// `fooString` is set.
    FooString,
    /// `simpleMessage` is set.
    SimpleMessage,
}

impl From<OneofCase> for OneofNameCase {
    fn from(case: OneofCase) -> Self {
        match case.field_number() {
            Some(1) => Self::FooInt,
            Some(2) => Self::FooString,
            Some(3) => Self::SimpleMessage,
            _ => Self::NotSet,
        }
    }
}

readers!(TestOneof, TestOneofBuilder => {
    /// Reads the active `oneofName` member.
    pub fn oneof_name_case(&self) -> OneofNameCase {
        self.0.case_of("oneofName").into()
    }

    /// Reports whether `fooInt` is the active member.
    pub fn has_foo_int(&self) -> bool {
        self.0.present("fooInt")
    }

    /// Reads `fooInt`.
    pub fn foo_int(&self) -> i32 {
        self.0.value_of("fooInt").as_i32().unwrap_or_default()
    }

    /// Reports whether `fooString` is the active member.
    pub fn has_foo_string(&self) -> bool {
        self.0.present("fooString")
    }

    /// Reads `fooString`.
    pub fn foo_string(&self) -> String {
        string_of(&self.0.value_of("fooString"))
    }

    /// Reads `simpleMessage`; the default instance while inactive.
    pub fn simple_message(&self) -> SimpleMessage {
        self.0
            .value_of("simpleMessage")
            .into_message()
            .map_or_else(SimpleMessage::default_instance, SimpleMessage)
    }
});

impl TestOneofBuilder {
    /// Sets `fooInt`, replacing any other member.
    pub fn set_foo_int(&mut self, value: i32) -> MessageResult<&mut Self> {
        self.with(|b| b.set("fooInt", value))
    }

    /// Sets `fooString`, replacing any other member.
    pub fn set_foo_string(&mut self, value: &str) -> MessageResult<&mut Self> {
        self.with(|b| b.set("fooString", value))
    }

    /// Sets `simpleMessage`, replacing any other member.
    pub fn set_simple_message(&mut self, value: SimpleMessage) -> MessageResult<&mut Self> {
        self.with(|b| b.set("simpleMessage", value))
    }

    /// Resets `oneofName`.
    pub fn clear_oneof_name(&mut self) -> MessageResult<&mut Self> {
        self.with(|b| b.clear_oneof("oneofName"))
    }
}

readers!(ParentMsg, ParentMsgBuilder => {
    /// Reports whether `nestedMsg` is set.
    pub fn has_nested_msg(&self) -> bool {
        self.0.present("nestedMsg")
    }

    /// Reads `nestedMsg`.
    pub fn nested_msg(&self) -> NestedMsg {
        self.0
            .value_of("nestedMsg")
            .into_message()
            .map_or_else(NestedMsg::default_instance, NestedMsg)
    }

    /// Reads `nestedRepeatedMsg`.
    pub fn nested_repeated_msg(&self) -> Vec<NestedMsg> {
        self.0
            .list_of("nestedRepeatedMsg")
            .iter()
            .filter_map(Value::as_message)
            .cloned()
            .map(NestedMsg)
            .collect()
    }

    /// Counts `nestedRepeatedMsg` elements.
    pub fn nested_repeated_msg_count(&self) -> usize {
        self.0.size_of("nestedRepeatedMsg")
    }
});

impl ParentMsgBuilder {
    /// Sets `nestedMsg`.
    pub fn set_nested_msg(&mut self, value: NestedMsg) -> MessageResult<&mut Self> {
        self.with(|b| b.set("nestedMsg", value))
    }

    /// Appends to `nestedRepeatedMsg`.
    pub fn add_nested_repeated_msg(&mut self, value: NestedMsg) -> MessageResult<&mut Self> {
        self.with(|b| b.add("nestedRepeatedMsg", value))
    }
}

readers!(NestedMsg, NestedMsgBuilder => {
    /// Reads `name`.
    pub fn name(&self) -> String {
        string_of(&self.0.value_of("name"))
    }
});

impl NestedMsgBuilder {
    /// Sets `name`.
    pub fn set_name(&mut self, value: &str) -> MessageResult<&mut Self> {
        self.with(|b| b.set("name", value))
    }
}

readers!(TestFieldNamedType, TestFieldNamedTypeBuilder => {
    /// Reads `type`.
    pub fn type_(&self) -> i32 {
        self.0.value_of("type").as_i32().unwrap_or_default()
    }
});

impl TestFieldNamedTypeBuilder {
    /// Sets `type`.
    pub fn set_type(&mut self, value: i32) -> MessageResult<&mut Self> {
        self.with(|b| b.set("type", value))
    }
}

readers!(DefaultValues, DefaultValuesBuilder => {
    /// Reports whether `count` is set.
    pub fn has_count(&self) -> bool {
        self.0.present("count")
    }

    /// Reads `count`.
    pub fn count(&self) -> i32 {
        self.0.value_of("count").as_i32().unwrap_or_default()
    }

    /// Reads `label`.
    pub fn label(&self) -> String {
        string_of(&self.0.value_of("label"))
    }

    /// Reads `enabled`.
    pub fn enabled(&self) -> bool {
        self.0.value_of("enabled").as_bool().unwrap_or_default()
    }

    /// Reads `ratio`.
    pub fn ratio(&self) -> f64 {
        self.0.value_of("ratio").as_f64().unwrap_or_default()
    }

    /// Reads `level`.
    pub fn level(&self) -> TestEnum {
        TestEnum::from_value(&self.0.value_of("level"))
    }

    /// Reads `big`.
    pub fn big(&self) -> u64 {
        self.0.value_of("big").as_u64().unwrap_or_default()
    }
});

impl DefaultValuesBuilder {
    /// Sets `count`.
    pub fn set_count(&mut self, value: i32) -> MessageResult<&mut Self> {
        self.with(|b| b.set("count", value))
    }

    /// Clears `count`.
    pub fn clear_count(&mut self) -> MessageResult<&mut Self> {
        self.with(|b| b.clear("count"))
    }

    /// Sets `level`.
    pub fn set_level(&mut self, value: TestEnum) -> MessageResult<&mut Self> {
        self.with(|b| b.set("level", value))
    }
}
