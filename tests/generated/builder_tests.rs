//! Builder behaviour through typed wrappers.

use super::fixtures::{
    DefaultValues, MessageWithoutFields, NestedMsg, ParentMsg, SimpleMessage, TestEnum, TestFieldNamedType,
    TestMessage,
};
use eyre::Result;
use rstest::rstest;

fn nested(name: &str) -> Result<NestedMsg> {
    Ok(NestedMsg::new_builder().set_name(name)?.build())
}

#[rstest]
fn created_instance_exposes_nested_messages() -> Result<()> {
    let instance = ParentMsg::new_builder()
        .set_nested_msg(nested("1")?)?
        .add_nested_repeated_msg(nested("2")?)?
        .build();

    assert!(instance.has_nested_msg());
    assert_eq!(instance.nested_msg().name(), "1");
    assert_eq!(instance.nested_repeated_msg_count(), 1);
    assert_eq!(
        instance.nested_repeated_msg().first().map(NestedMsg::name).as_deref(),
        Some("2")
    );
    Ok(())
}

#[rstest]
fn merge_from_copies_every_field() -> Result<()> {
    let source = ParentMsg::new_builder()
        .set_nested_msg(nested("1")?)?
        .add_nested_repeated_msg(nested("2")?)?
        .build();

    let instance = ParentMsg::new_builder().merge_from(&source)?.build();

    assert!(instance.has_nested_msg());
    assert_eq!(instance.nested_msg().name(), "1");
    assert_eq!(instance.nested_repeated_msg_count(), 1);
    assert_eq!(instance, source);
    Ok(())
}

#[rstest]
fn clearing_a_scalar_restores_absence() -> Result<()> {
    let mut builder = SimpleMessage::new_builder();
    builder.set_int32(10)?;
    assert!(builder.has_int32());
    assert_eq!(builder.int32(), 10);

    builder.clear_int32()?;

    assert!(!builder.has_int32());
    assert_eq!(builder.int32(), 0);
    Ok(())
}

#[rstest]
fn clearing_a_repeated_field_empties_it() -> Result<()> {
    let mut builder = SimpleMessage::new_builder();
    builder.add_repeated_int32(10)?;
    assert_eq!(builder.repeated_int32_count(), 1);
    assert_eq!(builder.repeated_int32(), vec![10]);

    builder.clear_repeated_int32()?;

    assert_eq!(builder.repeated_int32_count(), 0);
    Ok(())
}

#[rstest]
fn unset_message_field_returns_the_shared_default_instance() {
    let message = SimpleMessage::new_builder().build();
    assert!(!message.has_message());
    assert!(message.message().ptr_eq(&TestMessage::default_instance()));
}

#[rstest]
fn default_instances_are_shared() {
    assert!(SimpleMessage::default_instance().ptr_eq(&SimpleMessage::default_instance()));
    assert_eq!(MessageWithoutFields::new_builder().build(), MessageWithoutFields::default_instance());
}

#[rstest]
fn field_named_after_a_keyword_gets_an_escaped_getter() -> Result<()> {
    let message = TestFieldNamedType::new_builder().set_type(42)?.build();
    assert_eq!(message.type_(), 42);
    Ok(())
}

#[rstest]
fn declared_defaults_apply_while_absent() {
    let message = DefaultValues::default_instance();
    assert!(!message.has_count());
    assert_eq!(message.count(), 7);
    assert_eq!(message.label(), "hello");
    assert!(message.enabled());
    assert!(message.ratio().total_cmp(&0.25).is_eq());
    assert_eq!(message.level(), TestEnum::Second);
    assert_eq!(message.big(), u64::MAX);
    assert_eq!(message.to_string(), "DefaultValues{}");
}

#[rstest]
fn explicitly_set_defaults_are_present() -> Result<()> {
    let mut builder = DefaultValues::new_builder();
    builder.set_count(7)?.set_level(TestEnum::First)?;

    let message = builder.build();
    assert!(message.has_count());
    assert_eq!(message.level(), TestEnum::First);
    assert_eq!(message.to_string(), "DefaultValues{count=7, level=FIRST}");
    assert_ne!(message, DefaultValues::default_instance());

    builder.clear_count()?;
    assert!(!builder.has_count());
    assert_eq!(builder.count(), 7);
    Ok(())
}

#[rstest]
fn built_messages_are_unaffected_by_later_edits() -> Result<()> {
    let mut builder = SimpleMessage::new_builder();
    builder.set_int32(1)?.add_repeated_string("a")?;
    let first = builder.build();

    builder.set_int32(2)?.add_repeated_string("b")?;

    assert_eq!(first.int32(), 1);
    assert_eq!(first.repeated_string(), vec!["a"]);
    assert_eq!(builder.build().repeated_string(), vec!["a", "b"]);
    Ok(())
}

#[rstest]
fn to_builder_round_trips() -> Result<()> {
    let message = SimpleMessage::new_builder()
        .set_int32(5)?
        .set_enum(TestEnum::Second)?
        .set_message(TestMessage::new_builder().set_a(9)?.build())?
        .build();

    let mut edited = message.to_builder();
    assert_eq!(edited.build(), message);

    edited.set_int32(6)?;
    assert_eq!(message.int32(), 5);
    assert_eq!(edited.enum_(), TestEnum::Second);
    assert_eq!(edited.message().a(), 9);
    Ok(())
}
