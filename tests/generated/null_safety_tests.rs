//! Null rejection through the dynamic surface and bulk operations.

use super::fixtures::{SimpleMessage, TestMap, TestOneof};
use protoform::message::{
    domain::Value,
    error::{MessageError, NullPosition},
};
use protoform::schema::domain::AccessorNames;
use rstest::rstest;

fn null_error(err: &MessageError) -> String {
    match err {
        MessageError::NullValue(null) => null.to_string(),
        other => panic!("expected a null-value error, got {other}"),
    }
}

// Errors name the field as declared in the schema. The generated getter is
// escaped (`enum_`), but the field itself is still `enum`.
#[rstest]
#[case("string", "Cannot set SimpleMessage#string to null")]
#[case("message", "Cannot set SimpleMessage#message to null")]
#[case("enum", "Cannot set SimpleMessage#enum to null")]
fn singular_fields_reject_null(#[case] field: &str, #[case] expected: &str) {
    let mut builder = SimpleMessage::new_builder();
    let err = builder
        .dynamic_mut()
        .set(field, Value::Null)
        .expect_err("null is rejected");
    assert_eq!(null_error(&err), expected);
}

#[rstest]
fn keyword_fields_report_the_declared_name() {
    let message_type = SimpleMessage::message_type();
    let field = message_type.field("enum").expect("declared field");
    assert_eq!(AccessorNames::for_field(field).getter(), "enum_");

    let mut builder = SimpleMessage::new_builder();
    let err = builder
        .dynamic_mut()
        .set("enum", Value::Null)
        .expect_err("null is rejected");
    assert_eq!(null_error(&err), "Cannot set SimpleMessage#enum to null");
}

#[rstest]
fn repeated_elements_reject_null() {
    let mut builder = SimpleMessage::new_builder();
    let err = builder
        .dynamic_mut()
        .add("repeatedString", None::<String>)
        .expect_err("null is rejected");
    assert_eq!(null_error(&err), "Cannot set SimpleMessage#repeatedString to null");
}

#[rstest]
fn bulk_add_rejects_a_missing_collection() {
    let mut builder = SimpleMessage::new_builder();
    let err = builder
        .add_all_repeated_string(None::<Vec<&str>>)
        .expect_err("null is rejected");
    assert_eq!(null_error(&err), "Cannot set SimpleMessage#repeatedString to null");
}

#[rstest]
fn bulk_add_rejects_null_elements_atomically() {
    let mut builder = SimpleMessage::new_builder();
    let err = builder
        .dynamic_mut()
        .add_all("repeatedString", Some(vec![Some("a"), None]))
        .expect_err("null is rejected");
    assert!(matches!(err, MessageError::NullValue(_)));
    assert_eq!(builder.repeated_string_count(), 0);
}

#[rstest]
fn oneof_members_reject_null() {
    let mut builder = TestOneof::new_builder();
    let err = builder
        .dynamic_mut()
        .set("fooString", Value::Null)
        .expect_err("null is rejected");
    assert_eq!(null_error(&err), "Cannot set TestOneof#fooString to null");
}

#[rstest]
fn map_values_reject_null() {
    let mut builder = TestMap::new_builder();
    let err = builder
        .dynamic_mut()
        .put("mapBoolBool", true, Value::Null)
        .expect_err("null is rejected");
    assert_eq!(null_error(&err), "Cannot set TestMap#mapBoolBool - map value is null");
    if let MessageError::NullValue(null) = err {
        assert_eq!(null.position(), NullPosition::MapValue);
    }
}

#[rstest]
fn map_keys_reject_null() {
    let mut builder = TestMap::new_builder();
    let err = builder
        .dynamic_mut()
        .put("mapBoolBool", Value::Null, true)
        .expect_err("null is rejected");
    assert_eq!(null_error(&err), "Cannot set TestMap#mapBoolBool - map key is null");
}

#[rstest]
fn bulk_put_rejects_a_missing_collection() {
    let mut builder = TestMap::new_builder();
    let err = builder.put_all_map_bool_bool(None).expect_err("null is rejected");
    assert_eq!(null_error(&err), "Cannot set TestMap#mapBoolBool to null");
}

#[rstest]
fn rejected_writes_leave_the_builder_unchanged() {
    let mut builder = SimpleMessage::new_builder();
    builder.set_string("kept").expect("string value");
    let before = builder.clone();

    builder
        .dynamic_mut()
        .set("string", Value::Null)
        .expect_err("null is rejected");

    assert_eq!(builder, before);
    assert_eq!(builder.string(), "kept");
}
