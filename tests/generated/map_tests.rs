//! Map accessors and read-only views through typed wrappers.

use super::fixtures::TestMap;
use eyre::Result;
use protoform::message::{
    domain::{MapContainer, MapKey, Value},
    error::MessageError,
};
use rstest::{fixture, rstest};
use std::collections::BTreeMap;

#[fixture]
fn test_map() -> TestMap {
    TestMap::new_builder()
        .put_map_string_string("key", "value")
        .and_then(|b| b.put_map_string_string("test", "test"))
        .expect("string entries")
        .build()
}

fn expected_entries() -> BTreeMap<MapKey, Value> {
    [("key", "value"), ("test", "test")]
        .into_iter()
        .map(|(k, v)| (MapKey::from(k), Value::from(v)))
        .collect()
}

#[rstest]
fn map_getter_returns_every_entry(test_map: TestMap) {
    assert_eq!(test_map.map_string_string_map(), expected_entries());
}

#[rstest]
fn single_entries_are_looked_up_by_key(test_map: TestMap) {
    assert_eq!(test_map.map_string_string("key").as_deref(), Some("value"));
    assert_eq!(test_map.map_string_string("missing"), None);
}

#[rstest]
fn counts_entries(test_map: TestMap) {
    assert_eq!(test_map.map_string_string_count(), 2);
    assert_eq!(test_map.map_int32_int32_count(), 0);
}

#[rstest]
fn builder_merge_copies_entries(test_map: TestMap) -> Result<()> {
    let mut builder = TestMap::new_builder();
    builder.merge_from(&test_map)?;
    assert_eq!(builder.map_string_string("key").as_deref(), Some("value"));
    Ok(())
}

#[rstest]
fn put_all_inserts_every_entry() -> Result<()> {
    let entries: BTreeMap<String, String> = [("key", "value"), ("test", "test")]
        .into_iter()
        .map(|(k, v)| (k.to_owned(), v.to_owned()))
        .collect();

    let instance = TestMap::new_builder().put_all_map_string_string(Some(&entries))?.build();

    assert_eq!(instance.map_string_string_map(), expected_entries());
    Ok(())
}

#[rstest]
fn map_view_of_a_built_message_is_read_only(test_map: TestMap) {
    let mut view = test_map.map_string_string_map();
    let err = view
        .insert(Value::from("1"), Value::from("2"))
        .expect_err("views reject writes");

    assert!(matches!(err, MessageError::ImmutableContainer(_)));
    assert_eq!(test_map.map_string_string_count(), 2);
}

#[rstest]
fn clearing_a_map_removes_every_entry() -> Result<()> {
    let mut builder = TestMap::new_builder();
    builder.put_map_int32_int32(10, 10)?;
    assert_eq!(builder.map_int32_int32_count(), 1);
    assert_eq!(builder.map_int32_int32(10), Some(10));

    builder.clear_map_int32_int32()?;

    assert_eq!(builder.map_int32_int32_count(), 0);
    Ok(())
}

#[rstest]
fn equal_keys_overwrite_and_remove_returns_the_value() -> Result<()> {
    let mut builder = TestMap::new_builder();
    builder.put_map_string_string("k", "first")?.put_map_string_string("k", "second")?;
    assert_eq!(builder.map_string_string_count(), 1);

    assert_eq!(builder.remove_map_string_string("k")?.as_deref(), Some("second"));
    assert_eq!(builder.remove_map_string_string("k")?, None);
    Ok(())
}

#[rstest]
fn bool_keyed_maps_accept_both_keys() -> Result<()> {
    let message = TestMap::new_builder()
        .put_all_map_bool_bool(Some(vec![(true, false), (false, true)]))?
        .build();
    assert_eq!(message.map_bool_bool_count(), 2);
    assert_eq!(message.to_string(), "TestMap{mapBoolBool={false=true, true=false}}");
    Ok(())
}
