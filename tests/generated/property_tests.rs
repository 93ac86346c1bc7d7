//! Properties of equality, hashing, rendering and merging.

use super::fixtures::{SimpleMessage, TestMap};
use proptest::prelude::*;
use std::collections::BTreeMap;
use std::hash::{BuildHasher, RandomState};

fn map_from(entries: impl IntoIterator<Item = (i32, i32)>) -> TestMap {
    let mut builder = TestMap::new_builder();
    for (key, value) in entries {
        builder.put_map_int32_int32(key, value).expect("int32 entry");
    }
    builder.build()
}

fn simple(int32: i32, text: &str, numbers: &[i32]) -> SimpleMessage {
    let mut builder = SimpleMessage::new_builder();
    builder
        .set_int32(int32)
        .and_then(|b| b.set_string(text))
        .expect("scalar values");
    for number in numbers {
        builder.add_repeated_int32(*number).expect("int32 element");
    }
    builder.build()
}

proptest! {
    #[test]
    fn map_insertion_order_is_irrelevant(entries in prop::collection::btree_map(any::<i32>(), any::<i32>(), 0..16)) {
        let forward = map_from(entries.iter().map(|(k, v)| (*k, *v)));
        let backward = map_from(entries.iter().rev().map(|(k, v)| (*k, *v)));
        let state = RandomState::new();

        prop_assert_eq!(&forward, &backward);
        prop_assert_eq!(state.hash_one(&forward), state.hash_one(&backward));
        prop_assert_eq!(forward.to_string(), backward.to_string());
    }

    #[test]
    fn scalar_write_order_is_irrelevant(int32 in any::<i32>(), text in "[a-z]{0,8}") {
        let mut first = SimpleMessage::new_builder();
        first.set_int32(int32).and_then(|b| b.set_string(&text)).expect("scalar values");
        let mut second = SimpleMessage::new_builder();
        second.set_string(&text).and_then(|b| b.set_int32(int32)).expect("scalar values");

        prop_assert_eq!(first.build(), second.build());
    }

    #[test]
    fn merging_into_an_empty_builder_reproduces_the_message(
        int32 in any::<i32>(),
        text in "[a-z]{0,8}",
        numbers in prop::collection::vec(any::<i32>(), 0..8),
    ) {
        let message = simple(int32, &text, &numbers);
        let mut builder = SimpleMessage::new_builder();
        builder.merge_from(&message).expect("same type");

        prop_assert_eq!(&builder.build(), &message);
        prop_assert_eq!(&message.to_builder().build(), &message);
    }

    #[test]
    fn repeated_merge_concatenates(
        left in prop::collection::vec(any::<i32>(), 0..8),
        right in prop::collection::vec(any::<i32>(), 0..8),
    ) {
        let mut builder = simple(0, "", &left).to_builder();
        builder.merge_from(&simple(0, "", &right)).expect("same type");

        let expected: Vec<i32> = left.iter().chain(&right).copied().collect();
        prop_assert_eq!(builder.repeated_int32(), expected);
    }

    #[test]
    fn map_merge_prefers_the_source(
        target in prop::collection::btree_map(0..8_i32, any::<i32>(), 0..8),
        source in prop::collection::btree_map(0..8_i32, any::<i32>(), 0..8),
    ) {
        let mut builder = map_from(target.clone()).to_builder();
        builder.merge_from(&map_from(source.clone())).expect("same type");

        let mut expected: BTreeMap<i32, i32> = target;
        expected.extend(source);
        prop_assert_eq!(builder.build(), map_from(expected));
    }
}
