//! Sharing pools, default instances and built messages across threads.

use super::fixtures::{SimpleMessage, TestMessage, pool};
use protoform::message::domain::{Message, MessageBuilder};
use protoform::schema::{DescriptorPool, MessageType};
use rstest::rstest;
use std::thread;

const fn assert_send_sync<T: Send + Sync>() {}

#[rstest]
fn runtime_types_are_thread_safe() {
    assert_send_sync::<DescriptorPool>();
    assert_send_sync::<MessageType>();
    assert_send_sync::<Message>();
    assert_send_sync::<MessageBuilder>();
    assert_send_sync::<SimpleMessage>();
}

#[rstest]
fn concurrent_first_access_yields_one_default_instance() {
    let instances: Vec<TestMessage> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(TestMessage::default_instance))
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("thread completes"))
            .collect()
    });

    let first = instances.first().expect("at least one thread");
    assert!(instances.iter().all(|instance| instance.ptr_eq(first)));
    assert!(pool().default_instances().materialised() >= 1);
}

#[rstest]
fn built_messages_are_readable_from_many_threads() {
    let message = SimpleMessage::new_builder()
        .set_int32(7)
        .and_then(|b| b.add_repeated_string("shared"))
        .expect("valid values")
        .build();

    thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                assert_eq!(message.int32(), 7);
                assert_eq!(message.to_string(), "SimpleMessage{int32=7, repeatedString=[shared]}");
            });
        }
    });
}

#[rstest]
fn builders_move_between_threads() {
    let mut builder = SimpleMessage::new_builder();
    builder.set_int32(1).expect("int32 value");

    let message = thread::spawn(move || {
        builder.add_repeated_int32(2).expect("int32 element");
        builder.build()
    })
    .join()
    .expect("thread completes");

    assert_eq!(message.repeated_int32(), vec![2]);
    assert_eq!(message.int32(), 1);
}
