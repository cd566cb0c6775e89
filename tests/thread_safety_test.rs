//! Tests for sharing processors and the registry across threads.

use serde_json::json;
use std::sync::Arc;
use std::thread;
use vetted::{
    is_array, is_number, is_object, is_string, ArrayOptions, NumberOptions, ObjectKind,
    ProcessorRegistry, Reason, StringOptions, ValueProcessor,
};

fn user_kind() -> ObjectKind {
    ObjectKind::new()
        .field("name", is_string(StringOptions::default()).unwrap())
        .field(
            "age",
            is_number(NumberOptions {
                min: Some(0.0),
                ..Default::default()
            })
            .unwrap(),
        )
}

#[test]
fn test_processor_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<vetted::Check<vetted::ObjectKind>>();
    assert_send_sync::<vetted::MaybeCheck<vetted::ArrayKind>>();
    assert_send_sync::<ProcessorRegistry>();
}

#[test]
fn test_concurrent_processing() {
    let user = is_object(user_kind()).unwrap();
    let users = Arc::new(is_array(user, ArrayOptions::default()).unwrap());

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let users = Arc::clone(&users);
            thread::spawn(move || {
                let age = if i % 2 == 0 { json!(20 + i) } else { json!(-i) };
                let outcome = users.process(&json!([{"name": format!("User{i}"), "age": age}]));
                (i, outcome)
            })
        })
        .collect();

    for handle in handles {
        let (i, outcome) = handle.join().unwrap();
        if i % 2 == 0 {
            assert!(outcome.is_success());
        } else {
            let issues = outcome.into_result().unwrap_err();
            assert!(issues.is_single(&Reason::Min));
            assert_eq!(issues.first().path.to_string(), "[0].age");
        }
    }
}

#[test]
fn test_concurrent_registry_access() {
    let registry = ProcessorRegistry::new();
    registry.register("User", is_object(user_kind()).unwrap()).unwrap();

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let registry = registry.clone();
            thread::spawn(move || {
                registry
                    .process("User", &json!({"name": format!("User{i}"), "age": i}))
                    .unwrap()
                    .is_success()
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}

#[test]
fn test_concurrent_registration() {
    let registry = ProcessorRegistry::new();

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let registry = registry.clone();
            thread::spawn(move || {
                registry
                    .register(format!("Name{i}"), is_string(StringOptions::default()).unwrap())
                    .unwrap();
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(registry.len(), 10);
}

#[test]
fn test_shared_processor_output_is_stable() {
    let users = Arc::new(is_object(user_kind()).unwrap());
    let input = json!({"name": "Ada", "age": 36, "extra": 1});
    let expected = users.process_to_value(&input);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let users = Arc::clone(&users);
            let input = input.clone();
            thread::spawn(move || users.process_to_value(&input))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
