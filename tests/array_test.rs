//! Integration tests for array processing.

use serde_json::{json, Value};
use vetted::{
    create_is_check, is_array, is_number, is_object, is_string, maybe_array, ArrayKind,
    ArrayOptions, MaybeOptions, NumberOptions, ObjectKind, Reason, StringOptions,
};

/// Helper to extract the success value from a Validation
fn unwrap_success<T, E: std::fmt::Debug>(v: stillwater::Validation<T, E>) -> T {
    v.into_result().unwrap()
}

/// Helper to extract the error value from a Validation
fn unwrap_failure<T, E>(v: stillwater::Validation<T, E>) -> E
where
    T: std::fmt::Debug,
{
    v.into_result().unwrap_err()
}

fn scores(options: ArrayOptions) -> vetted::Check<ArrayKind> {
    is_array(
        is_number(NumberOptions {
            coerce_max: Some(500.0),
            min: Some(25.0),
            ..Default::default()
        })
        .unwrap(),
        options,
    )
    .unwrap()
}

#[test]
fn test_empty_array_below_min_length() {
    let schema = create_is_check(
        ArrayKind::any(),
        ArrayOptions {
            min_length: Some(1),
            ..Default::default()
        },
    )
    .unwrap();

    let issues = unwrap_failure(schema.process(&json!([])));
    assert_eq!(issues.len(), 1);
    assert_eq!(issues.first().reason, Reason::MinLength);
    assert!(issues.first().path.is_root());
    assert_eq!(issues.first().value, json!([]));
}

#[test]
fn test_element_below_min() {
    let issues = unwrap_failure(scores(ArrayOptions::default()).process(&json!([87, 2, 45])));
    assert_eq!(issues.len(), 1);
    assert_eq!(issues.first().reason, Reason::Min);
    assert_eq!(issues.first().path.to_string(), "[1]");
    assert_eq!(issues.first().value, json!(2));
}

#[test]
fn test_element_wrong_type() {
    for bad in [json!("87"), json!(null), json!({}), json!([2])] {
        let input = json!([87, bad, 45]);
        let issues = unwrap_failure(scores(ArrayOptions::default()).process(&input));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues.first().path.to_string(), "[1]");
        let expected = if bad.is_null() {
            Reason::NotDefined
        } else {
            Reason::IncorrectType
        };
        assert_eq!(issues.first().reason, expected);
    }
}

#[test]
fn test_element_coercion() {
    let schema = scores(ArrayOptions::default());
    let output = unwrap_success(schema.process(&json!([87, 223, 543, 56])));
    assert_eq!(Value::Array(output), json!([87, 223, 500, 56]));
}

#[test]
fn test_every_failing_element_reported() {
    let schema = scores(ArrayOptions::default());
    let issues = unwrap_failure(schema.process(&json!([1, 2, 30, "x", 4])));
    let paths: Vec<String> = issues.iter().map(|i| i.path.to_string()).collect();
    assert_eq!(paths, vec!["[0]", "[1]", "[3]", "[4]"]);
}

#[test]
fn test_length_and_element_issues_together() {
    let schema = scores(ArrayOptions {
        max_length: Some(2),
        ..Default::default()
    });

    // Length alone
    let issues = unwrap_failure(schema.process(&json!([30, 40, 50])));
    assert!(issues.is_single(&Reason::MaxLength));
    assert_eq!(issues.first().context_value("maxLength"), Some(&json!(2)));

    // Length plus an element, container first
    let issues = unwrap_failure(schema.process(&json!([30, 40, 5])));
    let reasons: Vec<&str> = issues.iter().map(|i| i.reason.as_str()).collect();
    assert_eq!(reasons, vec!["max-length", "min"]);
}

#[test]
fn test_array_of_objects_paths() {
    let tags = is_array(
        is_string(StringOptions::default()).unwrap(),
        ArrayOptions::default(),
    )
    .unwrap();
    let user = ObjectKind::new()
        .field(
            "name",
            is_string(StringOptions {
                min_length: Some(1),
                ..Default::default()
            })
            .unwrap(),
        )
        .field("tags", tags);
    let schema = is_array(is_object(user).unwrap(), ArrayOptions::default()).unwrap();

    let issues = unwrap_failure(schema.process(&json!([
        {"name": "Alice", "tags": ["a"]},
        {"name": "", "tags": ["b", 3]}
    ])));
    let paths: Vec<String> = issues.iter().map(|i| i.path.to_string()).collect();
    assert_eq!(paths, vec!["[1].name", "[1].tags[1]"]);
}

#[test]
fn test_optional_array() {
    let schema = maybe_array(
        is_number(NumberOptions::default()).unwrap(),
        MaybeOptions::new().incorrect_type_to_undefined(true),
        ArrayOptions::default(),
    )
    .unwrap();

    assert_eq!(unwrap_success(schema.process(&json!(null))), None);
    assert_eq!(unwrap_success(schema.process(&json!("not an array"))), None);
    // Element issues are not masked by the container's mode
    assert!(unwrap_failure(schema.process(&json!([1, "2"]))).is_single(&Reason::IncorrectType));
}

#[test]
fn test_process_is_idempotent() {
    let schema = scores(ArrayOptions::default());
    let once = unwrap_success(schema.process(&json!([87, 9000, 30.5])));
    let twice = unwrap_success(schema.process(&Value::Array(once.clone())));
    assert_eq!(once, twice);
}
