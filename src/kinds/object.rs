//! Object values.
//!
//! This module provides [`ObjectKind`] for JSON objects with declared fields.
//! Each field has its own processor; field issues are qualified with the
//! field name and collected across all fields.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use stillwater::prelude::*;

use crate::check::{create_is_check, create_maybe_check, Check, MaybeCheck};
use crate::config::ConfigError;
use crate::issue::{Issues, Outcome};
use crate::kind::Kind;
use crate::processor::AnyProcessor;
use crate::stage::{MaybeOptions, Next};

/// JSON objects with declared fields.
///
/// Fields are processed in declaration order. A missing field is presented
/// to its processor as `null`, so required fields report `not-defined` and
/// optional fields are simply absent. The output holds only declared fields
/// whose processed value is not `null`; undeclared input fields are dropped.
///
/// # Example
///
/// ```rust
/// use vetted::{
///     is_number, is_object, maybe_string, MaybeOptions, NumberOptions, ObjectKind,
///     StringOptions,
/// };
/// use serde_json::json;
///
/// let user = is_object(
///     ObjectKind::new()
///         .field("name", maybe_string(MaybeOptions::new(), StringOptions::default()).unwrap())
///         .field(
///             "age",
///             is_number(NumberOptions {
///                 min: Some(0.0),
///                 ..Default::default()
///             })
///             .unwrap(),
///         ),
/// )
/// .unwrap();
///
/// let output = user.process(&json!({"age": 30, "extra": true})).into_result().unwrap();
/// assert_eq!(serde_json::Value::Object(output), json!({"age": 30}));
///
/// let issues = user.process(&json!({"age": -1})).into_result().unwrap_err();
/// assert_eq!(issues.first().path.to_string(), "age");
/// ```
pub struct ObjectKind {
    fields: IndexMap<String, Box<dyn AnyProcessor>>,
}

impl ObjectKind {
    /// Creates an object kind with no fields.
    pub fn new() -> Self {
        Self {
            fields: IndexMap::new(),
        }
    }

    /// Declares a field. Re-declaring a name replaces its processor but keeps
    /// its original position.
    pub fn field<P>(mut self, name: impl Into<String>, processor: P) -> Self
    where
        P: AnyProcessor + 'static,
    {
        self.fields.insert(name.into(), Box::new(processor));
        self
    }

    /// Declared field names, in processing order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

impl Default for ObjectKind {
    fn default() -> Self {
        Self::new()
    }
}

impl Kind for ObjectKind {
    type Target = Map<String, Value>;
    type Options = ();

    fn type_name(&self) -> &str {
        "object"
    }

    fn check(&self, value: &Value) -> Option<Map<String, Value>> {
        value.as_object().cloned()
    }

    fn matches(&self, value: &Value) -> bool {
        value.is_object()
    }

    fn coerce(
        &self,
        value: Map<String, Value>,
        _options: &(),
        next: Next<'_, Map<String, Value>, Map<String, Value>>,
    ) -> Outcome<Map<String, Value>> {
        let mut output = Map::new();
        let mut failures: Option<Issues> = None;

        for (name, processor) in &self.fields {
            let input = value.get(name).unwrap_or(&Value::Null);
            match processor.process_value(input) {
                Validation::Success(Value::Null) => {}
                Validation::Success(processed) => {
                    output.insert(name.clone(), processed);
                }
                Validation::Failure(issues) => {
                    let issues = issues.prepend_key(name);
                    failures = Some(match failures {
                        Some(acc) => acc.combine(issues),
                        None => issues,
                    });
                }
            }
        }

        match failures {
            None => next(output),
            Some(issues) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    fields = self.fields.len(),
                    issues = issues.len(),
                    "object fields rejected"
                );
                Validation::Failure(issues)
            }
        }
    }

    fn to_value(&self, value: Map<String, Value>) -> Value {
        Value::Object(value)
    }
}

/// Required object with the fields declared on `kind`.
pub fn is_object(kind: ObjectKind) -> Result<Check<ObjectKind>, ConfigError> {
    create_is_check(kind, ())
}

/// Optional object with the fields declared on `kind`.
pub fn maybe_object(
    kind: ObjectKind,
    mode: MaybeOptions,
) -> Result<MaybeCheck<ObjectKind>, ConfigError> {
    create_maybe_check(kind, mode, ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::Reason;
    use crate::kinds::{
        as_string, is_array, is_number, is_string, maybe_string, ArrayOptions, NumberOptions,
        StringOptions,
    };
    use crate::path::IssuePath;
    use crate::stage::WithDefault;
    use serde_json::json;

    fn unwrap_success<T, E: std::fmt::Debug>(v: Validation<T, E>) -> T {
        v.into_result().unwrap()
    }

    fn unwrap_failure<T: std::fmt::Debug, E>(v: Validation<T, E>) -> E {
        v.into_result().unwrap_err()
    }

    fn person() -> ObjectKind {
        ObjectKind::new()
            .field(
                "name",
                is_string(StringOptions {
                    min_length: Some(1),
                    ..Default::default()
                })
                .unwrap(),
            )
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
    fn test_empty_object_kind() {
        let schema = is_object(ObjectKind::new()).unwrap();
        assert_eq!(unwrap_success(schema.process(&json!({}))), Map::new());
        assert_eq!(unwrap_success(schema.process(&json!({"a": 1}))), Map::new());
    }

    #[test]
    fn test_rejects_non_object() {
        let schema = is_object(person()).unwrap();
        for value in [json!("x"), json!(1), json!([1, 2])] {
            let issues = unwrap_failure(schema.process(&value));
            assert!(issues.is_single(&Reason::IncorrectType));
            assert_eq!(issues.first().context_value("expectedType"), Some(&json!("object")));
        }
        assert!(unwrap_failure(schema.process(&json!(null))).is_single(&Reason::NotDefined));
    }

    #[test]
    fn test_missing_required_field() {
        let schema = is_object(person()).unwrap();
        let issues = unwrap_failure(schema.process(&json!({"name": "Alice"})));
        assert!(issues.is_single(&Reason::NotDefined));
        assert_eq!(issues.first().path.to_string(), "age");
    }

    #[test]
    fn test_field_issues_accumulate_in_declaration_order() {
        let schema = is_object(person()).unwrap();
        let issues = unwrap_failure(schema.process(&json!({"age": -5, "name": ""})));
        let paths: Vec<_> = issues.iter().map(|i| i.path.to_string()).collect();
        assert_eq!(paths, vec!["name", "age"]);
        assert_eq!(issues.at_path(&IssuePath::from_segments(["age"])).len(), 1);
    }

    #[test]
    fn test_undeclared_fields_are_dropped() {
        let schema = is_object(person()).unwrap();
        let output = unwrap_success(schema.process(&json!({
            "name": "Alice",
            "age": 30,
            "role": "admin"
        })));
        assert_eq!(Value::Object(output), json!({"name": "Alice", "age": 30}));
    }

    #[test]
    fn test_mixed_field_modes() {
        let schema = is_object(
            ObjectKind::new()
                .field(
                    "nickname",
                    maybe_string(MaybeOptions::new(), StringOptions::default()).unwrap(),
                )
                .field("label", is_string(StringOptions::default()).unwrap())
                .field(
                    "code",
                    as_string(WithDefault::none(), StringOptions::default()).unwrap(),
                ),
        )
        .unwrap();

        let issues = unwrap_failure(schema.process(&json!({
            "nickname": 123,
            "label": "x",
            "code": 123
        })));
        assert!(issues.is_single(&Reason::IncorrectType));
        assert_eq!(issues.first().path.to_string(), "nickname");

        let output = unwrap_success(schema.process(&json!({"label": "x", "code": 123})));
        assert_eq!(Value::Object(output), json!({"label": "x", "code": "123"}));
    }

    #[test]
    fn test_nested_paths() {
        let schema = is_array(is_object(person()).unwrap(), ArrayOptions::default()).unwrap();
        let issues = unwrap_failure(schema.process(&json!([
            {"name": "Alice", "age": 30},
            {"name": 7, "age": 30}
        ])));
        assert!(issues.is_single(&Reason::IncorrectType));
        assert_eq!(issues.first().path.to_string(), "[1].name");
    }

    #[test]
    fn test_nested_object_in_object() {
        let owner = is_object(person()).unwrap();
        let schema = is_object(ObjectKind::new().field("owner", owner)).unwrap();
        let issues = unwrap_failure(schema.process(&json!({"owner": {"name": "Bo", "age": -1}})));
        assert_eq!(issues.first().path.to_string(), "owner.age");
        assert_eq!(issues.first().reason, Reason::Min);
    }

    #[test]
    fn test_maybe_object() {
        let schema = maybe_object(person(), MaybeOptions::new()).unwrap();
        assert_eq!(unwrap_success(schema.process(&json!(null))), None);
        assert!(schema.process(&json!({"name": "A", "age": 1})).is_success());
        assert!(schema.process(&json!({"name": "A"})).is_failure());
    }

    #[test]
    fn test_redeclared_field_keeps_position() {
        let kind = person().field(
            "name",
            maybe_string(MaybeOptions::new(), StringOptions::default()).unwrap(),
        );
        let names: Vec<_> = kind.field_names().collect();
        assert_eq!(names, vec!["name", "age"]);
    }
}
