//! # Vetted
//!
//! A value validation and coercion engine. Processors turn an untyped
//! `serde_json::Value` into either a typed value or a list of issues, each
//! issue carrying the exact structural location of the failure.
//!
//! ## Overview
//!
//! Every processor is a fixed pipeline of stages:
//!
//! 1. a presence gate: required (`not-defined` on null) or optional (`None`)
//! 2. a type gate: strict (`incorrect-type`) or converting (`no-conversion`)
//! 3. coercion: adjusts a correctly typed value, e.g. clamping into range
//! 4. validation: domain constraints such as `min`, `max-length` or `pattern`
//!
//! The four builders [`create_is_check`], [`create_maybe_check`],
//! [`create_as_check`] and [`create_maybe_as_check`] assemble these stages for
//! any [`Kind`]. Array and object kinds nest processors and qualify the issues
//! they return with an index or key, so failures read like `users[0].email`.
//!
//! ## Core Types
//!
//! - [`Outcome`]: `stillwater::Validation<T, Issues>`
//! - [`Issue`] / [`Issues`]: a failure with path, reason, value and context
//! - [`Kind`] / [`Convert`]: what a concrete type supplies to the builders
//! - [`ValueProcessor`]: the single entry point into a built processor
//!
//! ## Example
//!
//! ```rust
//! use vetted::{
//!     as_number, is_array, is_object, is_string, ArrayOptions, NumberOptions, ObjectKind,
//!     Reason, StringOptions, WithDefault,
//! };
//! use serde_json::json;
//!
//! let id = is_string(StringOptions {
//!     min_length: Some(1),
//!     ..Default::default()
//! })
//! .unwrap();
//! let quantity = as_number(
//!     WithDefault::none(),
//!     NumberOptions {
//!         min: Some(1.0),
//!         ..Default::default()
//!     },
//! )
//! .unwrap();
//!
//! let order = is_object(
//!     ObjectKind::new()
//!         .field("id", id)
//!         .field("quantities", is_array(quantity, ArrayOptions::default()).unwrap()),
//! )
//! .unwrap();
//!
//! let valid = order.process(&json!({"id": "A1", "quantities": ["2", 5]}));
//! assert_eq!(
//!     serde_json::Value::Object(valid.into_result().unwrap()),
//!     json!({"id": "A1", "quantities": [2, 5]})
//! );
//!
//! let issues = order
//!     .process(&json!({"id": "", "quantities": [3, "many", 0]}))
//!     .into_result()
//!     .unwrap_err();
//! let found: Vec<_> = issues.iter().map(|i| (i.path.to_string(), i.reason.clone())).collect();
//! assert_eq!(
//!     found,
//!     vec![
//!         ("id".to_string(), Reason::MinLength),
//!         ("quantities[1]".to_string(), Reason::NoConversion),
//!         ("quantities[2]".to_string(), Reason::Min),
//!     ]
//! );
//! ```

pub mod check;
pub mod config;
pub mod issue;
pub mod kind;
pub mod kinds;
pub mod path;
pub mod processor;
pub mod registry;
pub mod stage;

pub use check::{
    create_as_check, create_is_check, create_maybe_as_check, create_maybe_check, Check, MaybeCheck,
};
pub use config::ConfigError;
pub use issue::{is_issue, Issue, Issues, Outcome, Reason};
pub use kind::{Convert, Kind};
pub use kinds::{
    as_boolean, as_date, as_number, as_string, is_array, is_boolean, is_date, is_number, is_object,
    is_string, maybe_array, maybe_as_boolean, maybe_as_date, maybe_as_number, maybe_as_string,
    maybe_boolean, maybe_date, maybe_number, maybe_object, maybe_string, ArrayKind, ArrayOptions,
    BooleanKind, DateKind, DateOptions, NumberKind, NumberOptions, ObjectKind, StringKind,
    StringOptions,
};
pub use path::{IssuePath, PathSegment};
pub use processor::{AnyProcessor, ValueProcessor};
pub use registry::{ProcessorRegistry, RegistryError};
pub use stage::{null_or_undefined, Empty, MaybeOptions, Next, Stage, WithDefault};
