//! Concrete kinds and their convenience constructors.
//!
//! Leaf kinds (number, string, boolean, date) convert and validate scalars.
//! Structural kinds (array, object) run nested processors and qualify the
//! issues they return with an index or key.

mod array;
mod boolean;
mod date;
mod number;
mod object;
mod string;

pub use array::{is_array, maybe_array, ArrayKind, ArrayOptions};
pub use boolean::{as_boolean, is_boolean, maybe_as_boolean, maybe_boolean, BooleanKind};
pub use date::{as_date, is_date, maybe_as_date, maybe_date, DateKind, DateOptions};
pub use number::{as_number, is_number, maybe_as_number, maybe_number, NumberKind, NumberOptions};
pub use object::{is_object, maybe_object, ObjectKind};
pub use string::{as_string, is_string, maybe_as_string, maybe_string, StringKind, StringOptions};
