//! Primitive wrapping policy for array elements.
//!
//! Array elements need an addressable, structured location independent of
//! their value. A bare primitive has none, so primitive elements are stored
//! as single-field records and edited through a `value` sub-path.
//! Object-shaped and component elements already are structured and are
//! never wrapped.

use serde_json::{Map, Value};

/// Field name a wrapped primitive is stored under.
pub const VALUE_FIELD: &str = "value";

/// Wrap a bare primitive for storage as an array element.
pub fn wrap(value: Value) -> Value {
    let mut record = Map::new();
    record.insert(VALUE_FIELD.to_string(), value);
    Value::Object(record)
}

/// Read the primitive out of a wrapped element, if it is one.
pub fn unwrap(element: &Value) -> Option<&Value> {
    element.as_object()?.get(VALUE_FIELD)
}
