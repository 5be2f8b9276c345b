//! Scalar input selection and coercion.
//!
//! The least structural part of the engine: given a scalar field, pick the
//! concrete input affordance and read the current display value back out of
//! the store. Numeric entry that does not parse becomes the explicit empty
//! sentinel (`null`), never NaN.

use serde_json::Value;

use crate::data::default::default_value;
use crate::data::spec::{FieldSpec, FieldType};

/// One enumerated choice offered by a select input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// Stored value of the choice.
    pub value: String,
    /// Description shown alongside it, when the catalog provides one.
    pub description: Option<String>,
}

/// Concrete input affordance for a scalar field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScalarInput {
    /// Enumerated choice.
    Select(Vec<SelectOption>),
    /// Free text, masked when the field is secret.
    Text {
        /// Mask the value while displaying it.
        secret: bool,
    },
    /// Whole-number entry.
    Int,
    /// Floating-point entry.
    Float,
    /// On/off toggle.
    Toggle,
    /// Nested record; delegated to the object editor.
    Nested,
    /// Unrecognized scalar type; plain text entry.
    Freeform,
}

/// Pick the input affordance for a scalar field. Enumerated options win
/// over the declared type.
pub fn input_for(spec: &FieldSpec) -> ScalarInput {
    if let Some(options) = select_options(spec) {
        return ScalarInput::Select(options);
    }
    match &spec.ty {
        FieldType::String => ScalarInput::Text {
            secret: spec.is_secret,
        },
        FieldType::Int => ScalarInput::Int,
        FieldType::Float => ScalarInput::Float,
        FieldType::Bool => ScalarInput::Toggle,
        FieldType::Object => ScalarInput::Nested,
        FieldType::Component(_) | FieldType::Other(_) => ScalarInput::Freeform,
    }
}

/// The enumerated choices of a field, if it declares any. Plain options are
/// consulted first; annotated options contribute their value plus
/// description.
pub fn select_options(spec: &FieldSpec) -> Option<Vec<SelectOption>> {
    if let Some(options) = &spec.options {
        return Some(
            options
                .iter()
                .map(|value| SelectOption {
                    value: value.clone(),
                    description: None,
                })
                .collect(),
        );
    }
    spec.annotated_options.as_ref().map(|options| {
        options
            .iter()
            .map(|option| SelectOption {
                value: option.value.clone(),
                description: Some(option.description.clone()),
            })
            .collect()
    })
}

/// Coerce raw whole-number entry. Anything unparsable becomes the empty
/// sentinel.
pub fn coerce_int(raw: &str) -> Value {
    raw.trim()
        .parse::<i64>()
        .map(Value::from)
        .unwrap_or(Value::Null)
}

/// Coerce raw floating-point entry. Non-numeric and non-finite entry
/// becomes the empty sentinel.
pub fn coerce_float(raw: &str) -> Value {
    match raw.trim().parse::<f64>() {
        Ok(parsed) => serde_json::Number::from_f64(parsed)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        Err(_) => Value::Null,
    }
}

/// Current text of a string-like field: stored value, else synthesized
/// default, else empty.
pub fn text_value(spec: &FieldSpec, stored: Option<&Value>) -> String {
    let current = match stored {
        Some(stored) => stored.as_str().map(str::to_string),
        None => default_value(spec)
            .as_ref()
            .and_then(Value::as_str)
            .map(str::to_string),
    };
    current.unwrap_or_default()
}

/// Current whole-number display value; `None` renders as an empty input.
/// A stored null is the explicit empty sentinel and stays empty, only an
/// unset path falls back to the default.
pub fn int_value(spec: &FieldSpec, stored: Option<&Value>) -> Option<i64> {
    match stored {
        Some(stored) => stored.as_i64(),
        None => default_value(spec).as_ref().and_then(Value::as_i64),
    }
}

/// Current floating-point display value; `None` renders as an empty input.
/// Same sentinel handling as [`int_value`].
pub fn float_value(spec: &FieldSpec, stored: Option<&Value>) -> Option<f64> {
    match stored {
        Some(stored) => stored.as_f64(),
        None => default_value(spec).as_ref().and_then(Value::as_f64),
    }
}

/// Current toggle state: stored value, else the declared default, else off.
pub fn toggle_value(spec: &FieldSpec, stored: Option<&Value>) -> bool {
    stored
        .and_then(Value::as_bool)
        .or_else(|| spec.default.as_ref().and_then(Value::as_bool))
        .unwrap_or(false)
}
