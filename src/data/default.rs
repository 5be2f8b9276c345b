//! Default value synthesis.
//!
//! Whenever the form needs to materialize a value that does not exist yet
//! (initial mount, array append, map key insert), it asks this module for
//! the canonical default of the governing field. Synthesis is pure and
//! idempotent: two calls over the same specification produce structurally
//! equal trees.

use serde_json::{Map, Value};

use crate::data::spec::{FieldKind, FieldSpec, FieldType};

/// Synthesize the canonical default value for a field.
///
/// A declared `default` is returned verbatim. Otherwise the shape follows
/// the field's kind: empty sequences for arrays and matrices, an empty
/// record for maps, a fully populated record for objects and zero values
/// for scalars. Returns `None` for unrecognized kinds, which cannot be
/// materialized at all.
pub fn default_value(spec: &FieldSpec) -> Option<Value> {
    if let Some(given) = &spec.default {
        return Some(given.clone());
    }
    match &spec.kind {
        FieldKind::Scalar => Some(scalar_default(spec)),
        FieldKind::Object => Some(object_item(spec.children.as_deref().unwrap_or_default())),
        FieldKind::Array | FieldKind::Matrix => Some(Value::Array(Vec::new())),
        FieldKind::Map => Some(Value::Object(Map::new())),
        FieldKind::Unknown(tag) => {
            warn!("cannot synthesize a default for field `{}` of kind {tag:?}", spec.name);
            None
        }
    }
}

fn scalar_default(spec: &FieldSpec) -> Value {
    match &spec.ty {
        FieldType::String => Value::String(String::new()),
        FieldType::Int | FieldType::Float => Value::from(0),
        FieldType::Bool => Value::Bool(false),
        FieldType::Object => object_item(spec.children.as_deref().unwrap_or_default()),
        // Component references and unrecognized types fall back to an
        // empty string placeholder.
        FieldType::Component(_) | FieldType::Other(_) => Value::String(String::new()),
    }
}

/// Build an object-shaped value from a list of child fields, keyed by child
/// name. Children that cannot be materialized are left out of the record.
pub fn object_item(children: &[FieldSpec]) -> Value {
    let mut record = Map::new();
    for child in children {
        if let Some(value) = default_value(child) {
            record.insert(child.name.clone(), value);
        }
    }
    Value::Object(record)
}
