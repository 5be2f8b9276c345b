//! Shape checking for previously saved value trees.
//!
//! A form session can be pre-populated from a configuration that was saved
//! earlier. Before adopting such a tree the session checks it against the
//! field specification, so a stale or hand-edited file fails loudly at the
//! restore boundary instead of corrupting edits later. Unknown record keys
//! are tolerated with a warning; type mismatches are refused.

use serde_json::Value;

use crate::data::error::SchemaError;
use crate::data::path::FieldPath;
use crate::data::spec::{ElementClass, FieldKind, FieldSpec, FieldType};
use crate::editor::wrap::VALUE_FIELD;

/// Check that `value` is shaped the way `spec` demands.
pub fn check(spec: &FieldSpec, value: &Value) -> Result<(), SchemaError> {
    check_at(spec, value, &FieldPath::root())
}

fn mismatch(path: &FieldPath, expected: impl Into<String>, actual: &Value) -> SchemaError {
    SchemaError::TypeMismatch {
        path: path.to_string(),
        expected: expected.into(),
        actual: format!("{actual}"),
    }
}

fn check_at(spec: &FieldSpec, value: &Value, path: &FieldPath) -> Result<(), SchemaError> {
    match &spec.kind {
        FieldKind::Scalar => check_scalar(spec, value, path),
        FieldKind::Object => check_record(spec, value, path),
        FieldKind::Array => check_sequence(spec, value, path),
        FieldKind::Matrix => check_rows(spec, value, path),
        FieldKind::Map => check_entries(spec, value, path),
        FieldKind::Unknown(tag) => {
            warn!("not checking `{path}`: unknown field kind {tag:?}");
            Ok(())
        }
    }
}

fn check_scalar(spec: &FieldSpec, value: &Value, path: &FieldPath) -> Result<(), SchemaError> {
    // Null is the explicit empty sentinel and is accepted for any scalar.
    if value.is_null() {
        return Ok(());
    }
    match &spec.ty {
        FieldType::String | FieldType::Component(_) | FieldType::Other(_) => {
            if value.is_string() {
                Ok(())
            } else {
                Err(mismatch(path, "string", value))
            }
        }
        FieldType::Int => {
            if value.as_i64().is_some() {
                Ok(())
            } else {
                Err(mismatch(path, "integer", value))
            }
        }
        FieldType::Float => {
            if value.is_number() {
                Ok(())
            } else {
                Err(mismatch(path, "number", value))
            }
        }
        FieldType::Bool => {
            if value.is_boolean() {
                Ok(())
            } else {
                Err(mismatch(path, "boolean", value))
            }
        }
        FieldType::Object => check_record(spec, value, path),
    }
}

fn check_record(spec: &FieldSpec, value: &Value, path: &FieldPath) -> Result<(), SchemaError> {
    let Value::Object(entries) = value else {
        return Err(mismatch(path, "object", value));
    };
    for (key, entry) in entries {
        match spec.child(key) {
            Some(child) => check_at(child, entry, &path.key(key))?,
            None => warn!("ignoring `{}`: not in the specification", path.key(key)),
        }
    }
    Ok(())
}

fn check_sequence(spec: &FieldSpec, value: &Value, path: &FieldPath) -> Result<(), SchemaError> {
    let Value::Array(elements) = value else {
        return Err(mismatch(path, "array", value));
    };
    let Some(element_spec) = spec.element() else {
        warn!("not checking `{path}`: array field has no element child");
        return Ok(());
    };
    for (i, element) in elements.iter().enumerate() {
        check_element(element_spec, element, &path.index(i))?;
    }
    Ok(())
}

fn check_element(element_spec: &FieldSpec, element: &Value, path: &FieldPath) -> Result<(), SchemaError> {
    match element_spec.element_class() {
        ElementClass::Primitive => {
            // Primitives are stored wrapped; the wrapper must be present.
            let inner = element
                .as_object()
                .and_then(|record| record.get(VALUE_FIELD))
                .ok_or_else(|| mismatch(path, format!("{{\"{VALUE_FIELD}\": ...}}"), element))?;
            check_scalar(element_spec, inner, &path.key(VALUE_FIELD))
        }
        ElementClass::Structured => check_at(element_spec, element, path),
        ElementClass::Component => {
            // Component configurations belong to the external picker; only
            // the outer shape is checked here.
            if element.is_object() {
                Ok(())
            } else {
                Err(mismatch(path, "object", element))
            }
        }
    }
}

fn check_rows(spec: &FieldSpec, value: &Value, path: &FieldPath) -> Result<(), SchemaError> {
    let Value::Array(rows) = value else {
        return Err(mismatch(path, "array of rows", value));
    };
    let Some(element_spec) = spec.element() else {
        warn!("not checking `{path}`: 2darray field has no element child");
        return Ok(());
    };
    for (r, row) in rows.iter().enumerate() {
        let row_path = path.index(r);
        let Value::Array(cells) = row else {
            return Err(mismatch(&row_path, "array", row));
        };
        for (c, cell) in cells.iter().enumerate() {
            check_element(element_spec, cell, &row_path.index(c))?;
        }
    }
    Ok(())
}

fn check_entries(spec: &FieldSpec, value: &Value, path: &FieldPath) -> Result<(), SchemaError> {
    let Value::Object(entries) = value else {
        return Err(mismatch(path, "object", value));
    };
    let Some(value_spec) = spec.element() else {
        warn!("not checking `{path}`: map field has no value child");
        return Ok(());
    };
    for (key, entry) in entries {
        check_at(value_spec, entry, &path.key(key))?;
    }
    Ok(())
}
