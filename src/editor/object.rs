//! Object editor.
//!
//! A record field renders one child editor per entry of its child list,
//! each addressed one key below the record's own path. No defaults are
//! synthesized here: a missing stored value is interpreted by the owning
//! leaf or sequence editor.

use crate::data::error::SchemaError;
use crate::data::path::FieldPath;
use crate::data::spec::FieldSpec;

/// Editor for a fixed-shape record field.
#[derive(Debug)]
pub struct ObjectEditor<'a> {
    path: FieldPath,
    spec: &'a FieldSpec,
}

impl<'a> ObjectEditor<'a> {
    /// Bind an editor to the record field `spec` at `path`. Accepts object
    /// kind fields and object-typed scalars alike.
    pub fn bind(path: FieldPath, spec: &'a FieldSpec) -> Result<Self, SchemaError> {
        if !spec.is_object_shaped() {
            return Err(SchemaError::KindMismatch {
                path: path.to_string(),
                expected: "an object",
            });
        }
        Ok(Self { path, spec })
    }

    /// The path this editor owns.
    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    /// The record's child fields, in declaration order.
    pub fn children(&self) -> &[FieldSpec] {
        self.spec.children.as_deref().unwrap_or_default()
    }

    /// Path of one child field.
    pub fn child_path(&self, child: &FieldSpec) -> FieldPath {
        self.path.key(&child.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn children_keep_declaration_order() {
        let field: FieldSpec = serde_json::from_value(json!({
            "name": "batching",
            "kind": "object",
            "children": [
                { "name": "count", "type": "int" },
                { "name": "period", "type": "string" }
            ]
        }))
        .unwrap();
        let ed = ObjectEditor::bind(FieldPath::parse("batching"), &field).unwrap();
        let names: Vec<_> = ed.children().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["count", "period"]);
        assert_eq!(
            ed.child_path(&ed.children()[1]).to_string(),
            "batching.period"
        );
    }

    #[test]
    fn binds_object_typed_scalars_too() {
        let field: FieldSpec = serde_json::from_value(json!({
            "name": "tls",
            "kind": "scalar",
            "type": "object",
            "children": [{ "name": "enabled", "type": "bool" }]
        }))
        .unwrap();
        assert!(ObjectEditor::bind(FieldPath::parse("tls"), &field).is_ok());
        let plain: FieldSpec =
            serde_json::from_value(json!({ "name": "url", "type": "string" })).unwrap();
        assert!(ObjectEditor::bind(FieldPath::parse("url"), &plain).is_err());
    }
}
