//! Two-dimensional array editor.
//!
//! Owns an ordered sequence of rows, each of which is itself an array
//! value. Rows start empty rather than synthesized; their contents are
//! edited through the plain [`ArrayEditor`](crate::editor::array::ArrayEditor)
//! under a derived row specification.

use serde_json::Value;

use crate::data::error::SchemaError;
use crate::data::path::FieldPath;
use crate::data::spec::{FieldKind, FieldSpec};
use crate::data::store::ValueStore;
use crate::editor::slots::{SlotId, SlotRegistry};

/// Editor for a sequence of rows.
#[derive(Debug)]
pub struct MatrixEditor<'a> {
    path: FieldPath,
    spec: &'a FieldSpec,
}

impl<'a> MatrixEditor<'a> {
    /// Bind an editor to the 2darray field `spec` at `path`. Fails when the
    /// field is not a 2darray or declares no element child.
    pub fn bind(path: FieldPath, spec: &'a FieldSpec) -> Result<Self, SchemaError> {
        if spec.kind != FieldKind::Matrix {
            return Err(SchemaError::KindMismatch {
                path: path.to_string(),
                expected: "a 2darray",
            });
        }
        if spec.element().is_none() {
            return Err(SchemaError::MissingElement {
                path: path.to_string(),
                kind: spec.kind.to_string(),
            });
        }
        Ok(Self { path, spec })
    }

    /// The path this editor owns.
    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    /// Number of rows currently stored.
    pub fn rows(&self, store: &dyn ValueStore) -> usize {
        store
            .get(&self.path)
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    }

    /// Path of the row at `index`.
    pub fn row_path(&self, index: usize) -> FieldPath {
        self.path.index(index)
    }

    /// The specification a row is edited under: the same field with its
    /// kind coerced to `array`, element child untouched. This is the only
    /// place the engine synthesizes a specification instead of receiving
    /// one.
    pub fn row_spec(&self) -> FieldSpec {
        FieldSpec {
            kind: FieldKind::Array,
            ..self.spec.clone()
        }
    }

    /// Append an empty row and return its identity.
    pub fn add_row(&self, store: &mut dyn ValueStore, slots: &mut SlotRegistry) -> SlotId {
        let index = self.rows(store);
        slots.sync(&self.path, index);
        let id = slots.push(&self.path);
        store.set(&self.path.index(index), Value::Array(Vec::new()));
        id
    }

    /// Remove the row at `index`; later rows shift down.
    pub fn remove_row(
        &self,
        store: &mut dyn ValueStore,
        slots: &mut SlotRegistry,
        index: usize,
    ) -> bool {
        let rows = self.rows(store);
        if index >= rows {
            return false;
        }
        slots.sync(&self.path, rows);
        let _ = store.remove(&self.path.index(index));
        slots.remove(&self.path, index);
        slots.invalidate_under(&self.path);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::store::TreeStore;
    use crate::editor::array::ArrayEditor;
    use serde_json::json;

    fn grid_spec() -> FieldSpec {
        serde_json::from_value(json!({
            "name": "seed_brokers",
            "kind": "2darray",
            "children": [{ "name": "broker", "type": "string" }]
        }))
        .unwrap()
    }

    #[test]
    fn rows_start_empty() {
        let field = grid_spec();
        let ed = MatrixEditor::bind(FieldPath::parse("seed_brokers"), &field).unwrap();
        let mut store = TreeStore::new();
        let mut slots = SlotRegistry::new();
        ed.add_row(&mut store, &mut slots);
        ed.add_row(&mut store, &mut slots);
        assert_eq!(store.as_value(), &json!({ "seed_brokers": [[], []] }));
    }

    #[test]
    fn row_contents_edit_through_the_array_editor() {
        let field = grid_spec();
        let ed = MatrixEditor::bind(FieldPath::parse("seed_brokers"), &field).unwrap();
        let mut store = TreeStore::new();
        let mut slots = SlotRegistry::new();
        ed.add_row(&mut store, &mut slots);

        let row_spec = ed.row_spec();
        let row = ArrayEditor::bind(ed.row_path(0), &row_spec).unwrap();
        row.append(&mut store, &mut slots);
        assert_eq!(
            store.as_value(),
            &json!({ "seed_brokers": [[{ "value": "" }]] })
        );
    }

    #[test]
    fn derived_row_spec_keeps_the_element_child() {
        let field = grid_spec();
        let ed = MatrixEditor::bind(FieldPath::parse("seed_brokers"), &field).unwrap();
        let row_spec = ed.row_spec();
        assert_eq!(row_spec.kind, FieldKind::Array);
        assert_eq!(row_spec.element().unwrap().name, "broker");
    }

    #[test]
    fn remove_row_shifts_later_rows() {
        let field = grid_spec();
        let ed = MatrixEditor::bind(FieldPath::parse("seed_brokers"), &field).unwrap();
        let mut store = TreeStore::new();
        let mut slots = SlotRegistry::new();
        ed.add_row(&mut store, &mut slots);
        ed.add_row(&mut store, &mut slots);
        store.set(&FieldPath::parse("seed_brokers.1.0"), json!({ "value": "x" }));

        assert!(ed.remove_row(&mut store, &mut slots, 0));
        assert_eq!(
            store.as_value(),
            &json!({ "seed_brokers": [[{ "value": "x" }]] })
        );
        assert!(!ed.remove_row(&mut store, &mut slots, 9));
    }
}
