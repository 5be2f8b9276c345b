//! Map editor.
//!
//! Owns a keyed record whose key set is user-defined rather than fixed by
//! the schema. Keys are read from the live value, never from the
//! specification. Removal deletes the entry entirely, which is what
//! distinguishes map semantics from array semantics. Renaming a key is not
//! a primitive operation here; it is a removal followed by an insert, and
//! the old value does not carry over.

use serde_json::Value;

use crate::data::default::default_value;
use crate::data::error::SchemaError;
use crate::data::path::FieldPath;
use crate::data::spec::{FieldKind, FieldSpec};
use crate::data::store::ValueStore;

/// Editor for a record with user-defined keys.
#[derive(Debug)]
pub struct MapEditor<'a> {
    path: FieldPath,
    value_spec: &'a FieldSpec,
}

impl<'a> MapEditor<'a> {
    /// Bind an editor to the map field `spec` at `path`. Fails when the
    /// field is not a map or declares no value child.
    pub fn bind(path: FieldPath, spec: &'a FieldSpec) -> Result<Self, SchemaError> {
        if spec.kind != FieldKind::Map {
            return Err(SchemaError::KindMismatch {
                path: path.to_string(),
                expected: "a map",
            });
        }
        let value_spec = spec.element().ok_or_else(|| SchemaError::MissingElement {
            path: path.to_string(),
            kind: spec.kind.to_string(),
        })?;
        Ok(Self { path, value_spec })
    }

    /// The path this editor owns.
    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    /// The description every entry value follows.
    pub fn value_spec(&self) -> &FieldSpec {
        self.value_spec
    }

    /// Keys currently present, read from the live value.
    pub fn keys(&self, store: &dyn ValueStore) -> Vec<String> {
        store
            .get(&self.path)
            .and_then(Value::as_object)
            .map(|entries| entries.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Path of the entry stored under `key`.
    pub fn entry_path(&self, key: &str) -> FieldPath {
        self.path.key(key)
    }

    /// Insert `key` with a synthesized default value. Empty and duplicate
    /// keys are rejected silently; nothing is mutated and `false` comes
    /// back.
    pub fn add_pair(&self, store: &mut dyn ValueStore, key: &str) -> bool {
        if key.is_empty() || store.get(&self.entry_path(key)).is_some() {
            return false;
        }
        let Some(value) = default_value(self.value_spec) else {
            warn!(
                "cannot add `{}`: value child `{}` is not materializable",
                self.entry_path(key),
                self.value_spec.name
            );
            return false;
        };
        store.set(&self.entry_path(key), value);
        true
    }

    /// Delete the entry under `key` entirely.
    pub fn remove_pair(&self, store: &mut dyn ValueStore, key: &str) -> bool {
        store.remove(&self.entry_path(key)).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::store::TreeStore;
    use serde_json::json;

    fn meta_spec() -> FieldSpec {
        serde_json::from_value(json!({
            "name": "metadata",
            "kind": "map",
            "children": [{ "name": "value", "type": "string" }]
        }))
        .unwrap()
    }

    #[test]
    fn add_pair_writes_the_synthesized_default() {
        let field = meta_spec();
        let ed = MapEditor::bind(FieldPath::parse("metadata"), &field).unwrap();
        let mut store = TreeStore::new();
        assert!(ed.add_pair(&mut store, "FOO"));
        assert_eq!(store.as_value(), &json!({ "metadata": { "FOO": "" } }));
    }

    #[test]
    fn duplicate_and_empty_keys_are_silently_rejected() {
        let field = meta_spec();
        let ed = MapEditor::bind(FieldPath::parse("metadata"), &field).unwrap();
        let mut store = TreeStore::new();
        assert!(ed.add_pair(&mut store, "FOO"));
        store.set(&FieldPath::parse("metadata.FOO"), json!("kept"));

        assert!(!ed.add_pair(&mut store, "FOO"));
        assert!(!ed.add_pair(&mut store, ""));
        assert_eq!(store.as_value(), &json!({ "metadata": { "FOO": "kept" } }));
    }

    #[test]
    fn remove_pair_deletes_the_entry() {
        let field = meta_spec();
        let ed = MapEditor::bind(FieldPath::parse("metadata"), &field).unwrap();
        let mut store = TreeStore::new();
        ed.add_pair(&mut store, "FOO");
        assert!(ed.remove_pair(&mut store, "FOO"));
        assert_eq!(store.as_value(), &json!({ "metadata": {} }));
        assert!(!ed.remove_pair(&mut store, "FOO"));
    }

    #[test]
    fn add_then_remove_restores_the_prior_key_set() {
        let field = meta_spec();
        let ed = MapEditor::bind(FieldPath::parse("metadata"), &field).unwrap();
        let mut store = TreeStore::new();
        ed.add_pair(&mut store, "A");
        let before = ed.keys(&store);
        ed.add_pair(&mut store, "B");
        ed.remove_pair(&mut store, "B");
        assert_eq!(ed.keys(&store), before);
    }

    #[test]
    fn keys_come_from_the_live_value() {
        let field = meta_spec();
        let ed = MapEditor::bind(FieldPath::parse("metadata"), &field).unwrap();
        let store = TreeStore::from_value(json!({ "metadata": { "X": "1", "Y": "2" } }));
        let mut keys = ed.keys(&store);
        keys.sort();
        assert_eq!(keys, ["X", "Y"]);
    }

    #[test]
    fn bind_requires_a_value_child() {
        let bare: FieldSpec =
            serde_json::from_value(json!({ "name": "metadata", "kind": "map" })).unwrap();
        assert!(matches!(
            MapEditor::bind(FieldPath::parse("metadata"), &bare),
            Err(SchemaError::MissingElement { .. })
        ));
    }
}
