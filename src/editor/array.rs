//! Array editor.
//!
//! Owns the ordered sequence at one path. Elements are classified once at
//! bind time; the classification decides what an appended element looks
//! like and whether elements are edited through the `.value` wrapper
//! sub-path.

use serde_json::{Map, Value};

use crate::data::default::{default_value, object_item};
use crate::data::error::SchemaError;
use crate::data::path::FieldPath;
use crate::data::spec::{ElementClass, FieldKind, FieldSpec};
use crate::data::store::ValueStore;
use crate::editor::slots::{SlotId, SlotRegistry};
use crate::editor::wrap::{wrap, VALUE_FIELD};

/// Editor for an ordered sequence of same-typed elements.
#[derive(Debug)]
pub struct ArrayEditor<'a> {
    path: FieldPath,
    element: &'a FieldSpec,
    class: ElementClass,
}

impl<'a> ArrayEditor<'a> {
    /// Bind an editor to the array field `spec` at `path`.
    ///
    /// Binding fails when the field is not an array or declares no element
    /// child; without an element description nothing can be appended or
    /// rendered, so no editor exists at all.
    pub fn bind(path: FieldPath, spec: &'a FieldSpec) -> Result<Self, SchemaError> {
        if spec.kind != FieldKind::Array {
            return Err(SchemaError::KindMismatch {
                path: path.to_string(),
                expected: "an array",
            });
        }
        let element = spec.element().ok_or_else(|| SchemaError::MissingElement {
            path: path.to_string(),
            kind: spec.kind.to_string(),
        })?;
        let class = element.element_class();
        Ok(Self {
            path,
            element,
            class,
        })
    }

    /// The path this editor owns.
    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    /// How elements of this array are shaped.
    pub fn class(&self) -> ElementClass {
        self.class
    }

    /// The element description.
    pub fn element_spec(&self) -> &FieldSpec {
        self.element
    }

    /// Number of elements currently stored.
    pub fn len(&self, store: &dyn ValueStore) -> usize {
        store
            .get(&self.path)
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    }

    /// Whether the sequence is currently empty. An empty array is a valid
    /// state of its own, distinct from the array not existing yet.
    pub fn is_empty(&self, store: &dyn ValueStore) -> bool {
        self.len(store) == 0
    }

    /// Path of the element at `index` as stored.
    pub fn element_path(&self, index: usize) -> FieldPath {
        self.path.index(index)
    }

    /// Path the element at `index` is edited through: wrapped primitives go
    /// through their `value` field, everything else is edited in place.
    pub fn edit_path(&self, index: usize) -> FieldPath {
        match self.class {
            ElementClass::Primitive => self.path.index(index).key(VALUE_FIELD),
            _ => self.path.index(index),
        }
    }

    /// Append a freshly synthesized element and return its identity.
    pub fn append(&self, store: &mut dyn ValueStore, slots: &mut SlotRegistry) -> SlotId {
        let element = match self.class {
            ElementClass::Structured => {
                object_item(self.element.children.as_deref().unwrap_or_default())
            }
            // The external picker fills these in; they start as a bare
            // placeholder record.
            ElementClass::Component => Value::Object(Map::new()),
            ElementClass::Primitive => wrap(
                default_value(self.element).unwrap_or_else(|| Value::String(String::new())),
            ),
        };
        let index = self.len(store);
        slots.sync(&self.path, index);
        let id = slots.push(&self.path);
        store.set(&self.path.index(index), element);
        id
    }

    /// Remove the element at `index`; later elements shift down.
    pub fn remove(&self, store: &mut dyn ValueStore, slots: &mut SlotRegistry, index: usize) -> bool {
        let len = self.len(store);
        if index >= len {
            return false;
        }
        slots.sync(&self.path, len);
        let _ = store.remove(&self.path.index(index));
        slots.remove(&self.path, index);
        slots.invalidate_under(&self.path);
        true
    }

    /// Move the element at `from` to `to`, keeping its value and identity.
    /// Out-of-range and identity moves are no-ops.
    pub fn move_item(
        &self,
        store: &mut dyn ValueStore,
        slots: &mut SlotRegistry,
        from: usize,
        to: usize,
    ) -> bool {
        slots.sync(&self.path, self.len(store));
        if !store.move_item(&self.path, from, to) {
            return false;
        }
        slots.move_item(&self.path, from, to);
        slots.invalidate_under(&self.path);
        true
    }

    /// Move the element at `index` one position up. Disabled at the top.
    pub fn move_up(&self, store: &mut dyn ValueStore, slots: &mut SlotRegistry, index: usize) -> bool {
        if index == 0 {
            return false;
        }
        self.move_item(store, slots, index, index - 1)
    }

    /// Move the element at `index` one position down. Disabled at the
    /// bottom.
    pub fn move_down(
        &self,
        store: &mut dyn ValueStore,
        slots: &mut SlotRegistry,
        index: usize,
    ) -> bool {
        if index + 1 >= self.len(store) {
            return false;
        }
        self.move_item(store, slots, index, index + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::store::TreeStore;
    use serde_json::json;

    fn spec(raw: serde_json::Value) -> FieldSpec {
        serde_json::from_value(raw).unwrap()
    }

    fn string_array() -> FieldSpec {
        spec(json!({
            "name": "urls",
            "kind": "array",
            "children": [{ "name": "url", "type": "string" }]
        }))
    }

    #[test]
    fn bind_requires_an_element_child() {
        let bare = spec(json!({ "name": "urls", "kind": "array" }));
        assert!(matches!(
            ArrayEditor::bind(FieldPath::parse("urls"), &bare),
            Err(SchemaError::MissingElement { .. })
        ));
        let not_array = spec(json!({ "name": "url", "type": "string" }));
        assert!(matches!(
            ArrayEditor::bind(FieldPath::parse("url"), &not_array),
            Err(SchemaError::KindMismatch { .. })
        ));
    }

    #[test]
    fn append_wraps_primitive_elements() {
        let field = string_array();
        let ed = ArrayEditor::bind(FieldPath::parse("urls"), &field).unwrap();
        let mut store = TreeStore::new();
        let mut slots = SlotRegistry::new();
        ed.append(&mut store, &mut slots);
        ed.append(&mut store, &mut slots);
        assert_eq!(
            store.as_value(),
            &json!({ "urls": [{ "value": "" }, { "value": "" }] })
        );
        assert_eq!(ed.edit_path(1).to_string(), "urls.1.value");
    }

    #[test]
    fn append_synthesizes_structured_elements() {
        let field = spec(json!({
            "name": "rules",
            "kind": "array",
            "children": [{
                "name": "rule",
                "kind": "object",
                "children": [
                    { "name": "pattern", "type": "string" },
                    { "name": "enabled", "type": "bool", "default": true }
                ]
            }]
        }));
        let ed = ArrayEditor::bind(FieldPath::parse("rules"), &field).unwrap();
        let mut store = TreeStore::new();
        let mut slots = SlotRegistry::new();
        ed.append(&mut store, &mut slots);
        assert_eq!(
            store.as_value(),
            &json!({ "rules": [{ "pattern": "", "enabled": true }] })
        );
        assert_eq!(ed.edit_path(0).to_string(), "rules.0");
    }

    #[test]
    fn append_leaves_component_elements_to_the_picker() {
        let field = spec(json!({
            "name": "processors",
            "kind": "array",
            "children": [{ "name": "processor", "type": "processor" }]
        }));
        let ed = ArrayEditor::bind(FieldPath::parse("processors"), &field).unwrap();
        let mut store = TreeStore::new();
        let mut slots = SlotRegistry::new();
        ed.append(&mut store, &mut slots);
        assert_eq!(store.as_value(), &json!({ "processors": [{}] }));
    }

    #[test]
    fn remove_shifts_later_elements_down() {
        let field = string_array();
        let ed = ArrayEditor::bind(FieldPath::parse("urls"), &field).unwrap();
        let mut store = TreeStore::new();
        let mut slots = SlotRegistry::new();
        for _ in 0..3 {
            ed.append(&mut store, &mut slots);
        }
        store.set(&FieldPath::parse("urls.0.value"), json!("a"));
        store.set(&FieldPath::parse("urls.1.value"), json!("b"));
        store.set(&FieldPath::parse("urls.2.value"), json!("c"));

        assert!(ed.remove(&mut store, &mut slots, 0));
        assert_eq!(
            store.as_value(),
            &json!({ "urls": [{ "value": "b" }, { "value": "c" }] })
        );
        assert!(!ed.remove(&mut store, &mut slots, 5));
    }

    #[test]
    fn identity_travels_with_the_moved_element() {
        let field = string_array();
        let ed = ArrayEditor::bind(FieldPath::parse("urls"), &field).unwrap();
        let mut store = TreeStore::new();
        let mut slots = SlotRegistry::new();
        let first = ed.append(&mut store, &mut slots);
        let second = ed.append(&mut store, &mut slots);
        store.set(&FieldPath::parse("urls.0.value"), json!("a"));
        store.set(&FieldPath::parse("urls.1.value"), json!("b"));

        assert!(ed.move_down(&mut store, &mut slots, 0));
        assert_eq!(
            store.get(&FieldPath::parse("urls.0.value")),
            Some(&json!("b"))
        );
        assert_eq!(slots.sync(&FieldPath::parse("urls"), 2), &[second, first]);
    }

    #[test]
    fn moves_are_disabled_at_the_boundaries() {
        let field = string_array();
        let ed = ArrayEditor::bind(FieldPath::parse("urls"), &field).unwrap();
        let mut store = TreeStore::new();
        let mut slots = SlotRegistry::new();
        ed.append(&mut store, &mut slots);
        ed.append(&mut store, &mut slots);

        assert!(!ed.move_up(&mut store, &mut slots, 0));
        assert!(!ed.move_down(&mut store, &mut slots, 1));
        assert!(ed.move_up(&mut store, &mut slots, 1));
    }
}
