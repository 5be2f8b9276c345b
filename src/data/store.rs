//! Path-addressed value storage.
//!
//! The value tree is the single source of truth for the form's current
//! data. Editors never hold values of their own; they read and write the
//! store at the paths they were mounted under. The [`ValueStore`] trait is
//! the contract the surrounding form state has to provide; [`TreeStore`] is
//! the in-memory implementation used by [`FormSession`](crate::session::FormSession)
//! and by tests.

use serde_json::{Map, Value};

use crate::data::path::{FieldPath, PathSegment};

/// Path-addressed binding surface the editors operate against.
///
/// Addressing is index-based for sequences: removing an element shifts the
/// paths of every later element down by one, and callers are expected to
/// tolerate that.
pub trait ValueStore {
    /// Read the value at `path`, if one exists.
    fn get(&self, path: &FieldPath) -> Option<&Value>;

    /// Write `value` at `path`, materializing intermediate containers along
    /// the way. Key segments create records, index segments create
    /// sequences padded with nulls up to the index.
    fn set(&mut self, path: &FieldPath, value: Value);

    /// Delete the value at `path` and return it.
    ///
    /// Removing a key deletes the entry entirely; removing an index shifts
    /// later elements down.
    fn remove(&mut self, path: &FieldPath) -> Option<Value>;

    /// Move an element of the sequence at `path` between indices, keeping
    /// every element's value intact. Returns `false` without mutating when
    /// the indices are out of range or equal.
    fn move_item(&mut self, path: &FieldPath, from: usize, to: usize) -> bool;
}

/// In-memory value tree rooted at a JSON record.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeStore {
    root: Value,
}

impl Default for TreeStore {
    fn default() -> Self {
        Self {
            root: Value::Object(Map::new()),
        }
    }
}

impl TreeStore {
    /// An empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt a previously saved tree.
    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    /// Borrow the whole tree.
    pub fn as_value(&self) -> &Value {
        &self.root
    }

    /// Hand the tree out, consuming the store.
    pub fn into_value(self) -> Value {
        self.root
    }
}

fn descend<'a>(value: &'a Value, seg: &PathSegment) -> Option<&'a Value> {
    match (seg, value) {
        (PathSegment::Key(k), Value::Object(map)) => map.get(k),
        (PathSegment::Index(n), Value::Array(arr)) => arr.get(*n),
        _ => None,
    }
}

fn descend_mut<'a>(value: &'a mut Value, seg: &PathSegment) -> Option<&'a mut Value> {
    match (seg, value) {
        (PathSegment::Key(k), Value::Object(map)) => map.get_mut(k),
        (PathSegment::Index(n), Value::Array(arr)) => arr.get_mut(*n),
        _ => None,
    }
}

/// Step into `seg`, replacing whatever is there with a container of the
/// right shape when needed.
fn materialize<'a>(value: &'a mut Value, seg: &PathSegment) -> &'a mut Value {
    match seg {
        PathSegment::Key(k) => {
            if !value.is_object() {
                *value = Value::Object(Map::new());
            }
            match value {
                Value::Object(map) => map.entry(k.clone()).or_insert(Value::Null),
                _ => unreachable!(),
            }
        }
        PathSegment::Index(n) => {
            if !value.is_array() {
                *value = Value::Array(Vec::new());
            }
            match value {
                Value::Array(arr) => {
                    while arr.len() <= *n {
                        arr.push(Value::Null);
                    }
                    &mut arr[*n]
                }
                _ => unreachable!(),
            }
        }
    }
}

impl ValueStore for TreeStore {
    fn get(&self, path: &FieldPath) -> Option<&Value> {
        let mut cursor = &self.root;
        for seg in path.segments() {
            cursor = descend(cursor, seg)?;
        }
        Some(cursor)
    }

    fn set(&mut self, path: &FieldPath, value: Value) {
        let mut cursor = &mut self.root;
        for seg in path.segments() {
            cursor = materialize(cursor, seg);
        }
        *cursor = value;
    }

    fn remove(&mut self, path: &FieldPath) -> Option<Value> {
        let (last, parents) = path.segments().split_last()?;
        let mut cursor = &mut self.root;
        for seg in parents {
            cursor = descend_mut(cursor, seg)?;
        }
        match (last, cursor) {
            (PathSegment::Key(k), Value::Object(map)) => map.remove(k),
            (PathSegment::Index(n), Value::Array(arr)) if *n < arr.len() => Some(arr.remove(*n)),
            _ => None,
        }
    }

    fn move_item(&mut self, path: &FieldPath, from: usize, to: usize) -> bool {
        let mut cursor = &mut self.root;
        for seg in path.segments() {
            match descend_mut(cursor, seg) {
                Some(next) => cursor = next,
                None => return false,
            }
        }
        let Value::Array(arr) = cursor else {
            return false;
        };
        if from == to || from >= arr.len() || to >= arr.len() {
            return false;
        }
        let element = arr.remove(from);
        arr.insert(to, element);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn set_materializes_intermediate_containers() {
        let mut store = TreeStore::new();
        store.set(&FieldPath::parse("kafka.addresses.1.value"), json!("b:9092"));
        assert_eq!(
            store.as_value(),
            &json!({ "kafka": { "addresses": [null, { "value": "b:9092" }] } })
        );
    }

    #[test]
    fn get_reads_back_what_was_set() {
        let mut store = TreeStore::new();
        let path = FieldPath::parse("a.b");
        store.set(&path, json!(3));
        assert_eq!(store.get(&path), Some(&json!(3)));
        assert_eq!(store.get(&FieldPath::parse("a.missing")), None);
    }

    #[test]
    fn remove_on_record_deletes_the_entry() {
        let mut store = TreeStore::from_value(json!({ "meta": { "FOO": "x", "BAR": "y" } }));
        let taken = store.remove(&FieldPath::parse("meta.FOO"));
        assert_eq!(taken, Some(json!("x")));
        assert_eq!(store.as_value(), &json!({ "meta": { "BAR": "y" } }));
    }

    #[test]
    fn remove_on_sequence_shifts_later_elements() {
        let mut store = TreeStore::from_value(json!({ "xs": [1, 2, 3] }));
        assert_eq!(store.remove(&FieldPath::parse("xs.0")), Some(json!(1)));
        assert_eq!(store.as_value(), &json!({ "xs": [2, 3] }));
        // The path of the former element 1 now reads element 2's value.
        assert_eq!(store.get(&FieldPath::parse("xs.0")), Some(&json!(2)));
    }

    #[test]
    fn move_item_reorders_without_changing_values() {
        let mut store = TreeStore::from_value(json!({ "xs": ["a", "b", "c"] }));
        let path = FieldPath::parse("xs");
        assert!(store.move_item(&path, 0, 2));
        assert_eq!(store.as_value(), &json!({ "xs": ["b", "c", "a"] }));
    }

    #[test]
    fn move_item_rejects_out_of_range() {
        let mut store = TreeStore::from_value(json!({ "xs": ["a", "b"] }));
        let path = FieldPath::parse("xs");
        assert!(!store.move_item(&path, 0, 0));
        assert!(!store.move_item(&path, 0, 2));
        assert!(!store.move_item(&path, 5, 0));
        assert!(!store.move_item(&FieldPath::parse("nope"), 0, 1));
        assert_eq!(store.as_value(), &json!({ "xs": ["a", "b"] }));
    }

    #[test]
    fn root_path_addresses_the_whole_tree() {
        let mut store = TreeStore::new();
        store.set(&FieldPath::root(), json!({ "replaced": true }));
        assert_eq!(store.as_value(), &json!({ "replaced": true }));
        assert_eq!(store.get(&FieldPath::root()), Some(&json!({ "replaced": true })));
    }
}
