//! Editing-session container.
//!
//! A [`FormSession`] owns one value tree for the lifetime of one form: it
//! is created empty or restored from a previously saved configuration,
//! mutated in place by the edit operations below, read out on submit and
//! dropped on cancel. Persistence is a boundary concern; the session only
//! offers file load/save helpers mirroring the saved-configuration formats
//! the console works with.

use std::borrow::Cow;
use std::fs;
use std::path::Path;
use std::time::SystemTime;

use anyhow::{bail, Context};
use serde_json::Value;

use crate::data::conform;
use crate::data::error::SchemaError;
use crate::data::path::{FieldPath, PathSegment};
use crate::data::spec::{spec_at, FieldKind, FieldSpec};
use crate::data::store::{TreeStore, ValueStore};
use crate::editor::array::ArrayEditor;
use crate::editor::map::MapEditor;
use crate::editor::matrix::MatrixEditor;
use crate::editor::scalar::{self, ScalarInput};
use crate::editor::slots::{SlotId, SlotRegistry};
use crate::render::{FieldWidget, Renderer};

/// One editing session over one component configuration.
#[derive(Debug)]
pub struct FormSession {
    spec: FieldSpec,
    store: TreeStore,
    slots: SlotRegistry,
    dirty: bool,
}

impl FormSession {
    /// Start a fresh session with an empty value tree.
    pub fn new(spec: FieldSpec) -> Self {
        Self {
            spec,
            store: TreeStore::new(),
            slots: SlotRegistry::new(),
            dirty: false,
        }
    }

    /// Start a session pre-populated from a previously saved tree.
    ///
    /// The tree is shape-checked against the specification first; a stale
    /// or hand-edited configuration is refused rather than adopted.
    pub fn restore(spec: FieldSpec, saved: Value) -> Result<Self, SchemaError> {
        conform::check(&spec, &saved)?;
        Ok(Self {
            spec,
            store: TreeStore::from_value(saved),
            slots: SlotRegistry::new(),
            dirty: false,
        })
    }

    /// Load a session from a saved configuration file.
    ///
    /// The format follows the file extension (`json` or `toml`). A missing
    /// or empty file yields a fresh session.
    ///
    /// # Errors
    ///
    /// Returns errors when the file cannot be read or parsed, when its
    /// extension is unsupported, or when its contents do not conform to
    /// the specification.
    pub fn load(spec: FieldSpec, config: impl AsRef<Path>) -> anyhow::Result<Self> {
        let config = config.as_ref();
        if !config.exists() {
            return Ok(Self::new(spec));
        }
        let content = fs::read_to_string(config)
            .with_context(|| format!("Failed to read {}", config.display()))?;
        if content.trim().is_empty() {
            return Ok(Self::new(spec));
        }
        let ext = config.extension().and_then(|s| s.to_str()).unwrap_or("");
        let saved: Value = match ext {
            "json" => serde_json::from_str(&content)?,
            "toml" => {
                let parsed: toml::Value = toml::from_str(&content)?;
                serde_json::to_value(parsed)?
            }
            _ => {
                bail!("Unsupported config file extension: {ext:?}");
            }
        };
        Ok(Self::restore(spec, saved)?)
    }

    /// Write the current tree back to a configuration file, creating a
    /// timestamped backup of an existing file first. A clean session is
    /// left untouched.
    pub fn save(&mut self, config: impl AsRef<Path>) -> anyhow::Result<()> {
        if !self.dirty {
            return Ok(());
        }
        let config = config.as_ref();
        let ext = config.extension().and_then(|s| s.to_str()).unwrap_or("");
        let content = match ext {
            "toml" | "tml" => toml::to_string_pretty(self.store.as_value())?,
            "json" => serde_json::to_string_pretty(self.store.as_value())?,
            _ => {
                bail!("Unsupported config file extension: {ext}");
            }
        };
        if config.exists() {
            let stamp = SystemTime::now()
                .duration_since(SystemTime::UNIX_EPOCH)?
                .as_secs();
            let backup = config.with_extension(format!("bk-{stamp}.{ext}"));
            fs::copy(config, &backup)
                .with_context(|| format!("Failed to back up {}", config.display()))?;
        }
        fs::write(config, content)
            .with_context(|| format!("Failed to write {}", config.display()))?;
        self.dirty = false;
        Ok(())
    }

    /// The specification this session edits under.
    pub fn spec(&self) -> &FieldSpec {
        &self.spec
    }

    /// The whole current tree.
    pub fn value(&self) -> &Value {
        self.store.as_value()
    }

    /// The current value at `path`, if any.
    pub fn value_at(&self, path: &FieldPath) -> Option<&Value> {
        self.store.get(path)
    }

    /// Whether the session has pending changes.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Hand the tree out for the external save operation, consuming the
    /// session. The shape is exactly what was edited; wrapped primitive
    /// array elements stay wrapped.
    pub fn submit(self) -> Value {
        self.store.into_value()
    }

    /// Render the whole form as a widget tree.
    pub fn render(&mut self) -> Option<FieldWidget> {
        Renderer::new(&self.store, &mut self.slots).render(&FieldPath::root(), &self.spec)
    }

    /// Write a raw value at `path` without consulting the specification.
    pub fn set_value(&mut self, path: &FieldPath, value: Value) {
        self.store.set(path, value);
        self.dirty = true;
    }

    /// Apply raw text entry to the scalar at `path`, coercing it per the
    /// field's type. Enumerated fields validate membership; numeric entry
    /// that does not parse becomes the empty sentinel.
    pub fn input(&mut self, path: &FieldPath, raw: &str) -> Result<(), SchemaError> {
        let spec = spec_at(&self.spec, path)?;
        let value = match scalar::input_for(spec) {
            ScalarInput::Select(options) => {
                if options.iter().any(|option| option.value == raw) {
                    Value::String(raw.to_string())
                } else {
                    let values: Vec<&str> =
                        options.iter().map(|option| option.value.as_str()).collect();
                    return Err(SchemaError::TypeMismatch {
                        path: path.to_string(),
                        expected: format!("one of: {values:?}"),
                        actual: raw.to_string(),
                    });
                }
            }
            ScalarInput::Text { .. } | ScalarInput::Freeform => Value::String(raw.to_string()),
            ScalarInput::Int => scalar::coerce_int(raw),
            ScalarInput::Float => scalar::coerce_float(raw),
            ScalarInput::Toggle => match raw.trim().to_ascii_lowercase().as_str() {
                "true" => Value::Bool(true),
                "false" => Value::Bool(false),
                _ => {
                    return Err(SchemaError::TypeMismatch {
                        path: path.to_string(),
                        expected: "boolean".to_string(),
                        actual: raw.to_string(),
                    });
                }
            },
            ScalarInput::Nested => {
                return Err(SchemaError::KindMismatch {
                    path: path.to_string(),
                    expected: "a scalar",
                });
            }
        };
        self.store.set(path, value);
        self.dirty = true;
        Ok(())
    }

    /// Append a synthesized element to the array at `path`.
    pub fn array_append(&mut self, path: &FieldPath) -> Result<SlotId, SchemaError> {
        let spec = spec_at(&self.spec, path)?;
        let spec = row_coerced(&self.spec, path, spec);
        let editor = ArrayEditor::bind(path.clone(), spec.as_ref())?;
        let id = editor.append(&mut self.store, &mut self.slots);
        self.dirty = true;
        Ok(id)
    }

    /// Remove the element at `index` from the array at `path`.
    pub fn array_remove(&mut self, path: &FieldPath, index: usize) -> Result<bool, SchemaError> {
        let spec = spec_at(&self.spec, path)?;
        let spec = row_coerced(&self.spec, path, spec);
        let editor = ArrayEditor::bind(path.clone(), spec.as_ref())?;
        let removed = editor.remove(&mut self.store, &mut self.slots, index);
        self.dirty |= removed;
        Ok(removed)
    }

    /// Move the element at `index` of the array at `path` one position up.
    pub fn array_move_up(&mut self, path: &FieldPath, index: usize) -> Result<bool, SchemaError> {
        let spec = spec_at(&self.spec, path)?;
        let spec = row_coerced(&self.spec, path, spec);
        let editor = ArrayEditor::bind(path.clone(), spec.as_ref())?;
        let moved = editor.move_up(&mut self.store, &mut self.slots, index);
        self.dirty |= moved;
        Ok(moved)
    }

    /// Move the element at `index` of the array at `path` one position
    /// down.
    pub fn array_move_down(&mut self, path: &FieldPath, index: usize) -> Result<bool, SchemaError> {
        let spec = spec_at(&self.spec, path)?;
        let spec = row_coerced(&self.spec, path, spec);
        let editor = ArrayEditor::bind(path.clone(), spec.as_ref())?;
        let moved = editor.move_down(&mut self.store, &mut self.slots, index);
        self.dirty |= moved;
        Ok(moved)
    }

    /// Append an empty row to the 2darray at `path`.
    pub fn matrix_add_row(&mut self, path: &FieldPath) -> Result<SlotId, SchemaError> {
        let spec = spec_at(&self.spec, path)?;
        let editor = MatrixEditor::bind(path.clone(), spec)?;
        let id = editor.add_row(&mut self.store, &mut self.slots);
        self.dirty = true;
        Ok(id)
    }

    /// Remove the row at `index` from the 2darray at `path`.
    pub fn matrix_remove_row(&mut self, path: &FieldPath, index: usize) -> Result<bool, SchemaError> {
        let spec = spec_at(&self.spec, path)?;
        let editor = MatrixEditor::bind(path.clone(), spec)?;
        let removed = editor.remove_row(&mut self.store, &mut self.slots, index);
        self.dirty |= removed;
        Ok(removed)
    }

    /// Insert `key` into the map at `path` with a synthesized value.
    /// Empty and duplicate keys are rejected without error.
    pub fn map_insert(&mut self, path: &FieldPath, key: &str) -> Result<bool, SchemaError> {
        let spec = spec_at(&self.spec, path)?;
        let editor = MapEditor::bind(path.clone(), spec)?;
        let added = editor.add_pair(&mut self.store, key);
        self.dirty |= added;
        Ok(added)
    }

    /// Delete `key` from the map at `path` entirely.
    pub fn map_remove(&mut self, path: &FieldPath, key: &str) -> Result<bool, SchemaError> {
        let spec = spec_at(&self.spec, path)?;
        let editor = MapEditor::bind(path.clone(), spec)?;
        let removed = editor.remove_pair(&mut self.store, key);
        self.dirty |= removed;
        Ok(removed)
    }
}

/// A 2darray row edits like an array: when `path` addresses a row of the
/// matrix `spec` resolves to, hand back the derived row specification.
fn row_coerced<'s>(
    root: &FieldSpec,
    path: &FieldPath,
    spec: &'s FieldSpec,
) -> Cow<'s, FieldSpec> {
    if spec.kind == FieldKind::Matrix && matches!(path.last(), Some(PathSegment::Index(_))) {
        if let Some(parent) = path.parent() {
            // A row path resolves to the same matrix node its parent does;
            // an array element that happens to be a matrix does not.
            if let Ok(parent_spec) = spec_at(root, &parent) {
                if std::ptr::eq(parent_spec, spec) {
                    return Cow::Owned(FieldSpec {
                        kind: FieldKind::Array,
                        ..spec.clone()
                    });
                }
            }
        }
    }
    Cow::Borrowed(spec)
}
