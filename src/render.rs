//! Kind dispatch and widget tree construction.
//!
//! [`Renderer::render`] is the single entry point deciding which editor a
//! field mounts. It consults the field's kind, delegates to the matching
//! editor, and re-invokes itself for nested fields; there is no separate
//! tree walker. The output is a host-agnostic [`FieldWidget`] tree the
//! surrounding console draws however it likes.

use crate::data::path::FieldPath;
use crate::data::spec::{ElementClass, FieldKind, FieldSpec};
use crate::data::store::ValueStore;
use crate::editor::array::ArrayEditor;
use crate::editor::map::MapEditor;
use crate::editor::matrix::MatrixEditor;
use crate::editor::object::ObjectEditor;
use crate::editor::scalar::{self, ScalarInput, SelectOption};
use crate::editor::slots::{SlotId, SlotRegistry};

/// One element of a rendered sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct ListItem {
    /// Stable identity of the element.
    pub slot: SlotId,
    /// Current position; valid only for this render pass.
    pub index: usize,
    /// Whether the move-up control is enabled.
    pub can_move_up: bool,
    /// Whether the move-down control is enabled.
    pub can_move_down: bool,
    /// The element's editor, or `None` when an external picker owns it.
    pub editor: Option<FieldWidget>,
}

/// One row of a rendered 2darray.
#[derive(Debug, Clone, PartialEq)]
pub struct GridRow {
    /// Stable identity of the row.
    pub slot: SlotId,
    /// Current position; valid only for this render pass.
    pub index: usize,
    /// The row's list editor.
    pub editor: Option<FieldWidget>,
}

/// One entry of a rendered map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapEntry {
    /// The user-defined key; doubles as the entry's display label.
    pub key: String,
    /// The entry value's editor.
    pub editor: Option<FieldWidget>,
}

/// Host-facing description of one field's editor.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldWidget {
    /// Free-text input.
    Text {
        /// Path the input binds to.
        path: FieldPath,
        /// Display label.
        label: String,
        /// Current text.
        value: String,
        /// Mask the value while displaying it.
        secret: bool,
    },
    /// Whole-number input. `None` is an empty input.
    Int {
        /// Path the input binds to.
        path: FieldPath,
        /// Display label.
        label: String,
        /// Current value.
        value: Option<i64>,
    },
    /// Floating-point input. `None` is an empty input.
    Float {
        /// Path the input binds to.
        path: FieldPath,
        /// Display label.
        label: String,
        /// Current value.
        value: Option<f64>,
    },
    /// On/off toggle.
    Toggle {
        /// Path the input binds to.
        path: FieldPath,
        /// Display label.
        label: String,
        /// Current state.
        value: bool,
    },
    /// Enumerated choice.
    Select {
        /// Path the input binds to.
        path: FieldPath,
        /// Display label.
        label: String,
        /// Offered choices.
        options: Vec<SelectOption>,
        /// Currently selected value.
        value: String,
    },
    /// Fixed-shape record with one child widget per property.
    Section {
        /// Path of the record.
        path: FieldPath,
        /// Display label.
        label: String,
        /// Child widgets, in declaration order.
        children: Vec<FieldWidget>,
    },
    /// Ordered sequence with append/remove/move controls.
    List {
        /// Path of the sequence.
        path: FieldPath,
        /// Display label.
        label: String,
        /// How elements are shaped.
        class: ElementClass,
        /// Rendered elements; empty lists render an empty-state affordance.
        items: Vec<ListItem>,
    },
    /// Sequence of rows, each rendered as a [`FieldWidget::List`].
    Grid {
        /// Path of the sequence.
        path: FieldPath,
        /// Display label.
        label: String,
        /// Rendered rows.
        rows: Vec<GridRow>,
    },
    /// Record with user-defined keys.
    Entries {
        /// Path of the record.
        path: FieldPath,
        /// Display label.
        label: String,
        /// Rendered entries.
        entries: Vec<MapEntry>,
    },
    /// Disabled placeholder for a kind this engine does not recognize.
    Unsupported {
        /// Path of the field.
        path: FieldPath,
        /// Display label.
        label: String,
        /// The literal kind tag, shown to the operator.
        kind: String,
    },
}

/// Widget-tree builder over a value store.
pub struct Renderer<'a> {
    store: &'a dyn ValueStore,
    slots: &'a mut SlotRegistry,
}

impl<'a> Renderer<'a> {
    /// Build a renderer over `store`, tracking element identity in `slots`.
    pub fn new(store: &'a dyn ValueStore, slots: &'a mut SlotRegistry) -> Self {
        Self { store, slots }
    }

    /// Decide the editor for `spec` at `path`.
    ///
    /// Returns `None` for component references (an external picker owns
    /// them) and for composite fields whose schema declares no element
    /// child; an unrecognized kind yields a disabled placeholder instead,
    /// so the failure stays visible.
    pub fn render(&mut self, path: &FieldPath, spec: &FieldSpec) -> Option<FieldWidget> {
        self.widget(path, spec, &spec.name)
    }

    fn widget(&mut self, path: &FieldPath, spec: &FieldSpec, label: &str) -> Option<FieldWidget> {
        if spec.ty.is_component() {
            debug!("`{path}` is a {} reference, deferring to the picker", spec.ty);
            return None;
        }
        match &spec.kind {
            FieldKind::Scalar => Some(self.scalar(path, spec, label)),
            FieldKind::Object => Some(self.object(path, spec, label)),
            FieldKind::Array => self.array(path, spec, label),
            FieldKind::Matrix => self.matrix(path, spec, label),
            FieldKind::Map => self.map(path, spec, label),
            FieldKind::Unknown(tag) => {
                warn!("`{path}` has unrecognized kind {tag:?}, rendering a placeholder");
                Some(FieldWidget::Unsupported {
                    path: path.clone(),
                    label: label.to_string(),
                    kind: tag.clone(),
                })
            }
        }
    }

    fn scalar(&mut self, path: &FieldPath, spec: &FieldSpec, label: &str) -> FieldWidget {
        let stored = self.store.get(path);
        match scalar::input_for(spec) {
            ScalarInput::Select(options) => FieldWidget::Select {
                path: path.clone(),
                label: label.to_string(),
                value: scalar::text_value(spec, stored),
                options,
            },
            ScalarInput::Text { secret } => FieldWidget::Text {
                path: path.clone(),
                label: label.to_string(),
                value: scalar::text_value(spec, stored),
                secret,
            },
            ScalarInput::Int => FieldWidget::Int {
                path: path.clone(),
                label: label.to_string(),
                value: scalar::int_value(spec, stored),
            },
            ScalarInput::Float => FieldWidget::Float {
                path: path.clone(),
                label: label.to_string(),
                value: scalar::float_value(spec, stored),
            },
            ScalarInput::Toggle => FieldWidget::Toggle {
                path: path.clone(),
                label: label.to_string(),
                value: scalar::toggle_value(spec, stored),
            },
            ScalarInput::Nested => self.object(path, spec, label),
            ScalarInput::Freeform => FieldWidget::Text {
                path: path.clone(),
                label: label.to_string(),
                value: scalar::text_value(spec, stored),
                secret: false,
            },
        }
    }

    fn object(&mut self, path: &FieldPath, spec: &FieldSpec, label: &str) -> FieldWidget {
        let children = match ObjectEditor::bind(path.clone(), spec) {
            Ok(editor) => editor
                .children()
                .iter()
                .filter_map(|child| self.render(&editor.child_path(child), child))
                .collect(),
            Err(_) => Vec::new(),
        };
        FieldWidget::Section {
            path: path.clone(),
            label: label.to_string(),
            children,
        }
    }

    fn array(&mut self, path: &FieldPath, spec: &FieldSpec, label: &str) -> Option<FieldWidget> {
        let editor = match ArrayEditor::bind(path.clone(), spec) {
            Ok(editor) => editor,
            Err(err) => {
                warn!("not rendering `{path}`: {err}");
                return None;
            }
        };
        let len = editor.len(self.store);
        let ids = self.slots.sync(path, len).to_vec();
        let items = ids
            .into_iter()
            .enumerate()
            .map(|(index, slot)| ListItem {
                slot,
                index,
                can_move_up: index > 0,
                can_move_down: index + 1 < len,
                editor: self.widget(
                    &editor.edit_path(index),
                    editor.element_spec(),
                    &editor.element_spec().name,
                ),
            })
            .collect();
        Some(FieldWidget::List {
            path: path.clone(),
            label: label.to_string(),
            class: editor.class(),
            items,
        })
    }

    fn matrix(&mut self, path: &FieldPath, spec: &FieldSpec, label: &str) -> Option<FieldWidget> {
        let editor = match MatrixEditor::bind(path.clone(), spec) {
            Ok(editor) => editor,
            Err(err) => {
                warn!("not rendering `{path}`: {err}");
                return None;
            }
        };
        let rows_len = editor.rows(self.store);
        let ids = self.slots.sync(path, rows_len).to_vec();
        let row_spec = editor.row_spec();
        let rows = ids
            .into_iter()
            .enumerate()
            .map(|(index, slot)| GridRow {
                slot,
                index,
                editor: self.array(&editor.row_path(index), &row_spec, label),
            })
            .collect();
        Some(FieldWidget::Grid {
            path: path.clone(),
            label: label.to_string(),
            rows,
        })
    }

    fn map(&mut self, path: &FieldPath, spec: &FieldSpec, label: &str) -> Option<FieldWidget> {
        let editor = match MapEditor::bind(path.clone(), spec) {
            Ok(editor) => editor,
            Err(err) => {
                warn!("not rendering `{path}`: {err}");
                return None;
            }
        };
        let entries = editor
            .keys(self.store)
            .into_iter()
            .map(|key| {
                // The key is both the path segment and the display label.
                let widget = self.widget(&editor.entry_path(&key), editor.value_spec(), &key);
                MapEntry {
                    key,
                    editor: widget,
                }
            })
            .collect();
        Some(FieldWidget::Entries {
            path: path.clone(),
            label: label.to_string(),
            entries,
        })
    }
}
