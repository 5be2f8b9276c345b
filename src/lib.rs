//! # pipeform
//!
//! A schema-driven configuration form engine for streaming pipeline
//! components.
//!
//! `pipeform` turns the configuration schema a streaming runtime reports
//! for its components (inputs, outputs, processors, caches, ...) into an
//! editable form: it synthesizes default values, keeps the edited value
//! tree addressable by path, and exposes the structural edit operations
//! (array append/remove/reorder, map key add/remove, 2darray rows) that
//! keep the tree consistent with the schema at every step.
//!
//! ## Features
//!
//! - Recursive field-specification model discovered at runtime from a
//!   component catalog
//! - Canonical default synthesis for any specification node
//! - Structured, unambiguous field paths with a dotted boundary form
//! - Path-addressed value store with a pluggable backing contract
//! - Array, 2darray, map and object editors with stable element identity
//!   across reordering
//! - Exhaustive kind dispatch with a visible placeholder for unrecognized
//!   kinds
//! - Session container with JSON/TOML load and save plus restore-time
//!   shape checking
//!
//! ## Quick Start
//!
//! ```rust
//! use pipeform::catalog::ComponentCatalog;
//! use pipeform::data::FieldPath;
//! use pipeform::session::FormSession;
//!
//! let catalog = ComponentCatalog::from_json(r#"{ "components": [{
//!     "name": "generate",
//!     "type": "input",
//!     "config": {
//!         "name": "generate",
//!         "kind": "object",
//!         "children": [
//!             { "name": "mapping", "type": "string" },
//!             { "name": "interval", "type": "string", "default": "1s" }
//!         ]
//!     }
//! }] }"#).unwrap();
//!
//! let component = catalog.component("input", "generate").unwrap();
//! let mut session = FormSession::new(component.config.clone());
//! session.input(&FieldPath::parse("mapping"), "root = {}").unwrap();
//! let value = session.submit();
//! assert_eq!(value["mapping"], "root = {}");
//! ```
//!
//! ## Modules
//!
//! - [`data`] - schema model, defaults, paths, value store
//! - [`editor`] - structural editors and element identity
//! - [`render`] - kind dispatch and widget tree construction
//! - [`session`] - editing-session container with load/save
//! - [`catalog`] - component catalog ingestion

#[macro_use]
extern crate log;

/// Component catalog ingestion.
pub mod catalog;

/// Schema and value-tree data structures.
///
/// The UI-free core: field specifications, default synthesis, structured
/// paths and the path-addressed value store.
pub mod data;

/// Structural editors over the value store.
///
/// Array, 2darray, map and object editors plus the scalar input glue and
/// the primitive wrapping policy.
pub mod editor;

/// Kind dispatch and widget tree construction.
pub mod render;

/// Editing-session container and persistence helpers.
pub mod session;

pub use catalog::{ComponentCatalog, ComponentSpec};
pub use data::{FieldKind, FieldPath, FieldSpec, FieldType, SchemaError, TreeStore, ValueStore};
pub use render::{FieldWidget, Renderer};
pub use session::FormSession;
