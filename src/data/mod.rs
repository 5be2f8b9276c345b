//! Schema and value-tree data structures.
//!
//! Everything under this module is UI-free: the field specification model,
//! default synthesis, structured paths, the path-addressed value store and
//! the restore-time shape check. The editors in [`crate::editor`] and the
//! dispatcher in [`crate::render`] are built entirely on top of these
//! pieces.
//!
//! - [`spec`] - field specification model and path resolution
//! - [`default`] - default value synthesis
//! - [`path`] - structured field paths
//! - [`store`] - value store contract and in-memory tree
//! - [`conform`] - shape checking for saved value trees
//! - [`error`] - schema error types

/// Shape checking for saved value trees.
pub mod conform;

/// Default value synthesis.
pub mod default;

/// Schema error types.
pub mod error;

/// Structured field paths.
pub mod path;

/// Field specification model.
pub mod spec;

/// Value store contract and in-memory tree.
pub mod store;

pub use error::SchemaError;
pub use path::{FieldPath, PathSegment};
pub use spec::{ElementClass, FieldKind, FieldSpec, FieldType};
pub use store::{TreeStore, ValueStore};
