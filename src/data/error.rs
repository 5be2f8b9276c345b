use thiserror::Error;

/// Errors produced while interpreting a field specification or applying
/// saved values against it.
///
/// Every variant carries the dotted path of the offending field so the
/// surrounding console can point the operator at it. None of these are
/// fatal to an editing session; the worst outcome is a field that stays
/// inert or a restore that is refused.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// An array, matrix or map field declares no element child.
    ///
    /// Such a node cannot synthesize elements and is not renderable.
    #[error("field `{path}` of kind {kind} has no element child")]
    MissingElement {
        /// Path of the malformed field.
        path: String,
        /// The literal kind tag of the field.
        kind: String,
    },

    /// A field was bound through an editor for a kind it does not have.
    #[error("field `{path}` is not {expected}")]
    KindMismatch {
        /// Path of the field.
        path: String,
        /// The kind the editor expected.
        expected: &'static str,
    },

    /// A value does not match the type its specification declares.
    #[error("type mismatch at `{path}`: expected {expected}, got {actual}")]
    TypeMismatch {
        /// Path of the mismatching value.
        path: String,
        /// Description of the expected shape.
        expected: String,
        /// Rendering of the value actually found.
        actual: String,
    },

    /// A path does not resolve to any node of the specification tree.
    #[error("no field at `{path}`")]
    UnknownField {
        /// The path that failed to resolve.
        path: String,
    },
}
