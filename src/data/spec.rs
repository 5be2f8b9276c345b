//! Field specification model.
//!
//! A [`FieldSpec`] tree describes the configuration surface of one pipeline
//! component. It is produced by the component catalog at runtime and treated
//! as read-only input: the engine never mutates a specification, only the
//! value tree it governs. The tree is finite and acyclic, so every traversal
//! here terminates.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::data::error::SchemaError;
use crate::data::path::{FieldPath, PathSegment};
use crate::editor::wrap::VALUE_FIELD;

/// Reserved `type` markers that reference another pipeline component rather
/// than a plain value. Fields carrying one of these are rendered by the
/// component picker, not by this engine.
pub const COMPONENT_TYPES: &[&str] = &[
    "input",
    "output",
    "processor",
    "cache",
    "buffer",
    "rate_limit",
    "scanner",
    "metrics",
    "tracer",
];

/// Structural kind of a field.
///
/// Closed over the shapes the engine understands; tags it does not are kept
/// verbatim in [`FieldKind::Unknown`] so the fallback placeholder can show
/// them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Single value, shaped by [`FieldType`].
    Scalar,
    /// Record with one fixed child per property.
    Object,
    /// Ordered sequence of same-typed elements.
    Array,
    /// Ordered sequence of rows, each itself an array. The catalog tag is
    /// `2darray`.
    Matrix,
    /// Record with user-defined keys and same-typed values.
    Map,
    /// A tag this engine does not recognize.
    Unknown(String),
}

impl FieldKind {
    /// Parse a catalog kind tag.
    pub fn parse(tag: &str) -> Self {
        match tag {
            "scalar" => FieldKind::Scalar,
            "object" => FieldKind::Object,
            "array" => FieldKind::Array,
            "2darray" => FieldKind::Matrix,
            "map" => FieldKind::Map,
            other => FieldKind::Unknown(other.to_string()),
        }
    }

    /// The literal catalog tag.
    pub fn as_str(&self) -> &str {
        match self {
            FieldKind::Scalar => "scalar",
            FieldKind::Object => "object",
            FieldKind::Array => "array",
            FieldKind::Matrix => "2darray",
            FieldKind::Map => "map",
            FieldKind::Unknown(tag) => tag,
        }
    }
}

impl Default for FieldKind {
    fn default() -> Self {
        FieldKind::Scalar
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FieldKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(FieldKind::parse(&tag))
    }
}

/// Value type of a scalar field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    /// Free text.
    String,
    /// Whole number.
    Int,
    /// Floating-point number.
    Float,
    /// On/off flag.
    Bool,
    /// Nested record; the field's children describe its properties.
    Object,
    /// Reference to another component of the named category
    /// (see [`COMPONENT_TYPES`]).
    Component(String),
    /// A type tag this engine does not recognize.
    Other(String),
}

impl FieldType {
    /// Parse a catalog type tag.
    pub fn parse(tag: &str) -> Self {
        match tag {
            "string" => FieldType::String,
            "int" => FieldType::Int,
            "float" => FieldType::Float,
            "bool" => FieldType::Bool,
            "object" => FieldType::Object,
            other if COMPONENT_TYPES.contains(&other) => FieldType::Component(other.to_string()),
            other => FieldType::Other(other.to_string()),
        }
    }

    /// The literal catalog tag.
    pub fn as_str(&self) -> &str {
        match self {
            FieldType::String => "string",
            FieldType::Int => "int",
            FieldType::Float => "float",
            FieldType::Bool => "bool",
            FieldType::Object => "object",
            FieldType::Component(tag) | FieldType::Other(tag) => tag,
        }
    }

    /// Whether this type references another component.
    pub fn is_component(&self) -> bool {
        matches!(self, FieldType::Component(_))
    }
}

impl Default for FieldType {
    fn default() -> Self {
        FieldType::String
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FieldType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(FieldType::parse(&tag))
    }
}

/// Enumerated choice with a human description. Only the value participates
/// in defaulting and storage.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AnnotatedOption {
    /// Stored value of the choice.
    pub value: String,
    /// Description shown alongside it.
    #[serde(default)]
    pub description: String,
}

/// How a field behaves as an array element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementClass {
    /// Fixed-shape record; elements are synthesized from the child list.
    Structured,
    /// Component reference; elements start as empty records and are filled
    /// in by the external picker.
    Component,
    /// Bare primitive; elements are stored wrapped so they can carry a
    /// stable identity.
    Primitive,
}

/// One node of a component configuration schema.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldSpec {
    /// Identifier segment used to build paths.
    pub name: String,
    /// Structural kind.
    #[serde(default)]
    pub kind: FieldKind,
    /// Scalar value type.
    #[serde(rename = "type", default)]
    pub ty: FieldType,
    /// Literal default value, returned verbatim by the synthesizer.
    #[serde(default)]
    pub default: Option<Value>,
    /// Plain enumerated choices.
    #[serde(default)]
    pub options: Option<Vec<String>>,
    /// Enumerated choices with descriptions.
    #[serde(default)]
    pub annotated_options: Option<Vec<AnnotatedOption>>,
    /// Child fields: one per property for objects, exactly one element
    /// description for arrays, matrices and maps.
    #[serde(default)]
    pub children: Option<Vec<FieldSpec>>,
    /// Presentation hint: mask the value when displaying it.
    #[serde(default)]
    pub is_secret: bool,
}

impl FieldSpec {
    /// The element child of an array, matrix or map field.
    pub fn element(&self) -> Option<&FieldSpec> {
        self.children.as_deref().and_then(<[FieldSpec]>::first)
    }

    /// Look up an object child by name.
    pub fn child(&self, name: &str) -> Option<&FieldSpec> {
        self.children
            .as_deref()
            .and_then(|children| children.iter().find(|c| c.name == name))
    }

    /// Whether this field declares any children.
    pub fn has_children(&self) -> bool {
        self.children.as_deref().is_some_and(|c| !c.is_empty())
    }

    /// Whether this field is record-shaped: object kind, or a scalar of
    /// type object.
    pub fn is_object_shaped(&self) -> bool {
        self.kind == FieldKind::Object
            || (self.kind == FieldKind::Scalar && self.ty == FieldType::Object)
    }

    /// Classify this field as an array element.
    pub fn element_class(&self) -> ElementClass {
        if self.kind == FieldKind::Object || self.has_children() {
            ElementClass::Structured
        } else if self.ty.is_component() {
            ElementClass::Component
        } else {
            ElementClass::Primitive
        }
    }
}

/// Resolve the specification node governing `path`.
///
/// Object segments follow children by name, indices step into array
/// elements and matrix rows, and map keys step into the value child. The
/// `value` hop under a primitive array element resolves back to the element
/// itself, matching the wrapped storage layout.
pub fn spec_at<'a>(spec: &'a FieldSpec, path: &FieldPath) -> Result<&'a FieldSpec, SchemaError> {
    let unknown = || SchemaError::UnknownField {
        path: path.to_string(),
    };

    let mut cursor = spec;
    // Set when the cursor sits inside a matrix, between the row index and
    // the element index.
    let mut in_row = false;
    // Set when the cursor is a wrapped primitive element awaiting its
    // `value` hop.
    let mut wrapped = false;

    for seg in path.segments() {
        if wrapped {
            match seg {
                PathSegment::Key(k) if k == VALUE_FIELD => {
                    wrapped = false;
                    continue;
                }
                _ => return Err(unknown()),
            }
        }
        match (seg, &cursor.kind) {
            (PathSegment::Key(k), _) if cursor.is_object_shaped() => {
                cursor = cursor.child(k).ok_or_else(unknown)?;
            }
            (PathSegment::Key(_), FieldKind::Map) => {
                cursor = cursor.element().ok_or_else(unknown)?;
            }
            (PathSegment::Index(_), FieldKind::Array) => {
                let element = cursor.element().ok_or_else(unknown)?;
                wrapped = element.element_class() == ElementClass::Primitive;
                cursor = element;
            }
            (PathSegment::Index(_), FieldKind::Matrix) if !in_row => {
                in_row = true;
            }
            (PathSegment::Index(_), FieldKind::Matrix) => {
                let element = cursor.element().ok_or_else(unknown)?;
                wrapped = element.element_class() == ElementClass::Primitive;
                in_row = false;
                cursor = element;
            }
            _ => return Err(unknown()),
        }
    }

    // A path may stop on a matrix row or on a wrapper record; both resolve
    // to the node the cursor already points at.
    Ok(cursor)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar(name: &str, ty: &str) -> FieldSpec {
        FieldSpec {
            name: name.to_string(),
            kind: FieldKind::Scalar,
            ty: FieldType::parse(ty),
            default: None,
            options: None,
            annotated_options: None,
            children: None,
            is_secret: false,
        }
    }

    fn composite(name: &str, kind: FieldKind, children: Vec<FieldSpec>) -> FieldSpec {
        FieldSpec {
            children: Some(children),
            kind,
            ..scalar(name, "string")
        }
    }

    #[test]
    fn parses_catalog_tags() {
        assert_eq!(FieldKind::parse("2darray"), FieldKind::Matrix);
        assert_eq!(
            FieldKind::parse("widget"),
            FieldKind::Unknown("widget".into())
        );
        assert!(FieldType::parse("processor").is_component());
        assert_eq!(FieldType::parse("blob"), FieldType::Other("blob".into()));
    }

    #[test]
    fn deserializes_spec_from_catalog_json() {
        let raw = r#"{
            "name": "batching",
            "kind": "object",
            "children": [
                { "name": "count", "type": "int", "default": 0 },
                { "name": "period", "type": "string" }
            ]
        }"#;
        let spec: FieldSpec = serde_json::from_str(raw).unwrap();
        assert_eq!(spec.kind, FieldKind::Object);
        assert_eq!(spec.child("count").unwrap().ty, FieldType::Int);
        assert!(spec.child("missing").is_none());
    }

    #[test]
    fn classifies_array_elements() {
        assert_eq!(
            scalar("s", "string").element_class(),
            ElementClass::Primitive
        );
        assert_eq!(
            scalar("p", "processor").element_class(),
            ElementClass::Component
        );
        let obj = composite("o", FieldKind::Object, vec![scalar("a", "string")]);
        assert_eq!(obj.element_class(), ElementClass::Structured);
        // A scalar that declares children is object-shaped too.
        let nested = FieldSpec {
            children: Some(vec![scalar("a", "string")]),
            ..scalar("n", "object")
        };
        assert_eq!(nested.element_class(), ElementClass::Structured);
    }

    #[test]
    fn resolves_object_and_map_paths() {
        let spec = composite(
            "root",
            FieldKind::Object,
            vec![
                scalar("url", "string"),
                composite("headers", FieldKind::Map, vec![scalar("value", "string")]),
            ],
        );
        let url = spec_at(&spec, &FieldPath::parse("url")).unwrap();
        assert_eq!(url.name, "url");
        let entry = spec_at(&spec, &FieldPath::parse("headers.Content-Type")).unwrap();
        assert_eq!(entry.ty, FieldType::String);
    }

    #[test]
    fn resolves_wrapped_primitive_elements() {
        let spec = composite("urls", FieldKind::Array, vec![scalar("url", "string")]);
        let elem = spec_at(&spec, &FieldPath::parse("1")).unwrap();
        assert_eq!(elem.name, "url");
        let inner = spec_at(&spec, &FieldPath::parse("1.value")).unwrap();
        assert_eq!(inner.name, "url");
        assert!(spec_at(&spec, &FieldPath::parse("1.other")).is_err());
    }

    #[test]
    fn resolves_matrix_rows_and_elements() {
        let spec = composite("grid", FieldKind::Matrix, vec![scalar("cell", "int")]);
        // A row index alone still resolves to the matrix field.
        assert_eq!(spec_at(&spec, &FieldPath::parse("0")).unwrap().name, "grid");
        let cell = spec_at(&spec, &FieldPath::parse("0.2")).unwrap();
        assert_eq!(cell.ty, FieldType::Int);
        assert!(spec_at(&spec, &FieldPath::parse("0.2.value")).is_ok());
    }

    #[test]
    fn rejects_paths_off_the_tree() {
        let spec = composite("root", FieldKind::Object, vec![scalar("url", "string")]);
        assert!(matches!(
            spec_at(&spec, &FieldPath::parse("nope")),
            Err(SchemaError::UnknownField { .. })
        ));
        assert!(spec_at(&spec, &FieldPath::parse("url.0")).is_err());
    }
}
