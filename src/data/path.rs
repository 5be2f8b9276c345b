//! Structured field paths.
//!
//! A [`FieldPath`] addresses one location inside a value tree. Internally it
//! is a sequence of typed segments, so a numeric map key and an array index
//! never collide. The dotted string form exists only for the boundary with
//! the surrounding form state: numeric segments always denote indices and
//! everything else denotes keys, which is why digit-only map keys are not
//! representable in string form.

use std::fmt;

/// One step of a field path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Object property or map key.
    Key(String),
    /// Array element or matrix row index.
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(name) => f.write_str(name),
            PathSegment::Index(idx) => write!(f, "{idx}"),
        }
    }
}

/// Path addressing a location inside the value tree.
///
/// Paths are cheap to extend and compare; editors derive child paths with
/// [`FieldPath::key`] and [`FieldPath::index`] while recursing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// The empty path, addressing the whole tree.
    pub fn root() -> Self {
        Self::default()
    }

    /// Whether this path addresses the whole tree.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// The segments of this path, outermost first.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Derive the child path for an object property or map key.
    pub fn key(&self, name: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Key(name.to_string()));
        Self { segments }
    }

    /// Derive the child path for an array element or matrix row.
    pub fn index(&self, idx: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(idx));
        Self { segments }
    }

    /// The path one level up, or `None` at the root.
    pub fn parent(&self) -> Option<Self> {
        let (_, rest) = self.segments.split_last()?;
        Some(Self {
            segments: rest.to_vec(),
        })
    }

    /// The innermost segment, or `None` at the root.
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    /// Whether `prefix` is an ancestor of (or equal to) this path.
    pub fn starts_with(&self, prefix: &Self) -> bool {
        self.segments.len() >= prefix.segments.len()
            && self.segments[..prefix.segments.len()] == prefix.segments[..]
    }

    /// Parse the dotted boundary form. Digit-only segments become indices.
    pub fn parse(raw: &str) -> Self {
        let segments = raw
            .split('.')
            .filter(|s| !s.is_empty())
            .map(|s| match s.parse::<usize>() {
                Ok(idx) => PathSegment::Index(idx),
                Err(_) => PathSegment::Key(s.to_string()),
            })
            .collect();
        Self { segments }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seg) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{seg}")?;
        }
        Ok(())
    }
}

impl From<&str> for FieldPath {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_and_prints_dotted_form() {
        let path = FieldPath::root().key("mapping").index(2).key("value");
        assert_eq!(path.to_string(), "mapping.2.value");
    }

    #[test]
    fn parses_numeric_segments_as_indices() {
        let path = FieldPath::parse("headers.0.value");
        assert_eq!(
            path.segments(),
            &[
                PathSegment::Key("headers".into()),
                PathSegment::Index(0),
                PathSegment::Key("value".into()),
            ]
        );
    }

    #[test]
    fn root_round_trips_as_empty_string() {
        assert!(FieldPath::parse("").is_root());
        assert_eq!(FieldPath::root().to_string(), "");
    }

    #[test]
    fn parent_walks_up_to_root() {
        let path = FieldPath::parse("a.b");
        let up = path.parent().unwrap();
        assert_eq!(up.to_string(), "a");
        assert_eq!(up.parent().unwrap(), FieldPath::root());
        assert!(FieldPath::root().parent().is_none());
    }

    #[test]
    fn prefix_check_is_segment_wise() {
        let outer = FieldPath::parse("rules.1");
        assert!(FieldPath::parse("rules.1.name").starts_with(&outer));
        assert!(outer.starts_with(&outer));
        // "rules.10" shares a string prefix but not a segment prefix.
        assert!(!FieldPath::parse("rules.10").starts_with(&outer));
    }
}
