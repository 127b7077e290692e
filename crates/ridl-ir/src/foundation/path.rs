//! Name paths for package entities.
//!
//! Every entity in a package is addressed by the chain of ancestor names
//! from its owning package file down to itself. The same chain renders in
//! two forms: the dotted *full* name used at the IR level
//! (`geometry.Shape.Vertex`) and the scope-joined *qualified* name used by
//! the emitter (`geometry::Shape::Vertex`). `Path` holds the chain once and
//! renders either form on demand.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Separator of the dotted (IR-level) name form.
pub const DOT: &str = ".";

/// Separator of the qualified (scope-level) name form.
pub const SCOPE: &str = "::";

/// Ordered chain of ancestor names identifying one entity.
///
/// Paths are immutable value types; growing a path during tree descent
/// allocates a new one. They hash and compare by segment sequence, which
/// makes them usable as symbol-table keys in either rendered form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Path {
    segments: Vec<String>,
}

impl Path {
    /// Creates a path from pre-split segments.
    pub fn new(segments: Vec<String>) -> Self {
        Self { segments }
    }

    /// Parses a dotted name (`a.b.c`).
    pub fn from_dotted(s: &str) -> Self {
        Self {
            segments: s.split(DOT).map(String::from).collect(),
        }
    }

    /// Parses a scope-qualified name (`a::b::c`).
    pub fn from_scoped(s: &str) -> Self {
        Self {
            segments: s.split(SCOPE).map(String::from).collect(),
        }
    }

    /// The path segments, outermost first.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True for the empty path.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The leaf name.
    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// New path with one more segment at the leaf end.
    pub fn append(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    /// The dotted full-name form (`a.b.c`).
    pub fn dotted(&self) -> String {
        self.segments.join(DOT)
    }

    /// The scope-qualified form (`a::b::c`).
    pub fn scoped(&self) -> String {
        self.segments.join(SCOPE)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dotted())
    }
}

impl From<&str> for Path {
    fn from(s: &str) -> Self {
        Self::from_dotted(s)
    }
}

impl From<String> for Path {
    fn from(s: String) -> Self {
        Self::from_dotted(&s)
    }
}
