//! Locations inside the contained document.
//!
//! A [`Path`] is rendered as a JSON Pointer (RFC 6901) so mismatches can be
//! looked up with any pointer-aware tool.

use std::fmt;

use serde::{Serialize, Serializer};

/// One step from a parent node to a child.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathStep {
    Key(String),
    Index(usize),
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathStep::Key(key) => f.write_str(&escape_component(key)),
            PathStep::Index(index) => write!(f, "{index}"),
        }
    }
}

impl From<&str> for PathStep {
    fn from(key: &str) -> Self {
        PathStep::Key(key.to_string())
    }
}

impl From<usize> for PathStep {
    fn from(index: usize) -> Self {
        PathStep::Index(index)
    }
}

/// Steps from the root of the contained document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path(Vec<PathStep>);

impl Path {
    pub fn root() -> Self {
        Path(Vec::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.0
    }

    pub fn push(&mut self, step: impl Into<PathStep>) {
        self.0.push(step.into());
    }

    pub fn pop(&mut self) -> Option<PathStep> {
        self.0.pop()
    }

    pub(crate) fn truncate(&mut self, depth: usize) {
        self.0.truncate(depth);
    }

    /// Render as a JSON Pointer. The root is the empty string.
    pub fn to_pointer(&self) -> String {
        let mut out = String::new();
        for step in &self.0 {
            out.push('/');
            out.push_str(&step.to_string());
        }
        out
    }
}

impl<S: Into<PathStep>> FromIterator<S> for Path {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Path(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for Path {
    /// Human form: the pointer, or `(root)` for the empty path.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            f.write_str("(root)")
        } else {
            f.write_str(&self.to_pointer())
        }
    }
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_pointer())
    }
}

/// Escapes a JSON Pointer path component.
///
/// Per RFC 6901, `~` becomes `~0` and `/` becomes `~1`.
pub fn escape_component(component: &str) -> String {
    if !component.contains('/') && !component.contains('~') {
        return component.to_string();
    }
    // `~` first, otherwise the `~` introduced by `~1` would be escaped again
    component.replace('~', "~0").replace('/', "~1")
}
