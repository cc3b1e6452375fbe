//! Mismatch records and the result of a check.

use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::path::Path;
use crate::value::Shape;

/// One point where containment failed.
///
/// Values are borrowed from the two input trees; paths are expressed in
/// terms of the contained document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case", bound(serialize = "V: Serialize"))]
pub enum Mismatch<'a, V> {
    /// The two nodes at `path` have different shapes.
    TypeMismatch {
        expected: Shape,
        actual: Shape,
        path: Path,
    },
    /// The container mapping at `path` has no entry for `key`.
    MissingKey { key: &'a str, path: Path },
    /// No container element satisfies the contained element at `path`.
    MissingElement { element: &'a V, path: Path },
    /// Scalars of the same shape with different values.
    ValueMismatch {
        expected: &'a V,
        actual: &'a V,
        path: Path,
    },
    /// The contained node at `path` is outside the JSON model.
    UnsupportedConstruct { construct: &'static str, path: Path },
}

impl<V> Mismatch<'_, V> {
    pub fn path(&self) -> &Path {
        match self {
            Mismatch::TypeMismatch { path, .. }
            | Mismatch::MissingKey { path, .. }
            | Mismatch::MissingElement { path, .. }
            | Mismatch::ValueMismatch { path, .. }
            | Mismatch::UnsupportedConstruct { path, .. } => path,
        }
    }

    /// The tag used when the record is serialized.
    pub fn kind(&self) -> &'static str {
        match self {
            Mismatch::TypeMismatch { .. } => "type_mismatch",
            Mismatch::MissingKey { .. } => "missing_key",
            Mismatch::MissingElement { .. } => "missing_element",
            Mismatch::ValueMismatch { .. } => "value_mismatch",
            Mismatch::UnsupportedConstruct { .. } => "unsupported_construct",
        }
    }
}

impl<V: fmt::Display> fmt::Display for Mismatch<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::TypeMismatch {
                expected,
                actual,
                path,
            } => write!(f, "{path}: expected a {expected}, found a {actual}"),
            Mismatch::MissingKey { key, path } => write!(f, "{path}: missing key {key:?}"),
            Mismatch::MissingElement { element, path } => {
                write!(f, "{path}: no element in the container matches {element}")
            }
            Mismatch::ValueMismatch {
                expected,
                actual,
                path,
            } => write!(f, "{path}: expected {expected}, found {actual}"),
            Mismatch::UnsupportedConstruct { construct, path } => {
                write!(f, "{path}: unsupported construct `{construct}`")
            }
        }
    }
}

/// The verdict of one check together with its mismatch records.
///
/// The value is contained exactly when there are no records.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<'a, V> {
    diagnostics: Vec<Mismatch<'a, V>>,
}

impl<'a, V> Outcome<'a, V> {
    pub(crate) fn new(diagnostics: Vec<Mismatch<'a, V>>) -> Self {
        Self { diagnostics }
    }

    pub fn is_contained(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn diagnostics(&self) -> &[Mismatch<'a, V>] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Mismatch<'a, V>> {
        self.diagnostics
    }
}

impl<V: fmt::Display> Outcome<'_, V> {
    /// Plain-text report: a `Problems:` header and one line per mismatch.
    ///
    /// Empty when the value is contained.
    pub fn report(&self) -> String {
        if self.is_contained() {
            return String::new();
        }
        let mut out = String::from("Problems:\n");
        for mismatch in &self.diagnostics {
            out.push_str(&mismatch.to_string());
            out.push('\n');
        }
        out
    }
}

impl<V: Serialize> Serialize for Outcome<'_, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Outcome", 2)?;
        state.serialize_field("contained", &self.is_contained())?;
        state.serialize_field("problems", &self.diagnostics)?;
        state.end()
    }
}
