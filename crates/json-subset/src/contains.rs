use crate::diagnostics::{Mismatch, Outcome};
use crate::error::ContainsError;
use crate::options::{Mode, Options, UnsupportedPolicy};
use crate::path::Path;
use crate::value::{JsonLike, JsonMapping, Node};

/// Checks whether `contained` is present within `container`.
///
/// Stops at the first mismatch and treats constructs outside the JSON model
/// as mismatches. Use [`Checker`] for diagnostics and the other modes.
///
/// - Strings, numbers, booleans and null must be equal.
/// - Every key of a contained mapping must exist in the container mapping
///   with a containing value; extra container keys are ignored.
/// - Every element of a contained sequence must be contained in at least
///   one container element, in any position. Container elements may be
///   matched more than once.
///
/// # Examples
///
/// ```
/// use json_subset::contains;
/// use serde_json::json;
///
/// let actual = json!({"id": 7, "tags": ["a", "b", "c"], "extra": true});
///
/// assert!(contains(&actual, &json!({"tags": ["c", "a"]})));
/// assert!(!contains(&actual, &json!({"id": 8})));
/// ```
pub fn contains<V: JsonLike>(container: &V, contained: &V) -> bool {
    let mut walker = Walker::new(Options::default());
    walker.silent = 1;
    matches!(walker.visit(container, contained), Ok(true))
}

/// A configured containment check.
///
/// Sequence matching tries every container element for every contained
/// element, so a single level costs O(|container| × |contained|) recursive
/// probes. That is fine for assertion-sized documents but not linear.
///
/// # Examples
///
/// ```
/// use json_subset::{Checker, Mismatch, Options};
/// use serde_json::json;
///
/// let checker = Checker::new(Options::new().collect_all());
/// let actual = json!({"a": {"b": 1}});
/// let expected = json!({"a": {"b": 2}, "c": null});
///
/// let outcome = checker.check(&actual, &expected).unwrap();
/// assert!(!outcome.is_contained());
/// assert_eq!(outcome.diagnostics().len(), 2);
/// assert!(matches!(outcome.diagnostics()[1], Mismatch::MissingKey { key: "c", .. }));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Checker {
    options: Options,
}

impl Checker {
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    pub fn options(&self) -> Options {
        self.options
    }

    /// Runs the check and returns every recorded mismatch.
    ///
    /// # Errors
    ///
    /// Returns [`ContainsError::Unsupported`] when the contained tree holds a
    /// construct outside the JSON model and the policy is
    /// [`UnsupportedPolicy::Error`].
    pub fn check<'a, V: JsonLike>(
        &self,
        container: &'a V,
        contained: &'a V,
    ) -> Result<Outcome<'a, V>, ContainsError> {
        if self.options.unsupported == UnsupportedPolicy::Error {
            let mut path = Path::root();
            if let Some(construct) = first_unsupported(contained, &mut path) {
                return Err(ContainsError::Unsupported { construct, path });
            }
        }
        let mut walker = Walker::new(self.options);
        let matched = walker.visit(container, contained)?;
        debug_assert_eq!(matched, walker.diagnostics.is_empty());
        tracing::debug!(
            mode = ?self.options.mode,
            contained = matched,
            problems = walker.diagnostics.len(),
            "containment check finished"
        );
        Ok(Outcome::new(walker.diagnostics))
    }
}

/// Recursion state for one top-level check.
///
/// `path` tracks the position in the contained tree. While `silent` is
/// non-zero the walker is probing sequence candidates: nothing is recorded
/// and every level stops at its first mismatch.
struct Walker<'a, V> {
    options: Options,
    path: Path,
    diagnostics: Vec<Mismatch<'a, V>>,
    silent: usize,
}

impl<'a, V: JsonLike> Walker<'a, V> {
    fn new(options: Options) -> Self {
        Self {
            options,
            path: Path::root(),
            diagnostics: Vec::new(),
            silent: 0,
        }
    }

    fn visit(&mut self, container: &'a V, contained: &'a V) -> Result<bool, ContainsError> {
        match (contained.node(), container.node()) {
            (Node::Unsupported(construct), _) => self.unsupported(construct),
            (Node::Null, Node::Null) => Ok(true),
            (Node::Bool(expected), Node::Bool(actual)) => {
                Ok(expected == actual || self.value_mismatch(container, contained))
            }
            (Node::Number(expected), Node::Number(actual)) => {
                Ok(expected == actual || self.value_mismatch(container, contained))
            }
            (Node::String(expected), Node::String(actual)) => {
                Ok(expected == actual || self.value_mismatch(container, contained))
            }
            (Node::Sequence(expected), Node::Sequence(actual)) => {
                self.visit_sequence(actual, expected)
            }
            (Node::Mapping(expected), Node::Mapping(actual)) => self.visit_mapping(actual, expected),
            (expected, actual) => Ok(self.fail(|path| Mismatch::TypeMismatch {
                expected: expected.shape(),
                actual: actual.shape(),
                path,
            })),
        }
    }

    fn visit_mapping(
        &mut self,
        container: &'a V::Mapping,
        contained: &'a V::Mapping,
    ) -> Result<bool, ContainsError> {
        let mut matched = true;
        for (key, expected) in contained.entries() {
            let found = match container.get(key) {
                Some(actual) => {
                    self.path.push(key);
                    let result = self.visit(actual, expected);
                    self.path.pop();
                    result?
                }
                None => self.fail(|path| Mismatch::MissingKey { key, path }),
            };
            if !found {
                matched = false;
                if !self.keeps_going() {
                    break;
                }
            }
        }
        Ok(matched)
    }

    fn visit_sequence(&mut self, container: &'a [V], contained: &'a [V]) -> Result<bool, ContainsError> {
        let mut matched = true;
        for (index, element) in contained.iter().enumerate() {
            self.path.push(index);
            let depth = self.path.steps().len();
            // An element holding an unsupported node can never match.
            let found = match first_unsupported(element, &mut self.path) {
                Some(construct) => {
                    let result = self.unsupported(construct);
                    self.path.truncate(depth);
                    result
                }
                None => self.find_match(container, element).map(|found| {
                    found || self.fail(|path| Mismatch::MissingElement { element, path })
                }),
            };
            self.path.pop();
            if !found? {
                matched = false;
                if !self.keeps_going() {
                    break;
                }
            }
        }
        Ok(matched)
    }

    /// Probes container elements until one contains `element`.
    fn find_match(&mut self, container: &'a [V], element: &'a V) -> Result<bool, ContainsError> {
        self.silent += 1;
        let mut result = Ok(false);
        for candidate in container {
            match self.visit(candidate, element) {
                Ok(false) => {}
                other => {
                    result = other;
                    break;
                }
            }
        }
        self.silent -= 1;
        result
    }

    fn unsupported(&mut self, construct: &'static str) -> Result<bool, ContainsError> {
        match self.options.unsupported {
            UnsupportedPolicy::Error => Err(ContainsError::Unsupported {
                construct,
                path: self.path.clone(),
            }),
            UnsupportedPolicy::Mismatch => {
                Ok(self.fail(|path| Mismatch::UnsupportedConstruct { construct, path }))
            }
        }
    }

    fn value_mismatch(&mut self, container: &'a V, contained: &'a V) -> bool {
        self.fail(|path| Mismatch::ValueMismatch {
            expected: contained,
            actual: container,
            path,
        })
    }

    /// Records a mismatch at the current path unless probing. Always `false`.
    fn fail(&mut self, mismatch: impl FnOnce(Path) -> Mismatch<'a, V>) -> bool {
        if self.silent == 0 {
            let mismatch = mismatch(self.path.clone());
            tracing::trace!(%mismatch, "mismatch");
            self.diagnostics.push(mismatch);
        }
        false
    }

    fn keeps_going(&self) -> bool {
        self.silent == 0 && self.options.mode == Mode::CollectAll
    }
}

/// Finds the first node outside the JSON model, depth first.
///
/// On a hit `path` is left pointing at that node; otherwise it is unchanged.
fn first_unsupported<V: JsonLike>(value: &V, path: &mut Path) -> Option<&'static str> {
    match value.node() {
        Node::Unsupported(construct) => Some(construct),
        Node::Sequence(items) => items.iter().enumerate().find_map(|(index, item)| {
            path.push(index);
            let found = first_unsupported(item, path);
            if found.is_none() {
                path.pop();
            }
            found
        }),
        Node::Mapping(mapping) => mapping.entries().find_map(|(key, item)| {
            path.push(key);
            let found = first_unsupported(item, path);
            if found.is_none() {
                path.pop();
            }
            found
        }),
        Node::Null | Node::Bool(_) | Node::Number(_) | Node::String(_) => None,
    }
}
