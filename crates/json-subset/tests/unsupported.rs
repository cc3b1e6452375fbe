//! Trees that carry constructs outside the JSON model.

use std::fmt;

use json_subset::{
    contains, Checker, ContainsError, JsonLike, JsonMapping, Mismatch, Node, Number, Options,
    Path, PathStep, Shape,
};

/// A document that may hold raw bytes next to JSON data.
#[derive(Debug, Clone, PartialEq)]
enum Doc {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<Doc>),
    Record(Fields),
    Binary(Vec<u8>),
}

#[derive(Debug, Clone, PartialEq, Default)]
struct Fields(Vec<(String, Doc)>);

impl JsonMapping for Fields {
    type Value = Doc;

    fn get(&self, key: &str) -> Option<&Doc> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    fn entries(&self) -> impl Iterator<Item = (&str, &Doc)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

impl JsonLike for Doc {
    type Mapping = Fields;

    fn node(&self) -> Node<'_, Self> {
        match self {
            Doc::Null => Node::Null,
            Doc::Bool(value) => Node::Bool(*value),
            Doc::Number(value) => Node::Number(Number::Float(*value)),
            Doc::Text(value) => Node::String(value),
            Doc::List(items) => Node::Sequence(items),
            Doc::Record(fields) => Node::Mapping(fields),
            Doc::Binary(_) => Node::Unsupported("binary"),
        }
    }
}

impl fmt::Display for Doc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Doc::Null => f.write_str("null"),
            Doc::Bool(value) => write!(f, "{value}"),
            Doc::Number(value) => write!(f, "{value}"),
            Doc::Text(value) => write!(f, "{value:?}"),
            Doc::List(items) => write!(f, "[{} items]", items.len()),
            Doc::Record(fields) => write!(f, "{{{} fields}}", fields.len()),
            Doc::Binary(bytes) => write!(f, "<{} bytes>", bytes.len()),
        }
    }
}

fn record(entries: Vec<(&str, Doc)>) -> Doc {
    Doc::Record(Fields(
        entries
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect(),
    ))
}

fn text(value: &str) -> Doc {
    Doc::Text(value.to_string())
}

fn path(steps: &[&str]) -> Path {
    steps.iter().copied().collect()
}

#[test]
fn test_custom_tree_containment() {
    let container = record(vec![
        ("name", text("widget")),
        ("tags", Doc::List(vec![text("a"), text("b")])),
        ("ok", Doc::Bool(true)),
    ]);
    let contained = record(vec![("tags", Doc::List(vec![text("b")]))]);
    assert!(contains(&container, &contained));
    assert!(!contains(&container, &record(vec![("missing", Doc::Null)])));
}

#[test]
fn test_unsupported_contained_node_is_a_mismatch_by_default() {
    let container = record(vec![("blob", Doc::Binary(vec![1, 2]))]);
    let contained = record(vec![("blob", Doc::Binary(vec![1, 2]))]);

    assert!(!contains(&container, &contained));
    let outcome = Checker::default().check(&container, &contained).unwrap();
    assert_eq!(
        outcome.diagnostics(),
        &[Mismatch::UnsupportedConstruct {
            construct: "binary",
            path: path(&["blob"]),
        }]
    );
}

#[test]
fn test_strict_policy_turns_unsupported_into_error() {
    let container = record(vec![("blob", Doc::Binary(vec![]))]);
    let contained = record(vec![("blob", Doc::Binary(vec![]))]);

    let err = Checker::new(Options::new().strict())
        .check(&container, &contained)
        .unwrap_err();
    assert_eq!(
        err,
        ContainsError::Unsupported {
            construct: "binary",
            path: path(&["blob"]),
        }
    );
    assert_eq!(err.to_string(), "unsupported construct `binary` at /blob");
}

#[test]
fn test_unsupported_sequence_element_is_reported_as_such() {
    let container = Doc::List(vec![Doc::Binary(vec![0])]);
    let contained = Doc::List(vec![Doc::Binary(vec![0])]);

    let outcome = Checker::default().check(&container, &contained).unwrap();
    assert_eq!(
        outcome.diagnostics(),
        &[Mismatch::UnsupportedConstruct {
            construct: "binary",
            path: [0_usize].into_iter().collect(),
        }]
    );
}

#[test]
fn test_unsupported_node_nested_in_sequence_element_is_reported_at_its_path() {
    let container = Doc::List(vec![record(vec![("data", Doc::Binary(vec![1]))])]);
    let contained = Doc::List(vec![record(vec![("data", Doc::Binary(vec![1]))])]);

    let outcome = Checker::default().check(&container, &contained).unwrap();
    assert_eq!(
        outcome.diagnostics(),
        &[Mismatch::UnsupportedConstruct {
            construct: "binary",
            path: Path::from_iter([PathStep::Index(0), PathStep::from("data")]),
        }]
    );
    assert!(!contains(&container, &contained));
}

#[test]
fn test_strict_policy_does_not_depend_on_the_container() {
    let contained = Doc::List(vec![record(vec![
        ("a", Doc::Number(1.0)),
        ("b", Doc::Binary(vec![])),
    ])]);
    let matching = Doc::List(vec![record(vec![
        ("a", Doc::Number(1.0)),
        ("b", Doc::Number(0.0)),
    ])]);
    let mismatching = Doc::List(vec![record(vec![
        ("a", Doc::Number(2.0)),
        ("b", Doc::Number(0.0)),
    ])]);

    let checker = Checker::new(Options::new().strict());
    for container in [&matching, &mismatching, &Doc::Null] {
        let err = checker.check(container, &contained).unwrap_err();
        assert_eq!(
            err,
            ContainsError::Unsupported {
                construct: "binary",
                path: Path::from_iter([PathStep::Index(0), PathStep::from("b")]),
            }
        );
    }
}

#[test]
fn test_strict_policy_applies_inside_sequence_elements() {
    let container = Doc::List(vec![record(vec![("data", Doc::Binary(vec![]))])]);
    let contained = Doc::List(vec![record(vec![("data", Doc::Binary(vec![]))])]);

    let err = Checker::new(Options::new().strict())
        .check(&container, &contained)
        .unwrap_err();
    let ContainsError::Unsupported { path, .. } = err;
    assert_eq!(path.to_pointer(), "/0/data");
}

#[test]
fn test_unsupported_container_node_is_a_type_mismatch() {
    let container = record(vec![("blob", Doc::Binary(vec![9]))]);
    let contained = record(vec![("blob", text("AAk="))]);

    let outcome = Checker::new(Options::new().strict())
        .check(&container, &contained)
        .unwrap();
    assert_eq!(
        outcome.diagnostics(),
        &[Mismatch::TypeMismatch {
            expected: Shape::String,
            actual: Shape::Other("binary"),
            path: path(&["blob"]),
        }]
    );
    assert_eq!(
        outcome.report(),
        "Problems:\n/blob: expected a string, found a binary\n"
    );
}

#[test]
fn test_collect_all_continues_past_unsupported() {
    let container = record(vec![("a", Doc::Number(1.0)), ("b", Doc::Number(2.0))]);
    let contained = record(vec![("a", Doc::Binary(vec![])), ("b", Doc::Number(3.0))]);

    let outcome = Checker::new(Options::new().collect_all())
        .check(&container, &contained)
        .unwrap();
    let kinds: Vec<&str> = outcome.diagnostics().iter().map(Mismatch::kind).collect();
    assert_eq!(kinds, vec!["unsupported_construct", "value_mismatch"]);
}
