//! The value model the checker walks.
//!
//! The checker never looks at a concrete tree type. It asks each node for a
//! [`Node`] view, a tagged union over the JSON shapes, and matches on that.
//! [`serde_json::Value`] implements [`JsonLike`] out of the box; other trees
//! (for example ones that carry raw binary next to JSON data) can implement it
//! too and report anything outside the JSON model as [`Node::Unsupported`].

use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// A tree that can be viewed node-by-node as JSON.
pub trait JsonLike: fmt::Display + Sized {
    /// The mapping type found under [`Node::Mapping`].
    type Mapping: JsonMapping<Value = Self>;

    /// View this node as one of the JSON shapes.
    fn node(&self) -> Node<'_, Self>;

    /// Structural kind of this node.
    fn shape(&self) -> Shape {
        self.node().shape()
    }
}

/// A string-keyed mapping with unique keys.
pub trait JsonMapping {
    type Value;

    /// Look up the value stored under `key`.
    fn get(&self, key: &str) -> Option<&Self::Value>;

    /// Iterate over entries in the mapping's own order.
    fn entries(&self) -> impl Iterator<Item = (&str, &Self::Value)>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A borrowed view of one node.
pub enum Node<'a, V: JsonLike> {
    Null,
    Bool(bool),
    Number(Number),
    String(&'a str),
    Sequence(&'a [V]),
    Mapping(&'a V::Mapping),
    /// A construct outside the JSON model, named for diagnostics.
    Unsupported(&'static str),
}

impl<V: JsonLike> Node<'_, V> {
    pub fn shape(&self) -> Shape {
        match self {
            Node::Null => Shape::Null,
            Node::Bool(_) => Shape::Bool,
            Node::Number(_) => Shape::Number,
            Node::String(_) => Shape::String,
            Node::Sequence(_) => Shape::Sequence,
            Node::Mapping(_) => Shape::Mapping,
            Node::Unsupported(name) => Shape::Other(name),
        }
    }
}

/// Structural kind of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Null,
    Bool,
    Number,
    String,
    Sequence,
    Mapping,
    /// Anything outside the JSON model.
    Other(&'static str),
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Null => f.write_str("null"),
            Shape::Bool => f.write_str("boolean"),
            Shape::Number => f.write_str("number"),
            Shape::String => f.write_str("string"),
            Shape::Sequence => f.write_str("sequence"),
            Shape::Mapping => f.write_str("mapping"),
            Shape::Other(name) => f.write_str(name),
        }
    }
}

impl Serialize for Shape {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A numeric leaf.
///
/// Integers compare by mathematical value regardless of sign variant. An
/// integer equals a float only when the float is finite, integral, and denotes
/// exactly the same integer, so `1` equals `1.0` but never `1.5`. Floats
/// compare with `==`; there is no tolerance.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    PositiveInteger(u64),
    NegativeInteger(i64),
    Float(f64),
}

impl Number {
    fn as_integer(self) -> Option<i128> {
        match self {
            Number::PositiveInteger(value) => Some(i128::from(value)),
            Number::NegativeInteger(value) => Some(i128::from(value)),
            Number::Float(_) => None,
        }
    }
}

fn float_equals_integer(float: f64, integer: i128) -> bool {
    if !float.is_finite() || float.fract() != 0.0 {
        return false;
    }
    // Integral floats within i128 range convert exactly; out-of-range ones
    // saturate and can no longer equal a 64-bit integer.
    #[allow(clippy::cast_possible_truncation)]
    let truncated = float as i128;
    truncated == integer
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (*self, *other) {
            (Number::Float(left), Number::Float(right)) => left == right,
            (Number::Float(float), integer) | (integer, Number::Float(float)) => integer
                .as_integer()
                .is_some_and(|integer| float_equals_integer(float, integer)),
            (left, right) => left.as_integer() == right.as_integer(),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::PositiveInteger(value) => write!(f, "{value}"),
            Number::NegativeInteger(value) => write!(f, "{value}"),
            Number::Float(value) => write!(f, "{value}"),
        }
    }
}

impl From<&serde_json::Number> for Number {
    fn from(number: &serde_json::Number) -> Self {
        if let Some(value) = number.as_u64() {
            Number::PositiveInteger(value)
        } else if let Some(value) = number.as_i64() {
            Number::NegativeInteger(value)
        } else {
            // Only unrepresentable with `arbitrary_precision`; NaN keeps such
            // values from ever comparing equal.
            Number::Float(number.as_f64().unwrap_or(f64::NAN))
        }
    }
}

impl JsonLike for Value {
    type Mapping = Map<String, Value>;

    fn node(&self) -> Node<'_, Self> {
        match self {
            Value::Null => Node::Null,
            Value::Bool(value) => Node::Bool(*value),
            Value::Number(number) => Node::Number(Number::from(number)),
            Value::String(value) => Node::String(value),
            Value::Array(items) => Node::Sequence(items),
            Value::Object(map) => Node::Mapping(map),
        }
    }
}

impl JsonMapping for Map<String, Value> {
    type Value = Value;

    fn get(&self, key: &str) -> Option<&Value> {
        Map::get(self, key)
    }

    fn entries(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.iter().map(|(key, value)| (key.as_str(), value))
    }

    fn len(&self) -> usize {
        Map::len(self)
    }
}
