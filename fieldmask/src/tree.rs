//! Generic tree view of a serialized value.
//!
//! Masking never inspects typed values directly. Inputs are first converted
//! into a [`Node`] tree (see [`crate::ToTree`]) and the masker produces a new
//! tree of the same kind.

use std::{borrow::Cow, collections::BTreeMap, fmt};

use serde::{Serialize, Serializer};
use serde_json::{Number, Value as JsonValue};

// =============================================================================
// Node - Object / Array / Scalar
// =============================================================================

/// A node of a generic value tree.
///
/// Object keys are kept in sorted order, which is also the order used when the
/// tree is rendered as JSON.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Object(BTreeMap<String, Node>),
    Array(Vec<Node>),
    Scalar(Scalar),
}

/// A leaf value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

/// The kind of a node, used in error reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Object,
    Array,
    String,
    Number,
    Bool,
    Null,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NodeKind::Object => "object",
            NodeKind::Array => "array",
            NodeKind::String => "string",
            NodeKind::Number => "number",
            NodeKind::Bool => "bool",
            NodeKind::Null => "null",
        })
    }
}

/// The structure of a tree with every leaf value erased.
///
/// Two trees have the same shape when they nest objects and arrays the same
/// way under the same keys, whatever their scalar values are.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Shape {
    Leaf,
    Object(BTreeMap<String, Shape>),
    Array(Vec<Shape>),
}

impl Node {
    /// Shorthand for `Node::Scalar(Scalar::Null)`.
    pub const NULL: Node = Node::Scalar(Scalar::Null);

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Object(_) => NodeKind::Object,
            Node::Array(_) => NodeKind::Array,
            Node::Scalar(Scalar::String(_)) => NodeKind::String,
            Node::Scalar(Scalar::Number(_)) => NodeKind::Number,
            Node::Scalar(Scalar::Bool(_)) => NodeKind::Bool,
            Node::Scalar(Scalar::Null) => NodeKind::Null,
        }
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, Node::Scalar(_))
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, Node>> {
        match self {
            Node::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Node]> {
        match self {
            Node::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::Scalar(Scalar::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Looks up a field of an object node.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Returns the shape of this tree.
    pub fn shape(&self) -> Shape {
        match self {
            Node::Object(map) => Shape::Object(
                map.iter()
                    .map(|(key, child)| (key.clone(), child.shape()))
                    .collect(),
            ),
            Node::Array(items) => Shape::Array(items.iter().map(Node::shape).collect()),
            Node::Scalar(_) => Shape::Leaf,
        }
    }

    /// Returns the text form handed to custom mask handlers.
    ///
    /// Strings are returned verbatim, numbers and booleans in their JSON
    /// notation, `null` as the empty string, and objects and arrays as compact
    /// JSON.
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            Node::Scalar(scalar) => scalar.to_text(),
            Node::Object(_) | Node::Array(_) => Cow::Owned(self.to_string()),
        }
    }
}

impl Scalar {
    fn to_text(&self) -> Cow<'_, str> {
        match self {
            Scalar::Null => Cow::Borrowed(""),
            Scalar::Bool(true) => Cow::Borrowed("true"),
            Scalar::Bool(false) => Cow::Borrowed("false"),
            Scalar::Number(n) => Cow::Owned(n.to_string()),
            Scalar::String(s) => Cow::Borrowed(s),
        }
    }
}

/// Renders the node as JSON text; `{:#}` pretty-prints.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = if f.alternate() {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
        .map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

// =============================================================================
// Serialization
// =============================================================================

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Object(map) => map.serialize(serializer),
            Node::Array(items) => items.serialize(serializer),
            Node::Scalar(scalar) => scalar.serialize(serializer),
        }
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scalar::Null => serializer.serialize_unit(),
            Scalar::Bool(b) => serializer.serialize_bool(*b),
            Scalar::Number(n) => n.serialize(serializer),
            Scalar::String(s) => serializer.serialize_str(s),
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<JsonValue> for Node {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Object(map) => Node::Object(
                map.into_iter()
                    .map(|(key, child)| (key, Node::from(child)))
                    .collect(),
            ),
            JsonValue::Array(items) => Node::Array(items.into_iter().map(Node::from).collect()),
            JsonValue::String(s) => Node::Scalar(Scalar::String(s)),
            JsonValue::Number(n) => Node::Scalar(Scalar::Number(n)),
            JsonValue::Bool(b) => Node::Scalar(Scalar::Bool(b)),
            JsonValue::Null => Node::NULL,
        }
    }
}

impl From<Node> for JsonValue {
    fn from(node: Node) -> Self {
        match node {
            Node::Object(map) => JsonValue::Object(
                map.into_iter()
                    .map(|(key, child)| (key, JsonValue::from(child)))
                    .collect(),
            ),
            Node::Array(items) => {
                JsonValue::Array(items.into_iter().map(JsonValue::from).collect())
            }
            Node::Scalar(Scalar::String(s)) => JsonValue::String(s),
            Node::Scalar(Scalar::Number(n)) => JsonValue::Number(n),
            Node::Scalar(Scalar::Bool(b)) => JsonValue::Bool(b),
            Node::Scalar(Scalar::Null) => JsonValue::Null,
        }
    }
}

impl From<BTreeMap<String, Node>> for Node {
    fn from(map: BTreeMap<String, Node>) -> Self {
        Node::Object(map)
    }
}

impl From<Vec<Node>> for Node {
    fn from(items: Vec<Node>) -> Self {
        Node::Array(items)
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::Scalar(Scalar::String(s))
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::Scalar(Scalar::String(s.to_owned()))
    }
}

impl From<bool> for Node {
    fn from(b: bool) -> Self {
        Node::Scalar(Scalar::Bool(b))
    }
}

impl From<i64> for Node {
    fn from(n: i64) -> Self {
        Node::Scalar(Scalar::Number(n.into()))
    }
}

impl From<u64> for Node {
    fn from(n: u64) -> Self {
        Node::Scalar(Scalar::Number(n.into()))
    }
}

/// Non-finite floats have no JSON representation and become `null`.
impl From<f64> for Node {
    fn from(n: f64) -> Self {
        Number::from_f64(n).map_or(Node::NULL, |n| Node::Scalar(Scalar::Number(n)))
    }
}
