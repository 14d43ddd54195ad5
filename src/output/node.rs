//! Decoded Node Tree
//!
//! Structured documents are decoded with `serde_yaml` into a closed variant
//! tree. Classification into a `Shape` is structural: a node is a scalar, a
//! sequence, or a mapping regardless of any declared YAML tag.

use crate::error::FormatError;
use serde::Deserialize;
use serde_yaml::Value;
use std::cmp::Ordering;

/// Scalar value
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
}

impl Scalar {
    /// Natural text form: strings verbatim, null as `nil`.
    pub fn to_text(&self) -> String {
        match self {
            Scalar::Null => "nil".to_string(),
            Scalar::Bool(b) => b.to_string(),
            Scalar::Int(i) => i.to_string(),
            Scalar::UInt(u) => u.to_string(),
            Scalar::Float(f) => format_float(*f),
            Scalar::Str(s) => s.clone(),
        }
    }

    fn integer_value(&self) -> Option<i128> {
        match self {
            Scalar::Int(i) => Some(*i as i128),
            Scalar::UInt(u) => Some(*u as i128),
            _ => None,
        }
    }

    /// Key ordering: integers first in numeric order, then everything else by text.
    pub fn key_cmp(&self, other: &Scalar) -> Ordering {
        match (self.integer_value(), other.integer_value()) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.to_text().cmp(&other.to_text()),
        }
    }
}

pub(crate) fn format_float(f: f64) -> String {
    if f.is_nan() {
        "nan".to_string()
    } else if f.is_infinite() {
        if f > 0.0 { "inf" } else { "-inf" }.to_string()
    } else if f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{:.1}", f)
    } else {
        f.to_string()
    }
}

/// Structural shape of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Scalar,
    Sequence,
    Mapping,
}

/// Decoded value
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Scalar(Scalar),
    Sequence(Vec<Node>),
    /// Key/value pairs in document order
    Mapping(Vec<(Scalar, Node)>),
}

impl Node {
    pub fn shape(&self) -> Shape {
        match self {
            Node::Scalar(_) => Shape::Scalar,
            Node::Sequence(_) => Shape::Sequence,
            Node::Mapping(_) => Shape::Mapping,
        }
    }

    pub fn string(s: impl Into<String>) -> Self {
        Node::Scalar(Scalar::Str(s.into()))
    }

    /// Sorted key set of a mapping; empty for other shapes.
    pub fn sorted_keys(&self) -> Vec<Scalar> {
        match self {
            Node::Mapping(pairs) => {
                let mut keys: Vec<Scalar> = pairs.iter().map(|(k, _)| k.clone()).collect();
                keys.sort_by(|a, b| a.key_cmp(b));
                keys
            }
            _ => Vec::new(),
        }
    }

    /// Value stored under `key` in a mapping.
    pub fn get(&self, key: &Scalar) -> Option<&Node> {
        match self {
            Node::Mapping(pairs) => pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Compact JSON-like text used for collection cells.
    pub fn to_compact_json(&self) -> Result<String, FormatError> {
        Ok(serde_json::to_string(&self.to_json())?)
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Node::Scalar(s) => scalar_to_json(s),
            Node::Sequence(items) => {
                serde_json::Value::Array(items.iter().map(Node::to_json).collect())
            }
            Node::Mapping(pairs) => {
                let mut map = serde_json::Map::new();
                for (k, v) in pairs {
                    map.insert(k.to_text(), v.to_json());
                }
                serde_json::Value::Object(map)
            }
        }
    }
}

fn scalar_to_json(scalar: &Scalar) -> serde_json::Value {
    match scalar {
        Scalar::Null => serde_json::Value::Null,
        Scalar::Bool(b) => serde_json::Value::Bool(*b),
        Scalar::Int(i) => serde_json::Value::from(*i),
        Scalar::UInt(u) => serde_json::Value::from(*u),
        Scalar::Float(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or_else(|| serde_json::Value::String(format_float(*f))),
        Scalar::Str(s) => serde_json::Value::String(s.clone()),
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Node::Scalar(Scalar::Null),
            Value::Bool(b) => Node::Scalar(Scalar::Bool(b)),
            Value::Number(n) => Node::Scalar(number_scalar(&n)),
            Value::String(s) => Node::Scalar(Scalar::Str(s)),
            Value::Sequence(items) => Node::Sequence(items.into_iter().map(Node::from).collect()),
            Value::Mapping(map) => Node::Mapping(
                map.into_iter()
                    .map(|(k, v)| (key_scalar(k), Node::from(v)))
                    .collect(),
            ),
            Value::Tagged(tagged) => Node::from(tagged.value),
        }
    }
}

fn number_scalar(n: &serde_yaml::Number) -> Scalar {
    if let Some(i) = n.as_i64() {
        Scalar::Int(i)
    } else if let Some(u) = n.as_u64() {
        Scalar::UInt(u)
    } else {
        Scalar::Float(n.as_f64().unwrap_or(f64::NAN))
    }
}

fn key_scalar(key: Value) -> Scalar {
    match Node::from(key) {
        Node::Scalar(s) => s,
        collection => Scalar::Str(
            collection
                .to_compact_json()
                .unwrap_or_else(|_| format!("{:?}", collection)),
        ),
    }
}

/// True for the canonical empty result: no content besides `---`/`...` markers.
pub fn is_empty_document(document: &str) -> bool {
    document
        .lines()
        .map(str::trim)
        .all(|line| line.is_empty() || line == "---" || line == "...")
}

/// Parse every document of a YAML stream into raw values.
pub fn parse_documents(document: &str) -> Result<Vec<Value>, FormatError> {
    let mut values = Vec::new();
    for de in serde_yaml::Deserializer::from_str(document) {
        values.push(Value::deserialize(de)?);
    }
    Ok(values)
}

/// Top-level nodes of a parsed stream.
///
/// A sequence root contributes its elements; any other root contributes itself.
pub fn top_level_nodes(values: Vec<Value>) -> Vec<Node> {
    let mut nodes = Vec::new();
    for value in values {
        match Node::from(value) {
            Node::Sequence(items) => nodes.extend(items),
            other => nodes.push(other),
        }
    }
    nodes
}

/// Decode a structured document into its top-level nodes.
///
/// The canonical empty result decodes to no nodes.
pub fn decode(document: &str) -> Result<Vec<Node>, FormatError> {
    if is_empty_document(document) {
        return Ok(Vec::new());
    }
    Ok(top_level_nodes(parse_documents(document)?))
}
