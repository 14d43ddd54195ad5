//! Script-Literal Encoder
//!
//! Encodes decoded nodes as Lua literal expressions: mappings and sequences
//! become table constructors, `null` becomes `nil`, strings are quoted.

use crate::error::FormatError;
use crate::output::node::{self, Node, Scalar};

const LUA_KEYWORDS: &[&str] = &[
    "and", "break", "do", "else", "elseif", "end", "false", "for", "function", "goto", "if",
    "in", "local", "nil", "not", "or", "repeat", "return", "then", "true", "until", "while",
];

/// Encode every top-level value of a document, joined by `", "` and
/// terminated with `";\n"`.
pub fn render_document(document: &str) -> Result<String, FormatError> {
    let nodes = node::decode(document)?;
    let encoded: Vec<String> = nodes.iter().map(encode).collect();
    Ok(format!("{};\n", encoded.join(", ")))
}

/// Encode a single node.
pub fn encode(node: &Node) -> String {
    match node {
        Node::Scalar(scalar) => encode_scalar(scalar),
        Node::Sequence(items) => {
            let parts: Vec<String> = items.iter().map(encode).collect();
            format!("{{{}}}", parts.join(", "))
        }
        Node::Mapping(pairs) => {
            let parts: Vec<String> = pairs
                .iter()
                .map(|(key, value)| format!("{} = {}", encode_key(key), encode(value)))
                .collect();
            format!("{{{}}}", parts.join(", "))
        }
    }
}

fn encode_key(key: &Scalar) -> String {
    match key {
        Scalar::Str(s) if is_identifier(s) => s.clone(),
        other => format!("[{}]", encode_scalar(other)),
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_') && !LUA_KEYWORDS.contains(&s)
}

fn encode_scalar(scalar: &Scalar) -> String {
    match scalar {
        Scalar::Null => "nil".to_string(),
        Scalar::Bool(b) => b.to_string(),
        Scalar::Int(i) => i.to_string(),
        Scalar::UInt(u) => u.to_string(),
        Scalar::Float(f) if f.is_nan() => "0/0".to_string(),
        Scalar::Float(f) if f.is_infinite() => {
            if *f > 0.0 { "1/0" } else { "-1/0" }.to_string()
        }
        Scalar::Float(f) => format!("{:?}", f),
        Scalar::Str(s) => quote(s),
    }
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_ascii_control() => out.push_str(&format!("\\{:03}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
