// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Document model that keeps every scalar exactly as it was written.
//!
//! Scalars carry their source text and quoting style instead of a resolved
//! value, so `0644`, `on` and `"on"` all survive a decode and encode cycle
//! unchanged. Typing only happens on demand through [`Scalar::kind`], using
//! the YAML 1.1 rules Kubernetes tooling applies to plain scalars.

/// How a scalar was written in the source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarStyle {
    Plain,
    SingleQuoted,
    DoubleQuoted,
    /// Block scalar; folded blocks are kept as literal ones
    Literal,
}

/// The type a scalar resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Null,
    Bool,
    Int,
    Float,
    Str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scalar {
    value: String,
    style: ScalarStyle,
    tag: Option<String>,
}

impl Scalar {
    pub fn new(value: impl Into<String>, style: ScalarStyle, tag: Option<String>) -> Self {
        Self {
            value: value.into(),
            style,
            tag,
        }
    }

    /// A plain scalar written verbatim, e.g. `true` or `15012`.
    pub fn plain(value: impl Into<String>) -> Self {
        Self::new(value, ScalarStyle::Plain, None)
    }

    /// A string value. It is only written plain when it cannot be read back
    /// as anything else; `on`, `0644` or `1.24` get double quotes.
    pub fn string(value: impl Into<String>) -> Self {
        let value = value.into();
        let style = if is_plain_safe(&value) {
            ScalarStyle::Plain
        } else {
            ScalarStyle::DoubleQuoted
        };
        Self::new(value, style, None)
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn style(&self) -> ScalarStyle {
        self.style
    }

    /// Tag in shorthand form, e.g. `!!str`
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn kind(&self) -> ScalarKind {
        match self.tag.as_deref() {
            Some("!!str") => ScalarKind::Str,
            Some("!!int") => ScalarKind::Int,
            Some("!!float") => ScalarKind::Float,
            Some("!!bool") => ScalarKind::Bool,
            Some("!!null") => ScalarKind::Null,
            Some(_) => ScalarKind::Str,
            None if self.style == ScalarStyle::Plain => resolve_plain(&self.value),
            None => ScalarKind::Str,
        }
    }

    /// The string value, if this scalar is a string.
    pub fn as_str(&self) -> Option<&str> {
        (self.kind() == ScalarKind::Str).then_some(self.value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Scalar(Scalar),
    Sequence(Vec<Node>),
    Mapping(Mapping),
}

impl Node {
    pub fn null() -> Self {
        Node::Scalar(Scalar::plain("null"))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Node::Scalar(Scalar::string(value))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Node::Scalar(s) if s.kind() == ScalarKind::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::Scalar(s) => s.as_str(),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Node::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Node]> {
        match self {
            Node::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Node::Mapping(m) => Some(m),
            _ => None,
        }
    }

    /// Name of the node's type, for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Node::Scalar(s) => match s.kind() {
                ScalarKind::Null => "null",
                ScalarKind::Bool => "bool",
                ScalarKind::Int => "int",
                ScalarKind::Float => "float",
                ScalarKind::Str => "string",
            },
            Node::Sequence(_) => "sequence",
            Node::Mapping(_) => "mapping",
        }
    }
}

impl From<serde_json::Value> for Node {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Node::null(),
            serde_json::Value::Bool(b) => Node::Scalar(Scalar::plain(b.to_string())),
            serde_json::Value::Number(n) => Node::Scalar(Scalar::plain(n.to_string())),
            serde_json::Value::String(s) => Node::string(s),
            serde_json::Value::Array(items) => Node::Sequence(items.into_iter().map(Node::from).collect()),
            serde_json::Value::Object(fields) => Node::Mapping(
                fields
                    .into_iter()
                    .map(|(key, value)| (Node::string(key), Node::from(value)))
                    .collect(),
            ),
        }
    }
}

/// A mapping that keeps its entries in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mapping {
    entries: Vec<(Node, Node)>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.position(key).map(|i| &self.entries[i].1)
    }

    /// Replace the value of `key` in place, or append it at the end.
    pub fn insert(&mut self, key: &str, value: Node) {
        match self.position(key) {
            Some(i) => self.entries[i].1 = value,
            None => self.entries.push((Node::string(key), value)),
        }
    }

    pub fn get_or_insert_with<F>(&mut self, key: &str, default: F) -> &mut Node
    where
        F: FnOnce() -> Node,
    {
        let index = match self.position(key) {
            Some(i) => i,
            None => {
                self.entries.push((Node::string(key), default()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[index].1
    }

    /// Append an entry as decoded, without looking for an existing key.
    pub fn push(&mut self, key: Node, value: Node) {
        self.entries.push((key, value));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Node, &Node)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &Node> {
        self.entries.iter().map(|(k, _)| k)
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k.as_str() == Some(key))
    }
}

impl FromIterator<(Node, Node)> for Mapping {
    fn from_iter<T: IntoIterator<Item = (Node, Node)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Resolve an untagged plain scalar the way YAML 1.1 does. The 1.2 spellings
/// (`0o17`, `1e3`) are recognised as well, so quoting decisions hold for
/// readers of either version.
pub fn resolve_plain(text: &str) -> ScalarKind {
    match text {
        "" | "~" | "null" | "Null" | "NULL" => ScalarKind::Null,
        "y" | "Y" | "yes" | "Yes" | "YES" | "n" | "N" | "no" | "No" | "NO" | "true" | "True"
        | "TRUE" | "false" | "False" | "FALSE" | "on" | "On" | "ON" | "off" | "Off" | "OFF" => {
            ScalarKind::Bool
        }
        _ if is_int(text) => ScalarKind::Int,
        _ if is_float(text) => ScalarKind::Float,
        _ => ScalarKind::Str,
    }
}

fn is_int(text: &str) -> bool {
    let digits = text.strip_prefix(['-', '+']).unwrap_or(text);
    if let Some(bin) = digits.strip_prefix("0b") {
        return is_digits(bin, 2);
    }
    if let Some(hex) = digits.strip_prefix("0x") {
        return is_digits(hex, 16);
    }
    if let Some(oct) = digits.strip_prefix("0o") {
        return is_digits(oct, 8);
    }
    // base 60, e.g. 1:30
    if let Some((head, rest)) = digits.split_once(':') {
        return is_digits(head, 10)
            && rest
                .split(':')
                .all(|part| (1..=2).contains(&part.len()) && is_digits(part, 10));
    }
    is_digits(digits, 10)
}

fn is_float(text: &str) -> bool {
    let body = text.strip_prefix(['-', '+']).unwrap_or(text);
    if matches!(body, ".inf" | ".Inf" | ".INF") || matches!(text, ".nan" | ".NaN" | ".NAN") {
        return true;
    }

    let (mantissa, exponent) = match body.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => (mantissa, Some(exponent)),
        None => (body, None),
    };
    if let Some(exponent) = exponent {
        let exponent = exponent.strip_prefix(['-', '+']).unwrap_or(exponent);
        if exponent.is_empty() || !exponent.chars().all(|c| c.is_ascii_digit()) {
            return false;
        }
    }

    let decimal = |s: &str| s.chars().all(|c| c.is_ascii_digit() || c == '_');
    let (whole, fraction) = match mantissa.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None if exponent.is_some() => (mantissa, None),
        None => return false,
    };
    decimal(whole)
        && fraction.map_or(true, decimal)
        && mantissa.chars().any(|c| c.is_ascii_digit())
}

fn is_digits(text: &str, radix: u32) -> bool {
    text.chars().any(|c| c.is_digit(radix)) && text.chars().all(|c| c == '_' || c.is_digit(radix))
}

/// Whether `value` can be written as a plain scalar and still read back as
/// the same string.
pub fn is_plain_safe(value: &str) -> bool {
    const INDICATORS: &[char] = &[
        '-', '?', ':', ',', '[', ']', '{', '}', '#', '&', '*', '!', '|', '>', '\'', '"', '%', '@', '`',
    ];

    resolve_plain(value) == ScalarKind::Str
        && value != "<<"
        && value != "="
        && !value.starts_with(INDICATORS)
        && !value.starts_with(char::is_whitespace)
        && !value.ends_with(char::is_whitespace)
        && !value.ends_with(':')
        && !value.contains(": ")
        && !value.contains(" #")
        && !value.chars().any(char::is_control)
}
