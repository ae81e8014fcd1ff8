//! YAML values with source position tracking.

use crate::Span;
use yaml_rust2::Yaml;
use yaml_rust2::yaml::Hash;

/// A YAML value with a source position and position-tracked children.
///
/// Stores an owned [`Yaml`] value alongside a parallel children structure so
/// that every node in the tree knows where it came from. Mapping entries are
/// kept in document order, which makes the tree suitable for discriminated
/// decoding where "first key wins" semantics matter.
#[derive(Debug, Clone)]
pub struct YamlNode {
    /// The complete yaml-rust2 value for this node.
    value: Yaml,

    /// Position of this node in the source text.
    span: Span,

    /// Position-tracked children, mirroring the shape of `value`.
    children: Children,
}

#[derive(Debug, Clone)]
enum Children {
    /// Scalars and null have no children.
    None,

    /// Sequence items in document order.
    Sequence(Vec<YamlNode>),

    /// Mapping entries in document order.
    Mapping(Vec<MapEntry>),
}

/// A key/value pair in a YAML mapping, both sides position-tracked.
#[derive(Debug, Clone)]
pub struct MapEntry {
    pub key: YamlNode,
    pub value: YamlNode,
}

impl MapEntry {
    pub fn new(key: YamlNode, value: YamlNode) -> Self {
        Self { key, value }
    }

    /// The entry's key as a string, if it is a string scalar.
    pub fn key_str(&self) -> Option<&str> {
        self.key.as_str()
    }
}

impl YamlNode {
    /// Create a scalar (or null) node.
    pub fn scalar(value: Yaml, span: Span) -> Self {
        Self {
            value,
            span,
            children: Children::None,
        }
    }

    /// Create a sequence node from its position-tracked items.
    pub fn sequence(items: Vec<YamlNode>, span: Span) -> Self {
        let value = Yaml::Array(items.iter().map(|n| n.value.clone()).collect());
        Self {
            value,
            span,
            children: Children::Sequence(items),
        }
    }

    /// Create a mapping node from its position-tracked entries.
    ///
    /// The raw `Yaml::Hash` is rebuilt from the entries, so this also serves
    /// to re-assemble a mapping after splicing entries out (e.g. removing a
    /// discriminator key while preserving the order of the rest).
    pub fn mapping_from_entries(entries: Vec<MapEntry>, span: Span) -> Self {
        let hash: Hash = entries
            .iter()
            .map(|e| (e.key.value.clone(), e.value.value.clone()))
            .collect();
        Self {
            value: Yaml::Hash(hash),
            span,
            children: Children::Mapping(entries),
        }
    }

    /// The raw yaml-rust2 value of this node.
    pub fn value(&self) -> &Yaml {
        &self.value
    }

    /// The source position of this node.
    pub fn span(&self) -> &Span {
        &self.span
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self.children, Children::None)
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self.children, Children::Sequence(_))
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self.children, Children::Mapping(_))
    }

    /// Sequence items, if this node is a sequence.
    pub fn as_items(&self) -> Option<&[YamlNode]> {
        match &self.children {
            Children::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Mapping entries in document order, if this node is a mapping.
    pub fn as_entries(&self) -> Option<&[MapEntry]> {
        match &self.children {
            Children::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    /// Look up a mapping value by string key.
    ///
    /// Returns the first entry whose key is a string scalar equal to `key`,
    /// or `None` if this node is not a mapping or the key is absent.
    pub fn get(&self, key: &str) -> Option<&YamlNode> {
        match &self.children {
            Children::Mapping(entries) => entries
                .iter()
                .find(|e| e.key_str() == Some(key))
                .map(|e| &e.value),
            _ => None,
        }
    }

    /// This node's value as a string, if it is a string scalar.
    pub fn as_str(&self) -> Option<&str> {
        self.value.as_str()
    }

    /// Render a scalar node as a string.
    ///
    /// String scalars are returned as-is; numeric and boolean scalars are
    /// rendered in their source form. Returns `None` for null values and
    /// for non-scalar nodes.
    pub fn scalar_string(&self) -> Option<String> {
        match &self.value {
            Yaml::String(s) => Some(s.clone()),
            Yaml::Integer(i) => Some(i.to_string()),
            Yaml::Real(r) => Some(r.clone()),
            Yaml::Boolean(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Number of children (sequence length or mapping entry count).
    pub fn len(&self) -> usize {
        match &self.children {
            Children::None => 0,
            Children::Sequence(items) => items.len(),
            Children::Mapping(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
