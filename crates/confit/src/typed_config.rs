//! Discriminated config decoding.
//!
//! A typed config is a mapping carrying an `@type` discriminator plus the
//! factory-specific fields. Decoding extracts the tag and rebuilds the body
//! without the discriminator entry, preserving the order of the remaining
//! fields and the node's source position.

use crate::error::{Error, Result};
use confit_yaml::{Span, YamlNode};
use std::fmt;

/// The key that selects which registered factory a document invokes.
pub const DISCRIMINATOR_KEY: &str = "@type";

/// A decoded discriminated config.
///
/// Holds the extracted type tag, the body mapping with the discriminator
/// spliced out, and the source position of the original node. The optional
/// `name` is a diagnostic label only; it has no resolution semantics.
#[derive(Debug, Clone)]
pub struct TypedConfig {
    name: Option<String>,
    type_tag: String,
    body: YamlNode,
    span: Span,
}

impl TypedConfig {
    /// Parse a top-level document and decode its typed config.
    ///
    /// Convenience for [`parse`](confit_yaml::parse) followed by
    /// [`TypedConfig::from_yaml`].
    pub fn parse(input: &str) -> Result<Self> {
        let doc = confit_yaml::parse(input)?;
        Self::from_yaml(&doc)
    }

    /// Decode the top-level `{name, typed_config}` document shape.
    ///
    /// `name` is optional; a missing `typed_config` entry is an error.
    pub fn from_yaml(doc: &YamlNode) -> Result<Self> {
        let line = doc.span().line;
        if !doc.is_mapping() {
            return Err(Error::NotAMapping { line });
        }

        let name = doc
            .get("name")
            .and_then(YamlNode::as_str)
            .map(str::to_owned);

        let node = doc
            .get("typed_config")
            .ok_or(Error::TypedConfigMissing { line })?;

        let mut config = Self::from_node(node)?;
        config.name = name;
        Ok(config)
    }

    /// Decode a bare discriminated mapping.
    ///
    /// This is the form factories use for nested configs embedded in their
    /// own body. Entries are scanned in document order for the `@type` key;
    /// the first match wins and is spliced out of the body.
    pub fn from_node(node: &YamlNode) -> Result<Self> {
        let line = node.span().line;
        let entries = node.as_entries().ok_or(Error::NotAMapping { line })?;

        let position = entries
            .iter()
            .position(|e| e.key_str() == Some(DISCRIMINATOR_KEY))
            .ok_or(Error::DiscriminatorMissing { line })?;

        let type_tag = entries[position]
            .value
            .as_str()
            .filter(|tag| !tag.is_empty())
            .ok_or(Error::DiscriminatorEmpty { line })?
            .to_owned();

        let remaining = entries
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != position)
            .map(|(_, e)| e.clone())
            .collect();
        let body = YamlNode::mapping_from_entries(remaining, node.span().clone());

        Ok(Self {
            name: None,
            type_tag,
            body,
            span: node.span().clone(),
        })
    }

    /// The diagnostic label from the surrounding document, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The extracted discriminator value.
    pub fn type_tag(&self) -> &str {
        &self.type_tag
    }

    /// The body mapping, with the discriminator entry removed.
    pub fn body(&self) -> &YamlNode {
        &self.body
    }

    /// Source position of the discriminated node.
    pub fn span(&self) -> &Span {
        &self.span
    }
}

impl fmt::Display for TypedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "name: {}, type: {}",
            self.name.as_deref().unwrap_or("<none>"),
            self.type_tag
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_parse() {
        let tc = TypedConfig::parse(
            r#"
name: english
typed_config:
  "@type": greetings.english
  greeting: Hi
"#,
        )
        .unwrap();

        assert_eq!(tc.name(), Some("english"));
        assert_eq!(tc.type_tag(), "greetings.english");
        assert_eq!(tc.body().get("greeting").unwrap().as_str(), Some("Hi"));
    }

    #[test]
    fn test_name_is_optional() {
        let tc = TypedConfig::parse("typed_config:\n  \"@type\": a.b\n  x: 1").unwrap();
        assert_eq!(tc.name(), None);
        assert_eq!(tc.type_tag(), "a.b");
    }

    #[test]
    fn test_missing_typed_config() {
        let err = TypedConfig::parse("name: test\nfoo: bar").unwrap_err();
        match err {
            Error::TypedConfigMissing { line } => assert_eq!(line, 1),
            other => panic!("expected TypedConfigMissing, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_discriminator_carries_line() {
        let err = TypedConfig::parse("name: test\ntyped_config:\n  foo: bar").unwrap_err();
        match err {
            Error::DiscriminatorMissing { line } => assert_eq!(line, 3),
            other => panic!("expected DiscriminatorMissing, got {other:?}"),
        }
    }

    #[test]
    fn test_quoted_numeric_discriminator_is_a_string_tag() {
        let tc = TypedConfig::parse("typed_config:\n  \"@type\": \"42\"\n  x: 1").unwrap();
        assert_eq!(tc.type_tag(), "42");
    }

    #[test]
    fn test_empty_discriminator() {
        let err = TypedConfig::parse("typed_config:\n  \"@type\":\n  foo: bar").unwrap_err();
        assert!(matches!(err, Error::DiscriminatorEmpty { .. }));
    }

    #[test]
    fn test_body_excludes_discriminator_and_keeps_order() {
        let tc = TypedConfig::parse(
            "typed_config:\n  zeta: 1\n  \"@type\": a.b\n  alpha: 2\n  mid: 3",
        )
        .unwrap();

        let keys: Vec<_> = tc
            .body()
            .as_entries()
            .unwrap()
            .iter()
            .filter_map(|e| e.key_str())
            .collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
        assert!(tc.body().get(DISCRIMINATOR_KEY).is_none());
    }

    #[test]
    fn test_scalar_typed_config_is_not_a_mapping() {
        let err = TypedConfig::parse("typed_config: just-a-string").unwrap_err();
        assert!(matches!(err, Error::NotAMapping { .. }));
    }

    #[test]
    fn test_display() {
        let tc = TypedConfig::parse("name: n\ntyped_config:\n  \"@type\": t").unwrap();
        assert_eq!(tc.to_string(), "name: n, type: t");
    }
}
