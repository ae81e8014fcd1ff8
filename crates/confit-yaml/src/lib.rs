//! # confit-yaml
//!
//! YAML parsing with source position tracking, for config documents whose
//! errors must point back at a line in the original text.
//!
//! The crate parses a single YAML document into a [`YamlNode`] tree. Every
//! node carries a [`Span`] (1-based line/column plus byte offset), mappings
//! keep their entries in document order, and any node can be re-decoded into
//! a `serde`-deserializable shape with [`decode`].
//!
//! ## Example
//!
//! ```rust
//! let doc = confit_yaml::parse("greeting: hello\ncount: 3").unwrap();
//! let greeting = doc.get("greeting").unwrap();
//! assert_eq!(greeting.as_str(), Some("hello"));
//! assert_eq!(greeting.span().line, 1);
//! ```

mod decode;
mod error;
mod node;
mod parser;
mod span;

pub use decode::decode;
pub use error::{Error, Result};
pub use node::{MapEntry, YamlNode};
pub use parser::parse;
pub use span::Span;
