//! Error types for YAML parsing and decoding.

use thiserror::Error;

/// Result type alias for confit-yaml operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing or decoding YAML.
#[derive(Debug, Error)]
pub enum Error {
    /// YAML syntax error from the underlying scanner.
    #[error("{0}")]
    Scan(#[from] yaml_rust2::ScanError),

    /// The input contained no YAML document.
    #[error("no YAML document found")]
    EmptyDocument,

    /// The document referenced an anchor via an alias, which is not
    /// supported.
    #[error("line {line}: YAML aliases are not supported")]
    UnsupportedAlias { line: usize },

    /// A node could not be decoded into the requested shape.
    #[error("line {line}: {message}")]
    Decode { message: String, line: usize },
}
