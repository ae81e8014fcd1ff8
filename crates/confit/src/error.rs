//! Error types for decoding and resolution.
//!
//! Everything that originates from a document carries the 1-based line of the
//! offending node. Registration misuse (duplicate capabilities, duplicate
//! type tags, binding to an unknown capability) is a wiring bug and panics
//! instead of appearing here.

use thiserror::Error;

/// Boxed error returned by user factories.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result type alias for confit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced to callers during decoding and resolution.
#[derive(Debug, Error)]
pub enum Error {
    /// The document itself failed to parse.
    #[error(transparent)]
    Yaml(#[from] confit_yaml::Error),

    /// A discriminated node was not a mapping.
    #[error("line {line}: typed config node is not a mapping")]
    NotAMapping { line: usize },

    /// No `@type` key in a discriminated mapping.
    #[error("line {line}: @type not found in typed_config")]
    DiscriminatorMissing { line: usize },

    /// An `@type` key without a usable value.
    #[error("line {line}: @type has no value in typed_config")]
    DiscriminatorEmpty { line: usize },

    /// The top-level document lacks a `typed_config` entry.
    #[error("line {line}: typed_config is required")]
    TypedConfigMissing { line: usize },

    /// Resolution against a capability that was never registered.
    #[error("line {line}: capability {capability:?} not registered")]
    CapabilityNotRegistered { capability: String, line: usize },

    /// The type tag is unknown within a known capability.
    #[error("line {line}: config type {tag:?} not registered for capability {capability:?}")]
    TypeNotRegistered {
        capability: String,
        tag: String,
        line: usize,
    },

    /// The factory's config shape did not match the document body.
    #[error("line {line}: {source}")]
    ConfigDecodeFailed {
        line: usize,
        #[source]
        source: confit_yaml::Error,
    },

    /// The factory body returned an error.
    #[error("line {line}: factory for {tag:?}: {source}")]
    ConstructionFailed {
        tag: String,
        line: usize,
        #[source]
        source: BoxError,
    },

    /// The constructed value does not satisfy the requested capability.
    ///
    /// Unreachable with correct registrations, but checked defensively since
    /// the erased factory table cannot express the capability type statically.
    #[error(
        "line {line}: factory for {tag:?} returned a value that does not satisfy capability {capability:?}"
    )]
    CapabilityMismatch {
        capability: String,
        tag: String,
        line: usize,
    },

    /// A data source node key that no registered source recognizes.
    #[error("line {line}: unknown data source type {tag:?}")]
    UnknownSourceTag { tag: String, line: usize },

    /// A data source node with no entries at all.
    #[error("line {line}: data source type not found")]
    SourceMissing { line: usize },

    /// A data source entry whose value is not a scalar.
    #[error("line {line}: data source {tag:?} value is not a scalar")]
    SourceValueNotScalar { tag: String, line: usize },

    /// A source factory failed to produce its stream.
    #[error("data source {tag:?}: {source}")]
    SourceCreateFailed {
        tag: String,
        #[source]
        source: BoxError,
    },

    /// Read or close on a handle that was never resolved from a document.
    #[error("data source not initialized")]
    Uninitialized,

    /// Closing the underlying stream failed.
    #[error("failed to close data source: {source}")]
    SourceCloseFailed {
        #[source]
        source: std::io::Error,
    },
}
