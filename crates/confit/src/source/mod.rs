//! Pluggable lazy data sources.
//!
//! A data source node names exactly one source kind by key (`file`, `env`,
//! `string`, `bytes`, or a user-registered tag) with a scalar value:
//!
//! ```yaml
//! source:
//!   file: /etc/app/seed.txt
//! ```
//!
//! Decoding resolves the tag against a [`SourceRegistry`]; the underlying
//! stream is only created on the first read of the resulting [`DataSource`]
//! handle.

mod builtin;
mod registry;

pub use builtin::{BufferStream, EnvStream, FileStream};
pub use registry::{SourceFactory, SourceRegistry, register_source};

use crate::error::{Error, Result};
use confit_yaml::YamlNode;
use std::io::{self, Read};

/// A byte stream produced by a source factory.
///
/// `close` releases any held OS resource; the default is a no-op for streams
/// that hold none.
pub trait SourceStream: Read + Send {
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

enum State {
    /// Never resolved from a document. Read and close both fail.
    Unresolved,

    /// Resolved; the factory has not been invoked yet.
    Pending { factory: SourceFactory, value: String },

    /// The stream exists and is fixed for the lifetime of the handle.
    Open(Box<dyn SourceStream>),

    /// Closed. Further closes are no-ops; reads fail.
    Closed,
}

/// A lazily-opened byte stream chosen by a document node.
///
/// The stream is created at most once, on first read, and there is no
/// re-resolution afterwards. A handle is not safe for concurrent first read;
/// resolve once and share the opened stream under the caller's own
/// discipline if concurrent access is needed.
pub struct DataSource {
    tag: Option<String>,
    state: State,
}

impl Default for DataSource {
    /// A zero-value handle: reads and closes report [`Error::Uninitialized`].
    fn default() -> Self {
        Self {
            tag: None,
            state: State::Unresolved,
        }
    }
}

impl DataSource {
    /// Resolve a data source from a mapping node.
    ///
    /// Entries are tried in document order; the first key recognized by the
    /// registry wins and later entries are ignored. An unrecognized key
    /// before any match is an error naming the key and its line. Pass `None`
    /// to resolve against the process-wide default registry (pre-loaded with
    /// `file`, `env`, `string`, and `bytes`).
    pub fn from_yaml(node: &YamlNode, registry: Option<&SourceRegistry>) -> Result<Self> {
        let reg = match registry {
            Some(reg) => reg,
            None => SourceRegistry::global(),
        };
        let line = node.span().line;
        let entries = node.as_entries().ok_or(Error::NotAMapping { line })?;
        if entries.is_empty() {
            return Err(Error::SourceMissing { line });
        }

        for entry in entries {
            let tag = entry.key.scalar_string().unwrap_or_default();
            let Some(factory) = reg.lookup(&tag) else {
                return Err(Error::UnknownSourceTag {
                    tag,
                    line: entry.key.span().line,
                });
            };
            let value = entry
                .value
                .scalar_string()
                .ok_or_else(|| Error::SourceValueNotScalar {
                    tag: tag.clone(),
                    line: entry.value.span().line,
                })?;

            tracing::debug!(tag, "resolved data source");
            return Ok(Self {
                tag: Some(tag),
                state: State::Pending { factory, value },
            });
        }

        Err(Error::SourceMissing { line })
    }

    /// Parse a YAML document and resolve it as a data source node.
    pub fn parse(input: &str, registry: Option<&SourceRegistry>) -> Result<Self> {
        let doc = confit_yaml::parse(input)?;
        Self::from_yaml(&doc, registry)
    }

    /// The resolved source tag, if this handle has been resolved.
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Close the underlying stream.
    ///
    /// Closing a resolved handle is idempotent: the first close releases any
    /// opened resource, later closes are error-free no-ops. Closing a handle
    /// that was never resolved reports [`Error::Uninitialized`] every time.
    pub fn close(&mut self) -> Result<()> {
        match std::mem::replace(&mut self.state, State::Closed) {
            State::Unresolved => {
                self.state = State::Unresolved;
                Err(Error::Uninitialized)
            }
            State::Pending { .. } | State::Closed => Ok(()),
            State::Open(mut stream) => stream
                .close()
                .map_err(|source| Error::SourceCloseFailed { source }),
        }
    }

    fn open(&mut self) -> io::Result<&mut Box<dyn SourceStream>> {
        if let State::Pending { .. } = self.state {
            let State::Pending { factory, value } =
                std::mem::replace(&mut self.state, State::Unresolved)
            else {
                unreachable!();
            };
            match factory(&value) {
                Ok(stream) => self.state = State::Open(stream),
                Err(source) => {
                    // Leave the handle resolved so a later read may retry.
                    self.state = State::Pending { factory, value };
                    let tag = self.tag.clone().unwrap_or_default();
                    return Err(io::Error::other(Error::SourceCreateFailed { tag, source }));
                }
            }
        }

        match &mut self.state {
            State::Open(stream) => Ok(stream),
            State::Unresolved | State::Closed => Err(io::Error::other(Error::Uninitialized)),
            State::Pending { .. } => unreachable!(),
        }
    }
}

impl Read for DataSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.open()?.read(buf)
    }
}

impl std::fmt::Debug for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match self.state {
            State::Unresolved => "unresolved",
            State::Pending { .. } => "pending",
            State::Open(_) => "open",
            State::Closed => "closed",
        };
        f.debug_struct("DataSource")
            .field("tag", &self.tag)
            .field("state", &state)
            .finish()
    }
}
