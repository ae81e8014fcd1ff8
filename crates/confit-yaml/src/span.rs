//! Source positions for YAML nodes.

/// Position of a YAML node in the original source text.
///
/// Line and column are 1-based; offset is a 0-based byte offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Byte offset from the start of the source.
    pub offset: usize,

    /// Line number (1-based).
    pub line: usize,

    /// Column number (1-based).
    pub col: usize,

    /// Length in bytes.
    pub len: usize,
}

impl Span {
    pub fn new(offset: usize, line: usize, col: usize, len: usize) -> Self {
        Self {
            offset,
            line,
            col,
            len,
        }
    }

    /// Build a span from a yaml-rust2 marker.
    ///
    /// Markers report a 1-based line and a 0-based column; the length is
    /// not part of the marker and must be supplied by the caller.
    pub fn from_marker(marker: &yaml_rust2::scanner::Marker, len: usize) -> Self {
        Self {
            offset: marker.index(),
            line: marker.line(),
            col: marker.col() + 1,
            len,
        }
    }

    /// End offset (exclusive) of this span.
    pub fn end_offset(&self) -> usize {
        self.offset + self.len
    }
}

impl Default for Span {
    fn default() -> Self {
        Self {
            offset: 0,
            line: 1,
            col: 1,
            len: 0,
        }
    }
}
