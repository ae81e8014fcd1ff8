//! Event-driven parser building [`YamlNode`] trees.

use crate::{Error, MapEntry, Result, Span, YamlNode};
use yaml_rust2::Yaml;
use yaml_rust2::parser::{Event, MarkedEventReceiver, Parser};
use yaml_rust2::scanner::{Marker, TScalarStyle};

/// Parse a single YAML document into a position-tracked node tree.
///
/// If the input contains multiple documents only the first is parsed.
///
/// # Errors
///
/// Returns [`Error::Scan`] for invalid YAML and [`Error::EmptyDocument`]
/// when the input contains no document at all.
pub fn parse(content: &str) -> Result<YamlNode> {
    let mut parser = Parser::new_from_str(content);
    let mut builder = NodeBuilder::new();

    // false = stop after the first document
    parser.load(&mut builder, false)?;

    builder.into_root()
}

/// Receives marked parse events and assembles the node tree.
struct NodeBuilder {
    /// Stack of containers currently being built.
    stack: Vec<Frame>,

    /// The completed root node.
    root: Option<YamlNode>,

    /// First error seen; once set, later events are ignored.
    error: Option<Error>,
}

enum Frame {
    Sequence {
        start: Marker,
        items: Vec<YamlNode>,
    },
    Mapping {
        start: Marker,
        // A pending entry holds a key awaiting its value.
        entries: Vec<(YamlNode, Option<YamlNode>)>,
    },
}

impl NodeBuilder {
    fn new() -> Self {
        Self {
            stack: Vec::new(),
            root: None,
            error: None,
        }
    }

    fn into_root(self) -> Result<YamlNode> {
        if let Some(err) = self.error {
            return Err(err);
        }
        self.root.ok_or(Error::EmptyDocument)
    }

    fn push_complete(&mut self, node: YamlNode) {
        let Some(frame) = self.stack.last_mut() else {
            self.root = Some(node);
            return;
        };

        match frame {
            Frame::Sequence { items, .. } => items.push(node),
            Frame::Mapping { entries, .. } => match entries.last_mut() {
                Some((_, value @ None)) => *value = Some(node),
                _ => entries.push((node, None)),
            },
        }
    }

    fn span_from(&self, start: &Marker, end: &Marker) -> Span {
        let len = end.index().saturating_sub(start.index());
        Span::from_marker(start, len)
    }
}

impl MarkedEventReceiver for NodeBuilder {
    fn on_event(&mut self, ev: Event, marker: Marker) {
        if self.error.is_some() {
            return;
        }

        match ev {
            Event::Nothing
            | Event::StreamStart
            | Event::StreamEnd
            | Event::DocumentStart
            | Event::DocumentEnd => {}

            Event::Scalar(value, style, _anchor_id, _tag) => {
                let span = Span::from_marker(&marker, value.len());
                // Only plain scalars carry implicit typing; quoted, literal,
                // and folded scalars are always strings.
                let yaml = match style {
                    TScalarStyle::Plain => infer_scalar(&value),
                    _ => Yaml::String(value),
                };
                self.push_complete(YamlNode::scalar(yaml, span));
            }

            Event::SequenceStart(_anchor_id, _tag) => {
                self.stack.push(Frame::Sequence {
                    start: marker,
                    items: Vec::new(),
                });
            }

            Event::SequenceEnd => {
                let Some(Frame::Sequence { start, items }) = self.stack.pop() else {
                    panic!("SequenceEnd without matching SequenceStart");
                };
                let span = self.span_from(&start, &marker);
                self.push_complete(YamlNode::sequence(items, span));
            }

            Event::MappingStart(_anchor_id, _tag) => {
                self.stack.push(Frame::Mapping {
                    start: marker,
                    entries: Vec::new(),
                });
            }

            Event::MappingEnd => {
                let Some(Frame::Mapping { start, entries }) = self.stack.pop() else {
                    panic!("MappingEnd without matching MappingStart");
                };
                let span = self.span_from(&start, &marker);
                let entries = entries
                    .into_iter()
                    .map(|(key, value)| {
                        let value = value.expect("mapping entry without value");
                        MapEntry::new(key, value)
                    })
                    .collect();
                self.push_complete(YamlNode::mapping_from_entries(entries, span));
            }

            Event::Alias(_anchor_id) => {
                self.error = Some(Error::UnsupportedAlias {
                    line: marker.line(),
                });
            }
        }
    }
}

/// Infer the YAML type of a plain scalar: integer, float, boolean, null,
/// falling back to string.
fn infer_scalar(value: &str) -> Yaml {
    if let Ok(i) = value.parse::<i64>() {
        return Yaml::Integer(i);
    }
    if value.parse::<f64>().is_ok() {
        return Yaml::Real(value.to_string());
    }
    match value {
        "true" | "True" | "TRUE" => Yaml::Boolean(true),
        "false" | "False" | "FALSE" => Yaml::Boolean(false),
        "null" | "Null" | "NULL" | "~" | "" => Yaml::Null,
        _ => Yaml::String(value.to_string()),
    }
}
