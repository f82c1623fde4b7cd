//! Line-oriented YAML reading, building and canonical printing.
//!
//! `yamline` parses human-authored YAML directly from its source lines:
//! indentation depth and trailing-character markers decide the structure,
//! with no token stream or grammar automaton in between. Reading is lazy:
//! nodes are views over the ingested lines and recompute their children on
//! every access. Trees can also be built programmatically and printed back
//! as canonical YAML, with comments preserved in both directions.
//!
//! ```
//! use yamline::{MappingBuilder, Printer, YamlSource};
//!
//! let mapping = MappingBuilder::new()
//!     .add("name", "yamline")
//!     .and_then(|b| b.add("version", "1.0"))
//!     .expect("valid keys")
//!     .build();
//! let text = Printer::default().print(&mapping.clone().into());
//! let reread = YamlSource::from_text(&text).read_mapping().expect("valid yaml");
//! assert_eq!(reread.string("name"), Some("yamline".to_string()));
//! ```
//!
//! Tags, anchors and aliases are not resolved; schema validation is out of
//! scope.

extern crate alloc;

mod builder;
mod comment;
mod error;
mod line;
mod lines;
mod node;
mod parse;
mod printer;
mod scan;
mod scope;

use alloc::sync::Arc;

pub use builder::{MappingBuilder, SequenceBuilder};
pub use comment::Comment;
pub use error::{Result, YamlError};
pub use line::Line;
pub use lines::Lines;
pub use node::{Mapping, Node, Scalar, Sequence, Stream};
pub use printer::Printer;

/// A YAML source: ingested lines ready to be read as nodes.
///
/// The underlying lines are immutable and shared by every node read from
/// this source, so sources and nodes may be used from several threads at
/// once. Every `read_*` method validates the lines up front and returns the
/// fault of the first problem it meets; the views it hands out recompute
/// their children lazily afterwards.
#[derive(Debug, Clone)]
pub struct YamlSource {
    lines: Arc<Lines>,
}

impl YamlSource {
    /// Ingest YAML text. Sequence items carrying an inline `key: value` pair
    /// are split into a lone dash plus an indented pair line here, before
    /// anything else sees them.
    pub fn from_text(text: &str) -> Self {
        let lines = Lines::from_text(text);
        tracing::debug!(lines = lines.len(), "ingested yaml source");
        Self {
            lines: Arc::new(lines),
        }
    }

    /// Read the document's root node, whatever its kind.
    ///
    /// # Errors
    ///
    /// Any [`YamlError`] fault found while validating the document.
    pub fn read(&self) -> Result<Node> {
        let node = parse::document_node(&self.lines, 0..self.lines.len())?;
        parse::validate_tree(&node)?;
        Ok(node)
    }

    /// Read the document as a mapping. A document of another kind gives the
    /// empty mapping: lookups on it are absent, not faults.
    ///
    /// # Errors
    ///
    /// Any [`YamlError`] fault found while validating the document.
    pub fn read_mapping(&self) -> Result<Mapping> {
        match self.read()? {
            Node::Mapping(mapping) => Ok(mapping),
            _ => Ok(Mapping::empty()),
        }
    }

    /// Read the document as a sequence. A document of another kind gives an
    /// empty sequence.
    ///
    /// # Errors
    ///
    /// Any [`YamlError`] fault found while validating the document.
    pub fn read_sequence(&self) -> Result<Sequence> {
        match self.read()? {
            Node::Sequence(sequence) => Ok(sequence),
            _ => Ok(SequenceBuilder::new().build()),
        }
    }

    /// Read the source as a stream of `---`-separated documents.
    ///
    /// # Errors
    ///
    /// Any [`YamlError`] fault found while validating the documents.
    pub fn read_stream(&self) -> Result<Stream> {
        let stream = Stream::read(&self.lines);
        for document in stream.try_documents()? {
            parse::validate_tree(&document)?;
        }
        Ok(stream)
    }

    /// Read the first significant line as a plain scalar; the null scalar
    /// when there is none.
    pub fn read_plain_scalar(&self) -> Scalar {
        self.first_significant()
            .map_or_else(Scalar::null, |at| Scalar::read_whole_line(&self.lines, at))
    }

    /// Read the document as a folded (`>`) scalar: either the block under a
    /// lone `>` marker, or every significant line folded together.
    pub fn read_folded_scalar(&self) -> Scalar {
        self.read_block_scalar(node::BlockStyle::Folded, ">")
    }

    /// Read the document as a literal (`|`) scalar: either the block under a
    /// lone `|` marker, or every significant line joined with newlines.
    pub fn read_literal_scalar(&self) -> Scalar {
        self.read_block_scalar(node::BlockStyle::Literal, "|")
    }

    fn read_block_scalar(&self, style: node::BlockStyle, marker: &str) -> Scalar {
        match self.first_significant() {
            None => Scalar::null(),
            Some(at) if self.lines.get(at).trimmed() == marker => {
                let range = scope::block_scalar_range(&self.lines, at);
                Scalar::read_block(&self.lines, style, Some(at), range)
            }
            Some(at) => Scalar::read_block(&self.lines, style, None, at..self.lines.len()),
        }
    }

    fn first_significant(&self) -> Option<usize> {
        self.lines.iter().position(|line| !line.is_noise())
    }
}

/// Read the root node of `text`. Shorthand for
/// [`YamlSource::from_text`] + [`YamlSource::read`].
///
/// # Errors
///
/// Any [`YamlError`] fault found while validating the document.
pub fn read(text: &str) -> Result<Node> {
    YamlSource::from_text(text).read()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn read_simple_mapping() {
        let mapping = YamlSource::from_text("a: 1\nb: 2\n")
            .read_mapping()
            .expect("read");
        assert_eq!(mapping.string("a"), Some("1".to_string()));
        assert_eq!(mapping.string("b"), Some("2".to_string()));
        assert_eq!(mapping.string("missing"), None);
    }

    #[test]
    fn read_nested_mapping() {
        let mapping = YamlSource::from_text("outer:\n  inner: value\n")
            .read_mapping()
            .expect("read");
        let inner = mapping.mapping("outer").expect("nested mapping");
        assert_eq!(inner.string("inner"), Some("value".to_string()));
    }

    #[test]
    fn read_sequence_of_scalars() {
        let sequence = YamlSource::from_text("- a\n- b\n- c\n")
            .read_sequence()
            .expect("read");
        assert_eq!(sequence.len(), 3);
        assert_eq!(sequence.get(1), Some(Node::scalar("b")));
        assert_eq!(sequence.get(9), None);
    }

    #[test]
    fn read_sequence_of_mappings() {
        let sequence = YamlSource::from_text("- name: one\n- name: two\n")
            .read_sequence()
            .expect("read");
        let first = sequence.get(0).expect("first item");
        let first = first.as_mapping().expect("mapping item");
        assert_eq!(first.string("name"), Some("one".to_string()));
    }

    #[test]
    fn read_mapping_of_wrong_kind_is_empty() {
        let mapping = YamlSource::from_text("- a\n- b\n")
            .read_mapping()
            .expect("read");
        assert!(mapping.is_empty());
        assert_eq!(mapping.string("a"), None);
    }

    #[test]
    fn null_value_reads_as_null_scalar() {
        let mapping = YamlSource::from_text("a:\nb: 1\n")
            .read_mapping()
            .expect("read");
        let value = mapping.value(&Node::scalar("a")).expect("key exists");
        let scalar = value.as_scalar().expect("scalar");
        assert!(scalar.is_null());
        assert_ne!(value, Node::scalar(""));
    }

    #[test]
    fn quoted_null_is_a_string() {
        let mapping = YamlSource::from_text("a: \"null\"\nb: null\n")
            .read_mapping()
            .expect("read");
        assert_eq!(mapping.string("a"), Some("null".to_string()));
        let b = mapping.value(&Node::scalar("b")).expect("key exists");
        assert!(b.as_scalar().expect("scalar").is_null());
    }

    #[test]
    fn read_flow_collections() {
        let mapping = YamlSource::from_text("developers: [alice, bob]\nmeta: {license: MIT}\n")
            .read_mapping()
            .expect("read");
        let developers = mapping.sequence("developers").expect("sequence");
        assert_eq!(developers.get(0), Some(Node::scalar("alice")));
        let meta = mapping.mapping("meta").expect("mapping");
        assert_eq!(meta.string("license"), Some("MIT".to_string()));
    }

    #[test]
    fn read_multi_line_flow() {
        let mapping = YamlSource::from_text("developers: [\n  alice,\n  bob]\n")
            .read_mapping()
            .expect("read");
        let developers = mapping.sequence("developers").expect("sequence");
        assert_eq!(developers.len(), 2);
        assert_eq!(developers.get(1), Some(Node::scalar("bob")));
    }

    #[test]
    fn read_literal_scalar_preserves_newlines() {
        let mapping = YamlSource::from_text("log: |\n  first\n  second\n")
            .read_mapping()
            .expect("read");
        let log = mapping.value(&Node::scalar("log")).expect("key exists");
        assert_eq!(
            log.as_scalar().expect("scalar").value(),
            Some("first\nsecond".to_string())
        );
    }

    #[test]
    fn read_folded_scalar_joins_lines() {
        let mapping = YamlSource::from_text("note: >\n  first\n  second\n")
            .read_mapping()
            .expect("read");
        let note = mapping.value(&Node::scalar("note")).expect("key exists");
        assert_eq!(
            note.as_scalar().expect("scalar").value(),
            Some("first second".to_string())
        );
    }

    #[test]
    fn read_stream_documents() {
        let stream = YamlSource::from_text("---\na: 1\n---\nb: 2\n")
            .read_stream()
            .expect("read");
        assert_eq!(stream.len(), 2);
        let second = stream.documents().pop().expect("second document");
        let second = second.as_mapping().expect("mapping");
        assert_eq!(second.string("b"), Some("2".to_string()));
    }

    #[test]
    fn read_complex_key() {
        let mapping = YamlSource::from_text("?\n  - a\n  - b\n: value\n")
            .read_mapping()
            .expect("read");
        let key = mapping.keys().pop().expect("one key");
        assert!(key.as_sequence().is_some());
        assert_eq!(mapping.value(&key), Some(Node::scalar("value")));
    }

    #[test]
    fn complex_key_without_value_faults() {
        let result = YamlSource::from_text("?\n  - a\nother: 1\n").read_mapping();
        assert_eq!(result.err(), Some(YamlError::MissingValue { line: 0 }));
    }

    #[test]
    fn odd_indentation_faults() {
        let result = YamlSource::from_text("a:\n   b: 1\n").read();
        assert_eq!(
            result,
            Err(YamlError::OddIndentation { line: 1, spaces: 3 })
        );
    }

    #[test]
    fn ambiguous_document_faults() {
        let result = YamlSource::from_text("plain one\nplain two\n").read();
        assert_eq!(result, Err(YamlError::UnknownNodeType { line: 0 }));
    }

    #[test]
    fn dash_line_with_colon_is_a_sequence() {
        let sequence = YamlSource::from_text("- a: 1\n- plain\n")
            .read_sequence()
            .expect("read");
        assert_eq!(sequence.len(), 2);
        assert!(sequence.get(0).expect("item").as_mapping().is_some());
        assert_eq!(sequence.get(1), Some(Node::scalar("plain")));
    }

    #[test]
    fn sequence_at_key_depth_is_its_value() {
        let mapping = YamlSource::from_text("key:\n- a\n- b\nother: 1\n")
            .read_mapping()
            .expect("read");
        let key_value = mapping.sequence("key").expect("sequence value");
        assert_eq!(key_value.len(), 2);
        assert_eq!(mapping.string("other"), Some("1".to_string()));
    }

    #[test]
    fn read_plain_scalar_takes_first_line() {
        let scalar = YamlSource::from_text("---\nhello\n").read_plain_scalar();
        assert_eq!(scalar.value(), Some("hello".to_string()));
    }

    #[test]
    fn read_folded_scalar_api() {
        let scalar = YamlSource::from_text(">\n  a\n  b\n").read_folded_scalar();
        assert_eq!(scalar.value(), Some("a b".to_string()));
        let bare = YamlSource::from_text("a\nb\n").read_folded_scalar();
        assert_eq!(bare.value(), Some("a b".to_string()));
    }

    #[test]
    fn read_literal_scalar_api() {
        let scalar = YamlSource::from_text("|\n  a\n  b\n").read_literal_scalar();
        assert_eq!(scalar.value(), Some("a\nb".to_string()));
        let empty = YamlSource::from_text("").read_literal_scalar();
        assert!(empty.is_null());
    }

    #[test]
    fn wrapped_sequence_reads_lines_without_dashes() {
        let mapping = YamlSource::from_text("steps: -|\n  build\n  test\n")
            .read_mapping()
            .expect("read");
        let steps = mapping.sequence("steps").expect("sequence");
        assert_eq!(steps.get(0), Some(Node::scalar("build")));
        assert_eq!(steps.get(1), Some(Node::scalar("test")));
    }

    #[test]
    fn lazy_children_are_recomputed_consistently() {
        let mapping = YamlSource::from_text("a: 1\nb:\n  c: 2\n")
            .read_mapping()
            .expect("read");
        assert_eq!(mapping.entries(), mapping.entries());
        assert_eq!(mapping.keys().len(), 2);
    }
}
