//! The document tree: one tagged union over four node kinds.
//!
//! Every kind has two representations. A *built* node owns the children its
//! builder accumulated. A *read* node is a lazy view: it shares the ingested
//! [`Lines`] behind an `Arc` together with the positions that define it, and
//! recomputes its children on every access instead of caching them. The
//! `read_*` entry points validate the lines once up front, so recomputation
//! afterwards cannot fault and the comparison contract stays total.

use alloc::sync::Arc;
use core::cmp::Ordering;
use core::hash::{Hash, Hasher};
use core::ops::Range;

use indexmap::IndexMap;

use crate::comment::{self, Comment};
use crate::error::Result;
use crate::lines::Lines;
use crate::parse;
use crate::scan;

/// A YAML node: scalar, sequence, mapping or stream of documents.
///
/// All nodes share one total order (Scalar < Sequence < Mapping < Stream,
/// same kinds compared structurally), and equality, ordering and hashing are
/// mutually consistent.
#[derive(Debug, Clone)]
pub enum Node {
    Scalar(Scalar),
    Sequence(Sequence),
    Mapping(Mapping),
    Stream(Stream),
}

impl Node {
    /// A plain scalar node.
    pub fn scalar(value: impl Into<String>) -> Self {
        Node::Scalar(Scalar::new(value))
    }

    /// The null scalar: an absent value, distinct from the empty string.
    pub fn null() -> Self {
        Node::Scalar(Scalar::null())
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Node::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&Sequence> {
        match self {
            Node::Sequence(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Node::Mapping(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_stream(&self) -> Option<&Stream> {
        match self {
            Node::Stream(s) => Some(s),
            _ => None,
        }
    }

    /// The comments documenting this node.
    pub fn comment(&self) -> Comment {
        match self {
            Node::Scalar(s) => s.comment(),
            Node::Sequence(s) => s.comment(),
            Node::Mapping(m) => m.comment(),
            Node::Stream(s) => s.comment(),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Node::Scalar(_) => 0,
            Node::Sequence(_) => 1,
            Node::Mapping(_) => 2,
            Node::Stream(_) => 3,
        }
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::scalar(value)
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::scalar(value)
    }
}

impl From<Scalar> for Node {
    fn from(value: Scalar) -> Self {
        Node::Scalar(value)
    }
}

impl From<Sequence> for Node {
    fn from(value: Sequence) -> Self {
        Node::Sequence(value)
    }
}

impl From<Mapping> for Node {
    fn from(value: Mapping) -> Self {
        Node::Mapping(value)
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Node {}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Node::Scalar(a), Node::Scalar(b)) => a.value().cmp(&b.value()),
            (Node::Sequence(a), Node::Sequence(b)) => a.items().cmp(&b.items()),
            (Node::Mapping(a), Node::Mapping(b)) => a.entries().cmp(&b.entries()),
            (Node::Stream(a), Node::Stream(b)) => a.documents().cmp(&b.documents()),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            Node::Scalar(s) => s.value().hash(state),
            Node::Sequence(s) => s.items().hash(state),
            Node::Mapping(m) => m.entries().hash(state),
            Node::Stream(s) => s.documents().hash(state),
        }
    }
}

/// Block scalar flavor: `>` folds interior newlines, `|` keeps them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BlockStyle {
    Folded,
    Literal,
}

/// A scalar value, possibly null, possibly spanning several folded/literal
/// source lines.
#[derive(Debug, Clone)]
pub struct Scalar {
    repr: ScalarRepr,
}

#[derive(Debug, Clone)]
enum ScalarRepr {
    Built {
        value: Option<String>,
        comment: Comment,
    },
    Read {
        source: Arc<Lines>,
        kind: ScalarKind,
    },
}

#[derive(Debug, Clone)]
enum ScalarKind {
    /// A plain scalar occupying a whole line.
    WholeLine { at: usize },
    /// The inline value of a `key: value` line.
    AfterColon { at: usize },
    /// The inline value of a `- value` line.
    AfterDash { at: usize },
    /// A fragment split out of a flow collection.
    Fragment { text: String },
    /// An explicit null: a key (or document) with no value.
    Null { at: Option<usize> },
    /// A folded (`>`) or literal (`|`) block scalar.
    Block {
        style: BlockStyle,
        marker: Option<usize>,
        start: usize,
        end: usize,
    },
}

impl Scalar {
    /// A plain scalar with the given value.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            repr: ScalarRepr::Built {
                value: Some(value.into()),
                comment: Comment::default(),
            },
        }
    }

    /// The null scalar.
    pub fn null() -> Self {
        Self {
            repr: ScalarRepr::Built {
                value: None,
                comment: Comment::default(),
            },
        }
    }

    /// Attach an above-comment to a built scalar. Read scalars keep the
    /// comments of their source lines.
    pub fn with_comment(mut self, above: impl Into<String>) -> Self {
        if let ScalarRepr::Built { comment, .. } = &mut self.repr {
            *comment = Comment::new(above, comment.inline());
        }
        self
    }

    /// Attach an inline comment to a built scalar.
    pub fn with_inline_comment(mut self, inline: impl Into<String>) -> Self {
        if let ScalarRepr::Built { comment, .. } = &mut self.repr {
            *comment = Comment::new(comment.above(), inline);
        }
        self
    }

    pub(crate) fn read_whole_line(source: &Arc<Lines>, at: usize) -> Self {
        Self::read(source, ScalarKind::WholeLine { at })
    }

    pub(crate) fn read_after_colon(source: &Arc<Lines>, at: usize) -> Self {
        Self::read(source, ScalarKind::AfterColon { at })
    }

    pub(crate) fn read_after_dash(source: &Arc<Lines>, at: usize) -> Self {
        Self::read(source, ScalarKind::AfterDash { at })
    }

    pub(crate) fn read_fragment(source: &Arc<Lines>, text: String) -> Self {
        Self::read(source, ScalarKind::Fragment { text })
    }

    pub(crate) fn read_null(source: &Arc<Lines>, at: Option<usize>) -> Self {
        Self::read(source, ScalarKind::Null { at })
    }

    pub(crate) fn read_block(
        source: &Arc<Lines>,
        style: BlockStyle,
        marker: Option<usize>,
        range: Range<usize>,
    ) -> Self {
        Self::read(
            source,
            ScalarKind::Block {
                style,
                marker,
                start: range.start,
                end: range.end,
            },
        )
    }

    fn read(source: &Arc<Lines>, kind: ScalarKind) -> Self {
        Self {
            repr: ScalarRepr::Read {
                source: Arc::clone(source),
                kind,
            },
        }
    }

    /// The scalar's value, or `None` for the null scalar. Recomputed from the
    /// source lines on every call for read scalars.
    pub fn value(&self) -> Option<String> {
        match &self.repr {
            ScalarRepr::Built { value, .. } => value.clone(),
            ScalarRepr::Read { source, kind } => match kind {
                ScalarKind::WholeLine { at } => decode(source.get(*at).trimmed()),
                ScalarKind::AfterColon { at } => {
                    let after = scan::key_value_split(source.get(*at).trimmed())
                        .map_or("", |(_, v)| v);
                    if after.is_empty() { None } else { decode(after) }
                }
                ScalarKind::AfterDash { at } => {
                    let trimmed = source.get(*at).trimmed();
                    let rest = trimmed.strip_prefix('-').map_or("", str::trim);
                    if rest.is_empty() { None } else { decode(rest) }
                }
                ScalarKind::Fragment { text } => {
                    let text = text.trim();
                    if text.is_empty() { None } else { decode(text) }
                }
                ScalarKind::Null { .. } => None,
                ScalarKind::Block {
                    style,
                    marker,
                    start,
                    end,
                } => Some(block_value(source, *style, *marker, *start, *end)),
            },
        }
    }

    pub fn is_null(&self) -> bool {
        self.value().is_none()
    }

    pub fn comment(&self) -> Comment {
        match &self.repr {
            ScalarRepr::Built { comment, .. } => comment.clone(),
            ScalarRepr::Read { source, kind } => match kind {
                ScalarKind::WholeLine { at }
                | ScalarKind::AfterColon { at }
                | ScalarKind::AfterDash { at }
                | ScalarKind::Null { at: Some(at) } => comment::at_line(source, *at),
                ScalarKind::Block {
                    marker: Some(marker),
                    ..
                } => comment::at_line(source, *marker),
                _ => Comment::default(),
            },
        }
    }

    /// For read folded/literal scalars: the style and the content lines
    /// relative to the scalar's base indentation, for verbatim re-printing.
    pub(crate) fn block_content(&self) -> Option<(BlockStyle, Vec<String>)> {
        let ScalarRepr::Read {
            source,
            kind:
                ScalarKind::Block {
                    style,
                    marker,
                    start,
                    end,
                },
        } = &self.repr
        else {
            return None;
        };
        let base = block_base(source, *marker, *start, *end);
        let lines = (*start..*end)
            .map(|number| dedent(source.get(number).raw(), base).trim_end().to_string())
            .collect();
        Some((*style, lines))
    }
}

fn decode(text: &str) -> Option<String> {
    if text == "null" {
        return None;
    }
    Some(scan::unquote(text).to_string())
}

fn block_base(source: &Lines, marker: Option<usize>, start: usize, end: usize) -> usize {
    match marker {
        Some(m) => source.get(m).leading_spaces() + 2,
        None => (start..end)
            .find(|n| !source.get(*n).is_blank())
            .map_or(0, |n| source.get(n).leading_spaces()),
    }
}

fn dedent(raw: &str, base: usize) -> &str {
    let leading = raw.chars().take_while(|c| *c == ' ').count();
    &raw[leading.min(base)..]
}

fn block_value(
    source: &Lines,
    style: BlockStyle,
    marker: Option<usize>,
    start: usize,
    end: usize,
) -> String {
    let base = block_base(source, marker, start, end);
    let mut out = String::new();
    let mut first = true;
    let mut after_break = false;
    for number in start..end {
        let line = source.get(number);
        if line.is_blank() {
            out.push('\n');
            after_break = true;
            first = false;
            continue;
        }
        let content = dedent(line.raw(), base).trim_end();
        match style {
            BlockStyle::Literal => {
                if !first {
                    out.push('\n');
                }
            }
            BlockStyle::Folded => {
                if line.leading_spaces() > base {
                    // a more deeply indented sub-line keeps its newline
                    if !first {
                        out.push('\n');
                    }
                } else if !first && !after_break {
                    out.push(' ');
                }
            }
        }
        out.push_str(content);
        first = false;
        after_break = false;
    }
    out
}

/// An ordered collection of nodes.
#[derive(Debug, Clone)]
pub struct Sequence {
    repr: SeqRepr,
}

#[derive(Debug, Clone)]
enum SeqRepr {
    Built {
        items: Vec<Node>,
        comment: Comment,
    },
    /// Dash-prefixed items at one sibling depth inside `start..end`.
    Block {
        source: Arc<Lines>,
        start: usize,
        end: usize,
        owner: Option<usize>,
    },
    /// A `-|` wrapped sequence: one item per line, no dashes.
    Wrapped {
        source: Arc<Lines>,
        marker: usize,
        start: usize,
        end: usize,
    },
    /// A `[...]` flow sequence folded onto one logical line.
    Flow {
        source: Arc<Lines>,
        text: String,
        at: usize,
    },
}

impl Sequence {
    pub(crate) fn built(items: Vec<Node>, comment: Comment) -> Self {
        Self {
            repr: SeqRepr::Built { items, comment },
        }
    }

    pub(crate) fn read_block(
        source: &Arc<Lines>,
        range: Range<usize>,
        owner: Option<usize>,
    ) -> Self {
        Self {
            repr: SeqRepr::Block {
                source: Arc::clone(source),
                start: range.start,
                end: range.end,
                owner,
            },
        }
    }

    pub(crate) fn read_wrapped(source: &Arc<Lines>, marker: usize, range: Range<usize>) -> Self {
        Self {
            repr: SeqRepr::Wrapped {
                source: Arc::clone(source),
                marker,
                start: range.start,
                end: range.end,
            },
        }
    }

    pub(crate) fn read_flow(source: &Arc<Lines>, text: String, at: usize) -> Self {
        Self {
            repr: SeqRepr::Flow {
                source: Arc::clone(source),
                text,
                at,
            },
        }
    }

    /// The elements, in document (or insertion) order. Read sequences
    /// recompute them from the source lines on every call.
    pub fn items(&self) -> Vec<Node> {
        self.try_items().unwrap_or_default()
    }

    pub(crate) fn try_items(&self) -> Result<Vec<Node>> {
        match &self.repr {
            SeqRepr::Built { items, .. } => Ok(items.clone()),
            SeqRepr::Block {
                source,
                start,
                end,
                owner,
            } => parse::block_seq_items(source, *start..*end, *owner),
            SeqRepr::Wrapped {
                source,
                marker,
                start,
                end,
            } => parse::wrapped_seq_items(source, *marker, *start..*end),
            SeqRepr::Flow { source, text, at } => Ok(parse::flow_seq_items(source, text, *at)),
        }
    }

    /// The element at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<Node> {
        self.items().into_iter().nth(index)
    }

    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    /// The comment attached at build time, if this sequence was built rather
    /// than read. The printer uses this to avoid re-emitting a read
    /// sequence's comment both for the collection and for its first element.
    pub(crate) fn built_comment(&self) -> Option<&Comment> {
        match &self.repr {
            SeqRepr::Built { comment, .. } => Some(comment),
            _ => None,
        }
    }

    pub fn comment(&self) -> Comment {
        match &self.repr {
            SeqRepr::Built { comment, .. } => comment.clone(),
            SeqRepr::Block {
                source, start, end, ..
            } => first_line_comment(source, *start, *end),
            SeqRepr::Wrapped { source, marker, .. } => comment::at_line(source, *marker),
            SeqRepr::Flow { source, at, .. } => comment::at_line(source, *at),
        }
    }
}

/// A collection of unique keys mapped to values, iterated in encounter
/// order.
#[derive(Debug, Clone)]
pub struct Mapping {
    repr: MapRepr,
}

#[derive(Debug, Clone)]
enum MapRepr {
    Built {
        entries: IndexMap<Node, Node>,
        comment: Comment,
    },
    Block {
        source: Arc<Lines>,
        start: usize,
        end: usize,
        owner: Option<usize>,
    },
    /// A `{...}` flow mapping folded onto one logical line.
    Flow {
        source: Arc<Lines>,
        text: String,
        at: usize,
    },
}

impl Mapping {
    pub(crate) fn built(entries: IndexMap<Node, Node>, comment: Comment) -> Self {
        Self {
            repr: MapRepr::Built { entries, comment },
        }
    }

    /// The canonical empty mapping.
    pub fn empty() -> Self {
        Self::built(IndexMap::new(), Comment::default())
    }

    pub(crate) fn read_block(
        source: &Arc<Lines>,
        range: Range<usize>,
        owner: Option<usize>,
    ) -> Self {
        Self {
            repr: MapRepr::Block {
                source: Arc::clone(source),
                start: range.start,
                end: range.end,
                owner,
            },
        }
    }

    pub(crate) fn read_flow(source: &Arc<Lines>, text: String, at: usize) -> Self {
        Self {
            repr: MapRepr::Flow {
                source: Arc::clone(source),
                text,
                at,
            },
        }
    }

    /// The key/value pairs, keys unique, in encounter order. Read mappings
    /// recompute them from the source lines on every call.
    pub fn entries(&self) -> Vec<(Node, Node)> {
        self.try_entries().unwrap_or_default()
    }

    pub(crate) fn try_entries(&self) -> Result<Vec<(Node, Node)>> {
        match &self.repr {
            MapRepr::Built { entries, .. } => Ok(entries
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect()),
            MapRepr::Block {
                source,
                start,
                end,
                owner,
            } => parse::block_map_entries(source, *start..*end, *owner),
            MapRepr::Flow { source, text, at } => Ok(parse::flow_map_entries(source, text, *at)),
        }
    }

    /// The keys, in encounter order.
    pub fn keys(&self) -> Vec<Node> {
        self.entries().into_iter().map(|(k, _)| k).collect()
    }

    /// The value for `key`, or `None` when absent.
    pub fn value(&self, key: &Node) -> Option<Node> {
        self.entries().into_iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// The string value for `key`; `None` when absent, null or not a scalar.
    pub fn string(&self, key: &str) -> Option<String> {
        match self.value(&Node::scalar(key)) {
            Some(Node::Scalar(s)) => s.value(),
            _ => None,
        }
    }

    /// The nested mapping for `key`; `None` when absent or of another kind.
    pub fn mapping(&self, key: &str) -> Option<Mapping> {
        match self.value(&Node::scalar(key)) {
            Some(Node::Mapping(m)) => Some(m),
            _ => None,
        }
    }

    /// The nested sequence for `key`; `None` when absent or of another kind.
    pub fn sequence(&self, key: &str) -> Option<Sequence> {
        match self.value(&Node::scalar(key)) {
            Some(Node::Sequence(s)) => Some(s),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// The comment attached at build time, if this mapping was built rather
    /// than read.
    pub(crate) fn built_comment(&self) -> Option<&Comment> {
        match &self.repr {
            MapRepr::Built { comment, .. } => Some(comment),
            _ => None,
        }
    }

    pub fn comment(&self) -> Comment {
        match &self.repr {
            MapRepr::Built { comment, .. } => comment.clone(),
            MapRepr::Block {
                source, start, end, ..
            } => first_line_comment(source, *start, *end),
            MapRepr::Flow { source, at, .. } => comment::at_line(source, *at),
        }
    }
}

fn first_line_comment(source: &Arc<Lines>, start: usize, end: usize) -> Comment {
    (start..end)
        .find(|n| !source.get(*n).is_noise())
        .map_or_else(Comment::default, |n| comment::at_line(source, n))
}

/// A stream of documents separated by `---` markers.
#[derive(Debug, Clone)]
pub struct Stream {
    source: Arc<Lines>,
}

impl Stream {
    pub(crate) fn read(source: &Arc<Lines>) -> Self {
        Self {
            source: Arc::clone(source),
        }
    }

    /// The documents of the stream, in order, recomputed on every call.
    pub fn documents(&self) -> Vec<Node> {
        self.try_documents().unwrap_or_default()
    }

    pub(crate) fn try_documents(&self) -> Result<Vec<Node>> {
        parse::stream_documents(&self.source)
    }

    pub fn len(&self) -> usize {
        self.documents().len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents().is_empty()
    }

    /// The document-level comment, found above the first `---` marker.
    pub fn comment(&self) -> Comment {
        comment::document_level(&self.source)
    }
}
