//! Node-type inference and recursive construction.
//!
//! Given a reference line and the lines remaining below it, the engine
//! decides what the next node is (block or flow mapping; block, wrapped or
//! flow sequence; folded, literal, plain or null scalar) and hands back a
//! lazy view anchored on the relevant lines. The same functions serve two
//! callers: the read entry points run [`validate_tree`] once, eagerly walking
//! the whole tree so every fault surfaces up front, and the node accessors
//! re-run them afterwards on every access, when they can no longer fail.

use alloc::sync::Arc;
use core::ops::Range;

use indexmap::IndexSet;

use crate::error::{Result, YamlError};
use crate::line::Line;
use crate::lines::Lines;
use crate::node::{BlockStyle, Mapping, Node, Scalar, Sequence};
use crate::scan;
use crate::scope::{self, Scope};

/// Construct the root node of `region`.
pub(crate) fn document_node(source: &Arc<Lines>, region: Range<usize>) -> Result<Node> {
    let Some(first) = first_significant(source, region.clone()) else {
        return Ok(Node::Scalar(Scalar::read_null(source, None)));
    };
    tracing::trace!(start = region.start, end = region.end, first, "reading document node");
    classify(source, region, first, None)
}

/// Construct the node nested below `reference`.
pub(crate) fn node_below(source: &Arc<Lines>, reference: usize) -> Result<Node> {
    let ref_line = source.get(reference);
    if ref_line.opens_wrapped_sequence() {
        let range = scope::nested_range(source, reference);
        return Ok(Node::Sequence(Sequence::read_wrapped(
            source, reference, range,
        )));
    }
    if let Some(style) = block_style_of(ref_line) {
        let range = scope::block_scalar_range(source, reference);
        return Ok(Node::Scalar(Scalar::read_block(
            source,
            style,
            Some(reference),
            range,
        )));
    }
    let Some(next) = first_significant(source, reference + 1..source.len()) else {
        return Ok(Node::Scalar(Scalar::read_null(source, Some(reference))));
    };
    let next_line = source.get(next);
    let ref_indent = ref_line.leading_spaces();
    if next_line.leading_spaces() <= ref_indent {
        // the key had no nested content; a dash run at the key's own depth
        // is still its sequence value, anything else leaves it null
        if ref_line.trimmed().ends_with(':')
            && next_line.trimmed().starts_with('-')
            && next_line.leading_spaces() == ref_indent
        {
            let range = scope::dash_run_range(source, reference, ref_indent);
            return Ok(Node::Sequence(Sequence::read_block(
                source,
                range,
                Some(reference),
            )));
        }
        return Ok(Node::Scalar(Scalar::read_null(source, Some(reference))));
    }
    let region = scope::nested_range(source, reference);
    classify(source, region, next, Some(reference))
}

fn block_style_of(line: &Line) -> Option<BlockStyle> {
    match line.trimmed().chars().last() {
        Some('>') => Some(BlockStyle::Folded),
        Some('|') => Some(BlockStyle::Literal),
        _ => None,
    }
}

fn first_significant(source: &Lines, region: Range<usize>) -> Option<usize> {
    region
        .clone()
        .find(|number| *number < source.len() && !source.get(*number).is_noise())
}

/// Classify the node starting on line `first` of `region`.
fn classify(
    source: &Arc<Lines>,
    region: Range<usize>,
    first: usize,
    owner: Option<usize>,
) -> Result<Node> {
    let line = source.get(first);
    let trimmed = line.trimmed();
    if trimmed == ">" || trimmed == "|" {
        let style = if trimmed == ">" {
            BlockStyle::Folded
        } else {
            BlockStyle::Literal
        };
        let range = scope::block_scalar_range(source, first);
        return Ok(Node::Scalar(Scalar::read_block(
            source,
            style,
            Some(first),
            range,
        )));
    }
    if trimmed.starts_with(['[', '{']) {
        let folded = Scope::significant(source, region).fold_flows();
        let text = folded.first().map_or(trimmed, Line::trimmed);
        return Ok(flow_node(source, text, first));
    }
    if trimmed == "-" || trimmed.starts_with("- ") {
        return Ok(Node::Sequence(Sequence::read_block(
            source,
            first..region.end,
            owner,
        )));
    }
    if trimmed == "?" || scan::key_value_split(trimmed).is_some() {
        return Ok(Node::Mapping(Mapping::read_block(
            source,
            first..region.end,
            owner,
        )));
    }
    if Scope::significant(source, region).len() == 1 {
        return Ok(Node::Scalar(Scalar::read_whole_line(source, first)));
    }
    Err(YamlError::UnknownNodeType { line: first })
}

/// A flow fragment: a nested collection or a scalar.
pub(crate) fn flow_node(source: &Arc<Lines>, text: &str, at: usize) -> Node {
    let text = text.trim();
    if text.starts_with('{') {
        Node::Mapping(Mapping::read_flow(source, text.to_string(), at))
    } else if text.starts_with('[') {
        Node::Sequence(Sequence::read_flow(source, text.to_string(), at))
    } else {
        Node::Scalar(Scalar::read_fragment(source, text.to_string()))
    }
}

fn inline_value(source: &Arc<Lines>, text: &str, at: usize) -> Node {
    if text.starts_with(['[', '{']) {
        flow_node(source, text, at)
    } else {
        Node::Scalar(Scalar::read_after_colon(source, at))
    }
}

fn key_node(source: &Arc<Lines>, text: &str, at: usize) -> Node {
    if text.starts_with(['[', '{']) {
        flow_node(source, text, at)
    } else {
        Node::Scalar(Scalar::read_fragment(source, text.to_string()))
    }
}

/// The key/value pairs of a block mapping spanning `range`.
pub(crate) fn block_map_entries(
    source: &Arc<Lines>,
    range: Range<usize>,
    owner: Option<usize>,
) -> Result<Vec<(Node, Node)>> {
    let scope = Scope::significant(source, range).fold_flows();
    scope.well_indented(owner.map(|number| source.get(number)))?;
    let scope = scope.siblings();

    let mut entries: Vec<(Node, Node)> = Vec::new();
    let mut seen: IndexSet<Node> = IndexSet::new();
    let mut index = 0;
    while let Some(line) = scope.get(index) {
        let trimmed = line.trimmed();
        if trimmed == "?" {
            let key = node_below(source, line.number())?;
            let value_line = scope
                .get(index + 1)
                .filter(|next| next.trimmed().starts_with(':'));
            let Some(value_line) = value_line else {
                return Err(YamlError::MissingValue {
                    line: line.number(),
                });
            };
            let value = complex_value(source, value_line)?;
            push_unique(&mut entries, &mut seen, key, value);
            index += 2;
            continue;
        }
        if trimmed.starts_with(':') || trimmed.starts_with('-') {
            // a stray value line or a dash belonging to the previous
            // key's sequence value
            index += 1;
            continue;
        }
        if let Some((key_text, value_text)) = scan::key_value_split(trimmed) {
            let key = key_node(source, key_text, line.number());
            let value = entry_value(source, line, value_text)?;
            push_unique(&mut entries, &mut seen, key, value);
        }
        index += 1;
    }
    Ok(entries)
}

fn push_unique(entries: &mut Vec<(Node, Node)>, seen: &mut IndexSet<Node>, key: Node, value: Node) {
    if seen.insert(key.clone()) {
        entries.push((key, value));
    }
}

/// The value of a `key: ...` line: a block scalar or wrapped sequence when
/// the line ends in a marker, the nested node when nothing follows the
/// colon, the in-line node otherwise.
fn entry_value(source: &Arc<Lines>, line: &Line, value_text: &str) -> Result<Node> {
    if line.opens_block_scalar() || line.opens_wrapped_sequence() || value_text.is_empty() {
        node_below(source, line.number())
    } else {
        Ok(inline_value(source, value_text, line.number()))
    }
}

fn complex_value(source: &Arc<Lines>, value_line: &Line) -> Result<Node> {
    let after = value_line.trimmed()[1..].trim();
    if after.is_empty() {
        node_below(source, value_line.number())
    } else {
        Ok(inline_value(source, after, value_line.number()))
    }
}

/// The elements of a block sequence spanning `range`, in document order.
pub(crate) fn block_seq_items(
    source: &Arc<Lines>,
    range: Range<usize>,
    owner: Option<usize>,
) -> Result<Vec<Node>> {
    let scope = Scope::significant(source, range).fold_flows();
    scope.well_indented(owner.map(|number| source.get(number)))?;
    let scope = scope.siblings();

    let mut items = Vec::new();
    for line in scope.iter() {
        let trimmed = line.trimmed();
        if trimmed == "-" {
            items.push(node_below(source, line.number())?);
        } else if line.opens_block_scalar() || line.opens_wrapped_sequence() {
            if trimmed.starts_with("- ") {
                items.push(node_below(source, line.number())?);
            }
        } else if let Some(rest) = trimmed.strip_prefix("- ") {
            let rest = rest.trim();
            if rest.starts_with(['[', '{']) {
                items.push(flow_node(source, rest, line.number()));
            } else {
                items.push(Node::Scalar(Scalar::read_after_dash(source, line.number())));
            }
        }
        // non-dash siblings are not sequence elements
    }
    Ok(items)
}

/// The elements of a `-|` wrapped sequence: one plain item per line.
pub(crate) fn wrapped_seq_items(
    source: &Arc<Lines>,
    marker: usize,
    range: Range<usize>,
) -> Result<Vec<Node>> {
    let scope = Scope::significant(source, range).fold_flows();
    scope.well_indented(Some(source.get(marker)))?;
    let scope = scope.siblings();
    Ok(scope
        .iter()
        .map(|line| Node::Scalar(Scalar::read_whole_line(source, line.number())))
        .collect())
}

fn inner_text<'t>(text: &'t str, open: char, close: char) -> &'t str {
    let text = text.trim();
    let text = text.strip_prefix(open).unwrap_or(text);
    text.strip_suffix(close).unwrap_or(text).trim()
}

/// The elements of a folded `[...]` flow sequence.
pub(crate) fn flow_seq_items(source: &Arc<Lines>, text: &str, at: usize) -> Vec<Node> {
    let inner = inner_text(text, '[', ']');
    if inner.is_empty() {
        return Vec::new();
    }
    scan::split_top_level(inner, ',')
        .into_iter()
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .map(|fragment| flow_node(source, fragment, at))
        .collect()
}

/// The entries of a folded `{...}` flow mapping.
pub(crate) fn flow_map_entries(source: &Arc<Lines>, text: &str, at: usize) -> Vec<(Node, Node)> {
    let inner = inner_text(text, '{', '}');
    let mut entries: Vec<(Node, Node)> = Vec::new();
    let mut seen: IndexSet<Node> = IndexSet::new();
    if inner.is_empty() {
        return entries;
    }
    for part in scan::split_top_level(inner, ',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let (key, value) = match scan::key_value_split(part) {
            Some((key_text, value_text)) => {
                let value = if value_text.is_empty() {
                    Node::Scalar(Scalar::read_null(source, None))
                } else {
                    flow_node(source, value_text, at)
                };
                (key_node(source, key_text, at), value)
            }
            None => (
                key_node(source, part, at),
                Node::Scalar(Scalar::read_null(source, None)),
            ),
        };
        push_unique(&mut entries, &mut seen, key, value);
    }
    entries
}

/// The documents of a stream: the regions delimited by `---`/`...` markers
/// that contain significant lines.
pub(crate) fn stream_documents(source: &Arc<Lines>) -> Result<Vec<Node>> {
    let mut documents = Vec::new();
    let mut start = 0;
    for number in 0..source.len() {
        let line = source.get(number);
        if line.is_start_marker() || line.is_end_marker() {
            push_document(source, start..number, &mut documents)?;
            start = number + 1;
        }
    }
    push_document(source, start..source.len(), &mut documents)?;
    Ok(documents)
}

fn push_document(
    source: &Arc<Lines>,
    region: Range<usize>,
    documents: &mut Vec<Node>,
) -> Result<()> {
    if first_significant(source, region.clone()).is_some() {
        documents.push(document_node(source, region)?);
    }
    Ok(())
}

/// Walk the whole tree once, eagerly, so that every fault the lazy accessors
/// could encounter is raised here instead. After this returns `Ok`, child
/// recomputation is total.
pub(crate) fn validate_tree(node: &Node) -> Result<()> {
    match node {
        Node::Scalar(_) => Ok(()),
        Node::Sequence(sequence) => {
            for item in sequence.try_items()? {
                validate_tree(&item)?;
            }
            Ok(())
        }
        Node::Mapping(mapping) => {
            for (key, value) in mapping.try_entries()? {
                validate_tree(&key)?;
                validate_tree(&value)?;
            }
            Ok(())
        }
        Node::Stream(stream) => {
            for document in stream.try_documents()? {
                validate_tree(&document)?;
            }
            Ok(())
        }
    }
}
