//! The canonical printer: a tree walk producing YAML text.
//!
//! Output is canonical rather than source-faithful: flow collections from
//! the read path come out in block style, scalars are quoted only when their
//! text would otherwise read back as something else, and folded/literal
//! scalars re-emit their original content re-indented under their marker.

use core::fmt;

use crate::node::{BlockStyle, Mapping, Node, Scalar, Sequence};

/// Prints nodes with a configurable indentation width and line separator.
#[derive(Debug, Clone)]
pub struct Printer {
    indent_width: usize,
    line_separator: String,
}

impl Default for Printer {
    fn default() -> Self {
        Self {
            indent_width: 2,
            line_separator: "\n".to_string(),
        }
    }
}

impl Printer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spaces per indentation level; the default is 2. This affects output
    /// only; reading always expects steps of two.
    pub fn indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    /// The separator appended after every printed line; the default is `\n`.
    pub fn line_separator(mut self, separator: impl Into<String>) -> Self {
        self.line_separator = separator.into();
        self
    }

    /// Render `node` as canonical YAML text.
    ///
    /// A lone top-level scalar, and any top-level node preceded by a
    /// comment, is wrapped in `---`/`...` document markers so the comment
    /// re-reads as the node's own.
    pub fn print(&self, node: &Node) -> String {
        let mut out = String::new();
        if let Node::Stream(stream) = node {
            self.push_comment(stream.comment().above(), 0, &mut out);
            for document in stream.documents() {
                self.push_line("---", 0, &mut out);
                self.print_root(&document, &mut out);
            }
            self.push_line("...", 0, &mut out);
            return out;
        }
        let wrap =
            matches!(node, Node::Scalar(_)) || !node.comment().above().is_empty();
        if wrap {
            self.push_line("---", 0, &mut out);
            self.print_root(node, &mut out);
            self.push_line("...", 0, &mut out);
        } else {
            self.print_root(node, &mut out);
        }
        out
    }

    fn print_root(&self, node: &Node, out: &mut String) {
        // scalars and built collections carry their own comment; a read
        // collection's comment re-emerges from its first child instead
        let own_above = match node {
            Node::Scalar(scalar) => scalar.comment().above().to_string(),
            Node::Mapping(mapping) => mapping
                .built_comment()
                .map_or_else(String::new, |c| c.above().to_string()),
            Node::Sequence(sequence) => sequence
                .built_comment()
                .map_or_else(String::new, |c| c.above().to_string()),
            Node::Stream(_) => String::new(),
        };
        self.push_comment(&own_above, 0, out);
        self.node_block(node, 0, out);
    }

    /// Render a node as a block of full lines at `depth`.
    fn node_block(&self, node: &Node, depth: usize, out: &mut String) {
        match node {
            Node::Scalar(scalar) => self.scalar_line(scalar, None, depth, out),
            Node::Sequence(sequence) => self.sequence_block(sequence, depth, out),
            Node::Mapping(mapping) => self.mapping_block(mapping, depth, out),
            Node::Stream(stream) => {
                for document in stream.documents() {
                    self.push_line("---", depth, out);
                    self.node_block(&document, depth, out);
                }
            }
        }
    }

    /// Render a scalar on one line, optionally behind a `key: ` or `- `
    /// prefix, with its inline comment.
    fn scalar_line(
        &self,
        scalar: &Scalar,
        prefix: Option<&str>,
        depth: usize,
        out: &mut String,
    ) {
        if let Some((style, content)) = scalar.block_content() {
            let marker = match style {
                BlockStyle::Folded => ">",
                BlockStyle::Literal => "|",
            };
            let head = match prefix {
                Some(prefix) => format!("{prefix}{marker}"),
                None => marker.to_string(),
            };
            self.push_commented_line(&head, scalar.comment().inline(), depth, out);
            for line in content {
                if line.is_empty() {
                    out.push_str(&self.line_separator);
                } else {
                    self.push_line(&line, depth + 1, out);
                }
            }
            return;
        }
        let text = match scalar.value() {
            Some(value) => escape(&value),
            None => match prefix {
                // a null value after `key: ` or `- ` prints as nothing
                Some(prefix) => {
                    let head = prefix.trim_end().to_string();
                    self.push_commented_line(&head, scalar.comment().inline(), depth, out);
                    return;
                }
                None => "null".to_string(),
            },
        };
        let head = match prefix {
            Some(prefix) => format!("{prefix}{text}"),
            None => text,
        };
        self.push_commented_line(&head, scalar.comment().inline(), depth, out);
    }

    fn sequence_block(&self, sequence: &Sequence, depth: usize, out: &mut String) {
        let items = sequence.items();
        if items.is_empty() {
            self.push_line("[]", depth, out);
            return;
        }
        for item in items {
            match &item {
                Node::Scalar(scalar) => {
                    self.push_comment(scalar.comment().above(), depth, out);
                    self.scalar_line(scalar, Some("- "), depth, out);
                }
                _ => {
                    self.push_line("-", depth, out);
                    self.node_block(&item, depth + 1, out);
                }
            }
        }
    }

    fn mapping_block(&self, mapping: &Mapping, depth: usize, out: &mut String) {
        let entries = mapping.entries();
        if entries.is_empty() {
            self.push_line("{}", depth, out);
            return;
        }
        for (key, value) in entries {
            match &key {
                Node::Scalar(scalar) => {
                    let Some(key_text) = scalar.value().as_deref().map(escape) else {
                        continue; // null keys are unreachable through the builders
                    };
                    self.entry_block(&key_text, &value, depth, out);
                }
                _ => {
                    // complex key: `?` block, then `:` block
                    self.push_line("?", depth, out);
                    self.node_block(&key, depth + 1, out);
                    self.entry_block("", &value, depth, out);
                }
            }
        }
    }

    /// Render one mapping entry. An empty `key_text` renders the `:` line of
    /// a complex key.
    fn entry_block(&self, key_text: &str, value: &Node, depth: usize, out: &mut String) {
        let lead = if key_text.is_empty() {
            ":".to_string()
        } else {
            format!("{key_text}:")
        };
        match value {
            Node::Scalar(scalar) => {
                self.push_comment(scalar.comment().above(), depth, out);
                self.scalar_line(scalar, Some(&format!("{lead} ")), depth, out);
            }
            Node::Sequence(sequence) if sequence.is_empty() => {
                self.push_line(&format!("{lead} []"), depth, out);
            }
            Node::Mapping(mapping) if mapping.is_empty() => {
                self.push_line(&format!("{lead} {{}}"), depth, out);
            }
            _ => {
                if let Some(comment) = built_comment_of(value) {
                    self.push_comment(comment, depth, out);
                }
                self.push_line(&lead, depth, out);
                self.node_block(value, depth + 1, out);
            }
        }
    }

    fn indent(&self, depth: usize) -> String {
        " ".repeat(depth * self.indent_width)
    }

    fn push_line(&self, text: &str, depth: usize, out: &mut String) {
        out.push_str(&self.indent(depth));
        out.push_str(text);
        out.push_str(&self.line_separator);
    }

    fn push_commented_line(&self, text: &str, inline: &str, depth: usize, out: &mut String) {
        if inline.is_empty() {
            self.push_line(text, depth, out);
        } else {
            self.push_line(&format!("{text} # {inline}"), depth, out);
        }
    }

    fn push_comment(&self, above: &str, depth: usize, out: &mut String) {
        if above.is_empty() {
            return;
        }
        for line in above.split('\n') {
            self.push_line(&format!("# {line}"), depth, out);
        }
    }
}

fn built_comment_of(node: &Node) -> Option<&str> {
    let comment = match node {
        Node::Mapping(mapping) => mapping.built_comment()?,
        Node::Sequence(sequence) => sequence.built_comment()?,
        _ => return None,
    };
    if comment.above().is_empty() {
        None
    } else {
        Some(comment.above())
    }
}

/// Quote a scalar value only if its plain text would read back as something
/// else: a flow or block-sequence shape, the null marker, whitespace, or
/// YAML-special characters.
fn escape(value: &str) -> String {
    if !needs_quotes(value) {
        return value.to_string();
    }
    if value.contains('"') {
        format!("'{value}'")
    } else {
        format!("\"{value}\"")
    }
}

fn needs_quotes(value: &str) -> bool {
    const SPECIAL: &[char] = &[
        '#', ',', '[', ']', '{', '}', '&', '*', '!', '|', '>', '\'', '"', '%', '@', '`',
    ];
    value.is_empty()
        || value.trim() != value
        || value.trim().is_empty()
        || value == "null"
        || value == "-"
        || value.starts_with("- ")
        || value.starts_with("? ")
        || value == "?"
        || value.ends_with(':')
        || value.contains(": ")
        || value.contains(SPECIAL)
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&Printer::default().print(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_values_stay_plain() {
        assert_eq!(escape("value"), "value");
        assert_eq!(escape("1.0"), "1.0");
    }

    #[test]
    fn null_text_is_quoted() {
        assert_eq!(escape("null"), "\"null\"");
    }

    #[test]
    fn sequence_lead_is_quoted() {
        assert_eq!(escape("- item"), "\"- item\"");
        assert_eq!(escape("-"), "\"-\"");
    }

    #[test]
    fn flow_shapes_are_quoted() {
        assert_eq!(escape("[a, b]"), "\"[a, b]\"");
        assert_eq!(escape("{a: b}"), "\"{a: b}\"");
    }

    #[test]
    fn whitespace_is_quoted() {
        assert_eq!(escape(""), "\"\"");
        assert_eq!(escape("   "), "\"   \"");
        assert_eq!(escape(" padded "), "\" padded \"");
    }

    #[test]
    fn double_quote_falls_back_to_single() {
        assert_eq!(escape("say \"hi\""), "'say \"hi\"'");
    }

    #[test]
    fn colon_space_is_quoted() {
        assert_eq!(escape("a: b"), "\"a: b\"");
        assert_eq!(escape("a:b"), "a:b");
    }
}
