use crate::line::Line;
use crate::scan;

/// The ordered, immutable collection of all ingested lines.
///
/// Built once from source text and shared (behind an `Arc`) by every node
/// read from it; nothing mutates it afterwards, which is what makes the lazy
/// read path safe to traverse from multiple threads.
#[derive(Debug, Clone, Default)]
pub struct Lines {
    all: Vec<Line>,
}

impl Lines {
    /// Ingest source text.
    ///
    /// One input shape is rewritten here so the rest of the pipeline never
    /// special-cases it: a sequence item carrying a `key: value` pair on the
    /// dash's own line is split into a lone dash plus the pair indented two
    /// spaces deeper.
    pub fn from_text(text: &str) -> Self {
        let mut lines = Self::default();
        for raw in text.lines() {
            match split_inline_pair(raw) {
                Some((dash, pair)) => {
                    lines.push(dash);
                    lines.push(pair);
                }
                None => lines.push(raw.to_string()),
            }
        }
        lines
    }

    fn push(&mut self, raw: String) {
        let number = self.all.len();
        self.all.push(Line::new(raw, number));
    }

    /// Look a line up by its 0-based position.
    pub fn line(&self, number: usize) -> Option<&Line> {
        self.all.get(number)
    }

    pub(crate) fn get(&self, number: usize) -> &Line {
        &self.all[number]
    }

    pub fn len(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    pub(crate) fn iter(&self) -> core::slice::Iter<'_, Line> {
        self.all.iter()
    }
}

/// Detect the `- key: value` shape and produce the two derived lines: the
/// lone dash at the dash's indentation and the pair two spaces deeper.
///
/// Flow collections after the dash (`- {a: 1}`) and quoted colons
/// (`- "a: b"`) are not pairs and stay on one line.
fn split_inline_pair(raw: &str) -> Option<(String, String)> {
    let indent = raw.chars().take_while(|c| *c == ' ').count();
    let rest = raw.get(indent..)?;
    let content = rest.strip_prefix("- ")?.trim_start();
    if content.is_empty() || content.starts_with(['{', '[', '#']) {
        return None;
    }
    let visible = match scan::comment_start(content) {
        Some(cut) => content[..cut].trim_end(),
        None => content,
    };
    let (key, _) = scan::key_value_split(visible)?;
    if key.is_empty() {
        return None;
    }
    let dash = format!("{}-", " ".repeat(indent));
    let pair = format!("{}{}", " ".repeat(indent + 2), content);
    Some((dash, pair))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_lines_keep_their_positions() {
        let lines = Lines::from_text("a: 1\nb: 2\n");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines.get(0).raw(), "a: 1");
        assert_eq!(lines.get(1).number(), 1);
    }

    #[test]
    fn inline_pair_item_is_split() {
        let lines = Lines::from_text("- name: test\n  version: 1.0\n");
        assert_eq!(lines.len(), 3);
        assert_eq!(lines.get(0).raw(), "-");
        assert_eq!(lines.get(1).raw(), "  name: test");
        assert_eq!(lines.get(2).raw(), "  version: 1.0");
    }

    #[test]
    fn nested_inline_pair_keeps_indentation() {
        let lines = Lines::from_text("  - a: b");
        assert_eq!(lines.get(0).raw(), "  -");
        assert_eq!(lines.get(1).raw(), "    a: b");
    }

    #[test]
    fn scalar_item_is_not_split() {
        let lines = Lines::from_text("- plain value");
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn quoted_colon_is_not_a_pair() {
        let lines = Lines::from_text("- \"a: b\"");
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn flow_item_is_not_split() {
        let lines = Lines::from_text("- {a: 1}");
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn pair_with_comment_keeps_comment_on_the_pair_line() {
        let lines = Lines::from_text("- a: b # note");
        assert_eq!(lines.get(0).raw(), "-");
        assert_eq!(lines.get(1).raw(), "  a: b # note");
        assert_eq!(lines.get(1).comment(), "note");
    }

    #[test]
    fn key_without_value_is_still_a_pair() {
        let lines = Lines::from_text("- key:");
        assert_eq!(lines.get(0).raw(), "-");
        assert_eq!(lines.get(1).raw(), "  key:");
    }
}
