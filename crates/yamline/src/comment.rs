use crate::lines::Lines;

/// The comments documenting a node: the contiguous `#` lines immediately
/// above its defining line and the trailing text on the line itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comment {
    above: String,
    inline: String,
}

impl Comment {
    pub(crate) fn new(above: impl Into<String>, inline: impl Into<String>) -> Self {
        Self {
            above: above.into(),
            inline: inline.into(),
        }
    }

    /// The comment lines above the node, in reading order, `#` stripped.
    pub fn above(&self) -> &str {
        &self.above
    }

    /// The trailing comment on the node's own line, `#` stripped.
    pub fn inline(&self) -> &str {
        &self.inline
    }

    /// Above and inline text concatenated.
    pub fn full(&self) -> String {
        match (self.above.is_empty(), self.inline.is_empty()) {
            (true, _) => self.inline.clone(),
            (_, true) => self.above.clone(),
            (false, false) => format!("{}\n{}", self.above, self.inline),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.above.is_empty() && self.inline.is_empty()
    }
}

/// The comment of the node defined on line `at`: scan upward for the maximal
/// contiguous run of comment-only lines, stopping at the first structural
/// line, blank line or document marker, then read it back downward.
pub(crate) fn at_line(lines: &Lines, at: usize) -> Comment {
    Comment::new(above_run(lines, at), lines.get(at).comment())
}

fn above_run(lines: &Lines, at: usize) -> String {
    let mut collected: Vec<&str> = Vec::new();
    for number in (0..at).rev() {
        let line = lines.get(number);
        if line.is_comment_only() {
            collected.push(line.comment());
        } else {
            break;
        }
    }
    collected.reverse();
    collected.join("\n")
}

/// The document-level comment: the run immediately above the first `---`
/// marker, plus any trailing text on the marker itself.
pub(crate) fn document_level(lines: &Lines) -> Comment {
    let Some(marker) = lines.iter().position(|line| line.is_start_marker()) else {
        return Comment::default();
    };
    Comment::new(above_run(lines, marker), lines.get(marker).comment())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn above_and_inline_are_associated() {
        let lines = Lines::from_text("# header\nkey: value # trailing\n");
        let comment = at_line(&lines, 1);
        assert_eq!(comment.above(), "header");
        assert_eq!(comment.inline(), "trailing");
        assert_eq!(comment.full(), "header\ntrailing");
    }

    #[test]
    fn run_is_contiguous() {
        let lines = Lines::from_text("# far away\n\n# near\nkey: value\n");
        let comment = at_line(&lines, 3);
        assert_eq!(comment.above(), "near");
    }

    #[test]
    fn run_stops_at_structural_line() {
        let lines = Lines::from_text("other: 1\n# doc\nkey: value\n");
        assert_eq!(at_line(&lines, 2).above(), "doc");
    }

    #[test]
    fn run_stops_at_marker() {
        let lines = Lines::from_text("# stream comment\n---\nkey: value\n");
        assert_eq!(at_line(&lines, 2).above(), "");
        assert_eq!(document_level(&lines).above(), "stream comment");
    }

    #[test]
    fn multi_line_run_reads_downward() {
        let lines = Lines::from_text("# one\n# two\nkey: value\n");
        assert_eq!(at_line(&lines, 2).above(), "one\ntwo");
    }

    #[test]
    fn empty_comment() {
        let lines = Lines::from_text("key: value\n");
        assert!(at_line(&lines, 0).is_empty());
    }
}
