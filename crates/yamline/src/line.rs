use crate::error::{Result, YamlError};
use crate::scan;

/// One source line of YAML.
///
/// A `Line` owns its raw text and its 0-based position in the ingested
/// collection and is never mutated afterwards. Everything else (indentation,
/// trimmed content, comment text) is recomputed on demand; recomputation is
/// idempotent, so sharing lines between threads is safe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    raw: String,
    number: usize,
}

impl Line {
    pub(crate) fn new(raw: String, number: usize) -> Self {
        Self { raw, number }
    }

    /// The raw text of the line, exactly as ingested.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// 0-based position of the line in its collection.
    pub fn number(&self) -> usize {
        self.number
    }

    /// Number of leading spaces, with no evenness check. Block scalar
    /// interiors are free-form and must be measured without faulting.
    pub fn leading_spaces(&self) -> usize {
        self.raw.chars().take_while(|c| *c == ' ').count()
    }

    /// Indentation of the line.
    ///
    /// # Errors
    ///
    /// Returns [`YamlError::OddIndentation`] if the leading-space count is
    /// odd.
    pub fn indentation(&self) -> Result<usize> {
        let spaces = self.leading_spaces();
        if spaces % 2 == 1 {
            return Err(YamlError::OddIndentation {
                line: self.number,
                spaces,
            });
        }
        Ok(spaces)
    }

    /// The line's content without surrounding whitespace and without the
    /// trailing comment. A `#` inside quoted text does not start a comment.
    pub fn trimmed(&self) -> &str {
        match scan::comment_start(&self.raw) {
            Some(cut) => self.raw[..cut].trim(),
            None => self.raw.trim(),
        }
    }

    /// The comment text of the line: everything after the first unescaped,
    /// unquoted `#`, trimmed. Empty if the line has no comment.
    pub fn comment(&self) -> &str {
        match scan::comment_start(&self.raw) {
            Some(cut) => self.raw[cut + 1..].trim(),
            None => "",
        }
    }

    /// Whether the next line must be indented exactly two spaces deeper.
    ///
    /// True when the trimmed content ends in `:`, `?`, `>` or `|`. A trailing
    /// `-` alone does not force nesting; sequence continuation is recognized
    /// by sibling-depth equality instead.
    pub fn requires_nested_indentation(&self) -> bool {
        matches!(
            self.trimmed().chars().last(),
            Some(':' | '?' | '>' | '|')
        )
    }

    /// Whether this line opens a block scalar: trimmed content ends in `>`
    /// (folded) or `|` (literal), including the wrapped-sequence `-|` form.
    pub(crate) fn opens_block_scalar(&self) -> bool {
        matches!(self.trimmed().chars().last(), Some('>' | '|'))
    }

    /// Whether this line opens a sequence "wrapped" in a `-|` marker, whose
    /// items are written one per line without leading dashes.
    pub(crate) fn opens_wrapped_sequence(&self) -> bool {
        let trimmed = self.trimmed();
        trimmed
            .strip_suffix('|')
            .is_some_and(|rest| rest.trim_end().ends_with('-'))
    }

    /// A lone `-`, introducing a sequence item whose content is nested below.
    pub(crate) fn is_lone_dash(&self) -> bool {
        self.trimmed() == "-"
    }

    pub(crate) fn is_blank(&self) -> bool {
        self.raw.trim().is_empty()
    }

    /// Only a comment on this line, no content.
    pub(crate) fn is_comment_only(&self) -> bool {
        self.trimmed().is_empty() && !self.comment().is_empty()
    }

    pub(crate) fn is_start_marker(&self) -> bool {
        self.trimmed().starts_with("---")
    }

    pub(crate) fn is_end_marker(&self) -> bool {
        self.trimmed().starts_with("...")
    }

    /// Lines the structural pipeline drops: blanks, comment-only lines,
    /// document markers, `%` directives and `!!` tag lines.
    pub(crate) fn is_noise(&self) -> bool {
        let trimmed = self.trimmed();
        trimmed.is_empty()
            || self.is_start_marker()
            || self.is_end_marker()
            || trimmed.starts_with('%')
            || trimmed.starts_with("!!")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(raw: &str) -> Line {
        Line::new(raw.to_string(), 7)
    }

    #[test]
    fn indentation_counts_leading_spaces() {
        assert_eq!(line("    four").indentation(), Ok(4));
        assert_eq!(line("zero").indentation(), Ok(0));
    }

    #[test]
    fn odd_indentation_faults_with_line_number() {
        assert_eq!(
            line("   three").indentation(),
            Err(YamlError::OddIndentation { line: 7, spaces: 3 })
        );
    }

    #[test]
    fn trimmed_strips_comment_and_whitespace() {
        assert_eq!(line("  key: value # note").trimmed(), "key: value");
        assert_eq!(line("  key: value").trimmed(), "key: value");
    }

    #[test]
    fn trimmed_keeps_hash_inside_quotes() {
        assert_eq!(line("key: \"a # b\"").trimmed(), "key: \"a # b\"");
    }

    #[test]
    fn comment_text_after_hash() {
        assert_eq!(line("key: value # note").comment(), "note");
        assert_eq!(line("# whole line").comment(), "whole line");
        assert_eq!(line("key: value").comment(), "");
    }

    #[test]
    fn nesting_markers() {
        assert!(line("key:").requires_nested_indentation());
        assert!(line("? ").requires_nested_indentation());
        assert!(line("key: >").requires_nested_indentation());
        assert!(line("key: |").requires_nested_indentation());
        assert!(!line("- item").requires_nested_indentation());
        assert!(!line("-").requires_nested_indentation());
    }

    #[test]
    fn wrapped_sequence_marker() {
        assert!(line("key: -|").opens_wrapped_sequence());
        assert!(line("key: - |").opens_wrapped_sequence());
        assert!(!line("key: |").opens_wrapped_sequence());
        assert!(!line("|").opens_wrapped_sequence());
    }

    #[test]
    fn noise_lines() {
        assert!(line("").is_noise());
        assert!(line("   ").is_noise());
        assert!(line("# only a comment").is_noise());
        assert!(line("---").is_noise());
        assert!(line("...").is_noise());
        assert!(line("%YAML 1.2").is_noise());
        assert!(line("!!str").is_noise());
        assert!(!line("key: value").is_noise());
    }
}
