//! Character scanning shared by line classification, flow folding and flow
//! splitting.
//!
//! All scanners toggle an "inside quote" flag on unescaped `'`/`"` so that
//! `#`, brackets, commas and colons inside quoted text stay inert.

/// Byte offset of the first unescaped, unquoted `#`, if any.
pub(crate) fn comment_start(text: &str) -> Option<usize> {
    let mut state = FlowState::default();
    for (i, ch) in text.char_indices() {
        if ch == '#' && !state.in_quotes() {
            return Some(i);
        }
        state.feed_char(ch);
    }
    None
}

/// Quote and bracket state carried across the lines of a multi-line flow
/// collection while it is being folded.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct FlowState {
    depth: i32,
    in_single: bool,
    in_double: bool,
    prev: char,
}

impl FlowState {
    pub fn depth(self) -> i32 {
        self.depth
    }

    pub fn in_quotes(self) -> bool {
        self.in_single || self.in_double
    }

    /// Feed one character, updating quote and bracket state. Brackets inside
    /// quoted text never change the counter; a quote preceded by `\` does not
    /// toggle.
    pub fn feed_char(&mut self, ch: char) {
        match ch {
            '\'' if !self.in_double && self.prev != '\\' => self.in_single = !self.in_single,
            '"' if !self.in_single && self.prev != '\\' => self.in_double = !self.in_double,
            '[' | '{' if !self.in_quotes() => self.depth += 1,
            ']' | '}' if !self.in_quotes() => self.depth -= 1,
            _ => {}
        }
        self.prev = ch;
    }

    /// Feed one line of text.
    pub fn feed(&mut self, text: &str) {
        for ch in text.chars() {
            self.feed_char(ch);
        }
    }
}

/// Split `text` on every `separator` found outside quotes and at bracket
/// depth zero. Empty fragments are kept; callers trim and filter.
pub(crate) fn split_top_level(text: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut state = FlowState::default();
    let mut start = 0;
    for (i, ch) in text.char_indices() {
        if ch == separator && state.depth == 0 && !state.in_quotes() {
            parts.push(&text[start..i]);
            start = i + ch.len_utf8();
        }
        state.feed_char(ch);
    }
    parts.push(&text[start..]);
    parts
}

/// Split a `key: value` line at the first unquoted, depth-zero `:` that is
/// followed by a space or ends the line. Returns the trimmed key text and the
/// trimmed (possibly empty) value text.
pub(crate) fn key_value_split(text: &str) -> Option<(&str, &str)> {
    let mut state = FlowState::default();
    for (i, ch) in text.char_indices() {
        if ch == ':' && state.depth == 0 && !state.in_quotes() {
            let after = &text[i + 1..];
            if after.is_empty() || after.starts_with(' ') {
                return Some((text[..i].trim(), after.trim()));
            }
        }
        state.feed_char(ch);
    }
    None
}

/// Strip one matching pair of surrounding quotes, if present.
pub(crate) fn unquote(text: &str) -> &str {
    let stripped = text
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .or_else(|| text.strip_prefix('\'').and_then(|t| t.strip_suffix('\'')));
    match stripped {
        Some(inner) if text.len() >= 2 => inner,
        _ => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comment_outside_quotes() {
        assert_eq!(comment_start("key: value # note"), Some(11));
    }

    #[test]
    fn comment_inside_quotes_is_inert() {
        assert_eq!(comment_start("key: \"a # b\""), None);
    }

    #[test]
    fn escaped_quote_does_not_toggle() {
        assert_eq!(comment_start("\"a \\\" b\" # c"), Some(9));
    }

    #[test]
    fn flow_state_counts_brackets() {
        let mut state = FlowState::default();
        state.feed("[a, {b: c},");
        assert_eq!(state.depth(), 1);
        state.feed("d]");
        assert_eq!(state.depth(), 0);
    }

    #[test]
    fn flow_state_ignores_quoted_brackets() {
        let mut state = FlowState::default();
        state.feed("[\"a[b]\", c");
        assert_eq!(state.depth(), 1);
    }

    #[test]
    fn split_respects_nesting() {
        assert_eq!(
            split_top_level("a, [b, c], d", ','),
            vec!["a", " [b, c]", " d"]
        );
    }

    #[test]
    fn split_respects_quotes() {
        assert_eq!(split_top_level("\"a, b\", c", ','), vec!["\"a, b\"", " c"]);
    }

    #[test]
    fn key_value_basic() {
        assert_eq!(key_value_split("name: eo"), Some(("name", "eo")));
        assert_eq!(key_value_split("name:"), Some(("name", "")));
    }

    #[test]
    fn key_value_requires_space_or_eol() {
        assert_eq!(key_value_split("http://example.com"), None);
    }

    #[test]
    fn key_value_skips_quoted_colons() {
        assert_eq!(key_value_split("\"a: b\": c"), Some(("\"a: b\"", "c")));
    }

    #[test]
    fn key_value_skips_bracketed_colons() {
        assert_eq!(key_value_split("{a: b}: c"), Some(("{a: b}", "c")));
    }

    #[test]
    fn unquote_strips_one_pair() {
        assert_eq!(unquote("\"null\""), "null");
        assert_eq!(unquote("'a'"), "a");
        assert_eq!(unquote("plain"), "plain");
        assert_eq!(unquote("\"open"), "\"open");
        assert_eq!(unquote("\""), "\"");
    }
}
