//! Structural views over the line arena.
//!
//! The read path never walks raw lines directly: it builds a [`Scope`], an
//! ordered list of references into [`Lines`] (plus synthetic lines produced
//! by flow folding), and applies explicit transformations to it: dropping
//! noise, folding multi-line flow collections, validating indentation deltas
//! and restricting to one sibling depth. Scopes are transient; they are
//! rebuilt on every access, which keeps read nodes free of caches.

use alloc::borrow::Cow;
use core::ops::Range;

use crate::error::{Result, YamlError};
use crate::line::Line;
use crate::lines::Lines;
use crate::scan::FlowState;

#[derive(Debug, Clone)]
pub(crate) struct Scope<'a> {
    items: Vec<Cow<'a, Line>>,
}

impl<'a> Scope<'a> {
    /// The significant lines of `range`: noise (blanks, comment-only lines,
    /// markers, directives, tags) is dropped.
    pub fn significant(lines: &'a Lines, range: Range<usize>) -> Self {
        let items = lines
            .iter()
            .skip(range.start)
            .take(range.end.saturating_sub(range.start))
            .filter(|line| !line.is_noise())
            .map(Cow::Borrowed)
            .collect();
        Self { items }
    }

    /// Fold every multi-line flow collection into one synthetic line bearing
    /// the start line's number. The signed bracket counter shares quote state
    /// with the escape scan, so brackets inside quoted text never count. An
    /// unterminated collection folds to the end of the scope.
    pub fn fold_flows(self) -> Self {
        let mut out = Vec::with_capacity(self.items.len());
        let mut source = self.items.into_iter();
        while let Some(item) = source.next() {
            let mut state = FlowState::default();
            state.feed(item.trimmed());
            if state.depth() <= 0 {
                out.push(item);
                continue;
            }
            let indent = item.leading_spaces();
            let number = item.number();
            let mut parts = vec![item.trimmed().to_string()];
            for next in source.by_ref() {
                state.feed(next.trimmed());
                parts.push(next.trimmed().to_string());
                if state.depth() <= 0 {
                    break;
                }
            }
            let raw = format!("{}{}", " ".repeat(indent), parts.join(" "));
            out.push(Cow::Owned(Line::new(raw, number)));
        }
        Self { items: out }
    }

    /// Validate the indentation law over consecutive lines of this scope,
    /// starting from `reference` (the line that opened the scope) when given.
    ///
    /// A line opening a nested block admits a successor at exactly +2, or at
    /// the same depth or shallower (the block was empty and the successor
    /// belongs to an enclosing scope). Any other deeper successor faults.
    /// Block scalar interiors are content, not structure: after a `>`/`|`
    /// opener only the first content line is checked (it fixes the scalar's
    /// base at +2), the rest are skipped until the indentation returns to the
    /// opener's depth or above.
    pub fn well_indented(&self, reference: Option<&Line>) -> Result<()> {
        let mut prev: Option<&Line> = reference;
        let mut interior_base: Option<usize> = None;
        let mut interior_first: Option<usize> = None;
        for item in &self.items {
            let line = item.as_ref();
            if let Some(base) = interior_base {
                if line.leading_spaces() > base {
                    if let Some(required) = interior_first.take() {
                        if line.leading_spaces() != required {
                            return Err(YamlError::MisplacedIndentation {
                                line: line.number(),
                                expected: required,
                                found: line.leading_spaces(),
                            });
                        }
                    }
                    continue;
                }
                interior_base = None;
                interior_first = None;
            }
            let current = line.indentation()?;
            if let Some(previous) = prev {
                let above = previous.indentation()?;
                if current > above {
                    let opens =
                        previous.requires_nested_indentation() || previous.is_lone_dash();
                    if !opens {
                        return Err(YamlError::UnexpectedIndentation {
                            line: line.number(),
                            found: current,
                            previous: above,
                        });
                    }
                    if current != above + 2 {
                        return Err(YamlError::MisplacedIndentation {
                            line: line.number(),
                            expected: above + 2,
                            found: current,
                        });
                    }
                }
            }
            if line.opens_block_scalar() && !line.opens_wrapped_sequence() {
                interior_base = Some(line.leading_spaces());
                interior_first = Some(line.leading_spaces() + 2);
            }
            prev = Some(line);
        }
        Ok(())
    }

    /// Keep only the lines at the first line's depth, the direct children.
    /// Deeper lines are reached by recursing into child construction.
    pub fn siblings(self) -> Self {
        let Some(level) = self.items.first().map(|l| l.leading_spaces()) else {
            return self;
        };
        let items = self
            .items
            .into_iter()
            .filter(|line| line.leading_spaces() == level)
            .collect();
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Line> {
        self.items.get(index).map(Cow::as_ref)
    }

    pub fn first(&self) -> Option<&Line> {
        self.get(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Line> {
        self.items.iter().map(Cow::as_ref)
    }
}

/// Lines nested below `reference`: everything after it that is indented
/// deeper, up to (excluding) the first significant line that is not. Noise
/// lines inside the run are kept; structural scans drop them later, block
/// scalar reads preserve them.
pub(crate) fn nested_range(lines: &Lines, reference: usize) -> Range<usize> {
    let base = lines.get(reference).leading_spaces();
    let start = reference + 1;
    let mut end = start;
    for number in start..lines.len() {
        let line = lines.get(number);
        if line.is_noise() {
            continue;
        }
        if line.leading_spaces() <= base {
            break;
        }
        end = number + 1;
    }
    start..end
}

/// The content lines of a block scalar opened on `marker`: every following
/// line that is blank or indented deeper than the marker, with trailing
/// blanks trimmed.
pub(crate) fn block_scalar_range(lines: &Lines, marker: usize) -> Range<usize> {
    let base = lines.get(marker).leading_spaces();
    let start = marker + 1;
    let mut end = start;
    for number in start..lines.len() {
        let line = lines.get(number);
        if !line.is_blank() && line.leading_spaces() <= base {
            break;
        }
        end = number + 1;
    }
    while end > start && lines.get(end - 1).is_blank() {
        end -= 1;
    }
    start..end
}

/// The value region of a key whose sequence is written at the key's own
/// indentation: the run of same-depth dash lines (plus anything nested under
/// them) following `key`.
pub(crate) fn dash_run_range(lines: &Lines, key: usize, indent: usize) -> Range<usize> {
    let start = key + 1;
    let mut end = start;
    for number in start..lines.len() {
        let line = lines.get(number);
        if line.is_noise() {
            continue;
        }
        let depth = line.leading_spaces();
        if depth < indent {
            break;
        }
        if depth == indent && !line.trimmed().starts_with('-') {
            break;
        }
        end = number + 1;
    }
    start..end
}
