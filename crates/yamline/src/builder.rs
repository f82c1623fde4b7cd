//! Builders for constructed (as opposed to read) nodes.
//!
//! Builders accumulate by value: every `add` consumes and returns the
//! builder, and `build` converts the accumulated state into an immutable
//! node. Cloning a builder snapshots it, so shared construction is
//! copy-on-write. An empty build collapses to the canonical empty
//! mapping/sequence.

use indexmap::IndexMap;

use crate::comment::Comment;
use crate::error::{Result, YamlError};
use crate::node::{Mapping, Node, Sequence};

/// Accumulates key/value pairs for an immutable [`Mapping`].
#[derive(Debug, Clone, Default)]
pub struct MappingBuilder {
    entries: IndexMap<Node, Node>,
    comment: String,
}

impl MappingBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pair. Any node kind works as key or value; a later duplicate
    /// key replaces the earlier value and keeps its position.
    ///
    /// # Errors
    ///
    /// Returns [`YamlError::InvalidArgument`] for a null or empty scalar key.
    pub fn add(mut self, key: impl Into<Node>, value: impl Into<Node>) -> Result<Self> {
        let key = key.into();
        if let Node::Scalar(scalar) = &key {
            match scalar.value() {
                None => {
                    return Err(YamlError::InvalidArgument(
                        "a mapping key cannot be null".to_string(),
                    ));
                }
                Some(text) if text.is_empty() => {
                    return Err(YamlError::InvalidArgument(
                        "a mapping key cannot be empty".to_string(),
                    ));
                }
                Some(_) => {}
            }
        }
        self.entries.insert(key, value.into());
        Ok(self)
    }

    /// Set the comment printed above the mapping.
    pub fn comment(mut self, text: impl Into<String>) -> Self {
        self.comment = text.into();
        self
    }

    /// Finish, producing an immutable mapping.
    pub fn build(self) -> Mapping {
        Mapping::built(self.entries, Comment::new(self.comment, ""))
    }
}

/// Accumulates elements for an immutable [`Sequence`].
#[derive(Debug, Clone, Default)]
pub struct SequenceBuilder {
    items: Vec<Node>,
    comment: String,
}

impl SequenceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element of any node kind.
    pub fn add(mut self, item: impl Into<Node>) -> Self {
        self.items.push(item.into());
        self
    }

    /// Remove the element at `index`; out-of-range indexes are ignored.
    pub fn remove(mut self, index: usize) -> Self {
        if index < self.items.len() {
            self.items.remove(index);
        }
        self
    }

    /// Set the comment printed above the sequence.
    pub fn comment(mut self, text: impl Into<String>) -> Self {
        self.comment = text.into();
        self
    }

    /// Finish, producing an immutable sequence.
    pub fn build(self) -> Sequence {
        Sequence::built(self.items, Comment::new(self.comment, ""))
    }
}
