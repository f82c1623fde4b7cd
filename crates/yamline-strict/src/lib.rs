//! Strict lookup wrappers over [`yamline`] collections.
//!
//! The core read path never faults on a missing key or a wrong-kind lookup;
//! it returns an absent result so lookups chain cheaply. At an API boundary
//! that absence is often a caller error; wrapping a [`Mapping`] or
//! [`Sequence`] here converts it into a [`StrictError::NotFound`] instead.

use thiserror::Error;
use yamline::{Mapping, Node, Sequence};

/// Faults raised by strict lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StrictError {
    /// No value (or no value of the requested kind) for the key.
    #[error("no value found for key '{key}'")]
    NotFound { key: String },

    /// A sequence index past the end.
    #[error("index {index} out of range, sequence has {length} elements")]
    OutOfRange { index: usize, length: usize },
}

/// A [`Mapping`] whose lookups fail loudly instead of returning `None`.
#[derive(Debug, Clone)]
pub struct StrictMapping {
    inner: Mapping,
}

impl StrictMapping {
    pub fn new(inner: Mapping) -> Self {
        Self { inner }
    }

    /// The wrapped mapping.
    pub fn into_inner(self) -> Mapping {
        self.inner
    }

    /// The value for `key`.
    ///
    /// # Errors
    ///
    /// [`StrictError::NotFound`] when the key is absent.
    pub fn value(&self, key: &Node) -> Result<Node, StrictError> {
        self.inner
            .value(key)
            .ok_or_else(|| StrictError::NotFound {
                key: describe(key),
            })
    }

    /// The string value for `key`.
    ///
    /// # Errors
    ///
    /// [`StrictError::NotFound`] when the key is absent, null or not a
    /// scalar.
    pub fn string(&self, key: &str) -> Result<String, StrictError> {
        self.inner.string(key).ok_or_else(|| StrictError::NotFound {
            key: key.to_string(),
        })
    }

    /// The nested mapping for `key`.
    ///
    /// # Errors
    ///
    /// [`StrictError::NotFound`] when the key is absent or the value is of
    /// another kind.
    pub fn mapping(&self, key: &str) -> Result<StrictMapping, StrictError> {
        self.inner
            .mapping(key)
            .map(StrictMapping::new)
            .ok_or_else(|| StrictError::NotFound {
                key: key.to_string(),
            })
    }

    /// The nested sequence for `key`.
    ///
    /// # Errors
    ///
    /// [`StrictError::NotFound`] when the key is absent or the value is of
    /// another kind.
    pub fn sequence(&self, key: &str) -> Result<StrictSequence, StrictError> {
        self.inner
            .sequence(key)
            .map(StrictSequence::new)
            .ok_or_else(|| StrictError::NotFound {
                key: key.to_string(),
            })
    }
}

/// A [`Sequence`] whose index lookups fail loudly instead of returning
/// `None`.
#[derive(Debug, Clone)]
pub struct StrictSequence {
    inner: Sequence,
}

impl StrictSequence {
    pub fn new(inner: Sequence) -> Self {
        Self { inner }
    }

    /// The wrapped sequence.
    pub fn into_inner(self) -> Sequence {
        self.inner
    }

    /// The element at `index`.
    ///
    /// # Errors
    ///
    /// [`StrictError::OutOfRange`] when `index` is past the end.
    pub fn get(&self, index: usize) -> Result<Node, StrictError> {
        self.inner.get(index).ok_or(StrictError::OutOfRange {
            index,
            length: self.inner.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

fn describe(key: &Node) -> String {
    match key.as_scalar().and_then(yamline::Scalar::value) {
        Some(text) => text,
        None => key.to_string().trim_end().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use yamline::YamlSource;

    use super::*;

    fn strict(text: &str) -> StrictMapping {
        StrictMapping::new(
            YamlSource::from_text(text)
                .read_mapping()
                .expect("valid yaml"),
        )
    }

    #[test]
    fn present_key_passes_through() {
        let mapping = strict("name: yamline\n");
        assert_eq!(mapping.string("name"), Ok("yamline".to_string()));
    }

    #[test]
    fn absent_key_is_not_found() {
        let mapping = strict("name: yamline\n");
        assert_eq!(
            mapping.string("missing"),
            Err(StrictError::NotFound {
                key: "missing".to_string()
            })
        );
    }

    #[test]
    fn wrong_kind_is_not_found() {
        let mapping = strict("name: yamline\n");
        assert!(mapping.mapping("name").is_err());
        assert!(mapping.sequence("name").is_err());
    }

    #[test]
    fn out_of_range_index() {
        let mapping = strict("items:\n  - a\n");
        let items = mapping.sequence("items").expect("sequence");
        assert_eq!(items.get(0), Ok(Node::scalar("a")));
        assert_eq!(
            items.get(3),
            Err(StrictError::OutOfRange {
                index: 3,
                length: 1
            })
        );
    }

    #[test]
    fn error_message_names_the_key() {
        let mapping = strict("a: 1\n");
        let error = mapping.string("version").expect_err("absent");
        assert_eq!(error.to_string(), "no value found for key 'version'");
    }
}
