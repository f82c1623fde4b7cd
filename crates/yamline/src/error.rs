use thiserror::Error;

/// Faults raised while reading, building, or printing YAML.
///
/// Every variant is fatal to the call that raised it; the library never
/// retries or recovers internally. Line numbers are 0-based positions in the
/// ingested line collection (after the sequence-item rewrite, see
/// [`crate::Lines::from_text`]).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum YamlError {
    /// A line is indented with an odd number of leading spaces.
    #[error("line {line}: odd indentation of {spaces} spaces")]
    OddIndentation { line: usize, spaces: usize },

    /// A line nested under a `:`, `?`, `>` or `|` opener does not sit exactly
    /// two spaces deeper than the opener.
    #[error("line {line}: expected indentation of {expected} spaces, found {found}")]
    MisplacedIndentation {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A line is indented deeper than its predecessor although the
    /// predecessor did not open a nested block.
    #[error("line {line}: unexpected indentation of {found} spaces after {previous}")]
    UnexpectedIndentation {
        line: usize,
        found: usize,
        previous: usize,
    },

    /// The node starting at this line matches none of the recognized shapes.
    #[error("line {line}: cannot determine the type of the node")]
    UnknownNodeType { line: usize },

    /// A complex (`?`) key has no `:` value line after it.
    #[error("line {line}: complex key is not followed by a value")]
    MissingValue { line: usize },

    /// A builder was given an unusable argument, e.g. a null or empty
    /// mapping key.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, YamlError>;
