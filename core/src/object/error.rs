use thiserror::Error;

use super::ParseIdError;

/// Describes why a tree or commit payload could not be decoded,
/// or why the fields for one could not be accepted.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum DecodeError {
    #[error("tree entry at offset {0} has no space after its mode")]
    TreeEntryMissingSpace(usize),

    #[error("tree entry at offset {0} has no NUL after its path")]
    TreeEntryMissingNul(usize),

    #[error("tree entry at offset {offset} is truncated: needs 20 ID bytes, found {found}")]
    TreeEntryTruncated { offset: usize, found: usize },

    #[error("invalid tree entry mode `{0}`")]
    InvalidMode(String),

    #[error("invalid tree entry path `{0}`")]
    InvalidPath(String),

    /// The header section ends before the blank line that introduces the message.
    #[error("commit header is truncated")]
    TruncatedHeader,

    #[error("commit header line at offset {0} has no key")]
    MalformedHeaderLine(usize),

    #[error("invalid commit header key `{0}`")]
    InvalidHeaderKey(String),

    #[error("commit must have exactly one tree header, found {0}")]
    TreeHeaderCount(usize),

    #[error("commit header `{key}` is not a valid object ID: {source}")]
    InvalidHeaderId {
        key: String,
        #[source]
        source: ParseIdError,
    },
}

/// Describes why a framed object (`type SPACE length NUL payload`) could not be split.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum FrameError {
    #[error("object header has no type terminator")]
    MissingSpace,

    #[error("object header has no length terminator")]
    MissingNul,

    #[error("unknown object type `{0}`")]
    UnknownType(String),

    #[error("invalid object length `{0}`")]
    InvalidLength(String),

    #[error("object header declares {declared} bytes, found {actual}")]
    LengthMismatch { declared: usize, actual: usize },
}
