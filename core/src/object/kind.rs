use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use thiserror::Error;

/// Describes the fundamental object type (blob, tree, or commit).
///
/// We use the word `kind` here to avoid conflict with the Rust reserved word `type`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Kind {
    Blob,
    Tree,
    Commit,
}

/// Returned when a type tag names no known object kind.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("unknown object type `{0}`")]
pub struct ParseKindError(pub String);

impl Kind {
    /// Look up the kind for a type tag as it appears in an object header.
    pub fn from_tag(tag: &[u8]) -> Option<Kind> {
        match tag {
            b"blob" => Some(Kind::Blob),
            b"tree" => Some(Kind::Tree),
            b"commit" => Some(Kind::Commit),
            _ => None,
        }
    }

    /// The type tag written into object headers.
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Blob => "blob",
            Kind::Tree => "tree",
            Kind::Commit => "commit",
        }
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Kind::from_tag(s.as_bytes()).ok_or_else(|| ParseKindError(s.to_owned()))
    }
}
