//! Represents the git concept of an "object" which is a tuple of
//! object type and binary data identified by the hash of the binary data.

mod commit;
pub use commit::{Commit, Headers};

mod error;
pub use error::{DecodeError, FrameError};

mod file_mode;
pub use file_mode::FileMode;

mod id;
pub use id::{Id, ParseIdError};

mod kind;
pub use kind::{Kind, ParseKindError};

pub(crate) mod parse_utils;

mod tree;
pub use tree::{Tree, TreeEntry};

use crate::hash;

/// A single immutable object, as stored in (or read from) a repository.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Object {
    /// Opaque content; the payload is the content itself.
    Blob(Vec<u8>),
    Tree(Tree),
    Commit(Commit),
}

impl Object {
    /// Return the kind of the object.
    pub fn kind(&self) -> Kind {
        match self {
            Object::Blob(_) => Kind::Blob,
            Object::Tree(_) => Kind::Tree,
            Object::Commit(_) => Kind::Commit,
        }
    }

    /// Serialize the object's payload (without the `type length` header).
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Object::Blob(data) => data.clone(),
            Object::Tree(tree) => tree.encode(),
            Object::Commit(commit) => commit.encode(),
        }
    }

    /// Decode a payload of the given kind.
    pub fn decode(kind: Kind, data: &[u8]) -> Result<Object, DecodeError> {
        match kind {
            Kind::Blob => Ok(Object::Blob(data.to_vec())),
            Kind::Tree => Tree::decode(data).map(Object::Tree),
            Kind::Commit => Commit::decode(data).map(Object::Commit),
        }
    }

    /// Serialize with the `type SPACE length NUL` header, as hashed and stored.
    pub fn framed(&self) -> Vec<u8> {
        hash::frame(self.kind(), &self.encode())
    }

    /// Computes the object's ID from its content, size, and type.
    ///
    /// This is functionally equivalent to the
    /// [`git hash-object`](https://git-scm.com/docs/git-hash-object) command
    /// without the `-w` option that would write the object to the repo.
    pub fn id(&self) -> Id {
        hash::digest_of(self.kind(), &self.encode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blob_is_identity() {
        let o = Object::Blob(b"test content\n".to_vec());

        assert_eq!(o.kind(), Kind::Blob);
        assert_eq!(o.encode(), b"test content\n");
        assert_eq!(Object::decode(Kind::Blob, b"test content\n").unwrap(), o);

        // $ echo 'test content' | git hash-object --stdin
        assert_eq!(
            o.id().to_string(),
            "d670460b4b4aece5915caf5c68d12f560a9fe3e4"
        );
    }

    #[test]
    fn empty_blob() {
        let o = Object::Blob(Vec::new());
        assert_eq!(o.framed(), b"blob 0\0");
        assert_eq!(
            o.id().to_string(),
            "e69de29bb2d1d6434b8b29ae775ad8c2e48c5391"
        );
    }

    #[test]
    fn empty_tree() {
        let o = Object::decode(Kind::Tree, b"").unwrap();
        assert_eq!(o, Object::Tree(Tree::new()));
        assert_eq!(
            o.id().to_string(),
            "4b825dc642cb6eb9a060e54bf8d69288fbee4904"
        );
    }

    #[test]
    fn commit_dispatch() {
        let tree = Id::from_hex("4b825dc642cb6eb9a060e54bf8d69288fbee4904").unwrap();
        let mut commit = Commit::new(&tree);
        commit.set_message("initial\n");

        let o = Object::Commit(commit);
        assert_eq!(o.kind(), Kind::Commit);
        assert_eq!(Object::decode(Kind::Commit, &o.encode()).unwrap(), o);
    }

    #[test]
    fn same_payload_different_kind() {
        let blob = Object::Blob(Vec::new());
        let tree = Object::Tree(Tree::new());

        assert_eq!(blob.encode(), tree.encode());
        assert_ne!(blob.id(), tree.id());
    }

    #[test]
    fn decode_errors_by_kind() {
        assert!(Object::decode(Kind::Blob, b"anything at all").is_ok());
        assert!(Object::decode(Kind::Tree, b"100644 a.txt\0short").is_err());
        assert_eq!(
            Object::decode(Kind::Commit, b"no blank line").unwrap_err(),
            DecodeError::TruncatedHeader
        );
    }
}
