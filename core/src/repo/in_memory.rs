use std::collections::HashMap;

use tracing::debug;

use super::{decode_payload, split_framed, Error, Repo, Result};
use crate::hash;
use crate::object::{Id, Object};

/// Implementation of `Repo` that keeps framed objects in memory.
///
/// Reads do not re-hash the stored bytes, so `insert_framed` can be used to
/// place arbitrary content under any ID (for example, to build a commit graph
/// with a cycle, which can't happen with honestly hashed objects).
#[derive(Debug, Default)]
pub struct InMemory {
    objects: HashMap<Id, Vec<u8>>,
}

impl InMemory {
    pub fn new() -> InMemory {
        InMemory::default()
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Store framed bytes under `id` without checking that they hash to it.
    /// Replaces anything previously stored under `id`.
    pub fn insert_framed(&mut self, id: Id, framed: Vec<u8>) {
        self.objects.insert(id, framed);
    }
}

impl Repo for InMemory {
    fn get_object(&self, id: &Id) -> Result<Object> {
        let framed = self.objects.get(id).ok_or(Error::NotFound(*id))?;
        let (kind, payload) = split_framed(id, framed)?;
        decode_payload(id, kind, payload)
    }

    fn put_object(&mut self, object: &Object) -> Result<Id> {
        let framed = object.framed();
        let id = hash::digest_of_framed(&framed);

        if self.objects.contains_key(&id) {
            debug!(%id, "object already stored");
        } else {
            debug!(%id, kind = %object.kind(), "storing object");
            self.objects.insert(id, framed);
        }

        Ok(id)
    }

    fn has_object(&self, id: &Id) -> Result<bool> {
        Ok(self.objects.contains_key(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::object::{Commit, Kind, Tree, TreeEntry};

    #[test]
    fn put_then_get() {
        let mut r = InMemory::new();
        let blob = Object::Blob(b"test content\n".to_vec());

        let id = r.put_object(&blob).unwrap();
        assert_eq!(id.to_string(), "d670460b4b4aece5915caf5c68d12f560a9fe3e4");
        assert!(r.has_object(&id).unwrap());
        assert_eq!(r.get_object(&id).unwrap(), blob);
    }

    #[test]
    fn put_is_idempotent() {
        let mut r = InMemory::new();
        let blob = Object::Blob(b"same".to_vec());

        let first = r.put_object(&blob).unwrap();
        let second = r.put_object(&blob).unwrap();

        assert_eq!(first, second);
        assert_eq!(r.len(), 1);
        assert_eq!(r.get_object(&first).unwrap(), blob);
    }

    #[test]
    fn tree_and_commit() {
        let mut r = InMemory::new();

        let blob_id = r.put_object(&Object::Blob(b"a".to_vec())).unwrap();

        let mut tree = Tree::new();
        tree.push(TreeEntry::new("100644", "a.txt", blob_id).unwrap());
        let tree = Object::Tree(tree);
        let tree_id = r.put_object(&tree).unwrap();

        let mut commit = Commit::new(&tree_id);
        commit.set_message("first\n");
        let commit = Object::Commit(commit);
        let commit_id = r.put_object(&commit).unwrap();

        assert_eq!(r.len(), 3);
        assert_eq!(r.get_object(&tree_id).unwrap(), tree);
        assert_eq!(r.get_object(&commit_id).unwrap().kind(), Kind::Commit);
    }

    #[test]
    fn commit_of_zero_tree() {
        let mut r = InMemory::new();
        let commit = Object::Commit(Commit::new(&Id::from_bytes([0u8; 20])));

        let id = r.put_object(&commit).unwrap();
        assert_eq!(r.get_object(&id).unwrap(), commit);
    }

    #[test]
    fn error_not_found() {
        let r = InMemory::new();
        let id = Id::from_hex("d670460b4b4aece5915caf5c68d12f560a9fe3e4").unwrap();

        assert!(!r.has_object(&id).unwrap());
        match r.get_object(&id).unwrap_err() {
            Error::NotFound(err_id) => assert_eq!(err_id, id),
            err => panic!("Unexpected error {:?}", err),
        }
    }

    #[test]
    fn error_corrupt_planted_object() {
        let mut r = InMemory::new();
        let id = Id::from_hex("d670460b4b4aece5915caf5c68d12f560a9fe3e4").unwrap();
        r.insert_framed(id, b"tree 5\0short".to_vec());

        match r.get_object(&id).unwrap_err() {
            Error::CorruptObject { id: err_id, .. } => assert_eq!(err_id, id),
            err => panic!("Unexpected error {:?}", err),
        }
    }
}
