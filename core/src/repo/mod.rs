//! Represents an abstract git object store.
//!
//! ## Design Goals
//!
//! Gitcas intends to allow objects to be stored in multiple different mechanisms.
//! The `gitcas_on_disk` crate provides local on-disk repositories using the same
//! loose-object layout as command-line git; `InMemory` keeps everything in a
//! `HashMap` and is mostly useful for tests.

mod error;
pub use error::{Error, Result};

mod in_memory;
pub use in_memory::InMemory;

use crate::hash;
use crate::object::{FrameError, Id, Kind, Object};

/// A struct that implements the `Repo` trait represents a particular mechanism
/// for storing and accessing content-addressed objects.
///
/// Objects are immutable and named by `Object::id`. Writing an object that is
/// already present is a successful no-op.
pub trait Repo {
    /// Read and decode the object named by `id`.
    ///
    /// Fails with `Error::NotFound` if there is no such object, `Error::UnknownType`
    /// if its type tag is unrecognized, or `Error::CorruptObject` if the stored
    /// bytes are damaged or do not decode.
    fn get_object(&self, id: &Id) -> Result<Object>;

    /// Store `object` and return its ID.
    fn put_object(&mut self, object: &Object) -> Result<Id>;

    /// Returns true if an object named `id` is stored.
    fn has_object(&self, id: &Id) -> Result<bool>;
}

/// Split a stored framed object, mapping frame errors onto `Repo` errors for `id`.
pub fn split_framed<'a>(id: &Id, framed: &'a [u8]) -> Result<(Kind, &'a [u8])> {
    hash::unframe(framed).map_err(|err| match err {
        FrameError::UnknownType(tag) => Error::UnknownType(tag),
        err => Error::CorruptObject {
            id: *id,
            reason: err.to_string(),
        },
    })
}

/// Decode a stored payload. A payload that doesn't decode makes the object corrupt.
pub fn decode_payload(id: &Id, kind: Kind, payload: &[u8]) -> Result<Object> {
    Object::decode(kind, payload).map_err(|err| Error::CorruptObject {
        id: *id,
        reason: err.to_string(),
    })
}
