//! Content hashing: objects are named by the SHA-1 of their framed bytes.
//!
//! A framed object is `type SPACE decimal-length NUL payload`. Including the
//! type and length in the hash means two objects with the same payload but
//! different kinds get different IDs.

use sha1::{Digest, Sha1};

use crate::object::parse_utils::{find_byte, lossy};
use crate::object::{FrameError, Id, Kind};

/// Build the framed form of a payload.
pub fn frame(kind: Kind, payload: &[u8]) -> Vec<u8> {
    let lstr = payload.len().to_string();

    let mut framed = Vec::with_capacity(kind.as_str().len() + lstr.len() + 2 + payload.len());
    framed.extend_from_slice(kind.as_str().as_bytes());
    framed.push(b' ');
    framed.extend_from_slice(lstr.as_bytes());
    framed.push(0);
    framed.extend_from_slice(payload);
    framed
}

/// Compute the ID of a payload of the given kind.
///
/// Equivalent to hashing `frame(kind, payload)`, without building the framed buffer.
pub fn digest_of(kind: Kind, payload: &[u8]) -> Id {
    let mut hasher = Sha1::new();

    hasher.update(kind.as_str());
    hasher.update(b" ");

    let lstr = payload.len().to_string();
    hasher.update(lstr);
    hasher.update(b"\0");

    hasher.update(payload);

    finish(hasher)
}

/// Compute the ID of an already-framed object.
pub fn digest_of_framed(framed: &[u8]) -> Id {
    let mut hasher = Sha1::new();
    hasher.update(framed);
    finish(hasher)
}

fn finish(hasher: Sha1) -> Id {
    let final_hash = hasher.finalize();

    let mut id = [0u8; 20];
    id.copy_from_slice(final_hash.as_slice());
    Id::from_bytes(id)
}

/// Split a framed object into its kind and payload.
///
/// The declared length must match the number of bytes following the NUL exactly.
pub fn unframe(framed: &[u8]) -> Result<(Kind, &[u8]), FrameError> {
    let space = find_byte(framed, b' ', 0).ok_or(FrameError::MissingSpace)?;
    let nul = find_byte(framed, 0, space + 1).ok_or(FrameError::MissingNul)?;

    let tag = &framed[..space];
    if tag.contains(&0) {
        return Err(FrameError::MissingSpace);
    }

    let kind = Kind::from_tag(tag).ok_or_else(|| FrameError::UnknownType(lossy(tag)))?;

    let len_digits = &framed[space + 1..nul];
    let declared = parse_length(len_digits)
        .ok_or_else(|| FrameError::InvalidLength(lossy(len_digits)))?;

    let payload = &framed[nul + 1..];
    if declared != payload.len() {
        return Err(FrameError::LengthMismatch {
            declared,
            actual: payload.len(),
        });
    }

    Ok((kind, payload))
}

fn parse_length(digits: &[u8]) -> Option<usize> {
    if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
        return None;
    }

    std::str::from_utf8(digits).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    #[test]
    fn frame_layout() {
        assert_eq!(frame(Kind::Blob, b"abc"), b"blob 3\0abc");
        assert_eq!(frame(Kind::Tree, b""), b"tree 0\0");
        assert_eq!(frame(Kind::Commit, b"x\n"), b"commit 2\0x\n");
    }

    #[test]
    fn known_ids() {
        // $ echo 'test content' | git hash-object --stdin
        assert_eq!(
            digest_of(Kind::Blob, b"test content\n").to_string(),
            "d670460b4b4aece5915caf5c68d12f560a9fe3e4"
        );

        assert_eq!(
            digest_of(Kind::Blob, b"Hello World").to_string(),
            "5e1c309dae7f45e0f39b1bf3ac3cd9db12e7d689"
        );

        // $ git hash-object -t tree /dev/null
        assert_eq!(
            digest_of(Kind::Tree, b"").to_string(),
            "4b825dc642cb6eb9a060e54bf8d69288fbee4904"
        );
    }

    #[test]
    fn unframe_ok() {
        let (kind, payload) = unframe(b"blob 3\0abc").unwrap();
        assert_eq!(kind, Kind::Blob);
        assert_eq!(payload, b"abc");

        let (kind, payload) = unframe(b"tree 0\0").unwrap();
        assert_eq!(kind, Kind::Tree);
        assert!(payload.is_empty());
    }

    #[test]
    fn unframe_length_mismatch() {
        assert_eq!(
            unframe(b"blob 4\0abc").unwrap_err(),
            FrameError::LengthMismatch {
                declared: 4,
                actual: 3
            }
        );
        assert_eq!(
            unframe(b"blob 2\0abc").unwrap_err(),
            FrameError::LengthMismatch {
                declared: 2,
                actual: 3
            }
        );
    }

    #[test]
    fn unframe_unknown_type() {
        assert_eq!(
            unframe(b"tag 3\0abc").unwrap_err(),
            FrameError::UnknownType("tag".to_string())
        );
    }

    #[test]
    fn unframe_malformed() {
        assert_eq!(unframe(b"blob").unwrap_err(), FrameError::MissingSpace);
        assert_eq!(unframe(b"blob 3abc").unwrap_err(), FrameError::MissingNul);
        assert_eq!(unframe(b"bl\0ob 3\0abc").unwrap_err(), FrameError::MissingSpace);
        assert_eq!(
            unframe(b"blob +3\0abc").unwrap_err(),
            FrameError::InvalidLength("+3".to_string())
        );
        assert_eq!(
            unframe(b"blob \0").unwrap_err(),
            FrameError::InvalidLength("".to_string())
        );
    }

    proptest! {
        #[test]
        fn digest_matches_framed_digest(payload in any::<Vec<u8>>()) {
            for kind in [Kind::Blob, Kind::Tree, Kind::Commit].iter() {
                prop_assert_eq!(
                    digest_of(*kind, &payload),
                    digest_of_framed(&frame(*kind, &payload))
                );
            }
        }

        #[test]
        fn kind_is_part_of_the_id(payload in any::<Vec<u8>>()) {
            prop_assert_ne!(digest_of(Kind::Blob, &payload), digest_of(Kind::Tree, &payload));
            prop_assert_ne!(digest_of(Kind::Blob, &payload), digest_of(Kind::Commit, &payload));
        }

        #[test]
        fn unframe_reverses_frame(payload in any::<Vec<u8>>()) {
            let framed = frame(Kind::Blob, &payload);
            let (kind, unframed) = unframe(&framed).unwrap();
            prop_assert_eq!(kind, Kind::Blob);
            prop_assert_eq!(unframed, payload.as_slice());
        }
    }
}
