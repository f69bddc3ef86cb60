use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Why a value could not be turned into an object ID.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum ParseIdError {
    #[error("cannot parse object ID from empty string")]
    Empty,

    /// Anything but `0-9a-f`. Uppercase hex is rejected so that each ID has
    /// exactly one text form.
    #[error("value contains invalid digit `{0}`")]
    InvalidDigit(char),

    #[error("value is more than 40 digits long")]
    Overflow,

    #[error("value is less than 40 digits long")]
    Underflow,

    /// The all-zero ID is reserved by git to mean "no object".
    #[error("ID would be zero")]
    Zero,
}

/// The SHA-1 digest that names an object: 20 raw bytes, or 40 lowercase hex
/// digits in text form.
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Id {
    id: [u8; 20],
}

impl Id {
    /// Create an ID from a slice that must hold exactly 20 raw bytes.
    pub fn new(raw: &[u8]) -> Result<Id, ParseIdError> {
        check_len(raw.len(), 20)?;

        let mut id = [0u8; 20];
        id.copy_from_slice(raw);
        Ok(Id { id })
    }

    pub fn from_bytes(id: [u8; 20]) -> Id {
        Id { id }
    }

    /// Parse the 40-digit hex form of an object name.
    ///
    /// The all-zero ID names no object and is rejected.
    pub fn from_hex<T: AsRef<[u8]>>(hex: T) -> Result<Id, ParseIdError> {
        let id = Id::from_digest_hex(hex)?;
        if id.id == [0u8; 20] {
            return Err(ParseIdError::Zero);
        }
        Ok(id)
    }

    /// Parse 40 hex digits as a digest, any digest.
    ///
    /// Stored objects may refer to the all-zero ID (a tree entry or commit
    /// header can hold it), so decoders use this rather than `from_hex`.
    pub fn from_digest_hex<T: AsRef<[u8]>>(hex: T) -> Result<Id, ParseIdError> {
        let hex = hex.as_ref();
        check_len(hex.len(), 40)?;

        let mut id = [0u8; 20];
        for (byte, pair) in id.iter_mut().zip(hex.chunks(2)) {
            *byte = nibble(pair[0])? << 4 | nibble(pair[1])?;
        }

        Ok(Id { id })
    }

    /// The raw big-endian digest, as written into tree entries.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.id
    }

    /// Where a loose object lives under `objects/`: the shard directory named by
    /// the first two hex digits, and the file named by the other 38.
    pub fn loose_path_parts(&self) -> (String, String) {
        let mut hex = self.to_string();
        let rest = hex.split_off(2);
        (hex, rest)
    }
}

fn check_len(actual: usize, expected: usize) -> Result<(), ParseIdError> {
    if actual == 0 {
        Err(ParseIdError::Empty)
    } else if actual < expected {
        Err(ParseIdError::Underflow)
    } else if actual > expected {
        Err(ParseIdError::Overflow)
    } else {
        Ok(())
    }
}

fn nibble(c: u8) -> Result<u8, ParseIdError> {
    match c {
        b'0'..=b'9' => Ok(c - b'0'),
        b'a'..=b'f' => Ok(c - b'a' + 10),
        _ => Err(ParseIdError::InvalidDigit(c as char)),
    }
}

impl FromStr for Id {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Id::from_hex(s)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.id.iter() {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self)
    }
}
