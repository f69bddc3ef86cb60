use super::parse_utils::{find_byte, lossy};
use super::{DecodeError, Id};

const TREE: &[u8] = b"tree";
const PARENT: &[u8] = b"parent";

/// The header section of a commit: an ordered multi-map from key to values.
///
/// Keys keep the order in which they were first seen, and each key keeps its
/// values in insertion order. Lookup is linear; commits carry a handful of keys.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Headers {
    entries: Vec<(Vec<u8>, Vec<Vec<u8>>)>,
}

impl Headers {
    pub fn new() -> Headers {
        Headers::default()
    }

    /// All values recorded for `key`, in order.
    pub fn get(&self, key: &[u8]) -> Option<&[Vec<u8>]> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_slice() == key)
            .map(|(_, values)| values.as_slice())
    }

    /// Iterate over `(key, values)` in first-seen key order.
    pub fn iter(&self) -> impl Iterator<Item = (&[u8], &[Vec<u8>])> {
        self.entries
            .iter()
            .map(|(k, values)| (k.as_slice(), values.as_slice()))
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn push(&mut self, key: &[u8], value: Vec<u8>) {
        match self.entries.iter_mut().find(|(k, _)| k.as_slice() == key) {
            Some((_, values)) => values.push(value),
            None => self.entries.push((key.to_vec(), vec![value])),
        }
    }
}

/// A commit object: header lines followed by a free-form message.
///
/// A commit always names exactly one tree and zero or more parent commits.
/// Both are kept as parsed IDs alongside the raw header values.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Commit {
    headers: Headers,
    message: Vec<u8>,
    tree: Id,
    parents: Vec<Id>,
}

impl Commit {
    /// Start a commit for the given tree with no parents, no other headers,
    /// and an empty message.
    pub fn new(tree: &Id) -> Commit {
        let mut headers = Headers::new();
        headers.push(TREE, tree.to_string().into_bytes());

        Commit {
            headers,
            message: Vec::new(),
            tree: *tree,
            parents: Vec::new(),
        }
    }

    pub fn add_parent(&mut self, parent: &Id) {
        self.headers.push(PARENT, parent.to_string().into_bytes());
        self.parents.push(*parent);
    }

    /// Append a header value. Values may contain newlines.
    ///
    /// Keys must be non-empty and may not contain a space or newline.
    /// A second `tree` is rejected, and `parent` values must be object IDs.
    pub fn add_header<K, V>(&mut self, key: K, value: V) -> Result<(), DecodeError>
    where
        K: AsRef<[u8]>,
        V: Into<Vec<u8>>,
    {
        let key = key.as_ref();
        if key.is_empty() || key.contains(&b' ') || key.contains(&b'\n') || key == TREE {
            return Err(DecodeError::InvalidHeaderKey(lossy(key)));
        }

        let value = value.into();
        if key == PARENT {
            self.parents.push(parse_id(key, &value)?);
        }

        self.headers.push(key, value);
        Ok(())
    }

    pub fn set_message<M: Into<Vec<u8>>>(&mut self, message: M) {
        self.message = message.into();
    }

    pub fn tree(&self) -> &Id {
        &self.tree
    }

    /// Parent commit IDs in header order. Empty for a root commit.
    pub fn parents(&self) -> &[Id] {
        &self.parents
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn header(&self, key: &[u8]) -> Option<&[Vec<u8>]> {
        self.headers.get(key)
    }

    pub fn message(&self) -> &[u8] {
        &self.message
    }

    /// Serialize as `key SPACE value NEWLINE` per header value (embedded
    /// newlines become NEWLINE SPACE), then a blank line and the message.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();

        for (key, values) in self.headers.iter() {
            for value in values {
                out.extend_from_slice(key);
                out.push(b' ');
                for &b in value {
                    out.push(b);
                    if b == b'\n' {
                        out.push(b' ');
                    }
                }
                out.push(b'\n');
            }
        }

        out.push(b'\n');
        out.extend_from_slice(&self.message);
        out
    }

    /// Parse a commit payload.
    ///
    /// Fails if the header section is not terminated by a blank line, if a
    /// header line has no key, or if the `tree`/`parent` headers do not hold
    /// valid object IDs (exactly one tree is required).
    pub fn decode(data: &[u8]) -> Result<Commit, DecodeError> {
        let mut headers = Headers::new();
        let mut pos = 0;

        let message = loop {
            let space = find_byte(data, b' ', pos);
            let newline = find_byte(data, b'\n', pos);

            match (space, newline) {
                (_, Some(nl)) if space.map_or(true, |sp| nl < sp) => {
                    // A newline before any space can only be the blank line
                    // that ends the header section.
                    if nl != pos {
                        return Err(DecodeError::MalformedHeaderLine(pos));
                    }
                    break data[nl + 1..].to_vec();
                }
                (Some(sp), _) => {
                    if sp == pos {
                        return Err(DecodeError::MalformedHeaderLine(pos));
                    }

                    let end = value_end(data, sp + 1).ok_or(DecodeError::TruncatedHeader)?;
                    headers.push(&data[pos..sp], unescape(&data[sp + 1..end]));
                    pos = end + 1;
                }
                _ => return Err(DecodeError::TruncatedHeader),
            }
        };

        let tree = match headers.get(TREE) {
            Some([tree]) => parse_id(TREE, tree)?,
            Some(trees) => return Err(DecodeError::TreeHeaderCount(trees.len())),
            None => return Err(DecodeError::TreeHeaderCount(0)),
        };

        let parents = headers
            .get(PARENT)
            .unwrap_or(&[])
            .iter()
            .map(|p| parse_id(PARENT, p))
            .collect::<Result<Vec<Id>, DecodeError>>()?;

        Ok(Commit {
            headers,
            message,
            tree,
            parents,
        })
    }
}

// A value ends at the first newline that is not followed by a space.
fn value_end(data: &[u8], from: usize) -> Option<usize> {
    let mut search = from;
    loop {
        let nl = find_byte(data, b'\n', search)?;
        if data.get(nl + 1) == Some(&b' ') {
            search = nl + 1;
        } else {
            return Some(nl);
        }
    }
}

fn unescape(raw: &[u8]) -> Vec<u8> {
    let mut value = Vec::with_capacity(raw.len());
    let mut i = 0;
    while i < raw.len() {
        value.push(raw[i]);
        if raw[i] == b'\n' && raw.get(i + 1) == Some(&b' ') {
            i += 1;
        }
        i += 1;
    }
    value
}

fn parse_id(key: &[u8], value: &[u8]) -> Result<Id, DecodeError> {
    Id::from_digest_hex(value).map_err(|source| DecodeError::InvalidHeaderId {
        key: lossy(key),
        source,
    })
}
