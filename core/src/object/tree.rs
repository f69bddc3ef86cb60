use super::parse_utils::{find_byte, lossy};
use super::{DecodeError, FileMode, Id};

/// One `mode path id` triple of a tree object.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TreeEntry {
    mode: Vec<u8>,
    path: Vec<u8>,
    id: Id,
}

impl TreeEntry {
    /// Create a tree entry.
    ///
    /// The mode must be non-empty and contain no space or NUL; the path must be
    /// a single non-empty name with no NUL or `/`. Anything else could not be
    /// decoded back into the same entry.
    pub fn new<M, P>(mode: M, path: P, id: Id) -> Result<TreeEntry, DecodeError>
    where
        M: Into<Vec<u8>>,
        P: Into<Vec<u8>>,
    {
        let mode = mode.into();
        if mode.is_empty() || mode.contains(&b' ') || mode.contains(&0) {
            return Err(DecodeError::InvalidMode(lossy(&mode)));
        }

        let path = path.into();
        if path.is_empty() || path.contains(&0) || path.contains(&b'/') {
            return Err(DecodeError::InvalidPath(lossy(&path)));
        }

        Ok(TreeEntry { mode, path, id })
    }

    /// The mode, exactly as stored.
    pub fn mode(&self) -> &[u8] {
        &self.mode
    }

    pub fn path(&self) -> &[u8] {
        &self.path
    }

    /// ID of the blob, tree, or commit this entry points to.
    pub fn id(&self) -> &Id {
        &self.id
    }

    /// Interpret the mode as one of the git file modes, if it is one.
    pub fn file_mode(&self) -> Option<FileMode> {
        FileMode::from_octal_slice(&self.mode)
    }
}

/// A tree object: an ordered list of entries.
///
/// Entries are kept in insertion (or decoding) order. No sorting is applied
/// before encoding, so callers who need git's canonical path order must
/// insert entries in that order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Tree {
    entries: Vec<TreeEntry>,
}

impl Tree {
    pub fn new() -> Tree {
        Tree::default()
    }

    pub fn push(&mut self, entry: TreeEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[TreeEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize as `mode SPACE path NUL <20 raw ID bytes>` per entry,
    /// with no separator between entries.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();

        for entry in &self.entries {
            out.extend_from_slice(&entry.mode);
            out.push(b' ');
            out.extend_from_slice(&entry.path);
            out.push(0);
            out.extend_from_slice(entry.id.as_bytes());
        }

        out
    }

    /// Parse a tree payload.
    ///
    /// The mode is whatever bytes precede the first space (it is not trimmed or
    /// checked); the path runs to the next NUL, and exactly 20 ID bytes follow.
    pub fn decode(data: &[u8]) -> Result<Tree, DecodeError> {
        let mut entries = Vec::new();
        let mut pos = 0;

        while pos < data.len() {
            let space =
                find_byte(data, b' ', pos).ok_or(DecodeError::TreeEntryMissingSpace(pos))?;

            let nul =
                find_byte(data, 0, space + 1).ok_or(DecodeError::TreeEntryMissingNul(pos))?;

            let id_start = nul + 1;
            let found = data.len() - id_start;
            if found < 20 {
                return Err(DecodeError::TreeEntryTruncated { offset: pos, found });
            }

            let mut id = [0u8; 20];
            id.copy_from_slice(&data[id_start..id_start + 20]);

            entries.push(TreeEntry {
                mode: data[pos..space].to_vec(),
                path: data[space + 1..nul].to_vec(),
                id: Id::from_bytes(id),
            });

            pos = id_start + 20;
        }

        Ok(Tree { entries })
    }
}
