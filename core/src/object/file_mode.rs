use super::Kind;

/// The kinds of tree entry git distinguishes by mode.
///
/// Modes are stored in trees as ASCII octal without leading zeros:
///
/// * `100644` - normal file
/// * `100755` - executable file
/// * `120000` - symbolic link
/// * `40000` - tree (subdirectory)
/// * `160000` - submodule (aka gitlink)
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FileMode {
    Normal,
    Executable,
    SymbolicLink,
    Tree,
    Submodule,
}

impl FileMode {
    /// Interpret a tree entry's mode bytes.
    ///
    /// Leading zeros are tolerated. Returns `None` for anything that is not
    /// octal or not one of the modes above.
    pub fn from_octal_slice(mode: &[u8]) -> Option<FileMode> {
        if mode.is_empty() || mode.len() > 7 {
            return None;
        }

        let value = mode.iter().try_fold(0u32, |acc, &c| match c {
            b'0'..=b'7' => Some(acc << 3 | u32::from(c - b'0')),
            _ => None,
        })?;

        match value {
            0o100644 => Some(FileMode::Normal),
            0o100755 => Some(FileMode::Executable),
            0o120000 => Some(FileMode::SymbolicLink),
            0o040000 => Some(FileMode::Tree),
            0o160000 => Some(FileMode::Submodule),
            _ => None,
        }
    }

    /// Kind of the object an entry with this mode points to. Symbolic links are
    /// blobs holding the link target; submodules name a commit in another repository.
    pub fn kind(self) -> Kind {
        match self {
            FileMode::Tree => Kind::Tree,
            FileMode::Submodule => Kind::Commit,
            FileMode::Normal | FileMode::Executable | FileMode::SymbolicLink => Kind::Blob,
        }
    }
}
