use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use gitcas_core::hash;
use gitcas_core::object::{Id, Kind, Object};
use gitcas_core::repo::{decode_payload, split_framed, Error, Repo, Result};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::Config;

mod init;

/// The only `core.repositoryformatversion` this crate understands.
const SUPPORTED_FORMAT_VERSION: u32 = 0;

/// Implementation of `gitcas_core::repo::Repo` that stores content on the local file system.
///
/// Objects are kept as zlib-compressed loose objects under `.git/objects`,
/// byte-for-byte compatible with command-line `git`. Pack files are not read or written.
#[derive(Debug)]
pub struct OnDiskRepo {
    work_dir: PathBuf,
    git_dir: PathBuf,
    config: Config,
}

impl OnDiskRepo {
    /// Open an existing on-disk git repository.
    ///
    /// `work_dir` should be the top-level working directory. A `.git` directory should
    /// exist at this path and contain a `config` file declaring
    /// `repositoryformatversion = 0`. Use `init` function to create an empty on-disk
    /// repository if necessary.
    pub fn new(work_dir: &Path) -> Result<Self> {
        let work_dir = work_dir.to_path_buf();
        if !work_dir.exists() {
            return Err(Error::WorkDirDoesntExist(work_dir));
        }

        let git_dir = work_dir.join(".git");
        if !git_dir.exists() {
            return Err(Error::GitDirDoesntExist(git_dir));
        }

        let config = Config::load(&git_dir.join("config"))?;
        let version = config.repository_format_version();
        if version != SUPPORTED_FORMAT_VERSION {
            return Err(Error::UnsupportedVersion(version));
        }

        debug!(work_dir = %work_dir.display(), "opened repository");

        Ok(OnDiskRepo {
            work_dir,
            git_dir,
            config,
        })
    }

    /// Creates a new, empty git repository on the local file system.
    ///
    /// `work_dir` must either not exist yet or be an empty directory.
    ///
    /// Analogous to [`git init`](https://git-scm.com/docs/git-init).
    pub fn init(work_dir: &Path) -> Result<Self> {
        init::ensure_empty_dir(work_dir)?;

        let git_dir = work_dir.join(".git");
        let config = Config::default();
        init::create_git_dir(&git_dir, &config)?;

        info!(work_dir = %work_dir.display(), "initialized empty repository");

        Ok(OnDiskRepo {
            work_dir: work_dir.to_path_buf(),
            git_dir,
            config,
        })
    }

    /// Find the repository enclosing `start`.
    ///
    /// Checks `start` and then each of its ancestors in turn for a `.git`
    /// directory, stopping at the file system root.
    pub fn discover(start: &Path) -> Result<Self> {
        let start = start.canonicalize()?;

        let mut dir = Some(start.as_path());
        while let Some(candidate) = dir {
            if candidate.join(".git").is_dir() {
                return OnDiskRepo::new(candidate);
            }
            dir = candidate.parent();
        }

        Err(Error::NotARepository(start))
    }

    /// Return the working directory for this repo.
    pub fn work_dir(&self) -> &Path {
        self.work_dir.as_path()
    }

    /// Return the path to the `.git` directory.
    pub fn git_dir(&self) -> &Path {
        self.git_dir.as_path()
    }

    /// Return the configuration read when the repo was opened.
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn objects_dir(&self) -> PathBuf {
        self.git_dir.join("objects")
    }

    /// Return the path where the loose object named `id` is (or would be) stored.
    pub fn object_path(&self, id: &Id) -> PathBuf {
        let (shard, rest) = id.loose_path_parts();

        let mut path = self.objects_dir();
        path.push(shard);
        path.push(rest);
        path
    }
}

impl OnDiskRepo {
    /// Read the object named by `id` without decoding its payload.
    ///
    /// The stored bytes are inflated, unframed and checked against `id`, so the
    /// payload returned is exactly the one that was hashed.
    pub fn get_raw_object(&self, id: &Id) -> Result<(Kind, Vec<u8>)> {
        let path = self.object_path(id);

        let compressed = match fs::read(&path) {
            Ok(compressed) => compressed,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(Error::NotFound(*id));
            }
            Err(err) => return Err(err.into()),
        };

        let mut framed = Vec::new();
        ZlibDecoder::new(compressed.as_slice())
            .read_to_end(&mut framed)
            .map_err(|err| Error::CorruptObject {
                id: *id,
                reason: format!("unable to inflate: {}", err),
            })?;

        let (kind, payload) = split_framed(id, &framed)?;

        let actual = hash::digest_of(kind, payload);
        if actual != *id {
            return Err(Error::CorruptObject {
                id: *id,
                reason: format!("content hashes to {}", actual),
            });
        }

        debug!(%id, %kind, len = payload.len(), "read loose object");

        Ok((kind, payload.to_vec()))
    }
}

impl Repo for OnDiskRepo {
    fn get_object(&self, id: &Id) -> Result<Object> {
        let (kind, payload) = self.get_raw_object(id)?;
        decode_payload(id, kind, &payload)
    }

    fn put_object(&mut self, object: &Object) -> Result<Id> {
        let framed = object.framed();
        let id = hash::digest_of_framed(&framed);

        let path = self.object_path(&id);
        if path.exists() {
            debug!(%id, "loose object already exists");
            return Ok(id);
        }

        // Every object path has a parent: the shard directory.
        let shard_dir = path.parent().unwrap_or_else(|| self.git_dir.as_path());
        fs::create_dir_all(shard_dir)?;

        let temp_file = NamedTempFile::new_in(shard_dir)?;
        let mut encoder = ZlibEncoder::new(temp_file, Compression::default());
        encoder.write_all(&framed)?;
        let temp_file = encoder.finish()?;
        temp_file.persist(&path).map_err(|err| err.error)?;

        debug!(%id, kind = %object.kind(), "wrote loose object");

        Ok(id)
    }

    fn has_object(&self, id: &Id) -> Result<bool> {
        Ok(self.object_path(id).is_file())
    }
}
