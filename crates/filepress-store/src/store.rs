use std::fs;
use std::path::{Path, PathBuf};

use crate::artifact::PendingArtifact;
use crate::error::{Error, Result, read_error};
use crate::naming::{self, SCRATCH_PREFIX};

/// The single directory all produced artifacts live in.
///
/// The store is a plain value: clone it into whatever packs, unpacks or
/// serves files. Names handed to [`OutputStore::resolve`] are untrusted and
/// are reduced to their final segment before touching the filesystem.
#[derive(Clone, Debug)]
pub struct OutputStore {
    root: PathBuf,
}

impl OutputStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let store = Self { root: root.into() };
        store.ensure_root()?;
        Ok(store)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the root directory. Idempotent.
    pub fn ensure_root(&self) -> Result<()> {
        match fs::create_dir_all(&self.root) {
            Ok(()) => Ok(()),
            Err(_) if self.root.is_dir() => Ok(()),
            Err(e) => Err(Error::StorageUnavailable {
                path: self.root.clone(),
                source: e,
            }),
        }
    }

    /// Map an untrusted artifact name to a path inside the root.
    ///
    /// `../../etc/passwd` resolves to `<root>/passwd`.
    pub fn resolve(&self, name: &str) -> Result<PathBuf> {
        let segment = naming::final_segment(name).ok_or_else(|| Error::NotFound {
            name: name.to_string(),
        })?;
        Ok(self.root.join(segment))
    }

    /// Read a whole artifact.
    pub fn read(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.resolve(name)?;
        if !path.is_file() {
            return Err(Error::NotFound {
                name: name.to_string(),
            });
        }
        tracing::debug!(path = %path.display(), "reading artifact");
        fs::read(&path).map_err(|e| read_error(name, path, e))
    }

    /// Size on disk of an artifact, read back from the filesystem.
    pub fn size_of(&self, name: &str) -> Result<u64> {
        let path = self.resolve(name)?;
        let metadata = fs::metadata(&path).map_err(|e| read_error(name, path.clone(), e))?;
        if !metadata.is_file() {
            return Err(Error::NotFound {
                name: name.to_string(),
            });
        }
        Ok(metadata.len())
    }

    /// Start writing an artifact that becomes visible as `name` on commit.
    pub fn create_artifact(&self, name: &str) -> Result<PendingArtifact> {
        let target = self.resolve(name)?;
        PendingArtifact::create(&self.root, target)
    }

    /// Create a fresh `extracted_<stamp>` directory under the root.
    pub fn new_scratch_dir(&self) -> Result<PathBuf> {
        let path = self
            .root
            .join(format!("{}{}", SCRATCH_PREFIX, naming::stamp()));
        // `create_dir`, not `create_dir_all`: an existing directory is a
        // collision and must not be shared.
        fs::create_dir(&path).map_err(|e| Error::Write {
            path: path.clone(),
            source: e,
        })?;
        tracing::debug!(scratch = %path.display(), "allocated scratch directory");
        Ok(path)
    }

    /// Names of committed artifacts, sorted.
    pub fn list(&self) -> Result<Vec<String>> {
        let entries = fs::read_dir(&self.root).map_err(|e| Error::Read {
            path: self.root.clone(),
            source: e,
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| Error::Read {
                path: self.root.clone(),
                source: e,
            })?;
            let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
            let name = entry.file_name().to_string_lossy().into_owned();
            if is_file && !naming::is_temporary(&name) {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }

    /// Remove every scratch directory. Returns how many were removed.
    pub fn clean_scratch(&self) -> Result<usize> {
        let entries = fs::read_dir(&self.root).map_err(|e| Error::Read {
            path: self.root.clone(),
            source: e,
        })?;

        let mut removed = 0;
        for entry in entries.flatten() {
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            let name = entry.file_name();
            if !is_dir || !name.to_string_lossy().starts_with(SCRATCH_PREFIX) {
                continue;
            }
            let path = entry.path();
            fs::remove_dir_all(&path).map_err(|e| Error::Write {
                path: path.clone(),
                source: e,
            })?;
            removed += 1;
        }

        tracing::info!(removed, root = %self.root.display(), "scratch directories removed");
        Ok(removed)
    }
}
