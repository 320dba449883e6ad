use std::fs::{self, File};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::naming::{TEMP_PREFIX, TEMP_SUFFIX};

/// An artifact being written.
///
/// Content goes to a hidden temporary file next to the final location and is
/// published under its real name by [`PendingArtifact::commit`], so readers
/// never observe a half-written archive. Dropping without committing removes
/// the temporary file.
#[derive(Debug)]
pub struct PendingArtifact {
    file: File,
    tmp_path: PathBuf,
    target: PathBuf,
}

impl PendingArtifact {
    pub(crate) fn create(root: &Path, target: PathBuf) -> Result<Self> {
        let tmp_path = root.join(format!(
            "{}{}{}",
            TEMP_PREFIX,
            uuid::Uuid::new_v4().simple(),
            TEMP_SUFFIX
        ));
        let file = File::create(&tmp_path).map_err(|e| Error::Write {
            path: tmp_path.clone(),
            source: e,
        })?;

        Ok(Self {
            file,
            tmp_path,
            target,
        })
    }

    /// Writable handle to the temporary file.
    pub fn writer(&mut self) -> &mut File {
        &mut self.file
    }

    /// Final location the artifact will have once committed.
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Flush to disk and atomically move into place.
    pub fn commit(mut self) -> Result<PathBuf> {
        self.file.sync_all().map_err(|e| Error::Write {
            path: self.tmp_path.clone(),
            source: e,
        })?;

        fs::rename(&self.tmp_path, &self.target).map_err(|e| Error::Write {
            path: self.target.clone(),
            source: e,
        })?;

        tracing::debug!(artifact = %self.target.display(), "artifact committed");
        Ok(std::mem::take(&mut self.target))
    }
}

impl Drop for PendingArtifact {
    fn drop(&mut self) {
        // After a successful commit the temporary no longer exists.
        if self.tmp_path.exists() {
            let _ = fs::remove_file(&self.tmp_path);
        }
    }
}
