use std::io;
use std::path::PathBuf;

use zip::result::ZipError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("only archives can be decompressed (expected a .zip file)")]
    NotAnArchive,

    #[error("a file name is required")]
    MissingName,

    #[error("zip-slip attack detected: entry '{entry}' resolves to '{resolved}'")]
    ZipSlip { entry: PathBuf, resolved: PathBuf },

    #[error("entry path contains null byte")]
    InvalidPath,

    #[error("archive is corrupted: {0}")]
    Corrupted(String),

    #[error("archive holds {count} entries, limit is {limit}")]
    TooManyEntries { count: usize, limit: usize },

    #[error("extracted content exceeds the limit of {limit} bytes")]
    SizeLimitExceeded { limit: u64 },

    #[error("nothing was extracted")]
    NothingExtracted,

    #[error("output file was not created: {name}")]
    ArtifactMissing { name: String },

    #[error("failed to extract '{path}': {source}")]
    ExtractionFailed { path: PathBuf, source: io::Error },

    #[error("failed to create directory: {path}: {source}")]
    DirectoryCreationFailed { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Store(#[from] filepress_store::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Coarse classification callers can branch on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected before any I/O.
    Validation,
    /// The archive itself cannot be trusted; nothing of it is kept.
    ArchiveIntegrity,
    Io,
    NotFound,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotAnArchive | Self::MissingName => ErrorKind::Validation,
            Self::ZipSlip { .. }
            | Self::InvalidPath
            | Self::Corrupted(_)
            | Self::TooManyEntries { .. }
            | Self::SizeLimitExceeded { .. } => ErrorKind::ArchiveIntegrity,
            Self::Store(e) if e.is_not_found() => ErrorKind::NotFound,
            Self::NothingExtracted
            | Self::ArtifactMissing { .. }
            | Self::ExtractionFailed { .. }
            | Self::DirectoryCreationFailed { .. }
            | Self::Store(_)
            | Self::Io(_) => ErrorKind::Io,
        }
    }
}

impl From<ZipError> for Error {
    fn from(e: ZipError) -> Self {
        match e {
            ZipError::Io(e) => Self::Io(e),
            other => Self::Corrupted(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_taxonomy() {
        assert_eq!(Error::NotAnArchive.kind(), ErrorKind::Validation);
        assert_eq!(
            Error::ZipSlip {
                entry: "../x".into(),
                resolved: "/x".into()
            }
            .kind(),
            ErrorKind::ArchiveIntegrity
        );
        assert_eq!(
            Error::SizeLimitExceeded { limit: 1 }.kind(),
            ErrorKind::ArchiveIntegrity
        );
        assert_eq!(
            Error::Store(filepress_store::Error::NotFound { name: "x".into() }).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(Error::NothingExtracted.kind(), ErrorKind::Io);
    }

    #[test]
    fn zip_io_errors_stay_io() {
        let err = Error::from(ZipError::Io(io::Error::other("disk full")));
        assert_eq!(err.kind(), ErrorKind::Io);

        let err = Error::from(ZipError::InvalidArchive("bad magic".into()));
        assert_eq!(err.kind(), ErrorKind::ArchiveIntegrity);
    }
}
