use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("output directory '{path}' is unavailable: {source}")]
    StorageUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("artifact not found: {name}")]
    NotFound { name: String },

    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Error {
    /// Whether the error means "never existed" rather than a disk failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Map a read-side io error, keeping `NotFound` distinct.
pub(crate) fn read_error(name: &str, path: PathBuf, err: std::io::Error) -> Error {
    match err.kind() {
        std::io::ErrorKind::NotFound => Error::NotFound {
            name: name.to_string(),
        },
        _ => Error::Read { path, source: err },
    }
}
