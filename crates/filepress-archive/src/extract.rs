//! Entry-by-entry zip extraction into a directory.
//!
//! Every entry name is checked against the destination before anything is
//! created for it, and content is streamed through a fixed buffer while the
//! running total is held against [`UnpackOptions::max_total_bytes`].

use std::fs::{self, File};
use std::io::{BufWriter, Cursor, Read, Write};
use std::path::Path;

use zip::ZipArchive;

use crate::entry::{Entry, EntryKind, UnpackReport};
use crate::error::{Error, Result};
use crate::options::UnpackOptions;
use crate::sanitize::sanitize_entry_path;

const BUFFER_SIZE: usize = 8 * 1024;

/// Extract an in-memory zip archive into `destination`, which must exist.
pub fn extract(data: &[u8], destination: &Path, options: &UnpackOptions) -> Result<UnpackReport> {
    let mut archive = ZipArchive::new(Cursor::new(data))?;
    if archive.len() > options.max_entries {
        return Err(Error::TooManyEntries {
            count: archive.len(),
            limit: options.max_entries,
        });
    }

    let base = fs::canonicalize(destination).map_err(|e| Error::ExtractionFailed {
        path: destination.to_path_buf(),
        source: e,
    })?;

    let mut report = UnpackReport::default();
    let mut buffer = vec![0u8; BUFFER_SIZE];

    for index in 0..archive.len() {
        let mut file = archive.by_index(index)?;
        let name = file.name().to_string();

        let sanitized = sanitize_entry_path(&name, &base).inspect_err(|e| {
            tracing::warn!(entry = %name, error = %e, "refusing archive entry");
        })?;

        if file.is_dir() {
            ensure_directory(&sanitized.resolved)?;
            report.push(Entry::new(name, sanitized.resolved, 0, EntryKind::Directory));
            continue;
        }

        let remaining = options.max_total_bytes.saturating_sub(report.total_bytes);
        let written = write_file(
            &mut file,
            &name,
            &sanitized.resolved,
            &mut buffer,
            remaining,
            options.max_total_bytes,
        )?;
        tracing::debug!(entry = %name, bytes = written, "extracted");
        report.push(Entry::new(name, sanitized.resolved, written, EntryKind::File));
    }

    Ok(report)
}

fn write_file<R: Read>(
    reader: &mut R,
    name: &str,
    target_path: &Path,
    buffer: &mut [u8],
    remaining: u64,
    limit: u64,
) -> Result<u64> {
    if let Some(parent) = target_path.parent() {
        ensure_directory(parent)?;
    }

    let file = File::create(target_path).map_err(|e| Error::ExtractionFailed {
        path: target_path.to_path_buf(),
        source: e,
    })?;
    let mut out = BufWriter::new(file);
    let mut written = 0u64;

    loop {
        let n = reader
            .read(buffer)
            .map_err(|e| Error::Corrupted(format!("entry '{name}': {e}")))?;
        if n == 0 {
            break;
        }
        written += n as u64;
        if written > remaining {
            return Err(Error::SizeLimitExceeded { limit });
        }
        out.write_all(&buffer[..n])
            .map_err(|e| Error::ExtractionFailed {
                path: target_path.to_path_buf(),
                source: e,
            })?;
    }

    out.flush().map_err(|e| Error::ExtractionFailed {
        path: target_path.to_path_buf(),
        source: e,
    })?;
    Ok(written)
}

fn ensure_directory(path: &Path) -> Result<()> {
    if !path.is_dir() {
        fs::create_dir_all(path).map_err(|e| Error::DirectoryCreationFailed {
            path: path.to_path_buf(),
            source: e,
        })?;
    }
    Ok(())
}
