use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use filepress_store::{OutputStore, final_segment};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{Error, Result};
use crate::options::{DEFAULT_COMPRESSION_LEVEL, clamp_level};
use crate::stats::{CompressionStats, Stopwatch};

/// Writes archives into an [`OutputStore`].
#[derive(Clone, Debug)]
pub struct Packer {
    store: OutputStore,
    compression_level: i64,
}

impl Packer {
    pub fn new(store: OutputStore) -> Self {
        Self {
            store,
            compression_level: DEFAULT_COMPRESSION_LEVEL,
        }
    }

    /// Deflate level, clamped to `0..=9`. Level 0 stores entries uncompressed.
    pub fn compression_level(mut self, level: i64) -> Self {
        self.compression_level = clamp_level(level);
        self
    }

    /// Wrap `data` into `<name>.zip` holding a single entry.
    ///
    /// Never fails past this boundary: problems are reported in the
    /// returned record.
    pub fn pack(&self, original_name: &str, data: &[u8]) -> CompressionStats {
        let watch = Stopwatch::start();

        let Some(name) = sanitize_name(original_name) else {
            tracing::warn!(original_name, "rejected pack without a usable file name");
            return CompressionStats::failure("", Error::MissingName.to_string());
        };

        match self.write_single(&name, data) {
            Ok((output_name, produced_size)) => {
                let stats = CompressionStats::success(
                    &name,
                    data.len() as u64,
                    produced_size,
                    watch.elapsed_millis(),
                    output_name,
                    "File compressed successfully!",
                );
                tracing::info!(
                    file = %name,
                    original = stats.original_size(),
                    compressed = stats.produced_size(),
                    ratio = stats.compression_ratio(),
                    millis = stats.elapsed_millis(),
                    "packed"
                );
                stats
            }
            Err(e) => {
                tracing::warn!(file = %name, error = %e, "pack failed");
                CompressionStats::failure(name, format!("Compression failed: {e}"))
            }
        }
    }

    fn write_single(&self, name: &str, data: &[u8]) -> Result<(String, u64)> {
        let output_name = format!("{name}.zip");

        let mut artifact = self.store.create_artifact(&output_name)?;
        {
            let mut zip = ZipWriter::new(BufWriter::new(artifact.writer()));
            zip.start_file(name, self.file_options())?;
            zip.write_all(data)?;
            zip.finish()?.flush()?;
        }
        artifact.commit()?;

        // Measure what actually landed on disk.
        let produced_size = self.store.size_of(&output_name).map_err(|e| {
            if e.is_not_found() {
                Error::ArtifactMissing {
                    name: output_name.clone(),
                }
            } else {
                Error::Store(e)
            }
        })?;

        Ok((output_name, produced_size))
    }

    /// Re-bundle every file under `dir` into one archive named `output_name`.
    ///
    /// Entry names are paths relative to `dir`, `/`-separated. Directories
    /// are walked with an explicit stack in sorted order, so arbitrarily deep
    /// trees do not grow the call stack and output is deterministic. Returns
    /// the number of files written.
    pub fn bundle_dir(&self, dir: &Path, output_name: &str) -> Result<usize> {
        let top = sorted_children(dir).map_err(|_| Error::NothingExtracted)?;
        if top.is_empty() {
            return Err(Error::NothingExtracted);
        }

        let mut artifact = self.store.create_artifact(output_name)?;
        let mut files = 0;
        {
            let mut zip = ZipWriter::new(BufWriter::new(artifact.writer()));

            // Reversed so that pops come out in sorted order.
            let mut stack: Vec<(PathBuf, String)> = top.into_iter().rev().collect();
            while let Some((path, name)) = stack.pop() {
                let file_type = fs::symlink_metadata(&path)?.file_type();
                if file_type.is_dir() {
                    for (child, child_name) in sorted_children(&path)?.into_iter().rev() {
                        stack.push((child, format!("{name}/{child_name}")));
                    }
                } else if file_type.is_file() {
                    zip.start_file(name.as_str(), self.file_options())?;
                    let mut source = File::open(&path)?;
                    io::copy(&mut source, &mut zip)?;
                    files += 1;
                    tracing::debug!(entry = %name, "bundled");
                }
            }

            zip.finish()?.flush()?;
        }
        artifact.commit()?;

        Ok(files)
    }

    fn file_options(&self) -> SimpleFileOptions {
        // The deflate encoder has no level 0.
        if self.compression_level == 0 {
            return SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        }
        SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(self.compression_level))
    }
}

/// Final path segment of `original_name` with spaces replaced by `_`, so the
/// artifact name can be embedded in a URL as is.
pub fn sanitize_name(original_name: &str) -> Option<String> {
    final_segment(original_name).map(|name| name.replace(' ', "_"))
}

fn sorted_children(dir: &Path) -> io::Result<Vec<(PathBuf, String)>> {
    let mut children = fs::read_dir(dir)?
        .map(|entry| {
            entry.map(|e| (e.path(), e.file_name().to_string_lossy().into_owned()))
        })
        .collect::<io::Result<Vec<_>>>()?;
    children.sort_by(|a, b| a.1.cmp(&b.1));
    Ok(children)
}
