use std::fs;
use std::path::Path;

use filepress_store::{OutputStore, final_segment, stamp};

use crate::entry::UnpackReport;
use crate::error::{Error, Result};
use crate::extract::extract;
use crate::options::UnpackOptions;
use crate::pack::Packer;
use crate::stats::{CompressionStats, Stopwatch};

/// The only container suffix accepted for unpacking.
pub const ARCHIVE_SUFFIX: &str = ".zip";

/// Message reported when an archive holds no files.
pub const EMPTY_ARCHIVE_MESSAGE: &str = "the archive appears to be empty";

/// Extracts uploaded archives into a scratch directory of an
/// [`OutputStore`] and re-bundles the result as a single archive.
#[derive(Clone, Debug)]
pub struct Unpacker {
    store: OutputStore,
    options: UnpackOptions,
}

enum Outcome {
    Bundled {
        output_name: String,
        report: UnpackReport,
    },
    Empty,
}

impl Unpacker {
    pub fn new(store: OutputStore) -> Self {
        Self {
            store,
            options: UnpackOptions::default(),
        }
    }

    pub fn with_options(mut self, options: UnpackOptions) -> Self {
        self.options = options;
        self
    }

    /// Unpack `data` and re-bundle its files.
    ///
    /// Validates the name, extracts into a fresh scratch directory, then
    /// writes `decompressed_<name>_<stamp>.zip`. Every failure, including a
    /// refused entry, is reported in the returned record rather than raised.
    pub fn unpack(&self, archive_name: &str, data: &[u8]) -> CompressionStats {
        let watch = Stopwatch::start();
        let name = final_segment(archive_name).unwrap_or_default();

        if !is_archive_name(name) {
            tracing::warn!(archive = archive_name, "rejected unpack of a non-archive");
            return CompressionStats::failure(name, Error::NotAnArchive.to_string());
        }

        match self.run(name, data) {
            Ok(Outcome::Bundled {
                output_name,
                report,
            }) => {
                let stats = CompressionStats::success(
                    name,
                    data.len() as u64,
                    report.total_bytes,
                    watch.elapsed_millis(),
                    output_name,
                    format!("Extracted {} file(s) successfully!", report.file_count),
                );
                tracing::info!(
                    archive = name,
                    files = report.file_count,
                    extracted = report.total_bytes,
                    output = stats.output_name().unwrap_or_default(),
                    millis = stats.elapsed_millis(),
                    "unpacked"
                );
                stats
            }
            Ok(Outcome::Empty) => {
                tracing::info!(archive = name, "archive holds no files");
                CompressionStats::failure(name, EMPTY_ARCHIVE_MESSAGE)
                    .with_original_size(data.len() as u64)
            }
            Err(e) => {
                tracing::warn!(archive = name, kind = ?e.kind(), error = %e, "unpack failed");
                CompressionStats::failure(name, format!("Decompression failed: {e}"))
            }
        }
    }

    /// Extract `data` into `destination` without re-bundling.
    ///
    /// This is the typed-error path underneath [`Unpacker::unpack`].
    pub fn extract(&self, data: &[u8], destination: &Path) -> Result<UnpackReport> {
        extract(data, destination, &self.options)
    }

    fn run(&self, name: &str, data: &[u8]) -> Result<Outcome> {
        let scratch = self.store.new_scratch_dir()?;
        let report = match self.extract(data, &scratch) {
            Ok(report) => report,
            Err(e) => {
                // Nothing from a refused archive is kept.
                let _ = fs::remove_dir_all(&scratch);
                return Err(e);
            }
        };

        if report.is_empty() {
            return Ok(Outcome::Empty);
        }

        let output_name = format!("decompressed_{}_{}.zip", name.replace(' ', "_"), stamp());
        Packer::new(self.store.clone())
            .compression_level(self.options.compression_level)
            .bundle_dir(&scratch, &output_name)?;

        Ok(Outcome::Bundled {
            output_name,
            report,
        })
    }
}

/// Whether `name` carries the archive suffix, ignoring case.
pub fn is_archive_name(name: &str) -> bool {
    name.to_ascii_lowercase().ends_with(ARCHIVE_SUFFIX)
}
