/// Entries allowed in one archive before extraction is refused.
pub const DEFAULT_MAX_ENTRIES: usize = 10_000;

/// Cumulative decompressed bytes allowed per extraction (1 GiB).
pub const DEFAULT_MAX_TOTAL_BYTES: u64 = 1024 * 1024 * 1024;

/// Deflate level used for every archive written (maximum compression).
pub const DEFAULT_COMPRESSION_LEVEL: i64 = 9;

/// Bounds and settings for one unpack call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnpackOptions {
    pub max_entries: usize,
    pub max_total_bytes: u64,
    pub compression_level: i64,
}

impl Default for UnpackOptions {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            max_total_bytes: DEFAULT_MAX_TOTAL_BYTES,
            compression_level: DEFAULT_COMPRESSION_LEVEL,
        }
    }
}

impl UnpackOptions {
    pub fn max_entries(mut self, n: usize) -> Self {
        self.max_entries = n;
        self
    }

    pub fn max_total_bytes(mut self, bytes: u64) -> Self {
        self.max_total_bytes = bytes;
        self
    }

    /// Deflate level for the re-bundled archive, clamped to `0..=9`.
    pub fn compression_level(mut self, level: i64) -> Self {
        self.compression_level = clamp_level(level);
        self
    }
}

pub(crate) fn clamp_level(level: i64) -> i64 {
    level.clamp(0, 9)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let options = UnpackOptions::default()
            .max_entries(3)
            .max_total_bytes(1024)
            .compression_level(42);
        assert_eq!(options.max_entries, 3);
        assert_eq!(options.max_total_bytes, 1024);
        assert_eq!(options.compression_level, 9);
        assert_eq!(UnpackOptions::default().compression_level(-1).compression_level, 0);
    }
}
