use std::time::Instant;

use serde::Serialize;

const KIB: u64 = 1024;
const MIB: u64 = 1024 * 1024;

/// Outcome of one pack or unpack call.
///
/// `output_name` is present exactly when `succeeded` is true; the two
/// constructors are the only way to build a record, so that holds by
/// construction.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CompressionStats {
    original_name: String,
    original_size: u64,
    produced_size: u64,
    elapsed_millis: u64,
    output_name: Option<String>,
    succeeded: bool,
    message: String,
}

impl CompressionStats {
    pub fn success(
        original_name: impl Into<String>,
        original_size: u64,
        produced_size: u64,
        elapsed_millis: u64,
        output_name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            original_name: original_name.into(),
            original_size,
            produced_size,
            elapsed_millis,
            output_name: Some(output_name.into()),
            succeeded: true,
            message: message.into(),
        }
    }

    /// A failed outcome: zero sizes, zero time, no output.
    pub fn failure(original_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            original_name: original_name.into(),
            original_size: 0,
            produced_size: 0,
            elapsed_millis: 0,
            output_name: None,
            succeeded: false,
            message: message.into(),
        }
    }

    pub fn with_original_size(mut self, original_size: u64) -> Self {
        self.original_size = original_size;
        self
    }

    pub fn original_name(&self) -> &str {
        &self.original_name
    }

    pub fn original_size(&self) -> u64 {
        self.original_size
    }

    pub fn produced_size(&self) -> u64 {
        self.produced_size
    }

    pub fn elapsed_millis(&self) -> u64 {
        self.elapsed_millis
    }

    pub fn output_name(&self) -> Option<&str> {
        self.output_name.as_deref()
    }

    pub fn succeeded(&self) -> bool {
        self.succeeded
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Percentage saved, rounded to two decimals. Zero for empty input.
    pub fn compression_ratio(&self) -> f64 {
        if self.original_size == 0 {
            return 0.0;
        }
        let ratio = (1.0 - self.produced_size as f64 / self.original_size as f64) * 100.0;
        (ratio * 100.0).round() / 100.0
    }

    pub fn original_size_formatted(&self) -> String {
        format_size(self.original_size)
    }

    pub fn produced_size_formatted(&self) -> String {
        format_size(self.produced_size)
    }
}

/// Render a byte count as `B`, `KB` or `MB` (base 1024).
pub fn format_size(bytes: u64) -> String {
    if bytes < KIB {
        format!("{bytes} B")
    } else if bytes < MIB {
        format!("{:.2} KB", bytes as f64 / KIB as f64)
    } else {
        format!("{:.2} MB", bytes as f64 / MIB as f64)
    }
}

/// Wall-clock timer for one call.
#[derive(Clone, Copy, Debug)]
pub struct Stopwatch(Instant);

impl Stopwatch {
    pub fn start() -> Self {
        Self(Instant::now())
    }

    pub fn elapsed_millis(&self) -> u64 {
        u64::try_from(self.0.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_of_quarter_size_is_seventy_five() {
        let stats = CompressionStats::success("a", 1000, 250, 1, "a.zip", "ok");
        assert_eq!(stats.compression_ratio(), 75.0);
    }

    #[test]
    fn ratio_of_empty_input_is_zero() {
        let stats = CompressionStats::success("a", 0, 22, 1, "a.zip", "ok");
        assert_eq!(stats.compression_ratio(), 0.0);
        assert_eq!(CompressionStats::failure("a", "nope").compression_ratio(), 0.0);
    }

    #[test]
    fn ratio_rounds_to_two_decimals() {
        let stats = CompressionStats::success("a", 3, 1, 1, "a.zip", "ok");
        assert_eq!(stats.compression_ratio(), 66.67);

        // Growth shows up as a negative saving.
        let stats = CompressionStats::success("a", 100, 150, 1, "a.zip", "ok");
        assert_eq!(stats.compression_ratio(), -50.0);
    }

    #[test]
    fn output_name_tracks_success() {
        let ok = CompressionStats::success("a", 1, 1, 0, "a.zip", "ok");
        assert!(ok.succeeded());
        assert_eq!(ok.output_name(), Some("a.zip"));

        let failed = CompressionStats::failure("a", "boom").with_original_size(7);
        assert!(!failed.succeeded());
        assert_eq!(failed.output_name(), None);
        assert_eq!(failed.original_size(), 7);
        assert_eq!(failed.produced_size(), 0);
        assert_eq!(failed.message(), "boom");
    }

    #[test]
    fn sizes_use_base_1024_thresholds() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(1024), "1.00 KB");
        assert_eq!(format_size(1536), "1.50 KB");
        assert_eq!(format_size(1024 * 1024), "1.00 MB");
        assert_eq!(format_size(5 * 1024 * 1024 + 512 * 1024), "5.50 MB");
    }

    #[test]
    fn serializes_raw_fields() {
        let stats = CompressionStats::failure("x.zip", "empty");
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["original_name"], "x.zip");
        assert_eq!(json["succeeded"], false);
        assert!(json["output_name"].is_null());
    }
}
