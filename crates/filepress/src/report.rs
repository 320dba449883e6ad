use std::io::Write;

use filepress_archive::CompressionStats;
use serde::Serialize;

/// JSON shape of a stats record: the raw fields plus the derived ones.
#[derive(Serialize)]
struct StatsView<'a> {
    #[serde(flatten)]
    stats: &'a CompressionStats,
    compression_ratio: f64,
    original_size_formatted: String,
    produced_size_formatted: String,
}

impl<'a> From<&'a CompressionStats> for StatsView<'a> {
    fn from(stats: &'a CompressionStats) -> Self {
        Self {
            stats,
            compression_ratio: stats.compression_ratio(),
            original_size_formatted: stats.original_size_formatted(),
            produced_size_formatted: stats.produced_size_formatted(),
        }
    }
}

pub fn write_stats(out: &mut impl Write, stats: &CompressionStats, json: bool) -> anyhow::Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, &StatsView::from(stats))?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "{}", stats.message())?;
    writeln!(out, "  file:      {}", stats.original_name())?;
    if stats.succeeded() {
        writeln!(out, "  original:  {}", stats.original_size_formatted())?;
        writeln!(out, "  produced:  {}", stats.produced_size_formatted())?;
        writeln!(out, "  ratio:     {:.2}%", stats.compression_ratio())?;
        writeln!(out, "  time:      {} ms", stats.elapsed_millis())?;
    }
    if let Some(output) = stats.output_name() {
        writeln!(out, "  output:    {output}")?;
    }
    Ok(())
}

pub fn write_names(out: &mut impl Write, names: &[String], json: bool) -> anyhow::Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, names)?;
        writeln!(out)?;
    } else {
        for name in names {
            writeln!(out, "{name}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(stats: &CompressionStats, json: bool) -> String {
        let mut out = Vec::new();
        write_stats(&mut out, stats, json).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn json_carries_derived_fields() {
        let stats = CompressionStats::success("a.txt", 2048, 512, 3, "a.txt.zip", "File compressed successfully!");
        let value: serde_json::Value = serde_json::from_str(&render(&stats, true)).unwrap();

        assert_eq!(value["original_name"], "a.txt");
        assert_eq!(value["output_name"], "a.txt.zip");
        assert_eq!(value["compression_ratio"], 75.0);
        assert_eq!(value["original_size_formatted"], "2.00 KB");
        assert_eq!(value["produced_size_formatted"], "512 B");
    }

    #[test]
    fn text_for_failure_omits_sizes() {
        let stats = CompressionStats::failure("x.png", "nope");
        let text = render(&stats, false);
        assert!(text.starts_with("nope\n"));
        assert!(text.contains("x.png"));
        assert!(!text.contains("ratio"));
        assert!(!text.contains("output"));
    }

    #[test]
    fn text_for_success_lists_output() {
        let stats = CompressionStats::success("a.txt", 1000, 250, 1, "a.txt.zip", "ok");
        let text = render(&stats, false);
        assert!(text.contains("ratio:     75.00%"));
        assert!(text.contains("output:    a.txt.zip"));
    }

    #[test]
    fn names_as_json_array() {
        let mut out = Vec::new();
        write_names(&mut out, &["a.zip".to_string(), "b.zip".to_string()], true).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value, serde_json::json!(["a.zip", "b.zip"]));
    }
}
