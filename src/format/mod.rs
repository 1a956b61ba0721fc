//! Output formatting for extracted records (CSV, JSON, table) and file export.

use crate::amazon::ExtractionRecord;
use crate::config::OutputFormat;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

/// Column order of the CSV export.
pub const CSV_HEADER: &str = "title,price_raw,url,price";

const UTF8_BOM: &str = "\u{feff}";

/// Formats records for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats records in order.
    pub fn format_records(&self, records: &[ExtractionRecord]) -> Result<String> {
        if records.is_empty() {
            return Ok(match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Csv => CSV_HEADER.to_string(),
                OutputFormat::Table => "No products found.".to_string(),
            });
        }

        match self.format {
            OutputFormat::Csv => Ok(self.csv_records(records)),
            OutputFormat::Json => self.json_records(records),
            OutputFormat::Table => Ok(self.table_records(records)),
        }
    }

    fn json_records(&self, records: &[ExtractionRecord]) -> Result<String> {
        serde_json::to_string_pretty(records).context("Failed to serialize records as JSON")
    }

    fn table_records(&self, records: &[ExtractionRecord]) -> String {
        let price_width = 10;
        let raw_width = 12;
        let title_width = 50;

        let mut lines = Vec::new();

        lines.push(format!(
            "{:>price_width$}  {:<raw_width$}  {:<title_width$}  {}",
            "Price", "Raw", "Title", "URL"
        ));
        lines.push(format!(
            "{:->price_width$}  {:-<raw_width$}  {:-<title_width$}  {:-<3}",
            "", "", "", ""
        ));

        for record in records {
            let url = if record.url().is_empty() { "-" } else { record.url() };
            lines.push(format!(
                "{:>price_width$}  {:<raw_width$}  {:<title_width$}  {}",
                record.price(),
                record.price_raw(),
                truncate(record.title(), title_width),
                url
            ));
        }

        lines.push(String::new());
        lines.push(format!("Total: {} products", records.len()));

        lines.join("\n")
    }

    fn csv_records(&self, records: &[ExtractionRecord]) -> String {
        let mut lines = Vec::with_capacity(records.len() + 1);
        lines.push(CSV_HEADER.to_string());

        for record in records {
            lines.push(format!(
                "{},{},{},{}",
                Self::csv_escape(record.title()),
                Self::csv_escape(record.price_raw()),
                Self::csv_escape(record.url()),
                record.price()
            ));
        }

        lines.join("\n")
    }

    fn csv_escape(s: &str) -> String {
        if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }
}

/// Shortens `text` to `width` characters, marking the cut with "...".
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", kept)
}

/// Writes formatted output to `path` as UTF-8, optionally behind a BOM.
pub fn write_output(path: &Path, content: &str, bom: bool) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let mut data = String::with_capacity(content.len() + UTF8_BOM.len() + 1);
    if bom {
        data.push_str(UTF8_BOM);
    }
    data.push_str(content);
    data.push('\n');

    std::fs::write(path, data)
        .with_context(|| format!("Failed to write output file: {}", path.display()))?;

    info!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{NormalizedPrice, PriceNormalizer};

    fn make_record(title: &str, url: &str, raw: &str) -> ExtractionRecord {
        let price = PriceNormalizer::default().normalize(Some(raw)).unwrap();
        ExtractionRecord::new(title, url, price)
    }

    fn make_records() -> Vec<ExtractionRecord> {
        vec![
            make_record("Widget Pro", "https://x/1", "1,234"),
            ExtractionRecord::new("Bare", "", NormalizedPrice::missing()),
        ]
    }

    #[test]
    fn test_csv_output() {
        let output = Formatter::new(OutputFormat::Csv).format_records(&make_records()).unwrap();
        let lines: Vec<_> = output.lines().collect();

        assert_eq!(lines[0], "title,price_raw,url,price");
        assert_eq!(lines[1], r#"Widget Pro,"1,234",https://x/1,1234"#);
        assert_eq!(lines[2], "Bare,0,,0");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_csv_escaping() {
        let record = make_record(r#"Cable 2m, "braided""#, "https://x/2", "980");
        let output = Formatter::new(OutputFormat::Csv).format_records(&[record]).unwrap();
        assert!(output.contains(r#""Cable 2m, ""braided""",980,https://x/2,980"#));
    }

    #[test]
    fn test_empty_outputs() {
        let empty = |format| Formatter::new(format).format_records(&[]).unwrap();
        assert_eq!(empty(OutputFormat::Csv), CSV_HEADER);
        assert_eq!(empty(OutputFormat::Json), "[]");
        assert_eq!(empty(OutputFormat::Table), "No products found.");
    }

    #[test]
    fn test_json_output() {
        let output = Formatter::new(OutputFormat::Json).format_records(&make_records()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed[0]["title"], "Widget Pro");
        assert_eq!(parsed[0]["price_raw"], "1,234");
        assert_eq!(parsed[0]["price"], 1234);
        assert_eq!(parsed[1]["url"], "");
        assert_eq!(parsed[1]["price"], 0);
    }

    #[test]
    fn test_table_output() {
        let output = Formatter::new(OutputFormat::Table).format_records(&make_records()).unwrap();
        assert!(output.contains("Price"));
        assert!(output.contains("Widget Pro"));
        assert!(output.contains("https://x/1"));
        assert!(output.contains("Total: 2 products"));
    }

    #[test]
    fn test_truncate_is_char_safe() {
        assert_eq!(truncate("short", 10), "short");
        let long = "Python プログラミング 完全入門ガイド 第3版";
        let cut = truncate(long, 10);
        assert_eq!(cut.chars().count(), 10);
        assert!(cut.ends_with("..."));
    }

    #[test]
    fn test_write_output_with_bom() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("products.csv");

        write_output(&path, "title,price_raw,url,price", true).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..3], &[0xEF, 0xBB, 0xBF]);
        assert_eq!(&bytes[3..], b"title,price_raw,url,price\n");
    }

    #[test]
    fn test_write_output_without_bom() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");

        write_output(&path, "[]", false).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]\n");
    }
}
