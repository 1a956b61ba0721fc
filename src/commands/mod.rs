//! CLI command implementations.

pub mod extract;
pub mod search;

pub use extract::ExtractCommand;
pub use search::SearchCommand;

use crate::amazon::ResultSet;
use crate::config::Config;
use crate::format::{write_output, Formatter};
use anyhow::Result;
use tracing::{info, warn};

/// Logs the run summary and formats the records.
pub(crate) fn render(config: &Config, results: ResultSet) -> Result<String> {
    let report = &results.report;

    if results.is_empty() {
        warn!("No products extracted from {} candidate cards", report.candidates);
    } else {
        info!(
            "Extracted {} products ({} skipped, {} without link, {} without price)",
            results.count(),
            report.skipped.len(),
            report.links_degraded,
            report.prices_degraded
        );
    }

    Formatter::new(config.format).format_records(&results.into_records())
}

/// Writes output to the configured file, or stdout when none is set.
pub fn deliver(config: &Config, output: &str) -> Result<()> {
    match &config.output {
        Some(path) => write_output(path, output, config.bom),
        None => {
            println!("{}", output);
            Ok(())
        }
    }
}
