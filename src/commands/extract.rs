//! Extraction from a saved search page.

use crate::amazon::Parser;
use crate::config::Config;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

/// Runs the extraction pipeline over an HTML snapshot on disk.
pub struct ExtractCommand {
    config: Config,
}

impl ExtractCommand {
    /// Creates a new extract command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Reads the snapshot and returns formatted output.
    pub fn execute(&self, snapshot: &Path) -> Result<String> {
        info!("Extracting from snapshot: {}", snapshot.display());

        let html = std::fs::read_to_string(snapshot)
            .with_context(|| format!("Failed to read snapshot: {}", snapshot.display()))?;

        let parser = Parser::new(self.config.region, self.config.max_results);
        let results = parser.parse_search(&html)?;

        super::render(&self.config, results)
    }
}
