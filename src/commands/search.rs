//! Search command implementation.

use crate::amazon::{AmazonClient, Parser, SearchSource};
use crate::config::Config;
use anyhow::{Context, Result};
use tracing::info;

/// Fetches a live search page and extracts its leading products.
pub struct SearchCommand {
    config: Config,
}

impl SearchCommand {
    /// Creates a new search command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Executes the search and returns formatted output.
    pub async fn execute(&self, keyword: &str) -> Result<String> {
        let client =
            AmazonClient::new(&self.config).await.context("Failed to create HTTP client")?;

        self.execute_with_source(&client, keyword).await
    }

    /// Executes the search with a provided page source (for testing).
    pub async fn execute_with_source(
        &self,
        source: &impl SearchSource,
        keyword: &str,
    ) -> Result<String> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            anyhow::bail!("Search keyword must not be empty");
        }

        info!("Searching for: {}", keyword);

        let html = source.search(keyword).await?;
        let parser = Parser::new(source.region(), self.config.max_results);
        let results = parser
            .parse_search(&html)
            .with_context(|| format!("Search page for '{}' is not usable", keyword))?;

        super::render(&self.config, results)
    }
}
