//! HTML parser for Amazon search result pages.

use crate::amazon::models::ResultSet;
use crate::amazon::regions::Region;
use crate::amazon::selectors::{errors, search};
use crate::extract::{ItemExtractor, PriceNormalizer, ResultAggregator};
use anyhow::Result;
use scraper::Html;
use tracing::debug;

/// Parser for Amazon search result pages.
pub struct Parser {
    extractor: ItemExtractor,
    max_results: usize,
}

impl Parser {
    /// Creates a parser for the given region, keeping at most `max_results` cards.
    pub fn new(region: Region, max_results: usize) -> Self {
        let extractor = ItemExtractor::new(PriceNormalizer::new(region.thousands_separator()))
            .with_base_url(region.base_url());
        Self { extractor, max_results }
    }

    /// Parses search results HTML into extracted records.
    ///
    /// Only a blocked or error page fails; individual bad cards are skipped.
    pub fn parse_search(&self, html: &str) -> Result<ResultSet> {
        let document = Html::parse_document(html);

        // Check for error pages first
        self.check_for_errors(&document)?;

        let cards = document.select(&search::RESULT);
        let results = ResultAggregator::new(&self.extractor, self.max_results).collect(cards);

        debug!(
            "Parsed {} records from {} candidate cards (limit {})",
            results.count(),
            results.report.candidates,
            self.max_results
        );

        Ok(results)
    }

    /// Checks for CAPTCHA or Amazon error pages.
    fn check_for_errors(&self, document: &Html) -> Result<()> {
        if document.select(&errors::CAPTCHA).next().is_some() {
            anyhow::bail!(
                "CAPTCHA detected. Amazon is blocking requests. \
                Try using a proxy or waiting before retrying."
            );
        }

        // Dog page (503 error page)
        if document.select(&errors::DOG_PAGE).next().is_some() {
            anyhow::bail!(
                "Amazon error page detected (503). \
                The service may be temporarily unavailable."
            );
        }

        Ok(())
    }
}
