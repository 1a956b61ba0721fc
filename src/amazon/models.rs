//! Data models for extracted product records and run results.

use crate::extract::price::NormalizedPrice;
use serde::Serialize;

/// One product extracted from a search result card.
///
/// Field order matches the exported column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionRecord {
    /// Product title as rendered
    title: String,
    /// Price text as rendered ("0" when the card shows no price)
    price_raw: String,
    /// Detail page URL (empty when no link was found)
    url: String,
    /// Integer price derived from `price_raw`
    price: u64,
}

impl ExtractionRecord {
    /// Creates a record; the price pair always comes from one normalization.
    pub fn new(title: impl Into<String>, url: impl Into<String>, price: NormalizedPrice) -> Self {
        Self {
            title: title.into(),
            price_raw: price.raw().to_string(),
            url: url.into(),
            price: price.amount(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn price_raw(&self) -> &str {
        &self.price_raw
    }

    pub fn price(&self) -> u64 {
        self.price
    }
}

/// A card dropped during extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedCard {
    /// Zero-based position among the candidate cards
    pub index: usize,
    /// Diagnostic message
    pub reason: String,
}

/// Data-quality counters for one extraction run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionReport {
    /// Candidate cards processed
    pub candidates: usize,
    /// Cards dropped, in encounter order
    pub skipped: Vec<SkippedCard>,
    /// Records emitted with an empty url
    pub links_degraded: usize,
    /// Records emitted with the "0" price sentinel
    pub prices_degraded: usize,
}

/// Extracted records in candidate order, plus the run report.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResultSet {
    pub records: Vec<ExtractionRecord>,
    pub report: ExtractionReport,
}

impl ResultSet {
    /// Returns number of records.
    pub fn count(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no records were extracted.
    ///
    /// This is a valid terminal state, not an error.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Hands the records over to the caller.
    pub fn into_records(self) -> Vec<ExtractionRecord> {
        self.records
    }
}
