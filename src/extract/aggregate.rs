//! Applies item extraction across the candidate cards of a page.

use super::error::FieldDegraded;
use super::item::{CardOutcome, ItemExtractor};
use super::node::CardNode;
use crate::amazon::models::{ResultSet, SkippedCard};
use tracing::{debug, trace, warn};

/// Collects records from at most `limit` cards, in order.
pub struct ResultAggregator<'e> {
    extractor: &'e ItemExtractor,
    limit: usize,
}

impl<'e> ResultAggregator<'e> {
    /// Creates an aggregator over the first `limit` candidates.
    pub fn new(extractor: &'e ItemExtractor, limit: usize) -> Self {
        Self { extractor, limit }
    }

    /// Extracts every candidate card, isolating per-card failures.
    ///
    /// Skipped cards contribute nothing. An empty result is a valid outcome.
    pub fn collect<N, I>(&self, cards: I) -> ResultSet
    where
        N: CardNode,
        I: IntoIterator<Item = N>,
    {
        let mut results = ResultSet::default();

        for (index, card) in cards.into_iter().take(self.limit).enumerate() {
            results.report.candidates += 1;

            match self.extractor.extract(&card) {
                CardOutcome::Emitted(extracted) => {
                    for field in &extracted.degraded {
                        debug!("Card {}: {} missing, using sentinel", index, field);
                        match field {
                            FieldDegraded::Link => results.report.links_degraded += 1,
                            FieldDegraded::Price => results.report.prices_degraded += 1,
                        }
                    }
                    trace!(
                        "Card {}: {} / {}",
                        index,
                        extracted.record.title(),
                        extracted.record.price_raw()
                    );
                    results.records.push(extracted.record);
                }
                CardOutcome::Skipped(reason) => {
                    warn!("Skipping card {}: {}", index, reason);
                    results.report.skipped.push(SkippedCard { index, reason: reason.to_string() });
                }
            }
        }

        debug!(
            "Extracted {} of {} cards ({} skipped)",
            results.count(),
            results.report.candidates,
            results.report.skipped.len()
        );

        results
    }
}
