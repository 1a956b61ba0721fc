//! Per-card extraction: title, then link, then price.

use super::error::{ExtractionError, FieldDegraded};
use super::link::resolve_link;
use super::node::CardNode;
use super::price::{read_price, PriceNormalizer};
use super::title::locate_title;
use crate::amazon::models::ExtractionRecord;
use std::fmt;
use tracing::trace;

/// Progress of a single card through extraction.
///
/// `Start -> TitleResolved -> LinkResolved -> PriceResolved -> Done`; a card
/// can be abandoned at `Start` (no title) or `LinkResolved` (bad price text).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    TitleResolved,
    LinkResolved,
    PriceResolved,
    Done,
}

impl Stage {
    /// The stage that follows this one, `None` once done.
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Start => Some(Stage::TitleResolved),
            Stage::TitleResolved => Some(Stage::LinkResolved),
            Stage::LinkResolved => Some(Stage::PriceResolved),
            Stage::PriceResolved => Some(Stage::Done),
            Stage::Done => None,
        }
    }

    fn advance(&mut self) {
        if let Some(next) = self.next() {
            trace!("{} -> {}", self, next);
            *self = next;
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Start => "start",
            Stage::TitleResolved => "title resolved",
            Stage::LinkResolved => "link resolved",
            Stage::PriceResolved => "price resolved",
            Stage::Done => "done",
        };
        write!(f, "{}", name)
    }
}

/// Why a card was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkipReason {
    /// Last stage reached before the card was abandoned
    pub stage: Stage,
    pub error: ExtractionError,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (at {})", self.error, self.stage)
    }
}

/// A record plus the fields that fell back to sentinels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    pub record: ExtractionRecord,
    pub degraded: Vec<FieldDegraded>,
}

/// Result of extracting one card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardOutcome {
    Emitted(Extracted),
    Skipped(SkipReason),
}

/// Turns one product card into a record.
///
/// A missing link or price degrades that field; a missing title or an
/// unparseable price drops the card.
#[derive(Debug, Clone)]
pub struct ItemExtractor {
    normalizer: PriceNormalizer,
    base_url: Option<String>,
}

impl ItemExtractor {
    /// Creates an extractor using the given price normalizer.
    pub fn new(normalizer: PriceNormalizer) -> Self {
        Self { normalizer, base_url: None }
    }

    /// Resolves relative links against `base_url`.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Extracts a single card. Never fails: faults become [`CardOutcome::Skipped`].
    pub fn extract<N: CardNode>(&self, card: &N) -> CardOutcome {
        let mut stage = Stage::Start;

        let title = match locate_title(card) {
            Ok(title) => title,
            Err(error) => return CardOutcome::Skipped(SkipReason { stage, error }),
        };
        trace!("Title via {}: {}", title.strategy, title.text);
        stage.advance();

        let mut degraded = Vec::new();

        let url = match resolve_link(&title.heading, card) {
            Some(link) => {
                trace!("Link via {}: {}", link.pattern, link.href);
                self.absolutize(&link.href)
            }
            None => {
                degraded.push(FieldDegraded::Link);
                String::new()
            }
        };
        stage.advance();

        let price_text = read_price(card);
        if price_text.is_none() {
            degraded.push(FieldDegraded::Price);
        }
        let price = match self.normalizer.normalize(price_text.as_deref()) {
            Ok(price) => price,
            Err(error) => return CardOutcome::Skipped(SkipReason { stage, error }),
        };
        stage.advance();

        let record = ExtractionRecord::new(title.text, url, price);
        stage.advance();
        debug_assert_eq!(stage, Stage::Done);

        CardOutcome::Emitted(Extracted { record, degraded })
    }

    /// Joins a relative href onto the base url; absolute hrefs pass through.
    fn absolutize(&self, href: &str) -> String {
        if href.starts_with("http://") || href.starts_with("https://") {
            return href.to_string();
        }
        if let Some(rest) = href.strip_prefix("//") {
            return format!("https://{}", rest);
        }

        match &self.base_url {
            Some(base) => {
                let base = base.trim_end_matches('/');
                if href.starts_with('/') {
                    format!("{}{}", base, href)
                } else {
                    format!("{}/{}", base, href)
                }
            }
            None => href.to_string(),
        }
    }
}

impl Default for ItemExtractor {
    fn default() -> Self {
        Self::new(PriceNormalizer::default())
    }
}
