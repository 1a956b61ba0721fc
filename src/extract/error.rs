//! Per-card extraction failures and field degradations.

use serde::Serialize;
use std::fmt;

/// A fault that abandons a single product card.
///
/// These never escape the item extractor: the card is skipped and the run
/// continues with the next one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractionError {
    /// No heading-level element anywhere in the card.
    #[error("no title heading found in card")]
    NoTitle,

    /// A price element was present but its text is not a whole number.
    #[error("price text '{raw}' is not a whole number after removing '{separator}' separators")]
    InvalidPrice { raw: String, separator: char },
}

/// A field that fell back to its sentinel while the record was still emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldDegraded {
    /// No link could be resolved; `url` is empty.
    Link,
    /// No price element; `price_raw` is "0" and `price` is 0.
    Price,
}

impl fmt::Display for FieldDegraded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldDegraded::Link => write!(f, "link"),
            FieldDegraded::Price => write!(f, "price"),
        }
    }
}
