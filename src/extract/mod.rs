//! Per-card product extraction.
//!
//! [`ResultAggregator`] walks the candidate cards; [`ItemExtractor`] turns
//! each card into a record using the title locator, link resolver and price
//! normalizer.

pub mod aggregate;
pub mod error;
pub mod item;
pub mod link;
pub mod node;
pub mod price;
pub mod title;

pub use aggregate::ResultAggregator;
pub use error::{ExtractionError, FieldDegraded};
pub use item::{CardOutcome, Extracted, ItemExtractor, SkipReason, Stage};
pub use link::{LinkPattern, ResolvedLink};
pub use node::CardNode;
pub use price::{NormalizedPrice, PriceNormalizer};
pub use title::{LocatedTitle, TitleStrategy};
