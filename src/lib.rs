//! amz-harvest - Extract product records from Amazon search result pages
//!
//! Finds each result card's title, detail-page link and price, tolerating
//! the several markup variants Amazon serves, and exports a clean table.

pub mod amazon;
pub mod commands;
pub mod config;
pub mod extract;
pub mod format;

pub use amazon::models::{ExtractionRecord, ExtractionReport, ResultSet};
pub use amazon::regions::Region;
pub use config::Config;
pub use extract::{CardOutcome, ItemExtractor, ResultAggregator};
