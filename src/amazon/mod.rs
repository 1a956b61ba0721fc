//! Amazon-specific modules: HTTP client, page parsing, selectors and records.

pub mod client;
pub mod models;
pub mod parser;
pub mod regions;
pub mod selectors;

pub use client::{AmazonClient, SearchSource};
pub use models::{ExtractionRecord, ExtractionReport, ResultSet, SkippedCard};
pub use parser::Parser;
pub use regions::Region;
