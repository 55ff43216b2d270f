//! Product extraction modules
//!
//! Each module provides one step of turning a search-results page into
//! [`ProductRecord`]s.

mod catalog;
mod combiner;
mod css_extractor;
mod field;
mod patterns;
mod price;
mod text;

pub use catalog::*;
pub use combiner::*;
pub use css_extractor::*;
pub use field::*;
pub use patterns::*;
pub use price::*;
pub use text::*;

use serde::{Deserialize, Serialize};

/// A single search: what was asked for and how many results to keep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionRequest {
    pub query: String,
    pub limit: usize,
}

impl ExtractionRequest {
    pub fn new(query: impl Into<String>, limit: usize) -> Self {
        Self {
            query: query.into(),
            limit,
        }
    }
}

/// One extracted product. `id` is its 1-based position in the result list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: u32,
    pub title: String,
    pub price: String,
}

/// Which strategy produced the records of an [`ExtractionReport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionSource {
    /// Ordered regex patterns over the raw markup.
    Patterns,
    /// Search-result cards located with CSS selectors.
    ListingCards,
    /// Canned sample catalog; nothing usable was found in the document.
    Fallback,
}

/// Result of one extraction run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionReport {
    pub source: ExtractionSource,
    /// Title candidates kept by the pattern extractor.
    pub titles_found: usize,
    /// Price candidates kept by the pattern extractor.
    pub prices_found: usize,
    pub records: Vec<ProductRecord>,
}

/// Build records from `(title, price)` pairs, numbering them from 1.
pub(crate) fn number_records<I>(pairs: I) -> Vec<ProductRecord>
where
    I: IntoIterator<Item = (String, String)>,
{
    pairs
        .into_iter()
        .zip(1u32..)
        .map(|((title, price), id)| ProductRecord { id, title, price })
        .collect()
}
