//! Storefront search-results parser
//!
//! Extracts `{id, title, price}` product records from storefront HTML:
//! - Ordered regex patterns for titles and prices, paired by position
//! - CSS selector walk over search-result cards
//! - Query-keyed sample catalog when nothing usable is found
//!
//! Plus a blocking fetcher, console/JSON rendering and an FFI interface.

pub mod config;
pub mod error;
pub mod extractors;
pub mod ffi;
pub mod fetch;
pub mod frequency;
pub mod pipeline;
pub mod present;
pub mod robots;

pub use config::ScraperConfig;
pub use error::{ConfigError, FetchError};
pub use extractors::{ExtractionReport, ExtractionRequest, ExtractionSource, ProductRecord};
pub use fetch::{DocumentFetcher, HttpFetcher};
pub use ffi::*;
pub use pipeline::{extract_products, scrape, ProductExtractor};
