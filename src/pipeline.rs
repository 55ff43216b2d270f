//! Product extraction pipeline
//!
//! Patterns first, then listing cards when enabled, then the sample catalog.
//! Every step is total, so [`ProductExtractor::extract`] always returns
//! records for a non-zero limit.

use std::sync::LazyLock;

use tracing::{debug, info, warn};

use crate::config::ScraperConfig;
use crate::error::ConfigError;
use crate::extractors::{
    combine, extract_field, extract_listing_cards, ExtractionReport, ExtractionRequest,
    ExtractionSource, FallbackCatalog, PatternList, PriceField, PriceRules, ProductRecord,
    TitleField,
};
use crate::fetch::DocumentFetcher;

static DEFAULT_EXTRACTOR: LazyLock<ProductExtractor> = LazyLock::new(ProductExtractor::default);

/// Immutable extraction tables, built once and shared across calls.
#[derive(Debug, Clone)]
pub struct ProductExtractor {
    title_patterns: PatternList,
    price_patterns: PatternList,
    title_field: TitleField,
    price_field: PriceField,
    price_placeholder: String,
    card_price_placeholder: String,
    listing_cards: bool,
    catalog: FallbackCatalog,
}

impl Default for ProductExtractor {
    fn default() -> Self {
        Self::with_patterns(
            &ScraperConfig::default(),
            PatternList::titles(),
            PatternList::prices(),
        )
    }
}

impl ProductExtractor {
    /// Build from configuration, compiling any pattern overrides.
    pub fn new(config: &ScraperConfig) -> Result<Self, ConfigError> {
        let titles = match &config.title_patterns {
            Some(sources) => PatternList::new(sources.as_slice(), true)?,
            None => PatternList::titles(),
        };
        let prices = match &config.price_patterns {
            Some(sources) => PatternList::new(sources.as_slice(), false)?,
            None => PatternList::prices(),
        };
        Ok(Self::with_patterns(config, titles, prices))
    }

    fn with_patterns(config: &ScraperConfig, titles: PatternList, prices: PatternList) -> Self {
        Self {
            title_patterns: titles,
            price_patterns: prices,
            title_field: TitleField {
                min_len: config.min_title_len,
            },
            price_field: PriceField {
                rules: PriceRules {
                    min_value: config.min_price,
                    currency: config.currency.clone(),
                },
            },
            price_placeholder: config.price_placeholder.clone(),
            card_price_placeholder: config.card_price_placeholder.clone(),
            listing_cards: config.enable_listing_cards,
            catalog: FallbackCatalog::default(),
        }
    }

    pub fn with_catalog(mut self, catalog: FallbackCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Run the full pipeline. An absent document behaves like an empty one.
    pub fn extract(&self, document: Option<&str>, request: &ExtractionRequest) -> ExtractionReport {
        let limit = request.limit;
        if limit == 0 {
            return ExtractionReport {
                source: ExtractionSource::Patterns,
                titles_found: 0,
                prices_found: 0,
                records: vec![],
            };
        }

        let document = document.unwrap_or_default();

        let titles = extract_field(document, &self.title_patterns, limit, &self.title_field);
        let prices = extract_field(document, &self.price_patterns, limit, &self.price_field);
        let (titles_found, prices_found) = (titles.len(), prices.len());
        debug!(titles = titles_found, prices = prices_found, "candidates extracted");

        let records = combine(titles, prices, limit, &self.price_placeholder);
        if !records.is_empty() {
            info!(count = records.len(), source = "patterns", "products extracted");
            return ExtractionReport {
                source: ExtractionSource::Patterns,
                titles_found,
                prices_found,
                records,
            };
        }

        if self.listing_cards {
            let records = extract_listing_cards(document, limit, &self.card_price_placeholder);
            if !records.is_empty() {
                info!(count = records.len(), source = "listing_cards", "products extracted");
                return ExtractionReport {
                    source: ExtractionSource::ListingCards,
                    titles_found,
                    prices_found,
                    records,
                };
            }
        }

        warn!(query = %request.query, "no products found in document, serving sample catalog");
        ExtractionReport {
            source: ExtractionSource::Fallback,
            titles_found,
            prices_found,
            records: self
                .catalog
                .records(&request.query, limit, &self.price_field.rules.currency),
        }
    }

    /// Records only; see [`ProductExtractor::extract`].
    pub fn extract_products(
        &self,
        document: Option<&str>,
        request: &ExtractionRequest,
    ) -> Vec<ProductRecord> {
        self.extract(document, request).records
    }
}

/// Shared extractor built from the default configuration.
pub fn default_extractor() -> &'static ProductExtractor {
    &DEFAULT_EXTRACTOR
}

/// Extract up to `request.limit` products from `document` with the default tables.
pub fn extract_products(document: &str, request: &ExtractionRequest) -> Vec<ProductRecord> {
    DEFAULT_EXTRACTOR.extract_products(Some(document), request)
}

/// Fetch the search page for `request.query` and extract from it.
///
/// Fetch failures are logged and handled as a missing document, which ends
/// in the sample catalog.
pub fn scrape<F>(
    fetcher: &F,
    extractor: &ProductExtractor,
    request: &ExtractionRequest,
) -> ExtractionReport
where
    F: DocumentFetcher + ?Sized,
{
    let document = match fetcher.fetch(&request.query) {
        Ok(html) => {
            info!(bytes = html.len(), "page downloaded");
            Some(html)
        }
        Err(e) => {
            warn!(error = %e, query = %request.query, "fetch failed");
            None
        }
    };
    extractor.extract(document.as_deref(), request)
}
