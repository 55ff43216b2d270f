//! CSS selector-based extraction of search-result cards
//!
//! Uses the scraper crate to walk storefronts that mark each result with
//! `data-component-type="s-search-result"`.

use scraper::{ElementRef, Html, Selector};

use super::text::normalize_text;
use super::{number_records, ProductRecord};

pub const CARD_SELECTOR: &str = r#"div[data-component-type="s-search-result"]"#;
pub const CARD_TITLE_SELECTOR: &str = "h2";
pub const CARD_PRICE_SELECTOR: &str = "span.a-price-whole";

/// Extract products from the first `limit` result cards.
///
/// Cards without a title are skipped; cards without a price get
/// `placeholder`.
pub fn extract_listing_cards(html: &str, limit: usize, placeholder: &str) -> Vec<ProductRecord> {
    if limit == 0 {
        return vec![];
    }

    let document = Html::parse_document(html);

    let (card_sel, title_sel, price_sel) = match (
        Selector::parse(CARD_SELECTOR),
        Selector::parse(CARD_TITLE_SELECTOR),
        Selector::parse(CARD_PRICE_SELECTOR),
    ) {
        (Ok(c), Ok(t), Ok(p)) => (c, t, p),
        _ => return vec![],
    };

    let pairs = document.select(&card_sel).take(limit).filter_map(|el| {
        let title = first_text(&el, &title_sel).map(|t| normalize_text(&t))?;
        if title.is_empty() {
            return None;
        }
        let price = first_text(&el, &price_sel)
            .filter(|p| !p.is_empty())
            .map(|p| format!("${p}"))
            .unwrap_or_else(|| placeholder.to_string());
        Some((title, price))
    });

    number_records(pairs)
}

/// Text content of the first descendant matching `selector`.
fn first_text(el: &ElementRef<'_>, selector: &Selector) -> Option<String> {
    el.select(selector)
        .next()
        .map(|e| e.text().collect::<String>().trim().to_string())
}
