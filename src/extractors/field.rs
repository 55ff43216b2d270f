//! Pattern-ordered candidate extraction
//!
//! One routine serves every field; what differs is the [`PatternList`] and
//! the [`FieldNormalizer`] that decides whether a raw match is usable.

use tracing::debug;

use super::patterns::PatternList;
use super::price::{normalize_price, PriceRules};
use super::text::normalize_text;

/// Turns a raw pattern match into a usable value, or rejects it.
pub trait FieldNormalizer {
    /// Field name used in log events.
    fn field(&self) -> &'static str;

    fn normalize(&self, raw: &str) -> Option<String>;
}

/// Titles: normalized text with at least `min_len` characters.
#[derive(Debug, Clone)]
pub struct TitleField {
    pub min_len: usize,
}

impl Default for TitleField {
    fn default() -> Self {
        Self { min_len: 15 }
    }
}

impl FieldNormalizer for TitleField {
    fn field(&self) -> &'static str {
        "title"
    }

    fn normalize(&self, raw: &str) -> Option<String> {
        let text = normalize_text(raw);
        (!text.is_empty() && text.chars().count() >= self.min_len).then_some(text)
    }
}

/// Prices: tokens accepted by [`normalize_price`].
#[derive(Debug, Clone, Default)]
pub struct PriceField {
    pub rules: PriceRules,
}

impl FieldNormalizer for PriceField {
    fn field(&self) -> &'static str {
        "price"
    }

    fn normalize(&self, raw: &str) -> Option<String> {
        normalize_price(raw, &self.rules)
    }
}

/// Collect normalized candidates for one field.
///
/// Patterns are tried in order. Within a pattern, scanning stops once
/// `limit * 2` candidates are held; no further pattern is tried once `limit`
/// are held. Candidates keep discovery order and are not deduplicated.
pub fn extract_field<N>(
    document: &str,
    patterns: &PatternList,
    limit: usize,
    normalizer: &N,
) -> Vec<String>
where
    N: FieldNormalizer + ?Sized,
{
    let mut found = Vec::new();
    if limit == 0 {
        return found;
    }
    let need = limit.saturating_mul(2);

    for (index, pattern) in patterns.iter().enumerate() {
        let mut matches = 0usize;
        let before = found.len();

        for caps in pattern.captures_iter(document) {
            let Some(raw) = caps.get(1) else { continue };
            matches += 1;
            if let Some(value) = normalizer.normalize(raw.as_str()) {
                found.push(value);
                if found.len() >= need {
                    break;
                }
            }
        }

        debug!(
            field = normalizer.field(),
            pattern = index + 1,
            matches,
            kept = found.len() - before,
            "pattern scanned"
        );

        if found.len() >= limit {
            break;
        }
    }

    found
}
