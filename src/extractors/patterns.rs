//! Ordered regex tables for locating titles and prices
//!
//! Earlier patterns are preferred. Each pattern must capture the field value
//! in group 1.

use regex::{Regex, RegexBuilder};

use crate::error::ConfigError;

/// Title patterns, tried in order. Case-insensitive, `.` spans newlines.
pub const DEFAULT_TITLE_PATTERNS: &[&str] = &[
    r#"<h2[^>]*class="[^"]*ui-search-item__title[^"]*"[^>]*>([^<]{15,120})</h2>"#,
    r#"<a[^>]*class="[^"]*ui-search-link[^"]*"[^>]*title="([^"]{15,120})""#,
    r#"<li[^>]*class="[^"]*ui-search-layout__item[^"]*"[^>]*>.*?<h2[^>]*>([^<]{15,120})</h2>"#,
    r#"<div[^>]*class="[^"]*ui-search-item__title[^"]*"[^>]*>([^<]{15,120})</div>"#,
    r#"<span[^>]*class="[^"]*ui-search-item__title[^"]*"[^>]*>([^<]{15,120})</span>"#,
];

/// Price patterns, tried in order. Case-insensitive, `.` stops at newlines.
pub const DEFAULT_PRICE_PATTERNS: &[&str] = &[
    r#"<span[^>]*class="[^"]*price-tag-fraction[^"]*"[^>]*>([\d.]+(?:,\d{2})?)</span>"#,
    r#"<div[^>]*class="[^"]*price-tag[^"]*"[^>]*>.*?([\d.]+(?:,\d{2})?)</div>"#,
    r#"<span[^>]*class="[^"]*price-tag[^"]*"[^>]*>.*?([\d.]+(?:,\d{2})?)</span>"#,
    r#"<span[^>]*>.*?\$\s*([\d.]+(?:,\d{2})?)</span>"#,
    r#"price-tag[^>]*>.*?([\d.]+(?:,\d{2})?)"#,
];

/// An ordered, compiled list of extraction patterns for one field.
#[derive(Debug, Clone)]
pub struct PatternList {
    patterns: Vec<Regex>,
}

impl PatternList {
    /// Compile `sources` case-insensitively. `dot_all` lets `.` match newlines.
    pub fn new<S: AsRef<str>>(sources: &[S], dot_all: bool) -> Result<Self, ConfigError> {
        let patterns = sources
            .iter()
            .map(|source| {
                let source = source.as_ref();
                let regex = RegexBuilder::new(source)
                    .case_insensitive(true)
                    .dot_matches_new_line(dot_all)
                    .build()
                    .map_err(|e| ConfigError::Pattern {
                        pattern: source.to_string(),
                        source: e,
                    })?;
                if regex.captures_len() < 2 {
                    return Err(ConfigError::MissingCapture {
                        pattern: source.to_string(),
                    });
                }
                Ok(regex)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Built-in title patterns.
    pub fn titles() -> Self {
        Self::new(DEFAULT_TITLE_PATTERNS, true).expect("built-in title patterns compile")
    }

    /// Built-in price patterns.
    pub fn prices() -> Self {
        Self::new(DEFAULT_PRICE_PATTERNS, false).expect("built-in price patterns compile")
    }

    pub fn iter(&self) -> impl Iterator<Item = &Regex> {
        self.patterns.iter()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
