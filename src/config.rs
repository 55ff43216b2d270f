//! Scraper configuration
//!
//! Loaded from a JSON file (every key optional) and then overlaid with
//! `STOREFRONT_*` environment variables.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "STOREFRONT_";

/// Default storefront search host.
pub const DEFAULT_BASE_URL: &str = "https://listado.mercadolibre.com.co";

/// Browser user agents rotated across requests.
pub const DEFAULT_USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:109.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
];

/// Inclusive range for the randomized delay before each request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayRange {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl Default for DelayRange {
    fn default() -> Self {
        Self {
            min_ms: 1000,
            max_ms: 3000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Search host; the query is appended as a path segment and `?q=`.
    pub base_url: String,
    /// Default number of products per search.
    pub limit: usize,
    /// Shortest normalized title (in characters) kept as a candidate.
    pub min_title_len: usize,
    /// Smallest numeric price accepted; smaller values are usually ids or ratings.
    pub min_price: f64,
    /// Currency code appended to formatted prices.
    pub currency: String,
    /// Price shown for titles that could not be paired with a price.
    pub price_placeholder: String,
    /// Price shown for listing cards without a price element.
    pub card_price_placeholder: String,
    /// Replaces the built-in title patterns when set.
    pub title_patterns: Option<Vec<String>>,
    /// Replaces the built-in price patterns when set.
    pub price_patterns: Option<Vec<String>>,
    /// Try the listing-card strategy when the patterns find nothing. Off by
    /// default, so an empty pattern result goes straight to the catalog.
    pub enable_listing_cards: bool,
    pub user_agents: Vec<String>,
    pub timeout_secs: u64,
    /// `None` disables the pre-request delay.
    pub delay_ms: Option<DelayRange>,
    pub respect_robots: bool,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            limit: 5,
            min_title_len: 15,
            min_price: 1000.0,
            currency: "COP".to_string(),
            price_placeholder: "Consultar precio".to_string(),
            card_price_placeholder: "Price unavailable".to_string(),
            title_patterns: None,
            price_patterns: None,
            enable_listing_cards: false,
            user_agents: DEFAULT_USER_AGENTS.iter().map(|s| s.to_string()).collect(),
            timeout_secs: 15,
            delay_ms: Some(DelayRange::default()),
            respect_robots: true,
        }
    }
}

impl ScraperConfig {
    /// Parse a JSON document; missing keys keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Overlay `STOREFRONT_*` variables from the process environment.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Overlay values from `lookup`, which receives full variable names
    /// such as `STOREFRONT_LIMIT`.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            let key = format!("{ENV_PREFIX}{name}");
            lookup(&key).map(|value| (key, value))
        };

        if let Some((_, value)) = get("BASE_URL") {
            self.base_url = value;
        }
        if let Some((key, value)) = get("LIMIT") {
            self.limit = parse_env(&key, &value)?;
        }
        if let Some((key, value)) = get("TIMEOUT_SECS") {
            self.timeout_secs = parse_env(&key, &value)?;
        }
        if let Some((_, value)) = get("CURRENCY") {
            self.currency = value;
        }
        if let Some((key, value)) = get("RESPECT_ROBOTS") {
            self.respect_robots = parse_env(&key, &value)?;
        }
        if let Some((key, value)) = get("NO_DELAY") {
            if parse_env::<bool>(&key, &value)? {
                self.delay_ms = None;
            }
        }

        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        url::Url::parse(&self.base_url).map_err(|source| ConfigError::BaseUrl {
            url: self.base_url.clone(),
            source,
        })?;
        if let Some(range) = self.delay_ms {
            if range.min_ms > range.max_ms {
                return Err(ConfigError::DelayRange {
                    min_ms: range.min_ms,
                    max_ms: range.max_ms,
                });
            }
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ScraperConfig::from_json_str(r#"{"limit": 3, "currency": "USD"}"#).unwrap();
        assert_eq!(config.limit, 3);
        assert_eq!(config.currency, "USD");
        assert_eq!(config.min_title_len, 15);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.user_agents.len(), DEFAULT_USER_AGENTS.len());
    }

    #[test]
    fn test_env_overrides_win() {
        let env: HashMap<&str, &str> = [
            ("STOREFRONT_LIMIT", "7"),
            ("STOREFRONT_BASE_URL", "https://example.com"),
            ("STOREFRONT_NO_DELAY", "true"),
        ]
        .into_iter()
        .collect();

        let config = ScraperConfig::from_json_str(r#"{"limit": 3}"#)
            .unwrap()
            .with_overrides(|k| env.get(k).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.limit, 7);
        assert_eq!(config.base_url, "https://example.com");
        assert_eq!(config.delay_ms, None);
    }

    #[test]
    fn test_invalid_env_value() {
        let err = ScraperConfig::default()
            .with_overrides(|k| (k == "STOREFRONT_LIMIT").then(|| "many".to_string()))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidEnv { ref key, .. } if key == "STOREFRONT_LIMIT"
        ));
    }

    #[test]
    fn test_rejects_bad_base_url_and_delay() {
        assert!(matches!(
            ScraperConfig::from_json_str(r#"{"base_url": "not a url"}"#),
            Err(ConfigError::BaseUrl { .. })
        ));
        assert!(matches!(
            ScraperConfig::from_json_str(r#"{"delay_ms": {"min_ms": 10, "max_ms": 1}}"#),
            Err(ConfigError::DelayRange { .. })
        ));
    }
}
