//! Error types for the fallible edges of the crate.
//!
//! Extraction itself never fails; only configuration loading and document
//! fetching can.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building a [`crate::ScraperConfig`] or the extractor
/// tables derived from it.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid value {value:?} for environment variable {key}")]
    InvalidEnv { key: String, value: String },

    #[error("invalid extraction pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("extraction pattern {pattern:?} has no capture group for the value")]
    MissingCapture { pattern: String },

    #[error("invalid base url {url:?}: {source}")]
    BaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("delay range is inverted: min {min_ms}ms > max {max_ms}ms")]
    DelayRange { min_ms: u64, max_ms: u64 },
}

/// Errors raised by a [`crate::fetch::DocumentFetcher`].
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("cannot build search url from {base}: base url cannot carry a path")]
    CannotBeABase { base: String },

    #[error("fetching {url} is disallowed by robots.txt")]
    Disallowed { url: String },

    #[error("HTTP {code} for {url}")]
    Status { code: u16, url: String },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: ureq::Error,
    },

    #[error("failed to read body of {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: ureq::Error,
    },
}
