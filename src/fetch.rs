//! Blocking document fetcher for storefront search pages

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use rand::Rng;
use tracing::{debug, info};
use url::Url;

use crate::config::{DelayRange, ScraperConfig};
use crate::error::{ConfigError, FetchError};
use crate::extractors::decode_document;
use crate::robots::{RobotsCache, MAX_CRAWL_DELAY_SECS};

const ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8";
const ACCEPT_LANGUAGE: &str = "es-ES,es;q=0.9,en;q=0.8";

/// Supplies the raw search-results page for a query.
pub trait DocumentFetcher {
    fn fetch(&self, query: &str) -> Result<String, FetchError>;
}

/// Search URL for `query`: the lowercased query with spaces turned into
/// dashes as the last path segment, plus the trimmed query as `?q=`.
pub fn search_url(base: &Url, query: &str) -> Result<Url, FetchError> {
    let slug = query.trim().replace(' ', "-").to_lowercase();
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| FetchError::CannotBeABase {
            base: base.to_string(),
        })?
        .pop_if_empty()
        .push(&slug);
    url.query_pairs_mut().append_pair("q", query.trim());
    Ok(url)
}

/// Milliseconds to wait for a robots.txt Crawl-delay, capped at
/// [`MAX_CRAWL_DELAY_SECS`].
fn crawl_delay_ms(crawl_delay: Option<f64>) -> u64 {
    crawl_delay
        .filter(|secs| secs.is_finite() && *secs > 0.0)
        .map(|secs| (secs.min(MAX_CRAWL_DELAY_SECS) * 1000.0) as u64)
        .unwrap_or(0)
}

/// HTTP fetcher using ureq (simple blocking HTTP)
#[derive(Debug)]
pub struct HttpFetcher {
    agent: ureq::Agent,
    base_url: Url,
    user_agents: Vec<String>,
    next_agent: AtomicUsize,
    delay: Option<DelayRange>,
    robots: Option<RobotsCache>,
}

impl HttpFetcher {
    pub fn new(config: &ScraperConfig) -> Result<Self, ConfigError> {
        let base_url = Url::parse(&config.base_url).map_err(|source| ConfigError::BaseUrl {
            url: config.base_url.clone(),
            source,
        })?;

        let agent = ureq::Agent::new_with_config(
            ureq::Agent::config_builder()
                .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
                .build(),
        );

        Ok(Self {
            agent,
            base_url,
            user_agents: config.user_agents.clone(),
            next_agent: AtomicUsize::new(0),
            delay: config.delay_ms,
            robots: config.respect_robots.then(RobotsCache::new),
        })
    }

    /// Next user agent in rotation, starting from a random offset.
    fn user_agent(&self) -> &str {
        if self.user_agents.is_empty() {
            return concat!("storefront_parser/", env!("CARGO_PKG_VERSION"));
        }
        let mut index = self.next_agent.fetch_add(1, Ordering::Relaxed);
        if index == 0 {
            let offset = rand::thread_rng().gen_range(0..self.user_agents.len());
            self.next_agent.store(offset + 1, Ordering::Relaxed);
            index = offset;
        }
        &self.user_agents[index % self.user_agents.len()]
    }

    fn pause(&self, crawl_delay: Option<f64>) {
        let jitter = self
            .delay
            .filter(|range| range.min_ms <= range.max_ms)
            .map(|range| rand::thread_rng().gen_range(range.min_ms..=range.max_ms))
            .unwrap_or(0);
        let wait = jitter.max(crawl_delay_ms(crawl_delay));
        if wait > 0 {
            info!(delay_ms = wait, "waiting before request");
            std::thread::sleep(Duration::from_millis(wait));
        }
    }
}

impl DocumentFetcher for HttpFetcher {
    fn fetch(&self, query: &str) -> Result<String, FetchError> {
        let url = search_url(&self.base_url, query)?;
        let user_agent = self.user_agent();
        debug!(%url, user_agent, "fetching search page");

        let crawl_delay = match &self.robots {
            Some(robots) => {
                let check = robots.check_blocking(&self.agent, url.as_str(), user_agent);
                if !check.allowed {
                    return Err(FetchError::Disallowed {
                        url: url.to_string(),
                    });
                }
                check.crawl_delay
            }
            None => None,
        };

        self.pause(crawl_delay);

        let response = self
            .agent
            .get(url.as_str())
            .header("User-Agent", user_agent)
            .header("Accept", ACCEPT)
            .header("Accept-Language", ACCEPT_LANGUAGE)
            .header("Upgrade-Insecure-Requests", "1")
            .header("Cache-Control", "max-age=0")
            .call()
            .map_err(|e| match e {
                ureq::Error::StatusCode(code) => FetchError::Status {
                    code,
                    url: url.to_string(),
                },
                source => FetchError::Transport {
                    url: url.to_string(),
                    source,
                },
            })?;

        let bytes = response
            .into_body()
            .read_to_vec()
            .map_err(|source| FetchError::Body {
                url: url.to_string(),
                source,
            })?;
        Ok(decode_document(&bytes).into_owned())
    }
}
