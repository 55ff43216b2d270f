//! robots.txt parsing and checking

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use texting_robots::Robot;
use tracing::debug;

const CACHE_TTL: Duration = Duration::from_secs(3600);

/// Longest Crawl-delay honoured, in seconds. Larger values are clamped.
pub const MAX_CRAWL_DELAY_SECS: f64 = 30.0;

/// Cached robots.txt data per host
#[derive(Debug, Default)]
pub struct RobotsCache {
    cache: RwLock<HashMap<String, CachedRobots>>,
}

#[derive(Debug)]
struct CachedRobots {
    /// Raw robots.txt content (Robot doesn't impl Clone, so we store raw)
    robots_txt: String,
    fetched_at: Instant,
}

/// Result of robots.txt check
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct RobotsCheckResult {
    pub allowed: bool,
    /// Seconds between requests requested by the site, if any.
    pub crawl_delay: Option<f64>,
}

impl RobotsCheckResult {
    fn allow_all() -> Self {
        Self {
            allowed: true,
            crawl_delay: None,
        }
    }
}

impl RobotsCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if URL is allowed by robots.txt (using ureq)
    ///
    /// A missing or unreachable robots.txt allows everything.
    pub fn check_blocking(
        &self,
        agent: &ureq::Agent,
        url: &str,
        user_agent: &str,
    ) -> RobotsCheckResult {
        let Ok(parsed) = url::Url::parse(url) else {
            return RobotsCheckResult::allow_all();
        };
        let Some(host) = parsed.host_str().map(str::to_lowercase) else {
            return RobotsCheckResult::allow_all();
        };

        if let Ok(cache) = self.cache.read() {
            if let Some(cached) = cache.get(&host) {
                if cached.fetched_at.elapsed() < CACHE_TTL {
                    return evaluate(&cached.robots_txt, url, user_agent);
                }
            }
        }

        let robots_url = format!("{}://{}/robots.txt", parsed.scheme(), host);
        let robots_txt = match agent.get(&robots_url).call() {
            Ok(resp) if resp.status().is_success() => {
                resp.into_body().read_to_string().unwrap_or_default()
            }
            _ => String::new(),
        };
        debug!(%robots_url, bytes = robots_txt.len(), "robots.txt fetched");

        let result = evaluate(&robots_txt, url, user_agent);

        if let Ok(mut cache) = self.cache.write() {
            cache.insert(
                host,
                CachedRobots {
                    robots_txt,
                    fetched_at: Instant::now(),
                },
            );
        }

        result
    }
}

/// Decide whether `url` may be fetched under `robots_txt`.
pub fn evaluate(robots_txt: &str, url: &str, user_agent: &str) -> RobotsCheckResult {
    let allowed = Robot::new(user_agent, robots_txt.as_bytes())
        .map(|r| r.allowed(url))
        .unwrap_or(true);

    RobotsCheckResult {
        allowed,
        crawl_delay: extract_crawl_delay(robots_txt, user_agent),
    }
}

/// Crawl-delay for `user_agent`, falling back to the first delay listed
/// under any other group. Negative or non-finite values are ignored and the
/// result is capped at [`MAX_CRAWL_DELAY_SECS`].
fn extract_crawl_delay(robots_txt: &str, user_agent: &str) -> Option<f64> {
    let ua_lower = user_agent.to_lowercase();
    let mut in_matching_section = false;
    let mut default_delay: Option<f64> = None;

    for line in robots_txt.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let lower = line.to_lowercase();
        if let Some(agent) = lower.strip_prefix("user-agent:") {
            let agent = agent.trim();
            in_matching_section = agent == "*" || ua_lower.contains(agent);
        } else if let Some(delay) = lower.strip_prefix("crawl-delay:") {
            let delay = delay
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|d| d.is_finite() && *d >= 0.0)
                .map(|d| d.min(MAX_CRAWL_DELAY_SECS));
            if let Some(delay) = delay {
                if in_matching_section {
                    return Some(delay);
                }
                default_delay.get_or_insert(delay);
            }
        }
    }

    default_delay
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROBOTS: &str = "User-agent: *\nDisallow: /private\nCrawl-delay: 2\n";

    #[test]
    fn test_disallowed_path() {
        let check = evaluate(ROBOTS, "https://shop.example.com/private/laptop", "Mozilla/5.0");
        assert!(!check.allowed);
        assert_eq!(check.crawl_delay, Some(2.0));

        let check = evaluate(ROBOTS, "https://shop.example.com/laptop?q=laptop", "Mozilla/5.0");
        assert!(check.allowed);
    }

    #[test]
    fn test_empty_robots_allows_all() {
        let check = evaluate("", "https://shop.example.com/anything", "Mozilla/5.0");
        assert_eq!(check, RobotsCheckResult::allow_all());
    }

    #[test]
    fn test_crawl_delay_prefers_matching_agent() {
        let txt = "User-agent: googlebot\nCrawl-delay: 10\n\nUser-agent: mozilla\nCrawl-delay: 1.5\n";
        assert_eq!(extract_crawl_delay(txt, "Mozilla/5.0 (X11)"), Some(1.5));
        assert_eq!(extract_crawl_delay(txt, "curl/8"), Some(10.0));
        assert_eq!(extract_crawl_delay("", "curl/8"), None);
    }

    #[test]
    fn test_crawl_delay_is_bounded() {
        let url = "https://shop.example.com/laptop";
        let check = evaluate("User-agent: *\nCrawl-delay: inf\n", url, "curl/8");
        assert_eq!(check.crawl_delay, None);

        let check = evaluate("User-agent: *\nCrawl-delay: 1e12\n", url, "curl/8");
        assert_eq!(check.crawl_delay, Some(MAX_CRAWL_DELAY_SECS));

        assert_eq!(extract_crawl_delay("User-agent: *\nCrawl-delay: -5\n", "curl/8"), None);
        assert_eq!(extract_crawl_delay("User-agent: *\nCrawl-delay: NaN\n", "curl/8"), None);
        assert_eq!(
            extract_crawl_delay("User-agent: *\nCrawl-delay: -1\nCrawl-delay: 4\n", "curl/8"),
            Some(4.0)
        );
    }
}
