//! # Cache Policy
//!
//! `Cache-Control` selection for the sitemap response. Search engine
//! crawlers must always get a fresh `200`, so they receive a no-store
//! policy and the response loses the headers that make a `304 Not
//! Modified` possible. Everyone else gets a one hour public cache.
//!
//! ```rust
//! use calc_core::cache_policy::{CachePolicy, policy_for};
//!
//! let policy = policy_for(Some("Mozilla/5.0 (compatible; Googlebot/2.1)"));
//! assert_eq!(policy, CachePolicy::Crawler);
//! assert!(policy.strips_conditional_headers());
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Path the policy is applied to
pub const SITEMAP_PATH: &str = "/sitemap.xml";

/// Headers removed from crawler responses
pub const CONDITIONAL_HEADERS: [&str; 2] = ["ETag", "Last-Modified"];

static CRAWLER_PATTERN: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(r"(?i)Googlebot|bingbot|Slurp|DuckDuckBot|Baiduspider|YandexBot|Sogou|Exabot|facebot|ia_archiver")
        .ok()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CachePolicy {
    /// Search engine crawler: never cache, never answer 304
    Crawler,
    /// Regular visitor: cacheable for an hour
    Public,
}

impl CachePolicy {
    pub fn cache_control(&self) -> &'static str {
        match self {
            CachePolicy::Crawler => "no-store, no-cache, must-revalidate, proxy-revalidate",
            CachePolicy::Public => "public, max-age=3600, s-maxage=3600, must-revalidate",
        }
    }

    /// Whether `ETag` and `Last-Modified` must be removed
    pub fn strips_conditional_headers(&self) -> bool {
        matches!(self, CachePolicy::Crawler)
    }

    /// Rewrite a response header list in place (names compare case-insensitively)
    pub fn apply(&self, headers: &mut Vec<(String, String)>) {
        headers.retain(|(name, _)| {
            if name.eq_ignore_ascii_case("Cache-Control") {
                return false;
            }
            !(self.strips_conditional_headers()
                && CONDITIONAL_HEADERS.iter().any(|h| name.eq_ignore_ascii_case(h)))
        });
        headers.push(("Cache-Control".to_string(), self.cache_control().to_string()));
    }
}

/// True if the user agent belongs to a known search crawler
pub fn is_search_crawler(user_agent: &str) -> bool {
    CRAWLER_PATTERN
        .as_ref()
        .map(|re| re.is_match(user_agent))
        .unwrap_or(false)
}

/// Policy for a request; a missing user agent is treated as a visitor
pub fn policy_for(user_agent: Option<&str>) -> CachePolicy {
    let policy = match user_agent {
        Some(ua) if is_search_crawler(ua) => CachePolicy::Crawler,
        _ => CachePolicy::Public,
    };
    tracing::debug!(?policy, user_agent = user_agent.unwrap_or(""), "selected cache policy");
    policy
}

/// Whether a request path is covered by the policy
pub fn applies_to(path: &str) -> bool {
    path == SITEMAP_PATH
}
