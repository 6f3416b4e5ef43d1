//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::str::FromStr;

use chrono::{FixedOffset, Offset, Utc};

/// Default upstream: the public HN Algolia search endpoint.
pub const DEFAULT_SEARCH_URL: &str = "https://hn.algolia.com/api/v1/search";

/// Page shared by the "share current page" link.
pub const DEFAULT_SHARE_BASE_URL: &str = "https://www.nazha.co/hackernews-top-archive";

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Base URL of the search API
    pub search_url: String,
    /// Hits requested per upstream page
    pub hits_per_page: u32,
    /// Age in seconds after which the last-24h snapshot is refreshed
    pub freshness_secs: i64,
    /// Maximum number of records the store can hold
    pub max_entries: usize,
    /// TTL in seconds for stored records
    pub default_ttl: u64,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
    /// Offset from UTC, in minutes, of the archive's calendar
    pub utc_offset_minutes: i32,
    /// Timeout for a single upstream request in seconds
    pub upstream_timeout_secs: u64,
    /// Base URL for share links
    pub share_base_url: String,
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `HACKER_NEWS_SEARCH_URL` - search API base URL
    /// - `HITS_PER_PAGE` - hits per upstream page (default: 15)
    /// - `FRESHNESS_SECS` - last-24h snapshot freshness (default: 600)
    /// - `MAX_ENTRIES` - maximum stored records (default: 1000)
    /// - `DEFAULT_TTL` - record TTL in seconds (default: 86400)
    /// - `CLEANUP_INTERVAL` - cleanup frequency in seconds (default: 60)
    /// - `UTC_OFFSET_MINUTES` - calendar offset from UTC (default: 0)
    /// - `UPSTREAM_TIMEOUT_SECS` - upstream request timeout (default: 10)
    /// - `SHARE_BASE_URL` - base of generated share links
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env_or("SERVER_PORT", defaults.server_port),
            search_url: env::var("HACKER_NEWS_SEARCH_URL").unwrap_or(defaults.search_url),
            hits_per_page: env_or("HITS_PER_PAGE", defaults.hits_per_page),
            freshness_secs: env_or("FRESHNESS_SECS", defaults.freshness_secs),
            max_entries: env_or("MAX_ENTRIES", defaults.max_entries),
            default_ttl: env_or("DEFAULT_TTL", defaults.default_ttl),
            cleanup_interval: env_or("CLEANUP_INTERVAL", defaults.cleanup_interval),
            utc_offset_minutes: env_or("UTC_OFFSET_MINUTES", defaults.utc_offset_minutes),
            upstream_timeout_secs: env_or("UPSTREAM_TIMEOUT_SECS", defaults.upstream_timeout_secs),
            share_base_url: env::var("SHARE_BASE_URL").unwrap_or(defaults.share_base_url),
        }
    }

    /// Calendar offset used for day/month/year boundaries.
    ///
    /// Offsets outside +/-24h fall back to UTC.
    pub fn utc_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes.saturating_mul(60))
            .unwrap_or_else(|| Utc.fix())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            search_url: DEFAULT_SEARCH_URL.to_string(),
            hits_per_page: 15,
            freshness_secs: 600,
            max_entries: 1000,
            default_ttl: 86_400,
            cleanup_interval: 60,
            utc_offset_minutes: 0,
            upstream_timeout_secs: 10,
            share_base_url: DEFAULT_SHARE_BASE_URL.to_string(),
        }
    }
}
