//! Response DTOs for the archive API
//!
//! Field names are camelCase to match what the front-end consumes.

use chrono::NaiveDate;
use serde::Serialize;

use crate::cache::CacheStats;
use crate::upstream::Hit;
use crate::window::{TimeWindow, ViewType};

/// A hit plus the fields the story list renders directly.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayHit {
    #[serde(flatten)]
    pub hit: Hit,
    pub link: String,
    pub host: Option<String>,
    pub badge: Option<String>,
    pub display_title: String,
}

impl From<Hit> for DisplayHit {
    fn from(hit: Hit) -> Self {
        Self {
            link: hit.link(),
            host: hit.host(),
            badge: hit.badge(),
            display_title: hit.display_title(),
            hit,
        }
    }
}

fn display(hits: Vec<Hit>) -> Vec<DisplayHit> {
    hits.into_iter().map(DisplayHit::from).collect()
}

/// Link that reopens a last-24h page as the exact window it showed.
pub fn share_url(base: &str, window: &TimeWindow) -> String {
    format!(
        "{}?viewType=last24&startTimeStamp={}&endTimeStamp={}",
        base, window.start, window.end
    )
}

/// Response body for `GET /api/last24`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Last24Response {
    pub hits: Vec<DisplayHit>,
    pub last24_start_time: i64,
    pub last24_end_time: i64,
    pub cached: bool,
    pub share_url: String,
}

impl Last24Response {
    pub fn new(hits: Vec<Hit>, window: TimeWindow, cached: bool, share_base: &str) -> Self {
        Self {
            hits: display(hits),
            last24_start_time: window.start,
            last24_end_time: window.end,
            cached,
            share_url: share_url(share_base, &window),
        }
    }
}

/// Response body for `GET /api/search`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub hits: Vec<DisplayHit>,
    pub page: u32,
    pub nb_pages: u32,
    pub nb_hits: u64,
    pub start: i64,
    pub end: i64,
    pub view_type: ViewType,
}

impl SearchResponse {
    pub fn new(
        hits: Vec<Hit>,
        page: u32,
        nb_pages: u32,
        nb_hits: u64,
        window: TimeWindow,
        view_type: ViewType,
    ) -> Self {
        Self {
            hits: display(hits),
            page,
            nb_pages,
            nb_hits,
            start: window.start,
            end: window.end,
            view_type,
        }
    }
}

/// Response body for `GET /api/window` and `GET /api/walk`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowResponse {
    pub view_type: ViewType,
    /// Local date the window was resolved for
    pub date: NaiveDate,
    pub start: i64,
    pub end: i64,
    /// Header parts, e.g. `["05", "March", "2024"]`
    pub labels: Vec<String>,
    pub can_walk_back: bool,
    pub can_walk_forward: bool,
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub expirations: u64,
    pub total_entries: usize,
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            expirations: stats.expirations,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
