//! Search API Client
//!
//! Queries stories created inside a time window, one page at a time.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ArchiveError, Result};
use crate::upstream::Hit;
use crate::window::TimeWindow;

/// One page of search results.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    /// `None` when the response carried no `hits` array at all
    #[serde(default)]
    pub hits: Option<Vec<Hit>>,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub nb_pages: u32,
    #[serde(default)]
    pub nb_hits: u64,
}

/// HTTP client for the search endpoint.
#[derive(Debug, Clone)]
pub struct SearchClient {
    http: reqwest::Client,
    base_url: String,
    hits_per_page: u32,
}

impl SearchClient {
    pub fn new(base_url: impl Into<String>, hits_per_page: u32, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ArchiveError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            hits_per_page,
        })
    }

    /// Fetches `page` of stories with `start < created_at_i < end`.
    pub async fn search(&self, window: TimeWindow, page: u32) -> Result<SearchPage> {
        let filters = format!(
            "created_at_i>{},created_at_i<{}",
            window.start, window.end
        );
        let started = Instant::now();

        debug!(start = window.start, end = window.end, page, "Querying search API");

        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("query", String::new()),
                ("numericFilters", filters),
                ("advancedSyntax", "true".to_string()),
                ("hitsPerPage", self.hits_per_page.to_string()),
                ("page", page.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let result: SearchPage = response.json().await?;

        info!(
            start = window.start,
            end = window.end,
            page,
            hits = result.hits.as_ref().map_or(0, Vec::len),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Search API responded"
        );

        Ok(result)
    }
}
