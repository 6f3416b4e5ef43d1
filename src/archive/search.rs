//! Windowed search with page caching.
//!
//! Pages of windows that ended before the freshness cutoff can no longer
//! change, so they are stored and served from the cache. Pages of open
//! windows always go upstream.

use serde_json::Value;
use tracing::{debug, warn};

use crate::archive::Archive;
use crate::error::Result;
use crate::upstream::SearchPage;
use crate::window::TimeWindow;

fn page_key(window: &TimeWindow, page: u32) -> String {
    format!("search:{}:{}:page:{}", window.start, window.end, page)
}

impl Archive {
    /// Fetches `page` of the stories inside `window`, as of `now`.
    pub async fn search(&self, window: TimeWindow, page: u32, now: i64) -> Result<SearchPage> {
        let closed = window.is_closed_before(now - self.freshness_secs);
        let key = page_key(&window, page);

        if closed {
            if let Some(cached) = self.cached_page(&key).await {
                debug!(key = %key, "Serving search page from cache");
                return Ok(cached);
            }
        }

        let result = self.client.search(window, page).await?;

        if closed && result.hits.is_some() {
            if let Err(e) = self.store_page(&key, &result).await {
                warn!(key = %key, error = %e, "Failed to cache search page");
            }
        }

        Ok(result)
    }

    async fn cached_page(&self, key: &str) -> Option<SearchPage> {
        let fields = self.cache.write().await.hgetall(key).ok()?;
        match serde_json::from_value(Value::Object(fields)) {
            Ok(page) => Some(page),
            Err(e) => {
                warn!(key = %key, error = %e, "Discarding unreadable cached page");
                None
            }
        }
    }

    async fn store_page(&self, key: &str, page: &SearchPage) -> Result<()> {
        if let Value::Object(fields) = serde_json::to_value(page)? {
            self.cache.write().await.hset(key, fields, self.record_ttl)?;
        }
        Ok(())
    }
}
