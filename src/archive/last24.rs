//! Last-24h Gate
//!
//! The last-24h view is the landing page, so its first page is served from
//! a single snapshot record that is refreshed at most once per freshness
//! period. Refetches are serialized; requests that queue behind one are
//! answered from the snapshot it wrote.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::archive::Archive;
use crate::cache::Fields;
use crate::error::{ArchiveError, Result};
use crate::upstream::Hit;
use crate::window::TimeWindow;

/// Store key of the last-24h snapshot.
pub const LAST24_CACHE_KEY: &str = "last24Cache:page:0";

const END_TIME_FIELD: &str = "endTime";
const HITS_FIELD: &str = "hits";

/// Record layout of the snapshot.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotRecord {
    end_time: i64,
    start_time: i64,
    page: u32,
    hits: Vec<Hit>,
}

/// First page of the last-24h view and the window it covers.
#[derive(Debug, Clone)]
pub struct Last24Snapshot {
    pub hits: Vec<Hit>,
    pub window: TimeWindow,
    /// Whether the hits came from the store rather than upstream
    pub cached: bool,
}

impl Archive {
    /// Returns the last-24h snapshot as of `now` (Unix seconds).
    ///
    /// A snapshot whose end lies within the freshness period of `now` is
    /// served as is, with the window it was fetched for. Otherwise the
    /// search API is queried for the 24 hours ending at `now` and the
    /// snapshot is overwritten. Upstream failures are returned to the caller.
    pub async fn last24(&self, now: i64) -> Result<Last24Snapshot> {
        if let Some(snapshot) = self.fresh_snapshot(now).await {
            return Ok(snapshot);
        }

        let _guard = self.refresh_lock.lock().await;

        // another request may have refreshed while this one waited
        if let Some(snapshot) = self.fresh_snapshot(now).await {
            return Ok(snapshot);
        }

        self.refresh_last24(now).await
    }

    /// The cached snapshot, if it exists and is no older than the freshness period.
    async fn fresh_snapshot(&self, now: i64) -> Option<Last24Snapshot> {
        let cached_end = self.cached_end_time().await?;
        let age = now - cached_end;
        if age > self.freshness_secs {
            info!(age, "Last-24h snapshot is stale");
            return None;
        }

        match self.cached_hits().await {
            Ok(hits) => {
                debug!(age, "Serving last-24h snapshot from cache");
                Some(Last24Snapshot {
                    hits,
                    window: TimeWindow::trailing_day(cached_end),
                    cached: true,
                })
            }
            Err(e) => {
                warn!(error = %e, "Snapshot unreadable, refetching");
                None
            }
        }
    }

    async fn refresh_last24(&self, now: i64) -> Result<Last24Snapshot> {
        let window = TimeWindow::trailing_day(now);
        let page = self.client.search(window, 0).await?;

        let Some(hits) = page.hits else {
            warn!("Search API returned no hits array; snapshot left untouched");
            return Ok(Last24Snapshot {
                hits: Vec::new(),
                window,
                cached: false,
            });
        };

        let record = SnapshotRecord {
            end_time: window.end,
            start_time: window.start,
            page: 0,
            hits,
        };
        if let Err(e) = self.store_snapshot(&record).await {
            warn!(error = %e, "Failed to store last-24h snapshot");
        }

        Ok(Last24Snapshot {
            hits: record.hits,
            window,
            cached: false,
        })
    }

    async fn cached_end_time(&self) -> Option<i64> {
        let value = self
            .cache
            .write()
            .await
            .hget(LAST24_CACHE_KEY, END_TIME_FIELD)
            .ok()?;
        value.as_i64()
    }

    async fn cached_hits(&self) -> Result<Vec<Hit>> {
        let value: Value = self
            .cache
            .write()
            .await
            .hget(LAST24_CACHE_KEY, HITS_FIELD)?;
        Ok(serde_json::from_value(value)?)
    }

    async fn store_snapshot(&self, record: &SnapshotRecord) -> Result<()> {
        let fields: Fields = match serde_json::to_value(record)? {
            Value::Object(fields) => fields,
            _ => return Err(ArchiveError::Internal("Snapshot is not an object".to_string())),
        };
        self.cache
            .write()
            .await
            .hset(LAST24_CACHE_KEY, fields, self.record_ttl)
    }
}
