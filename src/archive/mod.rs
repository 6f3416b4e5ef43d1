//! Archive Module
//!
//! Decides, per request, whether stories come from the store or from the
//! search API, and keeps the store up to date with what was fetched.

mod last24;
mod search;

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::cache::CacheStore;
use crate::upstream::SearchClient;

pub use last24::{Last24Snapshot, LAST24_CACHE_KEY};

/// Cache-or-fetch front for the search API.
#[derive(Clone)]
pub struct Archive {
    cache: Arc<RwLock<CacheStore>>,
    client: SearchClient,
    /// Seconds a last-24h snapshot (or an open window) is considered current
    freshness_secs: i64,
    /// TTL for records written by the archive; `None` uses the store default
    record_ttl: Option<u64>,
    /// Held while the last-24h snapshot is being refetched
    refresh_lock: Arc<Mutex<()>>,
}

impl Archive {
    pub fn new(
        cache: Arc<RwLock<CacheStore>>,
        client: SearchClient,
        freshness_secs: i64,
        record_ttl: Option<u64>,
    ) -> Self {
        Self {
            cache,
            client,
            freshness_secs,
            record_ttl,
            refresh_lock: Arc::new(Mutex::new(())),
        }
    }
}
