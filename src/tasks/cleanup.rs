//! TTL Cleanup Task
//!
//! Background task that periodically removes expired records, so old
//! search pages do not sit in memory until the next read of their key.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Spawns a task that sweeps `cache` every `cleanup_interval_secs`.
///
/// The returned handle is aborted during graceful shutdown.
pub fn spawn_cleanup_task(
    cache: Arc<RwLock<CacheStore>>,
    cleanup_interval_secs: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs.max(1));

    tokio::spawn(async move {
        info!(interval_secs = interval.as_secs(), "Starting TTL cleanup task");

        loop {
            tokio::time::sleep(interval).await;

            let (removed, remaining) = {
                let mut guard = cache.write().await;
                (guard.cleanup_expired(), guard.len())
            };

            if removed > 0 {
                info!(removed, remaining, "TTL cleanup removed expired records");
            } else {
                debug!(remaining, "TTL cleanup found nothing to remove");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record() -> crate::cache::Fields {
        json!({"endTime": 1, "hits": []}).as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_cleanup_task_removes_expired_records() {
        let cache = Arc::new(RwLock::new(CacheStore::new(100, 300)));
        cache
            .write()
            .await
            .hset("search:0:1:page:0", record(), Some(1))
            .unwrap();
        cache
            .write()
            .await
            .hset("last24Cache:page:0", record(), Some(3600))
            .unwrap();

        let handle = spawn_cleanup_task(cache.clone(), 1);
        tokio::time::sleep(Duration::from_millis(2500)).await;

        {
            let guard = cache.read().await;
            assert_eq!(guard.len(), 1, "Only the long-lived record should remain");
            assert_eq!(guard.stats().expirations, 1);
        }

        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_can_be_aborted() {
        let cache = Arc::new(RwLock::new(CacheStore::new(100, 300)));
        let handle = spawn_cleanup_task(cache, 1);

        handle.abort();
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
