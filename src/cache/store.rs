//! Cache Store Module
//!
//! Keyed hash records with TTL expiration and a capacity bound.

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, Fields, MAX_KEY_LENGTH, MAX_RECORD_SIZE};
use crate::error::{ArchiveError, Result};

// == Cache Store ==
/// Hash-record storage with TTL support.
///
/// When a new key would exceed `max_entries`, the record closest to expiry
/// is evicted first; records without a TTL go last.
#[derive(Debug)]
pub struct CacheStore {
    entries: HashMap<String, CacheEntry>,
    stats: CacheStats,
    max_entries: usize,
    /// TTL in seconds applied when a write does not name one
    default_ttl: u64,
}

impl CacheStore {
    /// Creates a store holding at most `max_entries` records.
    pub fn new(max_entries: usize, default_ttl: u64) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            max_entries,
            default_ttl,
        }
    }

    // == HSet ==
    /// Writes `fields` into the record at `key`.
    ///
    /// Existing fields not named in `fields` are kept; the record's TTL is
    /// restarted with `ttl` or the store default.
    pub fn hset(&mut self, key: &str, fields: Fields, ttl: Option<u64>) -> Result<()> {
        if key.is_empty() || key.len() > MAX_KEY_LENGTH {
            return Err(ArchiveError::InvalidRequest(format!(
                "Key must be 1..={} bytes",
                MAX_KEY_LENGTH
            )));
        }

        let size = serde_json::to_vec(&fields)?.len();
        if size > MAX_RECORD_SIZE {
            return Err(ArchiveError::InvalidRequest(format!(
                "Record exceeds maximum size of {} bytes",
                MAX_RECORD_SIZE
            )));
        }

        let ttl = Some(ttl.unwrap_or(self.default_ttl));

        let live = self.entries.get(key).is_some_and(|entry| !entry.is_expired());
        if live {
            if let Some(entry) = self.entries.get_mut(key) {
                entry.merge(fields, ttl);
            }
        } else {
            self.entries.remove(key);
            if self.entries.len() >= self.max_entries {
                self.evict_one()?;
            }
            self.entries
                .insert(key.to_string(), CacheEntry::new(fields, ttl));
        }

        self.stats.set_total_entries(self.entries.len());
        Ok(())
    }

    // == HGet ==
    /// Reads one field of the record at `key`.
    pub fn hget(&mut self, key: &str, field: &str) -> Result<Value> {
        let value = self
            .live_entry(key)?
            .field(field)
            .cloned();

        match value {
            Some(value) => {
                self.stats.record_hit();
                Ok(value)
            }
            None => {
                self.stats.record_miss();
                Err(ArchiveError::NotFound(format!("{}.{}", key, field)))
            }
        }
    }

    // == HGetAll ==
    /// Reads every field of the record at `key`.
    pub fn hgetall(&mut self, key: &str) -> Result<Fields> {
        let fields = self.live_entry(key)?.fields.clone();
        self.stats.record_hit();
        Ok(fields)
    }

    // == Delete ==
    pub fn delete(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_none() {
            return Err(ArchiveError::NotFound(key.to_string()));
        }
        self.stats.set_total_entries(self.entries.len());
        Ok(())
    }

    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Cleanup Expired ==
    /// Removes all expired records, returning how many were dropped.
    pub fn cleanup_expired(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired());
        let removed = before - self.entries.len();

        self.stats.record_expirations(removed);
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up `key`, dropping it if it has expired. Failed lookups count as misses.
    fn live_entry(&mut self, key: &str) -> Result<&CacheEntry> {
        let expired = match self.entries.get(key) {
            None => {
                self.stats.record_miss();
                return Err(ArchiveError::NotFound(key.to_string()));
            }
            Some(entry) => entry.is_expired(),
        };

        if expired {
            self.entries.remove(key);
            self.stats.record_miss();
            self.stats.record_expirations(1);
            self.stats.set_total_entries(self.entries.len());
            return Err(ArchiveError::Expired(key.to_string()));
        }

        self.entries
            .get(key)
            .ok_or_else(|| ArchiveError::NotFound(key.to_string()))
    }

    fn evict_one(&mut self) -> Result<()> {
        let victim = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| (entry.expires_at.unwrap_or(u64::MAX), entry.created_at))
            .map(|(key, _)| key.clone());

        match victim {
            Some(key) => {
                debug!(key = %key, "Evicting record to make room");
                self.entries.remove(&key);
                self.stats.record_eviction();
                Ok(())
            }
            None => Err(ArchiveError::CacheFull(
                "Cache is full and eviction failed".to_string(),
            )),
        }
    }
}
