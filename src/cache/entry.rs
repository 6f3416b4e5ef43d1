//! Cache Entry Module
//!
//! A single hash record: named JSON fields sharing one expiry.

use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::{Map, Value};

/// Field map of one record.
pub type Fields = Map<String, Value>;

// == Cache Entry ==
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub fields: Fields,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Expiration timestamp (Unix milliseconds), None = no expiration
    pub expires_at: Option<u64>,
}

impl CacheEntry {
    /// Creates a record holding `fields` that lives for `ttl_seconds`.
    pub fn new(fields: Fields, ttl_seconds: Option<u64>) -> Self {
        let now = current_timestamp_ms();
        Self {
            fields,
            created_at: now,
            expires_at: expiry_from(now, ttl_seconds),
        }
    }

    /// Overwrites the given fields, keeps the others, and restarts the TTL.
    pub fn merge(&mut self, fields: Fields, ttl_seconds: Option<u64>) {
        self.fields.extend(fields);
        self.expires_at = expiry_from(current_timestamp_ms(), ttl_seconds);
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// An entry is expired once the current time reaches its expiry.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(current_timestamp_ms())
    }

    pub fn is_expired_at(&self, now_ms: u64) -> bool {
        self.expires_at.is_some_and(|expires| now_ms >= expires)
    }
}

fn expiry_from(now_ms: u64, ttl_seconds: Option<u64>) -> Option<u64> {
    ttl_seconds.map(|ttl| now_ms.saturating_add(ttl.saturating_mul(1000)))
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
