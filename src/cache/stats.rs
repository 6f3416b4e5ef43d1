//! Cache Statistics Module
//!
//! Counters describing how the store has been used since startup.

use serde::Serialize;

/// Store usage counters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Field reads that returned a value
    pub hits: u64,
    /// Field reads on a missing key, missing field, or expired record
    pub misses: u64,
    /// Records dropped to make room for a new key
    pub evictions: u64,
    /// Records removed because their TTL elapsed
    pub expirations: u64,
    /// Records currently held
    pub total_entries: usize,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// hits / (hits + misses), or 0.0 before the first read.
    pub fn hit_rate(&self) -> f64 {
        match self.hits + self.misses {
            0 => 0.0,
            total => self.hits as f64 / total as f64,
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn record_expirations(&mut self, count: usize) {
        self.expirations += count as u64;
    }

    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
