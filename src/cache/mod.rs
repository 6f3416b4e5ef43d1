//! Cache Module
//!
//! In-memory hash-record store with TTL expiration, standing in for the
//! external key-value service. Records map field names to JSON values and
//! are read and written field-wise, `hget`/`hset` style.

mod entry;
mod stats;
mod store;


// Re-export public types
pub use entry::{CacheEntry, Fields};
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum serialized size of one record in bytes
pub const MAX_RECORD_SIZE: usize = 1024 * 1024; // 1 MB
