//! Background Tasks Module
//!
//! # Tasks
//! - TTL Cleanup: drops expired snapshot and search-page records

mod cleanup;

pub use cleanup::spawn_cleanup_task;
