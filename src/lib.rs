//! HN Top Archive - Hacker News stories by day, month, year, or last 24 hours
//!
//! Resolves calendar views into time windows, queries the HN search API for
//! them, and keeps the landing page's last-24h snapshot in a TTL store.

pub mod api;
pub mod archive;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;
pub mod upstream;
pub mod window;

pub use api::AppState;
pub use config::Config;
pub use error::{ArchiveError, Result};
pub use tasks::spawn_cleanup_task;
