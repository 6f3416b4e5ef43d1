//! API Module
//!
//! HTTP handlers and routing for the archive JSON API.
//!
//! # Endpoints
//! - `GET /api/last24` - First page of the last 24 hours, cache-or-fetch
//! - `GET /api/search` - Any page of any window
//! - `GET /api/window` - Resolve a view into its time window
//! - `GET /api/walk` - Step a calendar view back or forward
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
