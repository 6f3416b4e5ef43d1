//! Request and Response models for the archive API
//!
//! Query-string DTOs on the way in, JSON bodies on the way out.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{SearchQuery, WalkQuery, WindowQuery};
pub use responses::{
    share_url, DisplayHit, ErrorResponse, HealthResponse, Last24Response, SearchResponse,
    StatsResponse, WindowResponse,
};
