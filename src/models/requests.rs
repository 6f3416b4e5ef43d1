//! Request DTOs for the archive API
//!
//! All endpoints take their input from the query string, using the
//! camelCase names the front-end already sends.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::{ArchiveError, Result};
use crate::window::{Direction, TimeWindow, ViewType};

/// Upper bound on the page index; the search API stops paginating long before.
pub const MAX_PAGE: u32 = 1000;

fn explicit_range(start: Option<i64>, end: Option<i64>) -> Result<Option<TimeWindow>> {
    match (start, end) {
        (Some(start), Some(end)) => TimeWindow::new(start, end).map(Some),
        (None, None) => Ok(None),
        _ => Err(ArchiveError::InvalidRequest(
            "startTimeStamp and endTimeStamp must be given together".to_string(),
        )),
    }
}

/// Query for `GET /api/search`
///
/// The window is either explicit (`startTimeStamp`/`endTimeStamp`) or
/// resolved from `viewType` and `date`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    #[serde(default)]
    pub page: u32,
    pub start_time_stamp: Option<i64>,
    pub end_time_stamp: Option<i64>,
    #[serde(default)]
    pub view_type: ViewType,
    pub date: Option<NaiveDate>,
}

impl SearchQuery {
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.page > MAX_PAGE {
            return Some(format!("page must be at most {}", MAX_PAGE));
        }
        None
    }

    pub fn range(&self) -> Result<Option<TimeWindow>> {
        explicit_range(self.start_time_stamp, self.end_time_stamp)
    }
}

/// Query for `GET /api/window`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowQuery {
    #[serde(default)]
    pub view_type: ViewType,
    pub date: Option<NaiveDate>,
    pub start_time_stamp: Option<i64>,
    pub end_time_stamp: Option<i64>,
}

impl WindowQuery {
    pub fn range(&self) -> Result<Option<TimeWindow>> {
        explicit_range(self.start_time_stamp, self.end_time_stamp)
    }
}

/// Query for `GET /api/walk`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalkQuery {
    pub view_type: ViewType,
    pub date: Option<NaiveDate>,
    pub direction: Direction,
}
