//! View Types Module
//!
//! Display granularities and the time windows they resolve to.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ArchiveError;

// == View Type ==
/// Granularity selected by the client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewType {
    /// Rolling 24 hours ending now
    #[default]
    Last24,
    Day,
    Month,
    Year,
    /// Explicit `[start, end]` range from a shared link
    Custom,
}

impl ViewType {
    /// Calendar unit of the view, or `None` for rolling/explicit ranges.
    pub fn unit(self) -> Option<CalendarUnit> {
        match self {
            ViewType::Day => Some(CalendarUnit::Day),
            ViewType::Month => Some(CalendarUnit::Month),
            ViewType::Year => Some(CalendarUnit::Year),
            ViewType::Last24 | ViewType::Custom => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ViewType::Last24 => "last24",
            ViewType::Day => "day",
            ViewType::Month => "month",
            ViewType::Year => "year",
            ViewType::Custom => "custom",
        }
    }
}

impl fmt::Display for ViewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Calendar Unit ==
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalendarUnit {
    Day,
    Month,
    Year,
}

// == Direction ==
/// Direction of a time walk; `-1` on the wire is back, `1` is forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "i8")]
pub enum Direction {
    Back,
    Forward,
}

impl TryFrom<i8> for Direction {
    type Error = String;

    fn try_from(value: i8) -> std::result::Result<Self, Self::Error> {
        match value {
            -1 => Ok(Direction::Back),
            1 => Ok(Direction::Forward),
            other => Err(format!("direction must be -1 or 1, got {}", other)),
        }
    }
}

// == Time Window ==
/// Inclusive range of Unix seconds queried against `created_at_i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: i64,
    pub end: i64,
}

impl TimeWindow {
    /// Builds a window from an explicit range, rejecting inverted ones.
    pub fn new(start: i64, end: i64) -> Result<Self, ArchiveError> {
        if start > end {
            return Err(ArchiveError::InvalidRequest(format!(
                "start ({}) is after end ({})",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// The 24 hours ending at `end`.
    pub fn trailing_day(end: i64) -> Self {
        Self {
            start: end - super::SECONDS_PER_DAY,
            end,
        }
    }

    /// A window is closed once nothing newer than `cutoff` can land in it.
    pub fn is_closed_before(&self, cutoff: i64) -> bool {
        self.end < cutoff
    }

    #[cfg(test)]
    pub fn contains(&self, ts: i64) -> bool {
        ts >= self.start && ts <= self.end
    }
}
