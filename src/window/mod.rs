//! Window Module
//!
//! Resolves view types (last 24h, day, month, year, custom) into the
//! `[start, end]` second ranges queried upstream.

pub mod calendar;
mod resolver;
mod view;


pub use resolver::{labels, WindowResolver};
pub use view::{CalendarUnit, Direction, TimeWindow, ViewType};

/// Length of the rolling "last 24 hours" window.
pub const SECONDS_PER_DAY: i64 = 24 * 60 * 60;
