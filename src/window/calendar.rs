//! Calendar Arithmetic
//!
//! Start/end-of-unit boundaries and one-unit date walks in a fixed UTC offset.

use chrono::{DateTime, Datelike, Days, FixedOffset, Months, NaiveDate, NaiveTime, Utc};

use crate::error::{ArchiveError, Result};
use crate::window::{CalendarUnit, Direction};

fn out_of_range(date: NaiveDate) -> ArchiveError {
    ArchiveError::InvalidRequest(format!("date {} is out of range", date))
}

/// Calendar date of `instant` as seen from `offset`.
pub fn local_date(instant: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    instant.with_timezone(&offset).date_naive()
}

/// Unix seconds of local midnight starting `date`.
pub fn local_midnight(date: NaiveDate, offset: FixedOffset) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp() - i64::from(offset.local_minus_utc())
}

/// First day of the unit containing `date`.
pub fn start_of_unit(date: NaiveDate, unit: CalendarUnit) -> NaiveDate {
    match unit {
        CalendarUnit::Day => date,
        CalendarUnit::Month => date - Days::new(u64::from(date.day0())),
        CalendarUnit::Year => date - Days::new(u64::from(date.ordinal0())),
    }
}

/// Last whole second of the unit containing `date`.
pub fn end_of_unit(date: NaiveDate, unit: CalendarUnit, offset: FixedOffset) -> Result<i64> {
    let start = start_of_unit(date, unit);
    let next = walk(start, unit, Direction::Forward)?;
    Ok(local_midnight(next, offset) - 1)
}

/// Moves `date` one unit back or forward.
///
/// Month and year steps clamp to the last day of the target month, so
/// Jan 31 walks forward to Feb 28 (or 29) and Feb 29 walks to Feb 28.
pub fn walk(date: NaiveDate, unit: CalendarUnit, direction: Direction) -> Result<NaiveDate> {
    let walked = match (unit, direction) {
        (CalendarUnit::Day, Direction::Forward) => date.checked_add_days(Days::new(1)),
        (CalendarUnit::Day, Direction::Back) => date.checked_sub_days(Days::new(1)),
        (CalendarUnit::Month, Direction::Forward) => date.checked_add_months(Months::new(1)),
        (CalendarUnit::Month, Direction::Back) => date.checked_sub_months(Months::new(1)),
        (CalendarUnit::Year, Direction::Forward) => date.checked_add_months(Months::new(12)),
        (CalendarUnit::Year, Direction::Back) => date.checked_sub_months(Months::new(12)),
    };
    walked.ok_or_else(|| out_of_range(date))
}
