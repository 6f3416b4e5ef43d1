//! Window Resolver
//!
//! Turns a view type and reference instant into the range to query, and
//! answers whether the client may walk to the previous or next window.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

use crate::error::{ArchiveError, Result};
use crate::window::calendar::{end_of_unit, local_date, local_midnight, start_of_unit};
use crate::window::{CalendarUnit, TimeWindow, ViewType};

/// Resolves windows against the archive's calendar offset.
#[derive(Debug, Clone, Copy)]
pub struct WindowResolver {
    offset: FixedOffset,
}

impl WindowResolver {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Local calendar date of `instant`.
    pub fn date_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        local_date(instant, self.offset)
    }

    /// Instant at local midnight of `date`, used as a calendar view reference.
    pub fn anchor(&self, date: NaiveDate) -> Result<DateTime<Utc>> {
        let seconds = local_midnight(date, self.offset);
        DateTime::from_timestamp(seconds, 0)
            .ok_or_else(|| ArchiveError::InvalidRequest(format!("date {} is out of range", date)))
    }

    /// Computes the window for `view` around `reference`.
    ///
    /// `custom` is only consulted for [`ViewType::Custom`]; a custom view
    /// without a range behaves like the last-24h view.
    pub fn resolve(
        &self,
        view: ViewType,
        reference: DateTime<Utc>,
        custom: Option<TimeWindow>,
    ) -> Result<TimeWindow> {
        match (view.unit(), view, custom) {
            (Some(unit), _, _) => self.calendar_window(self.date_of(reference), unit),
            (None, ViewType::Custom, Some(range)) => TimeWindow::new(range.start, range.end),
            (None, _, _) => Ok(TimeWindow::trailing_day(reference.timestamp())),
        }
    }

    /// Window covering the whole unit that contains `date`.
    pub fn calendar_window(&self, date: NaiveDate, unit: CalendarUnit) -> Result<TimeWindow> {
        let start = local_midnight(start_of_unit(date, unit), self.offset);
        let end = end_of_unit(date, unit, self.offset)?;
        Ok(TimeWindow { start, end })
    }

    /// Only calendar views can step backwards.
    pub fn can_walk_back(&self, view: ViewType) -> bool {
        view.unit().is_some()
    }

    /// A calendar view can step forward until it reaches the unit containing `now`.
    pub fn can_walk_forward(&self, view: ViewType, window: &TimeWindow, now: DateTime<Utc>) -> bool {
        let Some(unit) = view.unit() else {
            return false;
        };
        match self.calendar_window(self.date_of(now), unit) {
            Ok(current) => current.start > window.start,
            Err(_) => false,
        }
    }
}

/// Header labels for a view: day number, month name, year.
///
/// The day is shown for day-sized views, the month for everything but the
/// year view. Custom ranges have no labels.
pub fn labels(view: ViewType, date: NaiveDate) -> Vec<String> {
    if view == ViewType::Custom {
        return Vec::new();
    }

    let mut parts = Vec::with_capacity(3);
    if matches!(view, ViewType::Day | ViewType::Last24) {
        parts.push(date.format("%d").to_string());
    }
    if view != ViewType::Year {
        parts.push(date.format("%B").to_string());
    }
    parts.push(date.format("%Y").to_string());
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> WindowResolver {
        WindowResolver::new(FixedOffset::east_opt(0).unwrap())
    }

    fn at(ts: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(ts, 0).unwrap()
    }

    // 2024-03-15T12:00:00Z
    const MID_MARCH: i64 = 1_710_504_000;

    #[test]
    fn test_resolve_last24() {
        let window = resolver().resolve(ViewType::Last24, at(MID_MARCH), None).unwrap();
        assert_eq!(window.end, MID_MARCH);
        assert_eq!(window.start, MID_MARCH - 86_400);
    }

    #[test]
    fn test_resolve_day() {
        let window = resolver().resolve(ViewType::Day, at(MID_MARCH), None).unwrap();
        assert_eq!(window.start, 1_710_460_800); // 2024-03-15T00:00:00Z
        assert_eq!(window.end, 1_710_547_199); // 2024-03-15T23:59:59Z
    }

    #[test]
    fn test_resolve_month() {
        let window = resolver().resolve(ViewType::Month, at(MID_MARCH), None).unwrap();
        assert_eq!(window.start, 1_709_251_200); // 2024-03-01
        assert_eq!(window.end, 1_711_929_599); // 2024-03-31T23:59:59Z
    }

    #[test]
    fn test_resolve_year() {
        let window = resolver().resolve(ViewType::Year, at(MID_MARCH), None).unwrap();
        assert_eq!(window.start, 1_704_067_200); // 2024-01-01
        assert_eq!(window.end, 1_735_689_599); // 2024-12-31T23:59:59Z
    }

    #[test]
    fn test_resolve_custom_with_range() {
        let range = TimeWindow { start: 100, end: 200 };
        let window = resolver()
            .resolve(ViewType::Custom, at(MID_MARCH), Some(range))
            .unwrap();
        assert_eq!(window, range);
    }

    #[test]
    fn test_resolve_custom_inverted_range() {
        let range = TimeWindow { start: 200, end: 100 };
        let result = resolver().resolve(ViewType::Custom, at(MID_MARCH), Some(range));
        assert!(matches!(result, Err(ArchiveError::InvalidRequest(_))));
    }

    #[test]
    fn test_resolve_custom_without_range_is_last24() {
        let window = resolver().resolve(ViewType::Custom, at(MID_MARCH), None).unwrap();
        assert_eq!(window, TimeWindow::trailing_day(MID_MARCH));
    }

    #[test]
    fn test_resolve_day_in_positive_offset() {
        // 2024-03-15T20:00:00Z is already the 16th in UTC+8
        let resolver = WindowResolver::new(FixedOffset::east_opt(8 * 3600).unwrap());
        let window = resolver
            .resolve(ViewType::Day, at(MID_MARCH + 8 * 3600), None)
            .unwrap();
        assert_eq!(window.start, 1_710_547_200 - 8 * 3600);
    }

    #[test]
    fn test_walk_flags() {
        let resolver = resolver();
        let now = at(MID_MARCH);
        let this_month = resolver.resolve(ViewType::Month, now, None).unwrap();
        let last_year = resolver.resolve(ViewType::Month, at(MID_MARCH - 365 * 86_400), None).unwrap();

        assert!(!resolver.can_walk_forward(ViewType::Month, &this_month, now));
        assert!(resolver.can_walk_forward(ViewType::Month, &last_year, now));
        assert!(!resolver.can_walk_forward(ViewType::Last24, &last_year, now));

        assert!(resolver.can_walk_back(ViewType::Day));
        assert!(!resolver.can_walk_back(ViewType::Last24));
        assert!(!resolver.can_walk_back(ViewType::Custom));
    }

    #[test]
    fn test_anchor_round_trips_date() {
        let resolver = WindowResolver::new(FixedOffset::west_opt(5 * 3600).unwrap());
        let date = NaiveDate::from_ymd_opt(2023, 11, 5).unwrap();
        assert_eq!(resolver.date_of(resolver.anchor(date).unwrap()), date);
    }

    #[test]
    fn test_labels() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(labels(ViewType::Day, date), vec!["05", "March", "2024"]);
        assert_eq!(labels(ViewType::Last24, date), vec!["05", "March", "2024"]);
        assert_eq!(labels(ViewType::Month, date), vec!["March", "2024"]);
        assert_eq!(labels(ViewType::Year, date), vec!["2024"]);
        assert!(labels(ViewType::Custom, date).is_empty());
    }
}
