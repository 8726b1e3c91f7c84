// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, Weekday};

use crate::Error;
use crate::datetime::{shift_days, start_of_day, week_start};

/// How many days the calendar shows at once.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum ViewMode {
    /// A single day.
    Day,

    /// Seven days starting on the configured first day of the week.
    #[default]
    Week,
}

impl ViewMode {
    /// Number of days a navigation step moves the anchor.
    pub fn step_days(self) -> i64 {
        match self {
            ViewMode::Day => 1,
            ViewMode::Week => 7,
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewMode::Day => f.write_str("day"),
            ViewMode::Week => f.write_str("week"),
        }
    }
}

/// The contiguous set of calendar days currently displayed.
///
/// `start` is midnight of the first day and `end` is midnight after the last
/// day, so the window covers the half-open interval `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DateWindow {
    days: Vec<NaiveDate>,
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl DateWindow {
    /// Computes the days to display around `anchor`.
    pub fn resolve(anchor: NaiveDate, mode: ViewMode, week_starts_on: Weekday) -> Result<Self, Error> {
        let first = match mode {
            ViewMode::Day => anchor,
            ViewMode::Week => week_start(anchor, week_starts_on)?,
        };

        let len = mode.step_days();
        let days = (0..len)
            .map(|i| shift_days(first, i))
            .collect::<Result<Vec<_>, _>>()?;

        let last = days[days.len() - 1];
        let end = start_of_day(shift_days(last, 1)?);
        Ok(Self {
            start: start_of_day(first),
            end,
            days,
        })
    }

    /// Every day in the window, in order.
    pub fn days(&self) -> &[NaiveDate] {
        &self.days
    }

    /// Inclusive start of the window.
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// Exclusive end of the window.
    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn first_day(&self) -> NaiveDate {
        self.days[0]
    }

    pub fn last_day(&self) -> NaiveDate {
        self.days[self.days.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn contains_day(&self, day: NaiveDate) -> bool {
        self.first_day() <= day && day <= self.last_day()
    }

    /// Zero-based column index of `day`, if visible.
    pub fn column_of(&self, day: NaiveDate) -> Option<usize> {
        if !self.contains_day(day) {
            return None;
        }
        usize::try_from((day - self.first_day()).num_days()).ok()
    }
}

/// Computes the days to display for `anchor`, see [`DateWindow::resolve`].
pub fn resolve_window(
    anchor: NaiveDate,
    mode: ViewMode,
    week_starts_on: Weekday,
) -> Result<DateWindow, Error> {
    DateWindow::resolve(anchor, mode, week_starts_on)
}

#[cfg(test)]
mod tests {
    use chrono::Datelike;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn week_window_starts_on_configured_day() {
        let window = resolve_window(date(2025, 3, 12), ViewMode::Week, Weekday::Mon).unwrap();
        let expected: Vec<_> = (10..=16).map(|d| date(2025, 3, d)).collect();
        assert_eq!(window.days(), expected.as_slice());
        assert_eq!(window.start(), start_of_day(date(2025, 3, 10)));
        assert_eq!(window.end(), start_of_day(date(2025, 3, 17)));
    }

    #[test]
    fn week_window_crosses_year_boundary() {
        let window = resolve_window(date(2026, 1, 1), ViewMode::Week, Weekday::Sun).unwrap();
        assert_eq!(window.len(), 7);
        assert!(!window.is_empty());
        assert_eq!(window.first_day(), date(2025, 12, 28));
        assert_eq!(window.last_day(), date(2026, 1, 3));
        for pair in window.days().windows(2) {
            assert_eq!(pair[1] - pair[0], chrono::TimeDelta::days(1));
        }
    }

    #[test]
    fn week_window_first_day_matches_every_week_start() {
        let anchor = date(2024, 2, 29);
        for first in [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ] {
            let window = resolve_window(anchor, ViewMode::Week, first).unwrap();
            assert_eq!(window.first_day().weekday(), first);
            assert!(window.contains_day(anchor));
            assert_eq!(window.len(), 7);
        }
    }

    #[test]
    fn day_window_is_the_anchor() {
        let anchor = date(2025, 3, 12);
        let window = resolve_window(anchor, ViewMode::Day, Weekday::Mon).unwrap();
        assert_eq!(window.days(), &[anchor]);
        assert_eq!(window.start(), start_of_day(anchor));
        assert_eq!(window.end(), start_of_day(date(2025, 3, 13)));
    }

    #[test]
    fn column_of_visible_days_only() {
        let window = resolve_window(date(2025, 3, 12), ViewMode::Week, Weekday::Mon).unwrap();
        assert_eq!(window.column_of(date(2025, 3, 10)), Some(0));
        assert_eq!(window.column_of(date(2025, 3, 16)), Some(6));
        assert_eq!(window.column_of(date(2025, 3, 17)), None);
        assert_eq!(window.column_of(date(2025, 3, 9)), None);
    }

    #[test]
    fn resolve_fails_at_calendar_edge() {
        assert!(resolve_window(NaiveDate::MAX, ViewMode::Day, Weekday::Mon).is_err());
    }
}
