// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

use crate::Error;

/// NOTE: Used in snapshots and machine-readable output, so it should be stable across runs.
pub const STABLE_FORMAT_DATEONLY: &str = "%Y-%m-%d";
pub const STABLE_FORMAT_DATETIME: &str = "%Y-%m-%dT%H:%M:%S";

/// The position of a date relative to a range defined by a first and last date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangePosition {
    /// The date is before the first day of the range.
    Before,

    /// The date is within the range.
    InRange,

    /// The date is after the last day of the range.
    After,

    /// The range is invalid, e.g., first date is after last date.
    InvalidRange,
}

impl RangePosition {
    /// Locates `day` relative to the inclusive range `[first, last]`.
    pub fn of(day: NaiveDate, first: NaiveDate, last: NaiveDate) -> Self {
        if first > last {
            RangePosition::InvalidRange
        } else if day < first {
            RangePosition::Before
        } else if day > last {
            RangePosition::After
        } else {
            RangePosition::InRange
        }
    }
}

pub const fn start_of_day_naive() -> NaiveTime {
    NaiveTime::from_hms_opt(0, 0, 0).expect("00:00:00 must exist in NaiveTime")
}

/// Midnight at the beginning of `date`.
pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    NaiveDateTime::new(date, start_of_day_naive())
}

/// Moves `date` by `n` days in either direction.
pub fn shift_days(date: NaiveDate, n: i64) -> Result<NaiveDate, Error> {
    let days = Days::new(n.unsigned_abs());
    let shifted = if n >= 0 {
        date.checked_add_days(days)
    } else {
        date.checked_sub_days(days)
    };
    shifted.ok_or(Error::DateOutOfRange(date))
}

/// The most recent `first_day` at or before `date`.
pub fn week_start(date: NaiveDate, first_day: Weekday) -> Result<NaiveDate, Error> {
    let offset = (date.weekday().num_days_from_monday() + 7 - first_day.num_days_from_monday()) % 7;
    shift_days(date, -i64::from(offset))
}
