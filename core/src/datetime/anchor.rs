// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{str::FromStr, sync::OnceLock};

use chrono::NaiveDate;
use regex::Regex;

use crate::Error;
use crate::datetime::util::{STABLE_FORMAT_DATEONLY, shift_days};

/// A calendar day expressed relative to today or as a fixed date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateAnchor {
    /// A specific number of days in the future or past.
    InDays(i64),

    /// A specific number of weeks in the future or past.
    InWeeks(i64),

    /// A specific date.
    Date(NaiveDate),
}

impl DateAnchor {
    /// Represents the current date.
    pub fn today() -> Self {
        DateAnchor::InDays(0)
    }

    /// Represents tomorrow, which is one day after today.
    pub fn tomorrow() -> Self {
        DateAnchor::InDays(1)
    }

    /// Represents yesterday, which is one day before today.
    pub fn yesterday() -> Self {
        DateAnchor::InDays(-1)
    }

    /// Resolves the anchor against `today`.
    pub fn resolve(self, today: NaiveDate) -> Result<NaiveDate, Error> {
        match self {
            DateAnchor::InDays(n) => shift_days(today, n),
            DateAnchor::InWeeks(n) => shift_days(today, n.saturating_mul(7)),
            DateAnchor::Date(date) => Ok(date),
        }
    }
}

impl Default for DateAnchor {
    fn default() -> Self {
        Self::today()
    }
}

impl FromStr for DateAnchor {
    type Err = String;

    fn from_str(t: &str) -> Result<Self, Self::Err> {
        // Handle keywords
        match t.trim() {
            "yesterday" => return Ok(Self::yesterday()),
            "tomorrow" => return Ok(Self::tomorrow()),
            "today" => return Ok(Self::today()),
            _ => {}
        }

        if let Ok(date) = NaiveDate::parse_from_str(t.trim(), STABLE_FORMAT_DATEONLY) {
            Ok(Self::Date(date))
        } else if let Some((n, unit)) = parse_offset(t) {
            match unit {
                'd' => Ok(Self::InDays(n)),
                _ => Ok(Self::InWeeks(n)),
            }
        } else {
            Err(format!("Invalid date anchor: {t}"))
        }
    }
}

/// Parse offsets like "3d", "+2w", "-1 week", "in 10 days"
fn parse_offset(s: &str) -> Option<(i64, char)> {
    const RE: &str = r"(?i)^\s*(?:in\s*)?([+-]?)\s*(\d+)\s*(d|days?|w|weeks?)\s*$";
    static REGEX: OnceLock<Regex> = OnceLock::new();
    let re = REGEX.get_or_init(|| Regex::new(RE).unwrap());
    let captures = re.captures(s)?;
    let num = captures[2].parse::<i64>().ok()?;
    let num = if &captures[1] == "-" { -num } else { num };
    let unit = captures[3].to_ascii_lowercase().chars().next()?;
    Some((num, unit))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_from_str_keywords() {
        for (s, expected) in [
            ("today", DateAnchor::today()),
            ("yesterday", DateAnchor::yesterday()),
            ("tomorrow", DateAnchor::tomorrow()),
        ] {
            let anchor = DateAnchor::from_str(s).unwrap();
            assert_eq!(anchor, expected);
        }
    }

    #[test]
    fn test_from_str_date() {
        let anchor = DateAnchor::from_str("2025-03-12").unwrap();
        assert_eq!(anchor, DateAnchor::Date(date(2025, 3, 12)));
    }

    #[test]
    fn test_from_str_days() {
        for s in ["in 10days", "in 10D", "   IN   10   days   ", "10d", "+10 d", "10 DAY"] {
            let anchor = DateAnchor::from_str(s).unwrap();
            assert_eq!(anchor, DateAnchor::InDays(10), "Failed to parse '{}'", s);
        }
        assert_eq!(DateAnchor::from_str("-3d").unwrap(), DateAnchor::InDays(-3));
    }

    #[test]
    fn test_from_str_weeks() {
        for s in ["2w", "+2w", "in 2 weeks", "2 WEEK"] {
            let anchor = DateAnchor::from_str(s).unwrap();
            assert_eq!(anchor, DateAnchor::InWeeks(2), "Failed to parse '{}'", s);
        }
        assert_eq!(DateAnchor::from_str("-1 week").unwrap(), DateAnchor::InWeeks(-1));
    }

    #[test]
    fn test_from_str_invalid() {
        let result = DateAnchor::from_str("next blue moon");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Invalid date anchor"));
        assert!(DateAnchor::from_str("2025-13-01").is_err());
    }

    #[test]
    fn test_resolve_relative_anchors() {
        let today = date(2025, 12, 30);
        assert_eq!(DateAnchor::today().resolve(today).unwrap(), today);
        assert_eq!(DateAnchor::tomorrow().resolve(today).unwrap(), date(2025, 12, 31));
        assert_eq!(DateAnchor::InDays(3).resolve(today).unwrap(), date(2026, 1, 2));
        assert_eq!(DateAnchor::InWeeks(-1).resolve(today).unwrap(), date(2025, 12, 23));
    }

    #[test]
    fn test_resolve_fixed_date_ignores_today() {
        let anchor = DateAnchor::Date(date(2025, 3, 12));
        assert_eq!(anchor.resolve(date(1999, 1, 1)).unwrap(), date(2025, 3, 12));
    }
}
