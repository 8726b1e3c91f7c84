// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use chrono::{NaiveDate, NaiveDateTime};
use roomcal_core::{Calendar, DateAnchor, Error as CoreError, FilterState, ViewMode};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// The output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

/// Resolves a `--date` value, defaulting to `today`.
pub fn resolve_anchor(anchor: Option<DateAnchor>, today: NaiveDate) -> Result<NaiveDate, CoreError> {
    anchor.unwrap_or_default().resolve(today)
}

/// Points the calendar at the requested day and mode and applies the filter.
///
/// Relative anchors resolve against the day the calendar currently shows.
pub fn focus_calendar(
    calendar: &mut Calendar,
    date: Option<DateAnchor>,
    mode: Option<ViewMode>,
    filter: FilterState,
) -> Result<(), CoreError> {
    if let Some(mode) = mode {
        calendar.set_view_mode(mode)?;
    }
    if date.is_some() {
        let day = resolve_anchor(date, calendar.state().anchor)?;
        calendar.go_to(day)?;
    }
    calendar.set_filter(filter)?;
    Ok(())
}

/// Formats `[start, end)` compactly, omitting the second date when equal.
pub fn format_time_range(start: NaiveDateTime, end: NaiveDateTime) -> String {
    if start.date() == end.date() {
        format!(
            "{} {}~{}",
            start.date().format("%Y-%m-%d"),
            start.format("%H:%M"),
            end.format("%H:%M")
        )
    } else {
        format!(
            "{}~{}",
            start.format("%Y-%m-%d %H:%M"),
            end.format("%Y-%m-%d %H:%M")
        )
    }
}

/// Short column header for a day, e.g. `Wed 03-12`.
pub fn format_day_header(day: NaiveDate) -> String {
    day.format("%a %m-%d").to_string()
}

/// Cuts `s` to at most `width` terminal columns without splitting graphemes,
/// appending `…` when something was dropped.
pub fn truncate_to_width(s: &str, width: usize) -> String {
    if s.width() <= width {
        return s.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for g in s.graphemes(true) {
        let w = g.width();
        if used + w + 1 > width {
            break;
        }
        out.push_str(g);
        used += w;
    }
    out.push('…');
    out
}

/// Pads `s` with spaces on the right up to `width` terminal columns.
pub fn pad_to_width(s: &str, width: usize) -> String {
    let w = s.width();
    if w >= width {
        s.to_string()
    } else {
        format!("{s}{}", " ".repeat(width - w))
    }
}
