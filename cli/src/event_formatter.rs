// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{borrow::Cow, fmt};

use colored::Color;
use roomcal_core::{BookingStatus, CellBlock, Event};

use crate::table::{PaddingDirection, Table, TableColumn, TableStyleBasic, TableStyleJson};
use crate::util::{OutputFormat, format_time_range, pad_to_width, truncate_to_width};

#[derive(Debug)]
pub struct EventFormatter {
    columns: Vec<EventColumn>,
    format: OutputFormat,
}

impl EventFormatter {
    pub fn new(columns: Vec<EventColumn>, format: OutputFormat) -> Self {
        Self { columns, format }
    }

    pub fn format<'a>(&'a self, events: &'a [&'a Event]) -> Display<'a> {
        Display {
            events,
            formatter: self,
        }
    }
}

#[derive(Debug)]
pub struct Display<'a> {
    events: &'a [&'a Event],
    formatter: &'a EventFormatter,
}

impl fmt::Display for Display<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let columns = &self.formatter.columns;
        match self.formatter.format {
            OutputFormat::Json => write!(
                f,
                "{}",
                Table::new(TableStyleJson::new(), columns, self.events)
            ),
            OutputFormat::Table => write!(
                f,
                "{}",
                Table::new(TableStyleBasic::new(), columns, self.events)
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventColumn {
    Id,
    Kind,
    Room,
    TimeRange,
    Title,
    Status,
    Customer,
}

impl EventColumn {
    /// Columns for `event list`.
    pub fn list(verbose: bool) -> Vec<EventColumn> {
        use EventColumn::*;
        match verbose {
            true => vec![Id, Kind, Room, TimeRange, Status, Customer, Title],
            false => vec![Id, Room, TimeRange, Title],
        }
    }
}

impl<'e> TableColumn<&'e Event> for EventColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            EventColumn::Id => "ID",
            EventColumn::Kind => "Kind",
            EventColumn::Room => "Room",
            EventColumn::TimeRange => "Time Range",
            EventColumn::Title => "Title",
            EventColumn::Status => "Status",
            EventColumn::Customer => "Customer",
        }
        .into()
    }

    fn format<'a>(&self, event: &'a &'e Event) -> Cow<'a, str> {
        match self {
            EventColumn::Id => event.id().as_str().into(),
            EventColumn::Kind => event.kind().to_string().into(),
            EventColumn::Room => event.resource().as_str().into(),
            EventColumn::TimeRange => format_time_range(event.start(), event.end()).into(),
            EventColumn::Title => event.title().into(),
            EventColumn::Status => event
                .status()
                .map(|s| s.to_string())
                .unwrap_or_default()
                .into(),
            EventColumn::Customer => event.customer().unwrap_or_default().into(),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            EventColumn::Id => PaddingDirection::Right,
            _ => PaddingDirection::Left,
        }
    }

    fn get_color(&self, event: &&'e Event) -> Option<Color> {
        match self {
            EventColumn::Id | EventColumn::Kind => Some(event_color(event)),
            _ => None,
        }
    }
}

/// The color an event block is drawn with.
pub fn event_color(event: &Event) -> Color {
    match event {
        Event::Booking { status, .. } => match status.unwrap_or_default() {
            BookingStatus::Confirmed => Color::Green,
            BookingStatus::Unconfirmed => Color::Yellow,
        },
        Event::Maintenance { .. } => Color::Red,
        Event::Cleaning { .. } => Color::Cyan,
    }
}

/// Label of a grid cell exactly `width` columns wide.
///
/// `[` and `]` mark where the block starts and ends inside the window, `<`
/// and `>` that it continues into the neighbouring cell, and `+N` that N more
/// blocks are stacked underneath.
pub fn cell_label(top: &CellBlock<'_>, stacked: usize, width: usize) -> String {
    let open = if top.is_start { '[' } else { '<' };
    let close = if top.is_end { ']' } else { '>' };
    let more = match stacked {
        0 | 1 => String::new(),
        n => format!("+{}", n - 1),
    };
    if width < 2 + more.len() {
        return truncate_to_width(&format!("{open}{close}"), width);
    }

    let room = width - 2 - more.len();
    let title = pad_to_width(&truncate_to_width(top.event.title(), room), room);
    format!("{open}{title}{close}{more}")
}

/// Lines of the hover card of an event.
pub fn tooltip_lines(event: &Event) -> Vec<String> {
    let mut lines = vec![
        event.title().to_string(),
        format!("{} in {}", event.kind(), event.resource()),
        format_time_range(event.start(), event.end()),
    ];
    if let Some(status) = event.status() {
        lines.push(format!("Status: {status}"));
    }
    if let Some(customer) = event.customer() {
        lines.push(format!("Customer: {customer}"));
    }
    if let Some(notes) = event.notes() {
        lines.push(notes.to_string());
    }
    lines
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use roomcal_core::EventBase;

    use super::*;

    fn booking() -> Event {
        let day = NaiveDate::from_ymd_opt(2025, 3, 12).unwrap();
        let base = EventBase::new(
            "bk-1",
            "Smith stay",
            day.and_hms_opt(14, 0, 0).unwrap(),
            day.and_hms_opt(18, 0, 0).unwrap(),
            "r101",
        );
        Event::booking(base, Some(BookingStatus::Unconfirmed), Some("John".into()))
    }

    #[test]
    fn test_format_table() {
        colored::control::set_override(false);
        let event = booking();
        let events = [&event];
        let formatter = EventFormatter::new(EventColumn::list(false), OutputFormat::Table);
        let out = formatter.format(&events).to_string();
        assert_eq!(out, "bk-1 r101 2025-03-12 14:00~18:00 Smith stay\n");
    }

    #[test]
    fn test_format_json() {
        let event = booking();
        let events = [&event];
        let formatter = EventFormatter::new(EventColumn::list(true), OutputFormat::Json);
        let out = formatter.format(&events).to_string();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["ID"], "bk-1");
        assert_eq!(value[0]["Kind"], "booking");
        assert_eq!(value[0]["Status"], "unconfirmed");
        assert_eq!(value[0]["Customer"], "John");
    }

    #[test]
    fn test_cell_label() {
        let event = booking();
        let block = CellBlock {
            event: &event,
            is_start: true,
            is_end: false,
            layer: 0,
        };
        assert_eq!(cell_label(&block, 1, 12), "[Smith stay>");
        assert_eq!(cell_label(&block, 3, 12), "[Smith s…>+2");
        assert_eq!(cell_label(&block, 1, 1), "…");
    }

    #[test]
    fn test_tooltip_lines() {
        let lines = tooltip_lines(&booking());
        assert_eq!(
            lines,
            vec![
                "Smith stay",
                "booking in r101",
                "2025-03-12 14:00~18:00",
                "Status: unconfirmed",
                "Customer: John",
            ]
        );
    }

    #[test]
    fn test_event_color() {
        assert_eq!(event_color(&booking()), Color::Yellow);
    }
}
