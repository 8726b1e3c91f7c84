// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::fmt::Write;

use clap::{ArgMatches, Command};
use colored::Colorize;
use roomcal_core::{Calendar, DateAnchor, EventKind, ResourceGrid, ResourceId, ViewMode};

use crate::arg::{CalendarArgs, CommonArgs};
use crate::event_formatter::{cell_label, event_color};
use crate::util::{
    OutputFormat, focus_calendar, format_day_header, pad_to_width, truncate_to_width,
};

const ROOM_WIDTH: usize = 8;
const CELL_WIDTH: usize = 14;

#[derive(Debug, Clone)]
pub struct CmdGrid {
    pub date: Option<DateAnchor>,
    pub mode: Option<ViewMode>,
    pub rooms: Vec<ResourceId>,
    pub kinds: Vec<EventKind>,
    pub output_format: OutputFormat,
}

impl Default for CmdGrid {
    fn default() -> Self {
        Self {
            date: None,
            mode: None,
            rooms: Vec::new(),
            kinds: Vec::new(),
            output_format: OutputFormat::Table,
        }
    }
}

impl CmdGrid {
    pub const NAME: &str = "grid";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("g")
            .about("Show rooms by days, the default command")
            .arg(CalendarArgs::date())
            .arg(CalendarArgs::mode())
            .arg(CalendarArgs::rooms())
            .arg(CalendarArgs::kinds())
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            date: CalendarArgs::get_date(matches),
            mode: CalendarArgs::get_mode(matches),
            rooms: CalendarArgs::get_rooms(matches),
            kinds: CalendarArgs::get_kinds(matches),
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub async fn run(self, calendar: &mut Calendar) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "showing room grid...");
        let filter = CalendarArgs::filter(&self.rooms, &self.kinds);
        focus_calendar(calendar, self.date, self.mode, filter)?;

        let grid = calendar.grid();
        match self.output_format {
            OutputFormat::Table => print!("{}", render_grid(&grid)),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&grid_json(&grid))?),
        }
        Ok(())
    }
}

/// Renders the grid as text, one line per room and one column per day. A cell
/// shows its topmost block, see [`cell_label`].
pub fn render_grid(grid: &ResourceGrid<'_>) -> String {
    let mut out = String::new();

    let _ = write!(out, "{}", pad_to_width("Room", ROOM_WIDTH).bold());
    for day in grid.window.days() {
        let header = pad_to_width(&format_day_header(*day), CELL_WIDTH);
        let _ = write!(out, " {}", header.bold());
    }
    out.push('\n');

    for (i, row) in grid.rows.iter().enumerate() {
        let room = truncate_to_width(&row.resource.number, ROOM_WIDTH);
        out.push_str(&pad_to_width(&room, ROOM_WIDTH));
        for (column, blocks) in row.cells.iter().enumerate() {
            out.push(' ');
            let Some(top) = grid.topmost(i, column) else {
                out.push_str(&pad_to_width("·", CELL_WIDTH));
                continue;
            };

            let cell = cell_label(top, blocks.len(), CELL_WIDTH);
            let _ = write!(out, "{}", cell.color(event_color(top.event)));
        }
        out.push('\n');
    }
    out
}

fn grid_json(grid: &ResourceGrid<'_>) -> serde_json::Value {
    let rows: Vec<serde_json::Value> = grid
        .rows
        .iter()
        .map(|row| {
            let blocks: Vec<serde_json::Value> = row
                .spans
                .iter()
                .map(|span| {
                    serde_json::json!({
                        "id": span.event.id().as_str(),
                        "kind": span.event.kind().as_ref(),
                        "title": span.event.title(),
                        "first_day": grid.window.days()[span.first_column].to_string(),
                        "last_day": grid.window.days()[span.last_column].to_string(),
                        "is_start": span.is_start,
                        "is_end": span.is_end,
                    })
                })
                .collect();
            serde_json::json!({
                "room": row.resource.id.as_str(),
                "number": row.resource.number,
                "blocks": blocks,
            })
        })
        .collect();

    serde_json::json!({
        "days": grid.window.days().iter().map(|d| d.to_string()).collect::<Vec<_>>(),
        "rows": rows,
    })
}
