// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::fmt::Write;

use clap::{ArgMatches, Command, arg};
use colored::Colorize;
use roomcal_core::{
    Calendar, DateAnchor, DateWindow, EventKind, ResourceId, STABLE_FORMAT_DATEONLY,
    STABLE_FORMAT_DATETIME, SlotBlock, SlotGrid, ViewMode,
};

use crate::arg::{CalendarArgs, CommonArgs};
use crate::event_formatter::event_color;
use crate::util::{
    OutputFormat, focus_calendar, format_day_header, pad_to_width, truncate_to_width,
};

const TIME_WIDTH: usize = 5;
const CELL_WIDTH: usize = 14;

#[derive(Debug, Clone)]
pub struct CmdSlots {
    pub room: ResourceId,
    pub date: Option<DateAnchor>,
    pub mode: Option<ViewMode>,
    pub kinds: Vec<EventKind>,
    pub output_format: OutputFormat,
}

impl CmdSlots {
    pub const NAME: &str = "slots";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("s")
            .about("Show the hour slots of one room")
            .arg(arg!(-r --room <ROOM> "The room id").required(true))
            .arg(CalendarArgs::date())
            .arg(CalendarArgs::mode())
            .arg(CalendarArgs::kinds())
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        let room = matches
            .get_one::<String>("room")
            .ok_or("Room is required")?
            .as_str()
            .into();

        Ok(Self {
            room,
            date: CalendarArgs::get_date(matches),
            mode: CalendarArgs::get_mode(matches),
            kinds: CalendarArgs::get_kinds(matches),
            output_format: CommonArgs::get_output_format(matches),
        })
    }

    pub async fn run(self, calendar: &mut Calendar) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "showing hour slots...");
        if calendar.snapshot().find_resource(self.room.as_str()).is_none() {
            return Err(format!("Room not found: {}", self.room).into());
        }

        let filter = CalendarArgs::filter(&[], &self.kinds);
        focus_calendar(calendar, self.date, self.mode, filter)?;

        let blocks = calendar.slot_column(&self.room)?;
        match self.output_format {
            OutputFormat::Table => {
                print!("{}", render_slots(&blocks, calendar.window(), calendar.slot_grid()))
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&slots_json(&blocks))?)
            }
        }
        Ok(())
    }
}

/// Renders one line per slot and one column per day.
///
/// A block is labelled in the slot it starts at and continued with `│` for the
/// slots its height covers.
pub fn render_slots(blocks: &[SlotBlock<'_>], window: &DateWindow, grid: &SlotGrid) -> String {
    let mut out = String::new();
    let _ = write!(out, "{}", pad_to_width("Time", TIME_WIDTH).bold());
    for day in window.days() {
        let header = pad_to_width(&format_day_header(*day), CELL_WIDTH);
        let _ = write!(out, " {}", header.bold());
    }
    out.push('\n');

    let mut covered = vec![0usize; window.len()];
    for slot in grid.slot_times() {
        let _ = write!(out, "{}", slot.format("%H:%M"));
        for (column, day) in window.days().iter().enumerate() {
            out.push(' ');
            let starting: Vec<&SlotBlock<'_>> = blocks
                .iter()
                .filter(|b| b.day == *day && b.slot == slot)
                .collect();

            match starting.last() {
                Some(top) => {
                    let spanned = (top.height / grid.height).ceil().max(1.0) as usize;
                    covered[column] = spanned - 1;
                    let more = match starting.len() {
                        1 => String::new(),
                        n => format!("+{}", n - 1),
                    };
                    let width = CELL_WIDTH - more.len();
                    let title = pad_to_width(&truncate_to_width(top.event.title(), width), width);
                    let _ = write!(out, "{}{more}", title.color(event_color(top.event)));
                }
                None if covered[column] > 0 => {
                    covered[column] -= 1;
                    out.push_str(&pad_to_width("│", CELL_WIDTH));
                }
                None => out.push_str(&pad_to_width("", CELL_WIDTH)),
            }
        }
        out.push('\n');
    }
    out
}

fn slots_json(blocks: &[SlotBlock<'_>]) -> serde_json::Value {
    blocks
        .iter()
        .map(|b| {
            serde_json::json!({
                "id": b.event.id().as_str(),
                "kind": b.event.kind().as_ref(),
                "title": b.event.title(),
                "day": b.day.format(STABLE_FORMAT_DATEONLY).to_string(),
                "slot": b.slot.format("%H:%M").to_string(),
                "start": b.event.start().format(STABLE_FORMAT_DATETIME).to_string(),
                "end": b.event.end().format(STABLE_FORMAT_DATETIME).to_string(),
                "height": b.height,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Weekday};
    use roomcal_core::{Event, EventBase, layout_slot_column};

    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn events() -> Vec<Event> {
        vec![Event::cleaning(EventBase::new(
            "c-1",
            "Deep clean",
            date(12).and_hms_opt(9, 0, 0).unwrap(),
            date(12).and_hms_opt(9, 45, 0).unwrap(),
            "r1",
        ))]
    }

    #[test]
    fn test_render_slots() {
        colored::control::set_override(false);
        let events = events();
        let window = DateWindow::resolve(date(12), ViewMode::Day, Weekday::Mon).unwrap();
        let grid = SlotGrid::default();
        let blocks = layout_slot_column(&events, &ResourceId::from("r1"), &window, &grid).unwrap();
        let out = render_slots(&blocks, &window, &grid);

        let line = |time: &str| {
            out.lines()
                .find(|l| l.starts_with(time))
                .unwrap()
                .trim_end()
                .to_string()
        };
        assert_eq!(line("09:00"), "09:00 Deep clean");
        assert_eq!(line("09:15"), "09:15 │");
        assert_eq!(line("09:30"), "09:30 │");
        assert_eq!(line("09:45"), "09:45");
    }

    #[test]
    fn test_slots_json() {
        let events = events();
        let window = DateWindow::resolve(date(12), ViewMode::Day, Weekday::Mon).unwrap();
        let grid = SlotGrid::default();
        let blocks = layout_slot_column(&events, &ResourceId::from("r1"), &window, &grid).unwrap();
        let value = slots_json(&blocks);

        assert_eq!(value[0]["id"], "c-1");
        assert_eq!(value[0]["slot"], "09:00");
        assert_eq!(value[0]["day"], "2025-03-12");
        assert_eq!(value[0]["start"], "2025-03-12T09:00:00");
        assert_eq!(value[0]["height"], 3.0 * grid.height);
    }
}
