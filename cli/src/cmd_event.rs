// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command};
use colored::Colorize;
use roomcal_core::{Calendar, DateAnchor, Event, EventKind, ResourceId, ViewMode};

use crate::arg::{CalendarArgs, CommonArgs};
use crate::event_formatter::{EventColumn, EventFormatter};
use crate::util::{OutputFormat, focus_calendar};

#[derive(Debug, Clone)]
pub struct CmdEventList {
    pub date: Option<DateAnchor>,
    pub mode: Option<ViewMode>,
    pub rooms: Vec<ResourceId>,
    pub kinds: Vec<EventKind>,
    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl CmdEventList {
    pub const NAME: &str = "list";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("List events visible in the window")
            .arg(CalendarArgs::date())
            .arg(CalendarArgs::mode())
            .arg(CalendarArgs::rooms())
            .arg(CalendarArgs::kinds())
            .arg(CommonArgs::output_format())
            .arg(CommonArgs::verbose())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            date: CalendarArgs::get_date(matches),
            mode: CalendarArgs::get_mode(matches),
            rooms: CalendarArgs::get_rooms(matches),
            kinds: CalendarArgs::get_kinds(matches),
            output_format: CommonArgs::get_output_format(matches),
            verbose: CommonArgs::get_verbose(matches),
        }
    }

    pub async fn run(self, calendar: &mut Calendar) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing events...");
        let filter = CalendarArgs::filter(&self.rooms, &self.kinds);
        focus_calendar(calendar, self.date, self.mode, filter)?;

        let events = calendar.visible_events();
        if events.is_empty() && self.output_format == OutputFormat::Table {
            println!("{}", "No events found".italic());
            return Ok(());
        }

        print_events(&events, self.output_format, self.verbose);
        Ok(())
    }
}

fn print_events(events: &[&Event], output_format: OutputFormat, verbose: bool) {
    let formatter = EventFormatter::new(EventColumn::list(verbose), output_format);
    match output_format {
        OutputFormat::Table => print!("{}", formatter.format(events)),
        OutputFormat::Json => println!("{}", formatter.format(events)),
    }
}
