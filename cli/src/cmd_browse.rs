// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command};
use roomcal_core::{Calendar, DateAnchor, EventKind, ResourceId, ViewMode};

use crate::arg::CalendarArgs;
use crate::config::Config;
use crate::tui;
use crate::util::focus_calendar;

#[derive(Debug, Clone)]
pub struct CmdBrowse {
    pub date: Option<DateAnchor>,
    pub mode: Option<ViewMode>,
    pub rooms: Vec<ResourceId>,
    pub kinds: Vec<EventKind>,
}

impl CmdBrowse {
    pub const NAME: &str = "browse";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("b")
            .about("Browse the calendar interactively")
            .arg(CalendarArgs::date())
            .arg(CalendarArgs::mode())
            .arg(CalendarArgs::rooms())
            .arg(CalendarArgs::kinds())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            date: CalendarArgs::get_date(matches),
            mode: CalendarArgs::get_mode(matches),
            rooms: CalendarArgs::get_rooms(matches),
            kinds: CalendarArgs::get_kinds(matches),
        }
    }

    pub async fn run(self, calendar: &mut Calendar, config: Config) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "browsing calendar...");
        let filter = CalendarArgs::filter(&self.rooms, &self.kinds);
        focus_calendar(calendar, self.date, self.mode, filter)?;

        // Tooltips are positioned in terminal cells here
        calendar.set_tooltip_margin(config.tooltip_margin);
        tui::browse(calendar)
    }
}
