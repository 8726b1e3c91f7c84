// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use clap::{Arg, ArgAction, ArgMatches, arg, value_parser};
use roomcal_core::{DateAnchor, EventKind, FilterState, ResourceId, ViewMode};

use crate::util::OutputFormat;

#[derive(Debug, Clone, Copy)]
pub struct CommonArgs;

impl CommonArgs {
    pub fn verbose() -> Arg {
        arg!(-v --verbose "Show more detailed information")
    }

    pub fn get_verbose(matches: &ArgMatches) -> bool {
        matches.get_flag("verbose")
    }

    pub fn output_format() -> Arg {
        arg!(--"output-format" <FORMAT> "Output format")
            .value_parser(value_parser!(OutputFormat))
            .default_value("table")
    }

    pub fn get_output_format(matches: &ArgMatches) -> OutputFormat {
        matches
            .get_one("output-format")
            .copied()
            .unwrap_or(OutputFormat::Table)
    }
}

/// Arguments selecting the window and filter of a calendar view.
#[derive(Debug, Clone, Copy)]
pub struct CalendarArgs;

impl CalendarArgs {
    pub fn date() -> Arg {
        arg!(-d --date <DATE> "Day to show: today, tomorrow, YYYY-MM-DD, +2w, -3d")
            .value_parser(value_parser!(DateAnchor))
    }

    pub fn get_date(matches: &ArgMatches) -> Option<DateAnchor> {
        matches.get_one("date").copied()
    }

    pub fn mode() -> Arg {
        arg!(-m --mode <MODE> "Show a single day or a whole week")
            .value_parser(value_parser!(ViewMode))
    }

    pub fn get_mode(matches: &ArgMatches) -> Option<ViewMode> {
        matches.get_one("mode").copied()
    }

    pub fn rooms() -> Arg {
        arg!(-r --room <ROOM> "Only show these room ids, may be repeated")
            .action(ArgAction::Append)
    }

    pub fn get_rooms(matches: &ArgMatches) -> Vec<ResourceId> {
        matches
            .get_many::<String>("room")
            .map(|ids| ids.map(|id| ResourceId::from(id.as_str())).collect())
            .unwrap_or_default()
    }

    pub fn kinds() -> Arg {
        arg!(-k --kind <KIND> "Only show these event kinds, may be repeated")
            .value_parser(value_parser!(EventKind))
            .action(ArgAction::Append)
    }

    pub fn get_kinds(matches: &ArgMatches) -> Vec<EventKind> {
        matches
            .get_many::<EventKind>("kind")
            .map(|kinds| kinds.copied().collect())
            .unwrap_or_default()
    }

    /// Builds the filter, where an omitted option keeps everything visible.
    pub fn filter(rooms: &[ResourceId], kinds: &[EventKind]) -> FilterState {
        let mut filter = FilterState::all();
        if !rooms.is_empty() {
            filter = filter.only_resources(rooms.iter().cloned());
        }
        if !kinds.is_empty() {
            filter = filter.only_kinds(kinds.iter().copied());
        }
        filter
    }
}

#[cfg(test)]
mod tests {
    use clap::Command;

    use super::*;

    fn command() -> Command {
        Command::new("test")
            .arg(CalendarArgs::date())
            .arg(CalendarArgs::mode())
            .arg(CalendarArgs::rooms())
            .arg(CalendarArgs::kinds())
            .arg(CommonArgs::output_format())
    }

    #[test]
    fn test_parse_calendar_args() {
        let matches = command()
            .try_get_matches_from([
                "test", "--date", "+1w", "--mode", "day", "-r", "r101", "-r", "r102", "-k",
                "cleaning",
            ])
            .unwrap();

        assert_eq!(CalendarArgs::get_date(&matches), Some(DateAnchor::InWeeks(1)));
        assert_eq!(CalendarArgs::get_mode(&matches), Some(ViewMode::Day));
        assert_eq!(
            CalendarArgs::get_rooms(&matches),
            vec![ResourceId::from("r101"), ResourceId::from("r102")]
        );
        assert_eq!(CalendarArgs::get_kinds(&matches), vec![EventKind::Cleaning]);
        assert_eq!(CommonArgs::get_output_format(&matches), OutputFormat::Table);
    }

    #[test]
    fn test_parse_calendar_args_defaults() {
        let matches = command().try_get_matches_from(["test"]).unwrap();
        assert_eq!(CalendarArgs::get_date(&matches), None);
        assert_eq!(CalendarArgs::get_mode(&matches), None);
        assert!(CalendarArgs::get_rooms(&matches).is_empty());
        assert!(CalendarArgs::get_kinds(&matches).is_empty());
    }

    #[test]
    fn test_parse_invalid_date() {
        let result = command().try_get_matches_from(["test", "--date", "someday"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_filter_from_args() {
        let filter = CalendarArgs::filter(&[], &[]);
        assert_eq!(filter, FilterState::all());

        let filter = CalendarArgs::filter(&[ResourceId::from("r1")], &[EventKind::Booking]);
        assert!(filter.allows_resource(&ResourceId::from("r1")));
        assert!(!filter.allows_resource(&ResourceId::from("r2")));
        assert!(filter.allows_kind(EventKind::Booking));
        assert!(!filter.allows_kind(EventKind::Cleaning));
    }
}
