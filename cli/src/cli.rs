// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, ffi::OsString, path::PathBuf};

use chrono::Local;
use clap::{ArgMatches, Command, ValueHint, arg, builder::styling, crate_version, value_parser};
use colored::Colorize;
use futures::{FutureExt, future::LocalBoxFuture};
use roomcal_core::{APP_NAME, Calendar, Snapshot};
use tracing_subscriber::EnvFilter;

use crate::cmd_browse::CmdBrowse;
use crate::cmd_event::CmdEventList;
use crate::cmd_generate_completion::CmdGenerateCompletion;
use crate::cmd_grid::CmdGrid;
use crate::cmd_room::CmdRoomList;
use crate::cmd_slots::CmdSlots;
use crate::config::{Config, parse_config};

/// Run the roomcal command-line interface.
pub async fn run() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse() {
        Ok(cli) => {
            if let Err(e) = cli.run().await {
                println!("{} {}", "Error:".red(), e);
            }
        }
        Err(e) => println!("{} {}", "Error:".red(), e),
    };
    Ok(())
}

/// Command-line interface
#[derive(Debug)]
pub struct Cli {
    /// Path to the configuration file
    pub config: Option<PathBuf>,

    /// The command to execute
    pub command: Commands,
}

impl Cli {
    /// Create the command-line interface
    pub fn command() -> Command {
        const STYLES: styling::Styles = styling::Styles::styled()
            .header(styling::AnsiColor::Green.on_default().bold())
            .usage(styling::AnsiColor::Green.on_default().bold())
            .literal(styling::AnsiColor::Blue.on_default().bold())
            .placeholder(styling::AnsiColor::Cyan.on_default());

        Command::new(APP_NAME)
            .about("Room occupancy calendar for small hotels, right in your terminal.")
            .author("Zexin Yuan <aim@yzx9.xyz>")
            .version(crate_version!())
            .styles(STYLES)
            .subcommand_required(false) // allow default to grid
            .arg_required_else_help(false)
            .arg(
                arg!(-c --config [CONFIG] "Path to the configuration file")
                    .long_help(
                        "\
Path to the configuration file. Defaults to $XDG_CONFIG_HOME/roomcal/config.toml on Linux and MacOS, \
%LOCALAPPDATA%/roomcal/config.toml on Windows.",
                    )
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
            .subcommand(CmdGrid::command())
            .subcommand(CmdSlots::command())
            .subcommand(CmdBrowse::command())
            .subcommand(
                Command::new("event")
                    .alias("e")
                    .about("Inspect events")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdEventList::command()),
            )
            .subcommand(
                Command::new("room")
                    .alias("r")
                    .about("Inspect rooms")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdRoomList::command()),
            )
            .subcommand(CmdEventList::command().name("events").hide(true))
            .subcommand(CmdRoomList::command().name("rooms").hide(true))
            .subcommand(CmdGenerateCompletion::command())
    }

    /// Parse the command-line arguments
    pub fn parse() -> Result<Self, Box<dyn Error>> {
        let commands = Self::command();
        let matches = commands.get_matches();
        Self::from(matches)
    }

    /// Parse the specified arguments
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, Box<dyn Error>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let commands = Self::command();
        let matches = commands.try_get_matches_from(args)?;
        Self::from(matches)
    }

    /// Create a CLI instance from the `ArgMatches`
    pub fn from(matches: ArgMatches) -> Result<Self, Box<dyn Error>> {
        use Commands::*;
        let command = match matches.subcommand() {
            Some((CmdGrid::NAME, matches)) => Grid(CmdGrid::from(matches)),
            Some((CmdSlots::NAME, matches)) => Slots(CmdSlots::from(matches)?),
            Some((CmdBrowse::NAME, matches)) => Browse(CmdBrowse::from(matches)),
            Some(("event", matches)) => match matches.subcommand() {
                Some((CmdEventList::NAME, matches)) => EventList(CmdEventList::from(matches)),
                _ => unreachable!(),
            },
            Some(("room", matches)) => match matches.subcommand() {
                Some((CmdRoomList::NAME, matches)) => RoomList(CmdRoomList::from(matches)),
                _ => unreachable!(),
            },
            Some(("events", matches)) => EventList(CmdEventList::from(matches)),
            Some(("rooms", matches)) => RoomList(CmdRoomList::from(matches)),
            Some((CmdGenerateCompletion::NAME, matches)) => {
                GenerateCompletion(CmdGenerateCompletion::from(matches))
            }
            None => Grid(CmdGrid::default()),
            _ => unreachable!(),
        };

        let config = matches.get_one("config").cloned();
        Ok(Cli { config, command })
    }

    /// Run the command
    pub async fn run(self) -> Result<(), Box<dyn Error>> {
        self.command.run(self.config).await
    }
}

/// The commands available in the CLI
#[derive(Debug, Clone)]
pub enum Commands {
    /// Show the room by day grid
    Grid(CmdGrid),

    /// Show the hour slots of one room
    Slots(CmdSlots),

    /// Browse the calendar interactively
    Browse(CmdBrowse),

    /// List events
    EventList(CmdEventList),

    /// List rooms
    RoomList(CmdRoomList),

    /// Generate shell completion
    GenerateCompletion(CmdGenerateCompletion),
}

impl Commands {
    /// Run the command with the given configuration
    #[rustfmt::skip]
    pub async fn run(self, config: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
        use Commands::*;
        match self {
            Grid(a)      => Self::run_with(config, |x, _| a.run(x).boxed_local()).await,
            Slots(a)     => Self::run_with(config, |x, _| a.run(x).boxed_local()).await,
            Browse(a)    => Self::run_with(config, |x, c| a.run(x, c).boxed_local()).await,
            EventList(a) => Self::run_with(config, |x, _| a.run(x).boxed_local()).await,
            RoomList(a)  => Self::run_with(config, |x, _| a.run(x).boxed_local()).await,
            GenerateCompletion(a) => a.run(),
        }
    }

    async fn run_with<F>(config: Option<PathBuf>, f: F) -> Result<(), Box<dyn Error>>
    where
        F: for<'a> FnOnce(&'a mut Calendar, Config) -> LocalBoxFuture<'a, Result<(), Box<dyn Error>>>,
    {
        tracing::debug!("parsing configuration...");
        let (core_config, config) = parse_config(config).await?;

        let today = Local::now().date_naive();
        let snapshot = match &core_config.data_path {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading snapshot");
                Snapshot::load(path).await?
            }
            None => {
                tracing::info!("no data path configured, showing the demo hotel");
                Snapshot::demo(today)
            }
        };

        let mut calendar = Calendar::new(&core_config, snapshot, today)?;
        f(&mut calendar, config).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd_generate_completion::Shell;
    use crate::util::OutputFormat;
    use roomcal_core::{DateAnchor, EventKind, ResourceId, ViewMode};

    #[test]
    fn test_parse_config() {
        let cli = Cli::try_parse_from(vec!["test", "-c", "/tmp/config.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/config.toml")));
        assert!(matches!(cli.command, Commands::Grid(_)));
    }

    #[test]
    fn test_parse_default_grid() {
        let cli = Cli::try_parse_from(vec!["test"]).unwrap();
        match cli.command {
            Commands::Grid(cmd) => {
                assert_eq!(cmd.date, None);
                assert_eq!(cmd.mode, None);
            }
            _ => panic!("Expected Grid command"),
        }
    }

    #[test]
    fn test_parse_grid() {
        let args = vec!["test", "grid", "-d", "tomorrow", "-m", "day", "-k", "booking"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Grid(cmd) => {
                assert_eq!(cmd.date, Some(DateAnchor::InDays(1)));
                assert_eq!(cmd.mode, Some(ViewMode::Day));
                assert_eq!(cmd.kinds, vec![EventKind::Booking]);
            }
            _ => panic!("Expected Grid command"),
        }
    }

    #[test]
    fn test_parse_slots() {
        let args = vec!["test", "slots", "--room", "r101"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Slots(cmd) => assert_eq!(cmd.room, ResourceId::from("r101")),
            _ => panic!("Expected Slots command"),
        }
    }

    #[test]
    fn test_parse_slots_requires_room() {
        assert!(Cli::try_parse_from(vec!["test", "slots"]).is_err());
    }

    #[test]
    fn test_parse_browse() {
        let cli = Cli::try_parse_from(vec!["test", "browse"]).unwrap();
        assert!(matches!(cli.command, Commands::Browse(_)));
    }

    #[test]
    fn test_parse_event_list() {
        let args = vec!["test", "event", "list", "--output-format", "json"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::EventList(cmd) => {
                assert_eq!(cmd.output_format, OutputFormat::Json);
            }
            _ => panic!("Expected EventList command"),
        }
    }

    #[test]
    fn test_parse_events_shortcut() {
        let cli = Cli::try_parse_from(vec!["test", "events", "-r", "r102"]).unwrap();
        match cli.command {
            Commands::EventList(cmd) => assert_eq!(cmd.rooms, vec![ResourceId::from("r102")]),
            _ => panic!("Expected EventList command"),
        }
    }

    #[test]
    fn test_parse_room_list() {
        let cli = Cli::try_parse_from(vec!["test", "room", "list"]).unwrap();
        assert!(matches!(cli.command, Commands::RoomList(_)));

        let cli = Cli::try_parse_from(vec!["test", "rooms"]).unwrap();
        assert!(matches!(cli.command, Commands::RoomList(_)));
    }

    #[test]
    fn test_parse_generate_completions() {
        let args = vec!["test", "generate-completion", "zsh"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::GenerateCompletion(cmd) => {
                assert_eq!(cmd.shell, Shell::Zsh);
            }
            _ => panic!("Expected GenerateCompletion command"),
        }
    }
}
