// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Command-line and terminal front end of roomcal.

mod arg;
mod cli;
mod cmd_browse;
mod cmd_event;
mod cmd_generate_completion;
mod cmd_grid;
mod cmd_room;
mod cmd_slots;
mod config;
mod event_formatter;
mod table;
mod tui;
mod util;

pub use crate::cli::{Cli, Commands, run};
pub use crate::config::Config;
