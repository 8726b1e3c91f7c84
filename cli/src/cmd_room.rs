// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::borrow::Cow;
use std::error::Error;

use clap::{ArgMatches, Command};
use roomcal_core::{Calendar, Resource};

use crate::arg::CommonArgs;
use crate::table::{Table, TableColumn, TableStyleBasic, TableStyleJson};
use crate::util::OutputFormat;

#[derive(Debug, Clone, Copy)]
pub struct CmdRoomList {
    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl CmdRoomList {
    pub const NAME: &str = "list";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("List rooms in display order")
            .arg(CommonArgs::output_format())
            .arg(CommonArgs::verbose())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            output_format: CommonArgs::get_output_format(matches),
            verbose: CommonArgs::get_verbose(matches),
        }
    }

    pub async fn run(self, calendar: &mut Calendar) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing rooms...");
        let rooms = calendar.snapshot().resources();
        let columns = RoomColumn::list(self.verbose);
        match self.output_format {
            OutputFormat::Table => {
                let style = TableStyleBasic::new().with_header(self.verbose);
                print!("{}", Table::new(style, &columns, rooms));
            }
            OutputFormat::Json => {
                println!("{}", Table::new(TableStyleJson::new(), &columns, rooms));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomColumn {
    Id,
    Number,
    Category,
    Floor,
}

impl RoomColumn {
    pub fn list(verbose: bool) -> Vec<RoomColumn> {
        use RoomColumn::*;
        match verbose {
            true => vec![Id, Number, Floor, Category],
            false => vec![Number, Category],
        }
    }
}

impl TableColumn<Resource> for RoomColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            RoomColumn::Id => "ID",
            RoomColumn::Number => "Number",
            RoomColumn::Category => "Category",
            RoomColumn::Floor => "Floor",
        }
        .into()
    }

    fn format<'a>(&self, room: &'a Resource) -> Cow<'a, str> {
        match self {
            RoomColumn::Id => room.id.as_str().into(),
            RoomColumn::Number => room.number.as_str().into(),
            RoomColumn::Category => room.category.as_str().into(),
            RoomColumn::Floor => room.floor.as_str().into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_table() {
        colored::control::set_override(false);
        let rooms = vec![
            Resource::new("r101", "101", "Standard", "1"),
            Resource::new("r1001", "1001", "Suite", "10"),
        ];
        let columns = RoomColumn::list(true);
        let out = Table::new(TableStyleBasic::new().with_header(true), &columns, &rooms).to_string();
        assert_eq!(
            out,
            "ID    Number Floor Category\n\
             r101  101    1     Standard\n\
             r1001 1001   10    Suite\n"
        );
    }
}
