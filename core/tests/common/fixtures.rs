// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Test data factories for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime, Weekday};
use roomcal_core::{Config, DateWindow, Event, EventBase, Resource, ViewMode};

/// A date in 2025-03, the month all fixtures live in.
#[must_use]
pub fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
}

/// A local date-time in 2025-03.
#[must_use]
pub fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    date(day).and_hms_opt(hour, minute, 0).unwrap()
}

/// The Monday-first week containing `day`.
#[must_use]
pub fn week_of(day: u32) -> DateWindow {
    DateWindow::resolve(date(day), ViewMode::Week, Weekday::Mon).unwrap()
}

/// Three rooms, `r1`..`r3`.
#[must_use]
pub fn sample_rooms() -> Vec<Resource> {
    vec![
        Resource::new("r1", "101", "Standard", "1"),
        Resource::new("r2", "102", "Deluxe", "1"),
        Resource::new("r3", "201", "Suite", "2"),
    ]
}

#[must_use]
pub fn booking(id: &str, start: NaiveDateTime, end: NaiveDateTime, room: &str) -> Event {
    Event::booking(EventBase::new(id, format!("Stay {id}"), start, end, room), None, None)
}

#[must_use]
pub fn maintenance(id: &str, start: NaiveDateTime, end: NaiveDateTime, room: &str) -> Event {
    Event::maintenance(EventBase::new(id, format!("Repair {id}"), start, end, room))
}

#[must_use]
pub fn cleaning(id: &str, start: NaiveDateTime, end: NaiveDateTime, room: &str) -> Event {
    Event::cleaning(EventBase::new(id, format!("Clean {id}"), start, end, room))
}

/// Default configuration pointing at `data_path`.
#[must_use]
pub fn test_config(data_path: Option<PathBuf>) -> Config {
    Config {
        data_path,
        ..Config::default()
    }
}

/// Writes `content` to `name` inside a fresh temporary directory.
///
/// The directory lives as long as the returned guard.
pub async fn write_temp_file(
    name: &str,
    content: &str,
) -> Result<(tempfile::TempDir, PathBuf), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join(name);
    tokio::fs::write(&path, content).await?;
    Ok((dir, path))
}
