// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashSet;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use tokio::fs;

use crate::{BookingStatus, Error, Event, EventBase, Resource};

/// The rooms and events supplied to one render pass.
#[derive(Debug, Default, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Snapshot {
    resources: Vec<Resource>,
    events: Vec<Event>,
}

impl Snapshot {
    /// Builds a snapshot, rejecting events that do not end after they start
    /// and duplicated ids.
    ///
    /// Events referencing unknown resources are accepted; layout skips them.
    pub fn new(resources: Vec<Resource>, events: Vec<Event>) -> Result<Self, Error> {
        let mut seen = HashSet::new();
        for resource in &resources {
            if !seen.insert(&resource.id) {
                return Err(Error::DuplicateResource(resource.id.clone()));
            }
        }

        let mut seen = HashSet::new();
        for event in &events {
            event.validate()?;
            if !seen.insert(event.id()) {
                return Err(Error::DuplicateEvent(event.id().clone()));
            }
        }

        Ok(Self { resources, events })
    }

    /// Reads a snapshot from a JSON or TOML file, chosen by extension.
    #[tracing::instrument]
    pub async fn load(path: &Path) -> Result<Self, Error> {
        let content = fs::read_to_string(path).await?;
        let ext = path
            .extension()
            .and_then(|a| a.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let raw: Snapshot = match ext.as_str() {
            "json" => serde_json::from_str(&content)?,
            "toml" => toml::from_str(&content)?,
            _ => return Err(Error::UnsupportedFormat(path.display().to_string())),
        };

        tracing::debug!(
            resources = raw.resources.len(),
            events = raw.events.len(),
            "snapshot loaded"
        );
        Self::new(raw.resources, raw.events)
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn find_event(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id().as_str() == id)
    }

    pub fn find_resource(&self, id: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.id.as_str() == id)
    }

    /// A small hotel with a week of activity around `today`, used when no
    /// data file is configured.
    pub fn demo(today: NaiveDate) -> Self {
        let resources = vec![
            Resource::new("r101", "101", "Standard", "1"),
            Resource::new("r102", "102", "Standard", "1"),
            Resource::new("r103", "103", "Deluxe", "1"),
            Resource::new("r201", "201", "Deluxe", "2"),
            Resource::new("r202", "202", "Suite", "2"),
            Resource::new("r301", "301", "Penthouse", "3"),
        ];

        let at = |days: i64, h: u32, m: u32| -> NaiveDateTime {
            let time = NaiveTime::from_hms_opt(h, m, 0).unwrap_or(NaiveTime::MIN);
            NaiveDateTime::new(today, time) + TimeDelta::days(days)
        };
        let booking = |id: &str, guest: &str, status, start, end, room: &str| {
            let title = format!("{guest} stay");
            let base = EventBase::new(id, title, start, end, room);
            Event::booking(base, Some(status), Some(guest.to_string()))
        };

        let events = vec![
            booking("bk-1001", "John Smith", BookingStatus::Confirmed, at(-2, 14, 0), at(1, 11, 0), "r101"),
            booking("bk-1002", "Sarah Johnson", BookingStatus::Confirmed, at(0, 15, 0), at(4, 10, 0), "r102"),
            booking("bk-1003", "Michael Brown", BookingStatus::Unconfirmed, at(2, 14, 0), at(5, 11, 0), "r103"),
            booking("bk-1004", "Emily Davis", BookingStatus::Confirmed, at(-6, 14, 0), at(9, 11, 0), "r202"),
            booking("bk-1005", "Robert Wilson", BookingStatus::Unconfirmed, at(3, 16, 0), at(4, 10, 0), "r201"),
            Event::maintenance(
                EventBase::new("mt-2001", "AC repair", at(1, 9, 0), at(1, 13, 30), "r201")
                    .with_notes("Vendor confirmed for the morning"),
            ),
            Event::maintenance(EventBase::new(
                "mt-2002",
                "Bathroom renovation",
                at(-1, 8, 0),
                at(6, 18, 0),
                "r301",
            )),
            Event::cleaning(EventBase::new("cl-3001", "Checkout clean", at(1, 11, 0), at(1, 12, 0), "r101")),
            Event::cleaning(EventBase::new("cl-3002", "Deep clean", at(5, 11, 15), at(5, 13, 15), "r103")),
            Event::cleaning(EventBase::new("cl-3003", "Turndown", at(0, 19, 5), at(0, 19, 35), "r202")),
        ];

        Self { resources, events }
    }
}
