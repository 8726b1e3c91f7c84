// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{fmt, str::FromStr};

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

use crate::datetime::RangePosition;
use crate::{Error, ResourceId};

/// Opaque identifier of a calendar event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    /// Creates a new event id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EventId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for EventId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Fields shared by every kind of event.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EventBase {
    /// The unique identifier.
    pub id: EventId,

    /// Title shown on the block.
    pub title: String,

    /// Inclusive start, hotel-local wall-clock time.
    pub start: NaiveDateTime,

    /// Exclusive end, hotel-local wall-clock time.
    pub end: NaiveDateTime,

    /// The resource this event occupies.
    pub resource: ResourceId,

    /// Free-text notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl EventBase {
    /// Creates the shared part of an event without notes.
    pub fn new(
        id: impl Into<EventId>,
        title: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
        resource: impl Into<ResourceId>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            start,
            end,
            resource: resource.into(),
            notes: None,
        }
    }

    /// Attaches notes to the event.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// A time-bounded occurrence assigned to exactly one resource.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Event {
    /// A guest stay.
    Booking {
        /// Shared fields.
        #[serde(flatten)]
        base: EventBase,

        /// Confirmation status of the booking.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        status: Option<BookingStatus>,

        /// Name of the guest.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        customer: Option<String>,
    },

    /// The room is out of order.
    Maintenance {
        /// Shared fields.
        #[serde(flatten)]
        base: EventBase,
    },

    /// Housekeeping.
    Cleaning {
        /// Shared fields.
        #[serde(flatten)]
        base: EventBase,
    },
}

impl Event {
    /// Creates a booking.
    pub fn booking(
        base: EventBase,
        status: Option<BookingStatus>,
        customer: Option<String>,
    ) -> Self {
        Event::Booking {
            base,
            status,
            customer,
        }
    }

    /// Creates a maintenance block.
    pub fn maintenance(base: EventBase) -> Self {
        Event::Maintenance { base }
    }

    /// Creates a cleaning block.
    pub fn cleaning(base: EventBase) -> Self {
        Event::Cleaning { base }
    }

    /// The shared fields.
    pub fn base(&self) -> &EventBase {
        match self {
            Event::Booking { base, .. } | Event::Maintenance { base } | Event::Cleaning { base } => {
                base
            }
        }
    }

    /// The kind discriminant.
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Booking { .. } => EventKind::Booking,
            Event::Maintenance { .. } => EventKind::Maintenance,
            Event::Cleaning { .. } => EventKind::Cleaning,
        }
    }

    pub fn id(&self) -> &EventId {
        &self.base().id
    }

    pub fn title(&self) -> &str {
        &self.base().title
    }

    pub fn start(&self) -> NaiveDateTime {
        self.base().start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.base().end
    }

    pub fn resource(&self) -> &ResourceId {
        &self.base().resource
    }

    pub fn notes(&self) -> Option<&str> {
        self.base().notes.as_deref()
    }

    /// The booking status, only present on bookings.
    pub fn status(&self) -> Option<BookingStatus> {
        match self {
            Event::Booking { status, .. } => *status,
            Event::Maintenance { .. } | Event::Cleaning { .. } => None,
        }
    }

    /// The guest name, only present on bookings.
    pub fn customer(&self) -> Option<&str> {
        match self {
            Event::Booking { customer, .. } => customer.as_deref(),
            Event::Maintenance { .. } | Event::Cleaning { .. } => None,
        }
    }

    /// Length of the event.
    pub fn duration(&self) -> TimeDelta {
        self.end() - self.start()
    }

    /// The calendar day the event starts on.
    pub fn first_day(&self) -> NaiveDate {
        self.start().date()
    }

    /// The calendar day holding the last instant of `[start, end)`.
    ///
    /// An event ending exactly at midnight does not occupy the following day.
    pub fn last_day(&self) -> NaiveDate {
        let end = self.end();
        if end <= self.start() {
            return self.first_day();
        }

        let last_instant = end - TimeDelta::nanoseconds(1);
        last_instant.date()
    }

    /// Whether the event covers `day`.
    pub fn occupies(&self, day: NaiveDate) -> bool {
        RangePosition::of(day, self.first_day(), self.last_day()) == RangePosition::InRange
    }

    /// Checks the `end > start` invariant.
    pub fn validate(&self) -> Result<(), Error> {
        let base = self.base();
        if base.end <= base.start {
            return Err(Error::InvalidEventRange {
                id: base.id.clone(),
                start: base.start,
                end: base.end,
            });
        }
        Ok(())
    }
}

/// The kind of an event, used for filtering and styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum EventKind {
    /// A guest stay.
    Booking,

    /// The room is out of order.
    Maintenance,

    /// Housekeeping.
    Cleaning,
}

impl EventKind {
    /// All kinds, in display order.
    pub const ALL: [EventKind; 3] = [
        EventKind::Booking,
        EventKind::Maintenance,
        EventKind::Cleaning,
    ];
}

const KIND_BOOKING: &str = "booking";
const KIND_MAINTENANCE: &str = "maintenance";
const KIND_CLEANING: &str = "cleaning";

impl AsRef<str> for EventKind {
    fn as_ref(&self) -> &str {
        match self {
            EventKind::Booking => KIND_BOOKING,
            EventKind::Maintenance => KIND_MAINTENANCE,
            EventKind::Cleaning => KIND_CLEANING,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl FromStr for EventKind {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            KIND_BOOKING => Ok(EventKind::Booking),
            KIND_MAINTENANCE => Ok(EventKind::Maintenance),
            KIND_CLEANING => Ok(EventKind::Cleaning),
            _ => Err(()),
        }
    }
}

/// Confirmation status of a booking.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum BookingStatus {
    /// The guest confirmed the stay.
    #[default]
    Confirmed,

    /// Pending confirmation.
    Unconfirmed,
}

const STATUS_CONFIRMED: &str = "confirmed";
const STATUS_UNCONFIRMED: &str = "unconfirmed";

impl AsRef<str> for BookingStatus {
    fn as_ref(&self) -> &str {
        match self {
            BookingStatus::Confirmed => STATUS_CONFIRMED,
            BookingStatus::Unconfirmed => STATUS_UNCONFIRMED,
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl FromStr for BookingStatus {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            STATUS_CONFIRMED => Ok(BookingStatus::Confirmed),
            STATUS_UNCONFIRMED => Ok(BookingStatus::Unconfirmed),
            _ => Err(()),
        }
    }
}
