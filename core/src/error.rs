// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use chrono::{NaiveDate, NaiveDateTime};

use crate::{EventId, ResourceId};

/// Errors raised by the calendar core.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An event does not end strictly after it starts.
    #[error("event {id} must end after it starts (start: {start}, end: {end})")]
    InvalidEventRange {
        /// The offending event.
        id: EventId,
        /// Start of the event.
        start: NaiveDateTime,
        /// End of the event.
        end: NaiveDateTime,
    },

    /// Two resources share the same id.
    #[error("duplicate resource id: {0}")]
    DuplicateResource(ResourceId),

    /// Two events share the same id.
    #[error("duplicate event id: {0}")]
    DuplicateEvent(EventId),

    /// Date arithmetic left the representable calendar range.
    #[error("date out of range near {0}")]
    DateOutOfRange(NaiveDate),

    /// The hour-slot geometry is not usable.
    #[error("invalid slot grid: {0}")]
    InvalidSlotGrid(String),

    /// The snapshot file extension is not recognized.
    #[error("unsupported snapshot format: {0}")]
    UnsupportedFormat(String),

    /// The snapshot or configuration could not be decoded.
    #[error("failed to parse {what}: {message}")]
    Parse {
        /// What was being parsed.
        what: &'static str,
        /// Decoder message.
        message: String,
    },

    /// I/O error while reading input files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A path could not be expanded.
    #[error("{0}")]
    Path(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse {
            what: "JSON snapshot",
            message: e.to_string(),
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Self::Parse {
            what: "TOML document",
            message: e.to_string(),
        }
    }
}
