// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Layout engine of the room occupancy calendar.

mod config;
mod controller;
mod datetime;
mod error;
mod event;
mod filter;
mod layout;
mod resource;
mod snapshot;
mod tooltip;
mod window;

pub use crate::config::{APP_NAME, Config, get_config_dir};
pub use crate::controller::{Calendar, CalendarAction, CalendarState, Notification};
pub use crate::datetime::{DateAnchor, RangePosition, STABLE_FORMAT_DATEONLY, STABLE_FORMAT_DATETIME};
pub use crate::error::Error;
pub use crate::event::{BookingStatus, Event, EventBase, EventId, EventKind};
pub use crate::filter::{FilterState, Selection, filter_events, overlaps};
pub use crate::layout::{
    CellBlock, GridRow, ResourceGrid, SlotAlignment, SlotBlock, SlotGrid, SpanBlock, layout_cell,
    layout_grid, layout_slot, layout_slot_column, layout_spans,
};
pub use crate::resource::{Resource, ResourceId};
pub use crate::snapshot::Snapshot;
pub use crate::tooltip::{Point, Rect, Size, TOOLTIP_MARGIN, Tooltip, TooltipGeometry, position_tooltip};
pub use crate::window::{DateWindow, ViewMode, resolve_window};
