// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Placement of events on the calendar grid.
//!
//! Two strategies exist:
//! - day-span mode, where rows are resources and columns are days, and a
//!   multi-day event renders as one continuous block per row;
//! - hour-slot mode, where a single resource column is split into fixed-size
//!   time slots and an event block is as tall as its duration.
//!
//! Neither strategy resolves collisions: events sharing a cell are stacked in
//! input order, the later one on top.

use chrono::{NaiveDate, NaiveTime, Timelike};

use crate::datetime::RangePosition;
use crate::{DateWindow, Error, Event, FilterState, Resource, ResourceId, filter_events};

/// One event's occupancy of one (resource, day) cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellBlock<'a> {
    /// The event drawn in the cell.
    pub event: &'a Event,

    /// This is the first visible day of the event, so the left edge is rounded.
    pub is_start: bool,

    /// This is the last visible day of the event, so the right edge is rounded.
    pub is_end: bool,

    /// Stacking order within the cell, higher is drawn on top.
    pub layer: usize,
}

/// An event's continuous block across the visible columns of one row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpanBlock<'a> {
    pub event: &'a Event,

    /// Zero-based column of the leftmost visible day.
    pub first_column: usize,

    /// Zero-based column of the rightmost visible day.
    pub last_column: usize,

    /// The event really starts inside the window.
    pub is_start: bool,

    /// The event really ends inside the window.
    pub is_end: bool,
}

impl SpanBlock<'_> {
    /// Number of columns covered.
    pub fn columns(&self) -> usize {
        self.last_column - self.first_column + 1
    }
}

/// Computes the blocks drawn in the `(resource, day)` cell.
///
/// Events for other resources, events not covering `day`, and days outside the
/// window contribute nothing.
pub fn layout_cell<'a, I>(
    events: I,
    resource: &ResourceId,
    day: NaiveDate,
    window: &DateWindow,
) -> Vec<CellBlock<'a>>
where
    I: IntoIterator<Item = &'a Event>,
{
    if !window.contains_day(day) {
        return Vec::new();
    }

    events
        .into_iter()
        .filter(|e| e.resource() == resource)
        .filter(|e| RangePosition::of(day, e.first_day(), e.last_day()) == RangePosition::InRange)
        .enumerate()
        .map(|(layer, event)| {
            let (first, last) = visible_span(event, window);
            CellBlock {
                event,
                is_start: day == first,
                is_end: day == last,
                layer,
            }
        })
        .collect()
}

/// Computes the continuous block of each event in the row of `resource`.
pub fn layout_spans<'a, I>(events: I, resource: &ResourceId, window: &DateWindow) -> Vec<SpanBlock<'a>>
where
    I: IntoIterator<Item = &'a Event>,
{
    events
        .into_iter()
        .filter(|e| e.resource() == resource)
        .filter_map(|event| {
            let (first, last) = visible_span(event, window);
            let first_column = window.column_of(first)?;
            let last_column = window.column_of(last)?;
            Some(SpanBlock {
                event,
                first_column,
                last_column,
                is_start: first == event.first_day(),
                is_end: last == event.last_day(),
            })
        })
        .collect()
}

/// The event's day span clipped to the window. May be empty (first > last).
fn visible_span(event: &Event, window: &DateWindow) -> (NaiveDate, NaiveDate) {
    let first = event.first_day().max(window.first_day());
    let last = event.last_day().min(window.last_day());
    (first, last)
}

/// One row of the resource calendar.
#[derive(Debug, Clone)]
pub struct GridRow<'a> {
    pub resource: &'a Resource,

    /// One entry per window day, in window order.
    pub cells: Vec<Vec<CellBlock<'a>>>,

    /// The same occupancy as continuous blocks.
    pub spans: Vec<SpanBlock<'a>>,
}

/// The laid-out resource calendar for one window.
#[derive(Debug, Clone)]
pub struct ResourceGrid<'a> {
    pub window: DateWindow,
    pub rows: Vec<GridRow<'a>>,
}

impl<'a> ResourceGrid<'a> {
    /// Finds the topmost block in the cell at (`row`, `column`).
    pub fn topmost(&self, row: usize, column: usize) -> Option<&CellBlock<'a>> {
        self.rows
            .get(row)?
            .cells
            .get(column)?
            .iter()
            .max_by_key(|b| b.layer)
    }
}

/// Lays out every visible resource row for `window`.
///
/// Events referencing unknown resources are skipped.
pub fn layout_grid<'a>(
    resources: &'a [Resource],
    events: &'a [Event],
    window: &DateWindow,
    filter: &FilterState,
) -> ResourceGrid<'a> {
    let visible = filter_events(events, window, filter);
    for event in &visible {
        if !resources.iter().any(|r| &r.id == event.resource()) {
            tracing::debug!(id = %event.id(), resource = %event.resource(), "skipping event for unknown resource");
        }
    }

    let rows = resources
        .iter()
        .filter(|r| filter.allows_resource(&r.id))
        .map(|resource| GridRow {
            resource,
            cells: window
                .days()
                .iter()
                .map(|day| layout_cell(visible.iter().copied(), &resource.id, *day, window))
                .collect(),
            spans: layout_spans(visible.iter().copied(), &resource.id, window),
        })
        .collect();

    ResourceGrid {
        window: window.clone(),
        rows,
    }
}

/// How events are matched to hour slots.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotAlignment {
    /// The event's start hour and minute must equal the slot's. Events not
    /// aligned to a slot boundary are not drawn.
    #[default]
    Exact,

    /// The event is drawn in the slot containing its start minute.
    Snap,
}

/// Geometry of the hour-slot view.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SlotGrid {
    /// Length of a slot in minutes, must divide 60.
    pub minutes: u32,

    /// Rendered height of one slot.
    pub height: f64,

    /// First hour shown.
    pub day_start_hour: u32,

    /// Hour after the last hour shown, at most 24.
    pub day_end_hour: u32,

    pub alignment: SlotAlignment,
}

impl Default for SlotGrid {
    fn default() -> Self {
        Self {
            minutes: 15,
            height: 30.0,
            day_start_hour: 0,
            day_end_hour: 24,
            alignment: SlotAlignment::Exact,
        }
    }
}

impl SlotGrid {
    /// Checks that the geometry is usable.
    pub fn validate(&self) -> Result<(), Error> {
        if self.minutes == 0 || 60 % self.minutes != 0 {
            return Err(Error::InvalidSlotGrid(format!(
                "slot length must divide 60, got {} minutes",
                self.minutes
            )));
        }
        if self.day_start_hour >= self.day_end_hour || self.day_end_hour > 24 {
            return Err(Error::InvalidSlotGrid(format!(
                "hours must satisfy start < end <= 24, got {}..{}",
                self.day_start_hour, self.day_end_hour
            )));
        }
        if self.height.is_nan() || self.height <= 0.0 {
            return Err(Error::InvalidSlotGrid(format!(
                "slot height must be positive, got {}",
                self.height
            )));
        }
        Ok(())
    }

    /// Zero for a grid with zero-minute slots.
    pub fn slots_per_hour(&self) -> u32 {
        60u32.checked_div(self.minutes).unwrap_or(0)
    }

    /// Start times of every slot, in order. Empty for a grid that fails
    /// [`SlotGrid::validate`].
    pub fn slot_times(&self) -> impl Iterator<Item = NaiveTime> + '_ {
        let minutes = match self.validate() {
            Ok(()) => self.day_start_hour * 60..self.day_end_hour * 60,
            Err(_) => 0..0,
        };
        minutes
            .step_by(self.minutes.max(1) as usize)
            .filter_map(|m| NaiveTime::from_hms_opt(m / 60, m % 60, 0))
    }

    /// Rendered height of `event`: hours × slots per hour × slot height.
    pub fn block_height(&self, event: &Event) -> f64 {
        let hours = event.duration().num_seconds() as f64 / 3600.0;
        hours * f64::from(self.slots_per_hour()) * self.height
    }

    /// The slot an event with this start time is drawn in, if any.
    fn slot_for(&self, start: NaiveTime) -> Option<NaiveTime> {
        let offset = start.minute().checked_rem(self.minutes)?;
        match self.alignment {
            SlotAlignment::Exact if offset != 0 => None,
            SlotAlignment::Exact => NaiveTime::from_hms_opt(start.hour(), start.minute(), 0),
            SlotAlignment::Snap => NaiveTime::from_hms_opt(start.hour(), start.minute() - offset, 0),
        }
    }
}

/// An event placed in the hour-slot view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotBlock<'a> {
    pub event: &'a Event,

    /// Day column the block is drawn in.
    pub day: NaiveDate,

    /// The slot the block starts at.
    pub slot: NaiveTime,

    /// Rendered height, see [`SlotGrid::block_height`].
    pub height: f64,
}

/// Computes the blocks starting at the slot `(day, slot)`.
///
/// Only the hour and minute of an event's start are compared with the slot.
/// Fails with [`Error::InvalidSlotGrid`] if `grid` does not validate.
pub fn layout_slot<'a, I>(
    events: I,
    day: NaiveDate,
    slot: NaiveTime,
    grid: &SlotGrid,
) -> Result<Vec<SlotBlock<'a>>, Error>
where
    I: IntoIterator<Item = &'a Event>,
{
    grid.validate()?;
    Ok(place_in_slot(events, day, slot, grid))
}

fn place_in_slot<'a, I>(events: I, day: NaiveDate, slot: NaiveTime, grid: &SlotGrid) -> Vec<SlotBlock<'a>>
where
    I: IntoIterator<Item = &'a Event>,
{
    events
        .into_iter()
        .filter(|e| e.first_day() == day)
        .filter(|e| {
            grid.slot_for(e.start().time())
                .is_some_and(|s| s.hour() == slot.hour() && s.minute() == slot.minute())
        })
        .map(|event| SlotBlock {
            event,
            day,
            slot,
            height: grid.block_height(event),
        })
        .collect()
}

/// Lays out the hour-slot column of `resource` for every day of `window`.
pub fn layout_slot_column<'a>(
    events: &'a [Event],
    resource: &ResourceId,
    window: &DateWindow,
    grid: &SlotGrid,
) -> Result<Vec<SlotBlock<'a>>, Error> {
    grid.validate()?;
    let mine: Vec<&Event> = events.iter().filter(|e| e.resource() == resource).collect();
    let mut blocks = Vec::new();
    for day in window.days() {
        for slot in grid.slot_times() {
            blocks.extend(place_in_slot(mine.iter().copied(), *day, slot, grid));
        }
    }
    Ok(blocks)
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDateTime, Weekday};

    use super::*;
    use crate::{EventBase, ViewMode};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn at(d: u32, h: u32, m: u32) -> NaiveDateTime {
        day(d).and_hms_opt(h, m, 0).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn week() -> DateWindow {
        DateWindow::resolve(day(12), ViewMode::Week, Weekday::Mon).unwrap()
    }

    fn booking(id: &str, start: NaiveDateTime, end: NaiveDateTime, resource: &str) -> Event {
        Event::booking(EventBase::new(id, id, start, end, resource), None, None)
    }

    #[test]
    fn cell_flags_follow_event_span() {
        let window = week();
        let events = [booking("b", at(11, 14, 0), at(13, 10, 0), "r1")];
        let r1 = ResourceId::from("r1");

        let flags: Vec<_> = window
            .days()
            .iter()
            .map(|d| {
                layout_cell(&events, &r1, *d, &window)
                    .first()
                    .map(|b| (b.is_start, b.is_end))
            })
            .collect();
        assert_eq!(
            flags,
            [
                None,
                Some((true, false)),
                Some((false, false)),
                Some((false, true)),
                None,
                None,
                None
            ]
        );
    }

    #[test]
    fn cell_flags_clip_to_window() {
        let window = week();
        let events = [booking("long", at(1, 12, 0), at(30, 12, 0), "r1")];
        let r1 = ResourceId::from("r1");

        let first = layout_cell(&events, &r1, day(10), &window);
        assert_eq!(first.len(), 1);
        assert!(first[0].is_start && !first[0].is_end);

        let middle = layout_cell(&events, &r1, day(13), &window);
        assert!(!middle[0].is_start && !middle[0].is_end);

        let last = layout_cell(&events, &r1, day(16), &window);
        assert!(!last[0].is_start && last[0].is_end);

        assert!(layout_cell(&events, &r1, day(17), &window).is_empty());
    }

    #[test]
    fn cell_ignores_other_resources() {
        let window = week();
        let events = [booking("b", at(11, 14, 0), at(13, 10, 0), "r2")];
        assert!(layout_cell(&events, &ResourceId::from("r1"), day(12), &window).is_empty());
    }

    #[test]
    fn overlapping_events_stack_in_input_order() {
        let window = week();
        let events = [
            booking("under", at(11, 9, 0), at(11, 12, 0), "r1"),
            booking("over", at(11, 10, 0), at(11, 11, 0), "r1"),
        ];
        let blocks = layout_cell(&events, &ResourceId::from("r1"), day(11), &window);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].event.id().as_str(), "under");
        assert_eq!(blocks[1].event.id().as_str(), "over");
        assert!(blocks[1].layer > blocks[0].layer);
    }

    #[test]
    fn spans_are_continuous_and_clipped() {
        let window = week();
        let events = [
            booking("inner", at(11, 14, 0), at(13, 10, 0), "r1"),
            booking("left", at(8, 14, 0), at(10, 10, 0), "r1"),
            booking("outside", at(1, 14, 0), at(3, 10, 0), "r1"),
        ];
        let spans = layout_spans(&events, &ResourceId::from("r1"), &window);
        assert_eq!(spans.len(), 2);

        assert_eq!(spans[0].event.id().as_str(), "inner");
        assert_eq!((spans[0].first_column, spans[0].last_column), (1, 3));
        assert_eq!(spans[0].columns(), 3);
        assert!(spans[0].is_start && spans[0].is_end);

        assert_eq!(spans[1].event.id().as_str(), "left");
        assert_eq!((spans[1].first_column, spans[1].last_column), (0, 0));
        assert!(!spans[1].is_start && spans[1].is_end);
    }

    #[test]
    fn grid_skips_unknown_resources_and_filtered_rows() {
        let window = week();
        let rooms = vec![
            Resource::new("r1", "101", "Single", "1"),
            Resource::new("r2", "102", "Double", "1"),
        ];
        let events = vec![
            booking("b1", at(11, 14, 0), at(13, 10, 0), "r1"),
            booking("ghost", at(11, 14, 0), at(13, 10, 0), "r9"),
        ];

        let grid = layout_grid(&rooms, &events, &window, &FilterState::all());
        assert_eq!(grid.rows.len(), 2);
        let occupied: usize = grid
            .rows
            .iter()
            .flat_map(|r| r.cells.iter())
            .map(Vec::len)
            .sum();
        assert_eq!(occupied, 3);
        assert_eq!(grid.topmost(0, 2).unwrap().event.id().as_str(), "b1");
        assert!(grid.topmost(1, 2).is_none());

        let filter = FilterState::all().only_resources([ResourceId::from("r2")]);
        let grid = layout_grid(&rooms, &events, &window, &filter);
        assert_eq!(grid.rows.len(), 1);
        assert_eq!(grid.rows[0].resource.number, "102");
    }

    #[test]
    fn slot_height_scales_with_duration() {
        let grid = SlotGrid::default();
        let events = [booking("b", at(12, 9, 0), at(12, 10, 30), "r1")];
        let blocks = layout_slot(&events, day(12), time(9, 0), &grid).unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].height, 6.0 * grid.height);
        assert!(layout_slot(&events, day(12), time(9, 15), &grid).unwrap().is_empty());
        assert!(layout_slot(&events, day(13), time(9, 0), &grid).unwrap().is_empty());
    }

    #[test]
    fn unaligned_start_is_not_drawn_with_exact_alignment() {
        let grid = SlotGrid::default();
        let events = [booking("b", at(12, 9, 5), at(12, 10, 0), "r1")];
        let r1 = ResourceId::from("r1");
        let window = DateWindow::resolve(day(12), ViewMode::Day, Weekday::Mon).unwrap();
        assert!(layout_slot_column(&events, &r1, &window, &grid).unwrap().is_empty());
    }

    #[test]
    fn snap_alignment_places_unaligned_start() {
        let grid = SlotGrid {
            alignment: SlotAlignment::Snap,
            ..SlotGrid::default()
        };
        let events = [booking("b", at(12, 9, 5), at(12, 10, 5), "r1")];
        let r1 = ResourceId::from("r1");
        let window = DateWindow::resolve(day(12), ViewMode::Day, Weekday::Mon).unwrap();
        let blocks = layout_slot_column(&events, &r1, &window, &grid).unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].slot, time(9, 0));
        assert_eq!(blocks[0].height, 4.0 * grid.height);
    }

    #[test]
    fn slot_times_cover_configured_hours() {
        let grid = SlotGrid {
            minutes: 30,
            day_start_hour: 8,
            day_end_hour: 10,
            ..SlotGrid::default()
        };
        let times: Vec<_> = grid.slot_times().collect();
        assert_eq!(times, [time(8, 0), time(8, 30), time(9, 0), time(9, 30)]);
    }

    #[test]
    fn slot_grid_validation() {
        assert!(SlotGrid::default().validate().is_ok());
        let bad = SlotGrid {
            minutes: 7,
            ..SlotGrid::default()
        };
        assert!(matches!(bad.validate(), Err(Error::InvalidSlotGrid(_))));
        let bad = SlotGrid {
            day_start_hour: 10,
            day_end_hour: 10,
            ..SlotGrid::default()
        };
        assert!(bad.validate().is_err());
        let bad = SlotGrid {
            height: 0.0,
            ..SlotGrid::default()
        };
        assert!(bad.validate().is_err());
        let bad = SlotGrid {
            height: f64::NAN,
            ..SlotGrid::default()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn zero_minute_grid_is_rejected_by_slot_layout() {
        let grid = SlotGrid {
            minutes: 0,
            ..SlotGrid::default()
        };
        let events = [booking("b", at(12, 9, 0), at(12, 10, 0), "r1")];
        let r1 = ResourceId::from("r1");
        let window = DateWindow::resolve(day(12), ViewMode::Day, Weekday::Mon).unwrap();

        assert!(matches!(
            layout_slot_column(&events, &r1, &window, &grid),
            Err(Error::InvalidSlotGrid(_))
        ));
        assert!(matches!(
            layout_slot(&events, day(12), time(9, 0), &grid),
            Err(Error::InvalidSlotGrid(_))
        ));
        assert_eq!(grid.slots_per_hour(), 0);
        assert_eq!(grid.slot_times().count(), 0);
        assert_eq!(grid.block_height(&events[0]), 0.0);
    }
}
