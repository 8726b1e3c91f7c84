// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use chrono::{Local, NaiveDate, Weekday};

use crate::datetime::shift_days;
use crate::layout::{ResourceGrid, SlotBlock, SlotGrid, layout_grid, layout_slot_column};
use crate::tooltip::{Point, Tooltip, TooltipGeometry, position_tooltip};
use crate::{
    Config, DateWindow, Error, Event, EventId, EventKind, FilterState, ResourceId, Snapshot,
    ViewMode, filter_events,
};

/// The complete view state of one calendar instance.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CalendarState {
    /// The day navigation is relative to.
    pub anchor: NaiveDate,

    pub mode: ViewMode,

    pub week_starts_on: Weekday,

    /// Derived from the three fields above.
    pub window: DateWindow,

    pub filter: FilterState,

    /// Present only while the pointer hovers an event block.
    pub tooltip: Option<Tooltip>,
}

/// A state transition request.
#[derive(Debug, Clone, PartialEq)]
pub enum CalendarAction {
    /// Jump to the given day, which the caller takes as today.
    Today(NaiveDate),

    /// Move back by one day or one week.
    Previous,

    /// Move forward by one day or one week.
    Next,

    /// Jump to an arbitrary day.
    JumpTo(NaiveDate),

    SetMode(ViewMode),

    SetWeekStart(Weekday),

    /// Flip a resource; `universe` lists every known resource.
    ToggleResource {
        id: ResourceId,
        universe: Vec<ResourceId>,
    },

    ToggleKind(EventKind),

    SelectAllResources,

    SelectAllKinds,

    /// Replace the whole filter.
    SetFilter(FilterState),

    /// The pointer moved over an event block.
    PointerMove {
        event: EventId,
        pointer: Point,
        geometry: TooltipGeometry,
        margin: f64,
    },

    /// The pointer left the hovered block.
    PointerLeave,
}

impl CalendarState {
    /// Creates a state showing `anchor` with everything visible.
    pub fn new(anchor: NaiveDate, mode: ViewMode, week_starts_on: Weekday) -> Result<Self, Error> {
        Ok(Self {
            anchor,
            mode,
            week_starts_on,
            window: DateWindow::resolve(anchor, mode, week_starts_on)?,
            filter: FilterState::all(),
            tooltip: None,
        })
    }

    /// Applies `action` and returns the next state.
    ///
    /// Any navigation clears the tooltip, since the hovered block moves.
    pub fn reduce(mut self, action: CalendarAction) -> Result<Self, Error> {
        use CalendarAction::*;
        let (anchor, mode, first) = (self.anchor, self.mode, self.week_starts_on);
        match action {
            Today(today) => self.navigate(today, mode, first),
            Previous => self.navigate(shift_days(anchor, -mode.step_days())?, mode, first),
            Next => self.navigate(shift_days(anchor, mode.step_days())?, mode, first),
            JumpTo(day) => self.navigate(day, mode, first),
            SetMode(mode) => self.navigate(anchor, mode, first),
            SetWeekStart(first) => self.navigate(anchor, mode, first),
            ToggleResource { id, universe } => {
                self.filter.resources.toggle(&id, universe.iter());
                Ok(self)
            }
            ToggleKind(kind) => {
                self.filter.toggle_kind(kind);
                Ok(self)
            }
            SelectAllResources => {
                self.filter.select_all_resources();
                Ok(self)
            }
            SelectAllKinds => {
                self.filter.select_all_kinds();
                Ok(self)
            }
            SetFilter(filter) => {
                self.filter = filter;
                Ok(self)
            }
            PointerMove {
                event,
                pointer,
                geometry,
                margin,
            } => {
                let position = position_tooltip(
                    pointer,
                    geometry.container,
                    geometry.tooltip,
                    geometry.viewport,
                    margin,
                );
                self.tooltip = Some(Tooltip { event, position });
                Ok(self)
            }
            PointerLeave => {
                self.tooltip = None;
                Ok(self)
            }
        }
    }

    fn navigate(mut self, anchor: NaiveDate, mode: ViewMode, first: Weekday) -> Result<Self, Error> {
        self.window = DateWindow::resolve(anchor, mode, first)?;
        self.anchor = anchor;
        self.mode = mode;
        self.week_starts_on = first;
        self.tooltip = None;
        Ok(self)
    }
}

/// Callbacks delivered to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    /// An existing event block was clicked.
    EventClicked(Event),

    /// An empty cell was clicked.
    SlotClicked { day: NaiveDate, resource: ResourceId },

    /// The displayed window changed.
    NavigationChanged(DateWindow),
}

type Subscriber = Box<dyn FnMut(&Notification)>;

/// Controller owning the state and data of one calendar instance.
pub struct Calendar {
    state: CalendarState,
    snapshot: Snapshot,
    slots: SlotGrid,
    tooltip_margin: f64,
    subscribers: Vec<Subscriber>,
}

impl fmt::Debug for Calendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Calendar")
            .field("state", &self.state)
            .field("snapshot", &self.snapshot)
            .field("slots", &self.slots)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl Calendar {
    /// Creates a calendar showing `today` in the configured view mode.
    pub fn new(config: &Config, snapshot: Snapshot, today: NaiveDate) -> Result<Self, Error> {
        config.slots.validate()?;
        let state = CalendarState::new(today, config.view_mode, config.week_starts_on)?;
        Ok(Self {
            state,
            snapshot,
            slots: config.slots,
            tooltip_margin: config.tooltip_margin,
            subscribers: Vec::new(),
        })
    }

    pub fn state(&self) -> &CalendarState {
        &self.state
    }

    pub fn window(&self) -> &DateWindow {
        &self.state.window
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn slot_grid(&self) -> &SlotGrid {
        &self.slots
    }

    /// Overrides the gap between the pointer and the tooltip, for front ends
    /// measuring in other units than the configured one.
    pub fn set_tooltip_margin(&mut self, margin: f64) {
        self.tooltip_margin = margin;
    }

    /// Registers a callback for [`Notification`]s, called in registration order.
    pub fn subscribe(&mut self, callback: impl FnMut(&Notification) + 'static) {
        self.subscribers.push(Box::new(callback));
    }

    /// Applies an action, notifying subscribers if the window changed.
    pub fn dispatch(&mut self, action: CalendarAction) -> Result<&DateWindow, Error> {
        tracing::debug!(?action, "dispatching calendar action");
        let before = self.state.window.clone();
        self.state = self.state.clone().reduce(action)?;
        if self.state.window != before {
            let window = self.state.window.clone();
            self.notify(&Notification::NavigationChanged(window));
        }
        Ok(&self.state.window)
    }

    /// Shows the current local day.
    pub fn go_to_today(&mut self) -> Result<&DateWindow, Error> {
        self.go_to_today_at(Local::now().date_naive())
    }

    /// Shows `today`, for callers with their own clock.
    pub fn go_to_today_at(&mut self, today: NaiveDate) -> Result<&DateWindow, Error> {
        self.dispatch(CalendarAction::Today(today))
    }

    pub fn go_to_previous(&mut self) -> Result<&DateWindow, Error> {
        self.dispatch(CalendarAction::Previous)
    }

    pub fn go_to_next(&mut self) -> Result<&DateWindow, Error> {
        self.dispatch(CalendarAction::Next)
    }

    pub fn go_to(&mut self, day: NaiveDate) -> Result<&DateWindow, Error> {
        self.dispatch(CalendarAction::JumpTo(day))
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) -> Result<&DateWindow, Error> {
        self.dispatch(CalendarAction::SetMode(mode))
    }

    pub fn toggle_resource(&mut self, id: &ResourceId) -> Result<(), Error> {
        let universe = self
            .snapshot
            .resources()
            .iter()
            .map(|r| r.id.clone())
            .collect();
        self.dispatch(CalendarAction::ToggleResource {
            id: id.clone(),
            universe,
        })?;
        Ok(())
    }

    pub fn toggle_kind(&mut self, kind: EventKind) -> Result<(), Error> {
        self.dispatch(CalendarAction::ToggleKind(kind))?;
        Ok(())
    }

    /// Replaces the whole filter, e.g. from command-line options.
    pub fn set_filter(&mut self, filter: FilterState) -> Result<(), Error> {
        self.dispatch(CalendarAction::SetFilter(filter))?;
        Ok(())
    }

    /// Events visible in the current window under the current filter.
    pub fn visible_events(&self) -> Vec<&Event> {
        filter_events(self.snapshot.events(), &self.state.window, &self.state.filter)
    }

    /// The laid-out resource calendar.
    pub fn grid(&self) -> ResourceGrid<'_> {
        layout_grid(
            self.snapshot.resources(),
            self.snapshot.events(),
            &self.state.window,
            &self.state.filter,
        )
    }

    /// The hour-slot column of one resource, honoring the kind filter.
    pub fn slot_column(&self, resource: &ResourceId) -> Result<Vec<SlotBlock<'_>>, Error> {
        let mut blocks = layout_slot_column(
            self.snapshot.events(),
            resource,
            &self.state.window,
            &self.slots,
        )?;
        blocks.retain(|b| self.state.filter.allows(b.event));
        Ok(blocks)
    }

    /// Recomputes the tooltip for a pointer hovering `event`.
    ///
    /// Returns `None` and clears the tooltip when the event is not visible.
    pub fn on_pointer_move(
        &mut self,
        event: &EventId,
        pointer: Point,
        geometry: TooltipGeometry,
    ) -> Result<Option<Point>, Error> {
        let visible = self.visible_events().iter().any(|e| e.id() == event);
        if !visible {
            self.on_pointer_leave()?;
            return Ok(None);
        }

        self.dispatch(CalendarAction::PointerMove {
            event: event.clone(),
            pointer,
            geometry,
            margin: self.tooltip_margin,
        })?;
        Ok(self.state.tooltip.as_ref().map(|t| t.position))
    }

    pub fn on_pointer_leave(&mut self) -> Result<(), Error> {
        self.dispatch(CalendarAction::PointerLeave)?;
        Ok(())
    }

    /// The hovered event and where its tooltip goes.
    pub fn tooltip(&self) -> Option<(&Event, Point)> {
        let tooltip = self.state.tooltip.as_ref()?;
        let event = self.snapshot.find_event(tooltip.event.as_str())?;
        Some((event, tooltip.position))
    }

    /// Reports a click on an event block.
    pub fn click_event(&mut self, id: &EventId) -> Option<Event> {
        let event = self.snapshot.find_event(id.as_str())?.clone();
        self.notify(&Notification::EventClicked(event.clone()));
        Some(event)
    }

    /// Reports a click on an empty cell. Ignored outside the window or for
    /// unknown resources.
    pub fn click_slot(&mut self, day: NaiveDate, resource: &ResourceId) -> bool {
        let known = self.snapshot.find_resource(resource.as_str()).is_some();
        if !known || !self.state.window.contains_day(day) {
            return false;
        }

        self.notify(&Notification::SlotClicked {
            day,
            resource: resource.clone(),
        });
        true
    }

    /// Swaps in a fresh snapshot from the data source.
    pub fn replace_snapshot(&mut self, snapshot: Snapshot) {
        self.snapshot = snapshot;
        let stale = self
            .state
            .tooltip
            .as_ref()
            .is_some_and(|t| self.snapshot.find_event(t.event.as_str()).is_none());
        if stale {
            self.state.tooltip = None;
        }
    }

    fn notify(&mut self, notification: &Notification) {
        for subscriber in &mut self.subscribers {
            subscriber(notification);
        }
    }
}
