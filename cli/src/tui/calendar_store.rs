// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, rc::Rc};

use roomcal_core::{Calendar, CalendarAction, Error, EventKind, Notification};

use crate::tui::dispatcher::{Action, Dispatcher};
use crate::util::format_time_range;

/// State of the browse screen, wrapping the calendar it drives.
#[derive(Debug)]
pub struct CalendarStore<'a> {
    pub calendar: &'a mut Calendar,

    /// Calendar notifications, oldest first.
    notices: Rc<RefCell<Vec<String>>>,

    /// The last action that failed, cleared by the next successful one.
    error: Option<String>,
}

impl<'a> CalendarStore<'a> {
    pub fn new(calendar: &'a mut Calendar) -> Self {
        let notices = Rc::new(RefCell::new(Vec::new()));
        let sink = notices.clone();
        calendar.subscribe(move |n| sink.borrow_mut().push(describe(n)));
        Self {
            calendar,
            notices,
            error: None,
        }
    }

    pub fn register_to(that: Rc<RefCell<Self>>, dispatcher: &mut Dispatcher<'a>) {
        let callback = Rc::new(RefCell::new(move |action: &Action| {
            let mut that = that.borrow_mut();
            match that.apply(action) {
                Ok(()) => that.error = None,
                Err(e) => {
                    tracing::warn!(?action, error = %e, "calendar action failed");
                    that.error = Some(e.to_string());
                }
            }
        }));
        dispatcher.register(callback);
    }

    /// The line shown at the bottom of the screen.
    pub fn status(&self) -> Option<String> {
        self.error
            .clone()
            .or_else(|| self.notices.borrow().last().cloned())
    }

    fn apply(&mut self, action: &Action) -> Result<(), Error> {
        let calendar = &mut *self.calendar;
        match action {
            Action::Today => {
                calendar.go_to_today()?;
            }
            Action::Previous => {
                calendar.go_to_previous()?;
            }
            Action::Next => {
                calendar.go_to_next()?;
            }
            Action::SetMode(mode) => {
                calendar.set_view_mode(*mode)?;
            }
            Action::ToggleKind(kind) => calendar.toggle_kind(*kind)?,
            Action::ShowAll => {
                calendar.dispatch(CalendarAction::SelectAllResources)?;
                calendar.dispatch(CalendarAction::SelectAllKinds)?;
            }
            Action::Hover {
                event,
                pointer,
                geometry,
            } => {
                calendar.on_pointer_move(event, *pointer, *geometry)?;
            }
            Action::Leave => calendar.on_pointer_leave()?,
            Action::ClickEvent(id) => {
                calendar.click_event(id);
            }
            Action::ClickCell { day, room } => {
                calendar.click_slot(*day, room);
            }
        }
        Ok(())
    }

    /// Whether events of `kind` are currently shown.
    pub fn shows_kind(&self, kind: EventKind) -> bool {
        self.calendar.state().filter.allows_kind(kind)
    }
}

fn describe(notification: &Notification) -> String {
    match notification {
        Notification::EventClicked(event) => format!(
            "{} {}: {}, {}",
            event.kind(),
            event.id(),
            event.title(),
            format_time_range(event.start(), event.end())
        ),
        Notification::SlotClicked { day, resource } => {
            format!("Selected room {resource} on {day}")
        }
        Notification::NavigationChanged(window) if window.len() == 1 => {
            format!("Showing {}", window.first_day())
        }
        Notification::NavigationChanged(window) => {
            format!("Showing {} to {}", window.first_day(), window.last_day())
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Weekday};
    use roomcal_core::{Config, Point, Rect, ResourceId, Size, Snapshot, TooltipGeometry, ViewMode};

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 12).unwrap()
    }

    fn calendar() -> Calendar {
        let config = Config {
            week_starts_on: Weekday::Mon,
            view_mode: ViewMode::Week,
            ..Config::default()
        };
        Calendar::new(&config, Snapshot::demo(today()), today()).unwrap()
    }

    fn geometry() -> TooltipGeometry {
        TooltipGeometry {
            container: Rect::new(0.0, 0.0, 80.0, 24.0),
            tooltip: Size::new(20.0, 5.0),
            viewport: Size::new(80.0, 24.0),
        }
    }

    #[test]
    fn navigation_reports_new_window() {
        let mut calendar = calendar();
        let store = Rc::new(RefCell::new(CalendarStore::new(&mut calendar)));
        let mut dispatcher = Dispatcher::new();
        CalendarStore::register_to(store.clone(), &mut dispatcher);

        dispatcher.dispatch(&Action::Next);
        assert_eq!(
            store.borrow().status(),
            Some("Showing 2025-03-17 to 2025-03-23".to_string())
        );

        dispatcher.dispatch(&Action::SetMode(ViewMode::Day));
        assert_eq!(store.borrow().status(), Some("Showing 2025-03-19".to_string()));
    }

    #[test]
    fn clicks_are_reported() {
        let mut calendar = calendar();
        let store = Rc::new(RefCell::new(CalendarStore::new(&mut calendar)));
        let mut dispatcher = Dispatcher::new();
        CalendarStore::register_to(store.clone(), &mut dispatcher);

        dispatcher.dispatch(&Action::ClickCell {
            day: today(),
            room: ResourceId::from("r101"),
        });
        assert_eq!(
            store.borrow().status(),
            Some("Selected room r101 on 2025-03-12".to_string())
        );

        dispatcher.dispatch(&Action::ClickEvent("bk-1001".into()));
        let status = store.borrow().status().unwrap();
        assert!(status.starts_with("booking bk-1001: John Smith"));
    }

    #[test]
    fn click_outside_window_is_ignored() {
        let mut calendar = calendar();
        let store = Rc::new(RefCell::new(CalendarStore::new(&mut calendar)));
        let mut dispatcher = Dispatcher::new();
        CalendarStore::register_to(store.clone(), &mut dispatcher);

        dispatcher.dispatch(&Action::ClickCell {
            day: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
            room: ResourceId::from("r101"),
        });
        assert_eq!(store.borrow().status(), None);
    }

    #[test]
    fn hover_and_leave() {
        let mut calendar = calendar();
        calendar.set_tooltip_margin(1.0);
        let store = Rc::new(RefCell::new(CalendarStore::new(&mut calendar)));
        let mut dispatcher = Dispatcher::new();
        CalendarStore::register_to(store.clone(), &mut dispatcher);

        dispatcher.dispatch(&Action::Hover {
            event: "bk-1001".into(),
            pointer: Point::new(10.0, 3.0),
            geometry: geometry(),
        });
        {
            let store = store.borrow();
            let (event, position) = store.calendar.tooltip().unwrap();
            assert_eq!(event.id().as_str(), "bk-1001");
            assert_eq!(position, Point::new(11.0, 4.0));
        }

        dispatcher.dispatch(&Action::Leave);
        assert!(store.borrow().calendar.tooltip().is_none());
    }

    #[test]
    fn toggling_a_kind_hides_it() {
        let mut calendar = calendar();
        let store = Rc::new(RefCell::new(CalendarStore::new(&mut calendar)));
        let mut dispatcher = Dispatcher::new();
        CalendarStore::register_to(store.clone(), &mut dispatcher);

        dispatcher.dispatch(&Action::ToggleKind(EventKind::Cleaning));
        assert!(!store.borrow().shows_kind(EventKind::Cleaning));
        assert!(store.borrow().shows_kind(EventKind::Booking));

        dispatcher.dispatch(&Action::ShowAll);
        assert!(store.borrow().shows_kind(EventKind::Cleaning));
    }
}
