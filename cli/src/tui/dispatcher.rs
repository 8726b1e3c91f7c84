// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, rc::Rc};

use chrono::NaiveDate;
use roomcal_core::{EventId, EventKind, Point, ResourceId, TooltipGeometry, ViewMode};

type Callback<'a> = Rc<RefCell<dyn FnMut(&Action) + 'a>>;

pub struct Dispatcher<'a> {
    subscribers: Vec<Callback<'a>>,
}

impl<'a> Dispatcher<'a> {
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }

    pub fn register(&mut self, callback: Callback<'a>) {
        self.subscribers.push(callback);
    }

    pub fn dispatch(&mut self, action: &Action) {
        for sub in &self.subscribers {
            (sub.borrow_mut())(action);
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Today,
    Previous,
    Next,
    SetMode(ViewMode),
    ToggleKind(EventKind),
    ShowAll,
    Hover {
        event: EventId,
        pointer: Point,
        geometry: TooltipGeometry,
    },
    Leave,
    ClickEvent(EventId),
    ClickCell {
        day: NaiveDate,
        room: ResourceId,
    },
}
