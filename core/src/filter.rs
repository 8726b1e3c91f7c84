// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeSet;

use chrono::NaiveDateTime;

use crate::{DateWindow, Event, EventKind, Resource, ResourceId};

/// Either every value, or an explicit subset (which may be empty).
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Selection<T: Ord> {
    /// Everything is selected.
    All,

    /// Only the listed values are selected.
    Only(BTreeSet<T>),
}

impl<T: Ord> Default for Selection<T> {
    fn default() -> Self {
        Selection::All
    }
}

impl<T: Ord + Clone> Selection<T> {
    /// Builds a selection from an explicit list.
    pub fn only(values: impl IntoIterator<Item = T>) -> Self {
        Selection::Only(values.into_iter().collect())
    }

    pub fn contains(&self, value: &T) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(set) => set.contains(value),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    /// Flips `value`. Deselecting from `All` expands to `universe` minus `value`.
    pub fn toggle<'a>(&mut self, value: &T, universe: impl IntoIterator<Item = &'a T>)
    where
        T: 'a,
    {
        match self {
            Selection::All => {
                let rest = universe.into_iter().filter(|v| *v != value).cloned();
                *self = Selection::Only(rest.collect());
            }
            Selection::Only(set) => {
                if !set.remove(value) {
                    set.insert(value.clone());
                }
            }
        }
    }
}

/// Which resources and event kinds are currently visible.
#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FilterState {
    /// Visible resources.
    pub resources: Selection<ResourceId>,

    /// Visible event kinds.
    pub kinds: Selection<EventKind>,
}

impl FilterState {
    /// Everything visible.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn only_resources(mut self, ids: impl IntoIterator<Item = ResourceId>) -> Self {
        self.resources = Selection::only(ids);
        self
    }

    pub fn only_kinds(mut self, kinds: impl IntoIterator<Item = EventKind>) -> Self {
        self.kinds = Selection::only(kinds);
        self
    }

    pub fn allows_resource(&self, id: &ResourceId) -> bool {
        self.resources.contains(id)
    }

    pub fn allows_kind(&self, kind: EventKind) -> bool {
        self.kinds.contains(&kind)
    }

    /// Flips the visibility of a resource; `universe` lists all known resources.
    pub fn toggle_resource(&mut self, id: &ResourceId, universe: &[Resource]) {
        self.resources.toggle(id, universe.iter().map(|r| &r.id));
    }

    /// Flips the visibility of an event kind.
    pub fn toggle_kind(&mut self, kind: EventKind) {
        self.kinds.toggle(&kind, EventKind::ALL.iter());
    }

    pub fn select_all_resources(&mut self) {
        self.resources = Selection::All;
    }

    pub fn select_all_kinds(&mut self) {
        self.kinds = Selection::All;
    }

    /// Whether `event` passes both selections, ignoring time.
    pub fn allows(&self, event: &Event) -> bool {
        self.allows_resource(event.resource()) && self.allows_kind(event.kind())
    }
}

/// Half-open interval intersection: `[a_start, a_end)` meets `[b_start, b_end)`.
pub fn overlaps(
    a_start: NaiveDateTime,
    a_end: NaiveDateTime,
    b_start: NaiveDateTime,
    b_end: NaiveDateTime,
) -> bool {
    a_start < b_end && a_end > b_start
}

/// Selects the events visible in `window` under `filter`, preserving input order.
pub fn filter_events<'a, I>(events: I, window: &DateWindow, filter: &FilterState) -> Vec<&'a Event>
where
    I: IntoIterator<Item = &'a Event>,
{
    events
        .into_iter()
        .filter(|e| filter.allows(e))
        .filter(|e| overlaps(e.start(), e.end(), window.start(), window.end()))
        .collect()
}
