// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, rc::Rc};

use ratatui::crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};
use ratatui::prelude::*;
use ratatui::symbols::border;
use ratatui::widgets::{Block, Clear, Paragraph};
use roomcal_core::{
    Event, EventKind, Point, Rect as CoreRect, Size, TooltipGeometry, ViewMode,
};
use unicode_width::UnicodeWidthStr;

use crate::event_formatter::{cell_label, event_color, tooltip_lines};
use crate::tui::calendar_store::CalendarStore;
use crate::tui::component::{Component, Message};
use crate::tui::dispatcher::{Action, Dispatcher};
use crate::util::{format_day_header, truncate_to_width};

const ROOM_WIDTH: u16 = 8;

/// Lines above the first room row: the legend and the day headers.
const GRID_TOP: u16 = 2;

/// Room by day grid with a hover card, driven by keys and the mouse.
pub struct CalendarView;

impl CalendarView {
    pub fn new() -> Self {
        Self
    }

    pub fn instructions() -> Line<'static> {
        Line::from(vec![
            " Prev ".into(),
            "<←>".blue().bold(),
            " Next ".into(),
            "<→>".blue().bold(),
            " Today ".into(),
            "<t>".blue().bold(),
            " Day/Week ".into(),
            "<d/w>".blue().bold(),
            " Kinds ".into(),
            "<1-3/a>".blue().bold(),
            " Exit ".into(),
            "<Esc> ".blue().bold(),
        ])
    }
}

impl Component<CalendarStore<'_>> for CalendarView {
    fn render(&self, store: &Rc<RefCell<CalendarStore<'_>>>, area: Rect, buf: &mut Buffer) {
        let store = store.borrow();
        let calendar = &*store.calendar;
        let grid = calendar.grid();
        let layout = GridLayout::new(area, grid.window.len(), grid.rows.len());

        if let Some(rect) = layout.line(0) {
            legend(&store).render(rect, buf);
        }

        if let Some(rect) = layout.line(1) {
            Line::from("Room".bold()).render(rect, buf);
        }
        for (column, day) in grid.window.days().iter().enumerate() {
            if let Some(rect) = layout.header_rect(column) {
                let header = truncate_to_width(&format_day_header(*day), rect.width as usize);
                Line::from(header.bold()).render(rect, buf);
            }
        }

        for (i, row) in grid.rows.iter().enumerate().take(layout.rows as usize) {
            if let Some(rect) = layout.line(GRID_TOP + i as u16) {
                let room = truncate_to_width(&row.resource.number, ROOM_WIDTH as usize - 1);
                Line::from(room).render(rect, buf);
            }

            for (column, blocks) in row.cells.iter().enumerate() {
                let Some(rect) = layout.cell_rect(i, column) else {
                    continue;
                };
                let width = rect.width.saturating_sub(1).max(1) as usize;
                let line = match grid.topmost(i, column) {
                    Some(top) => Line::styled(
                        cell_label(top, blocks.len(), width),
                        Style::new().fg(block_color(top.event)),
                    ),
                    None => Line::from("·".dark_gray()),
                };
                line.render(rect, buf);
            }
        }

        let status_line = layout.line(area.height.saturating_sub(1));
        if let (Some(rect), Some(status)) = (status_line, store.status()) {
            Line::from(status.italic()).render(rect, buf);
        }

        if let Some((event, position)) = calendar.tooltip() {
            render_tooltip(event, position, area, buf);
        }
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher<'_>,
        _store: &Rc<RefCell<CalendarStore<'_>>>,
        _area: Rect,
        key: KeyCode,
    ) -> Option<Message> {
        let action = key_action(key)?;
        dispatcher.dispatch(&action);
        Some(Message::Handled)
    }

    fn on_mouse(
        &mut self,
        dispatcher: &mut Dispatcher<'_>,
        store: &Rc<RefCell<CalendarStore<'_>>>,
        area: Rect,
        mouse: MouseEvent,
    ) -> Option<Message> {
        let action = {
            let store = store.borrow();
            let calendar = &*store.calendar;
            let grid = calendar.grid();
            let layout = GridLayout::new(area, grid.window.len(), grid.rows.len());
            let hit = layout.cell_at(mouse.column, mouse.row);

            match mouse.kind {
                MouseEventKind::Moved => match hit.and_then(|(r, c)| grid.topmost(r, c)) {
                    Some(top) => Action::Hover {
                        event: top.event.id().clone(),
                        pointer: Point::new(f64::from(mouse.column), f64::from(mouse.row)),
                        geometry: geometry(area, tooltip_size(&tooltip_lines(top.event))),
                    },
                    None if calendar.tooltip().is_some() => Action::Leave,
                    None => return None,
                },
                MouseEventKind::Down(MouseButton::Left) => {
                    let (row, column) = hit?;
                    match grid.topmost(row, column) {
                        Some(top) => Action::ClickEvent(top.event.id().clone()),
                        None => Action::ClickCell {
                            day: *grid.window.days().get(column)?,
                            room: grid.rows.get(row)?.resource.id.clone(),
                        },
                    }
                }
                _ => return None,
            }
        };

        dispatcher.dispatch(&action);
        Some(Message::Handled)
    }
}

/// The action bound to a key, if any.
pub fn key_action(key: KeyCode) -> Option<Action> {
    let action = match key {
        KeyCode::Left | KeyCode::Char('h') => Action::Previous,
        KeyCode::Right | KeyCode::Char('l') => Action::Next,
        KeyCode::Char('t') => Action::Today,
        KeyCode::Char('d') => Action::SetMode(ViewMode::Day),
        KeyCode::Char('w') => Action::SetMode(ViewMode::Week),
        KeyCode::Char('1') => Action::ToggleKind(EventKind::Booking),
        KeyCode::Char('2') => Action::ToggleKind(EventKind::Maintenance),
        KeyCode::Char('3') => Action::ToggleKind(EventKind::Cleaning),
        KeyCode::Char('a') => Action::ShowAll,
        _ => return None,
    };
    Some(action)
}

/// Cell geometry of the grid inside the view's area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    area: Rect,
    columns: u16,
    cell_width: u16,

    /// Room rows that fit between the headers and the status line.
    rows: u16,
}

impl GridLayout {
    pub fn new(area: Rect, columns: usize, rows: usize) -> Self {
        let columns = u16::try_from(columns.max(1)).unwrap_or(u16::MAX);
        let cell_width = (area.width.saturating_sub(ROOM_WIDTH) / columns).max(1);
        let fitting = area.height.saturating_sub(GRID_TOP + 1);
        let rows = u16::try_from(rows).unwrap_or(u16::MAX).min(fitting);
        Self {
            area,
            columns,
            cell_width,
            rows,
        }
    }

    /// The (row, column) of the cell under a terminal position.
    pub fn cell_at(&self, x: u16, y: u16) -> Option<(usize, usize)> {
        let dx = x.checked_sub(self.area.x)?;
        let dy = y.checked_sub(self.area.y)?;
        if dx >= self.area.width {
            return None;
        }

        let row = dy.checked_sub(GRID_TOP)?;
        let column = dx.checked_sub(ROOM_WIDTH)? / self.cell_width;
        (row < self.rows && column < self.columns).then_some((row as usize, column as usize))
    }

    /// The screen rect of a cell, clipped to the area.
    pub fn cell_rect(&self, row: usize, column: usize) -> Option<Rect> {
        if row >= self.rows as usize {
            return None;
        }
        self.column_rect(GRID_TOP + row as u16, column)
    }

    fn header_rect(&self, column: usize) -> Option<Rect> {
        self.column_rect(1, column)
    }

    fn column_rect(&self, dy: u16, column: usize) -> Option<Rect> {
        let column = u16::try_from(column).ok()?;
        let x = ROOM_WIDTH.checked_add(column.checked_mul(self.cell_width)?)?;
        let rect = Rect::new(self.area.x.saturating_add(x), self.area.y + dy, self.cell_width, 1);
        let rect = rect.intersection(self.area);
        (!rect.is_empty()).then_some(rect)
    }

    /// A full-width line of the area.
    fn line(&self, dy: u16) -> Option<Rect> {
        (dy < self.area.height).then(|| Rect::new(self.area.x, self.area.y + dy, self.area.width, 1))
    }
}

fn legend(store: &CalendarStore<'_>) -> Line<'static> {
    let window = store.calendar.window();
    let range = match window.len() {
        1 => format!(" {} ", window.first_day()),
        _ => format!(" {} to {} ", window.first_day(), window.last_day()),
    };

    let mut spans = vec![range.bold()];
    let kinds = [
        ('1', EventKind::Booking),
        ('2', EventKind::Maintenance),
        ('3', EventKind::Cleaning),
    ];
    for (key, kind) in kinds {
        let label = format!(" {key}:{kind}");
        spans.push(match store.shows_kind(kind) {
            true => label.into(),
            false => label.dark_gray().crossed_out(),
        });
    }
    Line::from(spans)
}

fn render_tooltip(event: &Event, position: Point, area: Rect, buf: &mut Buffer) {
    let lines = tooltip_lines(event);
    let size = tooltip_size(&lines);
    let x = (f64::from(area.x) + position.x).max(0.0) as u16;
    let y = (f64::from(area.y) + position.y).max(0.0) as u16;
    let rect = Rect::new(x, y, size.width as u16, size.height as u16).intersection(area);
    if rect.is_empty() {
        return;
    }

    let block = Block::bordered()
        .border_set(border::ROUNDED)
        .border_style(Style::new().fg(block_color(event)));
    let text: Vec<Line<'_>> = lines.into_iter().map(Line::from).collect();
    Clear.render(rect, buf);
    Paragraph::new(text).block(block).render(rect, buf);
}

/// Size of the hover card in cells, borders included.
fn tooltip_size(lines: &[String]) -> Size {
    let width = lines.iter().map(|l| l.width()).max().unwrap_or(0) + 2;
    Size::new(width as f64, (lines.len() + 2) as f64)
}

/// Tooltip geometry for a card of `tooltip` size in `area`, which doubles as
/// the viewport so cards flip before crossing the page border.
fn geometry(area: Rect, tooltip: Size) -> TooltipGeometry {
    TooltipGeometry {
        container: CoreRect::new(
            f64::from(area.x),
            f64::from(area.y),
            f64::from(area.width),
            f64::from(area.height),
        ),
        tooltip,
        viewport: Size::new(f64::from(area.right()), f64::from(area.bottom())),
    }
}

fn block_color(event: &Event) -> Color {
    match event_color(event) {
        colored::Color::Green => Color::Green,
        colored::Color::Yellow => Color::Yellow,
        colored::Color::Red => Color::Red,
        colored::Color::Cyan => Color::Cyan,
        _ => Color::Reset,
    }
}
