// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, error::Error, io, rc::Rc};

use ratatui::crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, KeyEventKind};
use ratatui::crossterm::execute;
use roomcal_core::Calendar;

use crate::tui::calendar_store::CalendarStore;
use crate::tui::calendar_view::CalendarView;
use crate::tui::component::{Component, Message};
use crate::tui::component_page::SinglePage;
use crate::tui::dispatcher::Dispatcher;

/// Runs the interactive calendar until the user quits.
pub fn browse(calendar: &mut Calendar) -> Result<(), Box<dyn Error>> {
    let store = Rc::new(RefCell::new(CalendarStore::new(calendar)));

    let mut terminal = ratatui::init();
    if let Err(e) = execute!(io::stdout(), EnableMouseCapture) {
        ratatui::restore();
        return Err(e.into());
    }

    let result = {
        let mut dispatcher = Dispatcher::new();
        CalendarStore::register_to(store.clone(), &mut dispatcher);
        let mut page = SinglePage::new(
            "Room Calendar".to_owned(),
            CalendarView::instructions(),
            CalendarView::new(),
        );

        loop {
            let area = match terminal.draw(|frame| page.render(&store, frame.area(), frame.buffer_mut())) {
                Ok(frame) => frame.area,
                Err(e) => break Err(e.into()),
            };

            let msg = match event::read() {
                Ok(event::Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    page.on_key(&mut dispatcher, &store, area, key.code)
                }
                Ok(event::Event::Mouse(mouse)) => page.on_mouse(&mut dispatcher, &store, area, mouse),
                Ok(_) => None, // Redraw on resize and focus changes
                Err(e) => break Err(e.into()),
            };

            if msg == Some(Message::Exit) {
                break Ok(());
            }
        }
    }; // release dispatcher and page here before restoring the terminal

    if let Err(e) = execute!(io::stdout(), DisableMouseCapture) {
        tracing::warn!(error = %e, "failed to disable mouse capture");
    }
    ratatui::restore();
    result
}
