// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::time::{Duration, Instant};
use std::{cell::RefCell, error::Error, rc::Rc};

use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::prelude::*;
use ratatui::{DefaultTerminal, Frame};
use yearmark_core::{YearProgress, read_backup_file, write_backup_file};

use crate::tui::app_store::{AppStore, Page, Task};
use crate::tui::component::{Component, Message};
use crate::tui::component_page::popup_area;
use crate::tui::day_editor::DayEditor;
use crate::tui::dispatcher::{Action, Dispatcher};
use crate::tui::grid_view::GridView;
use crate::tui::settings::Settings;

/// Upper bound on how long a key poll blocks, so ticks are never late.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Run the interactive year view until the user quits, handing back the
/// application state.
pub async fn run_year_progress(core: YearProgress) -> Result<YearProgress, Box<dyn Error>> {
    let tick = core.config().tick_interval();
    let store = Rc::new(RefCell::new(AppStore::new(core)));

    let mut terminal = ratatui::init();
    let result = {
        let mut dispatcher = Dispatcher::new();
        AppStore::register_to(store.clone(), &mut dispatcher);
        let mut app = App::new();
        event_loop(&mut app, &mut dispatcher, &store, &mut terminal, tick).await
    }; // release the dispatcher here, it holds a reference to the store
    ratatui::restore();
    result?;

    let store = Rc::try_unwrap(store)
        .map_err(|_| "Store still has references")?
        .into_inner();
    Ok(store.into_core())
}

async fn event_loop(
    app: &mut App,
    dispatcher: &mut Dispatcher,
    store: &RefCell<AppStore>,
    terminal: &mut DefaultTerminal,
    tick: Duration,
) -> Result<(), Box<dyn Error>> {
    let mut last_tick = Instant::now();
    let mut area = Rect::default();
    loop {
        terminal.draw(|frame| {
            area = frame.area();
            app.draw(store, frame);
        })?;

        let timeout = tick.saturating_sub(last_tick.elapsed()).min(POLL_INTERVAL);
        if event::poll(timeout)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            if is_interrupt(&key) {
                break;
            }
            if let Some(Message::Exit) = app.on_key(dispatcher, store, area, key) {
                break;
            }
        }

        if last_tick.elapsed() >= tick {
            dispatcher.dispatch(Action::Tick);
            last_tick = Instant::now();
        }

        run_task(store).await;
    }
    Ok(())
}

fn is_interrupt(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

/// Carry out the file work requested by the last action. The store is never
/// borrowed across an await point.
async fn run_task(store: &RefCell<AppStore>) {
    let task = store.borrow_mut().task.take();
    match task {
        Some(Task::Export) => {
            let (backup, dir) = {
                let store = store.borrow();
                (store.core.export_backup(), store.core.config().backup_dir())
            };
            let result = write_backup_file(&backup, &dir).await;
            store.borrow_mut().exported(result);
        }
        Some(Task::Import(path)) => {
            let result = read_backup_file(&path).await;
            store.borrow_mut().received_import(result);
        }
        None => {}
    }
}

/// The grid with the page popups drawn over it.
struct App {
    grid: GridView,
    editor: DayEditor,
    settings: Settings,
    page: Page,
}

impl App {
    fn new() -> Self {
        Self {
            grid: GridView::new(),
            editor: DayEditor::new(),
            settings: Settings::new(),
            page: Page::Grid,
        }
    }

    fn draw(&self, store: &RefCell<AppStore>, frame: &mut Frame) {
        let area = frame.area();
        self.render(store, area, frame.buffer_mut());

        if let Some(pos) = self.get_cursor_position(store, area) {
            frame.set_cursor_position(pos);
        }
    }

    fn popup(page: Page, area: Rect) -> Rect {
        match page {
            Page::Grid => area,
            Page::Editor => popup_area(area, 56, 18),
            Page::Settings => popup_area(area, 72, 25),
        }
    }

    fn page_mut(&mut self, page: Page) -> Option<&mut dyn Component<AppStore>> {
        match page {
            Page::Grid => None,
            Page::Editor => Some(&mut self.editor),
            Page::Settings => Some(&mut self.settings),
        }
    }

    /// Move focus to the page the store is on.
    fn sync_page(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<AppStore>) {
        let page = store.borrow().page;
        if page == self.page {
            return;
        }

        tracing::debug!(from = ?self.page, to = ?page, "switching page");
        if let Some(old) = self.page_mut(self.page) {
            old.deactivate(dispatcher, store);
        }
        if let Some(new) = self.page_mut(page) {
            new.activate(dispatcher, store);
        }
        self.page = page;
    }
}

impl Component<AppStore> for App {
    fn render(&self, store: &RefCell<AppStore>, area: Rect, buf: &mut Buffer) {
        self.grid.render(store, area, buf);
        let popup = Self::popup(self.page, area);
        match self.page {
            Page::Grid => {}
            Page::Editor => self.editor.render(store, popup, buf),
            Page::Settings => self.settings.render(store, popup, buf),
        }
    }

    fn get_cursor_position(&self, store: &RefCell<AppStore>, area: Rect) -> Option<(u16, u16)> {
        let popup = Self::popup(self.page, area);
        match self.page {
            Page::Grid => None,
            Page::Editor => self.editor.get_cursor_position(store, popup),
            Page::Settings => self.settings.get_cursor_position(store, popup),
        }
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<AppStore>,
        area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        self.sync_page(dispatcher, store);
        let popup = Self::popup(self.page, area);
        let msg = match self.page {
            Page::Grid => self.grid.on_key(dispatcher, store, area, event),
            Page::Editor => self.editor.on_key(dispatcher, store, popup, event),
            Page::Settings => self.settings.on_key(dispatcher, store, popup, event),
        };
        self.sync_page(dispatcher, store);
        msg
    }
}
